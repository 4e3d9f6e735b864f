use super::super::{ChartSlot, Model, Msg};
use crate::render::ChartSpec;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::html::Scope;
use yew::prelude::*;

// Debounce button clicks so double clicks send one message
pub fn debounce<F>(duration: u32, link: &Scope<Model>, make_msg: F) -> Callback<MouseEvent>
where
    F: Fn() -> Msg + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let make_msg = Rc::new(make_msg);
    let link = link.clone();

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let link = link.clone();
        let make_msg = Rc::clone(&make_msg);
        *timeout_ref = Some(Timeout::new(duration, move || link.send_message(make_msg())));
    })
}

pub fn render_error_message(error: Option<&str>, link: &Scope<Model>) -> Html {
    if let Some(error_msg) = error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
                <button class="dismiss" onclick={link.callback(|_| Msg::DismissError)}>{"×"}</button>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_loading(text: &str) -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{ text }</p>
        </div>
    }
}

/// Chart container plus a clickable legend that shows or hides series.
pub fn render_chart(spec: &ChartSpec, slot: ChartSlot, link: &Scope<Model>) -> Html {
    html! {
        <div class="chart-wrapper">
            <div id={slot.container_id()} class="chart-container"></div>
            <ul class="chart-legend">
                { for spec.legend().map(|(index, series)| {
                    let name = series.name.clone().unwrap_or_default();
                    html! {
                        <li
                            class={classes!("legend-item", (!series.visible).then_some("hidden"))}
                            style={series.color.as_ref().map(|c| format!("border-color: {}", c))}
                            onclick={link.callback(move |_| Msg::ToggleSeries(slot, index))}
                        >
                            { name }
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}

pub fn render_chart_notice(notice: &str) -> Html {
    html! {
        <div class="chart-error">
            <i class="fa-solid fa-triangle-exclamation"></i>
            <p>{ notice }</p>
        </div>
    }
}
