use super::super::{ChartSlot, Model, Msg};
use super::utils::{render_chart, render_chart_notice, render_loading};
use crate::visualization::{VisualizationPage, VisualizationState, chart_title};
use shared::ChartOption;
use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

pub fn render_visualization_page(page: &VisualizationPage, link: &Scope<Model>) -> Html {
    let selected = page.option();
    let body = match page.state() {
        VisualizationState::Idle => html! { <p class="hint">{"Choose a chart to load it."}</p> },
        VisualizationState::Pending => render_loading("Loading chart data..."),
        VisualizationState::Ready(spec) => render_chart(spec, ChartSlot::Visualization, link),
        VisualizationState::Failed(notice) => render_chart_notice(notice),
    };

    html! {
        <section class="visualization-page">
            <div class="form-group">
                <label for="chart-option">{"Chart"}</label>
                <select
                    id="chart-option"
                    onchange={link.batch_callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        ChartOption::from_str(&select.value()).ok().map(Msg::SetChartOption)
                    })}
                >
                    { for ChartOption::iter().map(|option| html! {
                        <option value={option.as_ref().to_string()} selected={option == selected}>
                            { chart_title(option) }
                        </option>
                    })}
                </select>
                <button class="load-button" onclick={link.callback(|_| Msg::LoadVisualization)}>
                    <i class="fa-solid fa-rotate"></i>{" Load"}
                </button>
            </div>
            { body }
        </section>
    }
}
