use super::super::{Model, Msg};
use super::utils::{debounce, render_loading};
use crate::panel::AnalysisPanel;
use crate::prediction::{FeatureInputKind, FormField, PredictionState};
use shared::AnalysisMode;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_prediction_form(panel: &AnalysisPanel, link: &Scope<Model>) -> Html {
    let Some(form) = panel.form() else {
        return html! {};
    };
    let mode = form.mode();

    let outcome = match form.state() {
        PredictionState::Idle => html! {},
        PredictionState::Pending => render_loading("Predicting..."),
        PredictionState::Ready(caption) => html! { <div class="prediction-result">{ caption }</div> },
        PredictionState::Failed(message) => html! { <div class="error-message"><p>{ message }</p></div> },
    };

    html! {
        <section class="prediction-form" key={form.form_id().to_string()}>
            <h3>{ format!("Predict {}", form.target_label()) }</h3>
            { for form.fields().iter().map(|field| render_field(mode, field, link)) }
            <button class="predict-button" onclick={debounce(300, link, move || Msg::Predict(mode))}>
                {"Predict"}
            </button>
            { outcome }
        </section>
    }
}

fn render_field(mode: AnalysisMode, field: &FormField, link: &Scope<Model>) -> Html {
    let id = format!("{}-predict-{}", mode, field.feature);
    let feature = field.feature.clone();

    let input = match &field.kind {
        FeatureInputKind::Numeric => html! {
            <input
                id={id.clone()}
                type="number"
                step="any"
                placeholder={field.placeholder.clone()}
                value={field.value.clone()}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetPredictionInput(mode, feature.clone(), input.value())
                })}
            />
        },
        FeatureInputKind::Categorical { options } => html! {
            <select
                id={id.clone()}
                onchange={link.callback(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    Msg::SetPredictionInput(mode, feature.clone(), select.value())
                })}
            >
                <option value="" selected={field.value.is_empty()}>{ &field.placeholder }</option>
                { for options.iter().map(|choice| html! {
                    <option value={choice.clone()} selected={*choice == field.value}>{ choice }</option>
                })}
            </select>
        },
    };

    html! {
        <div class="form-group">
            <label for={id}>{ &field.label }</label>
            { input }
        </div>
    }
}
