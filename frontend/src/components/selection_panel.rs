use super::super::{Model, Msg};
use crate::panel::AnalysisPanel;
use crate::schema::{self, humanize};
use shared::{AnalysisMode, Technique};
use std::str::FromStr;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_selection_panel(panel: &AnalysisPanel, link: &Scope<Model>) -> Html {
    let mode = panel.mode();
    let controller = panel.controller();
    let gate = controller.gate();
    let target_label = match mode {
        AnalysisMode::Clustering => "Group by",
        _ => "Target variable",
    };

    html! {
        <section class="selection-panel">
            <h2>{ format!("{} Analysis", mode.title()) }</h2>

            <div class="form-group">
                <label for={format!("{}-target", mode)}>{ target_label }</label>
                <select
                    id={format!("{}-target", mode)}
                    onchange={link.callback(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::SetTarget(mode, Some(select.value()).filter(|v| !v.is_empty()))
                    })}
                >
                    <option value="" selected={controller.target().is_none()}>{"-- Select --"}</option>
                    { for schema::targets_for(mode).into_iter().map(|target| html! {
                        <option value={target} selected={controller.target() == Some(target)}>
                            { humanize(target) }
                        </option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for={format!("{}-technique", mode)}>{"Technique"}</label>
                <select
                    id={format!("{}-technique", mode)}
                    onchange={link.batch_callback(move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Technique::from_str(&select.value()).ok().map(|t| Msg::SetTechnique(mode, t))
                    })}
                >
                    { for mode.techniques().iter().map(|technique| html! {
                        <option value={technique.as_ref().to_string()} selected={controller.technique() == *technique}>
                            { technique.label() }
                        </option>
                    })}
                </select>
            </div>

            { render_cluster_count(panel, link) }
            { render_feature_checklist(panel, link) }

            if let Some(warning) = gate.warning {
                <p class="selection-warning">{ warning }</p>
            }

            <button
                class="run-button"
                disabled={!gate.enabled}
                onclick={link.callback(move |_| Msg::RunAnalysis(mode))}
            >
                <i class="fa-solid fa-play"></i>
                if panel.is_running() {
                    {" Running..."}
                } else {
                    { format!(" Run {}", mode.title()) }
                }
            </button>
        </section>
    }
}

fn render_cluster_count(panel: &AnalysisPanel, link: &Scope<Model>) -> Html {
    let mode = panel.mode();
    if mode != AnalysisMode::Clustering {
        return html! {};
    }
    let count = panel.controller().n_clusters();

    html! {
        <div class="form-group">
            <label for="cluster-count">{"Number of clusters (0 = optimal)"}</label>
            <input
                id="cluster-count"
                type="number"
                min="0"
                value={count.to_string()}
                onchange={link.batch_callback(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    let value = input.value();
                    let value = value.trim();
                    if value.is_empty() {
                        return Some(Msg::SetClusterCount(mode, 0));
                    }
                    value.parse::<u32>().ok().map(|n| Msg::SetClusterCount(mode, n))
                })}
            />
        </div>
    }
}

fn render_feature_checklist(panel: &AnalysisPanel, link: &Scope<Model>) -> Html {
    let mode = panel.mode();
    let options = panel.controller().options();
    if options.is_empty() {
        return html! { <p class="hint">{"Select a target to see the available features."}</p> };
    }

    html! {
        <fieldset class="feature-list">
            <legend>{"Features"}</legend>
            { for options.into_iter().map(|option| {
                let name = option.name;
                html! {
                    <label class="feature-option">
                        <input
                            type="checkbox"
                            value={name}
                            checked={option.checked}
                            onchange={link.callback(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::ToggleFeature(mode, name.to_string(), input.checked())
                            })}
                        />
                        { option.label }
                    </label>
                }
            })}
        </fieldset>
    }
}
