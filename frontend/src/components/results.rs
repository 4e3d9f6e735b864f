use super::super::{ChartSlot, Model, Msg};
use super::utils::{render_chart, render_chart_notice, render_loading};
use crate::dispatcher::ResultState;
use crate::panel::AnalysisPanel;
use crate::render::{ChartBody, ResultView};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_results(panel: &AnalysisPanel, link: &Scope<Model>) -> Html {
    match (panel.state(), panel.view()) {
        (ResultState::Idle, _) => html! {},
        (ResultState::Pending, _) => render_loading("Running analysis..."),
        (ResultState::Failed(message), _) => html! {
            <div class="results-container failed">
                <div class="error-message">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <p>{ message }</p>
                </div>
            </div>
        },
        (ResultState::Ready(_), Some(view)) => render_view(panel, view, link),
        (ResultState::Ready(_), None) => html! {},
    }
}

fn render_view(panel: &AnalysisPanel, view: &ResultView, link: &Scope<Model>) -> Html {
    let mode = panel.mode();
    let active = panel.active_chart();

    let chart_area = match view.chart(active).map(|p| &p.body) {
        Some(ChartBody::Spec(spec)) => render_chart(spec, ChartSlot::Result(mode, active), link),
        Some(ChartBody::Notice(notice)) => render_chart_notice(notice),
        None => html! {},
    };

    html! {
        <div class="results-container">
            <h2>{ &view.heading }</h2>
            <div class="metric-cards">
                { for view.metrics.iter().map(|card| html! {
                    <div class="metric-card">
                        <div class="metric-label">{ &card.label }</div>
                        <div class="metric-value">{ &card.value }</div>
                        if let Some(note) = &card.note {
                            <div class="metric-note">{ note }</div>
                        }
                    </div>
                })}
            </div>
            { for view.notes.iter().map(|note| html! { <p class="result-note">{ note }</p> }) }

            if view.charts.len() > 1 {
                <ul class="chart-tabs">
                    { for view.charts.iter().map(|tab| {
                        let chart = tab.chart;
                        html! {
                            <li
                                class={classes!("chart-tab", (chart == active).then_some("active"))}
                                onclick={link.callback(move |_| Msg::SelectChart(mode, chart))}
                            >
                                { tab.tab_label }
                            </li>
                        }
                    })}
                </ul>
            }
            { chart_area }
        </div>
    }
}
