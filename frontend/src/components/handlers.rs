use serde_json::Value;
use shared::{AnalysisMode, AnalysisResult, ChartOption, Technique};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::super::{ChartSlot, Model, Msg, Page};
use crate::api;
use crate::error::DashboardError;
use crate::prediction::PredictionTag;
use crate::render::canvas::CanvasChartRenderer;
use crate::render::{ChartBody, ChartSpec, ResultChart, draw};
use crate::visualization::VisualizationState;

pub fn handle_select_page(model: &mut Model, page: Page) -> bool {
    if model.page == page {
        return false;
    }
    model.page = page;
    model.error = None;
    true
}

pub fn handle_set_target(model: &mut Model, mode: AnalysisMode, target: Option<String>) -> bool {
    let Some(panel) = model.panels.get_mut(&mode) else {
        return false;
    };
    model.error = match panel.change_target(target.as_deref()) {
        Ok(()) => None,
        Err(err) => {
            log::error!("{}", err);
            Some(err.to_string())
        }
    };
    true
}

pub fn handle_toggle_feature(model: &mut Model, mode: AnalysisMode, feature: &str, checked: bool) -> bool {
    match model.panels.get_mut(&mode) {
        Some(panel) => {
            panel.set_checked(feature, checked);
            true
        }
        None => false,
    }
}

pub fn handle_set_technique(model: &mut Model, mode: AnalysisMode, technique: Technique) -> bool {
    let Some(panel) = model.panels.get_mut(&mode) else {
        return false;
    };
    if let Err(err) = panel.set_technique(technique) {
        model.error = Some(err.to_string());
    }
    true
}

pub fn handle_set_cluster_count(model: &mut Model, mode: AnalysisMode, count: u32) -> bool {
    match model.panels.get_mut(&mode) {
        Some(panel) => {
            panel.set_cluster_count(count);
            true
        }
        None => false,
    }
}

pub fn handle_run_analysis(model: &mut Model, ctx: &Context<Model>, mode: AnalysisMode) -> bool {
    let Some(panel) = model.panels.get_mut(&mode) else {
        return false;
    };
    let ticket = match panel.start_run() {
        Ok(ticket) => ticket,
        Err(err) => {
            if !err.is_validation() {
                log::error!("{} analysis not started: {}", mode, err);
            }
            model.error = Some(err.to_string());
            return true;
        }
    };
    model.error = None;

    spawn_local({
        let link = ctx.link().clone();
        let backend = model.backend.clone();

        async move {
            let outcome = api::run_analysis(&backend, ticket.mode, &ticket.request).await;
            link.send_message(Msg::AnalysisCompleted(ticket.mode, ticket.generation, outcome));
        }
    });
    true
}

pub fn handle_analysis_completed(
    model: &mut Model,
    ctx: &Context<Model>,
    mode: AnalysisMode,
    generation: u64,
    outcome: Result<AnalysisResult, DashboardError>,
) -> bool {
    let Some(panel) = model.panels.get_mut(&mode) else {
        return false;
    };
    if let Some(form_id) = panel.finish_run(generation, outcome, &mut model.session) {
        send_brands_request(model, ctx, mode, form_id);
    }
    true
}

pub fn send_brands_request(model: &Model, ctx: &Context<Model>, mode: AnalysisMode, form_id: u64) {
    spawn_local({
        let link = ctx.link().clone();
        let backend = model.backend.clone();

        async move {
            let outcome = api::fetch_brands(&backend).await;
            link.send_message(Msg::BrandsLoaded(mode, form_id, outcome));
        }
    });
}

pub fn handle_select_chart(model: &mut Model, mode: AnalysisMode, chart: ResultChart) -> bool {
    match model.panels.get_mut(&mode) {
        Some(panel) => {
            panel.select_chart(chart);
            true
        }
        None => false,
    }
}

pub fn handle_toggle_series(model: &mut Model, slot: ChartSlot, index: usize) -> bool {
    match slot {
        ChartSlot::Result(mode, chart) => {
            model.panels.get_mut(&mode).is_some_and(|panel| panel.toggle_series(chart, index))
        }
        ChartSlot::Visualization => model.visualization.toggle_series(index),
    }
}

pub fn handle_chart_failed(model: &mut Model, slot: ChartSlot, notice: String) -> bool {
    match slot {
        ChartSlot::Result(mode, chart) => {
            if let Some(panel) = model.panels.get_mut(&mode) {
                panel.fail_chart(chart, notice);
            }
        }
        ChartSlot::Visualization => model.visualization.fail_chart(notice),
    }
    true
}

pub fn handle_brands_loaded(
    model: &mut Model,
    mode: AnalysisMode,
    form_id: u64,
    outcome: Result<Vec<String>, DashboardError>,
) -> bool {
    model.panels.get_mut(&mode).is_some_and(|panel| panel.apply_options(form_id, outcome))
}

pub fn handle_set_prediction_input(model: &mut Model, mode: AnalysisMode, feature: &str, value: String) -> bool {
    match model.panels.get_mut(&mode) {
        Some(panel) => {
            panel.set_input(feature, value);
            true
        }
        None => false,
    }
}

pub fn handle_predict(model: &mut Model, ctx: &Context<Model>, mode: AnalysisMode) -> bool {
    let Some(panel) = model.panels.get_mut(&mode) else {
        return false;
    };
    let (tag, request) = match panel.begin_prediction(&model.session) {
        Ok(pending) => pending,
        Err(err) => {
            model.error = Some(err.to_string());
            return true;
        }
    };
    model.error = None;

    spawn_local({
        let link = ctx.link().clone();
        let backend = model.backend.clone();

        async move {
            let outcome = api::predict(&backend, mode, &request).await;
            link.send_message(Msg::PredictionCompleted(mode, tag, outcome));
        }
    });
    true
}

pub fn handle_prediction_completed(
    model: &mut Model,
    mode: AnalysisMode,
    tag: PredictionTag,
    outcome: Result<String, DashboardError>,
) -> bool {
    model.panels.get_mut(&mode).is_some_and(|panel| panel.finish_prediction(tag, outcome))
}

pub fn handle_set_chart_option(model: &mut Model, ctx: &Context<Model>, option: ChartOption) -> bool {
    model.visualization.select(option);
    handle_load_visualization(model, ctx)
}

pub fn handle_load_visualization(model: &mut Model, ctx: &Context<Model>) -> bool {
    let (generation, option) = model.visualization.begin();

    spawn_local({
        let link = ctx.link().clone();
        let backend = model.backend.clone();

        async move {
            let outcome = api::fetch_chart_data(&backend, option).await;
            link.send_message(Msg::VisualizationLoaded(generation, option, outcome));
        }
    });
    true
}

pub fn handle_visualization_loaded(
    model: &mut Model,
    generation: u64,
    option: ChartOption,
    outcome: Result<Value, DashboardError>,
) -> bool {
    model.visualization.complete(generation, option, outcome)
}

fn container_is_empty(container_id: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(container_id))
        .is_none_or(|element| element.child_element_count() == 0)
}

/// Draws the one chart container the current page shows, if any, unless it already shows that chart.
pub fn draw_visible_chart(model: &mut Model, ctx: &Context<Model>) {
    let (slot, spec): (ChartSlot, ChartSpec) = match model.page {
        Page::Analysis(mode) => {
            let Some(panel) = model.panel(mode) else {
                return;
            };
            let chart = panel.active_chart();
            match panel.view().and_then(|view| view.chart(chart)).map(|p| &p.body) {
                Some(ChartBody::Spec(spec)) => (ChartSlot::Result(mode, chart), spec.clone()),
                _ => return,
            }
        }
        Page::Visualization => match model.visualization.state() {
            VisualizationState::Ready(spec) => (ChartSlot::Visualization, spec.clone()),
            _ => return,
        },
    };

    let container_id = slot.container_id();
    // A re-created container is empty even when the chart itself is unchanged.
    if model.drawn.is_current(&container_id, &spec) && !container_is_empty(&container_id) {
        return;
    }
    match draw(&CanvasChartRenderer, &container_id, &spec) {
        Ok(()) => model.drawn.remember(container_id, spec),
        Err(notice) => {
            model.drawn.forget();
            ctx.link().send_message(Msg::ChartFailed(slot, notice));
        }
    }
}
