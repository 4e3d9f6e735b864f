mod api;
mod components;
mod config;
mod dispatcher;
mod error;
mod panel;
mod prediction;
mod render;
mod schema;
mod selection;
mod session;
#[cfg(test)]
mod testing;
mod visualization;

use std::collections::HashMap;

use serde_json::Value;
use shared::{AnalysisMode, AnalysisResult, ChartOption, Technique};
use strum::IntoEnumIterator;
use yew::prelude::*;

use crate::api::HttpBackend;
use crate::components::handlers;
use crate::components::header::render_header;
use crate::components::prediction_form::render_prediction_form;
use crate::components::results::render_results;
use crate::components::selection_panel::render_selection_panel;
use crate::components::utils::render_error_message;
use crate::components::visualization::render_visualization_page;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::panel::AnalysisPanel;
use crate::prediction::PredictionTag;
use crate::render::ResultChart;
use crate::render::chart::DrawCache;
use crate::session::Session;
use crate::visualization::VisualizationPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Analysis(AnalysisMode),
    Visualization,
}

/// A chart container on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    Result(AnalysisMode, ResultChart),
    Visualization,
}

impl ChartSlot {
    pub fn container_id(self) -> String {
        match self {
            ChartSlot::Result(mode, chart) => format!("{}-{}-chart", mode, chart.key()),
            ChartSlot::Visualization => visualization::CHART_CONTAINER.to_string(),
        }
    }
}

pub enum Msg {
    SelectPage(Page),

    // Selection
    SetTarget(AnalysisMode, Option<String>),
    ToggleFeature(AnalysisMode, String, bool),
    SetTechnique(AnalysisMode, Technique),
    SetClusterCount(AnalysisMode, u32),

    // Analysis
    RunAnalysis(AnalysisMode),
    AnalysisCompleted(AnalysisMode, u64, Result<AnalysisResult, DashboardError>),
    SelectChart(AnalysisMode, ResultChart),
    ToggleSeries(ChartSlot, usize),
    ChartFailed(ChartSlot, String),

    // Prediction
    BrandsLoaded(AnalysisMode, u64, Result<Vec<String>, DashboardError>),
    SetPredictionInput(AnalysisMode, String, String),
    Predict(AnalysisMode),
    PredictionCompleted(AnalysisMode, PredictionTag, Result<String, DashboardError>),

    // Visualization
    SetChartOption(ChartOption),
    LoadVisualization,
    VisualizationLoaded(u64, ChartOption, Result<Value, DashboardError>),

    DismissError,
}

pub struct Model {
    backend: HttpBackend,
    page: Page,
    panels: HashMap<AnalysisMode, AnalysisPanel>,
    session: Session,
    visualization: VisualizationPage,
    error: Option<String>,
    drawn: DrawCache,
}

impl Model {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            backend: HttpBackend::new(config.api_base.clone()),
            page: Page::Analysis(AnalysisMode::Regression),
            panels: AnalysisMode::iter().map(|mode| (mode, AnalysisPanel::new(mode, config))).collect(),
            session: Session::default(),
            visualization: VisualizationPage::default(),
            error: None,
            drawn: DrawCache::default(),
        }
    }

    fn panel(&self, mode: AnalysisMode) -> Option<&AnalysisPanel> {
        self.panels.get(&mode)
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let (config, problem) = DashboardConfig::load();
        if let Some(problem) = problem {
            log::warn!("{}", problem);
        }
        Model::new(&config)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectPage(page) => handlers::handle_select_page(self, page),

            // Selection
            Msg::SetTarget(mode, target) => handlers::handle_set_target(self, mode, target),
            Msg::ToggleFeature(mode, feature, checked) => {
                handlers::handle_toggle_feature(self, mode, &feature, checked)
            }
            Msg::SetTechnique(mode, technique) => handlers::handle_set_technique(self, mode, technique),
            Msg::SetClusterCount(mode, count) => handlers::handle_set_cluster_count(self, mode, count),

            // Analysis
            Msg::RunAnalysis(mode) => handlers::handle_run_analysis(self, ctx, mode),
            Msg::AnalysisCompleted(mode, generation, outcome) => {
                handlers::handle_analysis_completed(self, ctx, mode, generation, outcome)
            }
            Msg::SelectChart(mode, chart) => handlers::handle_select_chart(self, mode, chart),
            Msg::ToggleSeries(slot, index) => handlers::handle_toggle_series(self, slot, index),
            Msg::ChartFailed(slot, notice) => handlers::handle_chart_failed(self, slot, notice),

            // Prediction
            Msg::BrandsLoaded(mode, form_id, outcome) => {
                handlers::handle_brands_loaded(self, mode, form_id, outcome)
            }
            Msg::SetPredictionInput(mode, feature, value) => {
                handlers::handle_set_prediction_input(self, mode, &feature, value)
            }
            Msg::Predict(mode) => handlers::handle_predict(self, ctx, mode),
            Msg::PredictionCompleted(mode, tag, outcome) => {
                handlers::handle_prediction_completed(self, mode, tag, outcome)
            }

            // Visualization
            Msg::SetChartOption(option) => handlers::handle_set_chart_option(self, ctx, option),
            Msg::LoadVisualization => handlers::handle_load_visualization(self, ctx),
            Msg::VisualizationLoaded(generation, option, outcome) => {
                handlers::handle_visualization_loaded(self, generation, option, outcome)
            }

            Msg::DismissError => {
                self.error = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let content = match self.page {
            Page::Analysis(mode) => match self.panel(mode) {
                Some(panel) => html! {
                    <>
                        { render_selection_panel(panel, link) }
                        { render_error_message(self.error.as_deref(), link) }
                        { render_results(panel, link) }
                        { render_prediction_form(panel, link) }
                    </>
                },
                None => html! {},
            },
            Page::Visualization => html! {
                <>
                    { render_error_message(self.error.as_deref(), link) }
                    { render_visualization_page(&self.visualization, link) }
                </>
            },
        };

        html! {
            <div class="container">
                { render_header(self.page, link) }
                <main class="main-content">
                    { content }
                </main>
                <footer class="app-footer">
                    <p>{"Product Analytics Dashboard | Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        handlers::draw_visible_chart(self, ctx);
    }
}

fn main() {
    let (config, _) = DashboardConfig::load();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    yew::Renderer::<Model>::new().render();
}
