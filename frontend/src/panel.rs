use shared::{AnalysisMode, AnalysisResult, PredictionRequest, Technique};

use crate::config::DashboardConfig;
use crate::dispatcher::{AnalysisRequestDispatcher, Completion, ResultState, Ticket};
use crate::error::DashboardError;
use crate::prediction::{PredictionFormManager, PredictionTag};
use crate::render::{ResultChart, ResultView, render_view};
use crate::selection::FeatureSelectionController;
use crate::session::Session;

/// One analysis mode's selection, result area and prediction form.
#[derive(Debug)]
pub struct AnalysisPanel {
    controller: FeatureSelectionController,
    dispatcher: AnalysisRequestDispatcher,
    view: Option<ResultView>,
    active_chart: ResultChart,
    form: Option<PredictionFormManager>,
}

impl AnalysisPanel {
    pub fn new(mode: AnalysisMode, config: &DashboardConfig) -> Self {
        Self {
            controller: FeatureSelectionController::new(mode, config.default_cluster_count),
            dispatcher: AnalysisRequestDispatcher::new(mode),
            view: None,
            active_chart: ResultChart::Main,
            form: None,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &FeatureSelectionController {
        &self.controller
    }

    pub fn state(&self) -> &ResultState {
        self.dispatcher.state()
    }

    pub fn is_running(&self) -> bool {
        self.dispatcher.is_pending()
    }

    pub fn view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    pub fn form(&self) -> Option<&PredictionFormManager> {
        self.form.as_ref()
    }

    pub fn change_target(&mut self, target: Option<&str>) -> Result<(), DashboardError> {
        self.controller.set_target(target)?;
        self.clear_results();
        Ok(())
    }

    pub fn set_checked(&mut self, feature: &str, checked: bool) {
        self.controller.set_checked(feature, checked);
    }

    pub fn set_technique(&mut self, technique: Technique) -> Result<(), DashboardError> {
        self.controller.set_technique(technique)
    }

    pub fn set_cluster_count(&mut self, n_clusters: u32) {
        self.controller.set_cluster_count(n_clusters);
    }

    pub fn clear_results(&mut self) {
        self.dispatcher.reset();
        self.view = None;
        self.form = None;
        self.active_chart = ResultChart::Main;
    }

    /// Validates the selection and switches the result area to pending.
    pub fn start_run(&mut self) -> Result<Ticket, DashboardError> {
        let selection = self.controller.validate()?;
        self.view = None;
        self.form = None;
        self.active_chart = ResultChart::Main;
        Ok(self.dispatcher.begin(selection))
    }

    /// Applies a response. Returns the form id when the new form needs its option lookup.
    pub fn finish_run(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisResult, DashboardError>,
        session: &mut Session,
    ) -> Option<u64> {
        let Completion::Ready(selection) = self.dispatcher.complete(generation, outcome, session) else {
            return None;
        };
        if let ResultState::Ready(result) = self.dispatcher.state() {
            self.view = Some(render_view(result));
        }

        if self.mode().predict_endpoint().is_none() {
            return None;
        }
        match PredictionFormManager::build(selection, generation) {
            Ok(form) => {
                let lookup = form.needs_options().then(|| form.form_id());
                self.form = Some(form);
                lookup
            }
            Err(err) => {
                log::error!("Prediction form unavailable: {}", err);
                None
            }
        }
    }

    pub fn active_chart(&self) -> ResultChart {
        match &self.view {
            Some(view) if view.has_chart(self.active_chart) => self.active_chart,
            _ => ResultChart::Main,
        }
    }

    pub fn select_chart(&mut self, chart: ResultChart) {
        self.active_chart = chart;
    }

    pub fn toggle_series(&mut self, chart: ResultChart, index: usize) -> bool {
        self.view.as_mut().is_some_and(|v| v.toggle_series(chart, index))
    }

    pub fn fail_chart(&mut self, chart: ResultChart, notice: String) {
        if let Some(view) = self.view.as_mut() {
            view.fail_chart(chart, notice);
        }
    }

    pub fn apply_options(&mut self, form_id: u64, outcome: Result<Vec<String>, DashboardError>) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        match outcome {
            Ok(options) => form.apply_options(form_id, options),
            Err(err) => {
                log::warn!("Brand lookup failed, selector keeps its placeholder: {}", err);
                false
            }
        }
    }

    pub fn set_input(&mut self, feature: &str, value: String) {
        if let Some(form) = self.form.as_mut() {
            form.set_value(feature, value);
        }
    }

    /// Only offered after a successful run of this mode.
    pub fn begin_prediction(&mut self, session: &Session) -> Result<(PredictionTag, PredictionRequest), DashboardError> {
        let mode = self.mode();
        if session.last_run(mode).is_none() {
            return Err(DashboardError::NoSuccessfulRun(mode));
        }
        let form = self.form.as_mut().ok_or(DashboardError::NoSuccessfulRun(mode))?;
        form.begin()
    }

    pub fn finish_prediction(&mut self, tag: PredictionTag, outcome: Result<String, DashboardError>) -> bool {
        self.form.as_mut().is_some_and(|form| form.complete(tag, outcome))
    }
}
