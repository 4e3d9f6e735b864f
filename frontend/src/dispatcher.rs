use shared::{AnalysisMode, AnalysisRequest, AnalysisResult};

use crate::error::DashboardError;
use crate::selection::Selection;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum ResultState {
    Idle,
    Pending,
    Ready(AnalysisResult),
    Failed(String),
}

/// A dispatched request; its generation decides whether the response still applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub generation: u64,
    pub mode: AnalysisMode,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Stale,
    Failed,
    Ready(Selection),
}

/// Owns the pending/ready/failed lifecycle of one mode's result area.
#[derive(Debug)]
pub struct AnalysisRequestDispatcher {
    mode: AnalysisMode,
    generation: u64,
    in_flight: Option<Selection>,
    state: ResultState,
}

impl AnalysisRequestDispatcher {
    pub fn new(mode: AnalysisMode) -> Self {
        Self { mode, generation: 0, in_flight: None, state: ResultState::Idle }
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == ResultState::Pending
    }

    /// Moves to `Pending` before anything is sent. A newer call supersedes older ones.
    pub fn begin(&mut self, selection: Selection) -> Ticket {
        self.generation += 1;
        let request = selection.to_request();
        log::info!(
            "Dispatching {} analysis #{} on '{}' with {:?}",
            self.mode,
            self.generation,
            selection.subject(),
            selection.features
        );
        self.in_flight = Some(selection);
        self.state = ResultState::Pending;
        Ticket { generation: self.generation, mode: self.mode, request }
    }

    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisResult, DashboardError>,
        session: &mut Session,
    ) -> Completion {
        if generation != self.generation {
            log::debug!(
                "Discarding stale {} response #{} (current #{})",
                self.mode,
                generation,
                self.generation
            );
            return Completion::Stale;
        }
        let Some(selection) = self.in_flight.take() else {
            return Completion::Stale;
        };

        match outcome {
            Ok(result) if result.mode() == self.mode => {
                log::info!("{} analysis #{} completed", self.mode, generation);
                session.record(selection.clone());
                self.state = ResultState::Ready(result);
                Completion::Ready(selection)
            }
            Ok(result) => {
                log::error!("Expected a {} result, got {}", self.mode, result.mode());
                self.state = ResultState::Failed(format!(
                    "An error occurred: unexpected {} result",
                    result.mode()
                ));
                Completion::Failed
            }
            Err(DashboardError::Backend(message)) => {
                log::warn!("{} analysis #{} rejected: {}", self.mode, generation, message);
                self.state = ResultState::Failed(message);
                Completion::Failed
            }
            Err(err) => {
                log::error!("{} analysis #{} failed: {}", self.mode, generation, err);
                self.state = ResultState::Failed(format!("An error occurred: {}", err));
                Completion::Failed
            }
        }
    }

    /// Clears the result area; any response still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.state = ResultState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RegressionResult, Technique};

    fn selection() -> Selection {
        Selection {
            mode: AnalysisMode::Regression,
            target: Some("price".into()),
            group_by: None,
            features: vec!["discount".into(), "rating".into()],
            technique: Technique::Linear,
            n_clusters: 0,
        }
    }

    fn regression(r2: f64) -> AnalysisResult {
        AnalysisResult::Regression(RegressionResult {
            r2,
            train_actual: vec![1.0],
            train_pred: vec![1.0],
            test_actual: vec![2.0],
            test_pred: vec![2.0],
            features: vec![],
            model_id: None,
        })
    }

    #[test]
    fn pending_is_set_before_completion() {
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let ticket = dispatcher.begin(selection());
        assert!(dispatcher.is_pending());
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.request, selection().to_request());
    }

    #[test]
    fn success_records_current_selection() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let ticket = dispatcher.begin(selection());

        let completion = dispatcher.complete(ticket.generation, Ok(regression(0.7)), &mut session);
        assert_eq!(completion, Completion::Ready(selection()));
        assert_eq!(dispatcher.state(), &ResultState::Ready(regression(0.7)));
        assert_eq!(session.last_run(AnalysisMode::Regression), Some(&selection()));
    }

    #[test]
    fn backend_error_is_shown_verbatim() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let ticket = dispatcher.begin(selection());

        let completion = dispatcher.complete(
            ticket.generation,
            Err(DashboardError::Backend("target not found".into())),
            &mut session,
        );
        assert_eq!(completion, Completion::Failed);
        assert_eq!(dispatcher.state(), &ResultState::Failed("target not found".into()));
        assert!(session.last_run(AnalysisMode::Regression).is_none());
    }

    #[test]
    fn transport_error_includes_cause() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let ticket = dispatcher.begin(selection());
        dispatcher.complete(ticket.generation, Err(DashboardError::Network("offline".into())), &mut session);
        assert_eq!(
            dispatcher.state(),
            &ResultState::Failed("An error occurred: Network error: offline".into())
        );
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let first = dispatcher.begin(selection());
        let second = dispatcher.begin(selection());

        assert_eq!(dispatcher.complete(first.generation, Ok(regression(0.1)), &mut session), Completion::Stale);
        assert!(dispatcher.is_pending());

        dispatcher.complete(second.generation, Ok(regression(0.9)), &mut session);
        assert_eq!(dispatcher.state(), &ResultState::Ready(regression(0.9)));
    }

    #[test]
    fn reset_orphans_in_flight_request() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Regression);
        let ticket = dispatcher.begin(selection());
        dispatcher.reset();
        assert_eq!(dispatcher.complete(ticket.generation, Ok(regression(0.9)), &mut session), Completion::Stale);
        assert_eq!(dispatcher.state(), &ResultState::Idle);
    }

    #[test]
    fn mismatched_result_fails() {
        let mut session = Session::default();
        let mut dispatcher = AnalysisRequestDispatcher::new(AnalysisMode::Classification);
        let mut chosen = selection();
        chosen.mode = AnalysisMode::Classification;
        let ticket = dispatcher.begin(chosen);
        assert_eq!(dispatcher.complete(ticket.generation, Ok(regression(0.9)), &mut session), Completion::Failed);
        assert!(matches!(dispatcher.state(), ResultState::Failed(_)));
    }
}
