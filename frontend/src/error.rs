use shared::AnalysisMode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("Unknown target '{target}' for {mode} analysis")]
    UnknownTarget { mode: AnalysisMode, target: String },
    #[error("{0}")]
    IncompleteSelection(String),
    #[error("Please select exactly 2 features for clustering. 3D visualization is not supported.")]
    TooManyFeatures,
    #[error("Please enter a valid number for {0}")]
    InvalidNumber(String),
    #[error("Please select a value for {0}")]
    MissingChoice(String),
    #[error("Run a successful {0} analysis before predicting")]
    NoSuccessfulRun(AnalysisMode),
    #[error("{0} results cannot be used for prediction")]
    PredictionUnsupported(AnalysisMode),
    /// Message reported by the analysis service, shown verbatim.
    #[error("{0}")]
    Backend(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl DashboardError {
    /// Local validation failures never reach the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DashboardError::IncompleteSelection(_)
                | DashboardError::TooManyFeatures
                | DashboardError::InvalidNumber(_)
                | DashboardError::MissingChoice(_)
        )
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

impl From<gloo_net::Error> for DashboardError {
    fn from(err: gloo_net::Error) -> Self {
        DashboardError::Network(err.to_string())
    }
}
