mod analysis;
mod prediction;
mod visualization;

pub use analysis::*;
pub use prediction::*;
pub use visualization::*;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisMode {
    Regression,
    Classification,
    Clustering,
}

impl AnalysisMode {
    pub fn title(self) -> &'static str {
        match self {
            AnalysisMode::Regression => "Regression",
            AnalysisMode::Classification => "Classification",
            AnalysisMode::Clustering => "Clustering",
        }
    }

    pub fn run_endpoint(self) -> &'static str {
        match self {
            AnalysisMode::Regression => "/run_regression",
            AnalysisMode::Classification => "/run_classification",
            AnalysisMode::Clustering => "/run_clustering",
        }
    }

    /// Clustering results cannot be used for prediction.
    pub fn predict_endpoint(self) -> Option<&'static str> {
        match self {
            AnalysisMode::Regression => Some("/predict"),
            AnalysisMode::Classification => Some("/predict_class"),
            AnalysisMode::Clustering => None,
        }
    }

    pub fn techniques(self) -> &'static [Technique] {
        match self {
            AnalysisMode::Regression => &[Technique::Linear, Technique::Svr],
            AnalysisMode::Classification => &[Technique::DecisionTree, Technique::Svm],
            AnalysisMode::Clustering => &[Technique::Kmeans, Technique::Hierarchical],
        }
    }

    pub fn default_technique(self) -> Technique {
        self.techniques()[0]
    }
}

/// Algorithm identifiers understood by the analysis service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Technique {
    Linear,
    Svr,
    DecisionTree,
    Svm,
    Kmeans,
    Hierarchical,
}

impl Technique {
    pub fn label(self) -> &'static str {
        match self {
            Technique::Linear => "Linear Regression",
            Technique::Svr => "Support Vector Regression",
            Technique::DecisionTree => "Decision Tree",
            Technique::Svm => "Support Vector Machine",
            Technique::Kmeans => "K-Means",
            Technique::Hierarchical => "Hierarchical",
        }
    }

    pub fn mode(self) -> AnalysisMode {
        match self {
            Technique::Linear | Technique::Svr => AnalysisMode::Regression,
            Technique::DecisionTree | Technique::Svm => AnalysisMode::Classification,
            Technique::Kmeans | Technique::Hierarchical => AnalysisMode::Clustering,
        }
    }
}
