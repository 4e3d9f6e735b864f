use shared::{AnalysisMode, AnalysisRequest, ClusteringRequest, SupervisedRequest, Technique};

use crate::error::DashboardError;
use crate::schema::{self, CLUSTERING_FEATURES};

const CLUSTERING_FEATURE_COUNT: usize = 2;

/// A validated analysis request as chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub mode: AnalysisMode,
    pub target: Option<String>,
    pub group_by: Option<String>,
    pub features: Vec<String>,
    pub technique: Technique,
    pub n_clusters: u32,
}

impl Selection {
    pub fn to_request(&self) -> AnalysisRequest {
        match self.mode {
            AnalysisMode::Clustering => AnalysisRequest::Clustering(ClusteringRequest {
                group_by: self.group_by.clone().unwrap_or_default(),
                technique: self.technique,
                n_clusters: self.n_clusters,
                features: self.features.clone(),
            }),
            AnalysisMode::Regression | AnalysisMode::Classification => {
                AnalysisRequest::Supervised(SupervisedRequest {
                    target: self.target.clone().unwrap_or_default(),
                    features: self.features.clone(),
                    technique: self.technique,
                })
            }
        }
    }

    /// Target for supervised modes, group-by column for clustering.
    pub fn subject(&self) -> &str {
        self.target.as_deref().or(self.group_by.as_deref()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureOption {
    pub name: &'static str,
    pub label: String,
    pub checked: bool,
}

/// Live state of the run control.
#[derive(Debug, Clone, PartialEq)]
pub struct RunGate {
    pub enabled: bool,
    pub warning: Option<String>,
}

/// Keeps the feature checklist consistent with the chosen target and gates the run action.
#[derive(Debug, Clone)]
pub struct FeatureSelectionController {
    mode: AnalysisMode,
    target: Option<String>,
    candidates: Vec<&'static str>,
    checked: Vec<&'static str>,
    technique: Technique,
    n_clusters: u32,
}

impl FeatureSelectionController {
    pub fn new(mode: AnalysisMode, default_cluster_count: u32) -> Self {
        let candidates = match mode {
            AnalysisMode::Clustering => CLUSTERING_FEATURES.to_vec(),
            _ => Vec::new(),
        };
        Self {
            mode,
            target: None,
            candidates,
            checked: Vec::new(),
            technique: mode.default_technique(),
            n_clusters: default_cluster_count,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn n_clusters(&self) -> u32 {
        self.n_clusters
    }

    /// Re-derives the candidate features. Supervised checklists start empty again;
    /// the fixed clustering checklist keeps its state.
    pub fn set_target(&mut self, target: Option<&str>) -> Result<(), DashboardError> {
        let Some(target) = target.filter(|t| !t.is_empty()) else {
            self.target = None;
            if self.mode != AnalysisMode::Clustering {
                self.candidates.clear();
                self.checked.clear();
            }
            return Ok(());
        };

        let candidates = schema::features_for(self.mode, target)?;
        self.target = Some(target.to_string());
        if self.mode != AnalysisMode::Clustering {
            self.candidates = candidates;
            self.checked.clear();
        }
        Ok(())
    }

    pub fn set_checked(&mut self, feature: &str, checked: bool) {
        let Some(name) = self.candidates.iter().copied().find(|c| *c == feature) else {
            log::warn!("Ignoring toggle of unknown feature '{}'", feature);
            return;
        };

        if checked {
            if !self.checked.contains(&name) {
                self.checked.push(name);
            }
        } else {
            self.checked.retain(|c| *c != name);
        }
    }

    pub fn set_technique(&mut self, technique: Technique) -> Result<(), DashboardError> {
        if technique.mode() != self.mode {
            return Err(DashboardError::IncompleteSelection(format!(
                "{} is not a {} technique",
                technique.label(),
                self.mode
            )));
        }
        self.technique = technique;
        Ok(())
    }

    pub fn set_cluster_count(&mut self, n_clusters: u32) {
        self.n_clusters = n_clusters;
    }

    pub fn options(&self) -> Vec<FeatureOption> {
        self.candidates
            .iter()
            .map(|name| FeatureOption {
                name: *name,
                label: schema::humanize(name),
                checked: self.checked.contains(name),
            })
            .collect()
    }

    /// Checked features in checklist order.
    pub fn checked_features(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| self.checked.contains(*c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn gate(&self) -> RunGate {
        match self.mode {
            AnalysisMode::Clustering => match self.checked.len() {
                n if n < CLUSTERING_FEATURE_COUNT => RunGate {
                    enabled: false,
                    warning: Some("Please select at least 2 features for clustering.".to_string()),
                },
                n if n > CLUSTERING_FEATURE_COUNT => RunGate {
                    enabled: false,
                    warning: Some(DashboardError::TooManyFeatures.to_string()),
                },
                _ => RunGate { enabled: true, warning: None },
            },
            // Incomplete supervised selections are reported when the user tries to run.
            AnalysisMode::Regression | AnalysisMode::Classification => RunGate { enabled: true, warning: None },
        }
    }

    pub fn validate(&self) -> Result<Selection, DashboardError> {
        let features = self.checked_features();

        match self.mode {
            AnalysisMode::Clustering => {
                let group_by = self.target.clone().ok_or_else(|| {
                    DashboardError::IncompleteSelection("Please select a grouping variable".to_string())
                })?;
                if features.len() < CLUSTERING_FEATURE_COUNT {
                    return Err(DashboardError::IncompleteSelection(
                        "Please select exactly 2 features for clustering".to_string(),
                    ));
                }
                if features.len() > CLUSTERING_FEATURE_COUNT {
                    return Err(DashboardError::TooManyFeatures);
                }
                Ok(Selection {
                    mode: self.mode,
                    target: None,
                    group_by: Some(group_by),
                    features,
                    technique: self.technique,
                    n_clusters: self.n_clusters,
                })
            }
            AnalysisMode::Regression | AnalysisMode::Classification => {
                let target = match &self.target {
                    Some(target) if !features.is_empty() => target.clone(),
                    _ => {
                        return Err(DashboardError::IncompleteSelection(
                            "Please select both target and at least one feature".to_string(),
                        ));
                    }
                };
                Ok(Selection {
                    mode: self.mode,
                    target: Some(target),
                    group_by: None,
                    features,
                    technique: self.technique,
                    n_clusters: 0,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clustering_with(features: &[&str]) -> FeatureSelectionController {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Clustering, 0);
        controller.set_target(Some("brand")).unwrap();
        for f in features {
            controller.set_checked(f, true);
        }
        controller
    }

    #[test]
    fn clustering_gate_tracks_count() {
        for features in [&[][..], &["price"][..], &["price", "discount", "rating"][..]] {
            let controller = clustering_with(features);
            let gate = controller.gate();
            assert!(!gate.enabled, "{features:?} should disable run");
            assert!(gate.warning.is_some());
            assert!(controller.validate().is_err());
        }

        let controller = clustering_with(&["price", "rating"]);
        assert_eq!(controller.gate(), RunGate { enabled: true, warning: None });
        let selection = controller.validate().unwrap();
        assert_eq!(selection.features, vec!["price", "rating"]);
        assert_eq!(selection.group_by.as_deref(), Some("brand"));
    }

    #[test]
    fn clustering_errors_distinguish_too_few_and_too_many() {
        assert!(matches!(
            clustering_with(&["price"]).validate(),
            Err(DashboardError::IncompleteSelection(_))
        ));
        assert_eq!(
            clustering_with(&["price", "discount", "rating"]).validate(),
            Err(DashboardError::TooManyFeatures)
        );
    }

    #[test]
    fn unchecking_reenables_run() {
        let mut controller = clustering_with(&["price", "discount", "rating"]);
        assert!(!controller.gate().enabled);
        controller.set_checked("rating", false);
        assert!(controller.gate().enabled);
    }

    #[test]
    fn clustering_requires_group_by() {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Clustering, 0);
        controller.set_checked("price", true);
        controller.set_checked("discount", true);
        assert!(controller.gate().enabled);
        assert!(matches!(controller.validate(), Err(DashboardError::IncompleteSelection(_))));
    }

    #[test]
    fn supervised_requires_target_and_feature() {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Regression, 0);
        assert!(matches!(controller.validate(), Err(DashboardError::IncompleteSelection(_))));

        controller.set_target(Some("price")).unwrap();
        assert!(matches!(controller.validate(), Err(DashboardError::IncompleteSelection(_))));

        controller.set_checked("rating", true);
        controller.set_checked("discount", true);
        let selection = controller.validate().unwrap();
        assert_eq!(selection.target.as_deref(), Some("price"));
        assert_eq!(selection.features, vec!["discount", "rating"]);
        assert_eq!(selection.technique, Technique::Linear);
    }

    #[test]
    fn target_change_rebuilds_checklist() {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Regression, 0);
        controller.set_target(Some("price")).unwrap();
        controller.set_checked("discount", true);

        controller.set_target(Some("discount")).unwrap();
        let options = controller.options();
        assert_eq!(
            options.iter().map(|o| o.name).collect::<Vec<_>>(),
            vec!["price", "original_price", "rating"]
        );
        assert!(options.iter().all(|o| !o.checked));
        assert_eq!(options[1].label, "Original Price");
    }

    #[test]
    fn unknown_target_keeps_previous_state() {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Classification, 0);
        controller.set_target(Some("price_category")).unwrap();
        assert!(controller.set_target(Some("colour")).is_err());
        assert_eq!(controller.target(), Some("price_category"));
        assert_eq!(controller.options().len(), 4);
    }

    #[test]
    fn technique_must_match_mode() {
        let mut controller = FeatureSelectionController::new(AnalysisMode::Classification, 0);
        assert!(controller.set_technique(Technique::Kmeans).is_err());
        controller.set_technique(Technique::Svm).unwrap();
        assert_eq!(controller.technique(), Technique::Svm);
    }

    #[test]
    fn clustering_request_carries_cluster_count() {
        let mut controller = clustering_with(&["discount", "price"]);
        controller.set_cluster_count(4);
        let request = controller.validate().unwrap().to_request();
        match request {
            AnalysisRequest::Clustering(body) => {
                assert_eq!(body.n_clusters, 4);
                assert_eq!(body.features, vec!["price", "discount"]);
                assert_eq!(body.technique, Technique::Kmeans);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }
}
