use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnalysisMode, Technique};

/// Body of `/run_regression` and `/run_classification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisedRequest {
    pub target: String,
    pub features: Vec<String>,
    pub technique: Technique,
}

/// Body of `/run_clustering`. `n_clusters == 0` asks the service to pick the optimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringRequest {
    pub group_by: String,
    pub technique: Technique,
    pub n_clusters: u32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisRequest {
    Supervised(SupervisedRequest),
    Clustering(ClusteringRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub r2: f64,
    pub train_actual: Vec<f64>,
    pub train_pred: Vec<f64>,
    pub test_actual: Vec<f64>,
    pub test_pred: Vec<f64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

/// One pre-aggregated bar of the confusion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionBar {
    pub label: String,
    pub y: f64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub confusion_matrix_data: Vec<ConfusionBar>,
    pub class_labels: Vec<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

/// A grouped data point or a centroid. Feature values are keyed by feature name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    #[serde(default)]
    pub name: Option<String>,
    pub cluster: u32,
    #[serde(default, rename = "isCentroid")]
    pub is_centroid: bool,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl ClusterPoint {
    pub fn value(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    pub technique: Technique,
    pub group_by: String,
    pub features: Vec<String>,
    pub silhouette_score: f64,
    pub n_clusters: u32,
    pub scatter_data: Vec<ClusterPoint>,
    #[serde(default)]
    pub centroids: Vec<ClusterPoint>,
    #[serde(default)]
    pub elbow_data: Option<Vec<CurvePoint>>,
    #[serde(default)]
    pub silhouette_data: Option<Vec<CurvePoint>>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl ClusteringResult {
    pub fn elbow(&self) -> &[CurvePoint] {
        self.elbow_data.as_deref().unwrap_or_default()
    }

    pub fn silhouette_curve(&self) -> &[CurvePoint] {
        self.silhouette_data.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Regression(RegressionResult),
    Classification(ClassificationResult),
    Clustering(ClusteringResult),
}

impl AnalysisResult {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisResult::Regression(_) => AnalysisMode::Regression,
            AnalysisResult::Classification(_) => AnalysisMode::Classification,
            AnalysisResult::Clustering(_) => AnalysisMode::Clustering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clustering_request_serializes_flat() {
        let request = AnalysisRequest::Clustering(ClusteringRequest {
            group_by: "brand".into(),
            technique: Technique::Kmeans,
            n_clusters: 0,
            features: vec!["price".into(), "rating".into()],
        });
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "group_by": "brand",
                "technique": "kmeans",
                "n_clusters": 0,
                "features": ["price", "rating"]
            })
        );
    }

    #[test]
    fn cluster_points_keep_feature_values() {
        let centroid: ClusterPoint = serde_json::from_value(json!({
            "cluster": 2,
            "isCentroid": true,
            "price": 799.5,
            "discount": 40
        }))
        .unwrap();
        assert!(centroid.is_centroid);
        assert_eq!(centroid.name, None);
        assert_eq!(centroid.value("price"), Some(799.5));
        assert_eq!(centroid.value("discount"), Some(40.0));
        assert_eq!(centroid.value("rating"), None);
    }

    #[test]
    fn hierarchical_result_without_curves() {
        let result: ClusteringResult = serde_json::from_value(json!({
            "technique": "hierarchical",
            "group_by": "category",
            "features": ["price", "discount"],
            "silhouette_score": 0.41,
            "n_clusters": 3,
            "scatter_data": [{"name": "Shirts", "cluster": 0, "price": 900.0, "discount": 20.0}]
        }))
        .unwrap();
        assert!(result.elbow().is_empty());
        assert!(result.silhouette_curve().is_empty());
        assert_eq!(result.scatter_data[0].name.as_deref(), Some("Shirts"));
    }
}
