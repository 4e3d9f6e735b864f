use shared::{ClassificationResult, ClusteringResult, RegressionResult, Technique};

use crate::schema::capitalize;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub note: Option<String>,
}

impl MetricCard {
    fn new(label: &str, value: String, note: Option<&str>) -> Self {
        Self { label: label.to_string(), value, note: note.map(str::to_string) }
    }
}

pub fn r2_tier(r2: f64) -> &'static str {
    match r2 {
        r if r >= 0.8 => "Excellent fit",
        r if r >= 0.6 => "Good fit",
        r if r >= 0.4 => "Moderate fit",
        r if r >= 0.2 => "Weak fit",
        _ => "Poor fit",
    }
}

pub fn accuracy_tier(accuracy: f64) -> &'static str {
    match accuracy {
        a if a >= 0.9 => "Excellent",
        a if a >= 0.8 => "Very good",
        a if a >= 0.7 => "Good",
        a if a >= 0.6 => "Fair",
        _ => "Needs improvement",
    }
}

pub fn silhouette_tier(score: f64) -> &'static str {
    match score {
        s if s >= 0.7 => "Excellent separation",
        s if s >= 0.5 => "Good separation",
        s if s >= 0.3 => "Reasonable separation",
        s if s >= 0.0 => "Weak separation",
        _ => "Poor clustering",
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn regression_cards(result: &RegressionResult) -> Vec<MetricCard> {
    vec![MetricCard::new("R² Score", format!("{:.3}", result.r2), Some(r2_tier(result.r2)))]
}

pub fn classification_cards(result: &ClassificationResult) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Accuracy", percent(result.accuracy), Some(accuracy_tier(result.accuracy))),
        MetricCard::new("Precision", percent(result.precision), None),
        MetricCard::new("Recall", percent(result.recall), None),
    ]
}

pub fn clustering_cards(result: &ClusteringResult) -> Vec<MetricCard> {
    let method = match result.technique {
        Technique::Kmeans => "K-Means optimal",
        _ => "Hierarchical (Ward)",
    };
    vec![
        MetricCard::new(
            "Silhouette Score",
            format!("{:.3}", result.silhouette_score),
            Some(silhouette_tier(result.silhouette_score)),
        ),
        MetricCard::new("Number of Clusters", result.n_clusters.to_string(), Some(method)),
        MetricCard::new("Grouping", capitalize(&result.group_by), None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r2_tiers() {
        assert_eq!(r2_tier(0.85), "Excellent fit");
        assert_eq!(r2_tier(0.72), "Good fit");
        assert_eq!(r2_tier(0.5), "Moderate fit");
        assert_eq!(r2_tier(0.2), "Weak fit");
        assert_eq!(r2_tier(0.1), "Poor fit");
        assert_eq!(r2_tier(-3.0), "Poor fit");
    }

    #[test]
    fn accuracy_tiers() {
        assert_eq!(accuracy_tier(0.95), "Excellent");
        assert_eq!(accuracy_tier(0.8), "Very good");
        assert_eq!(accuracy_tier(0.75), "Good");
        assert_eq!(accuracy_tier(0.65), "Fair");
        assert_eq!(accuracy_tier(0.3), "Needs improvement");
    }

    #[test]
    fn silhouette_tiers() {
        assert_eq!(silhouette_tier(0.71), "Excellent separation");
        assert_eq!(silhouette_tier(0.5), "Good separation");
        assert_eq!(silhouette_tier(0.35), "Reasonable separation");
        assert_eq!(silhouette_tier(0.0), "Weak separation");
        assert_eq!(silhouette_tier(-0.2), "Poor clustering");
    }

    #[test]
    fn classification_cards_tier_accuracy_only() {
        let cards = classification_cards(&ClassificationResult {
            accuracy: 0.912,
            precision: 0.8,
            recall: 0.75,
            confusion_matrix_data: vec![],
            class_labels: vec![],
            model_id: None,
        });
        assert_eq!(cards[0].value, "91.2%");
        assert_eq!(cards[0].note.as_deref(), Some("Excellent"));
        assert_eq!(cards[1].note, None);
        assert_eq!(cards[2].value, "75.0%");
    }
}
