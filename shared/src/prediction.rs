use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Technique;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Category(String),
}

/// Body of `/predict` and `/predict_class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub inputs: BTreeMap<String, InputValue>,
    pub target: String,
    pub technique: Technique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionPrediction {
    pub predicted: f64,
}

/// Class labels come back as whatever the model was trained on, usually strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    pub predicted_class: serde_json::Value,
}

impl ClassPrediction {
    pub fn label(&self) -> String {
        match &self.predicted_class {
            serde_json::Value::String(label) => label.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandList {
    pub brands: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_inputs_serialize_untagged() {
        let mut inputs = BTreeMap::new();
        inputs.insert("brand".to_string(), InputValue::Category("Puma".into()));
        inputs.insert("rating".to_string(), InputValue::Number(4.2));
        let request = PredictionRequest {
            inputs,
            target: "price_category".into(),
            technique: Technique::DecisionTree,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "inputs": {"brand": "Puma", "rating": 4.2},
                "target": "price_category",
                "technique": "decision_tree"
            })
        );
    }

    #[test]
    fn class_label_is_shown_as_is() {
        let text: ClassPrediction = serde_json::from_value(json!({"predicted_class": "High"})).unwrap();
        assert_eq!(text.label(), "High");
        let numeric: ClassPrediction = serde_json::from_value(json!({"predicted_class": 2})).unwrap();
        assert_eq!(numeric.label(), "2");
    }
}
