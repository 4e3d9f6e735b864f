use std::collections::BTreeMap;

use shared::{AnalysisMode, InputValue, PredictionRequest};

use crate::error::DashboardError;
use crate::schema::{self, humanize};
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureInputKind {
    Numeric,
    /// Options stay empty (placeholder only) until the lookup resolves.
    Categorical { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub feature: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FeatureInputKind,
    pub value: String,
}

impl FormField {
    fn new(mode: AnalysisMode, target: &str, feature: &str) -> Self {
        let kind = if schema::is_categorical(mode, target, feature) {
            FeatureInputKind::Categorical { options: Vec::new() }
        } else {
            FeatureInputKind::Numeric
        };
        let spaced = feature.replace('_', " ");
        let placeholder = match kind {
            FeatureInputKind::Numeric => format!("Enter {}", spaced),
            FeatureInputKind::Categorical { .. } => format!("Select {}", spaced),
        };
        Self { feature: feature.to_string(), label: humanize(feature), placeholder, kind, value: String::new() }
    }

    fn parse(&self) -> Result<InputValue, DashboardError> {
        match &self.kind {
            FeatureInputKind::Numeric => self
                .value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(InputValue::Number)
                .ok_or_else(|| DashboardError::InvalidNumber(self.feature.clone())),
            FeatureInputKind::Categorical { options } => {
                if self.value.is_empty() || !options.contains(&self.value) {
                    return Err(DashboardError::MissingChoice(self.feature.clone()));
                }
                Ok(InputValue::Category(self.value.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionState {
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

/// Identifies one prediction request: the form it was sent from and its attempt on that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionTag {
    pub form_id: u64,
    pub generation: u64,
}

/// Input form for predicting with the model of the last successful run.
#[derive(Debug, Clone)]
pub struct PredictionFormManager {
    run: Selection,
    form_id: u64,
    fields: Vec<FormField>,
    generation: u64,
    state: PredictionState,
}

impl PredictionFormManager {
    /// `form_id` identifies this form so late option lookups for an older form are ignored.
    pub fn build(run: Selection, form_id: u64) -> Result<Self, DashboardError> {
        if run.mode.predict_endpoint().is_none() {
            return Err(DashboardError::PredictionUnsupported(run.mode));
        }
        let target = run.target.clone().ok_or(DashboardError::NoSuccessfulRun(run.mode))?;
        let fields = run.features.iter().map(|f| FormField::new(run.mode, &target, f)).collect();
        Ok(Self { run, form_id, fields, generation: 0, state: PredictionState::Idle })
    }

    pub fn mode(&self) -> AnalysisMode {
        self.run.mode
    }

    pub fn form_id(&self) -> u64 {
        self.form_id
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    pub fn target_label(&self) -> String {
        humanize(self.run.subject())
    }

    /// True while a categorical field still shows only its placeholder.
    pub fn needs_options(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(&f.kind, FeatureInputKind::Categorical { options } if options.is_empty()))
    }

    pub fn apply_options(&mut self, form_id: u64, choices: Vec<String>) -> bool {
        if form_id != self.form_id {
            log::debug!("Ignoring options for replaced form #{}", form_id);
            return false;
        }
        let mut applied = false;
        for field in &mut self.fields {
            if let FeatureInputKind::Categorical { options } = &mut field.kind {
                *options = choices.clone();
                applied = true;
            }
        }
        applied
    }

    pub fn set_value(&mut self, feature: &str, value: String) {
        match self.fields.iter_mut().find(|f| f.feature == feature) {
            Some(field) => field.value = value,
            None => log::warn!("No prediction input named '{}'", feature),
        }
    }

    /// One value per feature of the run, or the first field that fails validation.
    pub fn collect(&self) -> Result<PredictionRequest, DashboardError> {
        let inputs = self
            .fields
            .iter()
            .map(|field| field.parse().map(|value| (field.feature.clone(), value)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(PredictionRequest {
            inputs,
            target: self.run.subject().to_string(),
            technique: self.run.technique,
        })
    }

    /// Validates and moves to `Pending`. Nothing changes when validation fails.
    pub fn begin(&mut self) -> Result<(PredictionTag, PredictionRequest), DashboardError> {
        let request = self.collect()?;
        self.generation += 1;
        self.state = PredictionState::Pending;
        Ok((PredictionTag { form_id: self.form_id, generation: self.generation }, request))
    }

    /// Applies a reply only if it answers this form's latest request.
    pub fn complete(&mut self, tag: PredictionTag, outcome: Result<String, DashboardError>) -> bool {
        if tag.form_id != self.form_id || tag.generation != self.generation {
            log::debug!("Discarding stale prediction #{} of form #{}", tag.generation, tag.form_id);
            return false;
        }
        self.state = match outcome {
            Ok(value) => PredictionState::Ready(format!("Predicted {}: {}", self.target_label(), value)),
            Err(DashboardError::Backend(message)) => PredictionState::Failed(message),
            Err(err) => {
                log::error!("Prediction failed: {}", err);
                PredictionState::Failed("An error occurred during prediction".to_string())
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Technique;

    fn run(mode: AnalysisMode, target: &str, features: &[&str], technique: Technique) -> Selection {
        Selection {
            mode,
            target: Some(target.to_string()),
            group_by: None,
            features: features.iter().map(|f| f.to_string()).collect(),
            technique,
            n_clusters: 0,
        }
    }

    #[test]
    fn numeric_fields_for_regression() {
        let form = PredictionFormManager::build(
            run(AnalysisMode::Regression, "price", &["discount", "original_price"], Technique::Linear),
            1,
        )
        .unwrap();
        assert_eq!(form.fields().len(), 2);
        assert_eq!(form.fields()[1].label, "Original Price");
        assert_eq!(form.fields()[1].placeholder, "Enter original price");
        assert!(form.fields().iter().all(|f| f.kind == FeatureInputKind::Numeric));
        assert!(!form.needs_options());
    }

    #[test]
    fn invalid_number_blocks_request() {
        let mut form =
            PredictionFormManager::build(run(AnalysisMode::Regression, "price", &["discount", "rating"], Technique::Svr), 1)
                .unwrap();
        form.set_value("discount", "40".into());
        form.set_value("rating", "great".into());
        assert_eq!(form.begin().unwrap_err(), DashboardError::InvalidNumber("rating".into()));
        assert_eq!(form.state(), &PredictionState::Idle);

        form.set_value("rating", "inf".into());
        assert!(form.begin().is_err());

        form.set_value("rating", " 4.5 ".into());
        let (tag, request) = form.begin().unwrap();
        assert_eq!(tag, PredictionTag { form_id: 1, generation: 1 });
        assert_eq!(request.inputs["rating"], InputValue::Number(4.5));
        assert_eq!(request.target, "price");
        assert_eq!(request.technique, Technique::Svr);
        assert_eq!(form.state(), &PredictionState::Pending);
    }

    #[test]
    fn brand_selector_waits_for_options() {
        let mut form = PredictionFormManager::build(
            run(AnalysisMode::Classification, "price_category", &["brand", "rating"], Technique::DecisionTree),
            7,
        )
        .unwrap();
        assert!(form.needs_options());
        assert_eq!(form.fields()[0].kind, FeatureInputKind::Categorical { options: vec![] });
        assert_eq!(form.fields()[0].placeholder, "Select brand");

        form.set_value("rating", "4".into());
        assert_eq!(form.collect().unwrap_err(), DashboardError::MissingChoice("brand".into()));

        assert!(!form.apply_options(6, vec!["Stale".into()]));
        assert!(form.apply_options(7, vec!["Puma".into(), "Adidas".into()]));
        assert!(!form.needs_options());

        form.set_value("brand", "Reebok".into());
        assert!(form.collect().is_err(), "value must come from the fetched list");

        form.set_value("brand", "Adidas".into());
        let request = form.collect().unwrap();
        assert_eq!(request.inputs["brand"], InputValue::Category("Adidas".into()));
    }

    #[test]
    fn brand_is_numeric_for_other_targets() {
        let form = PredictionFormManager::build(
            run(AnalysisMode::Classification, "brand_popularity", &["id", "price"], Technique::Svm),
            1,
        )
        .unwrap();
        assert!(!form.needs_options());
    }

    #[test]
    fn completion_formats_caption() {
        let mut form = PredictionFormManager::build(
            run(AnalysisMode::Classification, "price_category", &["rating"], Technique::Svm),
            1,
        )
        .unwrap();
        form.set_value("rating", "3.9".into());
        let (first, _) = form.begin().unwrap();
        let (second, _) = form.begin().unwrap();

        assert!(!form.complete(first, Ok("Low".into())));
        assert!(form.complete(second, Ok("High".into())));
        assert_eq!(form.state(), &PredictionState::Ready("Predicted Price Category: High".into()));

        let (third, _) = form.begin().unwrap();
        form.complete(third, Err(DashboardError::Backend("No trained model available".into())));
        assert_eq!(form.state(), &PredictionState::Failed("No trained model available".into()));

        let (fourth, _) = form.begin().unwrap();
        form.complete(fourth, Err(DashboardError::Network("offline".into())));
        assert_eq!(form.state(), &PredictionState::Failed("An error occurred during prediction".into()));
    }

    #[test]
    fn reply_for_replaced_form_is_ignored() {
        let mut old_form =
            PredictionFormManager::build(run(AnalysisMode::Regression, "price", &["rating"], Technique::Linear), 3)
                .unwrap();
        old_form.set_value("rating", "4".into());
        let (old_tag, _) = old_form.begin().unwrap();

        let mut form =
            PredictionFormManager::build(run(AnalysisMode::Regression, "price", &["discount"], Technique::Svr), 5)
                .unwrap();
        form.set_value("discount", "20".into());
        let (tag, _) = form.begin().unwrap();
        assert_eq!(old_tag.generation, tag.generation);

        assert!(!form.complete(old_tag, Ok("999.00".into())));
        assert_eq!(form.state(), &PredictionState::Pending);
        assert!(form.complete(tag, Ok("120.50".into())));
        assert_eq!(form.state(), &PredictionState::Ready("Predicted Price: 120.50".into()));
    }

    #[test]
    fn clustering_offers_no_form() {
        let mut selection = run(AnalysisMode::Clustering, "brand", &["price", "rating"], Technique::Kmeans);
        selection.target = None;
        selection.group_by = Some("brand".into());
        assert_eq!(
            PredictionFormManager::build(selection, 1).unwrap_err(),
            DashboardError::PredictionUnsupported(AnalysisMode::Clustering)
        );
    }
}
