use shared::AnalysisMode;

use crate::error::DashboardError;

/// Product attributes usable as regression targets and features.
pub const REGRESSION_ATTRIBUTES: [&str; 4] = ["price", "original_price", "discount", "rating"];

/// Classification target → candidate features.
pub const CLASSIFICATION_SCHEMA: [(&str, &[&str]); 2] = [
    ("brand_popularity", &["rating", "discount", "price", "id"]),
    ("price_category", &["original_price", "discount", "rating", "brand"]),
];

pub const CLUSTERING_FEATURES: [&str; 3] = ["price", "discount", "rating"];

pub const CLUSTERING_GROUPS: [&str; 3] = ["brand", "category", "subcategory"];

/// The one categorical prediction input: `brand` when classifying `price_category`.
pub const CATEGORICAL_FEATURE: &str = "brand";
pub const CATEGORICAL_TARGET: &str = "price_category";

/// Targets (or clustering group-by columns) offered for a mode.
pub fn targets_for(mode: AnalysisMode) -> Vec<&'static str> {
    match mode {
        AnalysisMode::Regression => REGRESSION_ATTRIBUTES.to_vec(),
        AnalysisMode::Classification => CLASSIFICATION_SCHEMA.iter().map(|(target, _)| *target).collect(),
        AnalysisMode::Clustering => CLUSTERING_GROUPS.to_vec(),
    }
}

/// Candidate features for `target`, in display order. Never contains the target.
pub fn features_for(mode: AnalysisMode, target: &str) -> Result<Vec<&'static str>, DashboardError> {
    let unknown = || DashboardError::UnknownTarget { mode, target: target.to_string() };

    match mode {
        AnalysisMode::Regression => {
            if !REGRESSION_ATTRIBUTES.contains(&target) {
                return Err(unknown());
            }
            Ok(REGRESSION_ATTRIBUTES.iter().copied().filter(|f| *f != target).collect())
        }
        AnalysisMode::Classification => CLASSIFICATION_SCHEMA
            .iter()
            .find(|(name, _)| *name == target)
            .map(|(_, features)| features.to_vec())
            .ok_or_else(unknown),
        AnalysisMode::Clustering => {
            if !CLUSTERING_GROUPS.contains(&target) {
                return Err(unknown());
            }
            Ok(CLUSTERING_FEATURES.to_vec())
        }
    }
}

pub fn is_categorical(mode: AnalysisMode, target: &str, feature: &str) -> bool {
    mode == AnalysisMode::Classification && target == CATEGORICAL_TARGET && feature == CATEGORICAL_FEATURE
}

/// `original_price` → `Original Price`.
pub fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

/// Capitalizes the first letter only: `discount` → `Discount`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_features_exclude_target() {
        for (target, _) in CLASSIFICATION_SCHEMA {
            let features = features_for(AnalysisMode::Classification, target).unwrap();
            assert!(!features.is_empty());
            assert!(!features.contains(&target));
        }
    }

    #[test]
    fn regression_removes_target_in_order() {
        let features = features_for(AnalysisMode::Regression, "discount").unwrap();
        assert_eq!(features, vec!["price", "original_price", "rating"]);
        for target in REGRESSION_ATTRIBUTES {
            let features = features_for(AnalysisMode::Regression, target).unwrap();
            assert_eq!(features.len(), REGRESSION_ATTRIBUTES.len() - 1);
            assert!(!features.contains(&target));
        }
    }

    #[test]
    fn unknown_target_fails_fast() {
        let err = features_for(AnalysisMode::Classification, "colour").unwrap_err();
        assert_eq!(
            err,
            DashboardError::UnknownTarget { mode: AnalysisMode::Classification, target: "colour".into() }
        );
        assert!(features_for(AnalysisMode::Regression, "brand").is_err());
        assert!(features_for(AnalysisMode::Clustering, "price").is_err());
    }

    #[test]
    fn clustering_uses_fixed_features() {
        assert_eq!(features_for(AnalysisMode::Clustering, "brand").unwrap(), CLUSTERING_FEATURES.to_vec());
    }

    #[test]
    fn humanize_capitalizes_each_word() {
        assert_eq!(humanize("original_price"), "Original Price");
        assert_eq!(humanize("price_category"), "Price Category");
        assert_eq!(humanize("id"), "Id");
        assert_eq!(capitalize("discount"), "Discount");
    }

    #[test]
    fn brand_is_categorical_only_for_price_category() {
        assert!(is_categorical(AnalysisMode::Classification, "price_category", "brand"));
        assert!(!is_categorical(AnalysisMode::Classification, "brand_popularity", "brand"));
        assert!(!is_categorical(AnalysisMode::Regression, "price_category", "brand"));
    }
}
