use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Chart catalogue served by `/get_data?type=<option>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChartOption {
    PriceDiffCategory,
    PriceDiffSubcategory,
    ProductDistribution,
    CorrelationFeatures,
    TopSellingBrands,
    RatingDistribution,
    DiscountVsRating,
    BestDiscountedHighRated,
}

impl ChartOption {
    pub fn data_path(self) -> String {
        format!("/get_data?type={}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyValue {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Average original vs discounted price per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub original: Vec<LabeledValue>,
    pub discounted: Vec<LabeledValue>,
}
