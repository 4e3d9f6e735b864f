use serde_json::Value;
use shared::{ChartOption, LabeledValue, PriceComparison, XyValue};

use crate::error::DashboardError;
use crate::render::chart::{Axis, DataPoint, MarkerType, PRIMARY_COLOR, SECONDARY_COLOR, Series, SeriesKind};
use crate::render::ChartSpec;
use crate::schema::humanize;

pub const CHART_CONTAINER: &str = "visualization-chart";

pub fn chart_title(option: ChartOption) -> String {
    humanize(option.as_ref())
}

fn labeled_points(values: Vec<LabeledValue>) -> Vec<DataPoint> {
    values.into_iter().map(|v| DataPoint::labeled(v.label, v.y)).collect()
}

/// Builds the chart for one catalogue entry from its `/get_data` payload.
pub fn build_visualization(option: ChartOption, data: Value) -> Result<ChartSpec, DashboardError> {
    let mut spec = ChartSpec::new(chart_title(option));
    spec.axis_y = Some(Axis::titled("Value"));

    match option {
        ChartOption::PriceDiffCategory | ChartOption::PriceDiffSubcategory => {
            let prices: PriceComparison = serde_json::from_value(data)?;
            if prices.original.len() != prices.discounted.len() {
                log::warn!(
                    "{}: {} original vs {} discounted prices",
                    option,
                    prices.original.len(),
                    prices.discounted.len()
                );
            }
            spec.series = vec![
                Series::new(SeriesKind::Column, labeled_points(prices.original))
                    .named("Original Price")
                    .color(PRIMARY_COLOR),
                Series::new(SeriesKind::Column, labeled_points(prices.discounted))
                    .named("Discounted Price")
                    .color(SECONDARY_COLOR),
            ];
        }
        ChartOption::ProductDistribution => {
            let slices: Vec<LabeledValue> = serde_json::from_value(data)?;
            spec.axis_y = None;
            spec.series = vec![
                Series::new(SeriesKind::Pie, labeled_points(slices))
                    .index_label("{label} - {y}")
                    .tooltip("<b>{label}:</b> {y} ({percentText})"),
            ];
        }
        ChartOption::CorrelationFeatures | ChartOption::DiscountVsRating => {
            let points: Vec<XyValue> = serde_json::from_value(data)?;
            let x_title = if option == ChartOption::CorrelationFeatures { "Price" } else { "Average Discount" };
            spec.axis_x = Some(Axis::titled(x_title));
            spec.axis_y = Some(Axis::titled("Rating"));
            let points = points
                .into_iter()
                .map(|p| DataPoint { label: p.label, ..DataPoint::xy(p.x, p.y) })
                .collect();
            spec.series = vec![
                Series::new(SeriesKind::Scatter, points)
                    .color(PRIMARY_COLOR)
                    .marker(MarkerType::Circle, 8)
                    .tooltip("X: {x}, Y: {y}"),
            ];
        }
        ChartOption::RatingDistribution => {
            let values: Vec<LabeledValue> = serde_json::from_value(data)?;
            spec.series = vec![
                Series::new(SeriesKind::Line, labeled_points(values))
                    .color(PRIMARY_COLOR)
                    .marker(MarkerType::Circle, 8),
            ];
        }
        ChartOption::TopSellingBrands | ChartOption::BestDiscountedHighRated => {
            let values: Vec<LabeledValue> = serde_json::from_value(data)?;
            spec.series = vec![Series::new(SeriesKind::Column, labeled_points(values)).color(PRIMARY_COLOR)];
        }
    }
    Ok(spec)
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationState {
    Idle,
    Pending,
    Ready(ChartSpec),
    Failed(String),
}

/// The catalogue page: one selected chart option and its latest chart.
#[derive(Debug)]
pub struct VisualizationPage {
    option: ChartOption,
    generation: u64,
    state: VisualizationState,
}

impl Default for VisualizationPage {
    fn default() -> Self {
        Self { option: ChartOption::PriceDiffCategory, generation: 0, state: VisualizationState::Idle }
    }
}

impl VisualizationPage {
    pub fn option(&self) -> ChartOption {
        self.option
    }

    pub fn state(&self) -> &VisualizationState {
        &self.state
    }

    pub fn select(&mut self, option: ChartOption) {
        self.option = option;
    }

    pub fn begin(&mut self) -> (u64, ChartOption) {
        self.generation += 1;
        self.state = VisualizationState::Pending;
        (self.generation, self.option)
    }

    pub fn complete(&mut self, generation: u64, option: ChartOption, outcome: Result<Value, DashboardError>) -> bool {
        if generation != self.generation {
            log::debug!("Discarding stale {} chart data #{}", option, generation);
            return false;
        }
        self.state = match outcome.and_then(|data| build_visualization(option, data)) {
            Ok(spec) => VisualizationState::Ready(spec),
            Err(err) => {
                log::error!("Loading {} failed: {}", option, err);
                VisualizationState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn toggle_series(&mut self, index: usize) -> bool {
        match &mut self.state {
            VisualizationState::Ready(spec) => spec.toggle_series(index),
            _ => false,
        }
    }

    pub fn fail_chart(&mut self, notice: String) {
        if matches!(self.state, VisualizationState::Ready(_)) {
            self.state = VisualizationState::Failed(notice);
        }
    }
}
