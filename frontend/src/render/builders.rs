use std::collections::BTreeMap;

use shared::{ClassificationResult, ClusterPoint, ClusteringResult, CurvePoint, RegressionResult, Technique};

use super::chart::{
    Axis, ChartSpec, DataPoint, MarkerType, PRIMARY_COLOR, RenderError, Series, SeriesKind, cluster_color,
};
use crate::schema::capitalize;

const TRAINING_COLOR: &str = "#4CAF50";
const TEST_COLOR: &str = "#0077b6";

pub fn technique_title(technique: Technique) -> &'static str {
    match technique {
        Technique::Kmeans => "K-Means",
        _ => "Hierarchical",
    }
}

/// Endpoints of the y = x line spanning every actual and predicted value.
pub fn identity_line(result: &RegressionResult) -> Option<(f64, f64)> {
    result
        .train_actual
        .iter()
        .chain(&result.train_pred)
        .chain(&result.test_actual)
        .chain(&result.test_pred)
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })
}

fn actual_vs_predicted(actual: &[f64], predicted: &[f64]) -> Vec<DataPoint> {
    if actual.len() != predicted.len() {
        log::warn!(
            "Actual/predicted length mismatch ({} vs {}), plotting the common prefix",
            actual.len(),
            predicted.len()
        );
    }
    actual.iter().zip(predicted).map(|(y, x)| DataPoint::xy(*x, *y)).collect()
}

pub fn regression_chart(result: &RegressionResult) -> ChartSpec {
    let mut spec = ChartSpec::new("Regression Analysis: Actual vs Predicted Values");
    spec.axis_x = Some(Axis::titled("Predicted Values"));
    spec.axis_y = Some(Axis::titled("Actual Values"));

    spec.series.push(
        Series::new(SeriesKind::Scatter, actual_vs_predicted(&result.train_actual, &result.train_pred))
            .named("Training Data")
            .color(TRAINING_COLOR)
            .marker(MarkerType::Circle, 8)
            .tooltip("Actual: {y}, Predicted: {x}"),
    );
    spec.series.push(
        Series::new(SeriesKind::Scatter, actual_vs_predicted(&result.test_actual, &result.test_pred))
            .named("Test Data")
            .color(TEST_COLOR)
            .marker(MarkerType::Triangle, 10)
            .tooltip("Actual: {y}, Predicted: {x}"),
    );

    let line = identity_line(result)
        .map(|(min, max)| vec![DataPoint::xy(min, min), DataPoint::xy(max, max)])
        .unwrap_or_default();
    spec.series.push(
        Series::new(SeriesKind::Line, line)
            .named("Perfect Prediction Line")
            .color(PRIMARY_COLOR)
            .marker(MarkerType::None, 0)
            .dashed(),
    );
    spec
}

/// Bars come pre-aggregated from the service, one per actual/predicted class pair.
pub fn classification_chart(result: &ClassificationResult) -> ChartSpec {
    let points = result
        .confusion_matrix_data
        .iter()
        .map(|bar| DataPoint { color: bar.color.clone(), ..DataPoint::labeled(bar.label.clone(), bar.y) })
        .collect();

    let mut spec = ChartSpec::new("Classification Results: Correct vs Incorrect Predictions");
    spec.series.push(
        Series::new(SeriesKind::Column, points)
            .named("Actual vs Predicted Classes")
            .tooltip("{label}: {y}")
            .index_label("{y}"),
    );
    spec
}

fn cluster_point(point: &ClusterPoint, x_feature: &str, y_feature: &str) -> Option<(f64, f64)> {
    match (point.value(x_feature), point.value(y_feature)) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => {
            log::warn!(
                "Cluster point {:?} lacks '{}' or '{}', skipping",
                point.name,
                x_feature,
                y_feature
            );
            None
        }
    }
}

/// 2-D scatter, one series per cluster plus one cross marker per centroid.
pub fn cluster_scatter(result: &ClusteringResult) -> Result<ChartSpec, RenderError> {
    let [x_feature, y_feature] = match result.features.as_slice() {
        [x, y, ..] => [x.as_str(), y.as_str()],
        _ => {
            return Err(RenderError::Data(format!(
                "clustering needs two features, got {}",
                result.features.len()
            )));
        }
    };

    let mut groups: BTreeMap<u32, Vec<DataPoint>> = BTreeMap::new();
    for point in &result.scatter_data {
        let Some((x, y)) = cluster_point(point, x_feature, y_feature) else {
            continue;
        };
        let name = point.name.clone().unwrap_or_default();
        groups.entry(point.cluster).or_default().push(DataPoint {
            color: Some(cluster_color(point.cluster).to_string()),
            tooltip: Some(format!("{}<br/>{}: {:.2}<br/>{}: {:.2}", name, x_feature, x, y_feature, y)),
            label: Some(name),
            ..DataPoint::xy(x, y)
        });
    }

    let mut spec = ChartSpec::new(format!(
        "{} Clustering by {}",
        technique_title(result.technique),
        result.group_by
    ));
    spec.axis_x = Some(Axis::titled(capitalize(x_feature)));
    spec.axis_y = Some(Axis::titled(capitalize(y_feature)));

    for centroid in &result.centroids {
        let Some((x, y)) = cluster_point(centroid, x_feature, y_feature) else {
            continue;
        };
        let number = centroid.cluster + 1;
        let point = DataPoint {
            tooltip: Some(format!("Centroid {}<br/>{}: {:.2}<br/>{}: {:.2}", number, x_feature, x, y_feature, y)),
            ..DataPoint::xy(x, y)
        };
        spec.series.push(
            Series::new(SeriesKind::Scatter, vec![point])
                .named(format!("Centroid {}", number))
                .color(cluster_color(centroid.cluster))
                .marker(MarkerType::Cross, 15),
        );
    }

    for (cluster, points) in groups {
        spec.series.push(
            Series::new(SeriesKind::Scatter, points)
                .named(format!("Cluster {}", cluster + 1))
                .color(cluster_color(cluster))
                .marker(MarkerType::Circle, 8),
        );
    }
    Ok(spec)
}

fn curve(points: &[CurvePoint]) -> Vec<DataPoint> {
    points.iter().map(|p| DataPoint::xy(p.x, p.y)).collect()
}

pub fn elbow_chart(points: &[CurvePoint]) -> ChartSpec {
    let mut spec = ChartSpec::new("Elbow Method for Optimal Clusters (K-Means)");
    spec.axis_x = Some(Axis { interval: Some(1.0), ..Axis::titled("Number of Clusters") });
    spec.axis_y = Some(Axis::titled("Inertia (Within-Cluster Sum of Squares)"));
    spec.series.push(Series::new(SeriesKind::Line, curve(points)).marker(MarkerType::Circle, 10));
    spec
}

pub fn silhouette_chart(points: &[CurvePoint], technique: Technique) -> ChartSpec {
    let mut spec = ChartSpec::new(format!(
        "Silhouette Scores by Number of Clusters ({})",
        technique_title(technique)
    ));
    spec.axis_x = Some(Axis { interval: Some(1.0), ..Axis::titled("Number of Clusters") });
    spec.axis_y = Some(Axis { minimum: Some(0.0), maximum: Some(1.0), ..Axis::titled("Silhouette Score") });
    spec.series.push(Series::new(SeriesKind::Line, curve(points)).marker(MarkerType::Circle, 10));
    spec
}
