use shared::{AnalysisResult, ClassificationResult, ClusteringResult, RegressionResult, Technique};

use super::builders;
use super::chart::ChartSpec;
use super::metrics::{self, MetricCard};

/// Chart views of one result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultChart {
    Main,
    Elbow,
    Silhouette,
}

impl ResultChart {
    pub fn key(self) -> &'static str {
        match self {
            ResultChart::Main => "main",
            ResultChart::Elbow => "elbow",
            ResultChart::Silhouette => "silhouette",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Spec(ChartSpec),
    /// Shown instead of the chart when it cannot be drawn.
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub chart: ResultChart,
    pub tab_label: &'static str,
    pub body: ChartBody,
}

/// Everything the result area shows for one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub heading: String,
    pub metrics: Vec<MetricCard>,
    pub notes: Vec<String>,
    pub charts: Vec<ChartPanel>,
}

impl ResultView {
    pub fn chart(&self, chart: ResultChart) -> Option<&ChartPanel> {
        self.charts.iter().find(|p| p.chart == chart)
    }

    pub fn chart_mut(&mut self, chart: ResultChart) -> Option<&mut ChartPanel> {
        self.charts.iter_mut().find(|p| p.chart == chart)
    }

    pub fn has_chart(&self, chart: ResultChart) -> bool {
        self.chart(chart).is_some()
    }

    /// Flips a legend entry of a drawn chart.
    pub fn toggle_series(&mut self, chart: ResultChart, index: usize) -> bool {
        match self.chart_mut(chart).map(|p| &mut p.body) {
            Some(ChartBody::Spec(spec)) => spec.toggle_series(index),
            _ => false,
        }
    }

    pub fn fail_chart(&mut self, chart: ResultChart, notice: String) {
        if let Some(panel) = self.chart_mut(chart) {
            panel.body = ChartBody::Notice(notice);
        }
    }
}

/// Pure mapping from a result payload to what the result area displays.
pub fn render_view(result: &AnalysisResult) -> ResultView {
    match result {
        AnalysisResult::Regression(r) => regression_view(r),
        AnalysisResult::Classification(r) => classification_view(r),
        AnalysisResult::Clustering(r) => clustering_view(r),
    }
}

fn main_panel(label: &'static str, spec: ChartSpec) -> ChartPanel {
    ChartPanel { chart: ResultChart::Main, tab_label: label, body: ChartBody::Spec(spec) }
}

fn regression_view(result: &RegressionResult) -> ResultView {
    ResultView {
        heading: "Model Performance".to_string(),
        metrics: metrics::regression_cards(result),
        notes: vec![
            "The chart below shows how well the model's predictions match the actual values. \
             Points closer to the diagonal line indicate better predictions."
                .to_string(),
        ],
        charts: vec![main_panel("Combined View", builders::regression_chart(result))],
    }
}

fn classification_view(result: &ClassificationResult) -> ResultView {
    let mut notes = vec![
        "The chart below shows how well the model's predictions match the actual values. \
         The confusion matrix helps visualize the classification results."
            .to_string(),
    ];
    if !result.class_labels.is_empty() {
        notes.push(format!("Classes: {}", result.class_labels.join(", ")));
    }
    ResultView {
        heading: "Model Performance".to_string(),
        metrics: metrics::classification_cards(result),
        notes,
        charts: vec![main_panel("Combined View", builders::classification_chart(result))],
    }
}

fn clustering_view(result: &ClusteringResult) -> ResultView {
    let technique = builders::technique_title(result.technique);
    let mut notes = vec![format!(
        "The chart below shows how {}s are grouped based on {} patterns.",
        result.group_by,
        result.features.join(", ")
    )];
    if result.technique == Technique::Hierarchical {
        notes.push("Hierarchical clustering uses Ward linkage method for optimal grouping.".to_string());
    }

    let scatter = match builders::cluster_scatter(result) {
        Ok(spec) => ChartBody::Spec(spec),
        Err(err) => {
            log::error!("Cluster scatter unavailable: {}", err);
            ChartBody::Notice(err.to_string())
        }
    };
    let mut charts = vec![ChartPanel { chart: ResultChart::Main, tab_label: "Cluster Visualization", body: scatter }];

    // The elbow curve only means something for k-means.
    if result.technique == Technique::Kmeans && !result.elbow().is_empty() {
        charts.push(ChartPanel {
            chart: ResultChart::Elbow,
            tab_label: "Elbow Method",
            body: ChartBody::Spec(builders::elbow_chart(result.elbow())),
        });
    }
    if !result.silhouette_curve().is_empty() {
        charts.push(ChartPanel {
            chart: ResultChart::Silhouette,
            tab_label: "Silhouette Scores",
            body: ChartBody::Spec(builders::silhouette_chart(result.silhouette_curve(), result.technique)),
        });
    }

    ResultView {
        heading: format!("Clustering Results ({})", technique),
        metrics: metrics::clustering_cards(result),
        notes,
        charts,
    }
}
