use thiserror::Error;

/// Fixed cluster palette; cluster `k` is drawn in `CLUSTER_PALETTE[k % len]`.
pub const CLUSTER_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7", "#9c755f", "#bab0ab",
];

pub const PRIMARY_COLOR: &str = "#563d7c";
pub const SECONDARY_COLOR: &str = "#8e79b8";

pub fn cluster_color(cluster: u32) -> &'static str {
    CLUSTER_PALETTE[cluster as usize % CLUSTER_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Scatter,
    Line,
    Column,
    Pie,
}

impl SeriesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesKind::Scatter => "scatter",
            SeriesKind::Line => "line",
            SeriesKind::Column => "column",
            SeriesKind::Pie => "pie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerType {
    Circle,
    Triangle,
    Cross,
    None,
}

impl MarkerType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerType::Circle => "circle",
            MarkerType::Triangle => "triangle",
            MarkerType::Cross => "cross",
            MarkerType::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint {
    pub x: Option<f64>,
    pub y: f64,
    pub label: Option<String>,
    pub color: Option<String>,
    pub tooltip: Option<String>,
}

impl DataPoint {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x: Some(x), y, ..Default::default() }
    }

    pub fn labeled(label: impl Into<String>, y: f64) -> Self {
        Self { label: Some(label.into()), y, ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub name: Option<String>,
    pub show_in_legend: bool,
    pub visible: bool,
    pub color: Option<String>,
    pub marker_type: Option<MarkerType>,
    pub marker_size: Option<u32>,
    pub dashed: bool,
    pub tooltip: Option<String>,
    pub index_label: Option<String>,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(kind: SeriesKind, points: Vec<DataPoint>) -> Self {
        Self {
            kind,
            name: None,
            show_in_legend: false,
            visible: true,
            color: None,
            marker_type: None,
            marker_size: None,
            dashed: false,
            tooltip: None,
            index_label: None,
            points,
        }
    }

    /// Names the series and lists it in the legend.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.show_in_legend = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn marker(mut self, marker_type: MarkerType, size: u32) -> Self {
        self.marker_type = Some(marker_type);
        self.marker_size = Some(size);
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn index_label(mut self, label: impl Into<String>) -> Self {
        self.index_label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axis {
    pub title: Option<String>,
    pub interval: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }
}

/// Library-neutral description of one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSpec {
    pub title: String,
    pub axis_x: Option<Axis>,
    pub axis_y: Option<Axis>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    /// Flips one legend entry. Returns false if there is no such series.
    pub fn toggle_series(&mut self, index: usize) -> bool {
        match self.series.get_mut(index) {
            Some(series) => {
                series.visible = !series.visible;
                true
            }
            None => false,
        }
    }

    pub fn legend(&self) -> impl Iterator<Item = (usize, &Series)> {
        self.series.iter().enumerate().filter(|(_, s)| s.show_in_legend)
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error rendering chart: {0}")]
    Library(String),
    #[error("Error rendering chart: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Error rendering chart: {0}")]
    Data(String),
}

/// Draws a chart spec into the element with id `container_id`.
pub trait ChartRenderer {
    fn render(&self, container_id: &str, spec: &ChartSpec) -> Result<(), RenderError>;
}

/// Draws the chart, turning a failure into the notice shown in its place.
pub fn draw<R: ChartRenderer>(renderer: &R, container_id: &str, spec: &ChartSpec) -> Result<(), String> {
    renderer.render(container_id, spec).map_err(|err| {
        log::error!("Chart '{}' failed: {}", container_id, err);
        err.to_string()
    })
}

/// The chart last handed to the renderer, so an unchanged chart is not rebuilt on every render.
#[derive(Debug, Default)]
pub struct DrawCache {
    last: Option<(String, ChartSpec)>,
}

impl DrawCache {
    pub fn is_current(&self, container_id: &str, spec: &ChartSpec) -> bool {
        matches!(&self.last, Some((id, drawn)) if id == container_id && drawn == spec)
    }

    pub fn remember(&mut self, container_id: String, spec: ChartSpec) {
        self.last = Some((container_id, spec));
    }

    pub fn forget(&mut self) {
        self.last = None;
    }
}
