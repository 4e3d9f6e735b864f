pub mod builders;
pub mod canvas;
pub mod chart;
pub mod metrics;
pub mod view;

pub use chart::{ChartSpec, draw};
pub use view::{ChartBody, ResultChart, ResultView, render_view};
