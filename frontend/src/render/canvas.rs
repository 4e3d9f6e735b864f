use serde_json::{Map, Value, json};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use super::chart::{Axis, ChartRenderer, ChartSpec, DataPoint, RenderError, Series};

#[wasm_bindgen]
extern "C" {
    /// Page-provided shim around the charting library (see `index.html`).
    #[wasm_bindgen(js_name = renderDashboardChart, catch)]
    fn render_dashboard_chart(container_id: &str, options: JsValue) -> Result<(), JsValue>;
}

/// Hands specs to the page's charting library as its option objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasChartRenderer;

impl ChartRenderer for CanvasChartRenderer {
    fn render(&self, container_id: &str, spec: &ChartSpec) -> Result<(), RenderError> {
        let encoded = serde_json::to_string(&chart_options(spec))?;
        let options = js_sys::JSON::parse(&encoded).map_err(js_error)?;
        render_dashboard_chart(container_id, options).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> RenderError {
    RenderError::Library(
        js_sys::Error::from(err)
            .message()
            .as_string()
            .unwrap_or_else(|| "unknown chart library error".to_string()),
    )
}

/// Options object in the shape the charting library expects.
pub fn chart_options(spec: &ChartSpec) -> Value {
    let mut options = json!({
        "animationEnabled": true,
        "theme": "light2",
        "title": { "text": spec.title, "fontFamily": "Segoe UI" },
        "legend": { "cursor": "pointer", "verticalAlign": "bottom", "horizontalAlign": "center" },
        "data": spec.series.iter().map(series_options).collect::<Vec<_>>(),
    });
    if let Some(axis) = &spec.axis_x {
        options["axisX"] = axis_options(axis);
    }
    if let Some(axis) = &spec.axis_y {
        options["axisY"] = axis_options(axis);
    }
    options
}

fn insert_some<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

fn axis_options(axis: &Axis) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "title", axis.title.clone());
    insert_some(&mut map, "interval", axis.interval);
    insert_some(&mut map, "minimum", axis.minimum);
    insert_some(&mut map, "maximum", axis.maximum);
    map.insert("gridColor".to_string(), json!("#e0e0e0"));
    map.insert("titleFontFamily".to_string(), json!("Segoe UI"));
    Value::Object(map)
}

fn series_options(series: &Series) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(series.kind.as_str()));
    // The page renders its own clickable legend.
    map.insert("showInLegend".to_string(), json!(false));
    map.insert("visible".to_string(), json!(series.visible));
    insert_some(&mut map, "name", series.name.clone());
    insert_some(&mut map, "color", series.color.clone());
    insert_some(&mut map, "markerType", series.marker_type.map(|m| m.as_str()));
    insert_some(&mut map, "markerSize", series.marker_size);
    insert_some(&mut map, "toolTipContent", series.tooltip.clone());
    if series.dashed {
        map.insert("lineDashType".to_string(), json!("dash"));
    }
    if let Some(label) = &series.index_label {
        map.insert("indexLabel".to_string(), json!(label));
        map.insert("indexLabelFontColor".to_string(), json!("#FFFFFF"));
        map.insert("indexLabelPlacement".to_string(), json!("inside"));
    }
    map.insert("dataPoints".to_string(), Value::Array(series.points.iter().map(point_options).collect()));
    Value::Object(map)
}

fn point_options(point: &DataPoint) -> Value {
    let mut map = Map::new();
    insert_some(&mut map, "x", point.x);
    map.insert("y".to_string(), json!(point.y));
    insert_some(&mut map, "label", point.label.clone());
    insert_some(&mut map, "markerColor", point.color.clone());
    insert_some(&mut map, "color", point.color.clone());
    insert_some(&mut map, "toolTipContent", point.tooltip.clone());
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::builders::regression_chart;
    use crate::render::chart::{MarkerType, SeriesKind};
    use shared::RegressionResult;

    #[test]
    fn options_follow_library_shape() {
        let mut spec = ChartSpec::new("Elbow");
        spec.axis_x = Some(Axis { interval: Some(1.0), ..Axis::titled("Number of Clusters") });
        let mut series = Series::new(SeriesKind::Line, vec![DataPoint::xy(2.0, 10.0)])
            .named("Inertia")
            .marker(MarkerType::Circle, 10)
            .dashed();
        series.visible = false;
        spec.series.push(series);

        let options = chart_options(&spec);
        assert_eq!(options["title"]["text"], "Elbow");
        assert_eq!(options["axisX"]["interval"], 1.0);
        assert!(options.get("axisY").is_none());
        let data = &options["data"][0];
        assert_eq!(data["type"], "line");
        assert_eq!(data["visible"], false);
        assert_eq!(data["lineDashType"], "dash");
        assert_eq!(data["markerType"], "circle");
        assert_eq!(data["dataPoints"][0], json!({"x": 2.0, "y": 10.0}));
    }

    #[test]
    fn identity_line_has_no_markers() {
        let result = RegressionResult {
            r2: 0.9,
            train_actual: vec![1.0, 4.0],
            train_pred: vec![1.5, 3.5],
            test_actual: vec![2.0],
            test_pred: vec![2.5],
            features: vec![],
            model_id: None,
        };
        let options = chart_options(&regression_chart(&result));
        let line = &options["data"][2];
        assert_eq!(line["name"], "Perfect Prediction Line");
        assert_eq!(line["markerType"], "none");
        assert_eq!(line["lineDashType"], "dash");
    }

    #[test]
    fn library_legend_is_off() {
        let mut spec = ChartSpec::new("Price Diff Category");
        spec.series.push(Series::new(SeriesKind::Column, vec![DataPoint::labeled("Tops", 10.0)]).named("Original Price"));
        spec.series.push(Series::new(SeriesKind::Column, vec![]).named("Discounted Price"));
        assert_eq!(spec.legend().count(), 2);

        let options = chart_options(&spec);
        assert_eq!(options["data"][0]["showInLegend"], false);
        assert_eq!(options["data"][1]["showInLegend"], false);
        assert_eq!(options["data"][1]["name"], "Discounted Price");
    }
}
