use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    AnalysisMode, AnalysisRequest, AnalysisResult, BrandList, ChartOption, ClassPrediction, PredictionRequest,
    RegressionPrediction,
};

use crate::error::DashboardError;

/// JSON-over-HTTP access to the analysis service.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn get(&self, path: &str) -> Result<Value, DashboardError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, DashboardError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Backend for HttpBackend {
    async fn get(&self, path: &str) -> Result<Value, DashboardError> {
        let response = Request::get(&self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, DashboardError> {
        let response = Request::post(&self.url(path)).json(&body)?.send().await?;
        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, DashboardError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(DashboardError::Network(format!("Server error: {} - {}", status, body)));
    }
    response.json::<Value>().await.map_err(|e| DashboardError::Parse(e.to_string()))
}

/// Splits a reply into the service's own `error` message or the typed payload.
pub fn decode_reply<T: DeserializeOwned>(value: Value) -> Result<T, DashboardError> {
    if let Some(error) = value.get("error") {
        let message = match error {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        return Err(DashboardError::Backend(message));
    }
    Ok(serde_json::from_value(value)?)
}

fn to_body(body: &impl Serialize) -> Result<Value, DashboardError> {
    Ok(serde_json::to_value(body)?)
}

pub async fn run_analysis<B: Backend>(
    backend: &B,
    mode: AnalysisMode,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, DashboardError> {
    let reply = backend.post(mode.run_endpoint(), to_body(request)?).await?;
    Ok(match mode {
        AnalysisMode::Regression => AnalysisResult::Regression(decode_reply(reply)?),
        AnalysisMode::Classification => AnalysisResult::Classification(decode_reply(reply)?),
        AnalysisMode::Clustering => AnalysisResult::Clustering(decode_reply(reply)?),
    })
}

pub async fn fetch_brands<B: Backend>(backend: &B) -> Result<Vec<String>, DashboardError> {
    let reply = backend.get("/get_brands").await?;
    Ok(decode_reply::<BrandList>(reply)?.brands)
}

/// Returns the predicted value formatted for display.
pub async fn predict<B: Backend>(
    backend: &B,
    mode: AnalysisMode,
    request: &PredictionRequest,
) -> Result<String, DashboardError> {
    let endpoint = mode.predict_endpoint().ok_or(DashboardError::PredictionUnsupported(mode))?;
    let reply = backend.post(endpoint, to_body(request)?).await?;
    match mode {
        AnalysisMode::Classification => Ok(decode_reply::<ClassPrediction>(reply)?.label()),
        _ => Ok(format!("{:.2}", decode_reply::<RegressionPrediction>(reply)?.predicted)),
    }
}

pub async fn fetch_chart_data<B: Backend>(backend: &B, option: ChartOption) -> Result<Value, DashboardError> {
    let reply = backend.get(&option.data_path()).await?;
    if let Some(error) = reply.as_object().and_then(|o| o.get("error")) {
        return Err(DashboardError::Backend(error.as_str().unwrap_or_default().to_string()));
    }
    Ok(reply)
}
