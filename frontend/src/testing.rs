use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::api::Backend;
use crate::error::DashboardError;

/// In-memory service: canned replies per path, every call recorded.
#[derive(Default)]
pub struct FakeBackend {
    replies: HashMap<String, Result<Value, DashboardError>>,
    requests: RefCell<Vec<(String, Option<Value>)>>,
}

impl FakeBackend {
    pub fn reply(mut self, path: &str, value: Value) -> Self {
        self.replies.insert(path.to_string(), Ok(value));
        self
    }

    pub fn fail(mut self, path: &str, err: DashboardError) -> Self {
        self.replies.insert(path.to_string(), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<(String, Option<Value>)> {
        self.requests.borrow().clone()
    }

    fn answer(&self, path: &str) -> Result<Value, DashboardError> {
        self.replies
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(DashboardError::Network(format!("no reply for {path}"))))
    }
}

impl Backend for FakeBackend {
    async fn get(&self, path: &str) -> Result<Value, DashboardError> {
        self.requests.borrow_mut().push((path.to_string(), None));
        self.answer(path)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, DashboardError> {
        self.requests.borrow_mut().push((path.to_string(), Some(body)));
        self.answer(path)
    }
}
