//! Thin JSON client for a running pomoreward-server.

use pomoreward_core::StatusSnapshot;
use reqwest::{Client, Method};
use serde_json::Value;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5001";

pub struct ApiClient {
    base: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let url = format!("{}{path}", self.base);
        let mut req = self.http.request(method, &url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| format!("cannot reach {url}: {e}. Is pomoreward-server running?"))?;

        let status = resp.status();
        let json: Value = resp.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = json["message"].as_str().unwrap_or("request failed");
            return Err(format!("HTTP {status}: {message}").into());
        }
        Ok(json)
    }

    pub async fn get(&self, path: &str) -> Result<Value, Box<dyn std::error::Error>> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, Box<dyn std::error::Error>> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Poll `/api/timer-status`.
    pub async fn status(&self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        let json = self.get("/api/timer-status").await?;
        Ok(serde_json::from_value(json)?)
    }
}
