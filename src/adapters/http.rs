use crate::domain::model::{CalculationRequest, CalculationResult, DiamondGroup, ServiceStatus};
use crate::domain::ports::{ConfigProvider, PricingService};
use crate::utils::error::{DiamondError, Result};
use crate::utils::validation::validate_url;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const CALCULATE_PATH: &str = "/calculate";
pub const HEALTH_PATH: &str = "/health";

/// 透過 HTTP 呼叫計價服務
#[derive(Debug, Clone)]
pub struct HttpPricingService {
    client: Client,
    base_url: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl HttpPricingService {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("service.base_url", config.base_url())?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            headers: config.headers().clone(),
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, mut request: RequestBuilder) -> RequestBuilder {
        // 添加自定義標頭
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        request
    }

    async fn error_from_response(response: Response) -> DiamondError {
        let status = response.status().as_u16();
        let detail = match response.text().await {
            Ok(body) => extract_detail(&body),
            Err(e) => {
                tracing::debug!("Failed to read error body: {}", e);
                None
            }
        };

        DiamondError::ServiceError { status, detail }
    }
}

/// 從錯誤回應中取出 detail；FastAPI 驗證錯誤為陣列，合併各項 msg
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    match parsed.detail? {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[async_trait::async_trait]
impl PricingService for HttpPricingService {
    async fn calculate(&self, groups: &[DiamondGroup]) -> Result<CalculationResult> {
        let url = self.endpoint(CALCULATE_PATH);
        let payload = CalculationRequest {
            groups: groups.to_vec(),
        };

        tracing::debug!("📡 POST {} with {} group(s)", url, payload.groups.len());
        let response = self.prepare(self.client.post(&url)).json(&payload).send().await?;
        tracing::debug!("📡 Pricing service response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Unexpected calculation response body: {}", e);
            DiamondError::MalformedResponse {
                message: e.to_string(),
            }
        })
    }

    async fn health(&self) -> Result<ServiceStatus> {
        let url = self.endpoint(HEALTH_PATH);

        tracing::debug!("📡 GET {}", url);
        let response = self.prepare(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DiamondError::MalformedResponse {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Invalid carat weight"}"#).as_deref(),
            Some("Invalid carat weight")
        );
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "groups", 0, "carat"], "msg": "value is not a valid float", "type": "type_error.float"},
            {"loc": ["body", "groups", 0, "quantity"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid float; field required")
        );
    }

    #[test]
    fn test_extract_detail_missing_or_unparseable() {
        assert_eq!(extract_detail(r#"{"error": "boom"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(""), None);
    }

    #[test]
    fn test_endpoint_joining() {
        let service =
            HttpPricingService::new(&ServiceConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(service.endpoint(CALCULATE_PATH), "http://localhost:8000/calculate");

        let prefixed =
            HttpPricingService::new(&ServiceConfig::new("https://pricing.example.com/api"))
                .unwrap();
        assert_eq!(
            prefixed.endpoint(CALCULATE_PATH),
            "https://pricing.example.com/api/calculate"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpPricingService::new(&ServiceConfig::new("localhost:8000")).is_err());
        assert!(HttpPricingService::new(&ServiceConfig::new("")).is_err());
    }
}
