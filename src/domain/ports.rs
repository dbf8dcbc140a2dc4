use crate::domain::model::{CalculationResult, DiamondGroup, ServiceStatus};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> &HashMap<String, String>;
}

/// 外部計價服務
#[async_trait]
pub trait PricingService: Send + Sync {
    async fn calculate(&self, groups: &[DiamondGroup]) -> Result<CalculationResult>;
    async fn health(&self) -> Result<ServiceStatus>;
}
