pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpPricingService;
pub use config::{toml_config::TomlConfig, ServiceConfig};
pub use core::editor::{GroupEditor, SubmissionApplied, SubmissionToken};
pub use domain::model::{
    CalculationRequest, CalculationResult, Certification, Clarity, Color, Cut, DiamondGroup,
    GroupDetails, GroupField, GroupId, GroupResult, GroupUpdate,
};
pub use domain::ports::{ConfigProvider, PricingService};
pub use utils::error::{DiamondError, Result};
