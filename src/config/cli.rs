use crate::config::toml_config::TomlConfig;
use crate::config::ServiceConfig;
use crate::domain::model::DiamondGroup;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "diamond-calc")]
#[command(about = "Price diamond lots against a remote calculation service")]
pub struct CliConfig {
    /// Base URL of the pricing service (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML lot sheet
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit the groups and print the price breakdown
    Quote(QuoteArgs),
    /// Check that the pricing service is reachable
    Health,
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Group specification, e.g. "carat=1.2,quantity=3,cut=good,color=F,clarity=VS1,certification=AGS".
    /// Repeat to add more groups; they are appended after the lot sheet's groups.
    #[arg(short, long = "group", value_name = "SPEC", value_parser = DiamondGroup::parse_spec)]
    pub groups: Vec<DiamondGroup>,

    /// Print the raw calculation result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the request that would be sent without contacting the service
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// 命令列參數優先，其次為規格表，最後為預設值
    pub fn resolve_service(&self, file: Option<&TomlConfig>) -> ServiceConfig {
        let mut service = file.map(|f| f.service.clone()).unwrap_or_default();

        if let Some(base_url) = &self.base_url {
            service.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            service.timeout_seconds = Some(timeout);
        }

        service
    }
}
