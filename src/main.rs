use chrono::Local;
use clap::Parser;
use diamond_calc::config::cli::{Command, LogFormat, QuoteArgs};
use diamond_calc::core::report::{render_groups, render_report};
use diamond_calc::domain::model::DiamondGroup;
use diamond_calc::utils::error::ErrorSeverity;
use diamond_calc::utils::logger;
use diamond_calc::utils::validation::{group_warnings, Validate};
use diamond_calc::{
    CliConfig, GroupEditor, HttpPricingService, PricingService, SubmissionApplied, TomlConfig,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting diamond-calc");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入批次規格表
    let lot_sheet = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading lot sheet from: {}", path.display());
            match TomlConfig::from_file(path) {
                Ok(sheet) => Some(sheet),
                Err(e) => {
                    tracing::error!("❌ Failed to load lot sheet: {}", e);
                    eprintln!("❌ Failed to load lot sheet '{}': {}", path.display(), e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(exit_code(e.severity()));
                }
            }
        }
        None => None,
    };

    // 驗證服務設定
    let service_config = config.resolve_service(lot_sheet.as_ref());
    if let Err(e) = service_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.severity()));
    }

    let service = HttpPricingService::new(&service_config)?;
    tracing::debug!("Pricing service at {}", service.base_url());

    match config.command {
        Command::Health => run_health(&service).await,
        Command::Quote(args) => {
            let groups = lot_sheet.map(|sheet| sheet.groups).unwrap_or_default();
            run_quote(service, groups, args).await
        }
    }
}

async fn run_health(service: &HttpPricingService) -> anyhow::Result<()> {
    match service.health().await {
        Ok(status) if status.is_healthy() => {
            println!("✅ Pricing service at {} is healthy", service.base_url());
            Ok(())
        }
        Ok(status) => {
            eprintln!("⚠️ Pricing service reported status '{}'", status.status);
            std::process::exit(exit_code(ErrorSeverity::Medium));
        }
        Err(e) => {
            tracing::error!("❌ Health check failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    }
}

async fn run_quote(
    service: HttpPricingService,
    mut groups: Vec<DiamondGroup>,
    args: QuoteArgs,
) -> anyhow::Result<()> {
    groups.extend(args.groups);
    let mut editor = GroupEditor::with_groups(service, groups);

    for warning in group_warnings(editor.groups()) {
        tracing::warn!("⚠️ {}", warning);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the request will not be sent");
        println!("{}", render_groups(editor.groups()));
        println!();
        println!("{}", serde_json::to_string_pretty(&editor.request())?);
        return Ok(());
    }

    tracing::info!("Submitting {} group(s)", editor.len());

    match editor.submit().await {
        SubmissionApplied::Succeeded => {
            if let Some(result) = editor.result() {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    println!("{}", render_report(result, &Local::now()));
                }
            }
            Ok(())
        }
        SubmissionApplied::Failed => {
            if let Some(failure) = editor.failure() {
                eprintln!("❌ {}", failure.message);
                eprintln!("💡 {}", failure.category.recovery_suggestion());
                std::process::exit(exit_code(failure.severity));
            }
            Ok(())
        }
        SubmissionApplied::Stale => anyhow::bail!("submission was superseded by a newer one"),
    }
}
