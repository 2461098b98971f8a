pub mod cli;
pub mod core;
pub mod providers;

// Re-export modules for integration tests
pub use crate::core::config;

use crate::core::config::AppConfig;
use crate::core::currency::parse_currency_code;
use crate::core::{ConversionPipeline, CurrencyCatalog};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Currencies,
    Convert {
        amount: f64,
        from: Option<String>,
        to: Option<String>,
    },
    Rates {
        base: Option<String>,
        all: bool,
    },
    Trend {
        from: Option<String>,
        to: Option<String>,
    },
}

/// Picks the explicit code, then the configured default, then the catalog default.
fn resolve_code(
    explicit: Option<String>,
    configured: Option<&str>,
    fallback: &str,
) -> Result<String> {
    match explicit.as_deref().or(configured) {
        Some(code) => parse_currency_code(code),
        None => Ok(fallback.to_string()),
    }
}

fn build_pipeline(config: &AppConfig) -> Result<ConversionPipeline> {
    let client = providers::HttpRateClient::new(
        config.providers.latest_url(),
        config.providers.historical_url(),
        config.request_timeout(),
    )?;
    Ok(ConversionPipeline::new(Arc::new(client)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxtrend starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = CurrencyCatalog::builtin();
    let (default_from, default_to) = catalog.default_pair();
    let (default_from, default_to) = (default_from.code, default_to.code);

    match command {
        AppCommand::Currencies => {
            cli::currencies::run(&catalog);
            Ok(())
        }
        AppCommand::Convert { amount, from, to } => {
            let from = resolve_code(from, config.default_from.as_deref(), default_from)?;
            let to = resolve_code(to, config.default_to.as_deref(), default_to)?;
            let pipeline = build_pipeline(&config)?;
            cli::convert::run(&pipeline, &catalog, amount, &from, &to).await
        }
        AppCommand::Rates { base, all } => {
            let base = resolve_code(base, config.default_from.as_deref(), default_from)?;
            let pipeline = build_pipeline(&config)?;
            cli::rates::run(&pipeline, &catalog, &base, all).await
        }
        AppCommand::Trend { from, to } => {
            let from = resolve_code(from, config.default_from.as_deref(), default_from)?;
            let to = resolve_code(to, config.default_to.as_deref(), default_to)?;
            let pipeline = build_pipeline(&config)?;
            cli::trend::run(&pipeline, &from, &to).await
        }
    }
}
