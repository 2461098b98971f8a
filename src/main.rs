use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxtrend::cli::ui;
use fxtrend::core::currency::parse_currency_code;
use fxtrend::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxtrend::AppCommand {
    fn from(cmd: Commands) -> fxtrend::AppCommand {
        match cmd {
            Commands::Currencies => fxtrend::AppCommand::Currencies,
            Commands::Convert { amount, from, to } => {
                fxtrend::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates { base, all } => fxtrend::AppCommand::Rates { base, all },
            Commands::Trend { from, to } => fxtrend::AppCommand::Trend { from, to },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported currencies
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Currency to convert from
        #[arg(short, long, value_parser = parse_currency_code)]
        from: Option<String>,
        /// Currency to convert to
        #[arg(short, long, value_parser = parse_currency_code)]
        to: Option<String>,
    },
    /// Display latest rates for a base currency
    Rates {
        /// Base currency
        #[arg(value_parser = parse_currency_code)]
        base: Option<String>,
        /// Include every currency the provider returns
        #[arg(short, long)]
        all: bool,
    },
    /// Display the 7-day trend with a short projection
    Trend {
        /// Base currency
        #[arg(short, long, value_parser = parse_currency_code)]
        from: Option<String>,
        /// Target currency
        #[arg(short, long, value_parser = parse_currency_code)]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => fxtrend::cli::setup::setup(),
        Some(cmd) => fxtrend::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", ui::style_text(&format!("Error: {e:#}"), ui::StyleType::Error));
        std::process::exit(1);
    }
    Ok(())
}
