use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

fn verbosity_targets(verbose: bool) -> Targets {
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), level_filter)
}

/// With `env_filter` set, it alone decides what is logged and `verbose` is
/// ignored. Without it only this crate logs, at debug level when `verbose`.
fn build_subscriber(
    verbose: bool,
    env_filter: Option<EnvFilter>,
) -> impl Subscriber + Send + Sync {
    let app_filter = env_filter.is_none().then(|| verbosity_targets(verbose));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
}

/// Logs go to stderr so rendered tables on stdout stay clean. A valid
/// `RUST_LOG` replaces the verbosity flag entirely.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    build_subscriber(verbose, env_filter)
        .try_init()
        .context("Failed to initialise logging")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn crate_debug_enabled(verbose: bool, env_filter: Option<EnvFilter>) -> bool {
        tracing::subscriber::with_default(build_subscriber(verbose, env_filter), || {
            tracing::enabled!(target: "fxtrend", Level::DEBUG)
        })
    }

    #[test]
    fn test_verbosity_flag_without_env_filter() {
        assert!(crate_debug_enabled(true, None));
        assert!(!crate_debug_enabled(false, None));
    }

    #[test]
    fn test_env_filter_replaces_verbosity_flag() {
        assert!(crate_debug_enabled(false, Some(EnvFilter::new("debug"))));
        assert!(!crate_debug_enabled(true, Some(EnvFilter::new("fxtrend=warn"))));
    }
}
