use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Logs go to stderr so stdout stays usable
/// for classpaths and JSON.
///
/// Level precedence: `RUST_LOG`, then `--log-level`, then `-v`/`-q`, then
/// `SUTGEN_LOG_LEVEL`, then info.
pub fn init(log_level: Option<&str>, verbose: bool, quiet: bool) {
    INIT.call_once(|| {
        let env_level = env::var("SUTGEN_LOG_LEVEL").ok();
        let level = choose_level(log_level, verbose, quiet, env_level.as_deref());
        let directive = filter_directive(env::var("RUST_LOG").ok().as_deref(), level);

        tracing_subscriber::registry()
            .with(EnvFilter::new(directive))
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

/// Level from the CLI flags, falling back to `SUTGEN_LOG_LEVEL`, then info.
pub fn choose_level(
    log_level: Option<&str>,
    verbose: bool,
    quiet: bool,
    env_level: Option<&str>,
) -> Level {
    if let Some(level_str) = log_level {
        parse_level(level_str)
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        parse_level(env_level.unwrap_or("info"))
    }
}

/// A non-blank `RUST_LOG` is used verbatim; otherwise only our own target is
/// enabled at `level`.
pub fn filter_directive(rust_log: Option<&str>, level: Level) -> String {
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => directive.to_string(),
        None => format!("sutgen={}", level),
    }
}

pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
