use std::env;

use chaiwala_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Installs the stderr subscriber; stdout is reserved for command payloads.
///
/// `RUST_LOG` takes precedence over `logging.level`. Falls back to compact `info`
/// output when configuration does not load, so the command itself can still
/// report the configuration failure.
pub fn init() {
    let (level, format) = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => (config.logging.level, config.logging.format),
        Err(_) => (FALLBACK_DIRECTIVE.to_string(), LogFormat::Compact),
    };

    let rust_log = env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), &level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|error| {
        eprintln!("ignoring log filter `{directive}`: {error}");
        EnvFilter::new(FALLBACK_DIRECTIVE)
    });

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(error) = installed {
        eprintln!("logging already initialized: {error}");
    }
}

fn filter_directive(rust_log: Option<&str>, level: &str) -> String {
    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directive) => directive.to_string(),
        None => level.trim().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::filter_directive;

    #[test]
    fn configured_level_is_the_default_directive() {
        assert_eq!(filter_directive(None, "WARN"), "warn");
        assert_eq!(filter_directive(Some("   "), "debug"), "debug");
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let directive = filter_directive(Some("chaiwala_core=trace,info"), "warn");

        assert_eq!(directive, "chaiwala_core=trace,info");
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn every_accepted_level_builds_a_filter() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(filter_directive(None, level)).is_ok(), "{level}");
        }
    }
}
