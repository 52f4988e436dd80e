use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chaiwala_core::config::{AppConfig, LoadOptions, CONFIG_FILE_CANDIDATES};
use chaiwala_core::ApplicationError;
use toml::Value;

use crate::commands::CommandResult;

struct Field<'a> {
    key: &'static str,
    env_keys: &'static [&'static str],
    value: &'a str,
}

/// Prints the effective config as plain text; a config that fails to load is
/// reported through the JSON failure envelope instead.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<builtin>".to_string());
    let log_format = format!("{:?}", config.logging.format);

    let fields = [
        Field { key: "catalog.path", env_keys: &["CHAIWALA_CATALOG_PATH"], value: &catalog_path },
        Field {
            key: "page.search_input_id",
            env_keys: &["CHAIWALA_PAGE_SEARCH_INPUT_ID"],
            value: &config.page.search_input_id,
        },
        Field {
            key: "page.item_class",
            env_keys: &["CHAIWALA_PAGE_ITEM_CLASS"],
            value: &config.page.item_class,
        },
        Field {
            key: "page.name_attribute",
            env_keys: &["CHAIWALA_PAGE_NAME_ATTRIBUTE"],
            value: &config.page.name_attribute,
        },
        Field {
            key: "page.no_results_id",
            env_keys: &["CHAIWALA_PAGE_NO_RESULTS_ID"],
            value: &config.page.no_results_id,
        },
        Field {
            key: "page.grid_id",
            env_keys: &["CHAIWALA_PAGE_GRID_ID"],
            value: &config.page.grid_id,
        },
        Field {
            key: "logging.level",
            env_keys: &["CHAIWALA_LOGGING_LEVEL", "CHAIWALA_LOG_LEVEL"],
            value: &config.logging.level,
        },
        Field {
            key: "logging.format",
            env_keys: &["CHAIWALA_LOGGING_FORMAT", "CHAIWALA_LOG_FORMAT"],
            value: &log_format,
        },
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in &fields {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, field.value, source));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path() -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
