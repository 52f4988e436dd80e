use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::ElementBindings;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub page: ElementBindings,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in demo catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["chaiwala.toml", "config/chaiwala.toml"];

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options
                .config_path
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(page) = patch.page {
            if let Some(search_input_id) = page.search_input_id {
                self.page.search_input_id = search_input_id;
            }
            if let Some(item_class) = page.item_class {
                self.page.item_class = item_class;
            }
            if let Some(name_attribute) = page.name_attribute {
                self.page.name_attribute = name_attribute;
            }
            if let Some(no_results_id) = page.no_results_id {
                self.page.no_results_id = no_results_id;
            }
            if let Some(grid_id) = page.grid_id {
                self.page.grid_id = grid_id;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("CHAIWALA_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("CHAIWALA_PAGE_SEARCH_INPUT_ID") {
            self.page.search_input_id = value;
        }
        if let Some(value) = read_env("CHAIWALA_PAGE_ITEM_CLASS") {
            self.page.item_class = value;
        }
        if let Some(value) = read_env("CHAIWALA_PAGE_NAME_ATTRIBUTE") {
            self.page.name_attribute = value;
        }
        if let Some(value) = read_env("CHAIWALA_PAGE_NO_RESULTS_ID") {
            self.page.no_results_id = value;
        }
        if let Some(value) = read_env("CHAIWALA_PAGE_GRID_ID") {
            self.page.grid_id = value;
        }

        let log_level =
            read_env("CHAIWALA_LOGGING_LEVEL").or_else(|| read_env("CHAIWALA_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("CHAIWALA_LOGGING_FORMAT").or_else(|| read_env("CHAIWALA_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_page(&self.page)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.path must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_page(page: &ElementBindings) -> Result<(), ConfigError> {
    let fields = [
        ("page.search_input_id", &page.search_input_id),
        ("page.item_class", &page.item_class),
        ("page.name_attribute", &page.name_attribute),
        ("page.no_results_id", &page.no_results_id),
        ("page.grid_id", &page.grid_id),
    ];

    for (key, value) in fields {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{key} must not be empty")));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "{key} must be a single identifier without whitespace, got `{value}`"
            )));
        }
    }

    // Each id must resolve to a different element.
    let ids = [
        ("page.search_input_id", &page.search_input_id),
        ("page.no_results_id", &page.no_results_id),
        ("page.grid_id", &page.grid_id),
    ];
    for (position, (key, value)) in ids.iter().enumerate() {
        if let Some((earlier, _)) = ids[..position].iter().find(|(_, other)| other == value) {
            return Err(ConfigError::Validation(format!(
                "{key} `{value}` is already used by {earlier}"
            )));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    page: Option<PagePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct PagePatch {
    search_input_id: Option<String>,
    item_class: Option<String>,
    name_attribute: Option<String>,
    no_results_id: Option<String>,
    grid_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_bind_the_stock_page() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.page.search_input_id == "searchInput", "default search input id")?;
        ensure(config.page.item_class == "chai-card", "default item class")?;
        ensure(config.page.no_results_id == "noResults", "default indicator id")?;
        ensure(config.page.grid_id == "chaiGrid", "default grid id")?;
        ensure(config.catalog.path.is_none(), "no catalog path by default")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_CHAIWALA_GRID", "teaGrid");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("chaiwala.toml");
            fs::write(
                &path,
                r#"
[page]
grid_id = "${TEST_CHAIWALA_GRID}"
item_class = "tea-card"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.page.grid_id == "teaGrid", "grid id should come from environment")?;
            ensure(config.page.item_class == "tea-card", "item class should come from file")?;
            Ok(())
        })();

        clear_vars(&["TEST_CHAIWALA_GRID"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CHAIWALA_LOG_LEVEL", "warn");
        env::set_var("CHAIWALA_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["CHAIWALA_LOG_LEVEL", "CHAIWALA_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CHAIWALA_PAGE_SEARCH_INPUT_ID", "envInput");
        env::set_var("CHAIWALA_CATALOG_PATH", "from-env.toml");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("chaiwala.toml");
            fs::write(
                &path,
                r#"
[catalog]
path = "from-file.toml"

[page]
search_input_id = "fileInput"
no_results_id = "fileEmpty"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    catalog_path: Some(PathBuf::from("from-override.toml")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.path == Some(PathBuf::from("from-override.toml")),
                "override catalog path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.page.search_input_id == "envInput",
                "env search input id should win over file and defaults",
            )?;
            ensure(config.page.no_results_id == "fileEmpty", "file value should beat default")?;
            Ok(())
        })();

        clear_vars(&["CHAIWALA_PAGE_SEARCH_INPUT_ID", "CHAIWALA_CATALOG_PATH"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("CHAIWALA_PAGE_GRID_ID", "chai grid");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("page.grid_id")
            );
            ensure(has_message, "validation failure should mention page.grid_id")
        })();

        clear_vars(&["CHAIWALA_PAGE_GRID_ID"]);
        result
    }

    #[test]
    fn page_ids_must_name_distinct_elements() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("chaiwala.toml");
        fs::write(
            &path,
            r#"
[page]
grid_id = "noResults"
"#,
        )
        .map_err(|err| err.to_string())?;

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });
        let message = match result {
            Err(ConfigError::Validation(message)) => message,
            Err(other) => return Err(format!("unexpected error: {other}")),
            Ok(_) => return Err("grid id shared with the indicator should be rejected".to_string()),
        };

        ensure(message.contains("page.grid_id"), "message should name page.grid_id")?;
        ensure(message.contains("page.no_results_id"), "message should name the clashing key")
    }

    #[test]
    fn search_input_cannot_double_as_grid() -> Result<(), String> {
        let mut config = AppConfig::default();
        config.page.search_input_id = config.page.grid_id.clone();

        ensure(
            matches!(
                config.validate(),
                Err(ConfigError::Validation(ref message))
                    if message.contains("page.grid_id") && message.contains("page.search_input_id")
            ),
            "search input and grid sharing an id should fail validation",
        )
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let result = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("chatty".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::Validation(ref message)) if message.contains("logging.level")),
            "unknown level should fail validation",
        )
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let result = AppConfig::load(LoadOptions {
            config_path: Some(dir.path().join("absent.toml")),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "missing required file should be reported",
        )
    }

    #[test]
    fn unterminated_interpolation_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("chaiwala.toml");
        fs::write(&path, "[page]\ngrid_id = \"${OPEN\"\n").map_err(|err| err.to_string())?;

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });

        ensure(
            matches!(result, Err(ConfigError::UnterminatedInterpolation)),
            "unterminated expression should be reported",
        )
    }
}
