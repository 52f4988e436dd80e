pub mod browse;
pub mod catalog;
pub mod config;
pub mod doctor;
pub mod order;
pub mod search;

use chaiwala_core::config::{AppConfig, LoadOptions};
use chaiwala_core::{
    render_catalog, ApplicationError, Catalog, CatalogError, CatalogFilter, MemorySurface,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        Self::success_with_data(command, message, serde_json::to_value(data).ok())
    }

    fn success_with_data(command: &str, message: impl Into<String>, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(command, error.error_class(), error.to_string(), error.exit_code())
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// A rendered catalog page with the filter widget attached to it.
pub struct Storefront {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub surface: MemorySurface,
    pub filter: CatalogFilter,
}

impl Storefront {
    pub fn open() -> Result<Self, ApplicationError> {
        Self::open_with(LoadOptions::default())
    }

    pub fn open_with(options: LoadOptions) -> Result<Self, ApplicationError> {
        let config = AppConfig::load(options)?;
        let catalog = load_catalog(&config)?;
        let surface = render_catalog(&catalog, &config.page);
        let filter = CatalogFilter::attach(&surface, &config.page)?;

        Ok(Self { config, catalog, surface, filter })
    }
}

pub fn load_catalog(config: &AppConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog.path {
        Some(path) => Catalog::load(path),
        None => Ok(Catalog::builtin()),
    }
}
