use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Page roles the filter widget binds to at attach time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementRole {
    SearchInput,
    NoResultsIndicator,
    Grid,
}

impl ElementRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchInput => "search input",
            Self::NoResultsIndicator => "no-results indicator",
            Self::Grid => "grid container",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("required {} element `#{id}` is not present on the page", .role.as_str())]
    MissingElement { role: ElementRole, id: String },
    #[error("item card #{index} (class `{class}`) has no `{attribute}` attribute")]
    MissingAttribute { index: usize, class: String, attribute: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_validation",
            Self::Catalog(_) => "catalog_load",
            Self::Filter(_) => "page_binding",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Catalog(_) => 3,
            Self::Filter(_) => 4,
        }
    }
}
