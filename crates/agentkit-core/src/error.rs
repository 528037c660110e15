use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog manifest not found: {0}")]
    CatalogManifestMissing(String),

    #[error("unsafe catalog path '{0}': must be relative and stay inside the target root")]
    UnsafePath(String),

    #[error("duplicate catalog group: {0}")]
    DuplicateGroup(String),

    #[error("config template not found in catalog: {0}")]
    TemplateMissing(String),

    #[error("unknown template placeholder '{{{{ {0} }}}}'")]
    UnknownPlaceholder(String),

    #[error("rendered config is not a key/value document")]
    ConfigNotMapping,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, KitError>;
