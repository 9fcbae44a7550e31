//! CLI error types.

use docmap_config::ConfigError;
use docmap_core::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
