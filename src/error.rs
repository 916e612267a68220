use thiserror::Error;

use crate::records::EntityId;

/// Errors raised at the edges of the crate: loading configuration and
/// scenarios, and resolving actor ids given on the command line.
///
/// The accusation workflow itself never fails; see [`crate::workflow`].
#[derive(Debug, Error)]
pub enum WantedError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Unknown actor: {0}")]
    UnknownActor(EntityId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
