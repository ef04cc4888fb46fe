use thiserror::Error;

/// Failures the core can report to its caller.
///
/// Rejected gameplay actions are not errors; they are no-ops or typed
/// rejections next to the operation (see `CraftError`, `ShopError`).
#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid save: {reason}")]
    InvalidSave { reason: String },

    #[error("Save checksum verification failed")]
    ChecksumMismatch,

    #[error("Could not determine a save directory")]
    NoSaveDirectory,
}

pub type Result<T> = std::result::Result<T, GameError>;
