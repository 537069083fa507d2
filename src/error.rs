use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("snapshot file not found: {0}")]
    SnapshotNotFound(String),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("symbol not found in snapshot file: {0}")]
    SymbolNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
