use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store request for {path} failed with status {status}: {message}")]
    Store {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Credential data unavailable while releasing {0}")]
    CredentialsUnavailable(String),

    #[error("Could not clear any of {0} expired orders")]
    ClearFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PanelError>;
