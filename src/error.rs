use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostureError {
    #[error("landmark frame too short: need at least {required} points, got {actual}")]
    TooFewLandmarks { required: usize, actual: usize },

    #[error("unknown view mode '{0}' (expected 'front' or 'side')")]
    UnknownViewMode(String),

    #[error("unknown feedback language '{0}' (expected 'korean' or 'english')")]
    UnknownLanguage(String),

    #[error("invalid threshold '{name}': {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    #[error("config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PostureError>;
