use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimplifyError {
    #[error("Upstream request failed: {0}")]
    UpstreamError(#[from] reqwest::Error),

    #[error("Upstream service returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Upstream response envelope had no recognizable text payload")]
    MalformedEnvelopeError,

    #[error("Could not extract a structured summary: {message}")]
    ParseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, SimplifyError>;

impl SimplifyError {
    /// HTTP status this error maps to at the endpoint boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::UpstreamError(_)
            | Self::UpstreamStatus { .. }
            | Self::MalformedEnvelopeError
            | Self::ParseError { .. } => 502,
            _ => 500,
        }
    }

    /// The `error` field of the failure envelope. Client-caused errors
    /// carry their own message; everything else collapses to a short
    /// classification.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::ParseError { .. } => {
                "Couldn't get a structured response. Try a shorter excerpt.".to_string()
            }
            Self::UpstreamError(_) | Self::UpstreamStatus { .. } | Self::MalformedEnvelopeError => {
                "Summarization failed.".to_string()
            }
            _ => "Internal server error.".to_string(),
        }
    }

    /// The optional `details` field: a human-readable cause with no
    /// credentials and no upstream body. Full detail stays in the log.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::ValidationError { .. } => None,
            Self::ParseError { message } => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}
