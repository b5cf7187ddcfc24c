use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Clipboard write failed: {message}")]
    Clipboard { message: String },

    #[error("Runtime unavailable: {message}")]
    Runtime { message: String },

    #[error("Unknown notification kind: {kind}")]
    UnknownNoticeKind { kind: String },
}

impl UiError {
    /// Short message suitable for showing to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            UiError::Request(e) if e.is_timeout() => "The server took too long to answer".to_string(),
            UiError::Request(_) => "Could not reach the server".to_string(),
            UiError::HttpStatus { status, .. } => format!("The server answered with status {}", status),
            UiError::Json(_) => "The server answer could not be read".to_string(),
            UiError::InvalidUrl { url, .. } => format!("'{}' is not a valid address", url),
            UiError::InvalidHeader { name, .. } => format!("Header '{}' is not valid", name),
            UiError::Io(e) => format!("File access failed: {}", e),
            UiError::ConfigValidationError { field, .. }
            | UiError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            UiError::Clipboard { .. } => "Could not copy to the clipboard".to_string(),
            UiError::Runtime { .. } => "Timers are unavailable outside an async runtime".to_string(),
            UiError::UnknownNoticeKind { kind } => format!("'{}' is not a notification style", kind),
        }
    }
}

pub type Result<T> = std::result::Result<T, UiError>;
