//! Error types shared across Gyrolog crates.

/// Top-level error type for Gyrolog operations.
///
/// Missing sensor fields never produce an error; they are normalized to zero.
#[derive(Debug, thiserror::Error)]
pub enum GyrologError {
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Invalid session state: {message}")]
    InvalidState { message: String },

    #[error("Sensor source error: {message}")]
    Source { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GyrologError.
pub type GyrologResult<T> = Result<T, GyrologError>;

impl GyrologError {
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState {
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GyrologError::permission_denied("motion sensors blocked");
        assert_eq!(err.to_string(), "Permission denied: motion sensors blocked");

        let err = GyrologError::invalid_state("already recording");
        assert_eq!(err.to_string(), "Invalid session state: already recording");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: GyrologError = io.into();
        assert_eq!(err.to_string(), "missing file");
    }
}
