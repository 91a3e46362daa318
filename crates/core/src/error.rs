//! Error taxonomy for the WER engine
//!
//! The comparison core itself never fails for finite input; errors only
//! arise at the edges (loading fixed-annotation lists or transcript files,
//! rejecting non-text input).

use thiserror::Error;

/// Errors produced by the WER engine's fallible surface.
#[derive(Debug, Error)]
pub enum WerError {
    /// An I/O failure while loading configuration or transcript data.
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Input that is not valid text where text is required.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl WerError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = WerError::io(
            "reading fixed annotations",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("reading fixed annotations"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = WerError::invalid_input("reference text contains a NUL byte");
        assert!(err.to_string().starts_with("invalid input:"));
    }
}
