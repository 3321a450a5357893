use thiserror::Error;

/// User-facing failures of the scan → amount → launch flow.
///
/// None of these are fatal; the `Display` text is what the learner sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpiError {
    #[error("Scanned code:\n{scanned}\n\nThis doesn't look like a UPI payment QR.")]
    UnrecognizedPaymentCode { scanned: String },

    #[error("{reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("{message}")]
    LaunchFailed {
        app: &'static str,
        message: &'static str,
    },

    #[error("{message}")]
    UnsupportedPlatform { message: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_code_echoes_scanned_text() {
        let err = UpiError::UnrecognizedPaymentCode {
            scanned: "hello world".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("hello world"));
        assert!(message.contains("doesn't look like a UPI payment QR"));
    }

    #[test]
    fn launch_failure_shows_message_verbatim() {
        let err = UpiError::UnsupportedPlatform {
            message: "needs mobile",
        };
        assert_eq!(err.to_string(), "needs mobile");
    }
}
