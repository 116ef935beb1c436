use serde::Deserialize;

use crate::models::UserType;
use crate::session::SessionError;
use crate::validation::ValidationError;

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// A failed client action. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx response. `message` is the backend's `error` field, or
    /// `HTTP <status>` when the body is not an error envelope.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// No response at all (connection refused, DNS, reset, timeout).
    #[error("Network error")]
    Network(#[source] reqwest::Error),

    /// 2xx response whose body does not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// The screen needs a principal of this kind and the session has none.
    #[error("Please sign in with a {0} account")]
    NotSignedIn(UserType),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Build the error for a non-2xx response from its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope.error,
            Err(_) => format!("HTTP {status}"),
        };
        Self::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True when the request never left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Config(_) | Self::NotSignedIn(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_message_is_used_verbatim() {
        let err = ClientError::from_response(401, r#"{"error":"Invalid credentials"}"#);
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let err = ClientError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn envelope_without_error_field_falls_back() {
        let err = ClientError::from_response(500, r#"{"message":"boom"}"#);
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(ClientError::from_response(404, "").to_string(), "HTTP 404");
    }

    #[test]
    fn validation_errors_display_their_message() {
        let err: ClientError = ValidationError::Selection("gender").into();
        assert_eq!(err.to_string(), "Please select a gender");
        assert!(err.is_local());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn missing_principal_asks_to_sign_in() {
        let err = ClientError::NotSignedIn(UserType::Clinic);
        assert_eq!(err.to_string(), "Please sign in with a clinic account");
        assert!(err.is_local());
        assert!(!err.is_unauthorized());
    }
}
