use serde::Deserialize;
use thiserror::Error;

/// Message shown when Smartcar fails without saying why.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Action label attached to a failed authorization code exchange.
pub const EXCHANGE_ACTION: &str = "exchanging authorization code";

/// A failed call into the Smartcar gateway.
///
/// Both variants carry the action that was attempted and a human readable
/// message so the handler layer can forward them to the error page as is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The authorization code could not be exchanged for an access token.
    #[error("token exchange failed: {message}")]
    Exchange { message: String },

    /// A vehicle listing, data or action call failed.
    #[error("{action} failed: {message}")]
    Api { action: String, message: String },
}

impl GatewayError {
    pub fn exchange(message: Option<String>) -> Self {
        GatewayError::Exchange {
            message: message_or_default(message),
        }
    }

    pub fn api(action: impl Into<String>, message: Option<String>) -> Self {
        GatewayError::Api {
            action: action.into(),
            message: message_or_default(message),
        }
    }

    pub fn action(&self) -> &str {
        match self {
            GatewayError::Exchange { .. } => EXCHANGE_ACTION,
            GatewayError::Api { action, .. } => action,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Exchange { message } | GatewayError::Api { message, .. } => message,
        }
    }
}

fn message_or_default(message: Option<String>) -> String {
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamError {
    description: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

/// Extracts the human readable message from a Smartcar error body.
///
/// Smartcar's v2 errors use `description`, older ones `message`, and the
/// OAuth endpoints `error_description`. Returns `None` when the body is not
/// JSON or carries none of them.
pub fn parse_upstream_message(body: &str) -> Option<String> {
    let err: UpstreamError = serde_json::from_str(body).ok()?;
    err.description
        .or(err.message)
        .or(err.error_description)
        .filter(|m| !m.trim().is_empty())
}
