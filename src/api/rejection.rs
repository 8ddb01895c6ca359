use axum::response::{IntoResponse, Redirect, Response};

use crate::{smartcar::GatewayError, utils, warning};

/// Why a flow route did not render its page.
///
/// Every variant turns into a redirect: either back to an earlier step of the
/// flow, or to the error page carrying the failed action and its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A precondition is missing (no code, no token, unknown vehicle).
    Restart(&'static str),
    /// A Smartcar call failed or the caller sent something unusable.
    Failed { action: String, message: String },
}

impl Rejection {
    pub fn failed(action: impl Into<String>, message: impl Into<String>) -> Self {
        Rejection::Failed {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Where the browser is sent.
    pub fn location(&self) -> String {
        match self {
            Rejection::Restart(path) => (*path).to_string(),
            Rejection::Failed { action, message } => utils::error_redirect_url(action, message),
        }
    }
}

impl From<GatewayError> for Rejection {
    fn from(err: GatewayError) -> Self {
        warning!("Smartcar request failed while {}: {}", err.action(), err.message());
        Rejection::failed(err.action(), err.message())
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        Redirect::to(&self.location()).into_response()
    }
}
