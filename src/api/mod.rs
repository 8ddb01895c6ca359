//! # API Module
//!
//! This module provides the HTTP route handlers of the demo flow. Each handler
//! resolves the browser's session from its cookie, calls into the Smartcar
//! gateway where needed, and either renders a page or redirects.
//!
//! ## Endpoints
//!
//! | Route | Handler | Renders |
//! |---|---|---|
//! | `GET /` | [`home`] | landing page with the Connect link |
//! | `GET /callback?code` | [`callback`] | redirect to `/vehicles` |
//! | `GET /vehicles` | [`vehicles`] | vehicle list |
//! | `POST /request` | [`request`] | result of one vehicle request |
//! | `GET /error?action&message` | [`error_page`] | error page |
//! | `GET /health` | [`health`] | JSON status |
//!
//! ## Error Handling
//!
//! Flow handlers return `Result<_, Rejection>`. A missing precondition sends
//! the browser back to an earlier step ([`Rejection::Restart`]); a failed
//! Smartcar call or a bad request type sends it to `/error` with the action
//! and message ([`Rejection::Failed`]). No handler error ever reaches the
//! server loop.
//!
//! Each handler is split into a thin axum wrapper and a plain async function
//! (`complete_authorization`, `list_vehicles`, `dispatch_request`,
//! `error_view`) that returns the view model, so the flow can be exercised
//! without HTTP.

mod callback;
mod error_page;
mod health;
mod home;
mod rejection;
mod request;
mod vehicles;

pub use callback::{CallbackParams, callback, complete_authorization};
pub use error_page::{ErrorParams, error_page, error_view};
pub use health::health;
pub use home::home;
pub use rejection::Rejection;
pub use request::{
    LOCK_CONFIRMATION, RequestForm, UNLOCK_CONFIRMATION, dispatch_request, perform, request,
};
pub use vehicles::{list_vehicles, vehicles};
