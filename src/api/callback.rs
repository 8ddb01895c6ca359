use axum::{Extension, extract::Query, response::Redirect};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{management::ensure_session, server::AppState, success, warning};

use super::Rejection;

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub async fn callback(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Result<Redirect, Rejection>) {
    let (jar, session_id) = ensure_session(jar);
    let result = complete_authorization(&state, &session_id, params).await;
    (jar, result)
}

/// Exchanges the authorization code and stores the token in the session.
///
/// Without a code the browser goes back to the landing page and the session
/// is left untouched. A failed exchange leaves the session untouched as well.
pub async fn complete_authorization(
    state: &AppState,
    session_id: &str,
    params: CallbackParams,
) -> Result<Redirect, Rejection> {
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        if let Some(error) = params.error {
            warning!(
                "Smartcar Connect returned {}: {}",
                error,
                params.error_description.as_deref().unwrap_or("no description")
            );
        }
        return Err(Rejection::Restart("/"));
    };

    let token = state.gateway.exchange_code(&code).await?;
    state
        .sessions
        .set_access_token(session_id, token.access_token)
        .await;

    success!("Exchanged authorization code for an access token");
    Ok(Redirect::to("/vehicles"))
}
