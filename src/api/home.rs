use axum::{Extension, response::Html};
use axum_extra::extract::CookieJar;

use crate::{management::ensure_session, server::AppState, views::HomeView};

pub async fn home(
    Extension(state): Extension<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, session_id) = ensure_session(jar);

    let view = HomeView {
        auth_url: state.gateway.authorization_url(),
        connected: state.sessions.access_token(&session_id).await.is_some(),
    };

    (jar, view.render())
}
