use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::utils;

pub const SESSION_COOKIE_NAME: &str = "smartcar_demo_session";

/// Create the session cookie. It lives as long as the browser session.
pub fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Get the session id from the request cookies.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the browser's session id, issuing a fresh one (and the cookie
/// carrying it) when the request has none.
pub fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    match session_id(&jar) {
        Some(id) => (jar, id),
        None => {
            let id = utils::generate_session_id();
            (jar.add(session_cookie(&id)), id)
        }
    }
}
