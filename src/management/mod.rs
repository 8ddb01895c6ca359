mod cookies;
mod session;

pub use cookies::{SESSION_COOKIE_NAME, ensure_session, session_cookie, session_id};
pub use session::{Session, SessionStore, VehicleEntry};
