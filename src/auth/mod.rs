//! Sessions issued by the external identity provider.

mod cookie;
mod log_out;
mod middleware;
mod session;
mod sign_in;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use log_out::{get_log_out, redirect_to_log_out};
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub use session::AuthSession;
pub use sign_in::{get_auth_callback, get_sign_in_page};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_session_cookie};
