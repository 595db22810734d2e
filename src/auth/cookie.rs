//! Stores the session token in an encrypted cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use super::AuthSession;

pub(crate) const COOKIE_TOKEN: &str = "session_token";
/// The default duration for which the session cookie is valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::hours(12);

/// Add the session cookie holding `token` to the cookie jar.
///
/// The cookie expires `duration` from now.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    token: &str,
    duration: Duration,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, token.to_owned()))
            .expires(OffsetDateTime::now_utc() + duration)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}

/// Set the session cookie to an invalid value and set its max age to zero, which should delete
/// the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, ""))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}

/// The session stored in `jar`, if any.
pub(crate) fn get_session_from_cookie(jar: &PrivateCookieJar) -> Option<AuthSession> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|token| !token.is_empty())
        .map(AuthSession::new)
}
