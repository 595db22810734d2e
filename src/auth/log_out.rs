//! Log-out route handler that invalidates the session cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::cookie::invalidate_session_cookie, endpoints};

/// Invalidate the session cookie and redirect the client to the sign-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    tracing::info!("user signed out");
    let jar = invalidate_session_cookie(jar);

    (jar, Redirect::to(endpoints::SIGN_IN_VIEW)).into_response()
}

/// Send the user through log out so they can sign in again, for when the
/// backend rejects their token.
pub fn redirect_to_log_out() -> Response {
    tracing::warn!("the backend rejected the session token, signing the user out");

    Redirect::to(endpoints::LOG_OUT).into_response()
}

#[cfg(test)]
mod log_out_tests {
    use axum::http::{StatusCode, header::SET_COOKIE};
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};

    use super::get_log_out;
    use crate::{
        auth::cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, set_session_cookie},
        endpoints,
        test_utils::get_header,
    };

    #[tokio::test]
    async fn log_out_invalidates_cookie_and_redirects() {
        let key = Key::from(&Sha512::digest("42"));
        let jar = set_session_cookie(PrivateCookieJar::new(key), "token", DEFAULT_COOKIE_DURATION);

        let response = get_log_out(jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::SIGN_IN_VIEW);

        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(COOKIE_TOKEN))
            .expect("no session cookie set");
        assert!(cookie.contains("Max-Age=0"));
    }
}
