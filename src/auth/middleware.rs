//! Authentication middleware that finds the session token and handles redirects.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    TypedHeader,
    extract::{PrivateCookieJar, cookie::Key},
    headers::{Authorization, authorization::Bearer},
};
use axum_htmx::HxRedirect;

use crate::{AppState, auth::cookie::get_session_from_cookie, backend::Repository, endpoints};

use super::AuthSession;

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for decrypting private cookies.
    pub cookie_key: Key,
}

impl<R: Repository> FromRef<AppState<R>> for AuthState {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Find the session in the request, preferring a bearer token over the cookie.
async fn find_session(parts: &mut Parts, state: &AuthState) -> Option<AuthSession> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        let token = bearer.token().trim();

        if !token.is_empty() {
            return Some(AuthSession::new(token));
        }
    }

    let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(error) => match error {},
    };

    get_session_from_cookie(&jar)
}

#[inline]
async fn auth_guard_internal(
    state: AuthState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let Some(session) = find_session(&mut parts, &state).await else {
        tracing::info!(
            "no session for {}, redirecting to sign in page",
            parts.uri.path()
        );
        return get_redirect(endpoints::SIGN_IN_VIEW);
    };

    parts.extensions.insert(session);

    next.run(Request::from_parts(parts, body)).await
}

/// Middleware function that checks for a session token in the `Authorization`
/// header or the session cookie.
///
/// The [AuthSession] is placed into the request extensions and the request
/// executed normally if a token was found, otherwise a redirect to the sign-in
/// page is returned.
///
/// **Note**: Route handlers can use the function argument `session: AuthSession` to receive the session.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Like [auth_guard], but responds with an HTMX redirect for requests made by htmx.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Router,
        extract::State,
        middleware,
        routing::{get, post},
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use axum_test::TestServer;
    use sha2::{Digest, Sha512};

    use crate::{
        auth::{
            AuthSession, AuthState, COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, auth_guard,
            auth_guard_hx, cookie::set_session_cookie,
        },
        endpoints,
    };

    async fn echo_token(session: AuthSession) -> String {
        session.token().to_owned()
    }

    async fn stub_sign_in(State(state): State<AuthState>) -> PrivateCookieJar {
        set_session_cookie(
            PrivateCookieJar::new(state.cookie_key),
            "cookie-token",
            DEFAULT_COOKIE_DURATION,
        )
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";
    const TEST_API_ROUTE: &str = "/api/protected";

    fn get_test_server() -> TestServer {
        let state = AuthState {
            cookie_key: Key::from(&Sha512::digest("nafstenoas")),
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(echo_token))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .merge(
                Router::new()
                    .route(TEST_API_ROUTE, post(echo_token))
                    .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
            )
            .route("/stub_sign_in", get(stub_sign_in))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn get_protected_route_with_session_cookie() {
        let server = get_test_server();
        let response = server.get("/stub_sign_in").await;
        response.assert_status_ok();
        let token_cookie = response.cookie(COOKIE_TOKEN);

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        response.assert_text("cookie-token");
    }

    #[tokio::test]
    async fn get_protected_route_with_bearer_token() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("authorization", "Bearer header-token")
            .await;

        response.assert_status_ok();
        response.assert_text("header-token");
    }

    #[tokio::test]
    async fn get_protected_route_with_no_session_redirects_to_sign_in() {
        let server = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::SIGN_IN_VIEW);
    }

    #[tokio::test]
    async fn tampered_cookie_redirects_to_sign_in() {
        let server = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("cookie", format!("{COOKIE_TOKEN}=not-encrypted"))
            .await;

        response.assert_status_see_other();
    }

    #[tokio::test]
    async fn api_route_with_no_session_gets_hx_redirect() {
        let server = get_test_server();

        let response = server
            .post(TEST_API_ROUTE)
            .add_header("HX-Request", "true")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::SIGN_IN_VIEW);
    }
}
