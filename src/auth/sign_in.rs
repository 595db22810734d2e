//! The sign-in page and the callback the identity provider returns the user to.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState,
    auth::cookie::{get_session_from_cookie, set_session_cookie},
    backend::Repository,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, base},
    theme::Theme,
};

/// The state needed for signing in.
#[derive(Debug, Clone)]
pub struct SignInState {
    /// The base URL of the identity provider.
    pub identity_provider_url: String,
    /// The duration for which the session cookie is valid.
    pub cookie_duration: Duration,
}

impl<R: Repository> FromRef<AppState<R>> for SignInState {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            identity_provider_url: state.identity_provider_url.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

fn sign_in_view(identity_provider_url: &str, theme: Theme) -> Markup {
    let sign_in_url = format!("{identity_provider_url}/sign-in");
    let sign_up_url = format!("{identity_provider_url}/sign-up");

    let content = html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto min-h-screen"
        {
            div
                class="w-full bg-white rounded-lg shadow dark:border sm:max-w-md
                dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-6 sm:p-8 text-gray-900 dark:text-white"
                {
                    h1 class="text-2xl font-bold text-center"
                    {
                        "Welcome! Please sign in or sign up to continue."
                    }

                    p class="text-center text-gray-600 dark:text-gray-300"
                    {
                        "You will be sent to our identity provider and brought back here once you are signed in."
                    }

                    div class="flex gap-4"
                    {
                        a href=(sign_up_url) class=(BUTTON_SECONDARY_STYLE) id="sign-up"
                        {
                            "Sign Up"
                        }

                        a href=(sign_in_url) class=(BUTTON_PRIMARY_STYLE) id="sign-in"
                        {
                            "Sign In"
                        }
                    }
                }
            }
        }
    };

    base("Sign In", theme, &[], &content)
}

/// Display the sign-in page, or go to the home page if already signed in.
pub async fn get_sign_in_page(
    State(state): State<SignInState>,
    theme: Theme,
    jar: PrivateCookieJar,
) -> Response {
    if get_session_from_cookie(&jar).is_some() {
        return Redirect::to(endpoints::HOME_VIEW).into_response();
    }

    sign_in_view(&state.identity_provider_url, theme).into_response()
}

/// The query string the identity provider sends with the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// Store the token from the identity provider in the session cookie and go to
/// the home page.
///
/// Without a token the user is sent back to the sign-in page.
pub async fn get_auth_callback(
    State(state): State<SignInState>,
    jar: PrivateCookieJar,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let token = query.token.unwrap_or_default();
    let token = token.trim();

    if token.is_empty() {
        tracing::warn!("sign in callback did not include a token");
        return Redirect::to(endpoints::SIGN_IN_VIEW).into_response();
    }

    tracing::info!("user signed in");
    let jar = set_session_cookie(jar, token, state.cookie_duration);

    (jar, Redirect::to(endpoints::HOME_VIEW)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use scraper::Selector;
    use sha2::{Digest, Sha512};
    use time::Duration;

    use super::{CallbackQuery, SignInState, get_auth_callback, get_sign_in_page};
    use crate::{
        auth::cookie::{COOKIE_TOKEN, set_session_cookie},
        endpoints,
        test_utils::{assert_valid_html, get_header, parse_html_document},
        theme::Theme,
    };

    fn state() -> SignInState {
        SignInState {
            identity_provider_url: "https://accounts.example.com".to_owned(),
            cookie_duration: Duration::hours(1),
        }
    }

    fn jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::from(&Sha512::digest("sign in tests")))
    }

    #[tokio::test]
    async fn sign_in_page_links_to_identity_provider() {
        let response = get_sign_in_page(State(state()), Theme::Light, jar()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let link = document
            .select(&Selector::parse("a#sign-in").unwrap())
            .next()
            .expect("no sign in link");
        assert_eq!(
            link.value().attr("href"),
            Some("https://accounts.example.com/sign-in")
        );
    }

    #[tokio::test]
    async fn sign_in_page_redirects_when_signed_in() {
        let jar = set_session_cookie(jar(), "token", Duration::hours(1));

        let response = get_sign_in_page(State(state()), Theme::Light, jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::HOME_VIEW);
    }

    #[tokio::test]
    async fn callback_sets_cookie_and_redirects_home() {
        let query = CallbackQuery {
            token: Some("token-from-provider".to_owned()),
        };

        let response = get_auth_callback(State(state()), jar(), Query(query)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::HOME_VIEW);
        let set_cookie = get_header(&response, "set-cookie");
        assert!(set_cookie.starts_with(&format!("{COOKIE_TOKEN}=")));
        assert!(!set_cookie.contains("token-from-provider"));
    }

    #[tokio::test]
    async fn callback_without_token_goes_back_to_sign_in() {
        let response =
            get_auth_callback(State(state()), jar(), Query(CallbackQuery::default())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::SIGN_IN_VIEW);
    }
}
