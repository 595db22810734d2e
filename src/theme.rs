//! The light and dark colour themes, remembered in a cookie.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use axum_htmx::HxRefresh;
use time::Duration;

/// The name of the cookie that stores the theme.
pub(crate) const COOKIE_THEME: &str = "theme";

const THEME_COOKIE_DURATION: Duration = Duration::days(365);

/// The colour theme pages are rendered in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The cookie value and ECharts theme name.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Read the theme from `jar`, defaulting to [Theme::Light].
    pub fn from_jar(jar: &CookieJar) -> Self {
        match jar.get(COOKIE_THEME).map(Cookie::value) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    fn to_cookie(self) -> Cookie<'static> {
        Cookie::build((COOKIE_THEME, self.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(THEME_COOKIE_DURATION)
            .build()
    }
}

impl<S> FromRequestParts<S> for Theme
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Theme::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}

/// Switch between the light and dark theme and ask htmx to reload the page.
pub async fn toggle_theme(jar: CookieJar) -> Response {
    let theme = Theme::from_jar(&jar).toggled();
    tracing::debug!("switching to the {} theme", theme.as_str());

    (jar.add(theme.to_cookie()), HxRefresh(true), ()).into_response()
}
