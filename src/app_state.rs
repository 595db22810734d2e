//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, auth::DEFAULT_COOKIE_DURATION, backend::Repository, timezone::get_timezone};

/// The state of the web server.
///
/// `R` is the backend the handlers read and write records through.
#[derive(Debug, Clone)]
pub struct AppState<R: Repository> {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which the session cookie is valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The base URL of the identity provider's sign-in and profile pages.
    pub identity_provider_url: String,

    /// The backend that stores earnings and expenses.
    pub repository: R,
}

impl<R: Repository> AppState<R> {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        repository: R,
        cookie_secret: &str,
        local_timezone: &str,
        identity_provider_url: &str,
    ) -> Result<Self, Error> {
        if get_timezone(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            identity_provider_url: identity_provider_url.trim_end_matches('/').to_owned(),
            repository,
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<R: Repository> FromRef<AppState<R>> for Key {
    fn from_ref(state: &AppState<R>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::{Error, backend::fake::FakeRepository};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            FakeRepository::new(),
            "secret",
            "Not/AZone",
            "https://accounts.example.com",
        );

        assert_eq!(
            result.map(|_| ()).unwrap_err(),
            Error::InvalidTimezoneError("Not/AZone".to_owned())
        );
    }

    #[test]
    fn trims_trailing_slash_from_identity_provider() {
        let state = AppState::new(
            FakeRepository::new(),
            "secret",
            "Etc/UTC",
            "https://accounts.example.com/",
        )
        .unwrap();

        assert_eq!(state.identity_provider_url, "https://accounts.example.com");
    }
}
