//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, backend::FetchError, error_page::ErrorPage, time_selection::TimeSelectionError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A call to the backend failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The requested year or month is out of range.
    #[error(transparent)]
    InvalidTimeSelection(#[from] TimeSelectionError),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The support request form was incomplete or invalid.
    #[error("{0}")]
    InvalidSupportRequest(String),
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Could not get local timezone \"{timezone}\". Check your server settings and \
        ensure the timezone has been set to valid, canonical timezone string"
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => ErrorPage::Internal {
                description: "Invalid Timezone Settings".to_owned(),
                fix: invalid_timezone_fix(&timezone),
            }
            .into_response(),
            Error::InvalidTimeSelection(error) => (
                StatusCode::BAD_REQUEST,
                ErrorPage::Internal {
                    description: "Invalid date selection".to_owned(),
                    fix: format!("{error}. Pick another month or year."),
                }
                .into_html(),
            )
                .into_response(),
            Error::Fetch(error) if error.is_unauthorized() => (
                StatusCode::UNAUTHORIZED,
                ErrorPage::Internal {
                    description: "Your session has expired".to_owned(),
                    fix: "Log out and sign in again to continue.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            Error::Fetch(error) => ErrorPage::Internal {
                description: "Could not reach the server".to_owned(),
                fix: error.to_string(),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::internal().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: invalid_timezone_fix(&timezone),
                },
            ),
            Error::Fetch(FetchError::Status { status: 404, .. }) | Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Record not found".to_owned(),
                    details: "The record could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::Fetch(error) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The server could not complete the request".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::InvalidSupportRequest(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Could not send your message".to_owned(),
                    details,
                },
            ),
            Error::InvalidTimeSelection(error) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.to_string(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
