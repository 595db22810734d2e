//! Full-page responses for missing pages and server failures.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A page explaining what went wrong and how the user might fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPage {
    /// The route or resource does not exist.
    NotFound,
    /// Something failed on the server.
    Internal { description: String, fix: String },
}

impl ErrorPage {
    /// The generic internal error page.
    pub fn internal() -> Self {
        Self::Internal {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ErrorPage::NotFound => StatusCode::NOT_FOUND,
            ErrorPage::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_html(self) -> Html<String> {
        let markup = match &self {
            ErrorPage::NotFound => error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the home page.",
            ),
            ErrorPage::Internal { description, fix } => {
                error_view("Internal Server Error", "500", description, fix)
            }
        };

        Html(markup.into_string())
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        (self.status(), self.into_html()).into_response()
    }
}

/// The fallback route handler.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}

/// Route handler for the generic error page.
pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::internal().into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{get_404_not_found, get_internal_server_error_page};
    use crate::test_utils::{assert_valid_html, parse_html_document};

    #[tokio::test]
    async fn not_found_page_has_404_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(document.html().contains("404"));
    }

    #[tokio::test]
    async fn error_page_has_500_status() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let document = parse_html_document(response).await;
        assert!(document.html().contains("Sorry, something went wrong."));
    }
}
