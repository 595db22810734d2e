//! Alert messages for telling the user whether an action worked.
//!
//! Alerts are swapped into the `#alert-container` element that [crate::html::base]
//! puts at the bottom of every page.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::Success { message, .. }
            | Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Success { details, .. } | Alert::Error { details, .. }
                if !details.is_empty() =>
            {
                Some(details)
            }
            _ => None,
        }
    }

    /// Render the alert without the surrounding container.
    pub fn into_markup(self) -> Markup {
        let (container_style, title) = if self.is_error() {
            (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800",
                "Error",
            )
        } else {
            (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 border border-green-300 dark:border-green-800",
                "Success",
            )
        };

        html! {
            div class=(container_style) role="alert" data-alert-kind=(title.to_lowercase())
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        span class="sr-only" { (title) }
                        p class="font-semibold" { (self.message()) }

                        @if let Some(details) = self.details() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap into the alert container.
    pub fn into_html(self) -> Html<String> {
        let markup = html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_markup())
            }
        };

        Html(markup.into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    fn render(alert: Alert) -> Html {
        Html::parse_fragment(&alert.into_html().0)
    }

    #[test]
    fn error_alert_shows_message_and_details() {
        let document = render(Alert::Error {
            message: "Could not save".to_owned(),
            details: "The server is down.".to_owned(),
        });

        let alert = document
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("no alert element");
        let text = alert.text().collect::<String>();

        assert_eq!(alert.value().attr("data-alert-kind"), Some("error"));
        assert!(text.contains("Could not save"));
        assert!(text.contains("The server is down."));
    }

    #[test]
    fn simple_success_alert_has_no_details_paragraph() {
        let document = render(Alert::SuccessSimple {
            message: "Deleted".to_owned(),
        });

        let alert = document
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("no alert element");
        let paragraphs = alert.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(alert.value().attr("data-alert-kind"), Some("success"));
        assert_eq!(paragraphs, 1);
    }

    #[test]
    fn alert_swaps_into_container() {
        let document = render(Alert::ErrorSimple {
            message: "Oops".to_owned(),
        });

        let container = document
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("no alert container");

        assert_eq!(container.value().attr("hx-swap-oob"), Some("true"));
    }
}
