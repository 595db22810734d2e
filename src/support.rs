//! The support page and the endpoint that forwards support requests to the backend.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    alert::Alert,
    auth::AuthSession,
    backend::{Repository, SupportRequest},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    theme::Theme,
};

/// The state needed to send support requests.
#[derive(Debug, Clone)]
pub struct SupportState<R: Repository> {
    /// The backend that emails the support team.
    pub repository: R,
}

impl<R: Repository> FromRef<AppState<R>> for SupportState<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }
}

fn text_input(name: &str, label: &str, type_: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                name=(name)
                id=(name)
                type=(type_)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn support_view(theme: Theme) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUPPORT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4"
            {
                h1 class="text-2xl font-bold text-center" { "Contact Support" }

                p class="text-center text-gray-600 dark:text-gray-300"
                {
                    "Found a bug or have a question? Send us a message and we will get back to you by email."
                }

                form
                    id="support-form"
                    hx-post=(endpoints::SUPPORT_API)
                    hx-target-error="#alert-container"
                    hx-swap="none"
                    class="space-y-4 md:space-y-6"
                {
                    (text_input("name", "Name", "text"))
                    (text_input("email", "Email", "email"))
                    (text_input("subject", "Subject", "text"))

                    div
                    {
                        label for="message" class=(FORM_LABEL_STYLE) { "Message" }

                        textarea
                            name="message"
                            id="message"
                            rows="6"
                            required
                            class=(FORM_TEXT_INPUT_STYLE)
                        {}
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Send" }
                }
            }
        }
    };

    base("Support", theme, &[], &content)
}

/// Display the support request form.
pub async fn get_support_page(theme: Theme) -> Response {
    support_view(theme).into_response()
}

/// Trim every field and check that none are blank and the email looks like one.
fn validate(request: SupportRequest) -> Result<SupportRequest, Error> {
    let request = SupportRequest {
        name: request.name.trim().to_owned(),
        email: request.email.trim().to_owned(),
        subject: request.subject.trim().to_owned(),
        message: request.message.trim().to_owned(),
    };

    let missing: Vec<&str> = [
        ("name", &request.name),
        ("email", &request.email),
        ("subject", &request.subject),
        ("message", &request.message),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(Error::InvalidSupportRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    if !request.email.contains('@') {
        return Err(Error::InvalidSupportRequest(format!(
            "\"{}\" is not a valid email address",
            request.email
        )));
    }

    Ok(request)
}

/// Forward a support request to the backend and show whether it was sent.
pub async fn post_support_request<R: Repository>(
    State(state): State<SupportState<R>>,
    session: AuthSession,
    Form(request): Form<SupportRequest>,
) -> Response {
    let request = match validate(request) {
        Ok(request) => request,
        Err(error) => return error.into_alert_response(),
    };

    match state
        .repository
        .send_support_request(&session, &request)
        .await
    {
        Ok(()) => {
            tracing::info!("sent support request \"{}\"", request.subject);

            Alert::Success {
                message: "Message sent".to_owned(),
                details: "Thanks for getting in touch. We will reply by email.".to_owned(),
            }
            .into_response()
        }
        Err(error) if error.is_unauthorized() => {
            (HxRedirect(endpoints::LOG_OUT.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => {
            tracing::error!("could not send support request: {error}");
            Error::from(error).into_alert_response()
        }
    }
}
