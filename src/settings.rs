//! The settings page: theme toggle and a link to the user's profile.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    backend::Repository,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    theme::Theme,
};

/// The state needed for the settings page.
#[derive(Debug, Clone)]
pub struct SettingsState {
    /// The base URL of the identity provider, which hosts the profile page.
    pub identity_provider_url: String,
}

impl<R: Repository> FromRef<AppState<R>> for SettingsState {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            identity_provider_url: state.identity_provider_url.clone(),
        }
    }
}

fn settings_view(profile_url: &str, theme: Theme) -> Markup {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();
    let toggle_label = match theme {
        Theme::Light => "Switch to dark mode",
        Theme::Dark => "Switch to light mode",
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-6"
            {
                h1 class="text-2xl font-bold text-center" { "Settings" }

                section class=(CARD_STYLE) id="appearance"
                {
                    h2 class="text-lg font-semibold mb-2" { "Appearance" }
                    p class="mb-4 text-sm text-gray-600 dark:text-gray-300"
                    {
                        "You are using the " (theme.as_str()) " theme."
                    }

                    button
                        id="theme-toggle"
                        type="button"
                        hx-post=(endpoints::THEME_API)
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        (toggle_label)
                    }
                }

                section class=(CARD_STYLE) id="profile"
                {
                    h2 class="text-lg font-semibold mb-2" { "Profile" }
                    p class="mb-4 text-sm text-gray-600 dark:text-gray-300"
                    {
                        "Your name, email and password are managed by your account provider."
                    }

                    a href=(profile_url) class=(BUTTON_SECONDARY_STYLE) id="profile-link"
                    {
                        "Manage account"
                    }
                }
            }
        }
    };

    base("Settings", theme, &[], &content)
}

/// Display the settings page.
pub async fn get_settings_page(State(state): State<SettingsState>, theme: Theme) -> Response {
    let profile_url = format!("{}/user-profile", state.identity_provider_url);

    settings_view(&profile_url, theme).into_response()
}
