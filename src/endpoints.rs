//! The paths of every page and API route the app serves.

/// The root path, redirects to the home page.
pub const ROOT: &str = "/";
/// The home page with recent records and the Financial Report charts.
pub const HOME_VIEW: &str = "/home";
/// The overview page with totals and distributions.
pub const GLANCE_VIEW: &str = "/glance";
/// The page listing earnings.
pub const EARNINGS_VIEW: &str = "/earnings";
/// The page listing expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for the theme and profile settings.
pub const SETTINGS_VIEW: &str = "/settings";
/// The page with the support request form.
pub const SUPPORT_VIEW: &str = "/support";
/// The page that sends the user to the identity provider.
pub const SIGN_IN_VIEW: &str = "/sign_in";
/// Where the identity provider sends the user back with a token.
pub const AUTH_CALLBACK: &str = "/auth/callback";
/// Ends the session.
pub const LOG_OUT: &str = "/log_out";
/// Downloads a PDF report.
pub const REPORT: &str = "/reports/{report_type}";
/// The generic error page.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// Static files such as CSS and JavaScript.
pub const STATIC: &str = "/static";

/// The route for creating earnings.
pub const EARNINGS_API: &str = "/api/earnings";
/// The route for updating and deleting a single earning.
pub const EARNING: &str = "/api/earnings/{id}";
/// The route for creating expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route for updating and deleting a single expense.
pub const EXPENSE: &str = "/api/expenses/{id}";
/// Toggles between the light and dark theme.
pub const THEME_API: &str = "/api/theme";
/// Sends a support request.
pub const SUPPORT_API: &str = "/api/support";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is the first brace-delimited segment, e.g. `{id}` in
/// `/api/earnings/{id}`. If there is no parameter, `endpoint_path` is returned
/// unchanged.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::HOME_VIEW);
        assert_endpoint_is_valid_uri(endpoints::GLANCE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EARNINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SUPPORT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SIGN_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::AUTH_CALLBACK);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::EARNINGS_API);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_API);
        assert_endpoint_is_valid_uri(endpoints::THEME_API);
        assert_endpoint_is_valid_uri(endpoints::SUPPORT_API);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::REPORT, "all"));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EARNING, "abc123"));
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::EXPENSE, "abc123"));
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(
            format_endpoint("/api/earnings/{id}", "65f1c0ffee"),
            "/api/earnings/65f1c0ffee"
        );
        assert_eq!(format_endpoint("/hello/{world}/bye", "1"), "/hello/1/bye");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/hello/world", "1"), "/hello/world");
    }
}
