//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx, get_auth_callback, get_log_out, get_sign_in_page},
    backend::Repository,
    endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    glance::get_glance_page,
    home::get_home_page,
    ledger::{
        create_record_endpoint, delete_record_endpoint, get_ledger_page, update_record_endpoint,
    },
    record::{Earning, Expense},
    reports::get_report,
    settings::get_settings_page,
    support::{get_support_page, post_support_request},
    theme::toggle_theme,
};

/// Return a router with all the app's routes.
pub fn build_router<R: Repository>(state: AppState<R>) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(endpoints::AUTH_CALLBACK, get(get_auth_callback))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HOME_VIEW, get(get_home_page::<R>))
        .route(endpoints::GLANCE_VIEW, get(get_glance_page::<R>))
        .route(endpoints::EARNINGS_VIEW, get(get_ledger_page::<R, Earning>))
        .route(endpoints::EXPENSES_VIEW, get(get_ledger_page::<R, Expense>))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::SUPPORT_VIEW, get(get_support_page))
        .route(endpoints::REPORT, get(get_report::<R>))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes are called by htmx, so auth redirects must use HX-Redirect.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::EARNINGS_API,
                post(create_record_endpoint::<R, Earning>),
            )
            .route(
                endpoints::EARNING,
                put(update_record_endpoint::<R, Earning>)
                    .delete(delete_record_endpoint::<R, Earning>),
            )
            .route(
                endpoints::EXPENSES_API,
                post(create_record_endpoint::<R, Expense>),
            )
            .route(
                endpoints::EXPENSE,
                put(update_record_endpoint::<R, Expense>)
                    .delete(delete_record_endpoint::<R, Expense>),
            )
            .route(endpoints::THEME_API, post(toggle_theme))
            .route(endpoints::SUPPORT_API, post(post_support_request::<R>))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the home page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::HOME_VIEW)
}
