//! Spendwise is a web app for tracking personal earnings and expenses.
//!
//! This library serves HTML pages for a REST backend that stores the records.
//! Records are grouped into weekly and daily buckets for the selected month,
//! summed by category and payment method for the distribution charts, and
//! listed with category filters and sort orders.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod backend;
mod buckets;
mod charts;
mod distribution;
mod endpoints;
mod error;
mod error_page;
mod filters;
mod glance;
mod home;
mod html;
mod ledger;
mod logging;
mod modal;
mod navigation;
mod record;
mod reports;
mod routing;
mod settings;
mod support;
mod taxonomy;
mod theme;
mod time_selection;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use backend::{BackendClient, FetchError, Repository};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
