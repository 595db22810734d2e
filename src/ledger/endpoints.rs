//! The endpoints for creating, updating and deleting records.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    auth::AuthSession,
    backend::{FetchError, Repository},
    endpoints,
    record::{Draft, RecordId},
};

use super::{
    Ledger, LedgerState,
    form::{FormTarget, record_form},
};

/// Re-render the form with `error` so the user can fix their input.
fn form_error_response<L: Ledger>(
    status: StatusCode,
    target: FormTarget<'_>,
    draft: &L::Draft,
    error: &str,
) -> Response {
    (status, record_form::<L>(target, draft, Some(error))).into_response()
}

/// The response for a failed create or update.
fn backend_error_response<L: Ledger>(
    error: FetchError,
    target: FormTarget<'_>,
    draft: &L::Draft,
) -> Response {
    if error.is_unauthorized() {
        tracing::warn!("backend rejected the session token, logging out");
        return (HxRedirect(endpoints::LOG_OUT.to_owned()), StatusCode::OK).into_response();
    }

    let status = match error {
        FetchError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };

    form_error_response::<L>(status, target, draft, &error.to_string())
}

/// A route handler for creating a record of ledger `L`, redirects to the list
/// page on success.
///
/// Invalid input re-renders the form with the user's input and an error.
pub async fn create_record_endpoint<R: Repository, L: Ledger>(
    State(state): State<LedgerState<R>>,
    session: AuthSession,
    Form(draft): Form<L::Draft>,
) -> Response {
    let payload = match draft.validate() {
        Ok(payload) => payload,
        Err(error) => {
            return form_error_response::<L>(
                StatusCode::UNPROCESSABLE_ENTITY,
                FormTarget::Create,
                &draft,
                &error.to_string(),
            );
        }
    };

    match state.repository.create::<L>(&session, &payload).await {
        Ok(()) => (HxRedirect(L::VIEW.to_owned()), StatusCode::SEE_OTHER).into_response(),
        Err(error) => {
            tracing::error!("could not create {}: {error}", L::SINGULAR);
            backend_error_response::<L>(error, FormTarget::Create, &draft)
        }
    }
}

/// A route handler for replacing the record `id` of ledger `L`, redirects to
/// the list page on success.
pub async fn update_record_endpoint<R: Repository, L: Ledger>(
    State(state): State<LedgerState<R>>,
    session: AuthSession,
    Path(id): Path<String>,
    Form(draft): Form<L::Draft>,
) -> Response {
    let id = RecordId::new(id);
    let target = FormTarget::Edit(&id);

    let payload = match draft.validate() {
        Ok(payload) => payload,
        Err(error) => {
            return form_error_response::<L>(
                StatusCode::UNPROCESSABLE_ENTITY,
                target,
                &draft,
                &error.to_string(),
            );
        }
    };

    match state.repository.update::<L>(&session, &id, &payload).await {
        Ok(()) => (HxRedirect(L::VIEW.to_owned()), StatusCode::SEE_OTHER).into_response(),
        Err(error) => {
            tracing::error!("could not update {} {id}: {error}", L::SINGULAR);
            backend_error_response::<L>(error, target, &draft)
        }
    }
}

/// A route handler for deleting the record `id` of ledger `L`, redirects to
/// the list page on success and responds with an alert on failure.
pub async fn delete_record_endpoint<R: Repository, L: Ledger>(
    State(state): State<LedgerState<R>>,
    session: AuthSession,
    Path(id): Path<String>,
) -> Response {
    let id = RecordId::new(id);

    match state.repository.delete::<L>(&session, &id).await {
        Ok(()) => (HxRedirect(L::VIEW.to_owned()), StatusCode::SEE_OTHER).into_response(),
        Err(error) if error.is_unauthorized() => {
            (HxRedirect(endpoints::LOG_OUT.to_owned()), StatusCode::OK).into_response()
        }
        Err(error) => {
            tracing::error!("could not delete {} {id}: {error}", L::SINGULAR);
            Error::from(error).into_alert_response()
        }
    }
}
