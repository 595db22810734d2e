//! Downloads of the PDF reports the backend renders.

use axum::{
    extract::{FromRef, Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    auth::{AuthSession, redirect_to_log_out},
    backend::{ReportType, Repository},
};

/// The state needed for downloading reports.
#[derive(Debug, Clone)]
pub struct ReportState<R: Repository> {
    /// The backend that renders the reports.
    pub repository: R,
}

impl<R: Repository> FromRef<AppState<R>> for ReportState<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            repository: state.repository.clone(),
        }
    }
}

/// Fetch the PDF for `report_type` and send it to the browser as a download.
///
/// # Errors
/// Returns [Error::NotFound] for an unknown report type and [Error::Fetch] if
/// the backend could not render the report.
pub async fn get_report<R: Repository>(
    State(state): State<ReportState<R>>,
    session: AuthSession,
    Path(report_type): Path<String>,
) -> Result<Response, Error> {
    let report: ReportType = report_type
        .parse()
        .inspect_err(|error| tracing::warn!("{error}"))
        .map_err(|_| Error::NotFound)?;

    let pdf = match state.repository.download_report(&session, report).await {
        Ok(pdf) => pdf,
        Err(error) if error.is_unauthorized() => return Ok(redirect_to_log_out()),
        Err(error) => {
            tracing::error!("could not download the {report} report: {error}");
            return Err(error.into());
        }
    };

    let disposition = format!("attachment; filename=\"{}\"", report.file_name());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::to_bytes,
        extract::{Path, State},
        http::StatusCode,
    };

    use super::{ReportState, get_report};
    use crate::{
        Error,
        auth::AuthSession,
        backend::{FetchError, fake::FakeRepository},
        endpoints,
        test_utils::{assert_content_type, get_header},
    };

    fn state(repository: FakeRepository) -> State<ReportState<FakeRepository>> {
        State(ReportState { repository })
    }

    #[tokio::test]
    async fn downloads_pdf_as_attachment() {
        let response = get_report(
            state(FakeRepository::new()),
            AuthSession::new("token"),
            Path("expenses".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "application/pdf");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"expenses-report.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"%PDF-1.4 expenses");
    }

    #[tokio::test]
    async fn unknown_report_type_is_not_found() {
        let repository = FakeRepository::new();

        let result = get_report(
            state(repository.clone()),
            AuthSession::new("token"),
            Path("taxes".to_owned()),
        )
        .await;

        assert_eq!(result.map(|_| ()), Err(Error::NotFound));
        assert!(repository.tokens().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_an_error() {
        let error = FetchError::Status {
            status: 500,
            message: "PDF renderer crashed".to_owned(),
        };

        let result = get_report(
            state(FakeRepository::new().failing_with(error.clone())),
            AuthSession::new("token"),
            Path("all".to_owned()),
        )
        .await;

        assert_eq!(result.map(|_| ()), Err(Error::Fetch(error)));
    }

    #[tokio::test]
    async fn expired_session_redirects_to_log_out() {
        let repository = FakeRepository::new().failing_with(FetchError::Status {
            status: 401,
            message: "Unauthenticated".to_owned(),
        });

        let response = get_report(
            state(repository),
            AuthSession::new("token"),
            Path("all".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(get_header(&response, "location"), endpoints::LOG_OUT);
    }
}
