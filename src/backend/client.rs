//! The HTTP client for the real backend.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use time_tz::Tz;

use crate::{auth::AuthSession, record::RecordId};

use super::{FetchError, ReportType, Repository, Resource, SupportRequest, decode_records};

const SUPPORT_PATH: &str = "/sendMail/support";
const REPORT_PATH: &str = "/pdf";

/// Calls the backend REST API over HTTP with the session's bearer token.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The URL of record `id`, with the id percent-encoded.
    ///
    /// Ids that cannot be a single path segment are treated as missing.
    fn item_url<T: Resource>(&self, id: &RecordId) -> Result<String, FetchError> {
        let segment = id.url_segment().ok_or_else(|| FetchError::Status {
            status: 404,
            message: format!("No record with ID {id}"),
        })?;

        Ok(format!("{}{}/{segment}", self.base_url, T::PATH))
    }
}

/// The error body the backend sends with failed requests.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn send(request: RequestBuilder, session: &AuthSession) -> Result<Response, FetchError> {
    let response = request
        .bearer_auth(session.token())
        .send()
        .await
        .map_err(|error| FetchError::Network(error.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("The server responded with {status}"));

    tracing::warn!("backend request failed with {status}: {message}");

    Err(FetchError::Status {
        status: status.as_u16(),
        message,
    })
}

impl Repository for BackendClient {
    async fn fetch<T: Resource>(
        &self,
        session: &AuthSession,
        timezone: &'static Tz,
    ) -> Result<Vec<T>, FetchError> {
        let response = send(self.http.get(self.url(T::PATH)), session).await?;
        let items: Vec<Value> = response
            .json()
            .await
            .map_err(|error| FetchError::Decode(error.to_string()))?;

        tracing::debug!("fetched {} {}", items.len(), T::NAME);

        Ok(decode_records(items, timezone))
    }

    async fn create<T: Resource>(
        &self,
        session: &AuthSession,
        payload: &T::Payload,
    ) -> Result<(), FetchError> {
        send(self.http.post(self.url(T::PATH)).json(payload), session).await?;
        tracing::info!("created one of {}", T::NAME);

        Ok(())
    }

    async fn update<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
        payload: &T::Payload,
    ) -> Result<(), FetchError> {
        send(self.http.put(self.item_url::<T>(id)?).json(payload), session).await?;
        tracing::info!("updated {} {id}", T::NAME);

        Ok(())
    }

    async fn delete<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
    ) -> Result<(), FetchError> {
        send(self.http.delete(self.item_url::<T>(id)?), session).await?;
        tracing::info!("deleted {} {id}", T::NAME);

        Ok(())
    }

    async fn download_report(
        &self,
        session: &AuthSession,
        report: ReportType,
    ) -> Result<Vec<u8>, FetchError> {
        let url = self.url(&format!("{REPORT_PATH}/{report}"));
        let response = send(self.http.get(url), session).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|error| FetchError::Network(error.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn send_support_request(
        &self,
        session: &AuthSession,
        request: &SupportRequest,
    ) -> Result<(), FetchError> {
        send(self.http.post(self.url(SUPPORT_PATH)).json(request), session).await?;
        tracing::info!("sent support request \"{}\"", request.subject);

        Ok(())
    }
}
