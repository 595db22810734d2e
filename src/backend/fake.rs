//! An in-memory stand-in for the backend, for handler tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde_json::{Value, json};
use time_tz::Tz;

use crate::{auth::AuthSession, record::RecordId};

use super::{FetchError, ReportType, Repository, Resource, SupportRequest, decode_records};

#[derive(Debug, Default)]
struct Store {
    records: HashMap<&'static str, Vec<Value>>,
    next_id: u32,
    support_requests: Vec<SupportRequest>,
    tokens: Vec<String>,
}

/// Keeps records as backend-shaped JSON, keyed by [Resource::PATH].
///
/// Clones share the same store, so a test can keep a copy to inspect what
/// the handlers did.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRepository {
    store: Arc<Mutex<Store>>,
    failure: Option<FetchError>,
    fetch_failures: HashMap<&'static str, FetchError>,
}

impl FakeRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_earnings(self, earnings: Vec<Value>) -> Self {
        self.with_records("/api/earning", earnings)
    }

    pub(crate) fn with_expenses(self, expenses: Vec<Value>) -> Self {
        self.with_records("/api/expense", expenses)
    }

    fn with_records(self, path: &'static str, records: Vec<Value>) -> Self {
        self.store
            .lock()
            .expect("fake store lock poisoned")
            .records
            .insert(path, records);
        self
    }

    /// Make every call fail with `error`.
    pub(crate) fn failing_with(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Make fetches of `T` fail with `error`. Other calls still succeed.
    pub(crate) fn failing_fetch_of<T: Resource>(mut self, error: FetchError) -> Self {
        self.fetch_failures.insert(T::PATH, error);
        self
    }

    /// The stored records of type `T` as JSON.
    pub(crate) fn records<T: Resource>(&self) -> Vec<Value> {
        self.store
            .lock()
            .expect("fake store lock poisoned")
            .records
            .get(T::PATH)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn support_requests(&self) -> Vec<SupportRequest> {
        self.store
            .lock()
            .expect("fake store lock poisoned")
            .support_requests
            .clone()
    }

    /// The session tokens of every call so far.
    pub(crate) fn tokens(&self) -> Vec<String> {
        self.store
            .lock()
            .expect("fake store lock poisoned")
            .tokens
            .clone()
    }

    fn begin(&self, session: &AuthSession) -> Result<std::sync::MutexGuard<'_, Store>, FetchError> {
        let mut store = self.store.lock().expect("fake store lock poisoned");
        store.tokens.push(session.token().to_owned());

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(store),
        }
    }
}

fn not_found(id: &RecordId) -> FetchError {
    FetchError::Status {
        status: 404,
        message: format!("No record with ID {id}"),
    }
}

fn has_id(record: &Value, id: &RecordId) -> bool {
    record.get("_id").and_then(Value::as_str) == Some(id.as_str())
}

impl Repository for FakeRepository {
    async fn fetch<T: Resource>(
        &self,
        session: &AuthSession,
        timezone: &'static Tz,
    ) -> Result<Vec<T>, FetchError> {
        let store = self.begin(session)?;

        if let Some(error) = self.fetch_failures.get(T::PATH) {
            return Err(error.clone());
        }

        let items = store
            .records
            .get(T::PATH)
            .cloned()
            .unwrap_or_default();

        Ok(decode_records(items, timezone))
    }

    async fn create<T: Resource>(
        &self,
        session: &AuthSession,
        payload: &T::Payload,
    ) -> Result<(), FetchError> {
        let mut record =
            serde_json::to_value(payload).map_err(|error| FetchError::Decode(error.to_string()))?;
        let mut store = self.begin(session)?;
        store.next_id += 1;
        let id = format!("created-{}", store.next_id);

        if let Some(fields) = record.as_object_mut() {
            fields.insert("_id".to_owned(), json!(id));
        }

        store.records.entry(T::PATH).or_default().push(record);

        Ok(())
    }

    async fn update<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
        payload: &T::Payload,
    ) -> Result<(), FetchError> {
        let mut record =
            serde_json::to_value(payload).map_err(|error| FetchError::Decode(error.to_string()))?;
        let mut store = self.begin(session)?;
        let existing = store
            .records
            .entry(T::PATH)
            .or_default()
            .iter_mut()
            .find(|record| has_id(record, id))
            .ok_or_else(|| not_found(id))?;

        if let Some(fields) = record.as_object_mut() {
            fields.insert("_id".to_owned(), json!(id.as_str()));
        }
        *existing = record;

        Ok(())
    }

    async fn delete<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
    ) -> Result<(), FetchError> {
        let mut store = self.begin(session)?;
        let records = store.records.entry(T::PATH).or_default();
        let count = records.len();
        records.retain(|record| !has_id(record, id));

        if records.len() == count {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn download_report(
        &self,
        session: &AuthSession,
        report: ReportType,
    ) -> Result<Vec<u8>, FetchError> {
        let _store = self.begin(session)?;

        Ok(format!("%PDF-1.4 {report}").into_bytes())
    }

    async fn send_support_request(
        &self,
        session: &AuthSession,
        request: &SupportRequest,
    ) -> Result<(), FetchError> {
        self.begin(session)?.support_requests.push(request.clone());

        Ok(())
    }
}
