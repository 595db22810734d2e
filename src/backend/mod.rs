//! Access to the REST backend that stores earnings and expenses, renders PDF
//! reports and sends support emails.
//!
//! Handlers talk to the backend through the [Repository] trait. The server
//! uses [BackendClient]; tests use an in-memory fake.

mod client;
#[cfg(test)]
pub(crate) mod fake;

use std::{fmt::Display, future::Future, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use time_tz::Tz;

use crate::{
    auth::AuthSession,
    record::{Earning, Expense, NewEarning, NewExpense, RawEarning, RawExpense, RecordId},
};

pub use client::BackendClient;

/// Errors from calls to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("Could not reach the server: {0}")]
    Network(String),

    /// The backend answered with an error status. `message` is the backend's
    /// own message when it sent one.
    #[error("{message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// A message suitable for showing to the user.
        message: String,
    },

    /// The response body was not in the expected format.
    #[error("The server sent a response that could not be read: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether the backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Status { status: 401, .. })
    }
}

/// A kind of record stored by the backend under its own path.
pub trait Resource: Sized + Send + Sync + 'static {
    /// The collection path, e.g. `/api/earning`.
    const PATH: &'static str;

    /// The plural name used in messages, e.g. "earnings".
    const NAME: &'static str;

    /// The record as sent by the backend.
    type Raw: DeserializeOwned;

    /// The body sent to create or update a record.
    type Payload: Serialize + Send + Sync;

    /// Convert a raw record, interpreting date-times in `timezone`.
    fn from_raw(raw: Self::Raw, timezone: &Tz) -> Self;
}

impl Resource for Earning {
    const PATH: &'static str = "/api/earning";
    const NAME: &'static str = "earnings";

    type Raw = RawEarning;
    type Payload = NewEarning;

    fn from_raw(raw: RawEarning, timezone: &Tz) -> Self {
        raw.normalize(timezone)
    }
}

impl Resource for Expense {
    const PATH: &'static str = "/api/expense";
    const NAME: &'static str = "expenses";

    type Raw = RawExpense;
    type Payload = NewExpense;

    fn from_raw(raw: RawExpense, timezone: &Tz) -> Self {
        raw.normalize(timezone)
    }
}

/// Which records a PDF report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Earnings,
    Expenses,
    All,
}

impl ReportType {
    /// Every report type, in the order shown on the home page.
    pub const ALL: [ReportType; 3] = [ReportType::Earnings, ReportType::Expenses, ReportType::All];

    /// The path segment used by the backend and by the report route.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Earnings => "earnings",
            ReportType::Expenses => "expenses",
            ReportType::All => "all",
        }
    }

    /// A human readable name, e.g. "Earnings Report".
    pub fn title(self) -> &'static str {
        match self {
            ReportType::Earnings => "Earnings Report",
            ReportType::Expenses => "Expenses Report",
            ReportType::All => "Full Report",
        }
    }

    /// The file name offered to the browser for the downloaded PDF.
    pub fn file_name(self) -> String {
        format!("{}-report.pdf", self.as_str())
    }
}

impl Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned for an unknown report type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a report type")]
pub struct ParseReportTypeError(pub String);

impl FromStr for ReportType {
    type Err = ParseReportTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earnings" => Ok(ReportType::Earnings),
            "expenses" => Ok(ReportType::Expenses),
            "all" => Ok(ReportType::All),
            _ => Err(ParseReportTypeError(s.to_owned())),
        }
    }
}

/// A message for the support team, sent as an email by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// The operations the app needs from the backend.
///
/// Every call is made on behalf of the user in `session`.
pub trait Repository: Clone + Send + Sync + 'static {
    /// Fetch every record of type `T`, interpreting date-times in
    /// `timezone`.
    ///
    /// Items that are not JSON objects are skipped with a warning.
    fn fetch<T: Resource>(
        &self,
        session: &AuthSession,
        timezone: &'static Tz,
    ) -> impl Future<Output = Result<Vec<T>, FetchError>> + Send;

    /// Store a new record.
    fn create<T: Resource>(
        &self,
        session: &AuthSession,
        payload: &T::Payload,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Replace the record `id`.
    fn update<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
        payload: &T::Payload,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Delete the record `id`.
    fn delete<T: Resource>(
        &self,
        session: &AuthSession,
        id: &RecordId,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Render a PDF report and return its bytes.
    fn download_report(
        &self,
        session: &AuthSession,
        report: ReportType,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Send a support request to the support team.
    fn send_support_request(
        &self,
        session: &AuthSession,
        request: &SupportRequest,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;

    /// Fetch every earning.
    fn fetch_earnings(
        &self,
        session: &AuthSession,
        timezone: &'static Tz,
    ) -> impl Future<Output = Result<Vec<Earning>, FetchError>> + Send {
        self.fetch::<Earning>(session, timezone)
    }

    /// Fetch every expense.
    fn fetch_expenses(
        &self,
        session: &AuthSession,
        timezone: &'static Tz,
    ) -> impl Future<Output = Result<Vec<Expense>, FetchError>> + Send {
        self.fetch::<Expense>(session, timezone)
    }
}

/// Earnings and expenses fetched together, with an error if either fetch
/// failed.
///
/// When both fail the unauthorized error wins, so that pages log the user out
/// rather than show a banner.
///
/// The lists are empty when their fetch failed so that pages can still render.
#[derive(Debug, Default)]
pub struct Ledgers {
    pub earnings: Vec<Earning>,
    pub expenses: Vec<Expense>,
    pub error: Option<FetchError>,
}

/// Fetch earnings and expenses concurrently.
pub async fn fetch_ledgers<R: Repository>(
    repository: &R,
    session: &AuthSession,
    timezone: &'static Tz,
) -> Ledgers {
    let (earnings, expenses) = tokio::join!(
        repository.fetch_earnings(session, timezone),
        repository.fetch_expenses(session, timezone)
    );

    let mut ledgers = Ledgers::default();

    match earnings {
        Ok(earnings) => ledgers.earnings = earnings,
        Err(error) => {
            tracing::error!("could not fetch earnings: {error}");
            ledgers.error = Some(error);
        }
    }

    match expenses {
        Ok(expenses) => ledgers.expenses = expenses,
        Err(error) => {
            tracing::error!("could not fetch expenses: {error}");

            if !ledgers.error.as_ref().is_some_and(FetchError::is_unauthorized) {
                ledgers.error = Some(error);
            }
        }
    }

    ledgers
}

/// Convert the items of a JSON array into records, skipping the items that
/// cannot be read.
pub(crate) fn decode_records<T: Resource>(items: Vec<Value>, timezone: &Tz) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T::Raw>(item) {
            Ok(raw) => Some(T::from_raw(raw, timezone)),
            Err(error) => {
                tracing::warn!("skipping unreadable item {index} in {}: {error}", T::NAME);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::{
        FetchError, ReportType, Repository, decode_records, fake::FakeRepository, fetch_ledgers,
    };
    use crate::{
        auth::AuthSession,
        record::{Earning, Expense},
        timezone::test_utils::utc,
    };

    #[test]
    fn decodes_records_and_skips_unreadable_items() {
        let items = vec![
            json!({"_id": "1", "amount": 5, "date": "2024-03-02", "category": "Food"}),
            json!("not a record"),
            json!({"_id": "2", "amount": "7.5", "paymentMethod": "Cash"}),
        ];

        let expenses: Vec<Expense> = decode_records(items, utc());

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].date, Some(date!(2024 - 03 - 02)));
        assert_eq!(expenses[1].amount, 7.5);
        assert_eq!(expenses[1].payment_method, "Cash");
    }

    #[test]
    fn report_types_parse_from_path_segment() {
        for report in ReportType::ALL {
            assert_eq!(report.as_str().parse(), Ok(report));
        }

        assert!("weekly".parse::<ReportType>().is_err());
        assert_eq!(ReportType::All.file_name(), "all-report.pdf");
    }

    #[tokio::test]
    async fn fetch_ledgers_fetches_both_lists() {
        let repository = FakeRepository::new()
            .with_earnings(vec![json!({"_id": "e1", "amount": 100, "category": "Salary"})])
            .with_expenses(vec![
                json!({"_id": "x1", "amount": 20, "category": "Food"}),
                json!({"_id": "x2", "amount": 30, "category": "Taxes"}),
            ]);

        let ledgers = fetch_ledgers(&repository, &AuthSession::new("token"), utc()).await;

        assert_eq!(ledgers.earnings.len(), 1);
        assert_eq!(ledgers.expenses.len(), 2);
        assert_eq!(ledgers.error, None);
    }

    #[tokio::test]
    async fn fetch_ledgers_reports_failure_with_empty_lists() {
        let error = FetchError::Status {
            status: 500,
            message: "Database unavailable".to_owned(),
        };
        let repository = FakeRepository::new()
            .with_expenses(vec![json!({"_id": "x1", "amount": 20})])
            .failing_with(error.clone());

        let ledgers = fetch_ledgers(&repository, &AuthSession::new("token"), utc()).await;

        assert!(ledgers.earnings.is_empty());
        assert!(ledgers.expenses.is_empty());
        assert_eq!(ledgers.error, Some(error));
    }

    #[tokio::test]
    async fn fetch_ledgers_keeps_list_that_succeeded() {
        let error = FetchError::Status {
            status: 500,
            message: "Database unavailable".to_owned(),
        };
        let repository = FakeRepository::new()
            .with_earnings(vec![json!({"_id": "e1", "amount": 100, "category": "Salary"})])
            .with_expenses(vec![json!({"_id": "x1", "amount": 20, "category": "Food"})])
            .failing_fetch_of::<Expense>(error.clone());

        let ledgers = fetch_ledgers(&repository, &AuthSession::new("token"), utc()).await;

        assert_eq!(ledgers.earnings.len(), 1);
        assert_eq!(ledgers.earnings[0].amount, 100.0);
        assert!(ledgers.expenses.is_empty());
        assert_eq!(ledgers.error, Some(error));
    }

    #[tokio::test]
    async fn fetch_ledgers_prefers_unauthorized_error() {
        let unauthorized = FetchError::Status {
            status: 401,
            message: "Unauthenticated".to_owned(),
        };
        let repository = FakeRepository::new()
            .failing_fetch_of::<Earning>(FetchError::Status {
                status: 500,
                message: "Database unavailable".to_owned(),
            })
            .failing_fetch_of::<Expense>(unauthorized.clone());

        let ledgers = fetch_ledgers(&repository, &AuthSession::new("token"), utc()).await;

        assert_eq!(ledgers.error, Some(unauthorized));
    }

    #[tokio::test]
    async fn unauthorized_status_is_detected() {
        let repository = FakeRepository::new().failing_with(FetchError::Status {
            status: 401,
            message: "Unauthenticated".to_owned(),
        });

        let result = repository
            .fetch_earnings(&AuthSession::new("expired"), utc())
            .await;

        assert!(result.unwrap_err().is_unauthorized());
    }
}
