//! Earnings and expenses, the two kinds of record the app works with.
//!
//! Records are fetched from the backend as loosely typed JSON and normalized
//! into the structs below (see [normalize]). Form input travels the other
//! way through the drafts in [draft].

mod draft;
mod normalize;

use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::taxonomy::{EarningCategory, ExpenseCategory, PaymentMethod, Taxonomy};

pub use draft::{Draft, EarningDraft, ExpenseDraft, FormError, NewEarning, NewExpense};
pub use normalize::{RawEarning, RawExpense, coerce_amount, parse_record_date};

/// The format used for dates in forms, tables and query strings.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// The characters left as is in a URL path segment or query value.
const URL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The backend's identifier for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier issued by the backend.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier percent-encoded for use as a single URL path segment
    /// or query value.
    ///
    /// Returns `None` for empty, "." and ".." identifiers, which URL parsers
    /// would resolve as a different path.
    pub fn url_segment(&self) -> Option<String> {
        match self.0.as_str() {
            "" | "." | ".." => None,
            id => Some(utf8_percent_encode(id, URL_SEGMENT).to_string()),
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fields shared by earnings and expenses.
///
/// Aggregation, filtering and sorting only ever look at records through this
/// trait.
pub trait Record {
    /// The backend's identifier for the record.
    fn id(&self) -> &RecordId;

    /// A short, free text description.
    fn description(&self) -> &str;

    /// The amount in raw currency units. Always finite.
    fn amount(&self) -> f64;

    /// The calendar date of the record, or `None` if the backend sent a
    /// missing or unparseable date.
    fn date(&self) -> Option<Date>;

    /// The category label exactly as stored by the backend.
    fn category(&self) -> &str;
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &RecordId {
        (**self).id()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn date(&self) -> Option<Date> {
        (**self).date()
    }

    fn category(&self) -> &str {
        (**self).category()
    }
}

/// Money coming in.
#[derive(Debug, Clone, PartialEq)]
pub struct Earning {
    /// The backend's identifier.
    pub id: RecordId,
    /// A short description.
    pub description: String,
    /// The amount earned.
    pub amount: f64,
    /// When the money was earned.
    pub date: Option<Date>,
    /// The category label, ideally one of [EarningCategory].
    pub category: String,
    /// Who paid, e.g. an employer or client.
    pub source: String,
}

impl Earning {
    /// The category as a member of the earning taxonomy, if it is one.
    pub fn category_key(&self) -> Option<EarningCategory> {
        EarningCategory::from_label(&self.category)
    }
}

impl Record for Earning {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> Option<Date> {
        self.date
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Money going out.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The backend's identifier.
    pub id: RecordId,
    /// A short description.
    pub description: String,
    /// The amount spent.
    pub amount: f64,
    /// When the money was spent.
    pub date: Option<Date>,
    /// The category label, ideally one of [ExpenseCategory].
    pub category: String,
    /// The payment method label, ideally one of [PaymentMethod].
    pub payment_method: String,
}

impl Expense {
    /// The category as a member of the expense taxonomy, if it is one.
    pub fn category_key(&self) -> Option<ExpenseCategory> {
        ExpenseCategory::from_label(&self.category)
    }

    /// The payment method as a member of the payment taxonomy, if it is one.
    pub fn payment_method_key(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_label(&self.payment_method)
    }
}

impl Record for Expense {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> Option<Date> {
        self.date
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// An earning or an expense, for lists that show both.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    /// Money in.
    Earning(Earning),
    /// Money out.
    Expense(Expense),
}

impl Transaction {
    /// The amount with earnings positive and expenses negative.
    pub fn signed_amount(&self) -> f64 {
        match self {
            Transaction::Earning(earning) => earning.amount,
            Transaction::Expense(expense) => -expense.amount,
        }
    }

    /// Whether this is an earning.
    pub fn is_earning(&self) -> bool {
        matches!(self, Transaction::Earning(_))
    }

    fn inner(&self) -> &dyn Record {
        match self {
            Transaction::Earning(earning) => earning,
            Transaction::Expense(expense) => expense,
        }
    }
}

impl Record for Transaction {
    fn id(&self) -> &RecordId {
        self.inner().id()
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    fn amount(&self) -> f64 {
        self.inner().amount()
    }

    fn date(&self) -> Option<Date> {
        self.inner().date()
    }

    fn category(&self) -> &str {
        self.inner().category()
    }
}

/// Merge earnings and expenses into one list, earnings first.
pub fn combine(earnings: &[Earning], expenses: &[Expense]) -> Vec<Transaction> {
    earnings
        .iter()
        .cloned()
        .map(Transaction::Earning)
        .chain(expenses.iter().cloned().map(Transaction::Expense))
        .collect()
}
