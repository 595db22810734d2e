//! Form drafts for creating and editing records, and the payloads sent to
//! the backend once a draft is valid.

use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::taxonomy::{EarningCategory, ExpenseCategory, ParseTaxonomyError, PaymentMethod};

use super::{DATE_FORMAT, Earning, Expense};

/// The date format the backend expects: an ISO-8601 timestamp at UTC midnight.
const ISO_MIDNIGHT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T00:00:00.000Z");

/// Reasons a draft cannot be sent to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// One or more required fields were left empty, in form order.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The amount is not a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("The amount cannot be negative")]
    NegativeAmount,

    /// The date is not in `YYYY-MM-DD` format or does not exist.
    #[error("\"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A category or payment method outside its taxonomy.
    #[error(transparent)]
    InvalidLabel(#[from] ParseTaxonomyError),
}

/// Raw form input for a record, validated into a backend payload.
pub trait Draft: Default + Clone + DeserializeOwned + Send + Sync + 'static {
    /// The record type this draft creates or edits.
    type Record;
    /// The validated payload sent to the backend.
    type Payload: Serialize + Send + Sync;

    /// Prefill a draft from an existing record for editing.
    fn from_record(record: &Self::Record) -> Self;

    /// Check the draft and convert it into a payload.
    ///
    /// # Errors
    /// Returns [FormError::MissingFields] listing every empty required field
    /// before any other check runs.
    fn validate(&self) -> Result<Self::Payload, FormError>;
}

/// Form input for an earning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningDraft {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
}

/// A validated earning, in the shape `POST /api/earning` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEarning {
    pub description: String,
    pub amount: f64,
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
    pub category: EarningCategory,
    pub source: String,
}

impl Draft for EarningDraft {
    type Record = Earning;
    type Payload = NewEarning;

    fn from_record(earning: &Earning) -> Self {
        Self {
            description: earning.description.clone(),
            amount: earning.amount.to_string(),
            date: earning.date.map(|date| date.to_string()).unwrap_or_default(),
            category: earning.category.clone(),
            source: earning.source.clone(),
        }
    }

    fn validate(&self) -> Result<NewEarning, FormError> {
        check_required(&[
            ("description", &self.description),
            ("amount", &self.amount),
            ("category", &self.category),
            ("date", &self.date),
            ("source", &self.source),
        ])?;

        Ok(NewEarning {
            description: self.description.trim().to_owned(),
            amount: parse_amount(&self.amount)?,
            date: parse_form_date(&self.date)?,
            category: self.category.trim().parse()?,
            source: self.source.trim().to_owned(),
        })
    }
}

/// Form input for an expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
}

/// A validated expense, in the shape `POST /api/expense` expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
}

impl Draft for ExpenseDraft {
    type Record = Expense;
    type Payload = NewExpense;

    fn from_record(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            date: expense.date.map(|date| date.to_string()).unwrap_or_default(),
            category: expense.category.clone(),
            payment_method: expense.payment_method.clone(),
        }
    }

    fn validate(&self) -> Result<NewExpense, FormError> {
        check_required(&[
            ("description", &self.description),
            ("amount", &self.amount),
            ("category", &self.category),
            ("date", &self.date),
            ("payment method", &self.payment_method),
        ])?;

        Ok(NewExpense {
            description: self.description.trim().to_owned(),
            amount: parse_amount(&self.amount)?,
            date: parse_form_date(&self.date)?,
            category: self.category.trim().parse()?,
            payment_method: self.payment_method.trim().parse()?,
        })
    }
}

fn check_required(fields: &[(&'static str, &String)]) -> Result<(), FormError> {
    let missing: Vec<_> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormError::MissingFields(missing))
    }
}

fn parse_amount(text: &str) -> Result<f64, FormError> {
    let amount = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| FormError::InvalidAmount(text.to_owned()))?;

    if amount < 0.0 {
        return Err(FormError::NegativeAmount);
    }

    Ok(amount)
}

fn parse_form_date(text: &str) -> Result<Date, FormError> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| FormError::InvalidDate(text.to_owned()))
}

fn serialize_iso_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let text = date
        .format(ISO_MIDNIGHT_FORMAT)
        .map_err(serde::ser::Error::custom)?;

    serializer.serialize_str(&text)
}
