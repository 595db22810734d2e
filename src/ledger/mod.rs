//! The earnings and expenses pages: filtered lists with forms for creating,
//! editing and deleting records.
//!
//! Both pages share one implementation, parameterised by the [Ledger] trait.

mod endpoints;
mod form;
mod list_page;

use axum::extract::FromRef;
use maud::Markup;

use crate::{
    AppState,
    backend::{Repository, Resource},
    endpoints as routes,
    record::{Draft, Earning, EarningDraft, Expense, ExpenseDraft, Record},
    taxonomy::{EarningCategory, ExpenseCategory, PaymentMethod, Taxonomy},
};

pub use endpoints::{create_record_endpoint, delete_record_endpoint, update_record_endpoint};
pub use list_page::get_ledger_page;

use form::{select_field, text_field};

/// A kind of record with its own list page.
pub trait Ledger: Resource + Record + Clone {
    /// The form input for creating and editing records of this kind.
    type Draft: Draft<Record = Self, Payload = <Self as Resource>::Payload>;

    /// The page title, e.g. "Earnings".
    const TITLE: &'static str;
    /// The singular name used in buttons and messages, e.g. "earning".
    const SINGULAR: &'static str;
    /// The list page route.
    const VIEW: &'static str;
    /// The route for creating records.
    const COLLECTION_API: &'static str;
    /// The route for updating and deleting a single record.
    const ITEM_API: &'static str;
    /// The heading of the column that differs between ledgers.
    const EXTRA_COLUMN: &'static str;

    /// The labels offered by the category selector.
    fn category_labels() -> Vec<&'static str>;

    /// The value shown in the [Ledger::EXTRA_COLUMN] column.
    fn extra_value(&self) -> &str;

    /// The form field for the ledger specific value.
    fn extra_field(draft: &Self::Draft) -> Markup;

    /// The category entered in `draft`.
    fn draft_category(draft: &Self::Draft) -> &str;

    /// The description, amount and date entered in `draft`.
    fn draft_common(draft: &Self::Draft) -> (&str, &str, &str);
}

fn labels<T: Taxonomy>() -> Vec<&'static str> {
    T::ALL.iter().map(|member| member.label()).collect()
}

impl Ledger for Earning {
    type Draft = EarningDraft;

    const TITLE: &'static str = "Earnings";
    const SINGULAR: &'static str = "earning";
    const VIEW: &'static str = routes::EARNINGS_VIEW;
    const COLLECTION_API: &'static str = routes::EARNINGS_API;
    const ITEM_API: &'static str = routes::EARNING;
    const EXTRA_COLUMN: &'static str = "Source";

    fn category_labels() -> Vec<&'static str> {
        labels::<EarningCategory>()
    }

    fn extra_value(&self) -> &str {
        &self.source
    }

    fn extra_field(draft: &EarningDraft) -> Markup {
        text_field("source", "Source", &draft.source, "Employer or client")
    }

    fn draft_category(draft: &EarningDraft) -> &str {
        &draft.category
    }

    fn draft_common(draft: &EarningDraft) -> (&str, &str, &str) {
        (&draft.description, &draft.amount, &draft.date)
    }
}

impl Ledger for Expense {
    type Draft = ExpenseDraft;

    const TITLE: &'static str = "Expenses";
    const SINGULAR: &'static str = "expense";
    const VIEW: &'static str = routes::EXPENSES_VIEW;
    const COLLECTION_API: &'static str = routes::EXPENSES_API;
    const ITEM_API: &'static str = routes::EXPENSE;
    const EXTRA_COLUMN: &'static str = "Payment Method";

    fn category_labels() -> Vec<&'static str> {
        labels::<ExpenseCategory>()
    }

    fn extra_value(&self) -> &str {
        &self.payment_method
    }

    fn extra_field(draft: &ExpenseDraft) -> Markup {
        select_field(
            "payment_method",
            "Payment Method",
            &labels::<PaymentMethod>(),
            &draft.payment_method,
        )
    }

    fn draft_category(draft: &ExpenseDraft) -> &str {
        &draft.category
    }

    fn draft_common(draft: &ExpenseDraft) -> (&str, &str, &str) {
        (&draft.description, &draft.amount, &draft.date)
    }
}

/// The state needed for the list pages and their endpoints.
#[derive(Debug, Clone)]
pub struct LedgerState<R: Repository> {
    /// The backend that stores the records.
    pub repository: R,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl<R: Repository> FromRef<AppState<R>> for LedgerState<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            repository: state.repository.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
