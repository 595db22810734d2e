//! The glance page: totals, distribution pie charts, top spending categories
//! and every earning and expense in one list.

mod handlers;
mod summary;
mod transactions;

pub use handlers::{GlanceState, get_glance_page};
