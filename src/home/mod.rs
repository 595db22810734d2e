//! The home page: recent records, quick-add links, report downloads and the
//! weekly and daily Financial Report charts.

mod handlers;
mod recent;
mod selection;

pub use handlers::{HomeState, get_home_page};
