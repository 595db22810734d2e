//! Category filtering and sorting for the record tables.

use std::{cmp::Ordering, convert::Infallible, fmt::Display, str::FromStr};

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Deserializer};

use crate::record::Record;

/// The label of the category option that matches every record.
pub const ALL_CATEGORIES: &str = "All";

/// How to order the rows of a record table.
///
/// Parsed from the `sort` query parameter. Unknown values parse to
/// [SortOption::Unsorted], which keeps the order the backend sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Newest first, records without a date last.
    #[default]
    DateDesc,
    /// Oldest first, records without a date first.
    DateAsc,
    /// Largest amount first.
    AmountDesc,
    /// Smallest amount first.
    AmountAsc,
    /// Category A to Z.
    CategoryAsc,
    /// Category Z to A.
    CategoryDesc,
    /// Input order.
    Unsorted,
}

impl SortOption {
    /// The options offered in the sort selector, in display order.
    pub const ALL: [SortOption; 6] = [
        SortOption::DateDesc,
        SortOption::DateAsc,
        SortOption::AmountDesc,
        SortOption::AmountAsc,
        SortOption::CategoryAsc,
        SortOption::CategoryDesc,
    ];

    /// The query parameter value for this option.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::DateDesc => "date-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::AmountDesc => "amount-desc",
            SortOption::AmountAsc => "amount-asc",
            SortOption::CategoryAsc => "category-asc",
            SortOption::CategoryDesc => "category-desc",
            SortOption::Unsorted => "none",
        }
    }

    /// A human readable description for the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            SortOption::DateDesc => "Date (Newest)",
            SortOption::DateAsc => "Date (Oldest)",
            SortOption::AmountDesc => "Amount (High to Low)",
            SortOption::AmountAsc => "Amount (Low to High)",
            SortOption::CategoryAsc => "Category (A-Z)",
            SortOption::CategoryDesc => "Category (Z-A)",
            SortOption::Unsorted => "Unsorted",
        }
    }

    fn compare<R: Record>(self, a: &R, b: &R, text: &TextOrder) -> Ordering {
        match self {
            SortOption::DateDesc => b.date().cmp(&a.date()),
            SortOption::DateAsc => a.date().cmp(&b.date()),
            SortOption::AmountDesc => b.amount().total_cmp(&a.amount()),
            SortOption::AmountAsc => a.amount().total_cmp(&b.amount()),
            SortOption::CategoryAsc => text.compare(a.category(), b.category()),
            SortOption::CategoryDesc => text.compare(b.category(), a.category()),
            SortOption::Unsorted => Ordering::Equal,
        }
    }
}

impl FromStr for SortOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date-desc" => SortOption::DateDesc,
            "date-asc" => SortOption::DateAsc,
            "amount-desc" => SortOption::AmountDesc,
            "amount-asc" => SortOption::AmountAsc,
            "category-asc" => SortOption::CategoryAsc,
            "category-desc" => SortOption::CategoryDesc,
            _ => SortOption::Unsorted,
        })
    }
}

impl<'de> Deserialize<'de> for SortOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let Ok(option) = text.parse::<SortOption>();
        Ok(option)
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which categories a record table shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every record.
    #[default]
    All,
    /// Only records whose category is exactly this label.
    Only(String),
}

impl CategoryFilter {
    /// Interpret the `category` query parameter. A missing, empty or "All"
    /// value matches every record.
    pub fn from_query(category: Option<&str>) -> Self {
        match category {
            None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(category) => CategoryFilter::Only(category.to_owned()),
        }
    }

    /// Whether a record with `category` passes the filter. Case-sensitive.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// The value to put in the `category` query parameter.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }
}

/// Keep the records matching `filter`, ordered by `sort`.
///
/// The sort is stable, so records that compare equal keep their input order.
/// Applying the same filter and sort to the output returns it unchanged.
pub fn filter_and_sort<'a, R: Record>(
    records: &'a [R],
    filter: &CategoryFilter,
    sort: SortOption,
) -> Vec<&'a R> {
    let mut selected: Vec<&R> = records
        .iter()
        .filter(|record| filter.matches(record.category()))
        .collect();

    let text = match sort {
        SortOption::CategoryAsc | SortOption::CategoryDesc => TextOrder::locale_aware(),
        _ => TextOrder::CodePoint,
    };
    selected.sort_by(|a, b| sort.compare(a, b, &text));

    selected
}

/// The category selector options: "All" followed by each distinct category in
/// the order it first appears.
///
/// Records without a category do not add an option. The category of the
/// active filter is added last when no record has it, so the selector still
/// shows what the table is filtered by.
pub fn category_options<R: Record>(records: &[R], active: &CategoryFilter) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_owned()];
    let categories = records
        .iter()
        .map(|record| record.category())
        .chain(std::iter::once(active.as_str()));

    for category in categories {
        if !category.is_empty() && !options.iter().any(|option| option == category) {
            options.push(category.to_owned());
        }
    }

    options
}

/// How category labels are compared.
enum TextOrder {
    /// The root locale's collation at tertiary strength, so accents and case
    /// only break ties between otherwise equal labels.
    Collated(Collator),
    /// Plain code point order.
    CodePoint,
}

impl TextOrder {
    fn locale_aware() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);

        match Collator::try_new(&Default::default(), options) {
            Ok(collator) => TextOrder::Collated(collator),
            Err(error) => {
                tracing::warn!("could not load collation data, sorting by code point: {error}");
                TextOrder::CodePoint
            }
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            TextOrder::Collated(collator) => collator.compare(a, b),
            TextOrder::CodePoint => a.cmp(b),
        }
    }
}
