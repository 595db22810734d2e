//! The lists of the most recent earnings and expenses.

use maud::{Markup, html};

use crate::{
    filters::{CategoryFilter, SortOption, filter_and_sort},
    html::{CARD_STYLE, format_currency, format_date, link},
    ledger::Ledger,
    record::Record,
};

/// How many records each recent list shows.
pub(super) const RECENT_COUNT: usize = 4;

/// The newest [RECENT_COUNT] records, newest first.
pub(super) fn most_recent<R: Record>(records: &[R]) -> Vec<&R> {
    let mut recent = filter_and_sort(records, &CategoryFilter::All, SortOption::DateDesc);
    recent.truncate(RECENT_COUNT);
    recent
}

pub(super) fn recent_view<L: Ledger>(records: &[L]) -> Markup {
    let recent = most_recent(records);
    let heading = format!("Recent {}", L::TITLE);
    let list_id = format!("recent-{}", L::NAME);

    html! {
        section class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h2 class="text-lg font-medium" { (heading) }
                (link(L::VIEW, "View all"))
            }

            @if recent.is_empty() {
                p class="text-center text-gray-500 dark:text-gray-400 py-4"
                {
                    "No " (L::NAME) " found."
                }
            } @else {
                ul id=(list_id) class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for record in recent {
                        li class="flex justify-between gap-4 py-2"
                        {
                            div
                            {
                                p class="font-medium" { (record.description()) }
                                p class="text-xs text-gray-500 dark:text-gray-400"
                                {
                                    (record.category()) " · " (format_date(record.date()))
                                }
                            }

                            span class="tabular-nums" { (format_currency(record.amount())) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::most_recent;
    use crate::record::test_utils::expense;

    #[test]
    fn keeps_four_newest_records() {
        let expenses = vec![
            expense("1", 1.0, Some(date!(2024 - 01 - 01)), "Food"),
            expense("2", 1.0, None, "Food"),
            expense("3", 1.0, Some(date!(2024 - 03 - 01)), "Food"),
            expense("4", 1.0, Some(date!(2024 - 02 - 01)), "Food"),
            expense("5", 1.0, Some(date!(2024 - 05 - 01)), "Food"),
            expense("6", 1.0, Some(date!(2023 - 12 - 01)), "Food"),
        ];

        let recent = most_recent(&expenses);
        let ids: Vec<&str> = recent.iter().map(|expense| expense.id.as_str()).collect();

        assert_eq!(ids, ["5", "3", "4", "1"]);
    }

    #[test]
    fn short_lists_are_kept_whole() {
        let expenses = vec![expense("1", 1.0, None, "Food")];

        assert_eq!(most_recent(&expenses).len(), 1);
    }
}
