//! The combined list of earnings and expenses.

use maud::{Markup, html};

use crate::{
    endpoints,
    filters::{CategoryFilter, SortOption, filter_and_sort},
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_date, format_signed_currency,
    },
    record::{Record, Transaction},
};

/// The orders offered for the combined list.
pub(super) const TRANSACTION_SORTS: [SortOption; 2] = [SortOption::DateDesc, SortOption::DateAsc];

/// Limit `sort` to the orders the combined list offers, falling back to
/// newest first.
pub(super) fn transaction_sort(sort: Option<SortOption>) -> SortOption {
    match sort {
        Some(sort) if TRANSACTION_SORTS.contains(&sort) => sort,
        _ => SortOption::DateDesc,
    }
}

fn kind(transaction: &Transaction) -> &'static str {
    if transaction.is_earning() {
        "Earning"
    } else {
        "Expense"
    }
}

/// The combined table with its sort selector. `expense_view` is carried
/// through the sort form so the pie chart selection survives a re-sort.
pub(super) fn transactions_view(
    transactions: &[Transaction],
    sort: SortOption,
    expense_view: &str,
) -> Markup {
    let rows = filter_and_sort(transactions, &CategoryFilter::All, sort);

    html! {
        section id="transactions" class="w-full space-y-4"
        {
            div class="flex justify-between items-end flex-wrap gap-4"
            {
                h2 class="text-xl font-semibold" { "Transactions" }

                form method="get" action=(endpoints::GLANCE_VIEW) class="flex gap-2 items-end"
                {
                    input type="hidden" name="expense_view" value=(expense_view);

                    div
                    {
                        label for="sort-option" class=(FORM_LABEL_STYLE) { "Sort by" }

                        select
                            id="sort-option"
                            name="sort"
                            onchange="this.form.submit()"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for choice in TRANSACTION_SORTS {
                                option value=(choice.as_str()) selected[choice == sort]
                                {
                                    (choice.label())
                                }
                            }
                        }
                    }
                }
            }

            @if rows.is_empty() {
                p class="text-center text-gray-500 dark:text-gray-400 py-4" { "No transactions found." }
            } @else {
                div class="overflow-x-auto"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            }
                        }

                        tbody
                        {
                            @for transaction in rows {
                                tr class=(TABLE_ROW_STYLE) data-kind=(kind(transaction).to_lowercase())
                                {
                                    td class=(TABLE_CELL_STYLE) { (kind(transaction)) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.category()) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.description()) }
                                    td
                                        class={
                                            "px-6 py-4 text-right tabular-nums "
                                            @if transaction.is_earning() {
                                                "text-green-600 dark:text-green-400"
                                            } @else {
                                                "text-red-600 dark:text-red-400"
                                            }
                                        }
                                    {
                                        (format_signed_currency(transaction.amount(), transaction.is_earning()))
                                    }
                                    td class=(TABLE_CELL_STYLE) { (format_date(transaction.date())) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
