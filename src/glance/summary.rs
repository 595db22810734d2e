//! Totals cards and the ranked lists beside the pie charts.

use maud::{Markup, html};

use crate::{
    distribution::Totals,
    html::{CARD_STYLE, format_currency},
    taxonomy::Taxonomy,
};

/// How many entries the ranked lists show.
pub(super) const TOP_COUNT: usize = 5;

pub(super) fn totals_view(totals: &Totals) -> Markup {
    let net_balance = totals.net_balance();
    let net_style = if net_balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section id="totals" class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full"
        {
            div class=(CARD_STYLE) data-total="expenses"
            {
                h2 class="text-lg font-medium" { "Total Expenses" }
                p class="text-2xl font-semibold tabular-nums" { (format_currency(totals.expenses)) }
            }

            div class=(CARD_STYLE) data-total="earnings"
            {
                h2 class="text-lg font-medium" { "Total Earnings" }
                p class="text-2xl font-semibold tabular-nums" { (format_currency(totals.earnings)) }
            }

            div class=(CARD_STYLE) data-total="net"
            {
                h2 class="text-lg font-medium" { "Net Balance" }
                p class={ "text-2xl font-semibold tabular-nums " (net_style) }
                {
                    (format_currency(net_balance))
                }
            }
        }
    }
}

/// A numbered list of the largest slices of a distribution.
pub(super) fn top_list<T: Taxonomy>(id: &str, heading: &str, top: &[(T, f64)]) -> Markup {
    html! {
        div id=(id)
        {
            h3 class="font-medium text-center mb-2" { (heading) }

            @if top.is_empty() {
                p class="text-sm text-center text-gray-500 dark:text-gray-400" { "Nothing to show yet." }
            } @else {
                ol class="space-y-1"
                {
                    @for (member, amount) in top {
                        li class="flex justify-between gap-4 text-sm"
                        {
                            span { (member.label()) }
                            span class="tabular-nums" { (format_currency(*amount)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{top_list, totals_view};
    use crate::{distribution::Totals, taxonomy::ExpenseCategory, test_utils::select_texts};

    #[test]
    fn totals_show_net_balance() {
        let totals = Totals {
            earnings: 100.0,
            expenses: 150.5,
        };

        let html = Html::parse_fragment(&totals_view(&totals).into_string());

        assert_eq!(
            select_texts(&html, "[data-total] p"),
            ["$150.50", "$100.00", "-$50.50"]
        );
    }

    #[test]
    fn top_list_shows_labels_in_given_order() {
        let top = [(ExpenseCategory::Taxes, 300.0), (ExpenseCategory::Food, 20.0)];

        let html = Html::parse_fragment(&top_list("top", "Top Categories", &top).into_string());

        assert_eq!(select_texts(&html, "li span:first-child"), ["Taxes", "Food"]);
    }
}
