//! The month, year and week controls of the Financial Report.

use maud::{Markup, html};
use time::Month;

use crate::{
    endpoints,
    html::FORM_LABEL_STYLE,
    time_selection::TimeSelection,
};

const SELECT_STYLE: &str = "p-2 text-sm rounded-lg border bg-gray-50 border-gray-300 \
    text-gray-900 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

/// Month and year selectors. Changing either submits the form without a week,
/// which brings the daily breakdown back to week 1.
pub(super) fn month_year_form(selection: &TimeSelection) -> Markup {
    let months = (1..=12u8).filter_map(|number| Month::try_from(number).ok());

    html! {
        form
            method="get"
            action=(endpoints::HOME_VIEW)
            id="time-selection"
            class="flex gap-4 items-end"
        {
            div
            {
                label for="month-select" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month-select"
                    name="month"
                    onchange="this.form.submit()"
                    class=(SELECT_STYLE)
                {
                    @for month in months {
                        option value=(month as u8) selected[month == selection.month()]
                        {
                            (month)
                        }
                    }
                }
            }

            div
            {
                label for="year-select" class=(FORM_LABEL_STYLE) { "Year" }

                select
                    id="year-select"
                    name="year"
                    onchange="this.form.submit()"
                    class=(SELECT_STYLE)
                {
                    @for year in selection.year_options() {
                        option value=(year) selected[year == selection.year()] { (year) }
                    }
                }
            }
        }
    }
}

/// One link per week of the month. The selected week is marked as current.
pub(super) fn week_links(selection: &TimeSelection) -> Markup {
    html! {
        nav aria-label="Weeks" class="flex gap-2 flex-wrap" id="week-links"
        {
            @for week in 1..=selection.weeks_in_month() {
                @let target = selection.with_week(week);
                @let is_current = week == selection.week();

                a
                    href={ (endpoints::HOME_VIEW) "?" (target.to_query()) }
                    aria-current=[is_current.then_some("true")]
                    class={
                        "px-3 py-1 rounded text-sm "
                        @if is_current {
                            "bg-blue-600 text-white"
                        } @else {
                            "bg-gray-200 text-gray-800 hover:bg-gray-300 dark:bg-gray-700 dark:text-gray-200"
                        }
                    }
                {
                    "W" (week)
                }
            }
        }
    }
}
