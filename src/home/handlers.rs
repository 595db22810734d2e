//! Home page handler and view rendering.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    auth::{AuthSession, redirect_to_log_out},
    backend::{FetchError, ReportType, Repository, fetch_ledgers},
    buckets::{aggregate_by_day, aggregate_by_week},
    charts::{PageChart, charts_script, daily_chart, weekly_chart},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        echarts_script, fetch_error_banner,
    },
    navigation::NavBar,
    record::{Earning, Expense},
    theme::Theme,
    time_selection::{TimeSelection, TimeSelectionQuery},
    timezone::{local_today, timezone_or_error},
};

use super::{
    recent::recent_view,
    selection::{month_year_form, week_links},
};

const WEEKLY_CHART_ID: &str = "weekly-chart";
const DAILY_CHART_ID: &str = "daily-chart";

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomeState<R: Repository> {
    /// The backend that stores the records.
    pub repository: R,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl<R: Repository> FromRef<AppState<R>> for HomeState<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            repository: state.repository.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds everything needed to render the home page.
struct HomeData {
    selection: TimeSelection,
    earnings: Vec<Earning>,
    expenses: Vec<Expense>,
    /// `None` when no record falls in the selected month.
    weekly_chart: Option<PageChart>,
    /// `None` when no record falls in the selected week.
    daily_chart: Option<PageChart>,
    fetch_error: Option<FetchError>,
}

/// Display the recent records and the Financial Report for the period in the
/// query, defaulting to the first week of the current month.
pub async fn get_home_page<R: Repository>(
    State(state): State<HomeState<R>>,
    session: AuthSession,
    theme: Theme,
    Query(query): Query<TimeSelectionQuery>,
) -> Result<Response, Error> {
    let timezone = timezone_or_error(&state.local_timezone)?;
    let selection = TimeSelection::from_query(&query, local_today(timezone))
        .inspect_err(|error| tracing::warn!("invalid time selection {query:?}: {error}"))?;

    let ledgers = fetch_ledgers(&state.repository, &session, timezone).await;

    if ledgers
        .error
        .as_ref()
        .is_some_and(FetchError::is_unauthorized)
    {
        return Ok(redirect_to_log_out());
    }

    let data = build_home_data(selection, ledgers.earnings, ledgers.expenses, ledgers.error);

    Ok(home_view(data, theme).into_response())
}

fn build_home_data(
    selection: TimeSelection,
    earnings: Vec<Earning>,
    expenses: Vec<Expense>,
    fetch_error: Option<FetchError>,
) -> HomeData {
    let (year, month, week) = (selection.year(), selection.month(), selection.week());

    let weekly_earnings = aggregate_by_week(&earnings, year, month);
    let weekly_expenses = aggregate_by_week(&expenses, year, month);
    let daily_earnings = aggregate_by_day(&earnings, year, month, week);
    let daily_expenses = aggregate_by_day(&expenses, year, month, week);

    let has_data = |buckets: &[f64]| buckets.iter().any(|amount| *amount != 0.0);

    let weekly_chart = (has_data(&weekly_earnings) || has_data(&weekly_expenses)).then(|| {
        PageChart::new(
            WEEKLY_CHART_ID,
            &weekly_chart(&weekly_earnings, &weekly_expenses, &selection),
        )
    });
    let daily_chart = (has_data(&daily_earnings) || has_data(&daily_expenses)).then(|| {
        PageChart::new(
            DAILY_CHART_ID,
            &daily_chart(&daily_earnings, &daily_expenses, &selection),
        )
    });

    HomeData {
        selection,
        earnings,
        expenses,
        weekly_chart,
        daily_chart,
        fetch_error,
    }
}

fn chart_or_message(chart: Option<&PageChart>, message: &str) -> Markup {
    html! {
        @if let Some(chart) = chart {
            div id=(chart.id) class="min-h-[340px] rounded" {}
        } @else {
            div
                class="flex items-center justify-center min-h-[200px] text-sm
                text-gray-500 dark:text-gray-400"
                data-empty-chart
            {
                (message)
            }
        }
    }
}

fn quick_add_view() -> Markup {
    let add_expense = format!("{}?create=true", endpoints::EXPENSES_VIEW);
    let add_earning = format!("{}?create=true", endpoints::EARNINGS_VIEW);

    html! {
        div class="grid grid-cols-2 gap-4 w-full" id="quick-add"
        {
            a href=(add_expense) class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            a href=(add_earning) class=(BUTTON_PRIMARY_STYLE) { "Add Earning" }
        }
    }
}

fn reports_view() -> Markup {
    html! {
        section class=(CARD_STYLE) id="reports"
        {
            h2 class="text-lg font-medium mb-2" { "Download Reports" }

            ul class="flex flex-wrap gap-4"
            {
                @for report in ReportType::ALL {
                    li
                    {
                        a
                            href=(format_endpoint(endpoints::REPORT, report.as_str()))
                            download=(report.file_name())
                            class=(LINK_STYLE)
                        {
                            (report.title())
                        }
                    }
                }
            }
        }
    }
}

fn home_view(data: HomeData, theme: Theme) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();
    let selection = &data.selection;

    let charts: Vec<&PageChart> = data
        .weekly_chart
        .iter()
        .chain(data.daily_chart.iter())
        .collect();
    let head_elements: Vec<HeadElement> = if charts.is_empty() {
        Vec::new()
    } else {
        vec![echarts_script(), charts_script(charts, theme)]
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full lg:max-w-5xl space-y-6"
            {
                @if let Some(error) = &data.fetch_error {
                    (fetch_error_banner(&error.to_string()))
                }

                (quick_add_view())

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    (recent_view(&data.expenses))
                    (recent_view(&data.earnings))
                }

                section class=(CARD_STYLE) id="financial-report"
                {
                    div class="flex flex-col gap-4 sm:flex-row sm:justify-between sm:items-start mb-4"
                    {
                        div
                        {
                            h2 class="text-xl font-medium" { "Financial Report" }
                            p class="text-sm text-gray-600 dark:text-gray-400"
                            {
                                "Track your earnings and expenses over time"
                            }
                        }

                        (month_year_form(selection))
                    }

                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        div
                        {
                            (chart_or_message(
                                data.weekly_chart.as_ref(),
                                &format!("No data for {selection}"),
                            ))
                        }

                        div class="space-y-2"
                        {
                            (week_links(selection))
                            (chart_or_message(
                                data.daily_chart.as_ref(),
                                &format!("No data for Week {}", selection.week()),
                            ))
                        }
                    }
                }

                (reports_view())
            }
        }
    };

    base("Home", theme, &head_elements, &content)
}
