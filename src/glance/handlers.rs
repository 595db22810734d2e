//! Glance page handler and view rendering.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::{AuthSession, redirect_to_log_out},
    backend::{FetchError, Repository, fetch_ledgers},
    charts::{PageChart, charts_script, pie_chart},
    distribution::{Distribution, Totals},
    endpoints,
    filters::SortOption,
    html::{CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, echarts_script, fetch_error_banner},
    navigation::NavBar,
    record::{Earning, Expense, Transaction, combine},
    taxonomy::{EarningCategory, PaymentMethod, Taxonomy},
    theme::Theme,
    timezone::timezone_or_error,
};

use super::{
    summary::{TOP_COUNT, top_list, totals_view},
    transactions::{transaction_sort, transactions_view},
};

const EXPENSE_CHART_ID: &str = "expense-chart";
const EARNING_CHART_ID: &str = "earning-chart";

/// The state needed for the glance page.
#[derive(Debug, Clone)]
pub struct GlanceState<R: Repository> {
    /// The backend that stores the records.
    pub repository: R,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl<R: Repository> FromRef<AppState<R>> for GlanceState<R> {
    fn from_ref(state: &AppState<R>) -> Self {
        Self {
            repository: state.repository.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters of the glance page, e.g. `?expense_view=payment&sort=date-asc`.
#[derive(Debug, Default, Deserialize)]
pub struct GlanceQuery {
    #[serde(default)]
    pub sort: Option<SortOption>,
    #[serde(default)]
    pub expense_view: Option<String>,
}

/// Which key the expense pie chart groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ExpenseView {
    #[default]
    Category,
    Payment,
}

impl ExpenseView {
    const ALL: [ExpenseView; 2] = [ExpenseView::Category, ExpenseView::Payment];

    /// Unknown values show the category view.
    fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("payment") => ExpenseView::Payment,
            _ => ExpenseView::Category,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ExpenseView::Category => "category",
            ExpenseView::Payment => "payment",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExpenseView::Category => "By Category",
            ExpenseView::Payment => "By Payment Method",
        }
    }
}

/// One pie chart with the ranked list shown beside it.
struct PieSection {
    title: &'static str,
    /// `None` when every slice is zero.
    chart: Option<PageChart>,
    top: Markup,
}

impl PieSection {
    fn new<T: Taxonomy>(
        chart_id: &'static str,
        title: &'static str,
        top_heading: &str,
        distribution: &Distribution<T>,
    ) -> Self {
        let chart = (!distribution.is_empty()).then(|| {
            let slices: Vec<(&str, f64)> = distribution
                .slices()
                .iter()
                .map(|(member, amount)| (member.label(), *amount))
                .collect();

            PageChart::new(chart_id, &pie_chart(title, &slices))
        });
        let top = top_list(
            &format!("{chart_id}-top"),
            top_heading,
            &distribution.top(TOP_COUNT),
        );

        Self { title, chart, top }
    }
}

fn expense_section(expenses: &[Expense], view: ExpenseView) -> PieSection {
    match view {
        ExpenseView::Category => PieSection::new(
            EXPENSE_CHART_ID,
            "Expenses by Category",
            "Top Categories",
            &Distribution::of(expenses, Expense::category_key),
        ),
        ExpenseView::Payment => PieSection::new(
            EXPENSE_CHART_ID,
            "Expenses by Payment Method",
            "Top Payment Methods",
            &Distribution::<PaymentMethod>::of(expenses, Expense::payment_method_key),
        ),
    }
}

/// Display the totals, distributions and combined transactions of every record.
pub async fn get_glance_page<R: Repository>(
    State(state): State<GlanceState<R>>,
    session: AuthSession,
    theme: Theme,
    Query(query): Query<GlanceQuery>,
) -> Result<Response, Error> {
    let timezone = timezone_or_error(&state.local_timezone)?;
    let ledgers = fetch_ledgers(&state.repository, &session, timezone).await;

    if ledgers
        .error
        .as_ref()
        .is_some_and(FetchError::is_unauthorized)
    {
        return Ok(redirect_to_log_out());
    }

    let view = ExpenseView::from_query(query.expense_view.as_deref());
    let sort = transaction_sort(query.sort);

    let totals = Totals::new(&ledgers.earnings, &ledgers.expenses);
    let expenses = expense_section(&ledgers.expenses, view);
    let earnings = PieSection::new(
        EARNING_CHART_ID,
        "Earnings by Category",
        "Top Income Sources",
        &Distribution::<EarningCategory>::of(&ledgers.earnings, Earning::category_key),
    );
    let transactions = combine(&ledgers.earnings, &ledgers.expenses);

    let page = GlancePage {
        totals,
        expenses,
        earnings,
        transactions,
        view,
        sort,
        fetch_error: ledgers.error,
    };

    Ok(glance_view(page, theme).into_response())
}

struct GlancePage {
    totals: Totals,
    expenses: PieSection,
    earnings: PieSection,
    transactions: Vec<Transaction>,
    view: ExpenseView,
    sort: SortOption,
    fetch_error: Option<FetchError>,
}

fn expense_view_tabs(current: ExpenseView, sort: SortOption) -> Markup {
    html! {
        nav aria-label="Expense chart view" id="expense-view" class="flex gap-2 justify-center"
        {
            @for view in ExpenseView::ALL {
                @let is_current = view == current;

                a
                    href={
                        (endpoints::GLANCE_VIEW) "?expense_view=" (view.as_str())
                        "&sort=" (sort.as_str())
                    }
                    aria-current=[is_current.then_some("true")]
                    class={
                        "px-4 py-2 rounded-lg text-sm "
                        @if is_current {
                            "bg-blue-600 text-white"
                        } @else {
                            "bg-gray-200 text-gray-800 hover:bg-gray-300 dark:bg-gray-700 dark:text-gray-200"
                        }
                    }
                {
                    (view.label())
                }
            }
        }
    }
}

fn pie_section_view(section: &PieSection, controls: Markup) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4 text-center" { (section.title) }

            (controls)

            div class="grid grid-cols-1 md:grid-cols-3 gap-4 items-center"
            {
                div class="md:col-span-2"
                {
                    @if let Some(chart) = &section.chart {
                        div id=(chart.id) class="min-h-[340px] rounded" {}
                    } @else {
                        p
                            class="flex items-center justify-center min-h-[200px] text-sm
                            text-gray-500 dark:text-gray-400"
                            data-empty-chart
                        {
                            "No data to display."
                        }
                    }
                }

                (section.top)
            }
        }
    }
}

fn glance_view(page: GlancePage, theme: Theme) -> Markup {
    let nav_bar = NavBar::new(endpoints::GLANCE_VIEW).into_html();

    let charts: Vec<&PageChart> = page
        .expenses
        .chart
        .iter()
        .chain(page.earnings.chart.iter())
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
                h1 class="text-2xl font-bold text-center" { "Financial Overview" }

                @if let Some(error) = &page.fetch_error {
                    (fetch_error_banner(&error.to_string()))
                }

                (totals_view(&page.totals))

                div class="grid grid-cols-1 gap-6"
                {
                    (pie_section_view(&page.expenses, expense_view_tabs(page.view, page.sort)))
                    (pie_section_view(&page.earnings, html! {}))
                }

                (transactions_view(&page.transactions, page.sort, page.view.as_str()))
            }
        }
    };

    base("Glance", theme, &head_elements, &content)
}
