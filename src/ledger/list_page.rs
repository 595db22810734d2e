//! The list page for a ledger with its filter, sort and record form.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthSession, redirect_to_log_out},
    backend::{FetchError, Repository},
    endpoints::format_endpoint,
    filters::{CategoryFilter, SortOption, category_options, filter_and_sort},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, dollar_input_styles, fetch_error_banner, format_currency, format_date,
    },
    modal::{ModalQuery, ModalState},
    navigation::NavBar,
    record::Record,
    theme::Theme,
    timezone::timezone_or_error,
};

use super::{
    Ledger, LedgerState,
    form::{FormTarget, record_form},
};

/// The filter and sort query parameters, e.g. `?category=Food&sort=amount-desc`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<SortOption>,
}

struct ListView<'a, L: Ledger> {
    rows: Vec<&'a L>,
    categories: Vec<String>,
    filter: CategoryFilter,
    sort: SortOption,
    modal: ModalState<L::Draft>,
    fetch_error: Option<FetchError>,
}

/// Display the records of ledger `L`, filtered and sorted by the query.
///
/// `?create=true` and `?edit={id}` open the record form.
pub async fn get_ledger_page<R: Repository, L: Ledger>(
    State(state): State<LedgerState<R>>,
    session: AuthSession,
    theme: Theme,
    Query(list_query): Query<ListQuery>,
    Query(modal_query): Query<ModalQuery>,
) -> Result<Response, Error> {
    let timezone = timezone_or_error(&state.local_timezone)?;

    let (records, fetch_error) = match state.repository.fetch::<L>(&session, timezone).await {
        Ok(records) => (records, None),
        Err(error) if error.is_unauthorized() => return Ok(redirect_to_log_out()),
        Err(error) => {
            tracing::error!("could not fetch {}: {error}", L::NAME);
            (Vec::new(), Some(error))
        }
    };

    let filter = CategoryFilter::from_query(list_query.category.as_deref());
    let sort = list_query.sort.unwrap_or_default();

    let view = ListView::<L> {
        rows: filter_and_sort(&records, &filter, sort),
        categories: category_options(&records, &filter),
        modal: ModalState::from_query(&modal_query, &records),
        filter,
        sort,
        fetch_error,
    };

    Ok(ledger_view(view, theme).into_response())
}

fn empty_message<L: Ledger>(filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => format!("No {} found.", L::NAME),
        CategoryFilter::Only(category) => {
            format!("No {} found for category: {category}", L::NAME)
        }
    }
}

fn filter_form(categories: &[String], filter: &CategoryFilter, sort: SortOption) -> Markup {
    html! {
        form method="get" class="flex flex-wrap items-end gap-4" id="list-filters"
        {
            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="filter-category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in categories {
                        option value=(category) selected[category == filter.as_str()] { (category) }
                    }
                }
            }

            div
            {
                label for="filter-sort" class=(FORM_LABEL_STYLE) { "Sort by" }

                select name="sort" id="filter-sort" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for sort_option in SortOption::ALL {
                        option value=(sort_option.as_str()) selected[sort_option == sort]
                        {
                            (sort_option.label())
                        }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
            }
        }
    }
}

fn table_row<L: Ledger>(record: &L) -> Markup {
    let id = record.id().as_str();
    // Records whose id cannot go in a URL are shown without actions.
    let action_urls = record.id().url_segment().map(|segment| {
        (
            format!("{}?edit={segment}", L::VIEW),
            format_endpoint(L::ITEM_API, &segment),
        )
    });
    let confirm = format!(
        "Are you sure you want to delete the {} '{}'? This cannot be undone.",
        L::SINGULAR,
        record.description()
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-record-id=(id)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (record.description())
            }

            td class="px-6 py-4 text-right tabular-nums" { (format_currency(record.amount())) }
            td class=(TABLE_CELL_STYLE) { (format_date(record.date())) }
            td class=(TABLE_CELL_STYLE) { (record.category()) }
            td class=(TABLE_CELL_STYLE) { (record.extra_value()) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some((edit_url, delete_url)) = &action_urls {
                    div class="flex gap-4"
                    {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                        button
                            hx-delete=(delete_url)
                            hx-confirm=(confirm)
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

fn modal_view<L: Ledger>(modal: &ModalState<L::Draft>) -> Markup {
    let form = match modal {
        ModalState::Closed => return html! {},
        ModalState::Create(draft) => record_form::<L>(FormTarget::Create, draft, None),
        ModalState::Edit { id, draft } => record_form::<L>(FormTarget::Edit(id), draft, None),
    };

    html! {
        div
            id="record-modal"
            role="dialog"
            aria-modal="true"
            class="fixed inset-0 z-50 flex items-center justify-center bg-gray-900/60 px-4"
        {
            div
                class="w-full max-w-md rounded-lg bg-white p-6 shadow-xl
                text-gray-900 dark:bg-gray-800 dark:text-white"
            {
                (form)
            }
        }
    }
}

fn ledger_view<L: Ledger>(view: ListView<'_, L>, theme: Theme) -> Markup {
    let nav_bar = NavBar::new(L::VIEW).into_html();
    let create_url = format!("{}?create=true", L::VIEW);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (L::TITLE) }

                    a href=(create_url) class=(LINK_STYLE) id="create-record"
                    {
                        "Add " (L::SINGULAR)
                    }
                }

                @if let Some(error) = &view.fetch_error {
                    (fetch_error_banner(&error.to_string()))
                }

                (filter_form(&view.categories, &view.filter, view.sort))

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class="px-6 py-3 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { (L::EXTRA_COLUMN) }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for record in &view.rows {
                                (table_row(*record))
                            }

                            @if view.rows.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        (empty_message::<L>(&view.filter))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        (modal_view::<L>(&view.modal))
    };

    base(L::TITLE, theme, &[dollar_input_styles()], &content)
}
