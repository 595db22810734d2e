//! ECharts configuration and the markup that hosts the charts.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! initialized by a script in the page head.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::PreEscaped;

use crate::{
    buckets::{DailyBuckets, WeeklyBuckets},
    html::HeadElement,
    theme::Theme,
    time_selection::TimeSelection,
};

/// A chart with its HTML container ID and ECharts configuration.
pub struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl PageChart {
    pub fn new(id: &'static str, chart: &Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// Generates JavaScript that initializes `charts` in the ECharts `theme` and
/// resizes them with the window.
pub fn charts_script<'a>(
    charts: impl IntoIterator<Item = &'a PageChart>,
    theme: Theme,
) -> HeadElement {
    let echarts_theme = match theme {
        Theme::Light => "null",
        Theme::Dark => "'dark'",
    };

    let script_content = charts
        .into_iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{ return; }}
                    const chart = echarts.init(chartDom, {echarts_theme});
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The labels of the weekly chart, one per week of the selected month.
pub fn week_labels(selection: &TimeSelection) -> Vec<String> {
    (1..=selection.weeks_in_month())
        .map(|week| format!("W{week}"))
        .collect()
}

/// Earnings and expenses per week of the selected month.
pub fn weekly_chart(
    earnings: &WeeklyBuckets,
    expenses: &WeeklyBuckets,
    selection: &TimeSelection,
) -> Chart {
    let labels = week_labels(selection);
    let weeks = labels.len();

    bar_chart(
        "Weekly Overview",
        &selection.to_string(),
        labels,
        earnings[..weeks].to_vec(),
        expenses[..weeks].to_vec(),
    )
}

/// Earnings and expenses per day of the selected week.
///
/// Days past the end of the month are left out.
pub fn daily_chart(
    earnings: &DailyBuckets,
    expenses: &DailyBuckets,
    selection: &TimeSelection,
) -> Chart {
    let mut labels = Vec::with_capacity(7);
    let mut earning_values = Vec::with_capacity(7);
    let mut expense_values = Vec::with_capacity(7);

    for (index, label) in selection.day_labels().iter().enumerate() {
        if let Some(label) = label {
            labels.push(label.to_string());
            earning_values.push(earnings[index]);
            expense_values.push(expenses[index]);
        }
    }

    bar_chart(
        "Daily Breakdown",
        &format!("Week {}, {selection}", selection.week()),
        labels,
        earning_values,
        expense_values,
    )
}

fn bar_chart(
    title: &str,
    subtitle: &str,
    labels: Vec<String>,
    earnings: Vec<f64>,
    expenses: Vec<f64>,
) -> Chart {
    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(currency_tooltip())
        .legend(Legend::new().bottom("0"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("12%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Earnings").data(earnings))
        .series(Bar::new().name("Expenses").data(expenses))
}

/// A pie chart with one slice per `(label, amount)` pair.
pub fn pie_chart(title: &str, slices: &[(&str, f64)]) -> Chart {
    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|(label, amount)| (*amount, *label))
        .collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .series(Pie::new().name(title).radius("60%").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
