//! Weekly and daily sums of record amounts for the Financial Report charts.
//!
//! Weeks are counted from the first of the month in blocks of seven days, so
//! day 1-7 is week 1, day 8-14 is week 2 and so on. Most months end with a
//! short fifth week of one to three days.

use time::{Date, Month};

use crate::record::Record;

/// Sums for weeks 1 to 5 of a month. Weeks without records are 0.
pub type WeeklyBuckets = [f64; 5];

/// Sums for the seven days of a week. Days without records are 0.
pub type DailyBuckets = [f64; 7];

/// Sum the amounts of `records` dated in `month` of `year`, by week of the month.
///
/// Records without a date or from another month are skipped.
pub fn aggregate_by_week<R: Record>(records: &[R], year: i32, month: Month) -> WeeklyBuckets {
    let mut weeks = [0.0; 5];

    for (date, amount) in dated_amounts(records, year, month) {
        let week = week_of_month(date);
        weeks[usize::from(week - 1)] += amount;
    }

    weeks
}

/// Sum the amounts of `records` dated in `week` of `month`, by day of the week.
///
/// Slot 0 is the first day of the week, i.e. day `(week - 1) * 7 + 1` of the
/// month. Slots past the end of the month stay 0.
pub fn aggregate_by_day<R: Record>(
    records: &[R],
    year: i32,
    month: Month,
    week: u8,
) -> DailyBuckets {
    let mut days = [0.0; 7];

    if week == 0 {
        return days;
    }

    let start = u16::from(week - 1) * 7 + 1;

    for (date, amount) in dated_amounts(records, year, month) {
        let day = u16::from(date.day());

        if (start..start + 7).contains(&day) {
            days[usize::from(day - start)] += amount;
        }
    }

    days
}

/// The week of the month `date` falls in, from 1 to 5.
pub fn week_of_month(date: Date) -> u8 {
    (date.day() - 1) / 7 + 1
}

fn dated_amounts<R: Record>(
    records: &[R],
    year: i32,
    month: Month,
) -> impl Iterator<Item = (Date, f64)> + '_ {
    records.iter().filter_map(move |record| {
        let date = record.date()?;

        if date.year() != year || date.month() != month {
            return None;
        }

        let amount = record.amount();
        Some((date, if amount.is_finite() { amount } else { 0.0 }))
    })
}
