//! The year, month and week picked for the Financial Report charts.

use std::fmt::Display;

use serde::Deserialize;
use time::{Date, Month, Weekday};

/// The first year offered in the year selector.
const FIRST_YEAR_OPTION: i32 = 2020;
/// How many years the year selector offers, starting at [FIRST_YEAR_OPTION].
const YEAR_OPTION_COUNT: i32 = 10;

/// Errors from building a [TimeSelection] from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeSelectionError {
    /// The month number is not in 1 to 12.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// The year is outside the range of supported calendar dates.
    #[error("{0} is not a supported year")]
    InvalidYear(i32),
}

/// The query parameters that select a time period, e.g. `?year=2024&month=3&week=2`.
///
/// Missing parameters fall back to the current month and the first week.
#[derive(Debug, Default, Deserialize)]
pub struct TimeSelectionQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub week: Option<u8>,
}

/// A year, a month and a week within that month.
///
/// The week is always in `1..=weeks_in_month()`. Changing the year or month
/// resets the week to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSelection {
    year: i32,
    month: Month,
    week: u8,
}

impl TimeSelection {
    /// Select the first week of `month` in `year`.
    ///
    /// # Errors
    /// Returns [TimeSelectionError::InvalidYear] if `year` cannot be
    /// represented as a calendar date.
    pub fn new(year: i32, month: Month) -> Result<Self, TimeSelectionError> {
        Date::from_calendar_date(year, month, 1)
            .map_err(|_| TimeSelectionError::InvalidYear(year))?;

        Ok(Self {
            year,
            month,
            week: 1,
        })
    }

    /// Build a selection from query parameters, using `today` for the
    /// parameters that are missing.
    ///
    /// An out of range week is clipped rather than rejected.
    ///
    /// # Errors
    /// Returns an error if the month or year is invalid.
    pub fn from_query(query: &TimeSelectionQuery, today: Date) -> Result<Self, TimeSelectionError> {
        let month = match query.month {
            Some(number) => {
                Month::try_from(number).map_err(|_| TimeSelectionError::InvalidMonth(number))?
            }
            None => today.month(),
        };
        let year = query.year.unwrap_or(today.year());
        let selection = Self::new(year, month)?;

        Ok(match query.week {
            Some(week) => selection.with_week(week),
            None => selection,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn week(&self) -> u8 {
        self.week
    }

    /// The same month in another year, back at week 1.
    ///
    /// # Errors
    /// Returns [TimeSelectionError::InvalidYear] if `year` is out of range.
    pub fn with_year(self, year: i32) -> Result<Self, TimeSelectionError> {
        Self::new(year, self.month)
    }

    /// Another month in the same year, back at week 1.
    pub fn with_month(self, month: Month) -> Self {
        Self { week: 1, month, ..self }
    }

    /// Another week of the same month, clipped to `1..=weeks_in_month()`.
    pub fn with_week(self, week: u8) -> Self {
        Self {
            week: week.clamp(1, self.weeks_in_month()),
            ..self
        }
    }

    /// The number of days in the selected month.
    pub fn days_in_month(&self) -> u8 {
        self.month.length(self.year)
    }

    /// The number of (possibly partial) seven day weeks in the selected month.
    pub fn weeks_in_month(&self) -> u8 {
        self.days_in_month().div_ceil(7)
    }

    /// The day of the month the selected week starts on.
    pub fn week_start_day(&self) -> u8 {
        (self.week - 1) * 7 + 1
    }

    /// Labels for the seven days of the selected week.
    ///
    /// Positions past the end of the month are `None`, e.g. the last four
    /// positions of week 5 in a 31 day month.
    pub fn day_labels(&self) -> [Option<DayLabel>; 7] {
        let start = self.week_start_day();

        std::array::from_fn(|offset| {
            let day = start + offset as u8;
            Date::from_calendar_date(self.year, self.month, day)
                .ok()
                .map(|date| DayLabel {
                    weekday: date.weekday(),
                    day,
                })
        })
    }

    /// The years offered by the year selector, always including the selected
    /// year.
    pub fn year_options(&self) -> Vec<i32> {
        let mut years: Vec<i32> = (FIRST_YEAR_OPTION..FIRST_YEAR_OPTION + YEAR_OPTION_COUNT).collect();

        if !years.contains(&self.year) {
            years.push(self.year);
            years.sort_unstable();
        }

        years
    }

    /// Query parameters that reproduce this selection.
    pub fn to_query(&self) -> String {
        format!(
            "year={}&month={}&week={}",
            self.year, self.month as u8, self.week
        )
    }
}

impl Display for TimeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// The label for one day column of the daily chart, e.g. "Mon 4".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLabel {
    pub weekday: Weekday,
    pub day: u8,
}

impl Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weekday = match self.weekday {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        };

        write!(f, "{weekday} {}", self.day)
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, Weekday, macros::date};

    use super::{DayLabel, TimeSelection, TimeSelectionError, TimeSelectionQuery};

    #[test]
    fn weeks_in_month_rounds_up() {
        let february = TimeSelection::new(2023, Month::February).unwrap();
        let leap_february = TimeSelection::new(2024, Month::February).unwrap();
        let april = TimeSelection::new(2024, Month::April).unwrap();
        let march = TimeSelection::new(2024, Month::March).unwrap();

        assert_eq!(february.weeks_in_month(), 4);
        assert_eq!(leap_february.weeks_in_month(), 5);
        assert_eq!(april.weeks_in_month(), 5);
        assert_eq!(march.weeks_in_month(), 5);
    }

    #[test]
    fn changing_year_or_month_resets_week() {
        let selection = TimeSelection::new(2024, Month::March)
            .unwrap()
            .with_week(3);

        assert_eq!(selection.week(), 3);
        assert_eq!(selection.with_month(Month::April).week(), 1);
        assert_eq!(selection.with_year(2025).unwrap().week(), 1);
    }

    #[test]
    fn week_is_clipped_to_month() {
        let february = TimeSelection::new(2023, Month::February).unwrap();

        assert_eq!(february.with_week(5).week(), 4);
        assert_eq!(february.with_week(0).week(), 1);
    }

    #[test]
    fn from_query_defaults_to_today() {
        let selection =
            TimeSelection::from_query(&TimeSelectionQuery::default(), date!(2024 - 07 - 19))
                .unwrap();

        assert_eq!(selection.year(), 2024);
        assert_eq!(selection.month(), Month::July);
        assert_eq!(selection.week(), 1);
    }

    #[test]
    fn from_query_uses_given_values() {
        let query = TimeSelectionQuery {
            year: Some(2022),
            month: Some(2),
            week: Some(9),
        };

        let selection = TimeSelection::from_query(&query, date!(2024 - 07 - 19)).unwrap();

        assert_eq!(selection.year(), 2022);
        assert_eq!(selection.month(), Month::February);
        assert_eq!(selection.week(), 4);
    }

    #[test]
    fn from_query_rejects_invalid_month() {
        let query = TimeSelectionQuery {
            month: Some(13),
            ..Default::default()
        };

        assert_eq!(
            TimeSelection::from_query(&query, date!(2024 - 07 - 19)),
            Err(TimeSelectionError::InvalidMonth(13))
        );
    }

    #[test]
    fn day_labels_stop_at_month_end() {
        let selection = TimeSelection::new(2024, Month::March)
            .unwrap()
            .with_week(5);

        let labels = selection.day_labels();

        assert_eq!(
            labels[0],
            Some(DayLabel {
                weekday: Weekday::Friday,
                day: 29
            })
        );
        assert_eq!(labels[2].map(|label| label.to_string()), Some("Sun 31".to_owned()));
        assert!(labels[3..].iter().all(Option::is_none));
    }

    #[test]
    fn year_options_include_selected_year() {
        let inside = TimeSelection::new(2024, Month::May).unwrap();
        let outside = TimeSelection::new(2031, Month::May).unwrap();

        assert_eq!(inside.year_options(), (2020..2030).collect::<Vec<_>>());
        assert_eq!(outside.year_options().last(), Some(&2031));
        assert_eq!(outside.year_options().len(), 11);
    }

    #[test]
    fn query_string_round_trips_selection() {
        let selection = TimeSelection::new(2024, Month::March)
            .unwrap()
            .with_week(2);

        assert_eq!(selection.to_query(), "year=2024&month=3&week=2");
        assert_eq!(selection.to_string(), "March 2024");
    }
}
