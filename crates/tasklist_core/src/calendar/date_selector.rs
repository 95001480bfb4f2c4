//! Inline date picker state and calendar math.
//!
//! # Responsibility
//! - Compute the day grid of a month and format a picked day for display.
//! - Track which month is on screen while the picker is open.
//!
//! # Invariants
//! - `view_month` is always in `0..=11`.
//! - Month navigation wraps across year boundaries in both directions.
//! - Navigation is visual only until a day is picked; cancel restores the
//!   month/year that was committed when the picker opened.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Month names used in display strings, indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

static DISPLAY_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s+(\p{L}+)\s+(-?\d{1,6})\s*$").expect("valid display date regex")
});

/// Calendar contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month index outside `0..=11`.
    MonthOutOfRange(u32),
    /// Day outside `1..=days_in_month` for the viewed month.
    DayOutOfRange { day: u32, max: u32 },
    /// Year not representable by the date backend.
    YearOutOfRange(i32),
    /// Selection attempted while the picker is closed.
    PickerClosed,
    /// Text is not a `"<day> <month name> <year>"` display date.
    UnparseableDate(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange(month) => write!(f, "month index {month} is outside 0..=11"),
            Self::DayOutOfRange { day, max } => write!(f, "day {day} is outside 1..={max}"),
            Self::YearOutOfRange(year) => write!(f, "year {year} is not supported"),
            Self::PickerClosed => write!(f, "date picker is not open"),
            Self::UnparseableDate(text) => write!(f, "not a display date: `{text}`"),
        }
    }
}

impl Error for CalendarError {}

/// Direction of a month navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

impl MonthStep {
    /// Maps a signed UI direction (`-1` / `+1`) to a step. Zero is no step.
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta.signum() {
            -1 => Some(Self::Previous),
            1 => Some(Self::Next),
            _ => None,
        }
    }
}

/// Returns the ordered day numbers `1..=N` of `month` (zero-based) in `year`.
pub fn days_in_month(month: u32, year: i32) -> Result<RangeInclusive<u32>, CalendarError> {
    check_month(month)?;
    let (next_month, next_year) = shift_month(month, year, MonthStep::Next)?;
    // Day 0 of the following month is the last day of this one.
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month + 1, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or(CalendarError::YearOutOfRange(year))?
        .day();
    Ok(1..=last_day)
}

/// Formats a picked day as `"<day> <month name> <year>"`.
pub fn format_date(day: u32, month: u32, year: i32) -> Result<String, CalendarError> {
    let name = MONTH_NAMES
        .get(month as usize)
        .ok_or(CalendarError::MonthOutOfRange(month))?;
    Ok(format!("{day} {name} {year}"))
}

/// Parses a string produced by [`format_date`] back into `(day, month, year)`.
pub fn parse_display_date(text: &str) -> Result<(u32, u32, i32), CalendarError> {
    let unparseable = || CalendarError::UnparseableDate(text.to_string());
    let captures = DISPLAY_DATE_RE.captures(text).ok_or_else(unparseable)?;

    let day: u32 = captures[1].parse().map_err(|_| unparseable())?;
    let month = MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(&captures[2]))
        .ok_or_else(unparseable)? as u32;
    let year: i32 = captures[3].parse().map_err(|_| unparseable())?;

    let days = days_in_month(month, year)?;
    if !days.contains(&day) {
        return Err(CalendarError::DayOutOfRange {
            day,
            max: *days.end(),
        });
    }
    Ok((day, month, year))
}

/// Moves one month back or forward, wrapping the year at the boundaries.
///
/// Fails when wrapping would leave the `i32` year range.
pub fn shift_month(month: u32, year: i32, step: MonthStep) -> Result<(u32, i32), CalendarError> {
    let shifted = match step {
        MonthStep::Previous if month == 0 => year.checked_sub(1).map(|year| (11, year)),
        MonthStep::Previous => Some((month - 1, year)),
        MonthStep::Next if month >= 11 => year.checked_add(1).map(|year| (0, year)),
        MonthStep::Next => Some((month + 1, year)),
    };
    shifted.ok_or(CalendarError::YearOutOfRange(year))
}

fn check_month(month: u32) -> Result<(), CalendarError> {
    if month > 11 {
        return Err(CalendarError::MonthOutOfRange(month));
    }
    Ok(())
}

/// A committed picker selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePick {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// Display string, e.g. `"5 Januari 2025"`.
    pub label: String,
}

/// Picker visibility and the month currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    view_month: u32,
    view_year: i32,
    selected_day: Option<u32>,
    committed: (u32, i32),
    open: bool,
}

impl DatePicker {
    /// Closed picker whose first open shows the current local month.
    pub fn today() -> Self {
        Self::starting_at(Local::now().date_naive())
    }

    /// Closed picker whose first open shows the month of `date`.
    pub fn starting_at(date: NaiveDate) -> Self {
        let month = date.month0();
        let year = date.year();
        Self {
            view_month: month,
            view_year: year,
            selected_day: None,
            committed: (month, year),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view_month(&self) -> u32 {
        self.view_month
    }

    pub fn view_year(&self) -> i32 {
        self.view_year
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.selected_day
    }

    /// Day grid of the month on screen.
    pub fn visible_days(&self) -> RangeInclusive<u32> {
        // view_month is kept in range, so only an extreme year can fail here.
        days_in_month(self.view_month, self.view_year).unwrap_or(1..=0)
    }

    /// Heading text for the month on screen, e.g. `"Januari 2025"`.
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.view_month as usize], self.view_year)
    }

    /// Opens the picker. Re-opening an open picker keeps its view.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.committed = (self.view_month, self.view_year);
        self.open = true;
    }

    /// Opens the picker on the month of an already chosen display date.
    ///
    /// Falls back to the last committed month when `current` is not a
    /// display date. An already open picker keeps its view.
    pub fn open_at(&mut self, current: Option<&str>) {
        if self.open {
            return;
        }
        if let Some((day, month, year)) = current.and_then(|text| parse_display_date(text).ok()) {
            self.view_month = month;
            self.view_year = year;
            self.selected_day = Some(day);
        }
        self.open();
    }

    /// Moves the on-screen month. Returns the new `(month, year)`.
    ///
    /// Has no effect while the picker is closed or at the edge of the
    /// representable years.
    pub fn navigate(&mut self, step: MonthStep) -> (u32, i32) {
        if self.open {
            let target = shift_month(self.view_month, self.view_year, step)
                .and_then(|(month, year)| days_in_month(month, year).map(|_| (month, year)));
            match target {
                Ok(view) => (self.view_month, self.view_year) = view,
                Err(err) => {
                    debug!("event=picker_navigate module=calendar status=rejected reason={err}")
                }
            }
        }
        (self.view_month, self.view_year)
    }

    /// Picks `day` in the month on screen and closes the picker.
    pub fn select_day(&mut self, day: u32) -> Result<DatePick, CalendarError> {
        if !self.open {
            return Err(CalendarError::PickerClosed);
        }
        let days = days_in_month(self.view_month, self.view_year)?;
        if !days.contains(&day) {
            return Err(CalendarError::DayOutOfRange {
                day,
                max: *days.end(),
            });
        }

        let label = format_date(day, self.view_month, self.view_year)?;
        self.selected_day = Some(day);
        self.committed = (self.view_month, self.view_year);
        self.open = false;
        Ok(DatePick {
            day,
            month: self.view_month,
            year: self.view_year,
            label,
        })
    }

    /// Closes without picking and drops any navigation done while open.
    pub fn cancel(&mut self) {
        if !self.open {
            return;
        }
        (self.view_month, self.view_year) = self.committed;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{check_month, shift_month, CalendarError, MonthStep, DISPLAY_DATE_RE};

    #[test]
    fn check_month_rejects_twelve() {
        assert_eq!(check_month(12), Err(CalendarError::MonthOutOfRange(12)));
        assert_eq!(check_month(11), Ok(()));
    }

    #[test]
    fn shift_month_reports_year_overflow() {
        assert_eq!(
            shift_month(0, i32::MIN, MonthStep::Previous),
            Err(CalendarError::YearOutOfRange(i32::MIN))
        );
        assert_eq!(
            shift_month(11, i32::MAX, MonthStep::Next),
            Err(CalendarError::YearOutOfRange(i32::MAX))
        );
        assert_eq!(shift_month(3, i32::MAX, MonthStep::Next), Ok((4, i32::MAX)));
    }

    #[test]
    fn display_date_regex_tolerates_surrounding_whitespace() {
        let captures = DISPLAY_DATE_RE.captures("  6 Januari 2025 ").unwrap();
        assert_eq!(&captures[1], "6");
        assert_eq!(&captures[2], "Januari");
        assert_eq!(&captures[3], "2025");
    }
}
