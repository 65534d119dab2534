mod gregorian;
mod grid;
pub(crate) mod hebrew;
mod widget;
pub(crate) use self::grid::{build_grid, cell_mark, CellMark, GridCell};
pub(crate) use self::hebrew::HebrewDate;
pub(crate) use self::widget::MonthView;
use crate::events::DateKey;
use std::fmt::{Debug, Display};
use thiserror::Error;
use time::Weekday;

/// A day in some calendar system.  Every value is also representable as a
/// civil (proleptic Gregorian) [`time::Date`], which is what weekdays are
/// computed from.
pub(crate) trait CalendarDate: Copy + Debug + Eq {
    /// Tag distinguishing this calendar system's [`DateKey`]s from those of
    /// other systems
    const SYSTEM: &'static str;

    /// Month identifier.  Its `Display` is the month's full name.
    type Month: Copy + Debug + Display + Eq;

    fn from_civil(date: time::Date) -> Result<Self, OutOfRangeError>;

    fn to_civil(self) -> time::Date;

    fn year(self) -> i32;

    fn month(self) -> Self::Month;

    fn day(self) -> u8;

    fn days_in_month(self) -> u8;

    /// Returns the date in the same month with the given day-of-month, or
    /// `None` if there is no such day
    fn with_day(self, day: u8) -> Option<Self>;

    /// Returns the first day of the month before or after this one
    fn adjacent_month(self, step: MonthStep) -> Result<Self, OutOfRangeError>;

    /// Abbreviated month name, as used in the events panel title
    fn short_month_name(self) -> String;

    fn weekday(self) -> Weekday {
        self.to_civil().weekday()
    }

    fn first_of_month(self) -> Self {
        // Day 1 of a month containing a representable date is itself
        // representable except at the very start of time, where `self` is
        // the earliest day we can show anyway.
        self.with_day(1).unwrap_or(self)
    }

    fn same_month(self, other: Self) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    fn key(self) -> DateKey {
        DateKey::of(self)
    }

    /// "September 2024", "Tishrei 5785"
    fn month_title(self) -> String {
        format!("{} {}", self.month(), self.year())
    }

    /// "Sunday, September 15, 2024", "Thursday, Tishrei 20, 5785"
    fn long_label(self) -> String {
        format!(
            "{}, {} {}, {}",
            self.weekday(),
            self.month(),
            self.day(),
            self.year()
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum MonthStep {
    Previous,
    Next,
}

impl MonthStep {
    pub(crate) fn offset(self) -> i8 {
        match self {
            MonthStep::Previous => -1,
            MonthStep::Next => 1,
        }
    }
}

/// Move `date` one month backwards or forwards.  The day-of-month is kept
/// where possible; if the destination month is shorter, the result is its
/// last day.
pub(crate) fn advance<D: CalendarDate>(date: D, step: MonthStep) -> Result<D, OutOfRangeError> {
    let first = date.adjacent_month(step)?;
    let day = date.day().min(first.days_in_month());
    first.with_day(day).ok_or(OutOfRangeError)
}

/// Does `day` of `reference`'s month denote `today`?
pub(crate) fn is_today<D: CalendarDate>(day: u8, reference: D, today: D) -> bool {
    day == today.day() && reference.same_month(today)
}

/// Does `day` of `reference`'s month denote `selected`?
pub(crate) fn is_selected<D: CalendarDate>(day: u8, reference: D, selected: D) -> bool {
    day == selected.day() && reference.same_month(selected)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("date is outside the supported range")]
pub(crate) struct OutOfRangeError;
