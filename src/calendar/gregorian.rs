use super::{CalendarDate, MonthStep, OutOfRangeError};
use time::{util::is_leap_year, Date, Month};

impl CalendarDate for Date {
    const SYSTEM: &'static str = "greg";

    type Month = Month;

    fn from_civil(date: Date) -> Result<Date, OutOfRangeError> {
        Ok(date)
    }

    fn to_civil(self) -> Date {
        self
    }

    fn year(self) -> i32 {
        Date::year(self)
    }

    fn month(self) -> Month {
        Date::month(self)
    }

    fn day(self) -> u8 {
        Date::day(self)
    }

    fn days_in_month(self) -> u8 {
        month_length(Date::year(self), Date::month(self))
    }

    fn with_day(self, day: u8) -> Option<Date> {
        self.replace_day(day).ok()
    }

    fn adjacent_month(self, step: MonthStep) -> Result<Date, OutOfRangeError> {
        let (year, month) = match (step, Date::month(self)) {
            (MonthStep::Previous, Month::January) => (Date::year(self) - 1, Month::December),
            (MonthStep::Previous, m) => (Date::year(self), m.previous()),
            (MonthStep::Next, Month::December) => (Date::year(self) + 1, Month::January),
            (MonthStep::Next, m) => (Date::year(self), m.next()),
        };
        Date::from_calendar_date(year, month, 1).map_err(|_| OutOfRangeError)
    }

    fn short_month_name(self) -> String {
        Date::month(self).to_string().chars().take(3).collect()
    }
}

fn month_length(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_month_lengths() {
        assert_eq!(date!(2024 - 01 - 10).days_in_month(), 31);
        assert_eq!(date!(2024 - 02 - 10).days_in_month(), 29);
        assert_eq!(date!(2023 - 02 - 10).days_in_month(), 28);
        assert_eq!(date!(1900 - 02 - 10).days_in_month(), 28);
        assert_eq!(date!(2000 - 02 - 10).days_in_month(), 29);
        assert_eq!(date!(2024 - 04 - 10).days_in_month(), 30);
        assert_eq!(date!(2024 - 12 - 10).days_in_month(), 31);
    }

    #[test]
    fn test_month_length_matches_next_day() {
        let mut date = date!(2023 - 01 - 01);
        while date.year() < 2025 {
            let len = date.days_in_month();
            let last = date.with_day(len).unwrap();
            assert_ne!(last.next_day().map(Date::month), Some(last.month()));
            assert_eq!(date.with_day(len + 1), None);
            date = date.adjacent_month(MonthStep::Next).unwrap();
        }
    }

    #[test]
    fn test_short_month_name() {
        assert_eq!(date!(2024 - 09 - 15).short_month_name(), "Sep");
        assert_eq!(date!(2024 - 05 - 15).short_month_name(), "May");
    }

    #[test]
    fn test_adjacent_month() {
        assert_eq!(
            date!(2024 - 03 - 31).adjacent_month(MonthStep::Previous),
            Ok(date!(2024 - 02 - 01))
        );
        assert_eq!(
            date!(2024 - 12 - 05).adjacent_month(MonthStep::Next),
            Ok(date!(2025 - 01 - 01))
        );
    }
}
