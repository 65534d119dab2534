//! Arithmetic Hebrew calendar
//!
//! Years are counted from the creation epoch (AM) and begin on 1 Tishrei.
//! The length of a year is determined by the molad (mean conjunction) of
//! Tishrei together with the postponement rules; the lengths of Cheshvan and
//! Kislev absorb the resulting variation.  Leap years, seven of every
//! nineteen, insert Adar I before Adar (then called Adar II).
use super::{CalendarDate, MonthStep, OutOfRangeError};
use std::fmt;
use time::Date;

/// Julian day number of the day before 1 Tishrei AM 1 in `elapsed_days()`
/// reckoning
const EPOCH_JDN: i64 = 347_997;

const PARTS_PER_HOUR: i64 = 1080;

const HOURS_PER_DAY: i64 = 24;

/// Length of a lunation beyond 29 days, in hours & parts: 12h 793p
const LUNATION_HOURS: i64 = 12;
const LUNATION_PARTS: i64 = 793;

/// Molad of Tishrei AM 1 (BaHaRaD): 5h 204p after the start of day 1
const MOLAD_BEHARAD_HOURS: i64 = 5;
const MOLAD_BEHARAD_PARTS: i64 = 204;

static COMMON_MONTHS: &[HebrewMonth] = &[
    HebrewMonth::Tishrei,
    HebrewMonth::Cheshvan,
    HebrewMonth::Kislev,
    HebrewMonth::Tevet,
    HebrewMonth::Shvat,
    HebrewMonth::Adar,
    HebrewMonth::Nisan,
    HebrewMonth::Iyyar,
    HebrewMonth::Sivan,
    HebrewMonth::Tamuz,
    HebrewMonth::Av,
    HebrewMonth::Elul,
];

static LEAP_MONTHS: &[HebrewMonth] = &[
    HebrewMonth::Tishrei,
    HebrewMonth::Cheshvan,
    HebrewMonth::Kislev,
    HebrewMonth::Tevet,
    HebrewMonth::Shvat,
    HebrewMonth::AdarI,
    HebrewMonth::AdarII,
    HebrewMonth::Nisan,
    HebrewMonth::Iyyar,
    HebrewMonth::Sivan,
    HebrewMonth::Tamuz,
    HebrewMonth::Av,
    HebrewMonth::Elul,
];

/// Months of the Hebrew calendar.  `Adar` only occurs in common years;
/// `AdarI` and `AdarII` only occur in leap years.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum HebrewMonth {
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    Shvat,
    Adar,
    AdarI,
    AdarII,
    Nisan,
    Iyyar,
    Sivan,
    Tamuz,
    Av,
    Elul,
}

impl HebrewMonth {
    pub(crate) fn name(self) -> &'static str {
        match self {
            HebrewMonth::Tishrei => "Tishrei",
            HebrewMonth::Cheshvan => "Cheshvan",
            HebrewMonth::Kislev => "Kislev",
            HebrewMonth::Tevet => "Tevet",
            HebrewMonth::Shvat => "Sh'vat",
            HebrewMonth::Adar => "Adar",
            HebrewMonth::AdarI => "Adar I",
            HebrewMonth::AdarII => "Adar II",
            HebrewMonth::Nisan => "Nisan",
            HebrewMonth::Iyyar => "Iyyar",
            HebrewMonth::Sivan => "Sivan",
            HebrewMonth::Tamuz => "Tamuz",
            HebrewMonth::Av => "Av",
            HebrewMonth::Elul => "Elul",
        }
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct HebrewYear(i32);

impl HebrewYear {
    fn is_leap(self) -> bool {
        (7 * i64::from(self.0) + 1).rem_euclid(19) < 7
    }

    fn months(self) -> &'static [HebrewMonth] {
        if self.is_leap() {
            LEAP_MONTHS
        } else {
            COMMON_MONTHS
        }
    }

    fn previous(self) -> HebrewYear {
        HebrewYear(self.0 - 1)
    }

    fn next(self) -> HebrewYear {
        HebrewYear(self.0 + 1)
    }

    /// Number of days from the epoch to 1 Tishrei of this year, counting the
    /// epoch's first day as day 1
    fn elapsed_days(self) -> i64 {
        let y = i64::from(self.0) - 1;
        let cycle_year = y.rem_euclid(19);
        let months = 235 * y.div_euclid(19) + 12 * cycle_year + (7 * cycle_year + 1) / 19;
        let parts = MOLAD_BEHARAD_PARTS + LUNATION_PARTS * months.rem_euclid(PARTS_PER_HOUR);
        let hours = MOLAD_BEHARAD_HOURS
            + LUNATION_HOURS * months
            + LUNATION_PARTS * months.div_euclid(PARTS_PER_HOUR)
            + parts.div_euclid(PARTS_PER_HOUR);
        let mut day = 1 + 29 * months + hours.div_euclid(HOURS_PER_DAY);
        let parts = PARTS_PER_HOUR * hours.rem_euclid(HOURS_PER_DAY) + parts.rem_euclid(PARTS_PER_HOUR);
        // Molad zaken, GaTaRaD, and BeTU'TaKPaT
        if parts >= 18 * PARTS_PER_HOUR
            || (day.rem_euclid(7) == 2 && parts >= 9 * PARTS_PER_HOUR + 204 && !self.is_leap())
            || (day.rem_euclid(7) == 1
                && parts >= 15 * PARTS_PER_HOUR + 589
                && self.previous().is_leap())
        {
            day += 1;
        }
        // Lo ADU Rosh
        if matches!(day.rem_euclid(7), 0 | 3 | 5) {
            day += 1;
        }
        day
    }

    fn start_jdn(self) -> i64 {
        self.elapsed_days() + EPOCH_JDN
    }

    fn length(self) -> i64 {
        self.next().elapsed_days() - self.elapsed_days()
    }

    fn month_length(self, month: HebrewMonth) -> u8 {
        match month {
            HebrewMonth::Cheshvan if self.length() % 10 == 5 => 30,
            HebrewMonth::Kislev if self.length() % 10 == 3 => 29,
            HebrewMonth::Tishrei
            | HebrewMonth::Kislev
            | HebrewMonth::Shvat
            | HebrewMonth::AdarI
            | HebrewMonth::Nisan
            | HebrewMonth::Sivan
            | HebrewMonth::Av => 30,
            HebrewMonth::Cheshvan
            | HebrewMonth::Tevet
            | HebrewMonth::Adar
            | HebrewMonth::AdarII
            | HebrewMonth::Iyyar
            | HebrewMonth::Tamuz
            | HebrewMonth::Elul => 29,
        }
    }

    fn month_index(self, month: HebrewMonth) -> Option<usize> {
        self.months().iter().position(|&m| m == month)
    }

    /// Julian day number of the first day of `month`, which must occur in
    /// this year
    fn month_start_jdn(self, month: HebrewMonth) -> i64 {
        self.months()
            .iter()
            .take_while(|&&m| m != month)
            .map(|&m| i64::from(self.month_length(m)))
            .sum::<i64>()
            + self.start_jdn()
    }

    fn containing_jdn(jdn: i64, civil_year: i32) -> HebrewYear {
        let mut year = HebrewYear(civil_year + 3760);
        while year.start_jdn() > jdn {
            year = year.previous();
        }
        while year.next().start_jdn() <= jdn {
            year = year.next();
        }
        year
    }
}

/// A date in the Hebrew calendar.  The corresponding civil date is computed
/// on construction, so every value lies within the range of [`time::Date`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct HebrewDate {
    year: i32,
    month: HebrewMonth,
    day: u8,
    civil: Date,
}

impl HebrewDate {
    /// Returns `None` if `month` does not occur in `year`, if `day` is not in
    /// the month, or if the date cannot be represented as a civil date
    pub(crate) fn new(year: i32, month: HebrewMonth, day: u8) -> Option<HebrewDate> {
        let hy = HebrewYear(year);
        hy.month_index(month)?;
        if day == 0 || day > hy.month_length(month) {
            return None;
        }
        let jdn = hy.month_start_jdn(month) + i64::from(day) - 1;
        let civil = i32::try_from(jdn)
            .ok()
            .and_then(|j| Date::from_julian_day(j).ok())?;
        Some(HebrewDate {
            year,
            month,
            day,
            civil,
        })
    }
}

impl CalendarDate for HebrewDate {
    const SYSTEM: &'static str = "heb";

    type Month = HebrewMonth;

    fn from_civil(date: Date) -> Result<HebrewDate, OutOfRangeError> {
        let jdn = i64::from(date.to_julian_day());
        let year = HebrewYear::containing_jdn(jdn, date.year());
        let mut offset = jdn - year.start_jdn();
        for &month in year.months() {
            let len = i64::from(year.month_length(month));
            if offset < len {
                let day = u8::try_from(offset + 1).map_err(|_| OutOfRangeError)?;
                return Ok(HebrewDate {
                    year: year.0,
                    month,
                    day,
                    civil: date,
                });
            }
            offset -= len;
        }
        // The months of a year always add up to its length.
        Err(OutOfRangeError)
    }

    fn to_civil(self) -> Date {
        self.civil
    }

    fn year(self) -> i32 {
        self.year
    }

    fn month(self) -> HebrewMonth {
        self.month
    }

    fn day(self) -> u8 {
        self.day
    }

    fn days_in_month(self) -> u8 {
        HebrewYear(self.year).month_length(self.month)
    }

    fn with_day(self, day: u8) -> Option<HebrewDate> {
        HebrewDate::new(self.year, self.month, day)
    }

    fn adjacent_month(self, step: MonthStep) -> Result<HebrewDate, OutOfRangeError> {
        let year = HebrewYear(self.year);
        let months = year.months();
        let i = year.month_index(self.month).ok_or(OutOfRangeError)?;
        let (year, month) = match step {
            MonthStep::Previous => match i.checked_sub(1) {
                Some(j) => (year, months[j]),
                None => (year.previous(), HebrewMonth::Elul),
            },
            MonthStep::Next => match months.get(i + 1) {
                Some(&m) => (year, m),
                None => (year.next(), HebrewMonth::Tishrei),
            },
        };
        HebrewDate::new(year.0, month, 1).ok_or(OutOfRangeError)
    }

    fn short_month_name(self) -> String {
        self.month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_leap_years() {
        let leaps = (5780..5790)
            .filter(|&y| HebrewYear(y).is_leap())
            .collect::<Vec<_>>();
        assert_eq!(leaps, [5782, 5784, 5787]);
    }

    #[test]
    fn test_year_lengths() {
        let lengths = (5780..5790)
            .map(|y| HebrewYear(y).length())
            .collect::<Vec<_>>();
        assert_eq!(
            lengths,
            [355, 353, 384, 355, 383, 355, 354, 385, 355, 354]
        );
    }

    #[test]
    fn test_new_years() {
        for (year, civil) in [
            (5760, date!(1999 - 09 - 11)),
            (5783, date!(2022 - 09 - 26)),
            (5784, date!(2023 - 09 - 16)),
            (5785, date!(2024 - 10 - 03)),
            (5786, date!(2025 - 09 - 23)),
        ] {
            let hd = HebrewDate::new(year, HebrewMonth::Tishrei, 1).unwrap();
            assert_eq!(hd.to_civil(), civil, "1 Tishrei {year}");
            assert_eq!(HebrewDate::from_civil(civil), Ok(hd));
        }
    }

    #[test]
    fn test_passover() {
        let hd = HebrewDate::from_civil(date!(2025 - 04 - 13)).unwrap();
        assert_eq!(hd.year(), 5785);
        assert_eq!(hd.month(), HebrewMonth::Nisan);
        assert_eq!(hd.day(), 15);
    }

    #[test]
    fn test_month_lengths_5785() {
        // A complete year: Cheshvan & Kislev both have 30 days
        let lengths = COMMON_MONTHS
            .iter()
            .map(|&m| HebrewDate::new(5785, m, 1).unwrap().days_in_month())
            .collect::<Vec<_>>();
        assert_eq!(lengths, [30, 30, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29]);
    }

    #[test]
    fn test_month_lengths_deficient_year() {
        // 5781 has 353 days: Cheshvan & Kislev both have 29
        let year = HebrewYear(5781);
        assert_eq!(year.month_length(HebrewMonth::Cheshvan), 29);
        assert_eq!(year.month_length(HebrewMonth::Kislev), 29);
    }

    #[test]
    fn test_month_lengths_sum_to_year_length() {
        for y in 5700..5800 {
            let year = HebrewYear(y);
            let total = year
                .months()
                .iter()
                .map(|&m| i64::from(year.month_length(m)))
                .sum::<i64>();
            assert_eq!(total, year.length(), "year {y}");
        }
    }

    #[test]
    fn test_adar_by_year_kind() {
        assert!(HebrewDate::new(5785, HebrewMonth::Adar, 1).is_some());
        assert!(HebrewDate::new(5785, HebrewMonth::AdarI, 1).is_none());
        assert!(HebrewDate::new(5784, HebrewMonth::Adar, 1).is_none());
        assert!(HebrewDate::new(5784, HebrewMonth::AdarI, 30).is_some());
        assert!(HebrewDate::new(5784, HebrewMonth::AdarII, 29).is_some());
        assert!(HebrewDate::new(5784, HebrewMonth::AdarII, 30).is_none());
    }

    #[test]
    fn test_invalid_days() {
        assert_eq!(HebrewDate::new(5785, HebrewMonth::Tevet, 0), None);
        assert_eq!(HebrewDate::new(5785, HebrewMonth::Tevet, 30), None);
    }

    #[test]
    fn test_civil_round_trip_across_years() {
        let mut civil = date!(2023 - 09 - 01);
        let mut prev = HebrewDate::from_civil(civil).unwrap();
        while civil < date!(2025 - 10 - 01) {
            civil = civil.next_day().unwrap();
            let hd = HebrewDate::from_civil(civil).unwrap();
            assert_eq!(hd.to_civil(), civil);
            assert!(hd.day() >= 1 && hd.day() <= hd.days_in_month());
            if hd.day() == 1 {
                assert_eq!(prev.day(), prev.days_in_month(), "{hd:?}");
            } else {
                assert_eq!(hd.day(), prev.day() + 1, "{hd:?}");
            }
            prev = hd;
        }
    }

    #[test]
    fn test_first_weekdays() {
        for (month, year, weekday) in [
            (HebrewMonth::Tishrei, 5785, time::Weekday::Thursday),
            (HebrewMonth::Cheshvan, 5785, time::Weekday::Saturday),
            (HebrewMonth::Nisan, 5785, time::Weekday::Sunday),
            (HebrewMonth::AdarII, 5784, time::Weekday::Monday),
        ] {
            let hd = HebrewDate::new(year, month, 1).unwrap();
            assert_eq!(hd.weekday(), weekday, "{month} {year}");
        }
    }

    #[test]
    fn test_month_names() {
        assert_eq!(HebrewMonth::Shvat.to_string(), "Sh'vat");
        assert_eq!(HebrewMonth::AdarII.to_string(), "Adar II");
    }
}
