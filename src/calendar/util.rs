use std::fmt;
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// A calendar month, stored as the first day of the month
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct YearMonth(Date);

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Result<YearMonth, time::error::ComponentRange> {
        Date::from_calendar_date(year, month, 1).map(YearMonth)
    }

    pub fn containing(date: Date) -> YearMonth {
        YearMonth(date - Duration::days(i64::from(date.day()) - 1))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    pub fn first_day(self) -> Date {
        self.0
    }

    pub fn last_day(self) -> Date {
        self.0 + Duration::days(i64::from(self.days()) - 1)
    }

    /// Number of days in the month
    pub fn days(self) -> u8 {
        match self.month() {
            Month::February if time::util::is_leap_year(self.year()) => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    /// Returns the given day of the month, or `None` if the month is too
    /// short
    pub fn day(self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year(), self.month(), day).ok()
    }

    pub fn contains(self, date: Date) -> bool {
        YearMonth::containing(date) == self
    }

    pub fn next(self) -> Option<YearMonth> {
        self.last_day().next_day().map(YearMonth)
    }

    pub fn previous(self) -> Option<YearMonth> {
        self.0.previous_day().map(YearMonth::containing)
    }

    /// Returns the month `n` months after (or, if negative, before) this one,
    /// or `None` if that would leave the supported range of dates
    pub fn add_months(self, n: i32) -> Option<YearMonth> {
        let index = self.month_index().checked_add(n)?;
        let year = index.div_euclid(12);
        let month = u8::try_from(index.rem_euclid(12) + 1).ok()?;
        let month = Month::try_from(month).ok()?;
        YearMonth::new(year, month).ok()
    }

    /// Number of months from `self` to `other`; negative if `other` is
    /// earlier
    pub fn months_until(self, other: YearMonth) -> i32 {
        other.month_index() - self.month_index()
    }

    fn month_index(self) -> i32 {
        self.year() * 12 + i32::from(u8::from(self.month())) - 1
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

pub(crate) fn add_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_containing() {
        let ym = YearMonth::containing(date!(2024 - 02 - 17));
        assert_eq!(ym.first_day(), date!(2024 - 02 - 01));
        assert_eq!(ym.last_day(), date!(2024 - 02 - 29));
        assert_eq!(ym.days(), 29);
        assert!(ym.contains(date!(2024 - 02 - 29)));
        assert!(!ym.contains(date!(2024 - 03 - 01)));
    }

    #[test]
    fn test_days() {
        assert_eq!(YearMonth::new(2023, Month::February).unwrap().days(), 28);
        assert_eq!(YearMonth::new(1900, Month::February).unwrap().days(), 28);
        assert_eq!(YearMonth::new(2000, Month::February).unwrap().days(), 29);
        assert_eq!(YearMonth::new(2023, Month::September).unwrap().days(), 30);
        assert_eq!(YearMonth::new(2023, Month::December).unwrap().days(), 31);
    }

    #[test]
    fn test_next_and_previous_across_years() {
        let dec = YearMonth::new(2019, Month::December).unwrap();
        let jan = YearMonth::new(2020, Month::January).unwrap();
        assert_eq!(dec.next(), Some(jan));
        assert_eq!(jan.previous(), Some(dec));
    }

    #[test]
    fn test_add_months() {
        let ym = YearMonth::new(2020, Month::November).unwrap();
        assert_eq!(
            ym.add_months(3),
            Some(YearMonth::new(2021, Month::February).unwrap())
        );
        assert_eq!(
            ym.add_months(-11),
            Some(YearMonth::new(2019, Month::December).unwrap())
        );
        assert_eq!(ym.add_months(0), Some(ym));
    }

    #[test]
    fn test_months_until() {
        let a = YearMonth::new(2020, Month::November).unwrap();
        let b = YearMonth::new(2022, Month::January).unwrap();
        assert_eq!(a.months_until(b), 14);
        assert_eq!(b.months_until(a), -14);
    }

    #[test]
    fn test_end_of_time() {
        let last = YearMonth::containing(Date::MAX);
        assert_eq!(last.next(), None);
        assert_eq!(last.add_months(1), None);
        let first = YearMonth::containing(Date::MIN);
        assert_eq!(first.previous(), None);
    }

    #[test]
    fn test_display() {
        let ym = YearMonth::new(2024, Month::March).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
    }
}
