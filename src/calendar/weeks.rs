use super::util::{WeekdayExt, YearMonth, DAYS_IN_WEEK};
use crate::locale::Locale;
use time::{Date, Weekday};

/// The day of the week on which each calendar row begins
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StartWeekDay {
    #[default]
    Monday,
    Sunday,
}

impl StartWeekDay {
    pub fn weekday(self) -> Weekday {
        match self {
            StartWeekDay::Monday => Weekday::Monday,
            StartWeekDay::Sunday => Weekday::Sunday,
        }
    }

    /// Zero-based column in which `wd` is displayed
    pub fn column(self, wd: Weekday) -> u8 {
        (wd.index0() + DAYS_IN_WEEK - self.weekday().index0()) % DAYS_IN_WEEK
    }

    /// The days of the week in display order
    pub fn weekdays(self) -> [Weekday; 7] {
        let mut days = [self.weekday(); 7];
        for i in 1..days.len() {
            days[i] = days[i - 1].next();
        }
        days
    }
}

/// How weekday names are written above each month
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekdayFormat {
    /// Two-letter names ("Mo"); pattern `dd`
    #[default]
    Narrow,
    /// Abbreviated names ("Mon"); pattern `ddd`
    Short,
    /// Full names ("Monday"); pattern `dddd`
    Long,
}

impl WeekdayFormat {
    /// Anything other than `ddd` or `dddd` is treated as `dd`.
    pub fn from_pattern(pattern: &str) -> WeekdayFormat {
        match pattern {
            "ddd" => WeekdayFormat::Short,
            "dddd" => WeekdayFormat::Long,
            _ => WeekdayFormat::Narrow,
        }
    }
}

/// A run of consecutive days of a month that share one calendar row
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekSpan {
    /// Day of the month on which the span begins
    pub start: u8,
    /// Number of days in the span, between 1 and 7
    pub days: u8,
    /// Column of the first day; only the first week of a month has a nonzero
    /// offset
    pub offset: u8,
}

impl WeekSpan {
    pub fn day_numbers(&self) -> impl Iterator<Item = u8> {
        self.start..(self.start + self.days)
    }

    pub fn contains(&self, day: u8) -> bool {
        (self.start..(self.start + self.days)).contains(&day)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    year_month: YearMonth,
    weeks: Vec<WeekSpan>,
}

impl MonthGrid {
    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    pub fn weeks(&self) -> &[WeekSpan] {
        &self.weeks
    }

    pub fn total_days(&self) -> u8 {
        self.year_month.days()
    }

    /// Returns the row and column at which `date` is drawn, if it falls in
    /// this month
    pub fn position(&self, date: Date) -> Option<(usize, u8)> {
        if !self.year_month.contains(date) {
            return None;
        }
        let day = date.day();
        self.weeks
            .iter()
            .enumerate()
            .find(|(_, w)| w.contains(day))
            .map(|(row, w)| (row, w.offset + (day - w.start)))
    }
}

/// Splits a month into calendar rows beginning on `start`.
///
/// The first row runs from the 1st to the day before the next `start`; when
/// the month begins on `start` itself the first row is a full week.  The last
/// row is cut short at the end of the month.
pub fn month_grid(year_month: YearMonth, start: StartWeekDay) -> MonthGrid {
    let total = year_month.days();
    let mut offset = start.column(year_month.first_day().weekday());
    let mut length = DAYS_IN_WEEK - offset;
    let mut weeks = Vec::with_capacity(6);
    let mut first = 1u8;
    while first <= total {
        let days = length.min(total - first + 1);
        weeks.push(WeekSpan {
            start: first,
            days,
            offset,
        });
        first += days;
        offset = 0;
        length = DAYS_IN_WEEK;
    }
    MonthGrid { year_month, weeks }
}

/// Returns the seven weekday names in display order
pub fn weekday_labels(
    start: StartWeekDay,
    format: WeekdayFormat,
    locale: &Locale,
) -> [&'static str; 7] {
    start
        .weekdays()
        .map(|wd| locale.weekday_name(wd, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    fn grid(year: i32, month: Month, start: StartWeekDay) -> MonthGrid {
        month_grid(YearMonth::new(year, month).unwrap(), start)
    }

    #[test]
    fn test_columns() {
        assert_eq!(StartWeekDay::Monday.column(Weekday::Monday), 0);
        assert_eq!(StartWeekDay::Monday.column(Weekday::Sunday), 6);
        assert_eq!(StartWeekDay::Sunday.column(Weekday::Sunday), 0);
        assert_eq!(StartWeekDay::Sunday.column(Weekday::Saturday), 6);
    }

    #[test]
    fn test_february_2024() {
        // 2024-02-01 is a Thursday
        let g = grid(2024, Month::February, StartWeekDay::Monday);
        assert_eq!(
            g.weeks(),
            [
                WeekSpan {
                    start: 1,
                    days: 4,
                    offset: 3
                },
                WeekSpan {
                    start: 5,
                    days: 7,
                    offset: 0
                },
                WeekSpan {
                    start: 12,
                    days: 7,
                    offset: 0
                },
                WeekSpan {
                    start: 19,
                    days: 7,
                    offset: 0
                },
                WeekSpan {
                    start: 26,
                    days: 4,
                    offset: 0
                },
            ]
        );
        assert_eq!(g.weeks().iter().map(|w| u32::from(w.days)).sum::<u32>(), 29);
    }

    #[test]
    fn test_february_2023() {
        let g = grid(2023, Month::February, StartWeekDay::Monday);
        assert_eq!(g.weeks().iter().map(|w| u32::from(w.days)).sum::<u32>(), 28);
    }

    #[test]
    fn test_month_starting_on_start_day() {
        // 2024-01-01 is a Monday
        let g = grid(2024, Month::January, StartWeekDay::Monday);
        assert_eq!(
            g.weeks()[0],
            WeekSpan {
                start: 1,
                days: 7,
                offset: 0
            }
        );
        // 2023-10-01 is a Sunday
        let g = grid(2023, Month::October, StartWeekDay::Sunday);
        assert_eq!(g.weeks()[0].days, 7);
        let g = grid(2023, Month::October, StartWeekDay::Monday);
        assert_eq!(
            g.weeks()[0],
            WeekSpan {
                start: 1,
                days: 1,
                offset: 6
            }
        );
    }

    #[test]
    fn test_all_months_1900_to_2100() {
        for year in 1900..=2100 {
            for month in 1..=12u8 {
                let month = Month::try_from(month).unwrap();
                for start in [StartWeekDay::Monday, StartWeekDay::Sunday] {
                    let g = grid(year, month, start);
                    let total: u32 = g.weeks().iter().map(|w| u32::from(w.days)).sum();
                    assert_eq!(total, u32::from(g.total_days()), "{year}-{month} {start:?}");
                    let first = g.weeks()[0];
                    assert!((1..=7).contains(&first.days), "{year}-{month} {start:?}");
                    assert_eq!(first.offset + first.days, 7, "{year}-{month} {start:?}");
                    assert!(
                        g.weeks().iter().all(|w| (1..=7).contains(&w.days)),
                        "{year}-{month} {start:?}"
                    );
                    assert!(
                        g.weeks().iter().skip(1).all(|w| w.offset == 0),
                        "{year}-{month} {start:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_position() {
        let g = grid(2024, Month::February, StartWeekDay::Monday);
        assert_eq!(g.position(date!(2024 - 02 - 01)), Some((0, 3)));
        assert_eq!(g.position(date!(2024 - 02 - 04)), Some((0, 6)));
        assert_eq!(g.position(date!(2024 - 02 - 05)), Some((1, 0)));
        assert_eq!(g.position(date!(2024 - 02 - 29)), Some((4, 3)));
        assert_eq!(g.position(date!(2024 - 03 - 01)), None);
    }

    #[test]
    fn test_weekday_labels() {
        let en = Locale::english();
        assert_eq!(
            weekday_labels(StartWeekDay::Monday, WeekdayFormat::Narrow, en),
            ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        );
        assert_eq!(
            weekday_labels(StartWeekDay::Sunday, WeekdayFormat::Short, en),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(
            weekday_labels(StartWeekDay::Monday, WeekdayFormat::Long, en)[6],
            "Sunday"
        );
    }

    #[test]
    fn test_weekday_format_from_pattern() {
        assert_eq!(WeekdayFormat::from_pattern("dd"), WeekdayFormat::Narrow);
        assert_eq!(WeekdayFormat::from_pattern("ddd"), WeekdayFormat::Short);
        assert_eq!(WeekdayFormat::from_pattern("dddd"), WeekdayFormat::Long);
        assert_eq!(WeekdayFormat::from_pattern("bogus"), WeekdayFormat::Narrow);
    }
}
