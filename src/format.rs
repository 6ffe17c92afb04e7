//! Date format patterns in the style of `YYYY-MM-DD` / `ddd, DD MMM`.
//!
//! Recognized tokens:
//!
//! | Token  | Output                      |
//! |--------|-----------------------------|
//! | `YYYY` | four-digit year             |
//! | `YY`   | two-digit year              |
//! | `MMMM` | month name                  |
//! | `MMM`  | abbreviated month name      |
//! | `MM`   | zero-padded month number    |
//! | `M`    | month number                |
//! | `DD`   | zero-padded day of month    |
//! | `D`    | day of month                |
//! | `dddd` | weekday name                |
//! | `ddd`  | abbreviated weekday name    |
//! | `dd`   | two-letter weekday name     |
//! | `d`    | weekday number, Sunday is 0 |
//!
//! Text in square brackets is copied through unchanged, as is any character
//! that does not begin a token.  An unclosed bracket escapes the rest of the
//! pattern.
use crate::calendar::WeekdayFormat;
use crate::locale::Locale;
use std::fmt;
use time::{macros::format_description, Date};

/// Parses a `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Year4,
    Year2,
    MonthLong,
    MonthShort,
    Month2,
    Month1,
    Day2,
    Day1,
    WeekdayLong,
    WeekdayShort,
    WeekdayMin,
    WeekdayNumber,
}

// Longest tokens first so that e.g. "MMMM" is not read as "MM" twice
static TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year4),
    ("YY", Token::Year2),
    ("MMMM", Token::MonthLong),
    ("MMM", Token::MonthShort),
    ("MM", Token::Month2),
    ("M", Token::Month1),
    ("DD", Token::Day2),
    ("D", Token::Day1),
    ("dddd", Token::WeekdayLong),
    ("ddd", Token::WeekdayShort),
    ("dd", Token::WeekdayMin),
    ("d", Token::WeekdayNumber),
];

#[derive(Clone, Debug, Eq, PartialEq)]
enum Item {
    Literal(String),
    Token(Token),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateFormat(Vec<Item>);

impl DateFormat {
    pub fn new(pattern: &str) -> DateFormat {
        let mut items = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;
        'outer: while let Some(c) = rest.chars().next() {
            if c == '[' {
                if let Some(end) = rest.find(']') {
                    literal.push_str(&rest[1..end]);
                    rest = &rest[(end + 1)..];
                } else {
                    literal.push_str(&rest[1..]);
                    rest = "";
                }
                continue;
            }
            for &(text, token) in TOKENS {
                if let Some(after) = rest.strip_prefix(text) {
                    if !literal.is_empty() {
                        items.push(Item::Literal(std::mem::take(&mut literal)));
                    }
                    items.push(Item::Token(token));
                    rest = after;
                    continue 'outer;
                }
            }
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
        if !literal.is_empty() {
            items.push(Item::Literal(literal));
        }
        DateFormat(items)
    }

    /// Returns a value that displays `date` according to this format
    pub fn format<'a>(&'a self, date: Date, locale: &'a Locale) -> Formatted<'a> {
        Formatted {
            format: self,
            date,
            locale,
        }
    }
}

impl From<&str> for DateFormat {
    fn from(pattern: &str) -> DateFormat {
        DateFormat::new(pattern)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Formatted<'a> {
    format: &'a DateFormat,
    date: Date,
    locale: &'a Locale,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date;
        for item in &self.format.0 {
            match item {
                Item::Literal(s) => f.write_str(s)?,
                Item::Token(Token::Year4) => write!(f, "{:04}", date.year())?,
                Item::Token(Token::Year2) => write!(f, "{:02}", date.year().rem_euclid(100))?,
                Item::Token(Token::MonthLong) => f.write_str(self.locale.month_name(date.month()))?,
                Item::Token(Token::MonthShort) => {
                    f.write_str(self.locale.month_short_name(date.month()))?;
                }
                Item::Token(Token::Month2) => write!(f, "{:02}", u8::from(date.month()))?,
                Item::Token(Token::Month1) => write!(f, "{}", u8::from(date.month()))?,
                Item::Token(Token::Day2) => write!(f, "{:02}", date.day())?,
                Item::Token(Token::Day1) => write!(f, "{}", date.day())?,
                Item::Token(Token::WeekdayLong) => {
                    f.write_str(self.locale.weekday_name(date.weekday(), WeekdayFormat::Long))?;
                }
                Item::Token(Token::WeekdayShort) => {
                    f.write_str(self.locale.weekday_name(date.weekday(), WeekdayFormat::Short))?;
                }
                Item::Token(Token::WeekdayMin) => {
                    f.write_str(self.locale.weekday_name(date.weekday(), WeekdayFormat::Narrow))?;
                }
                Item::Token(Token::WeekdayNumber) => {
                    write!(f, "{}", date.weekday().number_days_from_sunday())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn fmt(pattern: &str, date: Date) -> String {
        DateFormat::new(pattern)
            .format(date, Locale::english())
            .to_string()
    }

    #[test]
    fn test_default_input_format() {
        assert_eq!(fmt("ddd, DD MMM", date!(2020 - 01 - 05)), "Sun, 05 Jan");
    }

    #[test]
    fn test_default_month_format() {
        assert_eq!(fmt("MMMM - YYYY", date!(2024 - 02 - 29)), "February - 2024");
    }

    #[test]
    fn test_numeric() {
        assert_eq!(fmt("YYYY-MM-DD", date!(2021 - 03 - 07)), "2021-03-07");
        assert_eq!(fmt("D/M/YY", date!(2021 - 03 - 07)), "7/3/21");
        assert_eq!(fmt("d", date!(2021 - 03 - 07)), "0");
    }

    #[test]
    fn test_escaped_literal() {
        assert_eq!(
            fmt("[Day] D [of] MMMM", date!(2021 - 03 - 07)),
            "Day 7 of March"
        );
    }

    #[test]
    fn test_other_locale() {
        let fr = Locale::load("fr").unwrap();
        let format = DateFormat::new("dddd D MMMM");
        assert_eq!(
            format.format(date!(2021 - 08 - 02), fr).to_string(),
            "lundi 2 août"
        );
    }

    #[test]
    fn test_unclosed_bracket() {
        assert_eq!(fmt("YYYY [MM", date!(2021 - 03 - 07)), "2021 MM");
    }

    #[test]
    fn test_from_str() {
        let format = DateFormat::from("MM");
        assert_eq!(
            format.format(date!(2021 - 11 - 01), Locale::english()).to_string(),
            "11"
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2020-02-29").unwrap(), date!(2020 - 02 - 29));
        assert!(parse_iso_date("2021-02-29").is_err());
        assert!(parse_iso_date("29/02/2020").is_err());
    }
}
