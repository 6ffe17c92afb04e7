//! Configuration accepted by the picker constructors
use crate::calendar::{StartWeekDay, WeekdayFormat};
use crate::format::{parse_iso_date, DateFormat};
use std::collections::HashMap;
use std::fmt;
use time::Date;

pub const DEFAULT_DATE_FORMAT: &str = "ddd, DD MMM";

pub const DEFAULT_MONTH_FORMAT: &str = "MMMM - YYYY";

/// Side of the input group on which the dialog is anchored
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ExpandDirection {
    Left,
    #[default]
    Right,
}

/// Text shown for the date under the pointer or keyboard cursor
#[derive(Default)]
pub enum Tooltip {
    #[default]
    None,
    Text(String),
    Dynamic(Box<dyn Fn(Date) -> String>),
}

impl Tooltip {
    pub fn text_for(&self, date: Date) -> Option<String> {
        match self {
            Tooltip::None => None,
            Tooltip::Text(s) if s.is_empty() => None,
            Tooltip::Text(s) => Some(s.clone()),
            Tooltip::Dynamic(func) => Some(func(date)),
        }
    }
}

impl fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tooltip::None => write!(f, "Tooltip::None"),
            Tooltip::Text(s) => f.debug_tuple("Tooltip::Text").field(s).finish(),
            Tooltip::Dynamic(_) => write!(f, "Tooltip::Dynamic(..)"),
        }
    }
}

/// Short annotations displayed under individual days, such as prices
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubTextDict(HashMap<Date, String>);

impl SubTextDict {
    pub fn new() -> SubTextDict {
        SubTextDict::default()
    }

    pub fn insert<S: Into<String>>(&mut self, date: Date, text: S) {
        self.0.insert(date, text.into());
    }

    pub fn get(&self, date: Date) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds a dictionary from `YYYY-MM-DD` keys.  Keys that are not valid dates
/// are skipped.
impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for SubTextDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> SubTextDict {
        let mut dict = SubTextDict::new();
        for (key, value) in iter {
            let key = key.as_ref();
            match parse_iso_date(key) {
                Ok(date) => dict.insert(date, value),
                Err(e) => log::debug!("Ignoring sub-text entry for {key:?}: {e}"),
            }
        }
        dict
    }
}

/// Everything the host application can configure about a picker
#[derive(Debug)]
pub struct PickerOptions {
    pub(crate) start_date: Option<Date>,
    pub(crate) end_date: Option<Date>,
    pub(crate) min_date: Option<Date>,
    pub(crate) max_date: Option<Date>,
    pub(crate) start_week_day: StartWeekDay,
    pub(crate) week_day_format: WeekdayFormat,
    pub(crate) date_format: DateFormat,
    pub(crate) month_format: DateFormat,
    pub(crate) highlight_today: bool,
    pub(crate) disabled: bool,
    pub(crate) is_open: bool,
    pub(crate) tooltip: Tooltip,
    pub(crate) sub_text_dict: Option<SubTextDict>,
    pub(crate) expand_direction: ExpandDirection,
    pub(crate) locale: String,
    pub(crate) single_calendar: bool,
    pub(crate) start_date_placeholder: Option<String>,
    pub(crate) end_date_placeholder: Option<String>,
    pub(crate) date_input_separator: Option<String>,
    pub(crate) hide_dialog_header: bool,
    pub(crate) hide_dialog_footer: bool,
    pub(crate) hide_dialog_after_select_end_date: bool,
}

impl Default for PickerOptions {
    fn default() -> PickerOptions {
        PickerOptions {
            start_date: None,
            end_date: None,
            min_date: None,
            max_date: None,
            start_week_day: StartWeekDay::Monday,
            week_day_format: WeekdayFormat::Narrow,
            date_format: DateFormat::new(DEFAULT_DATE_FORMAT),
            month_format: DateFormat::new(DEFAULT_MONTH_FORMAT),
            highlight_today: false,
            disabled: false,
            is_open: false,
            tooltip: Tooltip::None,
            sub_text_dict: None,
            expand_direction: ExpandDirection::Right,
            locale: String::from("en"),
            single_calendar: false,
            start_date_placeholder: None,
            end_date_placeholder: None,
            date_input_separator: None,
            hide_dialog_header: false,
            hide_dialog_footer: false,
            hide_dialog_after_select_end_date: false,
        }
    }
}

impl PickerOptions {
    pub fn new() -> PickerOptions {
        PickerOptions::default()
    }

    pub fn start_date(mut self, date: Option<Date>) -> Self {
        self.start_date = date;
        self
    }

    pub fn end_date(mut self, date: Option<Date>) -> Self {
        self.end_date = date;
        self
    }

    pub fn min_date(mut self, date: Option<Date>) -> Self {
        self.min_date = date;
        self
    }

    pub fn max_date(mut self, date: Option<Date>) -> Self {
        self.max_date = date;
        self
    }

    pub fn start_week_day(mut self, start: StartWeekDay) -> Self {
        self.start_week_day = start;
        self
    }

    /// Accepts `dd`, `ddd`, or `dddd`
    pub fn week_day_format(mut self, pattern: &str) -> Self {
        self.week_day_format = WeekdayFormat::from_pattern(pattern);
        self
    }

    /// Format of the dates shown in the input fields; an empty pattern keeps
    /// the default of `ddd, DD MMM`
    pub fn date_format(mut self, pattern: &str) -> Self {
        if !pattern.is_empty() {
            self.date_format = DateFormat::new(pattern);
        }
        self
    }

    /// Format of the title above each month; an empty pattern keeps the
    /// default of `MMMM - YYYY`
    pub fn month_format(mut self, pattern: &str) -> Self {
        if !pattern.is_empty() {
            self.month_format = DateFormat::new(pattern);
        }
        self
    }

    pub fn highlight_today(mut self, yes: bool) -> Self {
        self.highlight_today = yes;
        self
    }

    pub fn disabled(mut self, yes: bool) -> Self {
        self.disabled = yes;
        self
    }

    pub fn is_open(mut self, yes: bool) -> Self {
        self.is_open = yes;
        self
    }

    pub fn tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn sub_text_dict(mut self, dict: Option<SubTextDict>) -> Self {
        self.sub_text_dict = dict;
        self
    }

    pub fn expand_direction(mut self, direction: ExpandDirection) -> Self {
        self.expand_direction = direction;
        self
    }

    pub fn locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn single_calendar(mut self, yes: bool) -> Self {
        self.single_calendar = yes;
        self
    }

    pub fn start_date_placeholder<S: Into<String>>(mut self, text: S) -> Self {
        self.start_date_placeholder = Some(text.into());
        self
    }

    pub fn end_date_placeholder<S: Into<String>>(mut self, text: S) -> Self {
        self.end_date_placeholder = Some(text.into());
        self
    }

    pub fn date_input_separator<S: Into<String>>(mut self, text: S) -> Self {
        self.date_input_separator = Some(text.into());
        self
    }

    pub fn hide_dialog_header(mut self, yes: bool) -> Self {
        self.hide_dialog_header = yes;
        self
    }

    pub fn hide_dialog_footer(mut self, yes: bool) -> Self {
        self.hide_dialog_footer = yes;
        self
    }

    pub fn hide_dialog_after_select_end_date(mut self, yes: bool) -> Self {
        self.hide_dialog_after_select_end_date = yes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_sub_text_dict_skips_malformed_keys() {
        let dict = [
            ("2020-01-15", "$120"),
            ("15/01/2020", "bad"),
            ("2020-02-30", "bad"),
            ("2020-01-16", ""),
        ]
        .into_iter()
        .collect::<SubTextDict>();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get(date!(2020 - 01 - 15)), Some("$120"));
        assert_eq!(dict.get(date!(2020 - 01 - 16)), Some(""));
        assert_eq!(dict.get(date!(2020 - 01 - 17)), None);
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(Tooltip::None.text_for(date!(2020 - 01 - 01)), None);
        assert_eq!(
            Tooltip::Text(String::new()).text_for(date!(2020 - 01 - 01)),
            None
        );
        assert_eq!(
            Tooltip::Text(String::from("Pick a date")).text_for(date!(2020 - 01 - 01)),
            Some(String::from("Pick a date"))
        );
        let dynamic = Tooltip::Dynamic(Box::new(|d| format!("day {}", d.day())));
        assert_eq!(
            dynamic.text_for(date!(2020 - 01 - 09)),
            Some(String::from("day 9"))
        );
    }

    #[test]
    fn test_empty_formats_keep_defaults() {
        let opts = PickerOptions::new().date_format("").month_format("MMM YYYY");
        assert_eq!(opts.date_format, DateFormat::new(DEFAULT_DATE_FORMAT));
        assert_eq!(opts.month_format, DateFormat::new("MMM YYYY"));
    }
}
