//! The two public picker flavors: a date range with start and end fields,
//! and a single date
use crate::options::PickerOptions;
use crate::picker::DatePicker;
use crate::selection::SelectionMode;
use std::ops::{Deref, DerefMut};
use time::Date;

pub const DEFAULT_START_PLACEHOLDER: &str = "Start date";

pub const DEFAULT_END_PLACEHOLDER: &str = "End date";

pub const DEFAULT_SINGLE_PLACEHOLDER: &str = "Date";

/// A picker for a start date and an end date
#[derive(Debug)]
pub struct RangeDatePicker(DatePicker);

impl RangeDatePicker {
    pub fn new(mut options: PickerOptions, today: Date) -> RangeDatePicker {
        options
            .start_date_placeholder
            .get_or_insert_with(|| String::from(DEFAULT_START_PLACEHOLDER));
        options
            .end_date_placeholder
            .get_or_insert_with(|| String::from(DEFAULT_END_PLACEHOLDER));
        RangeDatePicker(DatePicker::new(SelectionMode::Range, options, today))
    }

    /// Sets the callback invoked with the start and end dates once a burst of
    /// changes settles
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(Option<Date>, Option<Date>) + 'static,
    {
        self.0.on_change(callback);
    }

    /// Sets the callback invoked with the start and end dates whenever the
    /// dialog closes
    pub fn on_close_calendar<F>(&mut self, callback: F)
    where
        F: FnMut(Option<Date>, Option<Date>) + 'static,
    {
        self.0.on_close(callback);
    }

    pub fn into_inner(self) -> DatePicker {
        self.0
    }
}

impl Deref for RangeDatePicker {
    type Target = DatePicker;

    fn deref(&self) -> &DatePicker {
        &self.0
    }
}

impl DerefMut for RangeDatePicker {
    fn deref_mut(&mut self) -> &mut DatePicker {
        &mut self.0
    }
}

/// A picker for one date.  Any end date in the options is ignored.
#[derive(Debug)]
pub struct SingleDatePicker(DatePicker);

impl SingleDatePicker {
    pub fn new(mut options: PickerOptions, today: Date) -> SingleDatePicker {
        options.end_date = None;
        options
            .start_date_placeholder
            .get_or_insert_with(|| String::from(DEFAULT_SINGLE_PLACEHOLDER));
        SingleDatePicker(DatePicker::new(SelectionMode::Single, options, today))
    }

    pub fn date(&self) -> Option<Date> {
        self.0.from()
    }

    pub fn on_change<F>(&mut self, mut callback: F)
    where
        F: FnMut(Option<Date>) + 'static,
    {
        self.0.on_change(move |date, _| callback(date));
    }

    pub fn on_close_calendar<F>(&mut self, mut callback: F)
    where
        F: FnMut(Option<Date>) + 'static,
    {
        self.0.on_close(move |date, _| callback(date));
    }

    pub fn into_inner(self) -> DatePicker {
        self.0
    }
}

impl Deref for SingleDatePicker {
    type Target = DatePicker;

    fn deref(&self) -> &DatePicker {
        &self.0
    }
}

impl DerefMut for SingleDatePicker {
    fn deref_mut(&mut self) -> &mut DatePicker {
        &mut self.0
    }
}
