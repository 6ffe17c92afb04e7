//! The picker itself: selection, dialog, timers, and callbacks in one place
mod widget;
pub use self::widget::{desktop_dialog_width, PickerWidget, DESKTOP_MIN_WIDTH, MONTH_GAP};
use crate::calendar::{add_days, YearMonth};
use crate::dialog::{MonthFeed, MonthWindow, PageDirection, PageError};
use crate::hit::{HitMap, Target};
use crate::input::{can_step_back, can_step_forward};
use crate::locale::Locale;
use crate::notify::{CloseEdge, Deferred, AUTO_CLOSE_DELAY, CHANGE_DELAY};
use crate::options::PickerOptions;
use crate::selection::{Bounds, Field, Picked, SelectionMode, SelectionState};
use ratatui::layout::{Position, Rect};
use std::fmt;
use std::time::{Duration, Instant};
use time::Date;

/// How often the screen should be redrawn while months are sliding
pub const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Called with the start and end dates.  Single-date pickers always pass
/// `None` as the end date.
pub type RangeCallback = Box<dyn FnMut(Option<Date>, Option<Date>)>;

/// Called with "Start Date", "End Date", or "" when no field is focused
pub type FocusCallback = Box<dyn FnMut(&str)>;

pub struct DatePicker {
    options: PickerOptions,
    bounds: Bounds,
    selection: SelectionState,
    locale: &'static Locale,
    today: Date,
    is_open: bool,
    close_edge: CloseEdge,
    last_focus: Option<Field>,
    mobile: bool,
    window: MonthWindow,
    feed: MonthFeed,
    feed_height: u16,
    change: Deferred<(Option<Date>, Option<Date>)>,
    auto_close: Deferred<()>,
    tooltip_date: Option<Date>,
    hits: HitMap,
    /// Screen area covered by the fields and the open dialog when last drawn
    footprint: Rect,
    now: Instant,
    on_change: RangeCallback,
    on_close: RangeCallback,
    on_focus: FocusCallback,
}

impl DatePicker {
    pub fn new(mode: SelectionMode, options: PickerOptions, today: Date) -> DatePicker {
        let bounds = Bounds::new(options.min_date, options.max_date);
        let mut selection =
            SelectionState::new(mode).with_dates(options.start_date, options.end_date);
        let locale = load_locale(&options.locale);
        let anchor = YearMonth::containing(selection.from().unwrap_or(today));
        let window = MonthWindow::new(anchor, options.single_calendar);
        let mut feed = MonthFeed::new(&bounds, options.start_week_day);
        feed.scroll_to(anchor);
        let is_open = options.is_open && !options.disabled;
        if is_open {
            seed_focus(&mut selection);
        }
        DatePicker {
            bounds,
            selection,
            locale,
            today,
            is_open,
            close_edge: CloseEdge::new(is_open),
            last_focus: selection.focus(),
            mobile: false,
            window,
            feed,
            feed_height: 0,
            change: Deferred::new(CHANGE_DELAY),
            auto_close: Deferred::new(AUTO_CLOSE_DELAY),
            tooltip_date: None,
            hits: HitMap::new(),
            footprint: Rect::default(),
            now: Instant::now(),
            on_change: Box::new(|_, _| ()),
            on_close: Box::new(|_, _| ()),
            on_focus: Box::new(|_| ()),
            options,
        }
    }

    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(Option<Date>, Option<Date>) + 'static,
    {
        self.on_change = Box::new(callback);
    }

    pub fn on_close<F>(&mut self, callback: F)
    where
        F: FnMut(Option<Date>, Option<Date>) + 'static,
    {
        self.on_close = Box::new(callback);
    }

    pub fn on_focus<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_focus = Box::new(callback);
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn from(&self) -> Option<Date> {
        self.selection.from()
    }

    pub fn to(&self) -> Option<Date> {
        self.selection.to()
    }

    pub fn focus(&self) -> Option<Field> {
        self.selection.focus()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn set_today(&mut self, today: Date) {
        self.today = today;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn window(&self) -> &MonthWindow {
        &self.window
    }

    pub fn feed(&self) -> &MonthFeed {
        &self.feed
    }

    pub fn cursor(&self) -> Option<Date> {
        self.window.cursor()
    }

    /// Text to show for the date under the pointer or keyboard cursor
    pub fn tooltip_text(&self) -> Option<String> {
        let date = self.tooltip_date.or(self.cursor())?;
        self.options.tooltip.text_for(date)
    }

    /// Disables or re-enables all interaction.  Disabling closes the dialog.
    pub fn set_disabled(&mut self, disabled: bool, now: Instant) {
        if disabled {
            self.close(now);
        }
        self.options.disabled = disabled;
    }

    /// Switches to another locale.  Unknown locales fall back to English.
    pub fn set_locale(&mut self, id: &str) {
        self.locale = load_locale(id);
        self.options.locale = id.to_owned();
    }

    /// Replaces the selection with dates supplied by the host application.
    /// This does not trigger `on_change`.
    pub fn set_dates(&mut self, from: Option<Date>, to: Option<Date>) {
        self.selection.set_dates(from, to);
        let anchor = YearMonth::containing(from.unwrap_or(self.today));
        self.window.jump_to(anchor);
        self.feed.scroll_to(anchor);
    }

    pub fn open(&mut self, now: Instant) -> bool {
        self.now = now;
        if self.options.disabled || self.is_open {
            return false;
        }
        self.is_open = true;
        self.close_edge.observe(true);
        let anchor = YearMonth::containing(self.selection.from().unwrap_or(self.today));
        self.window.jump_to(anchor);
        self.window.clear_cursor();
        self.feed.scroll_to(anchor);
        seed_focus(&mut self.selection);
        log::debug!("Opened dialog at {anchor}");
        self.sync_focus();
        true
    }

    /// Closes the dialog.  Any change notification still waiting is
    /// delivered first, then `on_close` is called.
    pub fn close(&mut self, now: Instant) -> bool {
        self.now = now;
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.auto_close.cancel();
        self.selection.clear_hover();
        self.tooltip_date = None;
        self.window.clear_cursor();
        if let Some((from, to)) = self.change.cancel() {
            (self.on_change)(from, to);
        }
        if self.close_edge.observe(false) {
            log::debug!("Closed dialog");
            (self.on_close)(self.selection.from(), self.selection.to());
        }
        true
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_open {
            self.close(now)
        } else {
            self.open(now)
        }
    }

    pub fn set_open(&mut self, open: bool, now: Instant) -> bool {
        if open {
            self.open(now)
        } else {
            self.close(now)
        }
    }

    /// Opens the dialog with `field` focused.  The end date cannot be
    /// focused before a start date has been chosen.
    pub fn click_input(&mut self, field: Field, now: Instant) -> bool {
        self.now = now;
        if self.options.disabled
            || (!self.selection.is_single() && field == Field::To && self.selection.from().is_none())
        {
            return false;
        }
        if !self.is_open {
            self.open(now);
        }
        let changed = self.selection.focus_field(field);
        self.sync_focus();
        changed
    }

    /// Picks `date` as if it had been clicked
    pub fn select(&mut self, date: Date, now: Instant) -> Option<Picked> {
        self.now = now;
        if self.options.disabled {
            return None;
        }
        let picked = self.selection.pick(date, &self.bounds)?;
        log::debug!("Picked {date} as {picked:?}");
        self.change.schedule(now, self.values());
        if self.options.hide_dialog_after_select_end_date
            && (picked == Picked::To || self.selection.is_single())
        {
            self.auto_close.schedule(now, ());
        }
        self.sync_focus();
        Some(picked)
    }

    pub fn hover(&mut self, date: Date) -> bool {
        if self.options.disabled || !self.selection.set_hover(date, &self.bounds) {
            return false;
        }
        self.tooltip_date = Some(date);
        true
    }

    pub fn clear_hover(&mut self) -> bool {
        let had = self.selection.hover().is_some() || self.tooltip_date.is_some();
        self.selection.clear_hover();
        self.tooltip_date = None;
        had
    }

    /// Sets one endpoint directly and brings it into view
    pub fn change_date(&mut self, date: Date, field: Field, now: Instant) -> bool {
        self.now = now;
        if self.options.disabled || !self.selection.change_date(date, field, &self.bounds) {
            return false;
        }
        log::debug!("Changed {field:?} to {date}");
        self.change.schedule(now, self.values());
        self.reveal(date, now);
        self.sync_focus();
        true
    }

    /// Moves the date in `field` one day back or forward
    pub fn step(&mut self, field: Field, forward: bool, now: Instant) -> bool {
        let value = self.selection.get(field);
        let allowed = if forward {
            can_step_forward(value, &self.bounds)
        } else {
            can_step_back(field, value, self.selection.from(), &self.bounds)
        };
        let target = value
            .filter(|_| allowed)
            .and_then(|d| add_days(d, if forward { 1 } else { -1 }));
        match target {
            Some(date) => self.change_date(date, field, now),
            None => false,
        }
    }

    pub fn reset(&mut self, now: Instant) -> bool {
        self.now = now;
        if self.options.disabled {
            return false;
        }
        self.selection.reset();
        if self.is_open {
            seed_focus(&mut self.selection);
        }
        self.tooltip_date = None;
        self.change.schedule(now, self.values());
        self.sync_focus();
        true
    }

    /// Shows the previous or next month.  In the narrow layout this scrolls
    /// the feed by one month.
    pub fn page(&mut self, direction: PageDirection, now: Instant) -> Result<(), PageError> {
        self.now = now;
        if self.options.disabled {
            return Err(PageError::Blocked);
        }
        if !self.mobile {
            return self.window.page(direction, &self.bounds, now);
        }
        let top = self.feed.top();
        let index = match direction {
            PageDirection::Prev if self.feed.top_offset() > 0 => Some(top),
            PageDirection::Prev => top.checked_sub(1),
            PageDirection::Next => Some(top + 1),
        };
        match index.and_then(|i| self.feed.month_at(i)) {
            Some(ym) => {
                self.feed.scroll_to(ym);
                Ok(())
            }
            None => Err(PageError::Blocked),
        }
    }

    /// Moves the keyboard cursor by `days`, paging or scrolling as needed.
    /// The first move places the cursor on the start date (or today) before
    /// moving it.
    pub fn move_cursor(&mut self, days: i64, now: Instant) -> Result<Date, PageError> {
        self.now = now;
        if self.options.disabled || !self.is_open {
            return Err(PageError::Blocked);
        }
        let preferred = self.selection.from().or(Some(self.today));
        let target = if self.mobile {
            let current = self
                .window
                .cursor()
                .or(preferred)
                .ok_or(PageError::OutOfBounds)?;
            let target = add_days(current, days)
                .filter(|&d| self.bounds.contains(d))
                .ok_or(PageError::OutOfBounds)?;
            if !self.window.is_visible(target) {
                self.window.jump_to(YearMonth::containing(target));
            }
            self.window.place_cursor(target);
            self.feed.ensure_visible(target, self.feed_height);
            target
        } else {
            self.window.move_cursor(days, preferred, &self.bounds, now)?
        };
        self.tooltip_date = None;
        Ok(target)
    }

    /// Picks the date under the keyboard cursor
    pub fn activate_cursor(&mut self, now: Instant) -> Option<Picked> {
        let date = self.window.cursor()?;
        self.select(date, now)
    }

    /// Chooses between the side-by-side and the scrolling layout based on the
    /// size of the terminal
    pub fn resize(&mut self, width: u16) {
        let mobile = width < DESKTOP_MIN_WIDTH;
        if mobile == self.mobile {
            return;
        }
        self.mobile = mobile;
        let anchor = self
            .window
            .cursor()
            .or(self.selection.from())
            .unwrap_or(self.today);
        if mobile {
            self.feed.scroll_to(YearMonth::containing(anchor));
        } else if !self.window.is_visible(anchor) {
            self.window.jump_to(YearMonth::containing(anchor));
        }
        log::debug!("Switched to {} layout", if mobile { "narrow" } else { "wide" });
    }

    pub fn scroll_feed(&mut self, lines: i32) -> bool {
        if !self.mobile || !self.is_open {
            return false;
        }
        let before = (self.feed.top(), self.feed.top_offset());
        self.feed.scroll_lines(lines);
        before != (self.feed.top(), self.feed.top_offset())
    }

    /// Delivers whatever has come due by `now`: the change notification, the
    /// end of a month transition, an automatic close.  Returns `true` if the
    /// picker needs to be redrawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.now = now;
        let mut changed = self.window.tick(now) || self.window.is_animating();
        if let Some((from, to)) = self.change.poll(now) {
            (self.on_change)(from, to);
        }
        if self.auto_close.poll(now).is_some() {
            changed |= self.close(now);
        }
        changed
    }

    /// When [`DatePicker::tick`] next has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let frame = self
            .window
            .deadline()
            .map(|d| d.min(self.now + FRAME_INTERVAL));
        [self.change.deadline(), self.auto_close.deadline(), frame]
            .into_iter()
            .flatten()
            .min()
    }

    /// Returns what was drawn at the given screen cell on the last render
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Target> {
        self.hits.find(x, y)
    }

    /// Handles a mouse click at the given screen cell.  A click outside the
    /// picker closes the dialog in the wide layout.
    pub fn click(&mut self, x: u16, y: u16, now: Instant) -> bool {
        if self.options.disabled {
            return false;
        }
        match self.hits.find(x, y) {
            Some(Target::Day(date)) => self.select(date, now).is_some(),
            Some(Target::Input(field)) => self.click_input(field, now),
            Some(Target::StepBack(field)) => self.step(field, false, now),
            Some(Target::StepForward(field)) => self.step(field, true, now),
            Some(Target::PrevMonth) => self.page(PageDirection::Prev, now).is_ok(),
            Some(Target::NextMonth) => self.page(PageDirection::Next, now).is_ok(),
            Some(Target::Reset) => self.reset(now),
            Some(Target::Done | Target::Back) => self.close(now),
            None => {
                if self.is_open && !self.mobile && !self.footprint.contains(Position::new(x, y)) {
                    self.close(now)
                } else {
                    false
                }
            }
        }
    }

    /// Handles the pointer moving to the given screen cell
    pub fn pointer_move(&mut self, x: u16, y: u16) -> bool {
        if !self.is_open {
            return false;
        }
        match self.hits.find(x, y) {
            Some(Target::Day(date)) if self.selection.hover() != Some(date) => self.hover(date),
            Some(Target::Day(_)) => false,
            _ => self.clear_hover(),
        }
    }

    fn values(&self) -> (Option<Date>, Option<Date>) {
        (self.selection.from(), self.selection.to())
    }

    fn reveal(&mut self, date: Date, now: Instant) {
        if self.mobile {
            self.feed.ensure_visible(date, self.feed_height);
        } else {
            self.window.reveal(date, &self.bounds, now);
        }
    }

    fn sync_focus(&mut self) {
        let focus = self.selection.focus();
        if focus != self.last_focus {
            self.last_focus = focus;
            (self.on_focus)(focus.map_or("", Field::label));
        }
    }
}

impl fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("options", &self.options)
            .field("bounds", &self.bounds)
            .field("selection", &self.selection)
            .field("locale", &self.locale.id())
            .field("today", &self.today)
            .field("is_open", &self.is_open)
            .field("mobile", &self.mobile)
            .field("window", &self.window)
            .field("feed", &self.feed)
            .field("change", &self.change)
            .field("auto_close", &self.auto_close)
            .finish_non_exhaustive()
    }
}

/// Gives a range picker with nothing focused somewhere for the next pick to
/// go: the end date if only a start date exists, otherwise the start date
fn seed_focus(selection: &mut SelectionState) {
    if selection.is_single() || selection.focus().is_some() {
        return;
    }
    let field = if selection.from().is_some() && selection.to().is_none() {
        Field::To
    } else {
        Field::From
    };
    selection.focus_field(field);
}

fn load_locale(id: &str) -> &'static Locale {
    Locale::load(id).unwrap_or_else(|e| {
        log::warn!("{e}; falling back to English");
        Locale::english()
    })
}
