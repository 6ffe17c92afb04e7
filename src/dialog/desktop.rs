use crate::calendar::{add_days, YearMonth};
use crate::selection::Bounds;
use std::time::{Duration, Instant};
use thiserror::Error;
use time::Date;

/// How long a month transition takes to slide into place
pub const SLIDE_DURATION: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PageDirection {
    Prev,
    Next,
}

impl PageDirection {
    fn delta(self) -> i32 {
        match self {
            PageDirection::Prev => -1,
            PageDirection::Next => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum PageError {
    #[error("a month transition is already in progress")]
    Animating,
    #[error("cannot page past the selectable dates")]
    Blocked,
    #[error("date is outside the selectable range")]
    OutOfBounds,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Slide {
    direction: PageDirection,
    started: Instant,
}

/// The months laid out side by side in the desktop dialog.
///
/// Four consecutive months are kept around the focused one (the month before
/// it and the two after it) so that a transition has something to slide in;
/// one or two of them are visible at rest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthWindow {
    focus: YearMonth,
    single_calendar: bool,
    slide: Option<Slide>,
    cursor: Option<Date>,
    /// Where the cursor lands once the current transition completes
    pending_cursor: Option<Date>,
}

impl MonthWindow {
    pub fn new(focus: YearMonth, single_calendar: bool) -> MonthWindow {
        MonthWindow {
            focus,
            single_calendar,
            slide: None,
            cursor: None,
            pending_cursor: None,
        }
    }

    pub fn focus(&self) -> YearMonth {
        self.focus
    }

    pub fn single_calendar(&self) -> bool {
        self.single_calendar
    }

    /// The month before the focused month, the focused month, and the two
    /// after it
    pub fn months(&self) -> [YearMonth; 4] {
        [-1, 0, 1, 2].map(|n| self.focus.add_months(n).unwrap_or(self.focus))
    }

    pub fn visible_count(&self) -> usize {
        if self.single_calendar {
            1
        } else {
            2
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = YearMonth> {
        self.months()
            .into_iter()
            .skip(1)
            .take(self.visible_count())
    }

    pub fn last_visible(&self) -> YearMonth {
        self.visible().last().unwrap_or(self.focus)
    }

    pub fn is_visible(&self, date: Date) -> bool {
        let ym = YearMonth::containing(date);
        self.focus <= ym && ym <= self.last_visible()
    }

    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
    }

    pub fn can_page(&self, direction: PageDirection, bounds: &Bounds) -> Result<(), PageError> {
        if self.is_animating() {
            return Err(PageError::Animating);
        }
        let blocked = match direction {
            PageDirection::Prev => {
                self.focus.previous().is_none()
                    || bounds
                        .min
                        .is_some_and(|min| self.focus <= YearMonth::containing(min))
            }
            PageDirection::Next => {
                self.last_visible().next().is_none()
                    || bounds
                        .max
                        .is_some_and(|max| self.last_visible() >= YearMonth::containing(max))
            }
        };
        if blocked {
            Err(PageError::Blocked)
        } else {
            Ok(())
        }
    }

    /// Starts sliding one month in `direction`.  The focused month changes
    /// once the slide completes (see [`MonthWindow::tick`]).
    pub fn page(
        &mut self,
        direction: PageDirection,
        bounds: &Bounds,
        now: Instant,
    ) -> Result<(), PageError> {
        self.can_page(direction, bounds)?;
        log::debug!("Paging {direction:?} from {}", self.focus);
        self.slide = Some(Slide {
            direction,
            started: now,
        });
        Ok(())
    }

    /// When the current transition completes
    pub fn deadline(&self) -> Option<Instant> {
        self.slide.map(|s| s.started + SLIDE_DURATION)
    }

    /// Finishes the current transition if its time is up.  Returns `true` if
    /// anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.slide {
            Some(slide) if slide.started + SLIDE_DURATION <= now => {
                self.slide = None;
                if let Some(ym) = self.focus.add_months(slide.direction.delta()) {
                    self.focus = ym;
                }
                if let Some(date) = self.pending_cursor.take() {
                    self.cursor = Some(date);
                }
                true
            }
            _ => false,
        }
    }

    /// How far the months have moved during the current transition, as a
    /// number of columns out of `span` (the distance between the left edges
    /// of two adjacent months).  Positive values move the months left.
    pub fn slide_offset(&self, now: Instant, span: u16) -> i32 {
        let Some(slide) = self.slide else {
            return 0;
        };
        let elapsed = now
            .saturating_duration_since(slide.started)
            .min(SLIDE_DURATION)
            .as_millis();
        let offset = elapsed * u128::from(span) / SLIDE_DURATION.as_millis();
        i32::try_from(offset).unwrap_or(i32::from(span)) * slide.direction.delta()
    }

    /// Focuses `ym` immediately, abandoning any transition in progress
    pub fn jump_to(&mut self, ym: YearMonth) {
        self.focus = ym;
        self.slide = None;
        self.pending_cursor = None;
    }

    /// Brings `date` into view.  A date one month past either edge is paged
    /// to; anything farther is jumped to directly.
    pub fn reveal(&mut self, date: Date, bounds: &Bounds, now: Instant) {
        if self.is_visible(date) {
            return;
        }
        let target = YearMonth::containing(date);
        let direction = if target < self.focus {
            PageDirection::Prev
        } else {
            PageDirection::Next
        };
        let adjacent = match direction {
            PageDirection::Prev => self.focus.previous() == Some(target),
            PageDirection::Next => self.last_visible().next() == Some(target),
        };
        if adjacent && self.page(direction, bounds, now).is_ok() {
            return;
        }
        let focus = match direction {
            PageDirection::Prev => target,
            PageDirection::Next => {
                let back = i32::try_from(self.visible_count()).unwrap_or(1) - 1;
                target.add_months(-back).unwrap_or(target)
            }
        };
        log::debug!("Jumping from {} to {focus}", self.focus);
        self.jump_to(focus);
    }

    pub fn cursor(&self) -> Option<Date> {
        self.cursor
    }

    /// Puts the cursor on `date` without checking that it is showing
    pub fn place_cursor(&mut self, date: Date) {
        self.cursor = Some(date);
        self.pending_cursor = None;
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
        self.pending_cursor = None;
    }

    /// Puts the cursor somewhere sensible if it is not already showing:
    /// `preferred` if that is visible and selectable, otherwise the first
    /// selectable day on screen
    pub fn ensure_cursor(&mut self, preferred: Option<Date>, bounds: &Bounds) -> Option<Date> {
        if let Some(cursor) = self.cursor.filter(|&d| self.is_visible(d)) {
            return Some(cursor);
        }
        self.cursor = preferred
            .filter(|&d| self.is_visible(d) && bounds.contains(d))
            .or_else(|| {
                self.visible()
                    .flat_map(|ym| (1..=ym.days()).filter_map(move |n| ym.day(n)))
                    .find(|&d| bounds.contains(d))
            });
        self.cursor
    }

    /// Moves the cursor by `days`.  A target in a month that is not showing
    /// pages toward it, and the cursor lands there once the slide completes.
    pub fn move_cursor(
        &mut self,
        days: i64,
        preferred: Option<Date>,
        bounds: &Bounds,
        now: Instant,
    ) -> Result<Date, PageError> {
        if self.is_animating() {
            return Err(PageError::Animating);
        }
        let Some(current) = self.ensure_cursor(preferred, bounds) else {
            return Err(PageError::OutOfBounds);
        };
        let target = add_days(current, days)
            .filter(|&d| bounds.contains(d))
            .ok_or(PageError::OutOfBounds)?;
        if self.is_visible(target) {
            self.cursor = Some(target);
        } else {
            let direction = if target < current {
                PageDirection::Prev
            } else {
                PageDirection::Next
            };
            self.page(direction, bounds, now)?;
            self.pending_cursor = Some(target);
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_months() {
        let window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(
            window.months(),
            [
                ym(2019, Month::December),
                ym(2020, Month::January),
                ym(2020, Month::February),
                ym(2020, Month::March),
            ]
        );
        assert_eq!(
            window.visible().collect::<Vec<_>>(),
            [ym(2020, Month::January), ym(2020, Month::February)]
        );
        assert!(window.is_visible(date!(2020 - 02 - 29)));
        assert!(!window.is_visible(date!(2020 - 03 - 01)));
        let single = MonthWindow::new(ym(2020, Month::January), true);
        assert_eq!(single.last_visible(), ym(2020, Month::January));
        assert!(!single.is_visible(date!(2020 - 02 - 01)));
    }

    #[test]
    fn test_page_completes_after_slide() {
        let start = Instant::now();
        let bounds = Bounds::default();
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(window.page(PageDirection::Next, &bounds, start), Ok(()));
        assert!(window.is_animating());
        assert_eq!(window.focus(), ym(2020, Month::January));
        assert_eq!(
            window.page(PageDirection::Next, &bounds, start + Duration::from_millis(50)),
            Err(PageError::Animating)
        );
        assert!(!window.tick(start + Duration::from_millis(199)));
        assert!(window.tick(start + SLIDE_DURATION));
        assert!(!window.is_animating());
        assert_eq!(window.focus(), ym(2020, Month::February));
        assert_eq!(window.deadline(), None);
    }

    #[test]
    fn test_slide_offset() {
        let start = Instant::now();
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(window.slide_offset(start, 40), 0);
        window
            .page(PageDirection::Prev, &Bounds::default(), start)
            .unwrap();
        assert_eq!(window.slide_offset(start + Duration::from_millis(100), 40), -20);
        assert_eq!(window.slide_offset(start + Duration::from_millis(500), 40), -40);
    }

    #[test]
    fn test_paging_blocked_at_bounds() {
        let bounds = Bounds::new(Some(date!(2020 - 01 - 10)), Some(date!(2020 - 03 - 05)));
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(
            window.can_page(PageDirection::Prev, &bounds),
            Err(PageError::Blocked)
        );
        assert_eq!(window.can_page(PageDirection::Next, &bounds), Ok(()));
        window.jump_to(ym(2020, Month::February));
        assert_eq!(window.can_page(PageDirection::Prev, &bounds), Ok(()));
        assert_eq!(
            window.can_page(PageDirection::Next, &bounds),
            Err(PageError::Blocked)
        );
    }

    #[test]
    fn test_reveal() {
        let now = Instant::now();
        let bounds = Bounds::default();
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        window.reveal(date!(2020 - 02 - 14), &bounds, now);
        assert!(!window.is_animating());
        window.reveal(date!(2020 - 03 - 14), &bounds, now);
        assert!(window.is_animating());
        window.tick(now + SLIDE_DURATION);
        assert_eq!(window.focus(), ym(2020, Month::February));
        window.reveal(date!(2020 - 07 - 04), &bounds, now);
        assert!(!window.is_animating());
        assert_eq!(window.focus(), ym(2020, Month::June));
        assert!(window.is_visible(date!(2020 - 07 - 04)));
        window.reveal(date!(2019 - 12 - 25), &bounds, now);
        assert_eq!(window.focus(), ym(2019, Month::December));
    }

    #[test]
    fn test_move_cursor_within_window() {
        let now = Instant::now();
        let bounds = Bounds::default();
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(
            window.move_cursor(1, Some(date!(2020 - 01 - 15)), &bounds, now),
            Ok(date!(2020 - 01 - 16))
        );
        assert_eq!(
            window.move_cursor(7, None, &bounds, now),
            Ok(date!(2020 - 01 - 23))
        );
        assert_eq!(window.cursor(), Some(date!(2020 - 01 - 23)));
    }

    #[test]
    fn test_move_cursor_pages_then_lands() {
        let now = Instant::now();
        let bounds = Bounds::default();
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        window.ensure_cursor(Some(date!(2020 - 02 - 27)), &bounds);
        assert_eq!(
            window.move_cursor(7, None, &bounds, now),
            Ok(date!(2020 - 03 - 05))
        );
        assert_eq!(window.cursor(), Some(date!(2020 - 02 - 27)));
        assert_eq!(
            window.move_cursor(1, None, &bounds, now),
            Err(PageError::Animating)
        );
        window.tick(now + SLIDE_DURATION);
        assert_eq!(window.cursor(), Some(date!(2020 - 03 - 05)));
        assert_eq!(window.focus(), ym(2020, Month::February));
    }

    #[test]
    fn test_move_cursor_rejects_out_of_bounds() {
        let now = Instant::now();
        let bounds = Bounds::new(Some(date!(2020 - 01 - 03)), None);
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        window.ensure_cursor(Some(date!(2020 - 01 - 05)), &bounds);
        assert_eq!(
            window.move_cursor(-7, None, &bounds, now),
            Err(PageError::OutOfBounds)
        );
        assert_eq!(window.cursor(), Some(date!(2020 - 01 - 05)));
    }

    #[test]
    fn test_ensure_cursor_skips_disabled_days() {
        let bounds = Bounds::new(Some(date!(2020 - 01 - 03)), None);
        let mut window = MonthWindow::new(ym(2020, Month::January), false);
        assert_eq!(
            window.ensure_cursor(Some(date!(2019 - 06 - 01)), &bounds),
            Some(date!(2020 - 01 - 03))
        );
    }
}
