use crate::calendar::{month_grid, month_height, StartWeekDay, YearMonth};
use crate::selection::Bounds;
use time::{Date, Month};

/// Number of months in the feed when there is no maximum date
pub const UNBOUNDED_FEED_MONTHS: usize = 2400;

/// Blank lines between consecutive months
pub const MONTH_SPACING: u16 = 1;

/// A vertically scrolling list of months, used when the terminal is too
/// narrow for the side-by-side layout.
///
/// Only the months that intersect the viewport are ever laid out; the
/// scroll position is kept as a month index plus a line offset into that
/// month.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthFeed {
    first: YearMonth,
    len: usize,
    top: usize,
    top_offset: u16,
    start: StartWeekDay,
}

impl MonthFeed {
    /// Creates a feed running from the month of `bounds.min` (or January
    /// 1900) through the month of `bounds.max` (or 2400 months later)
    pub fn new(bounds: &Bounds, start: StartWeekDay) -> MonthFeed {
        let first = match bounds.min {
            Some(min) => YearMonth::containing(min),
            None => YearMonth::new(1900, Month::January)
                .unwrap_or_else(|_| YearMonth::containing(Date::MIN)),
        };
        let len = match bounds.max {
            Some(max) => {
                let n = first.months_until(YearMonth::containing(max));
                usize::try_from(n).map_or(1, |n| n + 1)
            }
            None => UNBOUNDED_FEED_MONTHS,
        };
        MonthFeed {
            first,
            len,
            top: 0,
            top_offset: 0,
            start,
        }
    }

    pub fn first(&self) -> YearMonth {
        self.first
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn top_offset(&self) -> u16 {
        self.top_offset
    }

    pub fn month_at(&self, index: usize) -> Option<YearMonth> {
        if index >= self.len {
            return None;
        }
        self.first.add_months(i32::try_from(index).ok()?)
    }

    pub fn index_of(&self, ym: YearMonth) -> Option<usize> {
        usize::try_from(self.first.months_until(ym))
            .ok()
            .filter(|&i| i < self.len)
    }

    /// Height of the month at `index`, including the spacing below it
    pub fn row_height(&self, index: usize) -> u16 {
        self.month_at(index).map_or(0, |ym| {
            month_height(month_grid(ym, self.start).weeks().len()) + MONTH_SPACING
        })
    }

    /// Scrolls so that `ym` is at the top.  Months outside the feed clamp to
    /// its nearest end.
    pub fn scroll_to(&mut self, ym: YearMonth) {
        self.top = match self.index_of(ym) {
            Some(i) => i,
            None if ym < self.first => 0,
            None => self.len.saturating_sub(1),
        };
        self.top_offset = 0;
    }

    /// Scrolls by `delta` lines; positive values move further into the future
    pub fn scroll_lines(&mut self, delta: i32) {
        if delta >= 0 {
            let mut offset = u32::from(self.top_offset) + delta.unsigned_abs();
            loop {
                let height = u32::from(self.row_height(self.top));
                if self.top + 1 >= self.len {
                    offset = offset.min(height.saturating_sub(1));
                    break;
                }
                if offset < height {
                    break;
                }
                offset -= height;
                self.top += 1;
            }
            self.top_offset = u16::try_from(offset).unwrap_or_default();
        } else {
            let mut need = delta.unsigned_abs();
            let mut offset = u32::from(self.top_offset);
            while need > offset {
                if self.top == 0 {
                    offset = 0;
                    need = 0;
                    break;
                }
                need -= offset;
                self.top -= 1;
                offset = u32::from(self.row_height(self.top));
            }
            self.top_offset = u16::try_from(offset - need).unwrap_or_default();
        }
    }

    /// The months intersecting a viewport `height` lines tall, with the line
    /// at which each one starts (negative for a month scrolled partly off
    /// the top)
    pub fn visible_rows(&self, height: u16) -> Vec<(YearMonth, i32)> {
        let mut rows = Vec::new();
        let mut y = -i32::from(self.top_offset);
        let mut index = self.top;
        while y < i32::from(height) {
            let Some(ym) = self.month_at(index) else {
                break;
            };
            rows.push((ym, y));
            y += i32::from(self.row_height(index));
            index += 1;
        }
        rows
    }

    /// Scrolls `date`'s month to the top unless it already starts within the
    /// viewport
    pub fn ensure_visible(&mut self, date: Date, height: u16) {
        let ym = YearMonth::containing(date);
        let shown = self
            .visible_rows(height)
            .into_iter()
            .any(|(m, y)| m == ym && y >= 0);
        if !shown {
            self.scroll_to(ym);
        }
    }
}
