use super::cell::{DayCell, DayContext};
use super::weeks::MonthGrid;
use crate::hit::{HitMap, Target};
use crate::theme::{IN_RANGE_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Number of columns per day of week
pub const DAY_WIDTH: u16 = 5;

/// Width of one month, in columns
pub const MONTH_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by each week: the day numbers, then any sub-text
pub const WEEK_LINES: u16 = 2;

/// Lines above the first week: the month title and the weekday names
pub const MONTH_HEADER_LINES: u16 = 2;

/// Height of a month with the given number of weeks, including its header
pub fn month_height(weeks: usize) -> u16 {
    let weeks = u16::try_from(weeks).unwrap_or(u16::MAX);
    MONTH_HEADER_LINES.saturating_add(weeks.saturating_mul(WEEK_LINES))
}

/// One month's worth of calendar, ready to be drawn at any offset
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    pub(crate) grid: &'a MonthGrid,
    pub(crate) title: String,
    pub(crate) labels: [&'static str; 7],
    /// The mobile feed shows the weekday names once, above all months
    pub(crate) show_labels: bool,
}

impl MonthView<'_> {
    pub(crate) fn draw(
        &self,
        canvas: &mut Canvas<'_>,
        y: i32,
        x: i32,
        ctx: &DayContext<'_>,
        hits: &mut HitMap,
    ) {
        let title_len = u16::try_from(self.title.chars().count()).unwrap_or(u16::MAX);
        let title_x = x + i32::from(MONTH_WIDTH.saturating_sub(title_len) / 2);
        canvas.mvprint(y, title_x, &self.title, TITLE_STYLE);
        let mut top = y + 1;
        if self.show_labels {
            draw_weekday_labels(canvas, top, x, &self.labels);
        }
        top += 1;
        let ym = self.grid.year_month();
        for (row, week) in (0i32..).zip(self.grid.weeks()) {
            let row_y = top + row * i32::from(WEEK_LINES);
            for day in week.day_numbers() {
                let Some(date) = ym.day(day) else {
                    continue;
                };
                let col = week.offset + (day - week.start);
                let cell_x = x + i32::from(u16::from(col) * DAY_WIDTH);
                let cell = DayCell::new(date, ctx);
                canvas.mvprint(row_y, cell_x, &cell.label(), cell.style());
                let last_in_row = day + 1 == week.start + week.days;
                if cell.in_range
                    && !last_in_row
                    && date.next_day().is_some_and(|d| ctx.selection.in_range(d))
                {
                    // Join adjacent days into one band
                    canvas.fill(row_y, cell_x + i32::from(DAY_WIDTH) - 1, 1, IN_RANGE_STYLE);
                }
                if let Some(text) = cell.sub_text {
                    let text = truncate(text, usize::from(DAY_WIDTH - 1));
                    canvas.mvprint(
                        row_y + 1,
                        cell_x,
                        &format!("{text:^4}"),
                        cell.sub_text_style(),
                    );
                }
                hits.push(
                    canvas.rect(row_y, cell_x, DAY_WIDTH - 1, WEEK_LINES),
                    Target::Day(date),
                );
            }
        }
    }
}

pub(crate) fn draw_weekday_labels(canvas: &mut Canvas<'_>, y: i32, x: i32, labels: &[&str; 7]) {
    for (col, label) in (0i32..).zip(labels) {
        let label = truncate(label, usize::from(DAY_WIDTH - 1));
        canvas.mvprint(
            y,
            x + col * i32::from(DAY_WIDTH) + 1,
            &label,
            WEEKDAY_STYLE,
        );
    }
}

pub(crate) fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Draws onto a region of a buffer using coordinates relative to that region.
/// Anything falling outside the region, including at negative coordinates, is
/// clipped.
#[derive(Debug)]
pub(crate) struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        let area = area.intersection(buf.area);
        Self { area, buf }
    }

    pub(crate) fn width(&self) -> u16 {
        self.area.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.area.height
    }

    fn absolute(&self, y: i32, x: i32) -> Option<(u16, u16)> {
        if y < 0 || x < 0 || y >= i32::from(self.area.height) || x >= i32::from(self.area.width) {
            return None;
        }
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        Some((self.area.x + x, self.area.y + y))
    }

    pub(crate) fn mvaddch(&mut self, y: i32, x: i32, ch: char, style: Style) {
        if let Some(pos) = self.absolute(y, x) {
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    pub(crate) fn mvprint(&mut self, y: i32, x: i32, s: &str, style: Style) {
        for (i, ch) in (0i32..).zip(s.chars()) {
            self.mvaddch(y, x + i, ch, style);
        }
    }

    pub(crate) fn hline(&mut self, y: i32, x: i32, ch: char, length: u16, style: Style) {
        for i in 0..i32::from(length) {
            self.mvaddch(y, x + i, ch, style);
        }
    }

    /// Applies `style` to a run of cells without changing their contents
    pub(crate) fn fill(&mut self, y: i32, x: i32, length: u16, style: Style) {
        for i in 0..i32::from(length) {
            if let Some(pos) = self.absolute(y, x + i) {
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_style(style);
                }
            }
        }
    }

    /// Returns the absolute screen rectangle covered by the given relative
    /// rectangle, clipped to the canvas
    pub(crate) fn rect(&self, y: i32, x: i32, width: u16, height: u16) -> Rect {
        let clip = |start: i32, len: u16, limit: u16| -> (u16, u16) {
            let lo = start.clamp(0, i32::from(limit));
            let hi = (start + i32::from(len)).clamp(0, i32::from(limit));
            (
                u16::try_from(lo).unwrap_or_default(),
                u16::try_from(hi - lo).unwrap_or_default(),
            )
        };
        let (x, width) = clip(x, width, self.area.width);
        let (y, height) = clip(y, height, self.area.height);
        Rect::new(self.area.x + x, self.area.y + y, width, height)
    }
}
