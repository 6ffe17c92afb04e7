use super::DatePicker;
use crate::calendar::{
    draw_weekday_labels, month_grid, weekday_labels, Canvas, DayContext, MonthGrid, MonthView,
    MONTH_HEADER_LINES, MONTH_WIDTH, WEEK_LINES,
};
use crate::dialog::PageDirection;
use crate::hit::{HitMap, Target};
use crate::input::{DateInput, InputGroup};
use crate::options::ExpandDirection;
use crate::selection::Field;
use crate::theme::{
    BASE_STYLE, BORDER_STYLE, BUTTON_STYLE, DISABLED_BUTTON_STYLE, TOOLTIP_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

/// Columns between two months shown side by side
pub const MONTH_GAP: u16 = 3;

/// Columns on either side of the months, holding the paging buttons
const FLIPPER_MARGIN: u16 = 2;

/// Enough lines for a month spanning six weeks
const DESKTOP_CONTENT_LINES: u16 = MONTH_HEADER_LINES + 6 * WEEK_LINES;

/// The header's controls, then a rule
const HEADER_LINES: u16 = 2;

/// A rule, then the footer's buttons
const FOOTER_LINES: u16 = 2;

const TOOLTIP_LINES: u16 = 1;

const BACK_BUTTON: &str = "←";

const RESET_BUTTON: &str = "Reset";

const DONE_BUTTON: &str = "[ Done ]";

const PREV_BUTTON: char = '‹';

const NEXT_BUTTON: char = '›';

const RULE: char = '─';

/// Width of the side-by-side dialog, including its border
pub const fn desktop_dialog_width(single_calendar: bool) -> u16 {
    let months = if single_calendar {
        MONTH_WIDTH
    } else {
        2 * MONTH_WIDTH + MONTH_GAP
    };
    months + 2 * FLIPPER_MARGIN + 2
}

/// Terminals narrower than this get the scrolling layout
pub const DESKTOP_MIN_WIDTH: u16 = desktop_dialog_width(false);

/// Draws a [`DatePicker`]: its date fields on the first line of the area
/// and, while it is open, the dialog below them.  In the narrow layout the
/// dialog covers the whole area.
///
/// Every clickable element is recorded so that
/// [`DatePicker::click`] and [`DatePicker::pointer_move`] can route mouse
/// events.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PickerWidget;

impl PickerWidget {
    pub fn new() -> PickerWidget {
        PickerWidget
    }
}

impl StatefulWidget for PickerWidget {
    type State = DatePicker;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut DatePicker) {
        let mut hits = std::mem::take(&mut state.hits);
        hits.clear();
        let mut painter = Painter {
            picker: state,
            hits: &mut hits,
            feed_height: 0,
        };
        let footprint = painter.draw(area, buf);
        let feed_height = painter.feed_height;
        state.hits = hits;
        state.footprint = footprint;
        if state.mobile {
            state.feed_height = feed_height;
        }
    }
}

#[derive(Debug)]
struct Painter<'a> {
    picker: &'a DatePicker,
    hits: &'a mut HitMap,
    feed_height: u16,
}

impl<'a> Painter<'a> {
    fn draw(&mut self, area: Rect, buf: &mut Buffer) -> Rect {
        let group = self.input_group();
        let group_width = group.width();
        let input_area = Rect::new(area.x, area.y, group_width.min(area.width), area.height.min(1));
        let covered = self.picker.is_open() && self.picker.is_mobile();
        if !covered {
            let mut canvas = Canvas::new(input_area, buf);
            if self.picker.is_disabled() {
                let mut ignored = HitMap::new();
                group.draw(&mut canvas, 0, 0, &mut ignored);
                canvas.fill(0, 0, canvas.width(), DISABLED_BUTTON_STYLE);
            } else {
                group.draw(&mut canvas, 0, 0, self.hits);
            }
        }
        if !self.picker.is_open() {
            return input_area;
        }
        let dialog = self.dialog_area(area, group_width);
        Clear.render(dialog, buf);
        Block::bordered()
            .border_style(BORDER_STYLE)
            .style(BASE_STYLE)
            .render(dialog, buf);
        let inner = dialog.inner(Margin::new(1, 1));
        let opts = self.picker.options();
        let header_lines = if opts.hide_dialog_header { 0 } else { HEADER_LINES };
        let footer_lines = if opts.hide_dialog_footer { 0 } else { FOOTER_LINES };
        let [header, content, tooltip, footer] = Layout::vertical([
            Constraint::Length(header_lines),
            Constraint::Fill(1),
            Constraint::Length(TOOLTIP_LINES),
            Constraint::Length(footer_lines),
        ])
        .areas(inner);
        if header_lines > 0 {
            self.draw_header(&mut Canvas::new(header, buf), group);
        }
        if self.picker.is_mobile() {
            self.draw_feed(content, buf);
        } else {
            self.draw_months(content, buf);
        }
        if let Some(text) = self.picker.tooltip_text() {
            Canvas::new(tooltip, buf).mvprint(0, 1, &text, TOOLTIP_STYLE);
        }
        if footer_lines > 0 {
            self.draw_footer(&mut Canvas::new(footer, buf));
        }
        input_area.union(dialog)
    }

    fn input_group(&self) -> InputGroup<'a> {
        let picker: &'a DatePicker = self.picker;
        let opts = picker.options();
        let fields: &[Field] = if picker.selection().is_single() {
            &[Field::From]
        } else {
            &[Field::From, Field::To]
        };
        let inputs = fields
            .iter()
            .map(|&field| {
                let placeholder = match field {
                    Field::From => opts.start_date_placeholder.as_deref(),
                    Field::To => opts.end_date_placeholder.as_deref(),
                };
                DateInput::new(
                    field,
                    picker.selection(),
                    picker.bounds(),
                    &opts.date_format,
                    picker.locale(),
                    placeholder.unwrap_or_default(),
                )
            })
            .collect();
        InputGroup {
            inputs,
            separator: opts.date_input_separator.as_deref(),
        }
    }

    fn dialog_area(&self, area: Rect, group_width: u16) -> Rect {
        if self.picker.is_mobile() {
            return area;
        }
        let opts = self.picker.options();
        let width = desktop_dialog_width(opts.single_calendar).min(area.width);
        let mut height = 2 + DESKTOP_CONTENT_LINES + TOOLTIP_LINES;
        if !opts.hide_dialog_header {
            height += HEADER_LINES;
        }
        if !opts.hide_dialog_footer {
            height += FOOTER_LINES;
        }
        let x = match opts.expand_direction {
            ExpandDirection::Right => area.x,
            ExpandDirection::Left => (area.x + group_width).saturating_sub(width).max(area.x),
        };
        let below = area.height.saturating_sub(1);
        Rect::new(x, area.y + area.height.min(1), width, height.min(below))
    }

    fn draw_header(&mut self, canvas: &mut Canvas<'_>, group: InputGroup<'_>) {
        canvas.mvprint(0, 0, BACK_BUTTON, BUTTON_STYLE);
        self.hits.push(canvas.rect(0, 0, 1, 1), Target::Back);
        let group_end = group.width().saturating_add(2);
        group.draw(canvas, 0, 2, self.hits);
        let reset_x = canvas.width().saturating_sub(text_width(RESET_BUTTON));
        if reset_x > group_end {
            self.draw_reset(canvas, 0, i32::from(reset_x));
        }
        canvas.hline(1, 0, RULE, canvas.width(), BORDER_STYLE);
    }

    fn draw_footer(&mut self, canvas: &mut Canvas<'_>) {
        canvas.hline(0, 0, RULE, canvas.width(), BORDER_STYLE);
        let done_width = text_width(DONE_BUTTON);
        let x = i32::from(canvas.width().saturating_sub(done_width));
        canvas.mvprint(1, x, DONE_BUTTON, BUTTON_STYLE);
        self.hits.push(canvas.rect(1, x, done_width, 1), Target::Done);
        self.draw_reset(canvas, 1, 0);
    }

    fn draw_reset(&mut self, canvas: &mut Canvas<'_>, y: i32, x: i32) {
        let width = text_width(RESET_BUTTON);
        canvas.mvprint(y, x, RESET_BUTTON, BUTTON_STYLE);
        self.hits.push(canvas.rect(y, x, width, 1), Target::Reset);
    }

    fn day_context(&self) -> DayContext<'a> {
        let picker: &'a DatePicker = self.picker;
        DayContext {
            selection: picker.selection(),
            bounds: *picker.bounds(),
            today: picker.today(),
            highlight_today: picker.options().highlight_today,
            sub_text: picker.options().sub_text_dict.as_ref(),
            cursor: picker.cursor(),
        }
    }

    fn month_view<'g>(&self, grid: &'g MonthGrid, show_labels: bool) -> MonthView<'g> {
        let opts = self.picker.options();
        let locale = self.picker.locale();
        MonthView {
            grid,
            title: opts
                .month_format
                .format(grid.year_month().first_day(), locale)
                .to_string(),
            labels: weekday_labels(opts.start_week_day, opts.week_day_format, locale),
            show_labels,
        }
    }

    fn draw_months(&mut self, area: Rect, buf: &mut Buffer) {
        let picker = self.picker;
        let window = picker.window();
        let bounds = picker.bounds();
        {
            let mut canvas = Canvas::new(area, buf);
            let last = i32::from(canvas.width()) - 1;
            for (direction, x, target) in [
                (PageDirection::Prev, 0, Target::PrevMonth),
                (PageDirection::Next, last, Target::NextMonth),
            ] {
                let symbol = match direction {
                    PageDirection::Prev => PREV_BUTTON,
                    PageDirection::Next => NEXT_BUTTON,
                };
                if window.can_page(direction, bounds).is_ok() {
                    canvas.mvaddch(0, x, symbol, BUTTON_STYLE);
                    self.hits.push(canvas.rect(0, x, 1, 1), target);
                } else {
                    canvas.mvaddch(0, x, symbol, DISABLED_BUTTON_STYLE);
                }
            }
        }
        let months_area = Rect {
            x: area.x + FLIPPER_MARGIN,
            width: area.width.saturating_sub(2 * FLIPPER_MARGIN),
            ..area
        };
        let mut canvas = Canvas::new(months_area, buf);
        let span = MONTH_WIDTH + MONTH_GAP;
        let offset = window.slide_offset(picker.now, span);
        let ctx = self.day_context();
        let start = picker.options().start_week_day;
        for (i, ym) in (-1i32..).zip(window.months()) {
            let x = i * i32::from(span) - offset;
            if x + i32::from(MONTH_WIDTH) <= 0 || x >= i32::from(canvas.width()) {
                continue;
            }
            let grid = month_grid(ym, start);
            self.month_view(&grid, true)
                .draw(&mut canvas, 0, x, &ctx, self.hits);
        }
    }

    fn draw_feed(&mut self, area: Rect, buf: &mut Buffer) {
        let picker = self.picker;
        let opts = picker.options();
        let x = i32::from(area.width.saturating_sub(MONTH_WIDTH) / 2);
        let [labels_area, feed_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        let labels = weekday_labels(opts.start_week_day, opts.week_day_format, picker.locale());
        draw_weekday_labels(&mut Canvas::new(labels_area, buf), 0, x, &labels);
        let mut canvas = Canvas::new(feed_area, buf);
        self.feed_height = canvas.height();
        let ctx = self.day_context();
        for (ym, y) in picker.feed().visible_rows(canvas.height()) {
            let grid = month_grid(ym, opts.start_week_day);
            self.month_view(&grid, false)
                .draw(&mut canvas, y, x, &ctx, self.hits);
        }
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{PickerOptions, Tooltip};
    use crate::selection::SelectionMode;
    use std::time::Instant;
    use time::macros::date;
    use time::Date;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    fn render(picker: &mut DatePicker, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PickerWidget::new().render(area, &mut buf, picker);
        buf
    }

    fn day_position(picker: &DatePicker, date: Date) -> (u16, u16) {
        let rect = picker.hits.rect_of(Target::Day(date)).unwrap();
        (rect.x + 1, rect.y)
    }

    fn picker(options: PickerOptions) -> DatePicker {
        DatePicker::new(
            SelectionMode::Range,
            options
                .start_date_placeholder("Start date")
                .end_date_placeholder("End date"),
            date!(2020 - 01 - 10),
        )
    }

    #[test]
    fn test_closed_picker_draws_only_inputs() {
        let mut picker = picker(PickerOptions::new().start_date(Some(date!(2020 - 01 - 05))));
        let buf = render(&mut picker, 80, 24);
        assert!(row(&buf, 0).starts_with("Sun, 05 Jan ‹ ›  End date"));
        assert_eq!(row(&buf, 1).trim(), "");
        assert_eq!(picker.hit_test(0, 0), Some(Target::Input(Field::From)));
    }

    #[test]
    fn test_open_desktop_dialog() {
        let now = Instant::now();
        let mut picker = picker(PickerOptions::new());
        picker.resize(80);
        picker.open(now);
        let buf = render(&mut picker, 80, 24);
        let all = (0..24).map(|y| row(&buf, y)).collect::<Vec<_>>().join("\n");
        assert!(all.contains("January - 2020"));
        assert!(all.contains("February - 2020"));
        assert!(!all.contains("March - 2020"));
        assert!(all.contains("[ Done ]"));
        let (x, y) = day_position(&picker, date!(2020 - 01 - 15));
        assert!(picker.click(x, y, now));
        assert_eq!(picker.from(), Some(date!(2020 - 01 - 15)));
        let next = picker.hits.rect_of(Target::NextMonth).unwrap();
        assert!(picker.click(next.x, next.y, now));
        assert!(picker.window().is_animating());
    }

    #[test]
    fn test_hover_preview_and_tooltip() {
        let now = Instant::now();
        let mut picker = picker(
            PickerOptions::new()
                .start_date(Some(date!(2020 - 01 - 05)))
                .tooltip(Tooltip::Dynamic(Box::new(|d| format!("Ends {d}")))),
        );
        picker.resize(80);
        picker.open(now);
        render(&mut picker, 80, 24);
        let (x, y) = day_position(&picker, date!(2020 - 01 - 08));
        assert!(picker.pointer_move(x, y));
        assert!(picker.selection().in_preview_range(date!(2020 - 01 - 07)));
        let buf = render(&mut picker, 80, 24);
        let all = (0..24).map(|y| row(&buf, y)).collect::<Vec<_>>().join("\n");
        assert!(all.contains("Ends 2020-01-08"));
        assert!(picker.pointer_move(0, 23));
        assert_eq!(picker.selection().hover(), None);
    }

    #[test]
    fn test_click_outside_closes() {
        let now = Instant::now();
        let mut picker = picker(PickerOptions::new().single_calendar(true));
        picker.resize(100);
        picker.open(now);
        render(&mut picker, 100, 30);
        assert!(picker.click(90, 25, now));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_done_and_reset_buttons() {
        let now = Instant::now();
        let mut picker = picker(
            PickerOptions::new()
                .start_date(Some(date!(2020 - 01 - 05)))
                .end_date(Some(date!(2020 - 01 - 09))),
        );
        picker.resize(80);
        picker.open(now);
        render(&mut picker, 80, 24);
        let reset = picker.hits.rect_of(Target::Reset).unwrap();
        assert!(picker.click(reset.x, reset.y, now));
        assert_eq!(picker.from(), None);
        assert_eq!(picker.to(), None);
        render(&mut picker, 80, 24);
        let done = picker.hits.rect_of(Target::Done).unwrap();
        assert!(picker.click(done.x, done.y, now));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_disabled_inputs_are_not_clickable() {
        let mut picker = picker(PickerOptions::new().disabled(true));
        render(&mut picker, 80, 24);
        assert_eq!(picker.hit_test(0, 0), None);
    }

    #[test]
    fn test_mobile_feed() {
        let now = Instant::now();
        let mut picker = picker(PickerOptions::new().start_date(Some(date!(2021 - 01 - 05))));
        picker.resize(40);
        assert!(picker.is_mobile());
        picker.open(now);
        let buf = render(&mut picker, 40, 30);
        let all = (0..30).map(|y| row(&buf, y)).collect::<Vec<_>>().join("\n");
        assert!(all.contains("January - 2021"));
        assert!(!all.contains("December - 2020"));
        assert!(picker.scroll_feed(5));
        assert_eq!(picker.feed().top_offset(), 5);
        assert!(picker.move_cursor(40, now).is_ok());
        assert_eq!(picker.cursor(), Some(date!(2021 - 02 - 14)));
        render(&mut picker, 40, 30);
        assert!(picker.hits.rect_of(Target::Day(date!(2021 - 02 - 14))).is_some());
    }
}
