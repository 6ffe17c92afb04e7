use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use datepick::{
    dialog::PageDirection, theme::BASE_STYLE, DatePicker, Field, PickerWidget,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Instant;
use time::Date;

/// Lines scrolled by one turn of the mouse wheel
const WHEEL_LINES: i32 = 3;

#[derive(Debug)]
pub(crate) struct App {
    picker: DatePicker,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: DatePicker) -> App {
        App {
            picker,
            state: AppState::Picking,
        }
    }

    /// Runs until the user quits, then returns the final selection
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<(Option<Date>, Option<Date>)>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.wait_for_event()?;
            self.picker.tick(Instant::now());
        }
        self.picker.close(Instant::now());
        Ok((self.picker.from(), self.picker.to()))
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    /// Blocks until there is input or until the picker next has something to
    /// deliver
    fn wait_for_event(&mut self) -> io::Result<()> {
        if let Some(deadline) = self.picker.next_deadline() {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !poll(timeout)? {
                return Ok(());
            }
        }
        let event = read()?;
        let now = Instant::now();
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code, now) {
                self.beep()?;
            }
        } else if let Event::Mouse(mouse) = event {
            self.handle_mouse(mouse, now);
        }
        // else: Redraw on resize
        Ok(())
    }

    // Returns `false` if the key was invalid or did nothing
    fn handle_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match &mut self.state {
            AppState::Picking => self.handle_picker_key(key, now),
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Picking;
                    return true;
                }
                let output = match key {
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => state.handle_input(JumpToInput::Digit(d)),
                        None => JumpToOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(JumpToInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                    _ => JumpToOutput::Invalid,
                };
                match output {
                    JumpToOutput::Ok => true,
                    JumpToOutput::Invalid => false,
                    JumpToOutput::Jump(date) => {
                        self.state = AppState::Picking;
                        let field = self.focused_field();
                        self.picker.change_date(date, field, now)
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn handle_picker_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.picker.move_cursor(-1, now).is_ok(),
            KeyCode::Right | KeyCode::Char('l') => self.picker.move_cursor(1, now).is_ok(),
            KeyCode::Up => self.picker.move_cursor(-7, now).is_ok(),
            KeyCode::Down => self.picker.move_cursor(7, now).is_ok(),
            KeyCode::Char('k') => self.picker.scroll_feed(-1),
            KeyCode::Char('j') => self.picker.scroll_feed(1),
            KeyCode::Enter | KeyCode::Char(' ') if self.picker.is_open() => {
                self.picker.activate_cursor(now).is_some()
            }
            KeyCode::Enter | KeyCode::Char(' ' | 'o') => self.picker.open(now),
            KeyCode::PageUp => self.picker.page(PageDirection::Prev, now).is_ok(),
            KeyCode::PageDown => self.picker.page(PageDirection::Next, now).is_ok(),
            KeyCode::Char('[') => self.picker.step(self.focused_field(), false, now),
            KeyCode::Char(']') => self.picker.step(self.focused_field(), true, now),
            KeyCode::Tab | KeyCode::BackTab if !self.picker.selection().is_single() => {
                self.picker.click_input(self.focused_field().other(), now)
            }
            KeyCode::Char('r') => self.picker.reset(now),
            KeyCode::Char('g') if !self.picker.is_disabled() => {
                self.state = AppState::Jumping(JumpToState::new());
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            KeyCode::Esc if self.picker.is_open() => self.picker.close(now),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.state != AppState::Picking {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.picker.click(mouse.column, mouse.row, now);
            }
            MouseEventKind::Moved => {
                self.picker.pointer_move(mouse.column, mouse.row);
            }
            MouseEventKind::ScrollDown => {
                self.picker.scroll_feed(WHEEL_LINES);
            }
            MouseEventKind::ScrollUp => {
                self.picker.scroll_feed(-WHEEL_LINES);
            }
            _ => (),
        }
    }

    /// The field that keyboard edits apply to
    fn focused_field(&self) -> Field {
        self.picker.focus().unwrap_or(Field::From)
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.picker.resize(area.width);
        PickerWidget::new().render(area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepick::{dialog::SLIDE_DURATION, hit::Target, PickerOptions, RangeDatePicker};
    use time::macros::date;

    fn app() -> App {
        let options = PickerOptions::new()
            .start_date(Some(date!(2020 - 01 - 15)))
            .is_open(true);
        App::new(RangeDatePicker::new(options, date!(2020 - 01 - 10)).into_inner())
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn screen(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_keyboard_range() {
        let now = Instant::now();
        let mut app = app();
        render(&mut app);
        assert_eq!(app.picker.focus(), Some(Field::To));
        assert!(app.handle_key(KeyCode::Right, now));
        assert!(app.handle_key(KeyCode::Down, now));
        assert!(app.handle_key(KeyCode::Enter, now));
        assert_eq!(app.picker.to(), Some(date!(2020 - 01 - 23)));
        assert!(app.handle_key(KeyCode::Char('['), now));
        assert_eq!(app.picker.from(), Some(date!(2020 - 01 - 14)));
        assert!(app.handle_key(KeyCode::Tab, now));
        assert_eq!(app.picker.focus(), Some(Field::To));
        assert!(app.handle_key(KeyCode::Char(']'), now));
        assert_eq!(app.picker.to(), Some(date!(2020 - 01 - 24)));
    }

    #[test]
    fn test_escape_closes_then_quits() {
        let now = Instant::now();
        let mut app = app();
        assert!(app.handle_key(KeyCode::Esc, now));
        assert!(!app.picker.is_open());
        assert!(!app.quitting());
        assert!(app.handle_key(KeyCode::Esc, now));
        assert!(app.quitting());
    }

    #[test]
    fn test_jump_to() {
        let now = Instant::now();
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g'), now));
        for c in "20200301".chars() {
            assert!(app.handle_key(KeyCode::Char(c), now));
        }
        let buffer = render(&mut app);
        assert!(screen(&buffer).contains("2020-03-01"));
        assert!(app.handle_key(KeyCode::Enter, now));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.to(), Some(date!(2020 - 03 - 01)));
        app.picker.tick(now + SLIDE_DURATION);
        assert!(app.picker.window().is_visible(date!(2020 - 03 - 01)));
    }

    #[test]
    fn test_help() {
        let now = Instant::now();
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?'), now));
        let buffer = render(&mut app);
        assert!(screen(&buffer).contains("Commands"));
        assert!(app.handle_key(KeyCode::Char('x'), now));
        assert_eq!(app.state, AppState::Picking);
    }

    #[test]
    fn test_mouse_click() {
        let now = Instant::now();
        let mut app = app();
        render(&mut app);
        let target = (0..24)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .find(|&(x, y)| {
                app.picker.hit_test(x, y) == Some(Target::Day(date!(2020 - 01 - 20)))
            })
            .unwrap();
        app.handle_mouse(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: target.0,
                row: target.1,
                modifiers: KeyModifiers::NONE,
            },
            now,
        );
        assert_eq!(app.picker.to(), Some(date!(2020 - 01 - 20)));
    }
}
