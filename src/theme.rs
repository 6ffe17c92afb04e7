use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray).add_modifier(Modifier::BOLD);

pub const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub const IN_RANGE_STYLE: Style = BASE_STYLE.bg(Color::Blue);

/// Patched over a day's style to mark today
pub const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Patched over the end of a range being previewed
pub const ENDPOINT_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Patched over the day under the keyboard cursor
pub const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const SUB_TEXT_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub const BORDER_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub const BUTTON_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const DISABLED_BUTTON_STYLE: Style = DISABLED_STYLE;

pub const TOOLTIP_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub mod input {
    use super::*;

    pub const VALUE_STYLE: Style = BASE_STYLE;

    pub const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub const FOCUSED_STYLE: Style = Style::new()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::UNDERLINED);
}

pub mod jumpto {
    use super::*;

    pub const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
