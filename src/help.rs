use datepick::theme::BORDER_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget, Wrap},
};

static TEXT: &[&str] = &[
    "ARROWS, h, l     Move the cursor by a day or a week",
    "ENTER, SPACE     Pick the date under the cursor",
    "PAGE UP/DOWN     Show the previous/next month",
    "j, k             Scroll the month list (narrow screens)",
    "[, ]             Step the focused date back/forward",
    "TAB              Switch between start & end dates",
    "g                Type in a date for the focused field",
    "r                Clear the selection",
    "o                Open the calendar",
    "?                Show this help",
    "ESC              Close the calendar, or quit",
    "q                Quit and print the selection",
    "",
    "Press the Any Key to dismiss.",
];

/// A box listing the demo's key bindings, centered over whatever is below
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = TEXT
            .iter()
            .map(|&s| Line::raw(s))
            .collect::<Text<'_>>();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .border_style(BORDER_STYLE)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}
