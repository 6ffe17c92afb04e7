use crate::options::SubTextDict;
use crate::selection::{Bounds, SelectionState};
use crate::theme::{
    BASE_STYLE, CURSOR_STYLE, DISABLED_STYLE, ENDPOINT_STYLE, IN_RANGE_STYLE, SELECTED_STYLE, SUB_TEXT_STYLE,
    TODAY_STYLE,
};
use ratatui::style::Style;
use time::Date;

/// Everything needed to decide how a day is drawn
#[derive(Clone, Copy, Debug)]
pub struct DayContext<'a> {
    pub selection: &'a SelectionState,
    pub bounds: Bounds,
    pub today: Date,
    pub highlight_today: bool,
    pub sub_text: Option<&'a SubTextDict>,
    pub cursor: Option<Date>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell<'a> {
    pub date: Date,
    pub disabled: bool,
    pub selected: bool,
    pub in_range: bool,
    pub is_endpoint: bool,
    pub highlighted: bool,
    pub focused: bool,
    /// `Some("")` for days without an annotation when a dictionary is in use,
    /// so that every week keeps the same height
    pub sub_text: Option<&'a str>,
}

impl<'a> DayCell<'a> {
    pub fn new(date: Date, ctx: &DayContext<'a>) -> DayCell<'a> {
        let sel = ctx.selection;
        DayCell {
            date,
            disabled: !ctx.bounds.contains(date),
            selected: sel.is_selected(date),
            in_range: sel.in_range(date),
            is_endpoint: !sel.is_single() && sel.is_range_endpoint(date),
            highlighted: ctx.highlight_today && date == ctx.today,
            focused: ctx.cursor == Some(date),
            sub_text: ctx.sub_text.map(|dict| dict.get(date).unwrap_or_default()),
        }
    }

    pub fn label(&self) -> String {
        if self.highlighted {
            format!("[{:2}]", self.date.day())
        } else {
            format!(" {:2} ", self.date.day())
        }
    }

    pub fn style(&self) -> Style {
        let mut style = if self.disabled {
            DISABLED_STYLE
        } else if self.selected {
            SELECTED_STYLE
        } else if self.in_range {
            IN_RANGE_STYLE
        } else {
            BASE_STYLE
        };
        if self.highlighted && !self.selected {
            style = style.patch(TODAY_STYLE);
        }
        if self.is_endpoint && !self.selected {
            style = style.patch(ENDPOINT_STYLE);
        }
        if self.focused {
            style = style.patch(CURSOR_STYLE);
        }
        style
    }

    pub fn sub_text_style(&self) -> Style {
        if self.disabled {
            DISABLED_STYLE
        } else if self.in_range {
            IN_RANGE_STYLE
        } else {
            SUB_TEXT_STYLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionMode;
    use time::macros::date;

    fn ctx<'a>(sel: &'a SelectionState, dict: Option<&'a SubTextDict>) -> DayContext<'a> {
        DayContext {
            selection: sel,
            bounds: Bounds::new(Some(date!(2020 - 01 - 03)), Some(date!(2020 - 01 - 28))),
            today: date!(2020 - 01 - 10),
            highlight_today: true,
            sub_text: dict,
            cursor: Some(date!(2020 - 01 - 12)),
        }
    }

    #[test]
    fn test_flags() {
        let sel = SelectionState::new(SelectionMode::Range)
            .with_dates(Some(date!(2020 - 01 - 05)), Some(date!(2020 - 01 - 15)));
        let ctx = ctx(&sel, None);
        let cell = DayCell::new(date!(2020 - 01 - 02), &ctx);
        assert!(cell.disabled);
        assert!(!cell.in_range);
        let cell = DayCell::new(date!(2020 - 01 - 05), &ctx);
        assert!(cell.selected);
        assert!(cell.in_range);
        assert!(!cell.is_endpoint);
        let cell = DayCell::new(date!(2020 - 01 - 10), &ctx);
        assert!(cell.highlighted);
        assert!(cell.in_range);
        assert_eq!(cell.label(), "[10]");
        let cell = DayCell::new(date!(2020 - 01 - 12), &ctx);
        assert!(cell.focused);
        assert_eq!(cell.label(), " 12 ");
        let cell = DayCell::new(date!(2020 - 01 - 15), &ctx);
        assert!(cell.selected);
        assert!(cell.is_endpoint);
        assert_eq!(cell.sub_text, None);
    }

    #[test]
    fn test_sub_text_is_blank_when_missing() {
        let sel = SelectionState::new(SelectionMode::Single);
        let mut dict = SubTextDict::new();
        dict.insert(date!(2020 - 01 - 07), "$99");
        let ctx = ctx(&sel, Some(&dict));
        assert_eq!(DayCell::new(date!(2020 - 01 - 07), &ctx).sub_text, Some("$99"));
        assert_eq!(DayCell::new(date!(2020 - 01 - 08), &ctx).sub_text, Some(""));
    }

    #[test]
    fn test_styles() {
        let sel = SelectionState::new(SelectionMode::Range)
            .with_dates(Some(date!(2020 - 01 - 05)), Some(date!(2020 - 01 - 15)));
        let ctx = ctx(&sel, None);
        assert_eq!(DayCell::new(date!(2020 - 01 - 02), &ctx).style(), DISABLED_STYLE);
        assert_eq!(DayCell::new(date!(2020 - 01 - 05), &ctx).style(), SELECTED_STYLE);
        assert_eq!(DayCell::new(date!(2020 - 01 - 08), &ctx).style(), IN_RANGE_STYLE);
        assert_eq!(
            DayCell::new(date!(2020 - 01 - 12), &ctx).style(),
            IN_RANGE_STYLE.patch(CURSOR_STYLE)
        );
    }
}
