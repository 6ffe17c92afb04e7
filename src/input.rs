use crate::calendar::{truncate, Canvas};
use crate::format::DateFormat;
use crate::hit::{HitMap, Target};
use crate::locale::Locale;
use crate::selection::{Bounds, Field, SelectionState};
use crate::theme::input::{FOCUSED_STYLE, PLACEHOLDER_STYLE, VALUE_STYLE};
use crate::theme::{BUTTON_STYLE, DISABLED_BUTTON_STYLE};
use time::Date;

/// Minimum number of columns given to a field's text
const MIN_TEXT_WIDTH: u16 = 11;

/// Columns taken by the step buttons: a space, back, a space, forward
const STEP_WIDTH: u16 = 4;

const STEP_BACK: char = '‹';

const STEP_FORWARD: char = '›';

/// Gap between the fields when no separator is configured
const DEFAULT_GAP: u16 = 2;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateInput {
    pub field: Field,
    pub value: Option<Date>,
    /// The formatted date, or the placeholder if there is no date
    pub text: String,
    pub focused: bool,
    pub can_step_back: bool,
    pub can_step_forward: bool,
}

impl DateInput {
    pub fn new(
        field: Field,
        selection: &SelectionState,
        bounds: &Bounds,
        format: &DateFormat,
        locale: &Locale,
        placeholder: &str,
    ) -> DateInput {
        let value = selection.get(field);
        let text = match value {
            Some(date) => format.format(date, locale).to_string(),
            None => placeholder.to_owned(),
        };
        DateInput {
            field,
            value,
            text,
            focused: selection.focus() == Some(field),
            can_step_back: can_step_back(field, value, selection.from(), bounds),
            can_step_forward: can_step_forward(value, bounds),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_none()
    }

    fn text_width(&self) -> u16 {
        let len = u16::try_from(self.text.chars().count()).unwrap_or(u16::MAX);
        len.max(MIN_TEXT_WIDTH)
    }

    pub fn width(&self) -> u16 {
        self.text_width().saturating_add(STEP_WIDTH)
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>, y: i32, x: i32, hits: &mut HitMap) {
        let width = self.text_width();
        let mut style = if self.is_placeholder() {
            PLACEHOLDER_STYLE
        } else {
            VALUE_STYLE
        };
        if self.focused {
            style = style.patch(FOCUSED_STYLE);
        }
        let w = usize::from(width);
        let text = truncate(&self.text, w);
        canvas.mvprint(y, x, &format!("{text:<w$}"), style);
        hits.push(canvas.rect(y, x, width, 1), Target::Input(self.field));
        if self.value.is_none() {
            return;
        }
        let back_x = x + i32::from(width) + 1;
        let fwd_x = back_x + 2;
        if self.can_step_back {
            canvas.mvaddch(y, back_x, STEP_BACK, BUTTON_STYLE);
            hits.push(canvas.rect(y, back_x, 1, 1), Target::StepBack(self.field));
        } else {
            canvas.mvaddch(y, back_x, STEP_BACK, DISABLED_BUTTON_STYLE);
        }
        if self.can_step_forward {
            canvas.mvaddch(y, fwd_x, STEP_FORWARD, BUTTON_STYLE);
            hits.push(canvas.rect(y, fwd_x, 1, 1), Target::StepForward(self.field));
        } else {
            canvas.mvaddch(y, fwd_x, STEP_FORWARD, DISABLED_BUTTON_STYLE);
        }
    }
}

/// A date can be stepped back unless it is already at the minimum or, for
/// the end date, no later than the start date
pub fn can_step_back(field: Field, value: Option<Date>, from: Option<Date>, bounds: &Bounds) -> bool {
    let Some(value) = value else {
        return false;
    };
    if bounds.min.is_some_and(|min| value <= min) {
        return false;
    }
    !(field == Field::To && from.is_some_and(|from| value <= from))
}

pub fn can_step_forward(value: Option<Date>, bounds: &Bounds) -> bool {
    value.is_some_and(|value| bounds.max.is_none_or(|max| value < max))
}

/// The fields of one picker laid out on a single line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct InputGroup<'a> {
    pub(crate) inputs: Vec<DateInput>,
    pub(crate) separator: Option<&'a str>,
}

impl InputGroup<'_> {
    fn gap(&self) -> u16 {
        match self.separator {
            Some(sep) => u16::try_from(sep.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
            None => DEFAULT_GAP,
        }
    }

    pub(crate) fn width(&self) -> u16 {
        let fields = self
            .inputs
            .iter()
            .fold(0u16, |acc, i| acc.saturating_add(i.width()));
        let gaps = u16::try_from(self.inputs.len().saturating_sub(1)).unwrap_or_default();
        fields.saturating_add(gaps.saturating_mul(self.gap()))
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>, y: i32, x: i32, hits: &mut HitMap) {
        let mut x = x;
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = self.separator {
                    canvas.mvprint(y, x + 1, sep, VALUE_STYLE);
                }
                x += i32::from(self.gap());
            }
            input.draw(canvas, y, x, hits);
            x += i32::from(input.width());
        }
    }
}
