use time::Date;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    Single,
    #[default]
    Range,
}

/// One of the two endpoints of a selection
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    From,
    To,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::From => "Start Date",
            Field::To => "End Date",
        }
    }

    pub fn other(self) -> Field {
        match self {
            Field::From => Field::To,
            Field::To => Field::From,
        }
    }
}

/// Inclusive limits on the dates that can be selected
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Bounds {
    pub min: Option<Date>,
    pub max: Option<Date>,
}

impl Bounds {
    pub fn new(min: Option<Date>, max: Option<Date>) -> Bounds {
        Bounds { min, max }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }
}

/// Which endpoint a successful pick assigned
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Picked {
    From,
    To,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SelectionState {
    mode: SelectionMode,
    from: Option<Date>,
    to: Option<Date>,
    hover: Option<Date>,
    focus: Option<Field>,
}

impl SelectionState {
    pub fn new(mode: SelectionMode) -> SelectionState {
        SelectionState {
            mode,
            from: None,
            to: None,
            hover: None,
            focus: initial_focus(mode),
        }
    }

    /// Sets both endpoints without applying any selection rules, as when the
    /// host application supplies the initial dates.  `to` is dropped in
    /// single mode, and in range mode when it comes before `from`.
    pub fn with_dates(mut self, from: Option<Date>, to: Option<Date>) -> SelectionState {
        self.set_dates(from, to);
        self
    }

    pub fn set_dates(&mut self, from: Option<Date>, to: Option<Date>) {
        self.from = from;
        self.to = match (self.mode, from, to) {
            (SelectionMode::Single, _, _) => None,
            (SelectionMode::Range, Some(from), Some(end)) if end < from => {
                log::debug!("Ignoring end date {end} before start date {from}");
                None
            }
            (SelectionMode::Range, _, to) => to,
        };
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn from(&self) -> Option<Date> {
        self.from
    }

    pub fn to(&self) -> Option<Date> {
        self.to
    }

    pub fn hover(&self) -> Option<Date> {
        self.hover
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn get(&self, field: Field) -> Option<Date> {
        match field {
            Field::From => self.from,
            Field::To => self.to,
        }
    }

    pub fn is_single(&self) -> bool {
        self.mode == SelectionMode::Single
    }

    /// Applies a click on `date`.  Returns `None` and leaves the state
    /// untouched if `date` is out of bounds.
    pub fn pick(&mut self, date: Date, bounds: &Bounds) -> Option<Picked> {
        if !bounds.contains(date) {
            return None;
        }
        match self.mode {
            SelectionMode::Single => {
                self.from = Some(date);
                Some(Picked::From)
            }
            SelectionMode::Range => {
                if self.focus == Some(Field::From) || self.from.is_some_and(|from| date < from) {
                    self.from = Some(date);
                    if self.to.is_some_and(|to| to < date) {
                        self.to = None;
                    }
                    self.focus = Some(Field::To);
                    Some(Picked::From)
                } else {
                    self.to = Some(date);
                    self.focus = None;
                    Some(Picked::To)
                }
            }
        }
    }

    /// Sets one endpoint directly, as when stepping it by a day or typing
    /// it in.  Returns `false` if `date` is out of bounds.
    pub fn change_date(&mut self, date: Date, field: Field, bounds: &Bounds) -> bool {
        if !bounds.contains(date) {
            return false;
        }
        if field == Field::From || self.is_single() {
            self.focus = Some(Field::From);
            self.from = Some(date);
            if self.to.is_some_and(|to| to < date) {
                self.to = None;
            }
        } else {
            self.focus = Some(Field::To);
            self.to = Some(date);
        }
        true
    }

    /// Makes `field` the endpoint the next pick will set.  In range mode the
    /// end date cannot be focused until a start date exists.
    pub fn focus_field(&mut self, field: Field) -> bool {
        match (self.mode, field) {
            (SelectionMode::Single, _) => true,
            (SelectionMode::Range, Field::To) if self.from.is_none() => false,
            (SelectionMode::Range, _) => {
                self.focus = Some(field);
                true
            }
        }
    }

    /// Records the date under the pointer.  Disabled dates are ignored.
    pub fn set_hover(&mut self, date: Date, bounds: &Bounds) -> bool {
        if bounds.contains(date) {
            self.hover = Some(date);
            true
        } else {
            false
        }
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub fn reset(&mut self) {
        self.from = None;
        self.to = None;
        self.hover = None;
        self.focus = initial_focus(self.mode);
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.from == Some(date) || self.to == Some(date)
    }

    /// True for the committed end date, or for the hovered date while no end
    /// date has been chosen
    pub fn is_range_endpoint(&self, date: Date) -> bool {
        match self.to {
            Some(to) => to == date,
            None => self.hover == Some(date),
        }
    }

    /// True if `date` lies between the endpoints of the selection, or, while
    /// only a start date is set, between it and the hovered date
    pub fn in_range(&self, date: Date) -> bool {
        if self.is_single() {
            return false;
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) => from != to && from <= date && date <= to,
            (Some(_), None) => self.in_preview_range(date),
            _ => false,
        }
    }

    pub fn in_preview_range(&self, date: Date) -> bool {
        if self.is_single() || self.to.is_some() {
            return false;
        }
        let (Some(from), Some(hover)) = (self.from, self.hover) else {
            return false;
        };
        let (lo, hi) = if hover < from {
            (hover, from)
        } else {
            (from, hover)
        };
        lo <= date && date <= hi
    }
}

fn initial_focus(mode: SelectionMode) -> Option<Field> {
    match mode {
        SelectionMode::Single => Some(Field::From),
        SelectionMode::Range => None,
    }
}
