use crate::selection::Field;
use ratatui::layout::{Position, Rect};
use time::Date;

/// Something the user can click on
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Target {
    Day(Date),
    Input(Field),
    StepBack(Field),
    StepForward(Field),
    PrevMonth,
    NextMonth,
    Reset,
    Done,
    Back,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HitMap(Vec<(Rect, Target)>);

impl HitMap {
    pub fn new() -> HitMap {
        HitMap::default()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        if !rect.is_empty() {
            self.0.push((rect, target));
        }
    }

    /// Returns the most recently drawn target covering the given cell
    pub fn find(&self, x: u16, y: u16) -> Option<Target> {
        let pos = Position::new(x, y);
        self.0
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, target)| target)
    }

    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.0
            .iter()
            .rev()
            .find(|&&(_, t)| t == target)
            .map(|&(rect, _)| rect)
    }
}
