//! Date-range and single-date picker for terminal user interfaces.
//!
//! A [`DatePicker`] holds the selection, the dialog's paging and scrolling
//! state, and the timers behind its callbacks.  It is driven by calling its
//! event methods with an explicit `now`, and drawn with [`PickerWidget`].
//! [`RangeDatePicker`] and [`SingleDatePicker`] wrap it with sensible
//! placeholders and callbacks shaped for each kind of selection.
pub mod calendar;
pub mod dialog;
pub mod facade;
pub mod format;
pub mod hit;
pub mod input;
pub mod locale;
pub mod notify;
pub mod options;
pub mod picker;
pub mod selection;
pub mod theme;
pub use crate::facade::{RangeDatePicker, SingleDatePicker};
pub use crate::options::{ExpandDirection, PickerOptions, SubTextDict, Tooltip};
pub use crate::picker::{DatePicker, PickerWidget};
pub use crate::selection::{Field, Picked, SelectionMode};
