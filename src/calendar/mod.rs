mod cell;
mod util;
mod weeks;
mod widget;
pub use self::cell::{DayCell, DayContext};
pub(crate) use self::util::add_days;
pub use self::util::YearMonth;
pub use self::weeks::{
    month_grid, weekday_labels, MonthGrid, StartWeekDay, WeekSpan, WeekdayFormat,
};
pub(crate) use self::widget::{draw_weekday_labels, truncate, Canvas, MonthView};
pub use self::widget::{month_height, DAY_WIDTH, MONTH_HEADER_LINES, MONTH_WIDTH, WEEK_LINES};
