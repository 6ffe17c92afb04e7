mod desktop;
mod mobile;
pub use self::desktop::{MonthWindow, PageDirection, PageError, SLIDE_DURATION};
pub use self::mobile::{MonthFeed, MONTH_SPACING, UNBOUNDED_FEED_MONTHS};
