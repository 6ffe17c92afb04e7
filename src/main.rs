mod app;
mod help;
mod jumpto;
use crate::app::App;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use datepick::{
    calendar::StartWeekDay, format::parse_iso_date, DatePicker, PickerOptions, RangeDatePicker,
    SelectionMode, SingleDatePicker,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    single: bool,
    start: Option<Date>,
    end: Option<Date>,
    min: Option<Date>,
    max: Option<Date>,
    sunday: bool,
    locale: Option<String>,
    single_calendar: bool,
    highlight_today: bool,
    auto_close: bool,
}

impl RunArgs {
    fn into_picker(self, today: Date) -> DatePicker {
        let mode = if self.single {
            SelectionMode::Single
        } else {
            SelectionMode::Range
        };
        let mut options = PickerOptions::new()
            .start_date(self.start)
            .end_date(self.end)
            .min_date(self.min)
            .max_date(self.max)
            .single_calendar(self.single_calendar)
            .highlight_today(self.highlight_today)
            .hide_dialog_after_select_end_date(self.auto_close)
            .is_open(true);
        if self.sunday {
            options = options.start_week_day(StartWeekDay::Sunday);
        }
        if let Some(locale) = self.locale {
            options = options.locale(locale);
        }
        match mode {
            SelectionMode::Single => SingleDatePicker::new(options, today).into_inner(),
            SelectionMode::Range => RangeDatePicker::new(options, today).into_inner(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("single") => args.single = true,
                Arg::Long("start") => args.start = Some(parse_date(&mut parser)?),
                Arg::Long("end") => args.end = Some(parse_date(&mut parser)?),
                Arg::Long("min") => args.min = Some(parse_date(&mut parser)?),
                Arg::Long("max") => args.max = Some(parse_date(&mut parser)?),
                Arg::Long("sunday") => args.sunday = true,
                Arg::Long("locale") => args.locale = Some(parser.value()?.string()?),
                Arg::Long("single-calendar") => args.single_calendar = true,
                Arg::Long("highlight-today") => args.highlight_today = true,
                Arg::Long("auto-close") => args.auto_close = true,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let picker = args.into_picker(today);
                let (from, to) = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(picker)
                        .run(terminal)
                        .context("error while running picker")
                })?;
                println!("{} {}", show_date(from), show_date(to));
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [<options>]");
                println!();
                println!("Pick a date range (or a single date) in the terminal and print it");
                println!();
                println!("Options:");
                println!("  --single              Pick a single date instead of a range");
                println!("  --start YYYY-MM-DD    Initial start date");
                println!("  --end YYYY-MM-DD      Initial end date");
                println!("  --min YYYY-MM-DD      Earliest selectable date");
                println!("  --max YYYY-MM-DD      Latest selectable date");
                println!("  --sunday              Start weeks on Sunday");
                println!("  --locale ID           Language for month & weekday names");
                println!("  --single-calendar     Show one month at a time");
                println!("  --highlight-today     Mark today's date");
                println!("  --auto-close          Close the calendar once the end date is picked");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn parse_date(parser: &mut Parser) -> Result<Date, lexopt::Error> {
    let value = parser.value()?.string()?;
    parse_iso_date(&value).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

fn show_date(date: Option<Date>) -> String {
    date.map_or_else(|| String::from("-"), |d| d.to_string())
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::debug!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
