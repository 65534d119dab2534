mod app;
mod calendar;
mod events;
mod form;
mod help;
mod logging;
mod theme;
use crate::app::App;
use crate::calendar::{CalendarDate, HebrewDate};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum System {
    #[default]
    Gregorian,
    Hebrew,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        system: System,
        log_file: Option<PathBuf>,
        verbosity: u8,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut system = System::default();
        let mut log_file = None;
        let mut verbosity = 0u8;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('H') | Arg::Long("hebrew") => system = System::Hebrew,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('v') | Arg::Long("verbose") => verbosity = verbosity.saturating_add(1),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            system,
            log_file,
            verbosity,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                system,
                log_file,
                verbosity,
            } => {
                if let Some(path) = log_file {
                    logging::init(verbosity, &path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = date.unwrap_or(today);
                tracing::info!(%today, %start, ?system, "starting");
                match system {
                    System::Gregorian => run_calendar::<Date>(today, start),
                    System::Hebrew => run_calendar::<HebrewDate>(today, start),
                }
            }
            Command::Help => {
                println!("Usage: datebook [-H|--hebrew] [--log-file PATH] [-v] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar with per-day events");
                println!();
                println!("Options:");
                println!("  -H, --hebrew      Show the Hebrew calendar");
                println!("  --log-file PATH   Append diagnostic logs to PATH");
                println!("  -v, --verbose     Log more (may be repeated)");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn run_calendar<D: CalendarDate>(today: Date, start: Date) -> anyhow::Result<()> {
    let today = D::from_civil(today).context("today's date cannot be shown")?;
    let start = D::from_civil(start).context("start date cannot be shown")?;
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(today, start).run(&mut terminal)?;
        Ok(())
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
