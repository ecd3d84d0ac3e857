extern crate calgrid as lib;

use chrono::NaiveDate;
use flexi_logger::{FileSpec, Logger};
use itertools::Itertools;
use lib::cmds::Cmd;
use lib::controller::{CalendarController, CalendarListener};
use lib::datetime::{self, CalendarDay, SystemClock};
use lib::error::{Error, ErrorKind};
use lib::event::{Event, EventId};
use lib::navigation::ViewMode;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "cg", about = "calgrid - month and week calendar views.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(short = "v", long = "view", help = "view to start in (month|week)")]
    pub view: Option<ViewMode>,

    #[structopt(
        short = "d",
        long = "date",
        help = "date to start at (yyyy-mm-dd)",
        parse(try_from_str = datetime::parse_date)
    )]
    pub date: Option<NaiveDate>,

    #[structopt(
        short = "n",
        long = "new",
        number_of_values = 1,
        help = "field=value of an event to create, e.g. -n title=Lunch -n start_time=12:00"
    )]
    pub new: Vec<String>,

    #[structopt(help = "navigation: next, prev, today, month, week, select:yyyy-mm-dd")]
    pub commands: Vec<Cmd>,
}

struct LogListener;

impl CalendarListener for LogListener {
    fn on_create(&mut self, event: &Event) {
        log::info!("Created: {} '{}'", event.id, event.title);
    }

    fn on_update(&mut self, event: &Event) {
        log::info!("Updated: {} '{}'", event.id, event.title);
    }

    fn on_delete(&mut self, id: &EventId) {
        log::info!("Deleted: {}", id);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        eprintln!("calgrid ran into a fatal error!");
        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    if let Some(view) = args.view {
        config.view = view;
    }
    if let Some(date) = args.date {
        config.date = Some(date);
    }

    let mut calendar = CalendarController::from_config(&config, Box::new(SystemClock))
        .with_listener(Box::new(LogListener));

    for cmd in args.commands {
        calendar.send_cmd(cmd);
    }

    if !args.new.is_empty() {
        create_event(&mut calendar, &args.new)?;
    }

    println!("{}", calendar.title());
    match calendar.navigation().view_mode() {
        ViewMode::Month => print_month(&calendar),
        ViewMode::Week => print_week(&calendar),
    }

    Ok(())
}

fn create_event(calendar: &mut CalendarController, fields: &[String]) -> Result<(), Error> {
    match calendar.navigation().selected_date() {
        Some(date) => {
            if !calendar.click_date(date) {
                return Err(Error::new(
                    ErrorKind::InvalidEvent,
                    &format!("{} is not part of {}", date, calendar.title()),
                ));
            }
        }
        None => calendar.open_new(),
    }

    let mut form = calendar.form().unwrap_or_default();
    for pair in fields {
        let (field, value) = pair.split_once('=').ok_or_else(|| {
            Error::new(
                ErrorKind::CommandParse,
                &format!("expected field=value, got '{}'", pair),
            )
        })?;
        form.set(field, value)?;
    }

    let submitted = calendar.submit(&form);
    calendar.close_editor();
    if let Some(id) = submitted? {
        println!("Created {}", id);
    }

    Ok(())
}

fn day_cell(calendar: &CalendarController, day: &CalendarDay) -> String {
    let marker = if day.is_today {
        '*'
    } else if calendar.is_selected(day.date) {
        '>'
    } else if !calendar.cell_events(day).0.is_empty() {
        '+'
    } else {
        ' '
    };

    if day.is_current_month {
        format!("{:>2}{}", day.day_num(), marker)
    } else {
        format!("{:>2}{}", "..", marker)
    }
}

fn print_event_line(event: &Event) {
    println!(
        "    {}-{} {} [{}]",
        event.start_date.format(datetime::TIME_FORMAT),
        event.end_date.format(datetime::TIME_FORMAT),
        event.title,
        event.color.label()
    );
}

fn print_month(calendar: &CalendarController) {
    let days = calendar.visible_days();

    println!("{}", ["Su ", "Mo ", "Tu ", "We ", "Th ", "Fr ", "Sa "].iter().join(" "));
    for week in days.chunks(7) {
        println!("{}", week.iter().map(|day| day_cell(calendar, day)).join(" "));
    }

    for day in &days {
        let (events, hidden) = calendar.cell_events(day);
        if events.is_empty() {
            continue;
        }
        println!("{}", datetime::format_date(day.date, "%a %b %-d"));
        events.into_iter().for_each(print_event_line);
        if hidden > 0 {
            println!("    +{} more", hidden);
        }
    }
}

fn print_week(calendar: &CalendarController) {
    let labels = datetime::hourly_labels();

    for day in calendar.visible_days() {
        println!("{}", datetime::format_date(day.date, "%a %b %-d"));

        for (hour, label) in labels.iter().enumerate() {
            let events = calendar.slot_events(day.date, hour as u32);
            if !events.is_empty() {
                println!(
                    "  {} {}",
                    label,
                    events.iter().map(|e| e.title.as_str()).join(", ")
                );
            }
        }
    }
}
