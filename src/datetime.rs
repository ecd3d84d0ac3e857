use chrono::{
    Datelike, Duration, Local, Month, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday,
};
use derive_more::Constructor;
use num_traits::FromPrimitive;

use crate::error::{Error, ErrorKind, Result};

/// Six full weeks, enough to hold any month starting on any weekday.
pub const GRID_CELLS: usize = 42;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, Constructor)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, reference: NaiveDate, today: NaiveDate) -> Self {
        CalendarDay {
            date,
            is_current_month: date.year() == reference.year() && date.month() == reference.month(),
            is_today: date == today,
            is_weekend: is_weekend(date),
        }
    }

    pub fn day_num(&self) -> u32 {
        self.date.day()
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn days_of_month(month: Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// The 42 days shown for the month of `reference`, starting at the Sunday on
/// or before the first of the month.
pub fn month_grid(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarDay> {
    let grid_start = start_of_week(first_of_month(reference));

    (0..GRID_CELLS as i64)
        .map(|offset| CalendarDay::new(grid_start + Duration::days(offset), reference, today))
        .collect()
}

pub fn week_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let week_start = start_of_week(reference);
    (0..7).map(|offset| week_start + Duration::days(offset)).collect()
}

pub fn hourly_labels() -> Vec<String> {
    (0..24).map(|hour| format!("{:02}:00", hour)).collect()
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    date.checked_add_signed(Duration::weeks(1)).unwrap_or(date)
}

pub fn previous_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::weeks(1)).unwrap_or(date)
}

pub fn start_of_day(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.date().and_time(NaiveTime::MIN)
}

/// Midnight of the clock's current date.
pub fn today(clock: &dyn Clock) -> NaiveDateTime {
    start_of_day(clock.now())
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        Error::new(
            ErrorKind::DateParse,
            &format!("'{}' is not a yyyy-mm-dd date ({})", s, e),
        )
    })
}

/// Parses an `HH:mm` time and places it on `base`.
pub fn parse_time(s: &str, base: NaiveDate) -> Result<NaiveDateTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map(|time| base.and_time(time))
        .map_err(|e| {
            Error::new(
                ErrorKind::TimeParse,
                &format!("'{}' is not an HH:mm time ({})", s, e),
            )
        })
}

pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

pub fn month_name(date: NaiveDate) -> &'static str {
    Month::from_u32(date.month()).map_or("", |month| month.name())
}
