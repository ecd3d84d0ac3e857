use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::datetime::{self, Clock, DATE_FORMAT, TIME_FORMAT};
use crate::error::{Error, ErrorKind, Result};
use crate::event::{self, Event, EventColor, EventDraft, ValidationError};

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "10:00";

/// Raw field values of the create/edit form, as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub color: EventColor,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            title: String::new(),
            description: String::new(),
            start_date: String::new(),
            start_time: DEFAULT_START_TIME.to_owned(),
            end_date: String::new(),
            end_time: DEFAULT_END_TIME.to_owned(),
            color: EventColor::default(),
        }
    }
}

type FieldSetter = fn(&mut EventForm, &str);

const FIELDS: &[(&str, FieldSetter)] = &[
    ("title", |f, v| f.title = v.to_owned()),
    ("description", |f, v| f.description = v.to_owned()),
    ("start_date", |f, v| f.start_date = v.to_owned()),
    ("start_time", |f, v| f.start_time = v.to_owned()),
    ("end_date", |f, v| f.end_date = v.to_owned()),
    ("end_time", |f, v| f.end_time = v.to_owned()),
    ("color", |f, v| f.color = EventColor::from_name(v)),
];

impl EventForm {
    pub fn for_event(event: &Event) -> Self {
        EventForm {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start_date: event.start_date.format(DATE_FORMAT).to_string(),
            start_time: event.start_date.format(TIME_FORMAT).to_string(),
            end_date: event.end_date.format(DATE_FORMAT).to_string(),
            end_time: event.end_date.format(TIME_FORMAT).to_string(),
            color: event.color,
        }
    }

    /// Both dates set to `date`, default times.
    pub fn for_date(date: NaiveDate) -> Self {
        let date = date.format(DATE_FORMAT).to_string();
        EventForm {
            start_date: date.clone(),
            end_date: date,
            ..EventForm::default()
        }
    }

    /// One hour starting at `start`.
    pub fn for_slot(start: NaiveDateTime) -> Self {
        let end = start + Duration::hours(1);
        EventForm {
            start_date: start.format(DATE_FORMAT).to_string(),
            start_time: start.format(TIME_FORMAT).to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
            end_time: end.format(TIME_FORMAT).to_string(),
            ..EventForm::default()
        }
    }

    pub fn for_today(clock: &dyn Clock) -> Self {
        EventForm::for_date(clock.today())
    }

    /// Sets a field by name, e.g. from a `key=value` argument.
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let (_, setter) = FIELDS
            .iter()
            .find(|(name, _)| *name == field.trim())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CommandParse,
                    &format!("Unknown event field '{}'", field),
                )
            })?;
        setter(self, value);
        Ok(())
    }

    pub fn with(mut self, field: &str, value: &str) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn submit(&self) -> std::result::Result<EventDraft, ValidationError> {
        let mut errors = ValidationError::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(event::TITLE_REQUIRED);
        }

        let window = if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            errors.push(event::DATES_REQUIRED);
            None
        } else {
            match (
                parse_date_time(&self.start_date, &self.start_time),
                parse_date_time(&self.end_date, &self.end_time),
            ) {
                (Ok(start), Ok(end)) => {
                    if start >= end {
                        errors.push(event::END_NOT_AFTER_START);
                    }
                    Some((start, end))
                }
                (start, end) => {
                    for err in start.err().into_iter().chain(end.err()) {
                        errors.push(err.to_string());
                    }
                    None
                }
            }
        };

        let (start, end) = match window {
            Some(window) if errors.is_empty() => window,
            _ => return Err(errors),
        };

        let description = self.description.trim();
        let mut draft = EventDraft::new(title, start, end).color(self.color);
        if !description.is_empty() {
            draft = draft.description(description);
        }
        event::check(&draft)?;
        Ok(draft)
    }
}

fn parse_date_time(date: &str, time: &str) -> Result<NaiveDateTime> {
    datetime::parse_time(time, datetime::parse_date(date)?)
}
