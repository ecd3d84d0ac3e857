use chrono::{Duration, NaiveDateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DATES_REQUIRED: &str = "Dates are required";
pub const END_NOT_AFTER_START: &str = "End date must be after start date";

const ID_SUFFIX_LEN: usize = 9;

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::new(id)
    }
}

/// Identifier unique within this process: wall clock millis, a sequence
/// number and a random suffix.
pub fn generate_id() -> EventId {
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let random = Uuid::new_v4().simple().to_string();

    EventId(format!(
        "event-{}-{:x}-{}",
        Utc::now().timestamp_millis(),
        seq,
        &random[..ID_SUFFIX_LEN]
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EventColor {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Red,
}

impl EventColor {
    pub const ALL: [EventColor; 6] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Purple,
        EventColor::Orange,
        EventColor::Pink,
        EventColor::Red,
    ];

    /// Unknown names map to `Blue`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "green" => EventColor::Green,
            "purple" => EventColor::Purple,
            "orange" => EventColor::Orange,
            "pink" => EventColor::Pink,
            "red" => EventColor::Red,
            _ => EventColor::Blue,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Purple => "purple",
            EventColor::Orange => "orange",
            EventColor::Pink => "pink",
            EventColor::Red => "red",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventColor::Blue => "Blue",
            EventColor::Green => "Green",
            EventColor::Purple => "Purple",
            EventColor::Orange => "Orange",
            EventColor::Pink => "Pink",
            EventColor::Red => "Red",
        }
    }
}

impl Default for EventColor {
    fn default() -> Self {
        EventColor::Blue
    }
}

impl From<&str> for EventColor {
    fn from(name: &str) -> Self {
        EventColor::from_name(name)
    }
}

impl From<String> for EventColor {
    fn from(name: String) -> Self {
        EventColor::from_name(&name)
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub color: EventColor,
    pub all_day: Option<bool>,
}

impl Event {
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Event {
            id,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            color: draft.color,
            all_day: draft.all_day,
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            color: self.color,
            all_day: self.all_day,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }
}

/// Event payload before it is admitted to a store and given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub color: EventColor,
    pub all_day: Option<bool>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        EventDraft {
            title: title.into(),
            description: None,
            start_date,
            end_date,
            color: EventColor::default(),
            all_day: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = Some(all_day);
        self
    }
}

/// Human readable reasons a draft was refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl error::Error for ValidationError {}

pub fn check(draft: &EventDraft) -> Result<(), ValidationError> {
    let mut error = ValidationError::default();

    if draft.title.trim().is_empty() {
        error.push(TITLE_REQUIRED);
    }
    if draft.start_date >= draft.end_date {
        error.push(END_NOT_AFTER_START);
    }

    error.into_result()
}

pub fn validate(draft: &EventDraft) -> bool {
    check(draft).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn validate_accepts_ordered_titled_draft() {
        assert!(validate(&EventDraft::new("Meeting", at(9, 0), at(10, 0))));
    }

    #[test]
    fn validate_rejects_blank_title() {
        let draft = EventDraft::new("  ", at(9, 0), at(10, 0));
        assert!(!validate(&draft));
        assert_eq!(check(&draft).unwrap_err().messages().to_vec(), vec![TITLE_REQUIRED]);
    }

    #[test]
    fn validate_rejects_empty_window() {
        assert!(!validate(&EventDraft::new("A", at(9, 0), at(9, 0))));
    }

    #[test]
    fn validate_rejects_reversed_window() {
        let draft = EventDraft::new("A", at(10, 0), at(9, 0));
        assert!(!validate(&draft));
        assert!(check(&draft).unwrap_err().contains(END_NOT_AFTER_START));
    }

    #[test]
    fn check_collects_every_message() {
        let err = check(&EventDraft::new("", at(10, 0), at(9, 0))).unwrap_err();
        assert_eq!(err.messages().len(), 2);
        assert_eq!(
            err.to_string(),
            "Title is required; End date must be after start date"
        );
    }

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let ids: HashSet<_> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.as_str().starts_with("event-")));
    }

    #[test]
    fn unknown_color_names_fall_back_to_blue() {
        assert_eq!(EventColor::from_name("Purple"), EventColor::Purple);
        assert_eq!(EventColor::from_name("teal"), EventColor::Blue);
        assert_eq!(EventColor::from(""), EventColor::Blue);
    }

    #[test]
    fn colors_have_names_and_labels() {
        let labels: Vec<_> = EventColor::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Blue", "Green", "Purple", "Orange", "Pink", "Red"]);
        assert_eq!(EventColor::Orange.name(), "orange");
    }

    #[test]
    fn draft_round_trips_through_event() {
        let draft = EventDraft::new("Lunch", at(12, 0), at(13, 0))
            .color(EventColor::Green)
            .description("with the team");
        let event = Event::from_draft(EventId::from("1"), draft.clone());

        assert_eq!(event.to_draft(), draft);
        assert_eq!(event.duration(), Duration::hours(1));
    }
}
