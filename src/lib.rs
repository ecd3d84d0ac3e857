pub mod agenda;
pub mod cmds;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod error;
pub mod event;
pub mod form;
pub mod navigation;
pub mod store;

pub use controller::{CalendarController, CalendarListener, Editor, Prefill};
pub use datetime::{CalendarDay, Clock, FixedClock, SystemClock};
pub use event::{Event, EventColor, EventDraft, EventId, ValidationError};
pub use navigation::{NavigationState, ViewMode};
pub use store::EventStore;
