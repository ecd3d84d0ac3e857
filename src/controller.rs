use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::agenda;
use crate::cmds::Cmd;
use crate::config::Config;
use crate::datetime::{self, CalendarDay, Clock};
use crate::event::{self, Event, EventDraft, EventId, ValidationError};
use crate::form::EventForm;
use crate::navigation::{NavigationState, ViewMode};
use crate::store::EventStore;

/// Host callbacks after a mutation went through. Return values are not consumed.
pub trait CalendarListener {
    fn on_create(&mut self, _event: &Event) {}
    fn on_update(&mut self, _event: &Event) {}
    fn on_delete(&mut self, _id: &EventId) {}
}

pub struct NoopListener;

impl CalendarListener for NoopListener {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefill {
    Today,
    Date(NaiveDate),
    Slot(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    Closed,
    Creating(Prefill),
    Editing(Event),
}

impl Editor {
    pub fn is_open(&self) -> bool {
        !matches!(self, Editor::Closed)
    }
}

pub struct CalendarController {
    navigation: NavigationState,
    store: EventStore,
    editor: Editor,
    clock: Box<dyn Clock>,
    listener: Box<dyn CalendarListener>,
}

impl CalendarController {
    pub fn new(store: EventStore, navigation: NavigationState, clock: Box<dyn Clock>) -> Self {
        CalendarController {
            navigation,
            store,
            editor: Editor::Closed,
            clock,
            listener: Box::new(NoopListener),
        }
    }

    pub fn from_config(config: &Config, clock: Box<dyn Clock>) -> Self {
        let reference = config.date.unwrap_or_else(|| clock.today());
        let navigation = NavigationState::new(reference, config.view);
        let store = EventStore::from_events(config.seed_events());

        CalendarController::new(store, navigation, clock)
    }

    pub fn with_listener(mut self, listener: Box<dyn CalendarListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn send_cmd(&mut self, cmd: Cmd) {
        self.navigation.apply(cmd, self.clock.as_ref());
    }

    pub fn next(&mut self) {
        self.send_cmd(Cmd::Next);
    }

    pub fn previous(&mut self) {
        self.send_cmd(Cmd::Previous);
    }

    pub fn today(&mut self) {
        self.send_cmd(Cmd::Today);
    }

    pub fn change_view(&mut self, view_mode: ViewMode) {
        self.send_cmd(Cmd::ChangeView(view_mode));
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.send_cmd(Cmd::SelectDate(date));
    }

    /// Month grid or the current week, flagged against the clock's today.
    pub fn visible_days(&self) -> Vec<CalendarDay> {
        let reference = self.navigation.reference_date();
        let today = self.clock.today();

        match self.navigation.view_mode() {
            ViewMode::Month => datetime::month_grid(reference, today),
            ViewMode::Week => datetime::week_days(reference)
                .into_iter()
                .map(|date| CalendarDay::new(date, reference, today))
                .collect(),
        }
    }

    pub fn events_for_day(&self, date: NaiveDate) -> Vec<&Event> {
        agenda::sorted_by_start_time(agenda::events_on_day(&self.store, date))
    }

    /// Events listed in a month cell and how many more it holds.
    pub fn cell_events(&self, day: &CalendarDay) -> (Vec<&Event>, usize) {
        agenda::cell_events(&self.store, day)
    }

    pub fn slot_events(&self, date: NaiveDate, hour: u32) -> Vec<&Event> {
        agenda::slot_events(&self.store, date, hour)
    }

    pub fn title(&self) -> String {
        let reference = self.navigation.reference_date();
        match self.navigation.view_mode() {
            ViewMode::Month => format!("{} {}", datetime::month_name(reference), reference.year()),
            ViewMode::Week => format!(
                "Week of {}",
                datetime::format_date(reference, "%b %-d, %Y")
            ),
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.navigation.selected_date() == Some(date)
    }

    pub fn add(&mut self, draft: EventDraft) -> Result<EventId, ValidationError> {
        event::check(&draft)?;
        let id = self.store.add(draft);
        if let Some(created) = self.store.get(&id) {
            self.listener.on_create(created);
        }
        Ok(id)
    }

    /// `Ok(false)` when no event carries `event.id`.
    pub fn update(&mut self, event: Event) -> Result<bool, ValidationError> {
        event::check(&event.to_draft())?;
        let updated = self.store.update(event.clone());
        if updated {
            self.listener.on_update(&event);
        }
        Ok(updated)
    }

    pub fn remove(&mut self, id: &EventId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.listener.on_delete(id);
        }
        removed
    }

    /// Selects `date` and opens the editor for a new event on it. Month view
    /// ignores days outside the shown month.
    pub fn click_date(&mut self, date: NaiveDate) -> bool {
        let reference = self.navigation.reference_date();
        if self.navigation.view_mode() == ViewMode::Month
            && !CalendarDay::new(date, reference, self.clock.today()).is_current_month
        {
            log::debug!("Ignoring click on {} outside {}", date, self.title());
            return false;
        }

        self.select_date(date);
        self.editor = Editor::Creating(Prefill::Date(date));
        true
    }

    pub fn click_event(&mut self, id: &EventId) -> bool {
        match self.store.get(id) {
            Some(event) => {
                self.editor = Editor::Editing(event.clone());
                true
            }
            None => false,
        }
    }

    pub fn click_time_slot(&mut self, date: NaiveDate, hour: u32) {
        let start = date.and_time(NaiveTime::MIN) + Duration::hours(hour.min(23) as i64);
        self.editor = Editor::Creating(Prefill::Slot(start));
    }

    pub fn open_new(&mut self) {
        self.editor = Editor::Creating(Prefill::Today);
    }

    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Form contents for the open editor.
    pub fn form(&self) -> Option<EventForm> {
        match &self.editor {
            Editor::Closed => None,
            Editor::Creating(Prefill::Today) => Some(EventForm::for_today(self.clock.as_ref())),
            Editor::Creating(Prefill::Date(date)) => Some(EventForm::for_date(*date)),
            Editor::Creating(Prefill::Slot(start)) => Some(EventForm::for_slot(*start)),
            Editor::Editing(event) => Some(EventForm::for_event(event)),
        }
    }

    /// Adds or updates depending on the editor, then closes it. On validation
    /// failure the editor stays open. `Ok(None)` when the edited event is gone
    /// from the store.
    pub fn submit(&mut self, form: &EventForm) -> Result<Option<EventId>, ValidationError> {
        let draft = form.submit()?;

        match std::mem::replace(&mut self.editor, Editor::Closed) {
            Editor::Editing(original) => {
                let id = original.id.clone();
                let updated = self.update(Event::from_draft(id.clone(), draft))?;
                Ok(Some(id).filter(|_| updated))
            }
            Editor::Creating(_) | Editor::Closed => self.add(draft).map(Some),
        }
    }

    /// Deletes the event being edited.
    pub fn delete(&mut self) -> Option<EventId> {
        match &self.editor {
            Editor::Editing(event) => {
                let id = event.id.clone();
                self.editor = Editor::Closed;
                self.remove(&id);
                Some(id)
            }
            _ => None,
        }
    }
}
