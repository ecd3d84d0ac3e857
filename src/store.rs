use log;

use crate::event::{generate_id, Event, EventDraft, EventId};

/// In-memory event collection. Drafts are trusted: validation happens before
/// anything reaches the store.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        EventStore { events }
    }

    pub fn add(&mut self, draft: EventDraft) -> EventId {
        let id = generate_id();
        log::debug!("Adding event '{}' as {}", draft.title, id);
        self.events.push(Event::from_draft(id.clone(), draft));
        id
    }

    /// Replaces the event with the same id. Unknown ids are ignored; the
    /// return value tells whether anything changed.
    pub fn update(&mut self, event: Event) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                log::debug!("Updating event {}", event.id);
                *slot = event;
                true
            }
            None => {
                log::debug!("Ignoring update of unknown event {}", event.id);
                false
            }
        }
    }

    pub fn remove(&mut self, id: &EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| &e.id != id);

        let removed = self.events.len() != before;
        if removed {
            log::debug!("Removed event {}", id);
        }
        removed
    }

    pub fn replace_all(&mut self, events: Vec<Event>) {
        log::debug!("Replacing {} events with {}", self.events.len(), events.len());
        self.events = events;
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventColor;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 18)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn add_assigns_fresh_ids() {
        let mut store = EventStore::new();
        let lunch = store.add(EventDraft::new("Lunch", at(12), at(13)).color(EventColor::Green));
        let dinner = store.add(EventDraft::new("Dinner", at(19), at(20)));

        assert_eq!(store.len(), 2);
        assert_ne!(lunch, dinner);
        assert!(!lunch.as_str().is_empty());
        assert_eq!(store.get(&lunch).unwrap().color, EventColor::Green);
        assert_eq!(store.events()[1].title, "Dinner");
    }

    #[test]
    fn update_replaces_matching_event() {
        let mut store = EventStore::new();
        let id = store.add(EventDraft::new("Lunch", at(12), at(13)));

        let mut changed = store.get(&id).unwrap().clone();
        changed.title = "Long lunch".to_owned();
        changed.end_date = at(14);

        assert!(store.update(changed.clone()));
        assert_eq!(store.get(&id), Some(&changed));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_of_unknown_id_changes_nothing() {
        let mut store = EventStore::new();
        store.add(EventDraft::new("Lunch", at(12), at(13)));
        let before = store.events().to_vec();

        let stranger = Event::from_draft(
            EventId::from("missing"),
            EventDraft::new("Ghost", at(1), at(2)),
        );

        assert!(!store.update(stranger));
        assert_eq!(store.events(), before.as_slice());
    }

    #[test]
    fn remove_is_silent_for_unknown_ids() {
        let mut store = EventStore::new();
        let id = store.add(EventDraft::new("Lunch", at(12), at(13)));

        assert!(!store.remove(&EventId::from("missing")));
        assert_eq!(store.len(), 1);
        assert!(store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_adopts_events_verbatim() {
        let mut store = EventStore::new();
        store.add(EventDraft::new("Old", at(8), at(9)));

        let seed = vec![
            Event::from_draft(EventId::from("1"), EventDraft::new("A", at(9), at(10))),
            Event::from_draft(EventId::from("2"), EventDraft::new("B", at(10), at(11))),
        ];
        store.replace_all(seed.clone());

        assert_eq!(store.events(), seed.as_slice());
        assert_eq!((&store).into_iter().count(), 2);
    }
}
