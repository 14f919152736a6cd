//! The event store trait and its in-memory backend.

use calplan_core::{Event, EventDraft};
use tracing::{debug, trace};

use crate::error::{StoreError, StoreResult};

/// CRUD over stored events.
///
/// Mutations take a draft that has already been validated; the store only
/// assigns ids and keeps the collection.
pub trait EventStore {
    /// All stored events in insertion order.
    fn events(&self) -> &[Event];

    /// Stores a new event and returns it with its assigned id.
    fn create(&mut self, draft: EventDraft) -> StoreResult<Event>;

    /// Replaces the fields of event `id`, keeping the id.
    fn update(&mut self, id: &str, draft: EventDraft) -> StoreResult<Event>;

    /// Removes event `id` and returns it.
    fn delete(&mut self, id: &str) -> StoreResult<Event>;

    /// Owned copy of all events.
    fn list(&self) -> Vec<Event> {
        self.events().to_vec()
    }

    /// Looks up a single event.
    fn get(&self, id: &str) -> Option<&Event> {
        self.events().iter().find(|e| e.id == id)
    }
}

/// Events held in a `Vec`, lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
    seed: Vec<Event>,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `seed`. [`reset`](Self::reset) returns to it.
    pub fn with_seed(seed: Vec<Event>) -> Self {
        let next_id = next_id_after(&seed);
        debug!(count = seed.len(), next_id, "Seeded memory store");
        Self {
            events: seed.clone(),
            seed,
            next_id,
        }
    }

    /// Drops all changes and restores the seed events.
    pub fn reset(&mut self) {
        self.events = self.seed.clone();
        self.next_id = next_id_after(&self.seed);
        debug!(count = self.events.len(), "Memory store reset to seed");
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: &str) -> StoreResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id.to_string()
    }
}

impl EventStore for MemoryStore {
    fn events(&self) -> &[Event] {
        &self.events
    }

    fn create(&mut self, draft: EventDraft) -> StoreResult<Event> {
        let event = draft.into_event(self.allocate_id());
        debug!(id = %event.id, title = %event.title, "Created event");
        self.events.push(event.clone());
        Ok(event)
    }

    fn update(&mut self, id: &str, draft: EventDraft) -> StoreResult<Event> {
        let index = self.position(id)?;
        let event = draft.into_event(id);
        trace!(id, title = %event.title, "Updated event");
        self.events[index] = event.clone();
        Ok(event)
    }

    fn delete(&mut self, id: &str) -> StoreResult<Event> {
        let index = self.position(id)?;
        let event = self.events.remove(index);
        debug!(id, title = %event.title, "Deleted event");
        Ok(event)
    }
}

/// One past the largest numeric id in `events`, or 1 when there is none.
///
/// Ids that are not plain integers are ignored.
pub(crate) fn next_id_after(events: &[Event]) -> u64 {
    events
        .iter()
        .filter_map(|e| e.id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> EventDraft {
        EventDraft::new(title, "2024-10-15", "09:00", "10:00")
    }

    fn seeded() -> MemoryStore {
        MemoryStore::with_seed(vec![
            Event::new("1", "기존 회의", "2024-10-15", "09:00", "10:00"),
            Event::new("2", "점심", "2024-10-15", "12:00", "13:00"),
        ])
    }

    mod ids {
        use super::*;

        #[test]
        fn empty_store_starts_at_one() {
            let mut store = MemoryStore::new();
            assert_eq!(store.create(draft("a")).unwrap().id, "1");
            assert_eq!(store.create(draft("b")).unwrap().id, "2");
        }

        #[test]
        fn continues_after_seed() {
            let mut store = seeded();
            assert_eq!(store.create(draft("new")).unwrap().id, "3");
        }

        #[test]
        fn not_reused_after_delete() {
            let mut store = seeded();
            let created = store.create(draft("new")).unwrap();
            store.delete(&created.id).unwrap();
            assert_eq!(store.create(draft("again")).unwrap().id, "4");
        }

        #[test]
        fn non_numeric_ids_are_ignored() {
            let events = vec![
                Event::new("abc", "x", "2024-10-15", "09:00", "10:00"),
                Event::new("7", "y", "2024-10-15", "09:00", "10:00"),
            ];
            assert_eq!(next_id_after(&events), 8);
            assert_eq!(next_id_after(&[]), 1);
        }
    }

    mod crud {
        use super::*;

        #[test]
        fn create_appends() {
            let mut store = seeded();
            let event = store.create(draft("new").with_location("회의실 B")).unwrap();
            assert_eq!(store.len(), 3);
            assert_eq!(store.events().last(), Some(&event));
            assert_eq!(event.location, "회의실 B");
        }

        #[test]
        fn update_keeps_id_and_position() {
            let mut store = seeded();
            let updated = store
                .update("1", EventDraft::new("수정된 회의", "2024-10-16", "14:00", "15:00"))
                .unwrap();
            assert_eq!(updated.id, "1");
            assert_eq!(store.events()[0].title, "수정된 회의");
            assert_eq!(store.get("1").map(|e| e.date.as_str()), Some("2024-10-16"));
        }

        #[test]
        fn update_missing_is_not_found() {
            let mut store = seeded();
            let err = store.update("99", draft("x")).unwrap_err();
            assert!(err.is_not_found());
            assert_eq!(store.len(), 2);
        }

        #[test]
        fn delete_removes() {
            let mut store = seeded();
            let removed = store.delete("1").unwrap();
            assert_eq!(removed.title, "기존 회의");
            assert!(store.get("1").is_none());
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn delete_missing_is_not_found() {
            let mut store = MemoryStore::new();
            assert!(store.delete("1").unwrap_err().is_not_found());
        }

        #[test]
        fn list_is_an_owned_copy() {
            let store = seeded();
            let mut events = store.list();
            events.clear();
            assert_eq!(store.len(), 2);
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn restores_seed() {
            let mut store = seeded();
            store.create(draft("new")).unwrap();
            store.delete("1").unwrap();

            store.reset();

            let ids: Vec<&str> = store.events().iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2"]);
            assert_eq!(store.create(draft("after")).unwrap().id, "3");
        }

        #[test]
        fn empty_store_resets_to_empty() {
            let mut store = MemoryStore::new();
            store.create(draft("a")).unwrap();
            store.reset();
            assert!(store.is_empty());
        }
    }
}
