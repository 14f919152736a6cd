//! Save flow over an [`EventStore`]: validate, check conflicts, persist.

use calplan_core::{Event, EventDraft, ViewMode, find_overlapping_events, get_filtered_events};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::memory::EventStore;

/// Result of [`EventService::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The event was written.
    Saved(Event),
    /// Nothing was written; these stored events overlap the draft.
    Conflict(Vec<Event>),
}

impl SaveOutcome {
    /// Returns true if the event was written.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Event operations on top of a store.
#[derive(Debug)]
pub struct EventService<S> {
    store: S,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All stored events.
    pub fn list(&self) -> &[Event] {
        self.store.events()
    }

    /// Stored events that `draft` would overlap, ignoring the event being edited.
    pub fn conflicts(&self, draft: &EventDraft, editing_id: Option<&str>) -> Vec<Event> {
        let existing = self.store.events();
        let hits = match editing_id {
            Some(id) => find_overlapping_events(&draft.clone().into_event(id), existing),
            None => find_overlapping_events(draft, existing),
        };
        hits.into_iter().cloned().collect()
    }

    /// Saves `draft` as a new event, or over `editing_id` when given.
    ///
    /// Validation failures are errors. Overlaps with other stored events
    /// come back as [`SaveOutcome::Conflict`] unless `force` is set.
    pub fn save(
        &mut self,
        draft: EventDraft,
        editing_id: Option<&str>,
        force: bool,
    ) -> StoreResult<SaveOutcome> {
        draft.validate()?;

        if let Some(id) = editing_id {
            if self.store.get(id).is_none() {
                return Err(StoreError::not_found(id));
            }
        }

        let conflicts = self.conflicts(&draft, editing_id);
        if !conflicts.is_empty() {
            if !force {
                debug!(
                    title = %draft.title,
                    count = conflicts.len(),
                    "Save blocked by overlapping events"
                );
                return Ok(SaveOutcome::Conflict(conflicts));
            }
            info!(
                title = %draft.title,
                count = conflicts.len(),
                "Saving despite overlapping events"
            );
        }

        let event = match editing_id {
            Some(id) => self.store.update(id, draft)?,
            None => self.store.create(draft)?,
        };
        Ok(SaveOutcome::Saved(event))
    }

    /// Removes event `id`.
    pub fn delete(&mut self, id: &str) -> StoreResult<Event> {
        self.store.delete(id)
    }

    /// Events matching `search` inside the `view` window around `reference`.
    pub fn filtered(&self, search: &str, reference: NaiveDate, view: ViewMode) -> Vec<&Event> {
        get_filtered_events(self.store.events(), search, reference, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use calplan_core::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> EventService<MemoryStore> {
        EventService::new(MemoryStore::with_seed(vec![
            Event::new("1", "기존 회의", "2024-10-15", "09:00", "10:00")
                .with_description("주간 팀 미팅"),
            Event::new("2", "점심 약속", "2024-10-15", "12:00", "13:00"),
            Event::new("3", "다음 달 일정", "2024-11-01", "09:00", "10:00"),
        ]))
    }

    mod validation {
        use super::*;

        #[test]
        fn missing_fields_are_rejected() {
            let mut svc = service();
            let err = svc
                .save(EventDraft::new("", "2024-10-16", "09:00", "10:00"), None, false)
                .unwrap_err();

            assert_eq!(err.to_string(), "필수 정보를 모두 입력해주세요.");
            match err {
                StoreError::Validation(ValidationError::MissingRequired { fields }) => {
                    assert_eq!(fields, vec!["title"]);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(svc.list().len(), 3);
        }

        #[test]
        fn end_before_start_is_rejected() {
            let mut svc = service();
            let err = svc
                .save(EventDraft::new("역순", "2024-10-16", "11:00", "10:00"), None, true)
                .unwrap_err();

            assert_eq!(err.to_string(), "시간 설정을 확인해주세요.");
            assert_eq!(svc.list().len(), 3);
        }
    }

    mod conflicts {
        use super::*;

        #[test]
        fn overlap_blocks_save() {
            let mut svc = service();
            let outcome = svc
                .save(EventDraft::new("새 회의", "2024-10-15", "09:30", "10:30"), None, false)
                .unwrap();

            match outcome {
                SaveOutcome::Conflict(events) => {
                    assert_eq!(events.len(), 1);
                    assert_eq!(events[0].id, "1");
                }
                SaveOutcome::Saved(_) => panic!("expected a conflict"),
            }
            assert_eq!(svc.list().len(), 3);
        }

        #[test]
        fn force_saves_anyway() {
            let mut svc = service();
            let outcome = svc
                .save(EventDraft::new("새 회의", "2024-10-15", "09:30", "12:30"), None, true)
                .unwrap();

            assert!(outcome.is_saved());
            assert_eq!(svc.list().len(), 4);
        }

        #[test]
        fn touching_events_do_not_conflict() {
            let mut svc = service();
            let outcome = svc
                .save(EventDraft::new("연속 회의", "2024-10-15", "10:00", "12:00"), None, false)
                .unwrap();

            assert!(outcome.is_saved());
        }

        #[test]
        fn editing_ignores_own_stored_copy() {
            let mut svc = service();
            let outcome = svc
                .save(
                    EventDraft::new("기존 회의", "2024-10-15", "09:00", "10:30"),
                    Some("1"),
                    false,
                )
                .unwrap();

            match outcome {
                SaveOutcome::Saved(event) => {
                    assert_eq!(event.id, "1");
                    assert_eq!(event.end_time, "10:30");
                }
                SaveOutcome::Conflict(events) => panic!("unexpected conflict: {events:?}"),
            }
            assert_eq!(svc.list().len(), 3);
        }

        #[test]
        fn editing_still_conflicts_with_others() {
            let mut svc = service();
            let outcome = svc
                .save(
                    EventDraft::new("기존 회의", "2024-10-15", "09:00", "12:30"),
                    Some("1"),
                    false,
                )
                .unwrap();

            assert_eq!(
                outcome,
                SaveOutcome::Conflict(vec![svc.store().get("2").unwrap().clone()])
            );
        }

        #[test]
        fn editing_unknown_id_is_not_found() {
            let mut svc = service();
            let err = svc
                .save(EventDraft::new("x", "2024-12-01", "09:00", "10:00"), Some("99"), false)
                .unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn filtered_applies_search_and_view() {
            let svc = service();

            let month: Vec<&str> = svc
                .filtered("", date(2024, 10, 1), ViewMode::Month)
                .iter()
                .map(|e| e.id.as_str())
                .collect();
            assert_eq!(month, vec!["1", "2"]);

            let searched: Vec<&str> = svc
                .filtered("팀 미팅", date(2024, 10, 15), ViewMode::Week)
                .iter()
                .map(|e| e.id.as_str())
                .collect();
            assert_eq!(searched, vec!["1"]);
        }

        #[test]
        fn delete_passes_through() {
            let mut svc = service();
            assert_eq!(svc.delete("3").unwrap().title, "다음 달 일정");
            assert!(svc.delete("3").unwrap_err().is_not_found());
            assert_eq!(svc.list().len(), 2);
        }
    }
}
