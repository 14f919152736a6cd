//! Conflict detection between events.
//!
//! Two events conflict when their half-open `[start, end)` ranges intersect.
//! Events whose date or times do not parse never conflict with anything.

use tracing::trace;

use crate::event::{Event, Scheduled};
use crate::time::convert_event_to_date_range;

/// Returns true if the two events' time ranges intersect.
pub fn is_overlapping<A, B>(a: &A, b: &B) -> bool
where
    A: Scheduled + ?Sized,
    B: Scheduled + ?Sized,
{
    convert_event_to_date_range(a).overlaps(&convert_event_to_date_range(b))
}

/// Returns every event in `existing` that overlaps `candidate`.
///
/// An existing event with the candidate's own id is skipped, so an event
/// being edited never conflicts with its stored copy. Input order is kept.
pub fn find_overlapping_events<'a, C>(candidate: &C, existing: &'a [Event]) -> Vec<&'a Event>
where
    C: Scheduled + ?Sized,
{
    let range = convert_event_to_date_range(candidate);
    if !range.is_valid() {
        return Vec::new();
    }

    let own_id = candidate.event_id();
    existing
        .iter()
        .filter(|event| own_id.is_none_or(|id| id != event.id))
        .filter(|event| {
            let hit = range.overlaps(&convert_event_to_date_range(*event));
            if hit {
                trace!(id = %event.id, title = %event.title, "Overlapping event");
            }
            hit
        })
        .collect()
}
