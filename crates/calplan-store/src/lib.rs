//! Event storage and the save flow.
//!
//! This crate holds calplan events:
//! - [`EventStore`], the CRUD seam the CLI talks to
//! - [`MemoryStore`], a resettable in-memory backend
//! - [`JsonFileStore`], which persists to `{"events": [...]}` on disk
//! - [`EventService`], which validates drafts and checks for overlaps before saving
//!
//! # Example
//!
//! ```rust
//! use calplan_core::EventDraft;
//! use calplan_store::{EventService, MemoryStore, SaveOutcome};
//!
//! let mut service = EventService::new(MemoryStore::new());
//! let draft = EventDraft::new("팀 회의", "2024-10-15", "09:00", "10:00");
//! let outcome = service.save(draft, None, false).unwrap();
//! assert!(matches!(outcome, SaveOutcome::Saved(_)));
//! ```

mod error;
mod file;
mod memory;
mod service;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::{EventStore, MemoryStore};
pub use service::{EventService, SaveOutcome};
