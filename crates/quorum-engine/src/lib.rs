//! # quorum-engine
//!
//! Availability intersection for group scheduling: given per-participant
//! free slots normalized to UTC, compute the maximal windows during which
//! at least quorum-many participants are simultaneously free, filtered by
//! the event's required duration.
//!
//! The engine is a pure function over an immutable snapshot: no storage,
//! no I/O, no shared state. Collection of slots, persistence, reminders,
//! and display-timezone rendering all live with the caller; this crate
//! answers exactly one question: *when can enough of these people meet?*
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use chrono::{TimeZone, Utc};
//! use quorum_engine::{compute, AvailabilitySlot, Event, MergePolicy};
//!
//! let event = Event {
//!     event_id: "session-3".to_string(),
//!     required_duration_minutes: 30,
//!     participants: BTreeSet::from(["p1".to_string(), "p2".to_string(), "p3".to_string()]),
//!     slots: vec![
//!         AvailabilitySlot::new("p1", Utc.with_ymd_and_hms(2026, 2, 16, 10, 0, 0).unwrap(),
//!                                     Utc.with_ymd_and_hms(2026, 2, 16, 14, 0, 0).unwrap()),
//!         AvailabilitySlot::new("p2", Utc.with_ymd_and_hms(2026, 2, 16, 11, 0, 0).unwrap(),
//!                                     Utc.with_ymd_and_hms(2026, 2, 16, 15, 0, 0).unwrap()),
//!         AvailabilitySlot::new("p3", Utc.with_ymd_and_hms(2026, 2, 16, 12, 0, 0).unwrap(),
//!                                     Utc.with_ymd_and_hms(2026, 2, 16, 13, 0, 0).unwrap()),
//!     ],
//! };
//!
//! let windows = compute(&event, 3, MergePolicy::Separate).unwrap();
//! assert_eq!(windows.len(), 1);
//! assert_eq!(windows[0].participants.len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`intersect`] — the sweep-line quorum intersection (`compute`)
//! - [`slot`] — `AvailabilitySlot` and `Event` input model
//! - [`window`] — `CommonWindow` output model and the dip `MergePolicy`
//! - [`normalize`] — wall-clock slots + IANA timezone → UTC slots
//! - [`recurring`] — weekly patterns projected onto concrete dates
//! - [`error`] — error types

pub mod error;
pub mod intersect;
pub mod normalize;
pub mod recurring;
pub mod slot;
pub mod window;

pub use error::QuorumError;
pub use intersect::compute;
pub use normalize::{resolve_local_slot, resolve_local_slots, GapPolicy, LocalSlot};
pub use recurring::{project_pattern, project_patterns, WeeklyPattern};
pub use slot::{AvailabilitySlot, Event};
pub use window::{CommonWindow, MergePolicy};
