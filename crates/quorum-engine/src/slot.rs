//! Availability slots and the event they belong to.
//!
//! A slot is one contiguous period a participant marked as free, already
//! normalized to UTC (see [`crate::normalize`] for the wall-clock side).
//! Slots are immutable values: an update replaces the slot, it never
//! mutates one in place.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QuorumError, Result};

/// One contiguous free period reported by a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Opaque identifier for the participant (e.g., "alice", "tg:482913").
    pub participant_id: String,
    /// Start of the free period, inclusive.
    pub start: DateTime<Utc>,
    /// End of the free period, exclusive.
    pub end: DateTime<Utc>,
}

impl AvailabilitySlot {
    pub fn new(
        participant_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        AvailabilitySlot {
            participant_id: participant_id.into(),
            start,
            end,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An event being scheduled: the roster, the required duration, and every
/// slot collected so far.
///
/// The engine never stores events; callers pass an immutable snapshot per
/// computation and may recompute as often as slots change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    /// How long the meeting itself needs to be, in minutes.
    pub required_duration_minutes: i64,
    /// Every participant expected to respond, whether or not they have.
    pub participants: BTreeSet<String>,
    pub slots: Vec<AvailabilitySlot>,
}

impl Event {
    /// Group slots by participant, preserving input order within each group.
    pub fn slots_by_participant(&self) -> BTreeMap<&str, Vec<&AvailabilitySlot>> {
        let mut grouped: BTreeMap<&str, Vec<&AvailabilitySlot>> = BTreeMap::new();
        for slot in &self.slots {
            grouped
                .entry(slot.participant_id.as_str())
                .or_default()
                .push(slot);
        }
        grouped
    }

    /// Total span covered by the slots (earliest start to latest end), in
    /// minutes. `None` when no slots have been collected yet.
    pub fn span_minutes(&self) -> Option<i64> {
        let earliest = self.slots.iter().map(|s| s.start).min()?;
        let latest = self.slots.iter().map(|s| s.end).max()?;
        Some((latest - earliest).num_minutes())
    }

    /// Reject malformed slots and slots naming participants outside the
    /// roster. Silently dropping either would hide an ingestion bug, so the
    /// first offender fails the whole call.
    pub fn validate_slots(&self) -> Result<()> {
        for slot in &self.slots {
            if slot.start >= slot.end {
                return Err(QuorumError::MalformedSlot {
                    participant: slot.participant_id.clone(),
                    start: slot.start,
                    end: slot.end,
                });
            }
            if !self.participants.contains(&slot.participant_id) {
                return Err(QuorumError::UnknownParticipant(slot.participant_id.clone()));
            }
        }
        Ok(())
    }
}
