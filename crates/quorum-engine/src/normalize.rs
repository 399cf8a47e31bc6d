//! Wall-clock ingestion: local slots in an IANA timezone → UTC slots.
//!
//! Participants report availability in their own local time; the engine
//! computes purely in UTC. Conversion happens once, here, at ingestion.
//! The engine never stores or compares local-time values internally, and
//! converting results back for display is the viewer's concern, not ours.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{QuorumError, Result};
use crate::slot::AvailabilitySlot;

/// One wall-clock free period as collected from a participant.
///
/// `end_time` at or before `start_time` means the period crosses midnight
/// and ends on the following day (e.g., 23:00–01:00).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSlot {
    pub participant_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// IANA timezone identifier (e.g., "Europe/Berlin").
    pub timezone: String,
}

/// What to do when a wall-clock instant falls inside a DST spring-forward
/// gap (e.g., 02:30 on the night clocks jump from 02:00 to 03:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Drop the slot entirely.
    Skip,
    /// Move the instant to the first valid wall-clock time after the gap.
    #[default]
    ShiftForward,
}

/// Resolve one local slot to UTC.
///
/// Ambiguous instants (the repeated hour when clocks fall back) resolve to
/// the earlier of the two offsets. Gap instants follow `policy`; a slot the
/// gap swallows whole (its resolved start no longer precedes its resolved
/// end) is dropped rather than reported as malformed, since the input was
/// well-formed wall-clock data.
///
/// # Errors
///
/// [`QuorumError::InvalidTimezone`] when the timezone string is not a valid
/// IANA identifier.
pub fn resolve_local_slot(slot: &LocalSlot, policy: GapPolicy) -> Result<Option<AvailabilitySlot>> {
    let tz: Tz = slot
        .timezone
        .parse()
        .map_err(|_| QuorumError::InvalidTimezone(slot.timezone.clone()))?;

    let start_local = slot.date.and_time(slot.start_time);
    let end_date = if slot.end_time <= slot.start_time {
        slot.date + Duration::days(1)
    } else {
        slot.date
    };
    let end_local = end_date.and_time(slot.end_time);

    let start = match resolve_instant(tz, start_local, policy) {
        Some(at) => at,
        None => return Ok(None),
    };
    let end = match resolve_instant(tz, end_local, policy) {
        Some(at) => at,
        None => return Ok(None),
    };

    if start >= end {
        return Ok(None);
    }

    Ok(Some(AvailabilitySlot::new(
        slot.participant_id.clone(),
        start,
        end,
    )))
}

/// Resolve a batch of local slots, preserving input order and dropping
/// slots the gap policy discards. Fails fast on the first invalid timezone.
pub fn resolve_local_slots(slots: &[LocalSlot], policy: GapPolicy) -> Result<Vec<AvailabilitySlot>> {
    let mut resolved = Vec::with_capacity(slots.len());
    for slot in slots {
        if let Some(utc_slot) = resolve_local_slot(slot, policy)? {
            resolved.push(utc_slot);
        }
    }
    Ok(resolved)
}

/// Map a naive local instant to UTC under the given gap policy.
fn resolve_instant(tz: Tz, local: NaiveDateTime, policy: GapPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => Some(at.with_timezone(&Utc)),
        // Fall-back overlap: the earlier offset is the one the participant
        // lived through first.
        LocalResult::Ambiguous(earlier, _later) => Some(earlier.with_timezone(&Utc)),
        LocalResult::None => match policy {
            GapPolicy::Skip => None,
            GapPolicy::ShiftForward => shift_past_gap(tz, local),
        },
    }
}

/// Probe forward in 15-minute steps until the wall clock is valid again.
/// Real transitions are at most a few hours wide; the bound is generous.
fn shift_past_gap(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let mut probe = local;
    for _ in 0..16 {
        probe = probe + Duration::minutes(15);
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(at) => return Some(at.with_timezone(&Utc)),
            LocalResult::Ambiguous(earlier, _later) => return Some(earlier.with_timezone(&Utc)),
            LocalResult::None => continue,
        }
    }
    None
}
