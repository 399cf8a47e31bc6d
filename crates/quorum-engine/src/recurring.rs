//! Weekly availability patterns projected onto concrete dates.
//!
//! Recurring events collect availability per weekday ("Tuesdays 18:00–22:00")
//! rather than per date. Before intersection, each pattern is projected over
//! a concrete date window into ordinary UTC slots, one per matching weekday,
//! through the same DST-aware resolution as dated slots.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{QuorumError, Result};
use crate::normalize::{resolve_local_slot, GapPolicy, LocalSlot};
use crate::slot::AvailabilitySlot;

/// A recurring weekly free period in the participant's local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub participant_id: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    /// At or before `start_time` means the period runs past midnight.
    pub end_time: NaiveTime,
    /// IANA timezone identifier the wall-clock times are anchored to.
    pub timezone: String,
}

/// Project one weekly pattern over the half-open local date range
/// `[from, until)`.
///
/// Each matching weekday becomes one UTC slot. Across a DST transition the
/// UTC duration of a slot differs from its wall-clock duration; that is the
/// correct reading of "Tuesdays 18:00–22:00 local", not an error. Slots a
/// spring-forward gap swallows follow `policy`.
///
/// # Errors
///
/// [`QuorumError::InvalidDateRange`] when `from >= until`;
/// [`QuorumError::InvalidTimezone`] when the timezone does not resolve.
pub fn project_pattern(
    pattern: &WeeklyPattern,
    from: NaiveDate,
    until: NaiveDate,
    policy: GapPolicy,
) -> Result<Vec<AvailabilitySlot>> {
    if from >= until {
        return Err(QuorumError::InvalidDateRange { from, until });
    }

    // Validate the timezone up front so a range with no matching weekday
    // still rejects a bad identifier.
    let _tz: Tz = pattern
        .timezone
        .parse()
        .map_err(|_| QuorumError::InvalidTimezone(pattern.timezone.clone()))?;

    let mut slots = Vec::new();
    let mut date = from;
    while date < until {
        if date.weekday() == pattern.weekday {
            let local = LocalSlot {
                participant_id: pattern.participant_id.clone(),
                date,
                start_time: pattern.start_time,
                end_time: pattern.end_time,
                timezone: pattern.timezone.clone(),
            };
            if let Some(slot) = resolve_local_slot(&local, policy)? {
                slots.push(slot);
            }
        }
        date = date + Duration::days(1);
    }

    Ok(slots)
}

/// Project several patterns over one date range, sorted by start time.
pub fn project_patterns(
    patterns: &[WeeklyPattern],
    from: NaiveDate,
    until: NaiveDate,
    policy: GapPolicy,
) -> Result<Vec<AvailabilitySlot>> {
    let mut slots = Vec::new();
    for pattern in patterns {
        slots.extend(project_pattern(pattern, from, until, policy)?);
    }
    slots.sort_by(|a, b| {
        (a.start, a.end, a.participant_id.as_str()).cmp(&(b.start, b.end, b.participant_id.as_str()))
    });
    Ok(slots)
}
