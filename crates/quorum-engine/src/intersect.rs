//! Sweep-line quorum intersection over availability slots.
//!
//! Converts every slot into a pair of timestamped boundary events, sweeps
//! them in chronological order while maintaining the set of currently-free
//! participants, and emits the maximal windows during which at least
//! quorum-many participants share the whole interval. Runs in O(n log n)
//! for n slot boundaries; a pairwise-overlap approach would be O(n²) and
//! falls over for groups with many slots across a multi-day span.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::error::{QuorumError, Result};
use crate::slot::Event;
use crate::window::{bridge_gaps, CommonWindow, MergePolicy};

/// Boundary kind. Closings sort before openings at the same timestamp, so
/// a slot that ends exactly when another starts never counts as overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Close,
    Open,
}

/// Compute the common free windows for `event` at the given quorum.
///
/// Returns windows sorted ascending by start, pairwise disjoint, each at
/// least the event's required duration long and tagged with exactly the
/// participants free throughout it. An empty result is a valid answer
/// ("no common time found"), never an error.
///
/// # Errors
///
/// - [`QuorumError::InvalidQuorum`] -- quorum below 2 or above the roster size.
/// - [`QuorumError::InvalidDuration`] -- non-positive required duration.
/// - [`QuorumError::MalformedSlot`] / [`QuorumError::UnknownParticipant`] --
///   bad slot data; failing fast here surfaces ingestion bugs instead of
///   hiding them.
/// - [`QuorumError::DurationExceedsSpan`] -- the required duration cannot fit
///   in the span the slots cover, so the request itself is inconsistent.
pub fn compute(event: &Event, quorum: usize, policy: MergePolicy) -> Result<Vec<CommonWindow>> {
    if quorum < 2 || quorum > event.participants.len() {
        return Err(QuorumError::InvalidQuorum {
            quorum,
            participants: event.participants.len(),
        });
    }

    let required = event.required_duration_minutes;
    if required <= 0 {
        return Err(QuorumError::InvalidDuration { minutes: required });
    }

    event.validate_slots()?;

    // No responses yet: nothing to intersect, and no span to check against.
    if event.slots.is_empty() {
        return Ok(Vec::new());
    }

    let span = event.span_minutes().unwrap_or(0);
    if required > span {
        return Err(QuorumError::DurationExceedsSpan { required, span });
    }

    let candidates = sweep(event, quorum);

    let required_duration = Duration::minutes(required);
    let kept: Vec<CommonWindow> = candidates
        .into_iter()
        .filter(|w| w.end - w.start >= required_duration)
        .collect();

    Ok(bridge_gaps(kept, policy))
}

/// The sweep itself: maximal constant-membership stretches at or above
/// quorum, before the duration filter and merge policy are applied.
fn sweep(event: &Event, quorum: usize) -> Vec<CommonWindow> {
    let mut boundaries: Vec<(DateTime<Utc>, Boundary, &str)> =
        Vec::with_capacity(event.slots.len() * 2);
    for slot in &event.slots {
        boundaries.push((slot.start, Boundary::Open, slot.participant_id.as_str()));
        boundaries.push((slot.end, Boundary::Close, slot.participant_id.as_str()));
    }
    boundaries.sort_by_key(|&(at, kind, _)| (at, kind));

    // A participant's own slots may overlap; they count once. Track nesting
    // depth per participant and treat them as free while depth > 0.
    let mut depth: HashMap<&str, u32> = HashMap::new();
    let mut active: BTreeSet<&str> = BTreeSet::new();
    let mut candidates: Vec<CommonWindow> = Vec::new();

    let mut cursor = match boundaries.first() {
        Some(&(at, _, _)) => at,
        None => return candidates,
    };

    for &(at, kind, participant) in &boundaries {
        if cursor < at {
            if active.len() >= quorum {
                let set: BTreeSet<String> = active.iter().map(|p| (*p).to_string()).collect();
                match candidates.last_mut() {
                    // Contiguous stretch with unchanged membership: extend
                    // rather than split, so windows stay maximal.
                    Some(last) if last.end == cursor && last.participants == set => {
                        last.end = at;
                        last.duration_minutes = (last.end - last.start).num_minutes();
                    }
                    _ => candidates.push(CommonWindow::new(cursor, at, set)),
                }
            }
            cursor = at;
        }

        match kind {
            Boundary::Open => {
                let d = depth.entry(participant).or_insert(0);
                *d += 1;
                if *d == 1 {
                    active.insert(participant);
                }
            }
            Boundary::Close => {
                if let Some(d) = depth.get_mut(participant) {
                    *d = d.saturating_sub(1);
                    if *d == 0 {
                        active.remove(participant);
                    }
                }
            }
        }
    }

    candidates
}
