//! Common windows and the merge policy applied to them.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A maximal interval during which one fixed set of participants, at least
/// quorum-many, is simultaneously free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Exactly the participants free throughout `[start, end)`.
    pub participants: BTreeSet<String>,
    pub duration_minutes: i64,
}

impl CommonWindow {
    pub(crate) fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participants: BTreeSet<String>,
    ) -> Self {
        CommonWindow {
            start,
            end,
            participants,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// What to do when the quorum dips momentarily and the same participants
/// come back: report the stretches separately, or bridge short dips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Every dip below quorum splits the output.
    #[default]
    Separate,
    /// Coalesce windows with identical participant sets when the dip
    /// between them lasts at most `max_gap_minutes`. The bridged window
    /// includes the gap.
    BridgeGapsUpTo { max_gap_minutes: i64 },
}

/// Bridge sub-threshold dips between windows sharing one participant set.
///
/// Input windows are sorted and pairwise disjoint; merging only ever
/// lengthens a window, it never drops one.
pub(crate) fn bridge_gaps(windows: Vec<CommonWindow>, policy: MergePolicy) -> Vec<CommonWindow> {
    let max_gap_minutes = match policy {
        MergePolicy::Separate => return windows,
        MergePolicy::BridgeGapsUpTo { max_gap_minutes } => max_gap_minutes,
    };
    let max_gap = Duration::minutes(max_gap_minutes);

    let mut merged: Vec<CommonWindow> = Vec::new();
    for window in windows {
        if let Some(last) = merged.last_mut() {
            if window.participants == last.participants && window.start - last.end <= max_gap {
                last.end = window.end;
                last.duration_minutes = (last.end - last.start).num_minutes();
                continue;
            }
        }
        merged.push(window);
    }
    merged
}
