//! Property-based tests for the quorum intersection using proptest.
//!
//! These verify invariants that must hold for *any* slot set, not just the
//! worked examples in `intersect_tests.rs`.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use quorum_engine::{compute, AvailabilitySlot, Event, MergePolicy};

// ---------------------------------------------------------------------------
// Strategies — random slot sets over one week, minute granularity
// ---------------------------------------------------------------------------

const ROSTER: [&str; 6] = ["p0", "p1", "p2", "p3", "p4", "p5"];

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 16, 0, 0, 0).unwrap()
}

/// (participant index, start offset in minutes, length in minutes)
fn arb_raw_slots() -> impl Strategy<Value = Vec<(usize, i64, i64)>> {
    prop::collection::vec((0usize..ROSTER.len(), 0i64..10_080, 15i64..360), 1..24)
}

fn arb_quorum() -> impl Strategy<Value = usize> {
    2usize..=ROSTER.len()
}

fn arb_duration() -> impl Strategy<Value = i64> {
    15i64..=120
}

fn build_event(raw: &[(usize, i64, i64)], duration_minutes: i64) -> Event {
    let slots = raw
        .iter()
        .map(|&(who, start_min, len_min)| {
            let start = base() + Duration::minutes(start_min);
            AvailabilitySlot::new(ROSTER[who], start, start + Duration::minutes(len_min))
        })
        .collect();
    Event {
        event_id: "prop-event".to_string(),
        required_duration_minutes: duration_minutes,
        participants: ROSTER.iter().map(|p| p.to_string()).collect(),
        slots,
    }
}

/// Does the union of this participant's slots cover all of [start, end)?
fn covers(event: &Event, participant: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = event
        .slots
        .iter()
        .filter(|s| s.participant_id == participant)
        .map(|s| (s.start, s.end))
        .collect();
    intervals.sort();

    let mut cursor = start;
    for (s, e) in intervals {
        if s > cursor {
            break;
        }
        if e > cursor {
            cursor = e;
        }
        if cursor >= end {
            return true;
        }
    }
    cursor >= end
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: windows are sorted and pairwise disjoint
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn windows_sorted_and_disjoint(
        raw in arb_raw_slots(),
        quorum in arb_quorum(),
        duration in arb_duration(),
    ) {
        let event = build_event(&raw, duration);
        if let Ok(windows) = compute(&event, quorum, MergePolicy::Separate) {
            for pair in windows.windows(2) {
                prop_assert!(
                    pair[0].end <= pair[1].start,
                    "windows overlap or are unsorted: {:?} then {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: every window meets the quorum and duration bounds
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn windows_meet_quorum_and_duration(
        raw in arb_raw_slots(),
        quorum in arb_quorum(),
        duration in arb_duration(),
    ) {
        let event = build_event(&raw, duration);
        if let Ok(windows) = compute(&event, quorum, MergePolicy::Separate) {
            for w in &windows {
                prop_assert!(w.participants.len() >= quorum);
                prop_assert!(w.duration_minutes >= duration);
                prop_assert_eq!(w.duration_minutes, (w.end - w.start).num_minutes());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: a window names exactly the participants free throughout it
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn window_membership_is_exact(
        raw in arb_raw_slots(),
        quorum in arb_quorum(),
        duration in arb_duration(),
    ) {
        let event = build_event(&raw, duration);
        if let Ok(windows) = compute(&event, quorum, MergePolicy::Separate) {
            for w in &windows {
                let actual: BTreeSet<String> = ROSTER
                    .iter()
                    .filter(|p| covers(&event, p, w.start, w.end))
                    .map(|p| p.to_string())
                    .collect();
                prop_assert_eq!(
                    &w.participants,
                    &actual,
                    "window [{} .. {}] claims {:?}",
                    w.start,
                    w.end,
                    &w.participants
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: idempotence — same input, same output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn compute_is_idempotent(
        raw in arb_raw_slots(),
        quorum in arb_quorum(),
        duration in arb_duration(),
    ) {
        let event = build_event(&raw, duration);
        let first = compute(&event, quorum, MergePolicy::Separate);
        let second = compute(&event, quorum, MergePolicy::Separate);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "diverging outcomes: {:?} vs {:?}", a, b),
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: raising the quorum never widens total covered time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn higher_quorum_shrinks_coverage(
        raw in arb_raw_slots(),
        quorum in 2usize..ROSTER.len(),
        duration in arb_duration(),
    ) {
        let event = build_event(&raw, duration);
        let lower = compute(&event, quorum, MergePolicy::Separate);
        let higher = compute(&event, quorum + 1, MergePolicy::Separate);
        if let (Ok(lo), Ok(hi)) = (lower, higher) {
            let covered = |ws: &[quorum_engine::CommonWindow]| -> i64 {
                ws.iter().map(|w| w.duration_minutes).sum()
            };
            prop_assert!(
                covered(&hi) <= covered(&lo),
                "quorum {} covers {} min but quorum {} covers {} min",
                quorum + 1,
                covered(&hi),
                quorum,
                covered(&lo)
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: bridging never loses covered time and never splits further
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn bridging_only_coalesces(
        raw in arb_raw_slots(),
        quorum in arb_quorum(),
        duration in arb_duration(),
        max_gap in 1i64..=30,
    ) {
        let event = build_event(&raw, duration);
        let separate = compute(&event, quorum, MergePolicy::Separate);
        let bridged = compute(
            &event,
            quorum,
            MergePolicy::BridgeGapsUpTo { max_gap_minutes: max_gap },
        );
        if let (Ok(sep), Ok(br)) = (separate, bridged) {
            prop_assert!(br.len() <= sep.len());
            let covered_sep: i64 = sep.iter().map(|w| w.duration_minutes).sum();
            let covered_br: i64 = br.iter().map(|w| w.duration_minutes).sum();
            prop_assert!(covered_br >= covered_sep);
        }
    }
}
