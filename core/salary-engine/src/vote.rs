//! FILENAME: core/salary-engine/src/vote.rs
//! PURPOSE: Community vote scoring - per-viewer vote state and entry counters.
//! CONTEXT: The vote state machine is a pure function of (state, direction).
//! Everything else here (counters, the vote book) applies its deltas.
//!
//! Transitions for a cast in direction `d`:
//! - None   -> d     (+1 on d)
//! - d      -> None  (-1 on d, toggle off)
//! - other  -> d     (-1 on other, +1 on d)

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::entry::{EntryId, SalaryEntry};
use crate::error::{EngineError, Result};
use crate::{log_debug, log_warn};

/// Identifier of the viewer casting votes (supplied by the auth collaborator).
pub type ViewerId = u32;

// ============================================================================
// DIRECTION & STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown vote direction '{}' (expected 'up' or 'down')",
                other
            ))),
        }
    }
}

/// Body of a vote request against a remote service: `{"direction": "up"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

/// A viewer's current vote on one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

impl From<VoteDirection> for VoteState {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => VoteState::Up,
            VoteDirection::Down => VoteState::Down,
        }
    }
}

// ============================================================================
// COUNTERS
// ============================================================================

/// Signed change to apply to an entry's counters. Each side is -1, 0 or +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub upvotes: i8,
    pub downvotes: i8,
}

impl CounterDelta {
    fn on(direction: VoteDirection, amount: i8) -> Self {
        match direction {
            VoteDirection::Up => CounterDelta { upvotes: amount, downvotes: 0 },
            VoteDirection::Down => CounterDelta { upvotes: 0, downvotes: amount },
        }
    }

    fn plus(self, other: CounterDelta) -> Self {
        CounterDelta {
            upvotes: self.upvotes + other.upvotes,
            downvotes: self.downvotes + other.downvotes,
        }
    }

    /// Change in net score implied by this delta.
    pub fn net(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// Up/down counters of one entry. Also the `{upvotes, downvotes}` body a
/// remote vote endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct VoteCounts {
    upvotes: u32,
    downvotes: u32,
}

impl VoteCounts {
    pub fn new(upvotes: u32, downvotes: u32) -> Self {
        VoteCounts { upvotes, downvotes }
    }

    pub fn upvotes(&self) -> u32 {
        self.upvotes
    }

    pub fn downvotes(&self) -> u32 {
        self.downvotes
    }

    pub fn net_score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }

    /// Returns the counters after `delta`, or `None` if a side would go
    /// below zero.
    fn checked_apply(&self, delta: CounterDelta) -> Option<VoteCounts> {
        Some(VoteCounts {
            upvotes: apply_signed(self.upvotes, delta.upvotes)?,
            downvotes: apply_signed(self.downvotes, delta.downvotes)?,
        })
    }
}

fn apply_signed(value: u32, delta: i8) -> Option<u32> {
    if delta >= 0 {
        value.checked_add(delta as u32)
    } else {
        value.checked_sub(delta.unsigned_abs() as u32)
    }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// The vote state machine. Pure: no counters are touched here.
pub fn transition(state: VoteState, direction: VoteDirection) -> (VoteState, CounterDelta) {
    let target = VoteState::from(direction);
    match state {
        VoteState::None => (target, CounterDelta::on(direction, 1)),
        current if current == target => (VoteState::None, CounterDelta::on(direction, -1)),
        _ => {
            let previous = match direction {
                VoteDirection::Up => VoteDirection::Down,
                VoteDirection::Down => VoteDirection::Up,
            };
            (target, CounterDelta::on(previous, -1).plus(CounterDelta::on(direction, 1)))
        }
    }
}

/// Result of a cast: the viewer's new state and the entry's new counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub entry_id: EntryId,
    pub state: VoteState,
    pub counts: VoteCounts,
    /// False when the cast was ignored (viewer not signed in).
    pub changed: bool,
}

/// Casts one vote against an entry's counters.
///
/// Unauthenticated viewers get back their current state and counters
/// unchanged. A state that does not match the counters (e.g. `Up` with zero
/// upvotes) is rejected instead of driving a counter negative.
pub fn cast_vote(
    entry_id: EntryId,
    direction: VoteDirection,
    current_state: VoteState,
    counts: VoteCounts,
    is_authenticated: bool,
) -> Result<VoteOutcome> {
    if !is_authenticated {
        log_debug!("VOTE", "ignored {} on entry={} (not signed in)", direction, entry_id);
        return Ok(VoteOutcome {
            entry_id,
            state: current_state,
            counts,
            changed: false,
        });
    }

    let (state, delta) = transition(current_state, direction);
    let updated = counts.checked_apply(delta).ok_or_else(|| {
        log_warn!(
            "VOTE",
            "underflow on entry={} state={:?} counts={:?} direction={}",
            entry_id, current_state, counts, direction
        );
        EngineError::CounterUnderflow {
            entry_id,
            direction: underflowing_side(delta, direction),
        }
    })?;

    log_debug!(
        "VOTE",
        "entry={} {:?} -> {:?} counts=({}, {})",
        entry_id, current_state, state, updated.upvotes, updated.downvotes
    );

    Ok(VoteOutcome {
        entry_id,
        state,
        counts: updated,
        changed: true,
    })
}

fn underflowing_side(delta: CounterDelta, direction: VoteDirection) -> VoteDirection {
    if delta.upvotes < 0 {
        VoteDirection::Up
    } else if delta.downvotes < 0 {
        VoteDirection::Down
    } else {
        direction
    }
}

// ============================================================================
// APPROVAL
// ============================================================================

/// Community approval ("Verified") predicate. The threshold is injected from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    pub threshold: i64,
}

impl ApprovalPolicy {
    pub fn new(threshold: i64) -> Self {
        ApprovalPolicy { threshold }
    }

    pub fn is_approved(&self, counts: &VoteCounts) -> bool {
        counts.net_score() >= self.threshold
    }
}

/// Net score label shown next to the vote buttons: "+3 net", "0 net", "-2 net".
pub fn format_net_score(net: i64) -> String {
    if net > 0 {
        format!("+{} net", net)
    } else {
        format!("{} net", net)
    }
}

// ============================================================================
// VOTE BOOK
// ============================================================================

/// Owns the counters of every registered entry and the vote state of every
/// (viewer, entry) pair. Single writer.
#[derive(Debug, Clone, Default)]
pub struct VoteBook {
    counts: FxHashMap<EntryId, VoteCounts>,
    states: FxHashMap<(ViewerId, EntryId), VoteState>,
}

impl VoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking an entry with its current counters. Re-registering an
    /// entry keeps the counters already in the book.
    pub fn register(&mut self, entry: &SalaryEntry) {
        self.counts.entry(entry.id).or_insert(entry.votes);
    }

    pub fn register_all<'a>(&mut self, entries: impl IntoIterator<Item = &'a SalaryEntry>) {
        for entry in entries {
            self.register(entry);
        }
    }

    pub fn counts_of(&self, entry_id: EntryId) -> Option<VoteCounts> {
        self.counts.get(&entry_id).copied()
    }

    pub fn state_of(&self, viewer: ViewerId, entry_id: EntryId) -> VoteState {
        self.states.get(&(viewer, entry_id)).copied().unwrap_or_default()
    }

    /// Casts a vote for `viewer`, updating both the viewer's state and the
    /// entry's counters in one step.
    ///
    /// A signed-out viewer is a no-op for every entry id, registered or not.
    pub fn cast(
        &mut self,
        viewer: ViewerId,
        entry_id: EntryId,
        direction: VoteDirection,
        is_authenticated: bool,
    ) -> Result<VoteOutcome> {
        if !is_authenticated {
            let counts = self.counts_of(entry_id).unwrap_or_default();
            return cast_vote(entry_id, direction, self.state_of(viewer, entry_id), counts, false);
        }

        let counts = self.counts_of(entry_id).ok_or_else(|| {
            log_warn!("VOTE", "cast on unknown entry={}", entry_id);
            EngineError::UnknownEntry(entry_id)
        })?;
        let current = self.state_of(viewer, entry_id);

        let outcome = cast_vote(entry_id, direction, current, counts, is_authenticated)?;
        if outcome.changed {
            self.counts.insert(entry_id, outcome.counts);
            if outcome.state == VoteState::None {
                self.states.remove(&(viewer, entry_id));
            } else {
                self.states.insert((viewer, entry_id), outcome.state);
            }
        }
        Ok(outcome)
    }

    /// Writes the book's counters back onto the entries, so sorting and
    /// display see live values. Unregistered entries are left alone.
    pub fn apply_to(&self, entries: &mut [SalaryEntry]) {
        for entry in entries.iter_mut() {
            if let Some(counts) = self.counts.get(&entry.id) {
                entry.votes = *counts;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ExperienceLevel;
    use chrono::Utc;

    #[test]
    fn test_transition_table() {
        use VoteDirection::*;
        assert_eq!(transition(VoteState::None, Up), (VoteState::Up, CounterDelta { upvotes: 1, downvotes: 0 }));
        assert_eq!(transition(VoteState::Up, Up), (VoteState::None, CounterDelta { upvotes: -1, downvotes: 0 }));
        assert_eq!(transition(VoteState::Up, Down), (VoteState::Down, CounterDelta { upvotes: -1, downvotes: 1 }));
        assert_eq!(transition(VoteState::Down, Up), (VoteState::Up, CounterDelta { upvotes: 1, downvotes: -1 }));
        assert_eq!(transition(VoteState::Down, Down), (VoteState::None, CounterDelta { upvotes: 0, downvotes: -1 }));
        assert_eq!(transition(VoteState::None, Down), (VoteState::Down, CounterDelta { upvotes: 0, downvotes: 1 }));
    }

    #[test]
    fn test_up_up_toggles_back() {
        let start = VoteCounts::new(5, 2);
        let first = cast_vote(1, VoteDirection::Up, VoteState::None, start, true).unwrap();
        assert_eq!(first.counts, VoteCounts::new(6, 2));
        assert_eq!(first.state, VoteState::Up);

        let second = cast_vote(1, VoteDirection::Up, first.state, first.counts, true).unwrap();
        assert_eq!(second.counts, VoteCounts::new(5, 2));
        assert_eq!(second.state, VoteState::None);
        assert_eq!(second.counts.net_score(), start.net_score());
    }

    #[test]
    fn test_up_then_down_swaps() {
        let start = VoteCounts::new(5, 2);
        let first = cast_vote(1, VoteDirection::Up, VoteState::None, start, true).unwrap();
        let second = cast_vote(1, VoteDirection::Down, first.state, first.counts, true).unwrap();

        assert_eq!(second.counts, VoteCounts::new(5, 3));
        assert_eq!(second.state, VoteState::Down);
        assert_eq!(first.counts.net_score() - second.counts.net_score(), 2);
    }

    #[test]
    fn test_unauthenticated_cast_is_a_no_op() {
        let start = VoteCounts::new(5, 2);
        let outcome = cast_vote(1, VoteDirection::Down, VoteState::Up, start, false).unwrap();
        assert_eq!(outcome.counts, start);
        assert_eq!(outcome.state, VoteState::Up);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_inconsistent_state_is_rejected() {
        let err = cast_vote(3, VoteDirection::Up, VoteState::Up, VoteCounts::new(0, 0), true).unwrap_err();
        assert!(matches!(
            err,
            EngineError::CounterUnderflow { entry_id: 3, direction: VoteDirection::Up }
        ));
    }

    #[test]
    fn test_direction_parsing_fails_fast() {
        assert_eq!("up".parse::<VoteDirection>().unwrap(), VoteDirection::Up);
        assert_eq!("down".parse::<VoteDirection>().unwrap(), VoteDirection::Down);
        assert!(matches!("sideways".parse::<VoteDirection>(), Err(EngineError::InvalidArgument(_))));
        assert!("Up".parse::<VoteDirection>().is_err());
    }

    #[test]
    fn test_vote_request_wire_shape() {
        let request: VoteRequest = serde_json::from_str(r#"{"direction":"down"}"#).unwrap();
        assert_eq!(request.direction, VoteDirection::Down);
        assert!(serde_json::from_str::<VoteRequest>(r#"{"direction":"sideways"}"#).is_err());

        let body = serde_json::to_string(&VoteCounts::new(6, 2)).unwrap();
        assert_eq!(body, r#"{"upvotes":6,"downvotes":2}"#);
    }

    #[test]
    fn test_approval_policy() {
        let policy = ApprovalPolicy::new(5);
        assert!(policy.is_approved(&VoteCounts::new(8, 3)));
        assert!(!policy.is_approved(&VoteCounts::new(7, 3)));
        assert!(ApprovalPolicy::new(0).is_approved(&VoteCounts::new(0, 0)));
    }

    #[test]
    fn test_format_net_score() {
        assert_eq!(format_net_score(3), "+3 net");
        assert_eq!(format_net_score(0), "0 net");
        assert_eq!(format_net_score(-2), "-2 net");
    }

    fn entry(id: EntryId, up: u32, down: u32) -> SalaryEntry {
        SalaryEntry::new(id, "QA Engineer", "India", ExperienceLevel::Mid, 1.0, 0.0, 0.0, "INR", Utc::now())
            .with_votes(VoteCounts::new(up, down))
    }

    #[test]
    fn test_vote_book_tracks_viewers_independently() {
        let mut entries = vec![entry(1, 5, 2), entry(2, 0, 0)];
        let mut book = VoteBook::new();
        book.register_all(&entries);

        book.cast(10, 1, VoteDirection::Up, true).unwrap();
        book.cast(11, 1, VoteDirection::Up, true).unwrap();
        assert_eq!(book.counts_of(1), Some(VoteCounts::new(7, 2)));
        assert_eq!(book.state_of(10, 1), VoteState::Up);
        assert_eq!(book.state_of(10, 2), VoteState::None);

        // Viewer 10 switches sides; viewer 11 keeps their upvote.
        book.cast(10, 1, VoteDirection::Down, true).unwrap();
        assert_eq!(book.counts_of(1), Some(VoteCounts::new(6, 3)));
        assert_eq!(book.state_of(11, 1), VoteState::Up);

        book.apply_to(&mut entries);
        assert_eq!(entries[0].votes(), VoteCounts::new(6, 3));
        assert_eq!(entries[1].votes(), VoteCounts::new(0, 0));
    }

    #[test]
    fn test_vote_book_unknown_entry_and_signed_out_viewer() {
        let mut book = VoteBook::new();
        book.register(&entry(1, 1, 1));

        assert!(matches!(book.cast(1, 99, VoteDirection::Up, true), Err(EngineError::UnknownEntry(99))));

        let outcome = book.cast(1, 1, VoteDirection::Up, false).unwrap();
        assert!(!outcome.changed);
        assert_eq!(book.counts_of(1), Some(VoteCounts::new(1, 1)));
        assert_eq!(book.state_of(1, 1), VoteState::None);
    }

    #[test]
    fn test_signed_out_vote_on_unregistered_entry_is_ignored() {
        let mut book = VoteBook::new();
        book.register(&entry(1, 3, 0));

        let outcome = book.cast(7, 42, VoteDirection::Up, false).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.entry_id, 42);
        assert_eq!(outcome.state, VoteState::None);
        assert_eq!(outcome.counts, VoteCounts::default());
        assert_eq!(book.counts_of(42), None);
        assert_eq!(book.counts_of(1), Some(VoteCounts::new(3, 0)));
    }
}
