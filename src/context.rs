/*!
 * The mutable state threaded through every parser: cursor, match log,
 * furthest-failure position, and the recursion memo used by rule dispatch.
 */
use smallvec::SmallVec;

use crate::input::{Input, Pos};

/// A tagged span recording that a marked sub-grammar matched `begin..end`.
///
/// The log is flat and append-only; `child_count` is the number of match-tree
/// roots appended immediately before this one that are this match's children.
/// Rebuilding the tree walks the log back to front, letting each match claim
/// `child_count` completed subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<T> {
    pub id: T,
    pub begin: Pos,
    pub end: Pos,
    pub child_count: usize,
}

/// A snapshot of the backtrackable parts of a [`ParseContext`]: position and
/// match-log length. The furthest-failure position is deliberately excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pos: Pos,
    match_len: usize,
}

impl Checkpoint {
    pub fn position(&self) -> Pos {
        self.pos
    }

    pub fn match_len(&self) -> usize {
        self.match_len
    }
}

/// Identity of a rule handle; compares by the address of the shared body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RuleId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LrKey {
    pub(crate) rule: RuleId,
    pub(crate) at: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LrPhase {
    Seed,
    Grow,
}

struct LrSlot {
    key: LrKey,
    name: &'static str,
    phase: LrPhase,
    best_end: Pos,
    resolved: bool,
    hit: bool,
}

/// Handle describing an active recursion fixpoint, passed down the left spine
/// of a rule body while the accepted span is being extended.
#[derive(Clone, Copy, Debug)]
pub struct LeftRecursion {
    pub(crate) key: LrKey,
    start: Pos,
    start_match_len: usize,
}

impl LeftRecursion {
    pub(crate) fn new(key: LrKey, start: Pos, start_match_len: usize) -> Self {
        Self {
            key,
            start,
            start_match_len,
        }
    }

    /// The position at which the recursive rule was first entered.
    pub fn start(&self) -> Pos {
        self.start
    }

    /// The match-log length when the recursive rule was first entered.
    pub fn start_match_len(&self) -> usize {
        self.start_match_len
    }
}

/// Backtrackable parse state over one input. Combinators receive it by
/// exclusive mutable reference; dropping it reclaims everything.
pub struct ParseContext<'s, S, T> {
    input: Input<'s, S>,
    position: Pos,
    matches: Vec<Match<T>>,
    furthest_failure: Pos,
    recursion: SmallVec<[LrSlot; 2]>,
}

impl<'s, S, T> ParseContext<'s, S, T> {
    pub fn new(input: Input<'s, S>) -> Self {
        Self::with_log_capacity(input, 0)
    }

    /// Like [`ParseContext::new`], preallocating the match log.
    pub fn with_log_capacity(input: Input<'s, S>, capacity: usize) -> Self {
        Self {
            input,
            position: input.begin(),
            matches: Vec::with_capacity(capacity),
            furthest_failure: input.begin(),
            recursion: SmallVec::new(),
        }
    }

    pub fn input(&self) -> Input<'s, S> {
        self.input
    }

    pub fn current(&self) -> Pos {
        self.position
    }

    /// The symbol under the cursor, or `None` at the end of input.
    pub fn symbol(&self) -> Option<&'s S> {
        self.input.get(self.position)
    }

    pub fn at_end(&self) -> bool {
        self.input.is_end(self.position)
    }

    /// Consumes one symbol and returns the new position.
    pub fn advance(&mut self) -> Pos {
        self.position = self.input.next(self.position);
        self.position
    }

    pub(crate) fn jump(&mut self, pos: Pos) {
        self.position = pos;
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.position,
            match_len: self.matches.len(),
        }
    }

    /// Rewinds position and match log to `checkpoint`. The furthest-failure
    /// position is not rewound.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.pos;
        self.matches.truncate(checkpoint.match_len);
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn matches(&self) -> &[Match<T>] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match<T>> {
        self.matches
    }

    /// Appends a match record and returns the new log length.
    pub fn append_match(&mut self, id: T, begin: Pos, end: Pos, child_count: usize) -> usize {
        debug_assert!(child_count <= self.matches.len());
        debug_assert!(begin <= end);
        self.matches.push(Match {
            id,
            begin,
            end,
            child_count,
        });
        self.matches.len()
    }

    pub fn truncate_matches(&mut self, len: usize) {
        self.matches.truncate(len);
    }

    /// The number of match-tree roots among the matches appended at index
    /// `len` and later. A match consumes `child_count` preceding roots, so the
    /// root count of a well-nested segment is its length minus the sum of its
    /// child counts.
    pub fn roots_since(&self, len: usize) -> usize {
        let segment = &self.matches[len..];
        let consumed: usize = segment.iter().map(|m| m.child_count).sum();
        debug_assert!(consumed <= segment.len());
        segment.len() - consumed
    }

    /// Advances the furthest-failure position; it never moves backwards.
    pub fn record_failure(&mut self, pos: Pos) {
        if pos > self.furthest_failure {
            self.furthest_failure = pos;
        }
    }

    pub fn furthest_failure(&self) -> Pos {
        self.furthest_failure
    }

    fn lr_slot(&self, key: LrKey) -> Option<&LrSlot> {
        self.recursion.iter().find(|slot| slot.key == key)
    }

    fn lr_slot_mut(&mut self, key: LrKey) -> &mut LrSlot {
        self.recursion
            .iter_mut()
            .find(|slot| slot.key == key)
            .expect("no live recursion slot for key")
    }

    pub(crate) fn lr_phase(&self, key: LrKey) -> Option<LrPhase> {
        self.lr_slot(key).map(|slot| slot.phase)
    }

    pub(crate) fn lr_insert_seed(&mut self, key: LrKey, name: &'static str) {
        debug_assert!(self.lr_slot(key).is_none());
        self.recursion.push(LrSlot {
            key,
            name,
            phase: LrPhase::Seed,
            best_end: self.position,
            resolved: false,
            hit: false,
        });
    }

    pub(crate) fn lr_remove(&mut self, key: LrKey) {
        if let Some(index) = self.recursion.iter().position(|slot| slot.key == key) {
            self.recursion.remove(index);
        }
    }

    pub(crate) fn lr_mark_hit(&mut self, key: LrKey) {
        self.lr_slot_mut(key).hit = true;
    }

    pub(crate) fn lr_was_hit(&self, key: LrKey) -> bool {
        self.lr_slot(key).map(|slot| slot.hit).unwrap_or(false)
    }

    pub(crate) fn lr_begin_grow(&mut self, key: LrKey, best_end: Pos) {
        let slot = self.lr_slot_mut(key);
        slot.phase = LrPhase::Grow;
        slot.best_end = best_end;
    }

    pub(crate) fn lr_update_best(&mut self, key: LrKey, best_end: Pos) {
        self.lr_slot_mut(key).best_end = best_end;
    }

    pub(crate) fn lr_best_end(&self, key: LrKey) -> Pos {
        self.lr_slot(key)
            .expect("no live recursion slot for key")
            .best_end
    }

    pub(crate) fn lr_set_resolved(&mut self, key: LrKey, resolved: bool) {
        self.lr_slot_mut(key).resolved = resolved;
    }

    pub(crate) fn lr_resolved(&self, key: LrKey) -> bool {
        self.lr_slot(key).map(|slot| slot.resolved).unwrap_or(false)
    }

    /// Looks for a rule other than `key.rule` that entered seeding at the same
    /// offset after `key` did. Its presence on re-entry means the recursion
    /// went through an intermediate rule, i.e. the grammar is indirectly left
    /// recursive at this position.
    pub(crate) fn lr_intervening_seed(&self, key: LrKey) -> Option<&'static str> {
        let own = self.recursion.iter().position(|slot| slot.key == key)?;
        self.recursion[own + 1..]
            .iter()
            .find(|slot| slot.key.at == key.at && slot.phase == LrPhase::Seed)
            .map(|slot| slot.name)
    }
}
