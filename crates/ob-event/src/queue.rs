//! `EventQueue`: pending collisions ordered by time, with lazy invalidation.
//!
//! # Invalidation model
//!
//! Every agent has an *epoch* counter.  An entry records the epochs of its
//! agents at insertion time; [`invalidate`](EventQueue::invalidate) bumps an
//! agent's epoch, which turns every entry mentioning that agent stale in
//! O(1).  Stale entries are skipped when they reach the top of the heap and
//! purged in bulk once they outnumber live ones enough to matter.
//!
//! After `invalidate(S)` followed by inserting fresh predictions for `S`, the
//! live entries are exactly the fresh ones plus the untouched events of
//! agents outside `S`.
//!
//! # Ordering
//!
//! Earliest `t` first.  Equal times pop in insertion order, so a run is a
//! pure function of its seed.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ob_core::AgentId;

use crate::Event;

/// Heap size below which stale entries are never purged.
const MIN_COMPACT_LEN: usize = 1024;

struct Entry {
    event: Event,
    seq:   u64,
    epoch_a: u64,
    /// Epoch of the second agent; unused for wall events.
    epoch_b: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time()
            .total_cmp(&other.event.time())
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-queue of predicted events over a fixed-size population.
#[derive(Default)]
pub struct EventQueue {
    heap:       BinaryHeap<Reverse<Entry>>,
    epochs:     Vec<u64>,
    next_seq:   u64,
    compact_at: usize,
}

impl EventQueue {
    /// Empty queue for `agent_count` agents.
    pub fn new(agent_count: usize) -> Self {
        Self {
            heap:       BinaryHeap::new(),
            epochs:     vec![0; agent_count],
            next_seq:   0,
            compact_at: MIN_COMPACT_LEN,
        }
    }

    /// Drop every entry and resize for `agent_count` agents.
    pub fn reset(&mut self, agent_count: usize) {
        *self = Self::new(agent_count);
    }

    /// Number of agents this queue tracks.
    pub fn agent_count(&self) -> usize {
        self.epochs.len()
    }

    /// Add a freshly predicted event, stamped with its agents' current epochs.
    pub fn insert(&mut self, event: Event) {
        let (a, b) = event.agents();
        let entry = Entry {
            event,
            seq:     self.next_seq,
            epoch_a: self.epochs[a.index()],
            epoch_b: b.map_or(0, |b| self.epochs[b.index()]),
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));

        if self.heap.len() >= self.compact_at {
            self.compact();
        }
    }

    /// Mark every pending event that involves `agent` as stale.
    #[inline]
    pub fn invalidate(&mut self, agent: AgentId) {
        self.epochs[agent.index()] += 1;
    }

    /// Mark every pending event that involves any of `agents` as stale.
    pub fn remove_all_referring_to(&mut self, agents: &[AgentId]) {
        for &agent in agents {
            self.invalidate(agent);
        }
    }

    /// The earliest live event, discarding stale entries above it.
    pub fn peek_min(&mut self) -> Option<&Event> {
        self.skip_stale();
        self.heap.peek().map(|Reverse(entry)| &entry.event)
    }

    /// Remove and return the earliest live event.
    pub fn pop_min(&mut self) -> Option<Event> {
        self.skip_stale();
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    /// Live events in unspecified order.  O(heap size).
    pub fn pending(&self) -> impl Iterator<Item = &Event> + '_ {
        self.heap
            .iter()
            .filter(|Reverse(entry)| self.is_live(entry))
            .map(|Reverse(entry)| &entry.event)
    }

    /// Number of live events.  O(heap size).
    pub fn len(&self) -> usize {
        self.pending().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries held, live or stale.
    pub fn raw_len(&self) -> usize {
        self.heap.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn is_live(&self, entry: &Entry) -> bool {
        let (a, b) = entry.event.agents();
        self.epochs[a.index()] == entry.epoch_a
            && b.is_none_or(|b| self.epochs[b.index()] == entry.epoch_b)
    }

    fn skip_stale(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }

    /// Rebuild the heap from live entries only.
    fn compact(&mut self) {
        let heap = std::mem::take(&mut self.heap);
        let live: Vec<Reverse<Entry>> = heap
            .into_vec()
            .into_iter()
            .filter(|Reverse(entry)| self.is_live(entry))
            .collect();
        self.heap = BinaryHeap::from(live);
        self.compact_at = (2 * self.heap.len()).max(MIN_COMPACT_LEN);
    }
}
