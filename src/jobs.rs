// ============================================================================
// Deferred One-Shot Jobs
// ============================================================================

//! Stands in for a one-shot delayed-callback scheduler. Jobs carry the time
//! they become due; the frame clock drains whatever is due on each
//! `advance(now)`. A job never checks whether it is still wanted when it is
//! scheduled, only when it runs, so the consumer must re-validate its
//! preconditions at fire time.

use crate::Millis;

#[derive(Debug, Clone, PartialEq)]
struct Job<J> {
    due: Millis,
    seq: u64,
    kind: J,
}

/// Pending jobs, drained in due-time order with FIFO ties.
#[derive(Debug, Clone)]
pub struct JobQueue<J> {
    pending: Vec<Job<J>>,
    next_seq: u64,
}

impl<J> Default for JobQueue<J> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<J> JobQueue<J> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` to run once `now >= due`.
    pub fn schedule(&mut self, due: Millis, kind: J) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Job { due, seq, kind });
    }

    /// Remove and return every job due at `now`.
    pub fn drain_due(&mut self, now: Millis) -> Vec<J> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|job| job.due <= now);
        self.pending = rest;
        due.sort_by_key(|job| (job.due, job.seq));
        due.into_iter().map(|job| job.kind).collect()
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.iter().map(|job| job.due).min()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
