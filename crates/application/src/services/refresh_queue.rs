use certwatch_domain::canonical_host;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::ports::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Absent,
    Queued,
    Processing,
}

struct PendingHost {
    host: String,
    enqueued_at: u64,
}

#[derive(Default)]
struct QueueInner {
    pending: VecDeque<PendingHost>,
    queued: FxHashSet<String>,
    processing: FxHashSet<String>,
}

/// Hostnames waiting for background DNS enrichment.
///
/// A host moves `absent -> queued -> processing -> absent` and is never in
/// more than one state, so enqueueing a host that is already waiting or
/// being worked on is a no-op.
pub struct DnsRefreshQueue {
    inner: Mutex<QueueInner>,
    clock: Arc<dyn Clock>,
}

impl DnsRefreshQueue {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(QueueInner::default()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `false` when the host is already queued or processing.
    pub fn enqueue(&self, domain: &str) -> bool {
        let host = canonical_host(domain);
        let mut inner = self.lock();
        if inner.queued.contains(&host) || inner.processing.contains(&host) {
            return false;
        }

        inner.queued.insert(host.clone());
        inner.pending.push_back(PendingHost {
            host,
            enqueued_at: self.clock.now_millis(),
        });
        true
    }

    /// Pops up to `max` hosts in FIFO order and marks them processing.
    pub fn take_batch(&self, max: usize) -> Vec<String> {
        let now = self.clock.now_millis();
        let mut inner = self.lock();
        let count = max.min(inner.pending.len());
        let mut batch = Vec::with_capacity(count);

        for _ in 0..count {
            let Some(entry) = inner.pending.pop_front() else {
                break;
            };
            inner.queued.remove(&entry.host);
            inner.processing.insert(entry.host.clone());
            debug!(
                domain = %entry.host,
                waited_ms = now.saturating_sub(entry.enqueued_at),
                "Dequeued host for DNS refresh"
            );
            batch.push(entry.host);
        }

        batch
    }

    pub fn complete(&self, domain: &str) {
        self.lock().processing.remove(&canonical_host(domain));
    }

    pub fn state_of(&self, domain: &str) -> QueueState {
        let host = canonical_host(domain);
        let inner = self.lock();
        if inner.processing.contains(&host) {
            QueueState::Processing
        } else if inner.queued.contains(&host) {
            QueueState::Queued
        } else {
            QueueState::Absent
        }
    }

    pub fn depth(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().processing.len()
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.pending.clear();
        inner.queued.clear();
    }
}
