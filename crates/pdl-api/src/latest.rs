//! Guard against applying a stale fetch result.
//!
//! Independent fetches resolve in any order and there is no cancellation:
//! a caller that has moved on must discard the late result rather than
//! apply it. Each new request takes a ticket; only the ticket from the most
//! recent request is accepted.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct LatestOnly {
    generation: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every outstanding one.
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { generation }
    }

    /// Accept a result only if its ticket is still the current request.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.generation.load(Ordering::SeqCst) == ticket.generation {
            Some(value)
        } else {
            None
        }
    }
}
