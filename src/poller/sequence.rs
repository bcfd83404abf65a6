//! Request sequencing for overlapping poll cycles.
//!
//! Each cycle takes a [`Ticket`] before its request goes out. A response may
//! only be applied if its ticket is newer than the last one applied, so a slow
//! response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets. Starts at 1.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

/// A value together with the ticket of the response last applied to it.
#[derive(Debug, Default)]
pub struct Sequenced<T> {
    applied: Option<Ticket>,
    value: T,
}

impl<T> Sequenced<T> {
    pub fn new(value: T) -> Self {
        Self {
            applied: None,
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn applied(&self) -> Option<Ticket> {
        self.applied
    }

    /// Run `update` if `ticket` is newer than the last applied ticket.
    ///
    /// Returns whether the update ran.
    pub fn apply_if_newer(&mut self, ticket: Ticket, update: impl FnOnce(&mut T)) -> bool {
        if self.applied.is_some_and(|last| ticket <= last) {
            return false;
        }
        update(&mut self.value);
        self.applied = Some(ticket);
        true
    }
}
