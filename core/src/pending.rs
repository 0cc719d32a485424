//! Tickets for requests handed to the host, and "last request wins".
//!
//! A controller never waits on the network. It returns a `PendingRequest` and
//! later receives the outcome through its `complete` method together with the
//! ticket. Each controller owns a single `Latest` slot: issuing a new ticket
//! invalidates the previous one, so a result that arrives late is discarded
//! instead of overwriting newer state. Cancelling only means the result is
//! ignored; the physical request is not aborted.

use crate::http::HttpRequest;

/// Identifies one issued request of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A request the host has to execute, and the ticket to report back with.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// What `complete` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was superseded or cancelled; state is unchanged.
    Discarded,
}

/// Generation counter plus the one ticket whose result is still wanted.
#[derive(Debug, Clone, Default)]
pub(crate) struct Latest {
    generation: u64,
    outstanding: Option<u64>,
}

impl Latest {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.generation += 1;
        self.outstanding = Some(self.generation);
        Ticket(self.generation)
    }

    /// Consume `ticket` if it is the outstanding one.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        if self.outstanding == Some(ticket.0) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.outstanding = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }
}
