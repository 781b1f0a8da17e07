//! In-flight request guards
//!
//! Every station that calls out to a collaborator owns one guard. The guard
//! enforces at most one pending request per station, and its sequence number
//! is the stale-response key: a completion whose ticket is no longer current
//! is dropped instead of applied to state the user has since left.

use crate::errors::AppError;

/// Handle for one outstanding collaborator request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    /// The station that issued the request
    pub station: &'static str,
    /// Sequence number at issue time
    pub seq: u64,
}

/// Per-station duplicate-submit and stale-response guard.
#[derive(Debug)]
pub struct RequestGuard {
    station: &'static str,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl RequestGuard {
    /// Create a guard for a named station.
    pub fn new(station: &'static str) -> Self {
        Self {
            station,
            next_seq: 0,
            in_flight: None,
        }
    }

    /// True while a request is awaiting its result.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Issue a ticket for a new request.
    ///
    /// Rejects a second submit while one is pending.
    pub fn begin(&mut self) -> Result<RequestTicket, AppError> {
        if self.in_flight.is_some() {
            return Err(AppError::Busy {
                station: self.station,
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        Ok(RequestTicket {
            station: self.station,
            seq,
        })
    }

    /// Try to settle a completed request.
    ///
    /// Returns true and clears the pending slot when the ticket is the
    /// current one; returns false for stale or foreign tickets, whose
    /// results must not be applied.
    pub fn try_settle(&mut self, ticket: RequestTicket) -> bool {
        if ticket.station == self.station && self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
            true
        } else {
            tracing::warn!(
                station = self.station,
                ticket_station = ticket.station,
                ticket_seq = ticket.seq,
                "dropping stale response"
            );
            false
        }
    }

    /// Abandon the pending request, if any.
    ///
    /// The eventual completion will fail `try_settle` and be dropped.
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }
}
