//! Debounced patient search.
//!
//! Each keystroke bumps a generation counter and yields a ticket; the
//! caller sleeps [`SEARCH_DEBOUNCE`], drops the ticket if a newer
//! keystroke arrived meanwhile, and otherwise runs the query and hands
//! the results back with the ticket. Responses from stale generations
//! are discarded, never applied — an in-flight call from an older query
//! can never overwrite the results of a newer one.

use std::time::Duration;

use tracing::debug;

use odonto_core::models::patient::Patient;

/// Pause after the last keystroke before a query fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear the results without a call.
pub const MIN_QUERY_LEN: usize = 2;

/// Result lists are capped for the picker.
pub const MAX_RESULTS: usize = 20;

/// Identifies the keystroke generation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct PatientSearch {
    query: String,
    generation: u64,
    results: Vec<Patient>,
}

impl PatientSearch {
    /// Register a keystroke. Returns a ticket when the query is long
    /// enough to search; otherwise clears the results and returns
    /// `None`. Either way the previous generation is invalidated.
    pub fn input(&mut self, query: &str) -> Option<SearchTicket> {
        self.generation += 1;
        self.query = query.trim().to_string();
        if self.query.chars().count() < MIN_QUERY_LEN {
            self.results.clear();
            return None;
        }
        Some(SearchTicket(self.generation))
    }

    /// The query a ticket holder should send.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a ticket still belongs to the latest keystroke. Checked
    /// after the debounce sleep (cancel-and-restart) and again before
    /// applying results.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a response. Stale tickets are discarded and leave the
    /// results untouched; current ones are filtered to active patients
    /// and capped at [`MAX_RESULTS`]. Returns whether anything was
    /// applied.
    pub fn apply(&mut self, ticket: SearchTicket, found: Vec<Patient>) -> bool {
        if !self.is_current(ticket) {
            debug!(generation = ticket.0, "discarding stale search response");
            return false;
        }
        self.results = found.into_iter().filter(|p| p.active).take(MAX_RESULTS).collect();
        true
    }

    pub fn results(&self) -> &[Patient] {
        &self.results
    }

    /// Picking a patient ends the search: query and results reset and
    /// any in-flight response becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.query.clear();
        self.results.clear();
    }
}
