//! Request lifecycle tracking for generation calls.
//!
//! # Responsibility
//! - Let the UI tell "in flight", "failed" and "succeeded" apart.
//! - Drop completions that belong to a superseded request.
//!
//! # Invariants
//! - Only the newest ticket may complete a slot.
//! - A failure is logged once, at this boundary, and replaces the state
//!   with `Failed`; earlier results are never shown as current.

use crate::assistant::AssistantError;
use crate::logging::summarize_for_log;
use log::{debug, error};
use std::future::Future;

const MAX_LOGGED_ERROR_CHARS: usize = 240;

/// Visible state of one generation slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState<T> {
    /// Nothing requested yet.
    Idle,
    InFlight,
    Succeeded(T),
    /// Failed with a user-presentable message.
    Failed(String),
}

/// Handle identifying one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

/// One generation slot, e.g. the caption panel of the instagram tool.
#[derive(Debug)]
pub struct GenerationSlot<T> {
    operation: &'static str,
    state: GenerationState<T>,
    issued: u64,
}

impl<T> GenerationSlot<T> {
    /// Creates an idle slot; `operation` names it in log events.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            state: GenerationState::Idle,
            issued: 0,
        }
    }

    pub fn state(&self) -> &GenerationState<T> {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, GenerationState::InFlight)
    }

    /// The current successful result, if the last request succeeded.
    pub fn result(&self) -> Option<&T> {
        match &self.state {
            GenerationState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Marks a new request as in flight and returns its ticket.
    pub fn begin(&mut self) -> GenerationTicket {
        self.issued += 1;
        self.state = GenerationState::InFlight;
        GenerationTicket(self.issued)
    }

    /// Records the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when a newer request has started
    /// since `ticket` was issued.
    pub fn complete(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<T, AssistantError>,
    ) -> bool {
        if ticket.0 != self.issued {
            debug!(
                "event=ai_generate module=assistant status=skipped reason=stale_ticket operation={} ticket={}",
                self.operation, ticket.0
            );
            return false;
        }

        self.state = match outcome {
            Ok(value) => {
                debug!(
                    "event=ai_generate module=assistant status=ok operation={}",
                    self.operation
                );
                GenerationState::Succeeded(value)
            }
            Err(err) => {
                let message = err.to_string();
                error!(
                    "event=ai_generate module=assistant status=error operation={} error={}",
                    self.operation,
                    summarize_for_log(&message, MAX_LOGGED_ERROR_CHARS)
                );
                GenerationState::Failed(message)
            }
        };
        true
    }

    /// Returns the slot to `Idle`, invalidating outstanding tickets.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.state = GenerationState::Idle;
    }

    /// Runs one request to completion through this slot.
    pub async fn run<F>(&mut self, request: F) -> &GenerationState<T>
    where
        F: Future<Output = Result<T, AssistantError>>,
    {
        let ticket = self.begin();
        let outcome = request.await;
        self.complete(ticket, outcome);
        &self.state
    }
}
