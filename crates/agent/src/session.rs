//! Session Management
//!
//! A session owns one reservation draft and the cross-turn state its date
//! validators share. The registry keeps sessions in memory, keyed by a
//! random id, and is safe to share between threads.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use reservation_core::SlotName;

use crate::dst::{CrossTurnState, ReservationDraft};
use crate::form::{ReservationFormValidator, ValidationOutcome};
use crate::{AgentError, Result};

/// One reservation conversation
#[derive(Debug, Clone)]
pub struct ReservationSession {
    id: String,
    validator: Arc<ReservationFormValidator>,
    draft: ReservationDraft,
    state: CrossTurnState,
}

impl ReservationSession {
    pub fn new(id: impl Into<String>, validator: Arc<ReservationFormValidator>) -> Self {
        Self {
            id: id.into(),
            validator,
            draft: ReservationDraft::new(),
            state: CrossTurnState::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn state(&self) -> &CrossTurnState {
        &self.state
    }

    /// Validate an answer relative to the local date and store the result
    pub fn submit(&mut self, slot: SlotName, text: &str) -> Result<ValidationOutcome> {
        self.submit_at(slot, text, chrono::Local::now().date_naive())
    }

    /// Validate an answer relative to `today` and store the result
    ///
    /// An accepted value fills the slot; a rejection clears it.
    pub fn submit_at(
        &mut self,
        slot: SlotName,
        text: &str,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let outcome = self.validator.validate_at(slot, text, &mut self.state, today)?;
        self.draft.set(slot, outcome.value.clone());
        Ok(outcome)
    }

    /// Clear every slot and the cross-turn state
    pub fn reset(&mut self) {
        self.draft.clear();
        self.state.clear();
        tracing::info!(session_id = %self.id, "Session reset");
    }
}

/// Thread-safe in-memory session map
#[derive(Debug)]
pub struct SessionRegistry {
    validator: Arc<ReservationFormValidator>,
    sessions: RwLock<HashMap<String, ReservationSession>>,
}

impl SessionRegistry {
    pub fn new(validator: ReservationFormValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session with a fresh id
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let session = ReservationSession::new(id.clone(), Arc::clone(&self.validator));
        self.sessions.write().insert(id.clone(), session);
        tracing::info!(session_id = %id, "Session created");
        id
    }

    /// Validate and store an answer relative to the local date
    pub fn submit(&self, id: &str, slot: SlotName, text: &str) -> Result<ValidationOutcome> {
        self.submit_at(id, slot, text, chrono::Local::now().date_naive())
    }

    /// Validate and store an answer relative to `today`
    pub fn submit_at(
        &self,
        id: &str,
        slot: SlotName,
        text: &str,
        today: NaiveDate,
    ) -> Result<ValidationOutcome> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AgentError::UnknownSession(id.to_string()))?;
        session.submit_at(slot, text, today)
    }

    pub fn reset(&self, id: &str) -> Result<()> {
        self.sessions
            .write()
            .get_mut(id)
            .map(ReservationSession::reset)
            .ok_or_else(|| AgentError::UnknownSession(id.to_string()))
    }

    /// Snapshot of a session's draft
    pub fn draft(&self, id: &str) -> Option<ReservationDraft> {
        self.sessions.read().get(id).map(|s| s.draft().clone())
    }

    /// Snapshot of a session's cross-turn state
    pub fn state(&self, id: &str) -> Option<CrossTurnState> {
        self.sessions.read().get(id).map(|s| s.state().clone())
    }

    pub fn remove(&self, id: &str) -> Option<ReservationSession> {
        let removed = self.sessions.write().remove(id);
        if removed.is_some() {
            tracing::debug!(session_id = %id, "Session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(ReservationFormValidator::new())
    }
}
