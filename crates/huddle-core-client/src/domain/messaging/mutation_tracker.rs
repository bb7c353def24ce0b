// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;

use huddle_wire::{IDProvider, TimeProvider};

use crate::app::deps::{DynIDProvider, DynTimeProvider};

use super::models::{MutationKind, MutationState, PendingMutation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("An identical request is already in flight")]
    DuplicateInFlight,
}

/// Tracks optimistic mutations between submission and the server's response.
/// Entries are removed as soon as they reach a terminal state, so the set only
/// ever contains what is actually in flight.
pub struct MutationTracker {
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
    ack_timeout: Duration,
    mutations: Mutex<Vec<PendingMutation>>,
}

impl MutationTracker {
    pub fn new(
        id_provider: DynIDProvider,
        time_provider: DynTimeProvider,
        ack_timeout: Duration,
    ) -> Self {
        MutationTracker {
            id_provider,
            time_provider,
            ack_timeout,
            mutations: Mutex::new(vec![]),
        }
    }

    /// Registers a new mutation and returns its client-generated correlation
    /// id. Fails when an identical mutation is still awaiting a response.
    pub fn begin(
        &self,
        kind: MutationKind,
        target: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Result<String, MutationError> {
        let fingerprint = fingerprint.into();
        let mut mutations = self.mutations.lock();

        if mutations
            .iter()
            .any(|mutation| mutation.fingerprint == fingerprint)
        {
            return Err(MutationError::DuplicateInFlight);
        }

        let client_id = self.id_provider.new_id();
        mutations.push(PendingMutation {
            client_id: client_id.clone(),
            kind,
            target: target.into(),
            fingerprint,
            submitted_at: self.time_provider.now(),
            state: MutationState::Pending,
        });
        Ok(client_id)
    }

    /// Discards a mutation that never made it onto the wire.
    pub fn abort(&self, client_id: &str) {
        self.mutations
            .lock()
            .retain(|mutation| mutation.client_id != client_id);
    }

    /// Resolves the mutation with the given client id as acknowledged.
    /// Resolves at most once. Acks for unknown ids return `None`.
    pub fn resolve_ack(&self, client_id: &str) -> Option<PendingMutation> {
        self.take(|mutation| mutation.client_id == client_id, MutationState::Acked)
    }

    /// Resolves the pending mutation of the given kind aimed at `target`.
    /// Used for mutations the server confirms through a broadcast rather than
    /// a dedicated ack.
    pub fn resolve_matching(&self, kind: MutationKind, target: &str) -> Option<PendingMutation> {
        self.take(
            |mutation| mutation.kind == kind && mutation.target == target,
            MutationState::Acked,
        )
    }

    /// Fails the mutation with the given client id, e.g. after a server error.
    pub fn fail(&self, client_id: &str) -> Option<PendingMutation> {
        self.take(
            |mutation| mutation.client_id == client_id,
            MutationState::Failed,
        )
    }

    pub fn fail_matching(&self, kind: MutationKind, target: &str) -> Option<PendingMutation> {
        self.take(
            |mutation| mutation.kind == kind && mutation.target == target,
            MutationState::Failed,
        )
    }

    /// Fails every mutation of the given kinds whose ack has been outstanding
    /// for longer than the configured timeout and returns them. Each handler
    /// expires the kinds it knows how to undo.
    pub fn fail_expired(&self, now: DateTime<Utc>, kinds: &[MutationKind]) -> Vec<PendingMutation> {
        let timeout = chrono::Duration::from_std(self.ack_timeout)
            .unwrap_or_else(|_| chrono::Duration::seconds(10));
        let mut mutations = self.mutations.lock();

        let mut expired = vec![];
        mutations.retain(|mutation| {
            if !kinds.contains(&mutation.kind)
                || now.signed_duration_since(mutation.submitted_at) < timeout
            {
                return true;
            }
            let mut mutation = mutation.clone();
            mutation.state = MutationState::Failed;
            expired.push(mutation);
            false
        });
        expired
    }

    pub fn pending_count(&self) -> usize {
        self.mutations.lock().len()
    }

    pub fn clear(&self) {
        self.mutations.lock().clear()
    }

    fn take(
        &self,
        predicate: impl Fn(&PendingMutation) -> bool,
        state: MutationState,
    ) -> Option<PendingMutation> {
        let mut mutations = self.mutations.lock();
        let idx = mutations.iter().position(predicate)?;
        let mut mutation = mutations.remove(idx);
        mutation.state = state;
        Some(mutation)
    }
}
