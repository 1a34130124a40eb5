//! Operation state machine.
//!
//! One logical upload/validate operation moves through
//! `Idle → Inspecting → Uploading → Submitting → Completed | Failed`.
//! `Inspecting` is skipped for non-archive uploads. Terminal states are
//! final: a new user action starts a fresh tracker from `Idle`.
//!
//! The rendering layer observes transitions through watch channels and
//! never mutates operation state itself.

use geovalid_core::models::UploadProgress;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    Inspecting,
    Uploading,
    Submitting,
    Completed,
    Failed { reason: String },
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Completed | OperationState::Failed { .. })
    }
}

fn transition_allowed(from: &OperationState, to: &OperationState) -> bool {
    use OperationState::*;
    match (from, to) {
        (Idle, Inspecting) | (Idle, Uploading) => true,
        (Inspecting, Uploading) => true,
        (Uploading, Submitting) => true,
        (Submitting, Completed) => true,
        // any non-terminal state can fail
        (from, Failed { .. }) => !from.is_terminal(),
        _ => false,
    }
}

/// Tracks one operation's state and upload progress.
pub struct OperationTracker {
    state_tx: watch::Sender<OperationState>,
    progress_tx: Arc<watch::Sender<UploadProgress>>,
}

impl OperationTracker {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(OperationState::Idle);
        let (progress_tx, _) = watch::channel(UploadProgress::default());
        OperationTracker {
            state_tx,
            progress_tx: Arc::new(progress_tx),
        }
    }

    pub fn state(&self) -> OperationState {
        self.state_tx.borrow().clone()
    }

    pub fn progress(&self) -> UploadProgress {
        *self.progress_tx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<OperationState> {
        self.state_tx.subscribe()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<UploadProgress> {
        self.progress_tx.subscribe()
    }

    /// Sender handle used by concurrent upload tasks to publish progress.
    pub(crate) fn progress_sender(&self) -> Arc<watch::Sender<UploadProgress>> {
        Arc::clone(&self.progress_tx)
    }

    fn set_state(&self, next: OperationState) {
        let current = self.state();
        if !transition_allowed(&current, &next) {
            tracing::warn!(?current, ?next, "Ignoring illegal operation state transition");
            return;
        }
        // send_replace: the value must update even with no subscribers yet
        self.state_tx.send_replace(next);
    }

    pub fn begin_inspecting(&self) {
        self.set_state(OperationState::Inspecting);
    }

    pub fn begin_uploading(&self, total: usize) {
        self.progress_tx.send_replace(UploadProgress::new(0, total));
        self.set_state(OperationState::Uploading);
    }

    pub fn begin_submitting(&self) {
        self.set_state(OperationState::Submitting);
    }

    pub fn complete(&self) {
        self.set_state(OperationState::Completed);
    }

    pub fn fail(&self, reason: impl Into<String>) {
        self.set_state(OperationState::Failed {
            reason: reason.into(),
        });
    }
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new()
    }
}
