//! Orchestration layer: owns the two loaded collections and the latest
//! comparison, so the engine itself stays stateless.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::compare::ComparePolicy;
use crate::engine::reconcile;
use crate::error::{ReconError, Side};
use crate::index::{DuplicatePolicy, KeyedIndex};
use crate::model::{Comparison, TxRecord};

#[derive(Default)]
struct SessionState {
    internal: Vec<TxRecord>,
    provider: Vec<TxRecord>,
    last: Option<Comparison>,
}

/// Holds both source collections across invocations; every `compare` call
/// reconciles them from scratch.
pub struct ReconSession {
    duplicates: DuplicatePolicy,
    policy: ComparePolicy,
    // Single-slot guard: compare() refuses re-entrant invocation instead of
    // queueing behind the state lock.
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

impl ReconSession {
    pub fn new(duplicates: DuplicatePolicy, policy: ComparePolicy) -> Self {
        Self {
            duplicates,
            policy,
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Replace the internal collection. Invalidates the previous result.
    pub fn load_internal(&self, records: Vec<TxRecord>) {
        let mut state = self.state.lock().expect("session state poisoned");
        state.internal = records;
        state.last = None;
    }

    /// Replace the provider collection. Invalidates the previous result.
    pub fn load_provider(&self, records: Vec<TxRecord>) {
        let mut state = self.state.lock().expect("session state poisoned");
        state.provider = records;
        state.last = None;
    }

    /// Drop both collections and the latest result.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("session state poisoned");
        *state = SessionState::default();
    }

    /// The most recent comparison, if one has been run since the last load.
    pub fn last(&self) -> Option<Comparison> {
        self.state.lock().expect("session state poisoned").last.clone()
    }

    /// Build both indices and run the engine, storing and returning the
    /// result. Refuses with `Busy` while another comparison is in flight,
    /// and with `Precondition` before any indexing work when a side is
    /// empty.
    pub fn compare(&self) -> Result<Comparison, ReconError> {
        if self.busy.swap(true, Ordering::Acquire) {
            return Err(ReconError::Busy);
        }
        let result = self.compare_inner();
        self.busy.store(false, Ordering::Release);
        result
    }

    fn compare_inner(&self) -> Result<Comparison, ReconError> {
        let mut state = self.state.lock().expect("session state poisoned");

        if state.internal.is_empty() {
            return Err(ReconError::Precondition { side: Side::Internal });
        }
        if state.provider.is_empty() {
            return Err(ReconError::Precondition { side: Side::Provider });
        }

        let internal =
            KeyedIndex::build(Side::Internal, state.internal.clone(), self.duplicates)?;
        let provider =
            KeyedIndex::build(Side::Provider, state.provider.clone(), self.duplicates)?;

        let comparison = reconcile(&internal, &provider, &self.policy)?;
        state.last = Some(comparison.clone());
        Ok(comparison)
    }

    #[cfg(test)]
    fn mark_busy(&self) -> bool {
        self.busy.swap(true, Ordering::Acquire)
    }
}
