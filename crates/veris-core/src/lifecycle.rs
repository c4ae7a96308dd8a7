// crates/veris-core/src/lifecycle.rs
//
// Per-entity lifecycle tracking for nodes and claim ingestion.
//
// Lifecycle: Initial -> Validated -> Processing -> Completed, with a
// terminal Error state reachable from anywhere. The transition table is an
// explicit function rather than a runtime-registered callback machine, so
// illegal transitions are unrepresentable results instead of hook failures.
// The tracker exists to make partial-failure states observable (a claim
// that failed mid-ingestion is distinguishable from one never attempted),
// not to gate business logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VerisError;

/// Lifecycle states of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Created, not yet structurally checked.
    Initial,
    /// Structural checks passed.
    Validated,
    /// Submitted to the graph for indexing.
    Processing,
    /// Indexed successfully. Terminal.
    Completed,
    /// A failure occurred at any prior stage. Terminal.
    Error,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LifecycleState::Initial => "initial",
            LifecycleState::Validated => "validated",
            LifecycleState::Processing => "processing",
            LifecycleState::Completed => "completed",
            LifecycleState::Error => "error",
        };
        f.write_str(tag)
    }
}

/// Events driving lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Validate,
    Process,
    Complete,
    Fail,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LifecycleEvent::Validate => "validate",
            LifecycleEvent::Process => "process",
            LifecycleEvent::Complete => "complete",
            LifecycleEvent::Fail => "fail",
        };
        f.write_str(tag)
    }
}

/// The full transition table.
///
/// Returns the destination state if `event` is legal from `from`, `None`
/// otherwise. No transition may be skipped; `Completed` and `Error` have no
/// outgoing transitions.
pub fn can_transition(from: LifecycleState, event: LifecycleEvent) -> Option<LifecycleState> {
    use LifecycleEvent::*;
    use LifecycleState::*;
    match (from, event) {
        (Initial, Validate) => Some(Validated),
        (Validated, Process) => Some(Processing),
        (Processing, Complete) => Some(Completed),
        (Initial | Validated | Processing, Fail) => Some(Error),
        _ => None,
    }
}

/// Tracks one entity's lifecycle state and, on failure, the cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleTracker {
    state: LifecycleState,
    /// Set when the `Fail` event fires; the message of the causing error.
    failure: Option<String>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Initial,
            failure: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Whether the entity has reached a terminal state.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Completed | LifecycleState::Error
        )
    }

    /// Apply an event, advancing the state.
    ///
    /// Returns `InvalidTransition` if the event is not legal from the
    /// current state.
    pub fn apply(&mut self, event: LifecycleEvent) -> Result<LifecycleState, VerisError> {
        match can_transition(self.state, event) {
            Some(next) => {
                self.state = next;
                Ok(next)
            }
            None => Err(VerisError::InvalidTransition {
                from: self.state.to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Shorthand for the `Fail` event, recording the causing error message.
    pub fn fail(&mut self, cause: impl Into<String>) -> Result<LifecycleState, VerisError> {
        let next = self.apply(LifecycleEvent::Fail)?;
        self.failure = Some(cause.into());
        Ok(next)
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
