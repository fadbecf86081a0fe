use crate::state::{Operation, State};

/// An operation was attempted in a state that does not allow it.
///
/// The watch is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{operation} method is not supported in {state} state")]
pub struct TransitionError {
    pub operation: Operation,
    pub state: State,
}

impl TransitionError {
    pub fn new(operation: Operation, state: State) -> Self {
        Self { operation, state }
    }
}

/// Builds the error for a transition that was just refused, and logs it.
pub(crate) fn reject(operation: Operation, state: State) -> TransitionError {
    tracing::warn!(%operation, %state, "rejected stopwatch transition");
    TransitionError::new(operation, state)
}
