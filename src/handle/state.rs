//! Handle lifecycle state machine.
//!
//! Call-order enforcement is centralized here: every public handle method
//! asks for the transition matching its operation and either gets the target
//! state or a typed rejection, before any network byte is sent. The caller
//! commits the returned state only once the operation itself succeeded.

use crate::error::{RelockError, Result};

/// Lifecycle state of a lock handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Freshly constructed, no setter called yet.
    Created,
    /// At least one setter applied, resource not locked.
    Configured,
    /// The resource is locked.
    Locked,
    /// The resource was locked and has been released; the handle is reusable.
    Unlocked,
    /// The handle was freed; only `free()` remains legal.
    Freed,
}

/// Operation requested on a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOp {
    /// Any configuration setter.
    Configure,
    /// Any getter.
    Inspect,
    /// `lock()`.
    Lock,
    /// `unlock()` or `unlock_rollback()`.
    Unlock,
    /// `free()`.
    Free,
}

impl HandleState {
    /// Compute the state this operation would lead to, or a typed rejection.
    ///
    /// Rejections: any operation but `Free` on a freed handle is
    /// `ObjCorrupted`; an operation from the wrong lifecycle point is
    /// `ApiInvalidSequence`. `Free` is legal from every state.
    pub fn transition(self, op: HandleOp) -> Result<HandleState> {
        use HandleOp::*;
        use HandleState::*;

        match (self, op) {
            (_, Free) => Ok(Freed),
            (Freed, _) => Err(RelockError::ObjCorrupted),

            (Created, Configure) => Ok(Configured),
            (state, Configure) => Ok(state),
            (state, Inspect) => Ok(state),

            (Created | Configured | Unlocked, Lock) => Ok(Locked),
            (Locked, Lock) => Err(RelockError::ApiInvalidSequence(
                "lock() called while the resource is already locked".to_string(),
            )),

            (Locked, Unlock) => Ok(Unlocked),
            (_, Unlock) => Err(RelockError::ApiInvalidSequence(
                "unlock() requires a locked handle".to_string(),
            )),
        }
    }
}
