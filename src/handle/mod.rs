//! The client-side lock handle.
//!
//! A [`LockHandle`] is the object an application creates, configures and
//! drives through lock/unlock operations against a remote lock daemon it
//! never touches directly. The handle owns its configuration, enforces the
//! call-order state machine before a single network byte is sent, translates
//! `lock()`/`unlock()`/`unlock_rollback()` into requests for the opaque
//! transport collaborator, and interprets responses into typed results.
//!
//! One handle means one logical holder and one daemon dialogue: a handle is
//! not safe for concurrent use from multiple threads without external
//! synchronization. Independent handles may be driven concurrently; they
//! share nothing.
//!
//! # Example
//!
//! ```no_run
//! use relock::{LockHandle, Transport};
//!
//! fn run(transport: Box<dyn Transport>) -> relock::Result<()> {
//!     let mut handle = LockHandle::new(transport);
//!     handle.set_resource_name("red.blue.green")?;
//!     handle.set_socket_name("/tmp/relockd.sock")?;
//!     handle.lock()?;
//!     // ... critical section ...
//!     handle.unlock()?;
//!     handle.free()
//! }
//! ```

mod accessors;
mod operations;
mod state;

#[cfg(test)]
mod tests;

// Re-export public API
pub use state::{HandleOp, HandleState};

use crate::config::HandleConfig;
use crate::transport::{Connection, Transport};

/// Outcome of a configuration setter that can be softly rejected.
///
/// `ImmutableIgnored` is reported when the resource name is changed after the
/// handle has issued any request over the transport: the call is accepted,
/// the stored value stays as it was, and no error is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    /// The value was validated and stored.
    Applied,
    /// The property is immutable at this point; the previous value stands.
    ImmutableIgnored,
}

/// Client-side handle for one lockable resource.
pub struct LockHandle {
    state: HandleState,
    config: HandleConfig,
    transport: Box<dyn Transport>,
    connection: Option<Box<dyn Connection>>,
    /// Set the instant the first request goes over the transport; freezes the
    /// resource name.
    dialogue_started: bool,
    /// Element granted by the daemon; only set for set resources while locked.
    locked_element: Option<String>,
    /// Unique id of the daemon session, echoed on release for correlation.
    session_id: Option<String>,
}

impl LockHandle {
    /// Create a handle with default configuration.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            state: HandleState::Created,
            config: HandleConfig::default(),
            transport,
            connection: None,
            dialogue_started: false,
            locked_element: None,
            session_id: None,
        }
    }

    /// Create a handle from an existing configuration.
    ///
    /// The configuration is validated as a whole; a handle is never
    /// constructed around invalid values.
    pub fn with_config(
        transport: Box<dyn Transport>,
        config: HandleConfig,
    ) -> crate::error::Result<Self> {
        config.validate()?;
        let mut handle = Self::new(transport);
        handle.config = config;
        handle.state = HandleState::Configured;
        Ok(handle)
    }

    /// The current lifecycle state.
    pub fn state(&self) -> HandleState {
        self.state
    }
}

impl std::fmt::Debug for LockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockHandle")
            .field("state", &self.state)
            .field("resource_name", &self.config.resource_name)
            .field("dialogue_started", &self.dialogue_started)
            .field("locked_element", &self.locked_element)
            .finish()
    }
}

impl Drop for LockHandle {
    /// Fallback finalization: the same teardown as `free()`, guaranteed not
    /// to panic and a no-op when the handle was already freed. Dropping a
    /// locked handle does not unlock; releasing is the caller's job.
    fn drop(&mut self) {
        let _ = self.free();
    }
}
