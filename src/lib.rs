//! Relock: client-side lock handle for a distributed lock daemon.
//!
//! Client processes obtain named, possibly hierarchical or multi-unit locks
//! brokered by a separate daemon reachable over a local socket, TCP unicast
//! or UDP multicast discovery. This crate is the client half only: the
//! [`LockHandle`] an application creates, configures and drives through
//! lock/unlock operations. The daemon, the wire dialogue and the TLS
//! handshake live behind the [`Transport`] trait.
//!
//! The handle enforces a strict call-order state machine before any network
//! byte is sent, derives the resource type (simple, hierarchical, numeric,
//! set, transactional or not) purely from the resource name, mirrors the DLM
//! lock-mode compatibility matrix for local validation, and reports every
//! outcome through one flat reason-code taxonomy shared with the daemon.

pub mod config;
pub mod error;
pub mod handle;
pub mod reason_codes;
pub mod resource;
pub mod transport;

mod trace;

#[cfg(test)]
mod test_support;

pub use config::{HandleConfig, TlsConfig};
pub use error::{RelockError, Result};
pub use handle::{HandleState, LockHandle, SetStatus};
pub use resource::{LockMode, ResourceAddress, ResourceKind};
pub use transport::{
    Connection, Endpoint, LockResponse, LockStatus, RequestOp, ResourceRequest, Transport,
    WaitPolicy,
};
