//! Transport collaborator contract.
//!
//! The handle never touches the wire itself: it resolves an [`Endpoint`]
//! from its configuration, asks a [`Transport`] for a [`Connection`], and
//! exchanges [`ResourceRequest`]/[`LockResponse`] values over it. Everything
//! below that line (socket dialogue, marshalling, TLS handshake mechanics)
//! belongs to the transport implementation.
//!
//! # Failure modes
//!
//! `connect` surfaces refused/unreachable endpoints as `Connect` errors and
//! handshake problems in the TLS band; `request` surfaces `Send`/`Recv`/
//! `Timeout`/`ConnectionClosed` for socket-level trouble and `Protocol`/
//! `MsgDeserialize` for malformed answers. TLS failures never silently
//! downgrade to plaintext.

mod types;


// Re-export public API
pub use types::{Endpoint, LockResponse, LockStatus, RequestOp, ResourceRequest, WaitPolicy};

pub(crate) use types::requestor_string;

use crate::config::TlsConfig;
use crate::error::Result;
use std::time::Duration;

/// Factory for daemon connections.
pub trait Transport {
    /// Open a connection to the daemon behind `endpoint`.
    ///
    /// `tls` is only ever `Some` for unicast endpoints with security
    /// configured.
    fn connect(&self, endpoint: &Endpoint, tls: Option<&TlsConfig>) -> Result<Box<dyn Connection>>;
}

/// One established daemon dialogue.
pub trait Connection {
    /// Send a request and read the daemon's immediate answer.
    fn request(&mut self, request: &ResourceRequest) -> Result<LockResponse>;

    /// Block until an enqueued lock is resolved, up to `bound`
    /// (`None` = wait forever). A `Timeout` error means the bound expired
    /// with the request still enqueued.
    fn wait_granted(&mut self, bound: Option<Duration>) -> Result<LockResponse>;

    /// Close the dialogue. Safe to call once; the handle never calls it twice.
    fn close(&mut self) -> Result<()>;
}
