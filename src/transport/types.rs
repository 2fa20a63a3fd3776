//! Wire value types exchanged with the daemon.

use crate::resource::LockMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved daemon endpoint.
///
/// Resolution order in the handle: explicit unicast address, else local
/// socket, else multicast discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// UNIX socket on the local host.
    Local {
        /// Socket path.
        socket_name: String,
    },
    /// TCP unicast.
    Tcp {
        /// Daemon address (name or IP literal).
        address: String,
        /// Daemon port.
        port: u16,
    },
    /// UDP multicast discovery probe.
    Multicast {
        /// Multicast group address.
        address: String,
        /// Multicast port.
        port: u16,
        /// TTL of discovery datagrams.
        ttl: u8,
        /// Interface for link-local IPv6 scopes; empty when unspecified.
        interface: String,
    },
}

/// Operation requested from the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOp {
    /// Obtain the lock.
    Lock,
    /// Release the lock, committing any transactional effect.
    Unlock,
    /// Release the lock, rolling back the transactional effect.
    UnlockRollback,
}

/// Wait policy derived from the configured resource timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// Fail immediately when the resource is busy.
    NoWait,
    /// Wait up to the given number of milliseconds.
    WaitMs(u64),
    /// Wait until the lock is granted.
    WaitForever,
}

impl WaitPolicy {
    /// Derive the policy from a resource timeout value: 0 = no wait,
    /// >0 = bounded wait in milliseconds, <0 = unbounded wait.
    pub fn from_timeout_ms(timeout_ms: i64) -> Self {
        match timeout_ms {
            0 => WaitPolicy::NoWait,
            ms if ms > 0 => WaitPolicy::WaitMs(ms as u64),
            _ => WaitPolicy::WaitForever,
        }
    }
}

/// One request sent to the daemon per lock/unlock attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// The operation.
    pub op: RequestOp,

    /// Raw resource name; the daemon re-derives the resource type from it.
    pub resource: String,

    /// Requested lock mode.
    pub mode: LockMode,

    /// Units requested from the pool; only sent for numeric resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Whether the daemon may create the resource on demand.
    pub create: bool,

    /// Wait policy for a contended lock.
    pub wait: WaitPolicy,

    /// Daemon-side idle garbage-collection hint in milliseconds.
    pub idle_lifespan_ms: u64,

    /// Session correlation id; echoed back on release requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Requesting principal, `user@host`.
    pub requestor: String,

    /// Timestamp when the request was issued (RFC3339).
    pub issued_at: DateTime<Utc>,
}

/// Daemon answer to a lock/unlock request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockResponse {
    /// Outcome of the request.
    pub status: LockStatus,

    /// Granted element name; only present for set resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    /// Unique id of the daemon session, echoed on release for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

/// Outcome reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    /// The lock was granted.
    Granted,
    /// The lock was refused for a reason other than contention.
    Denied,
    /// The resource has no free capacity for this request.
    Busy,
    /// The request was queued behind the current holder.
    Enqueued,
    /// A release request completed.
    Released,
}

impl LockResponse {
    /// Shorthand for a granted response.
    pub fn granted(element: Option<&str>, unique_id: Option<&str>) -> Self {
        Self {
            status: LockStatus::Granted,
            element: element.map(str::to_string),
            unique_id: unique_id.map(str::to_string),
        }
    }

    /// Shorthand for a bare status response.
    pub fn status(status: LockStatus) -> Self {
        Self {
            status,
            element: None,
            unique_id: None,
        }
    }
}

/// Get the requestor string for lock requests.
pub(crate) fn requestor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
