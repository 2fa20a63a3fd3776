//! HandleConfig struct definition and default implementation.

use crate::error::{RelockError, Result};
use crate::resource::LockMode;
use serde::{Deserialize, Serialize};

/// Configuration owned by a lock handle.
///
/// String-typed endpoint and TLS fields use the empty string for "unset";
/// getters on the handle therefore never return an absent value. Unknown
/// fields in a YAML rendition are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    // =========================================================================
    // Transport selection
    // =========================================================================
    /// UNIX socket name for local daemon communication.
    pub socket_name: String,

    /// TCP unicast address of the daemon; takes precedence over the socket.
    pub unicast_address: String,

    /// TCP unicast port.
    #[serde(default = "default_port")]
    pub unicast_port: u16,

    /// UDP multicast address used for daemon discovery.
    pub multicast_address: String,

    /// UDP multicast port.
    #[serde(default = "default_port")]
    pub multicast_port: u16,

    /// Network interface for link-local IPv6 multicast.
    pub network_interface: String,

    // =========================================================================
    // Discovery tuning
    // =========================================================================
    /// Number of multicast discovery attempts before giving up.
    #[serde(default = "default_discovery_attempts")]
    pub discovery_attempts: u32,

    /// Milliseconds between discovery attempts.
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u32,

    /// TTL of discovery datagrams (0-255).
    #[serde(default = "default_discovery_ttl")]
    pub discovery_ttl: u8,

    // =========================================================================
    // Resource parameters
    // =========================================================================
    /// Name of the resource to lock; parsed into a resource address on use.
    #[serde(default = "default_resource_name")]
    pub resource_name: String,

    /// Whether the daemon may create the resource on demand.
    #[serde(default = "default_true")]
    pub resource_create: bool,

    /// Wait bound for a contended lock: 0 = no wait, >0 = milliseconds,
    /// <0 = unbounded wait.
    #[serde(default = "default_resource_timeout_ms")]
    pub resource_timeout_ms: i64,

    /// Units requested from a numeric resource pool.
    #[serde(default = "default_resource_quantity")]
    pub resource_quantity: u32,

    /// Daemon-side idle garbage-collection hint in milliseconds.
    pub resource_idle_lifespan_ms: u64,

    /// DLM lock mode requested at lock time.
    pub lock_mode: LockMode,

    // =========================================================================
    // Security
    // =========================================================================
    /// Path to the client TLS certificate.
    pub tls_certificate: String,

    /// Path to the client TLS private key.
    pub tls_private_key: String,

    /// Path to the CA certificate used to verify the daemon.
    pub tls_ca_certificate: String,

    /// Whether the daemon's unique id must match its certificate CN.
    pub tls_check_peer_id: bool,

    // =========================================================================
    // Diagnostics
    // =========================================================================
    /// Append-only trace file; empty disables tracing.
    pub trace_filename: String,
}

/// TLS material handed to the transport when unicast security is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to the client certificate.
    pub certificate: String,
    /// Path to the client private key.
    pub private_key: String,
    /// Path to the CA certificate.
    pub ca_certificate: String,
    /// Whether the peer's unique id must be verified.
    pub check_peer_id: bool,
}

pub(crate) fn default_port() -> u16 {
    28015
}

pub(crate) fn default_discovery_attempts() -> u32 {
    2
}

pub(crate) fn default_discovery_timeout_ms() -> u32 {
    500
}

pub(crate) fn default_discovery_ttl() -> u8 {
    1
}

pub(crate) fn default_resource_name() -> String {
    "_RESOURCE".to_string()
}

pub(crate) fn default_resource_timeout_ms() -> i64 {
    -1
}

pub(crate) fn default_resource_quantity() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            socket_name: String::new(),
            unicast_address: String::new(),
            unicast_port: default_port(),
            multicast_address: String::new(),
            multicast_port: default_port(),
            network_interface: String::new(),
            discovery_attempts: default_discovery_attempts(),
            discovery_timeout_ms: default_discovery_timeout_ms(),
            discovery_ttl: default_discovery_ttl(),
            resource_name: default_resource_name(),
            resource_create: true,
            resource_timeout_ms: default_resource_timeout_ms(),
            resource_quantity: default_resource_quantity(),
            resource_idle_lifespan_ms: 0,
            lock_mode: LockMode::default(),
            tls_certificate: String::new(),
            tls_private_key: String::new(),
            tls_ca_certificate: String::new(),
            tls_check_peer_id: false,
            trace_filename: String::new(),
        }
    }
}

impl HandleConfig {
    /// Build the TLS material for a connection attempt.
    ///
    /// Returns `Ok(None)` when no TLS field is set, `Ok(Some(_))` when the
    /// certificate/key/CA triple is complete, and a TLS-banded error when the
    /// triple is partial: security must never silently downgrade.
    pub fn tls_config(&self) -> Result<Option<TlsConfig>> {
        let set = [
            &self.tls_certificate,
            &self.tls_private_key,
            &self.tls_ca_certificate,
        ]
        .iter()
        .filter(|value| !value.is_empty())
        .count();

        match set {
            0 => Ok(None),
            3 => Ok(Some(TlsConfig {
                certificate: self.tls_certificate.clone(),
                private_key: self.tls_private_key.clone(),
                ca_certificate: self.tls_ca_certificate.clone(),
                check_peer_id: self.tls_check_peer_id,
            })),
            _ => Err(RelockError::TlsConfig(
                "certificate, private key and CA certificate must all be set".to_string(),
            )),
        }
    }
}
