//! Configuration model for a lock handle.
//!
//! This module defines the [`HandleConfig`] struct owned by every handle:
//! transport selection (local socket, TCP unicast, UDP multicast discovery),
//! discovery tuning, resource parameters, lock mode, TLS material and
//! diagnostics. The handle's setters are the primary mutation surface; as an
//! ambient convenience a config can also be loaded from YAML with
//! forward-compatible parsing (unknown fields are ignored) and sensible
//! defaults for everything.

mod model;
mod operations;


// Re-export public API
pub use model::{HandleConfig, TlsConfig};

pub(crate) use operations::{
    check_discovery_attempts, check_network_interface, check_non_empty, check_port,
    check_resource_quantity,
};
