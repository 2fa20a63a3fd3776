//! Configuration setters and getters.
//!
//! Every setter validates its argument before touching the stored value and
//! distinguishes three outcomes: applied, rejected-as-invalid (typed error,
//! value unchanged), or softly rejected as immutable (only the resource name
//! once a dialogue has started). Getters never return an absent value for
//! string-typed properties: a never-set property reads as the empty string.
//! The one exception is the locked element, which fails with
//! `ElementNameNotAvailable` instead of masking "not applicable" as empty.

use super::state::HandleOp;
use super::{LockHandle, SetStatus};
use crate::config::{
    check_discovery_attempts, check_network_interface, check_non_empty, check_port,
    check_resource_quantity,
};
use crate::error::{RelockError, Result};
use crate::resource::{LockMode, ResourceAddress, ResourceKind};

impl LockHandle {
    // =========================================================================
    // Transport selection
    // =========================================================================

    /// Set the UNIX socket name for local daemon communication.
    pub fn set_socket_name(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "socket name")?;
        self.config.socket_name = value.to_string();
        Ok(())
    }

    /// Get the UNIX socket name; empty when never set.
    pub fn socket_name(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.socket_name)
    }

    /// Set the TCP unicast address of the daemon.
    pub fn set_unicast_address(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "unicast address")?;
        self.config.unicast_address = value.to_string();
        Ok(())
    }

    /// Get the TCP unicast address; empty when never set.
    pub fn unicast_address(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.unicast_address)
    }

    /// Set the TCP unicast port.
    pub fn set_unicast_port(&mut self, value: u16) -> Result<()> {
        self.configure()?;
        check_port(value, "unicast port")?;
        self.config.unicast_port = value;
        Ok(())
    }

    /// Get the TCP unicast port.
    pub fn unicast_port(&self) -> Result<u16> {
        self.inspect()?;
        Ok(self.config.unicast_port)
    }

    /// Set the UDP multicast address used for daemon discovery.
    pub fn set_multicast_address(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "multicast address")?;
        self.config.multicast_address = value.to_string();
        Ok(())
    }

    /// Get the UDP multicast address; empty when never set.
    pub fn multicast_address(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.multicast_address)
    }

    /// Set the UDP multicast port.
    pub fn set_multicast_port(&mut self, value: u16) -> Result<()> {
        self.configure()?;
        check_port(value, "multicast port")?;
        self.config.multicast_port = value;
        Ok(())
    }

    /// Get the UDP multicast port.
    pub fn multicast_port(&self) -> Result<u16> {
        self.inspect()?;
        Ok(self.config.multicast_port)
    }

    /// Set the network interface used for link-local IPv6 multicast.
    pub fn set_network_interface(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "network interface")?;
        check_network_interface(value)?;
        self.config.network_interface = value.to_string();
        Ok(())
    }

    /// Get the network interface; empty when never set.
    pub fn network_interface(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.network_interface)
    }

    // =========================================================================
    // Discovery tuning
    // =========================================================================

    /// Set the number of multicast discovery attempts (at least 1).
    pub fn set_discovery_attempts(&mut self, value: i32) -> Result<()> {
        self.configure()?;
        let attempts = u32::try_from(value)
            .map_err(|_| RelockError::OutOfRange("discovery attempts must not be negative".to_string()))?;
        check_discovery_attempts(attempts)?;
        self.config.discovery_attempts = attempts;
        Ok(())
    }

    /// Get the number of multicast discovery attempts.
    pub fn discovery_attempts(&self) -> Result<u32> {
        self.inspect()?;
        Ok(self.config.discovery_attempts)
    }

    /// Set the milliseconds between discovery attempts (non-negative).
    pub fn set_discovery_timeout(&mut self, value: i32) -> Result<()> {
        self.configure()?;
        let timeout = u32::try_from(value).map_err(|_| {
            RelockError::OutOfRange("discovery timeout must not be negative".to_string())
        })?;
        self.config.discovery_timeout_ms = timeout;
        Ok(())
    }

    /// Get the milliseconds between discovery attempts.
    pub fn discovery_timeout(&self) -> Result<u32> {
        self.inspect()?;
        Ok(self.config.discovery_timeout_ms)
    }

    /// Set the TTL of discovery datagrams (0-255).
    pub fn set_discovery_ttl(&mut self, value: i32) -> Result<()> {
        self.configure()?;
        let ttl = u8::try_from(value)
            .map_err(|_| RelockError::OutOfRange("discovery TTL must be in 0..=255".to_string()))?;
        self.config.discovery_ttl = ttl;
        Ok(())
    }

    /// Get the TTL of discovery datagrams.
    pub fn discovery_ttl(&self) -> Result<u8> {
        self.inspect()?;
        Ok(self.config.discovery_ttl)
    }

    // =========================================================================
    // Resource parameters
    // =========================================================================

    /// Set the resource name.
    ///
    /// The name is parsed against the resource grammar and rejected when it
    /// matches no resource kind. Once the handle has issued any request over
    /// the transport the name is immutable: the call then reports
    /// [`SetStatus::ImmutableIgnored`] and the previous value stands.
    pub fn set_resource_name(&mut self, value: &str) -> Result<SetStatus> {
        self.configure()?;
        check_non_empty(value, "resource name")?;
        if self.dialogue_started {
            return Ok(SetStatus::ImmutableIgnored);
        }
        ResourceAddress::parse(value)?;
        self.config.resource_name = value.to_string();
        Ok(SetStatus::Applied)
    }

    /// Get the resource name.
    pub fn resource_name(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.resource_name)
    }

    /// The typed address derived from the current resource name.
    pub fn resource_address(&self) -> Result<ResourceAddress> {
        self.inspect()?;
        ResourceAddress::parse(&self.config.resource_name)
    }

    /// Set whether the daemon may create the resource on demand.
    pub fn set_resource_create(&mut self, value: bool) -> Result<()> {
        self.configure()?;
        self.config.resource_create = value;
        Ok(())
    }

    /// Get whether the daemon may create the resource on demand.
    pub fn resource_create(&self) -> Result<bool> {
        self.inspect()?;
        Ok(self.config.resource_create)
    }

    /// Set the wait bound for a contended lock: 0 = no wait, >0 = bounded
    /// wait in milliseconds, <0 = unbounded wait.
    pub fn set_resource_timeout(&mut self, value: i64) -> Result<()> {
        self.configure()?;
        self.config.resource_timeout_ms = value;
        Ok(())
    }

    /// Get the wait bound for a contended lock.
    pub fn resource_timeout(&self) -> Result<i64> {
        self.inspect()?;
        Ok(self.config.resource_timeout_ms)
    }

    /// Set the units requested from a numeric resource pool (at least 1).
    pub fn set_resource_quantity(&mut self, value: i32) -> Result<()> {
        self.configure()?;
        let quantity = u32::try_from(value).map_err(|_| {
            RelockError::OutOfRange("resource quantity must be at least 1".to_string())
        })?;
        check_resource_quantity(quantity)?;
        self.config.resource_quantity = quantity;
        Ok(())
    }

    /// Get the units requested from a numeric resource pool.
    pub fn resource_quantity(&self) -> Result<u32> {
        self.inspect()?;
        Ok(self.config.resource_quantity)
    }

    /// Set the daemon-side idle garbage-collection hint in milliseconds.
    pub fn set_resource_idle_lifespan(&mut self, value: i64) -> Result<()> {
        self.configure()?;
        let lifespan = u64::try_from(value).map_err(|_| {
            RelockError::OutOfRange("resource idle lifespan must not be negative".to_string())
        })?;
        self.config.resource_idle_lifespan_ms = lifespan;
        Ok(())
    }

    /// Get the daemon-side idle garbage-collection hint in milliseconds.
    pub fn resource_idle_lifespan(&self) -> Result<u64> {
        self.inspect()?;
        Ok(self.config.resource_idle_lifespan_ms)
    }

    /// Set the DLM lock mode requested at lock time.
    ///
    /// [`LockMode`] values are valid by construction; numeric wire values go
    /// through `LockMode::try_from`, which rejects out-of-range input.
    pub fn set_lock_mode(&mut self, value: LockMode) -> Result<()> {
        self.configure()?;
        self.config.lock_mode = value;
        Ok(())
    }

    /// Get the DLM lock mode requested at lock time.
    pub fn lock_mode(&self) -> Result<LockMode> {
        self.inspect()?;
        Ok(self.config.lock_mode)
    }

    /// Get the element granted by the daemon.
    ///
    /// Only available while a set resource is locked; any other combination
    /// fails with `ElementNameNotAvailable` rather than answering an empty
    /// string a caller could mistake for a real element.
    pub fn locked_element(&self) -> Result<&str> {
        self.inspect()?;
        match (&self.locked_element, self.resource_is_set()) {
            (Some(element), true) => Ok(element),
            _ => Err(RelockError::ElementNameNotAvailable),
        }
    }

    // =========================================================================
    // Security
    // =========================================================================

    /// Set the path of the client TLS certificate.
    pub fn set_tls_certificate(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "TLS certificate")?;
        self.config.tls_certificate = value.to_string();
        Ok(())
    }

    /// Get the path of the client TLS certificate; empty when never set.
    pub fn tls_certificate(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.tls_certificate)
    }

    /// Set the path of the client TLS private key.
    pub fn set_tls_private_key(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "TLS private key")?;
        self.config.tls_private_key = value.to_string();
        Ok(())
    }

    /// Get the path of the client TLS private key; empty when never set.
    pub fn tls_private_key(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.tls_private_key)
    }

    /// Set the path of the CA certificate used to verify the daemon.
    pub fn set_tls_ca_certificate(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "TLS CA certificate")?;
        self.config.tls_ca_certificate = value.to_string();
        Ok(())
    }

    /// Get the path of the CA certificate; empty when never set.
    pub fn tls_ca_certificate(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.tls_ca_certificate)
    }

    /// Set whether the daemon's unique id must match its certificate CN.
    pub fn set_tls_check_peer_id(&mut self, value: bool) -> Result<()> {
        self.configure()?;
        self.config.tls_check_peer_id = value;
        Ok(())
    }

    /// Get whether the daemon's unique id must match its certificate CN.
    pub fn tls_check_peer_id(&self) -> Result<bool> {
        self.inspect()?;
        Ok(self.config.tls_check_peer_id)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Set the trace filename; each significant operation appends one line.
    pub fn set_trace_filename(&mut self, value: &str) -> Result<()> {
        self.configure()?;
        check_non_empty(value, "trace filename")?;
        self.config.trace_filename = value.to_string();
        Ok(())
    }

    /// Get the trace filename; empty when never set.
    pub fn trace_filename(&self) -> Result<&str> {
        self.inspect()?;
        Ok(&self.config.trace_filename)
    }

    // =========================================================================
    // Shared guards
    // =========================================================================

    fn configure(&mut self) -> Result<()> {
        self.state = self.state.transition(HandleOp::Configure)?;
        Ok(())
    }

    fn inspect(&self) -> Result<()> {
        self.state.transition(HandleOp::Inspect)?;
        Ok(())
    }

    fn resource_is_set(&self) -> bool {
        ResourceAddress::parse(&self.config.resource_name)
            .map(|address| address.kind() == ResourceKind::Set)
            .unwrap_or(false)
    }
}
