//! Lock, unlock and teardown operations.

use super::state::HandleOp;
use super::LockHandle;
use crate::error::{RelockError, Result};
use crate::resource::{ResourceAddress, ResourceKind};
use crate::trace;
use crate::transport::{
    Endpoint, LockResponse, LockStatus, RequestOp, ResourceRequest, WaitPolicy,
};
use chrono::Utc;
use std::time::Duration;

impl LockHandle {
    /// Lock the configured resource.
    ///
    /// Validates locally first (call order, resource grammar, quantity
    /// against the declared numeric capacity), then resolves an endpoint,
    /// connects if this is the first dialogue, sends the request and
    /// interprets the answer. When the daemon enqueues the request and the
    /// wait policy permits, the calling thread blocks for at most the
    /// configured bound; expiry reports the same outcome an immediate
    /// refusal would have. There is no implicit retry beyond the discovery
    /// loop.
    ///
    /// On success the handle is `Locked` and, for set resources, the granted
    /// element is available through [`LockHandle::locked_element`]. On any
    /// failure the state is unchanged.
    pub fn lock(&mut self) -> Result<()> {
        let next = self.state.transition(HandleOp::Lock)?;

        let address = ResourceAddress::parse(&self.config.resource_name)?;
        self.check_quantity(&address)?;

        let request = self.build_request(RequestOp::Lock, &address);
        let response = self.dispatch(&request)?;

        let granted = match response.status {
            LockStatus::Granted => response,
            LockStatus::Busy => {
                self.trace_line(&format!("lock '{}' busy", address.name()));
                return Err(RelockError::LockBusy);
            }
            LockStatus::Denied => {
                return Err(RelockError::LockCantLock(format!(
                    "daemon denied the lock on '{}'",
                    address.name()
                )));
            }
            LockStatus::Enqueued => self.wait_for_grant(&address)?,
            LockStatus::Released => {
                return Err(RelockError::Protocol(
                    "daemon answered a lock request with a release status".to_string(),
                ));
            }
        };

        self.locked_element = match address.kind() {
            ResourceKind::Set => match granted.element {
                Some(element) => Some(element),
                None => {
                    return Err(RelockError::Protocol(format!(
                        "set resource '{}' was granted without an element",
                        address.name()
                    )));
                }
            },
            _ => None,
        };
        self.session_id = granted.unique_id;
        self.state = next;
        self.trace_line(&format!("lock '{}' granted", address.name()));
        Ok(())
    }

    /// Unlock the resource, committing any transactional effect.
    pub fn unlock(&mut self) -> Result<()> {
        self.release(RequestOp::Unlock)
    }

    /// Unlock the resource, rolling back the transactional effect.
    ///
    /// Only legal for resources whose name matches the transactional
    /// grammar; on a non-transactional resource this fails with
    /// `ResourceNotTransactional` and the resource stays locked until a
    /// plain [`LockHandle::unlock`].
    pub fn unlock_rollback(&mut self) -> Result<()> {
        self.release(RequestOp::UnlockRollback)
    }

    /// Free the handle: close the daemon dialogue and make the handle
    /// terminal. Idempotent; freeing a freed handle is a no-op. Freeing a
    /// locked handle does not unlock the resource.
    pub fn free(&mut self) -> Result<()> {
        if self.state == super::HandleState::Freed {
            return Ok(());
        }
        let next = self.state.transition(HandleOp::Free)?;
        if let Some(mut connection) = self.connection.take() {
            // The daemon notices the closed dialogue on its own; a close
            // failure must not make teardown fail.
            let _ = connection.close();
        }
        self.trace_line("handle freed");
        self.state = next;
        self.locked_element = None;
        self.session_id = None;
        Ok(())
    }

    fn release(&mut self, op: RequestOp) -> Result<()> {
        let next = self.state.transition(HandleOp::Unlock)?;

        let address = ResourceAddress::parse(&self.config.resource_name)?;
        if op == RequestOp::UnlockRollback && !address.is_transactional() {
            return Err(RelockError::ResourceNotTransactional(
                address.name().to_string(),
            ));
        }

        let request = self.build_request(op, &address);
        let response = self.dispatch(&request)?;

        match response.status {
            LockStatus::Released => {}
            other => {
                return Err(RelockError::Protocol(format!(
                    "daemon answered a release request with status {:?}",
                    other
                )));
            }
        }

        // The daemon echoes the session id it released; a different echo
        // means the dialogue got crossed with another session.
        if response.unique_id != self.session_id {
            return Err(RelockError::UniqueIdMismatch);
        }

        self.state = next;
        self.locked_element = None;
        self.session_id = None;
        self.trace_line(&format!("unlock '{}' released", address.name()));
        Ok(())
    }

    /// Quantity only makes sense against a numeric pool, and never beyond
    /// the capacity the name declares; an oversized request is rejected
    /// locally instead of being clamped.
    fn check_quantity(&self, address: &ResourceAddress) -> Result<()> {
        match address.capacity() {
            Some(capacity) => {
                if self.config.resource_quantity > capacity {
                    return Err(RelockError::OutOfRange(format!(
                        "quantity {} exceeds the capacity {} declared by '{}'",
                        self.config.resource_quantity,
                        capacity,
                        address.name()
                    )));
                }
            }
            None => {
                if self.config.resource_quantity != 1 {
                    return Err(RelockError::InvalidOption(format!(
                        "quantity is only meaningful for numeric resources, '{}' is {}",
                        address.name(),
                        address.kind().as_str()
                    )));
                }
            }
        }
        Ok(())
    }

    fn build_request(&self, op: RequestOp, address: &ResourceAddress) -> ResourceRequest {
        ResourceRequest {
            op,
            resource: address.name().to_string(),
            mode: self.config.lock_mode,
            quantity: address.capacity().map(|_| self.config.resource_quantity),
            create: self.config.resource_create,
            wait: WaitPolicy::from_timeout_ms(self.config.resource_timeout_ms),
            idle_lifespan_ms: self.config.resource_idle_lifespan_ms,
            session_id: self.session_id.clone(),
            requestor: crate::transport::requestor_string(),
            issued_at: Utc::now(),
        }
    }

    /// Send one request over the established dialogue, connecting first when
    /// needed. The resource name freezes the instant a request is issued,
    /// whatever its outcome.
    fn dispatch(&mut self, request: &ResourceRequest) -> Result<LockResponse> {
        self.ensure_connection()?;
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| RelockError::Internal("connection vanished after connect".to_string()))?;

        let result = connection.request(request);
        self.dialogue_started = true;
        if let Err(error) = &result {
            if connection_lost(error) {
                self.connection = None;
            }
        }
        result
    }

    /// Resolve an endpoint and connect: explicit unicast first, else the
    /// local socket, else multicast discovery with the configured retry
    /// budget. Discovery is the only built-in retry loop.
    fn ensure_connection(&mut self) -> Result<()> {
        if self.connection.is_some() {
            return Ok(());
        }

        if !self.config.unicast_address.is_empty() {
            let tls = self.config.tls_config()?;
            let endpoint = Endpoint::Tcp {
                address: self.config.unicast_address.clone(),
                port: self.config.unicast_port,
            };
            self.connection = Some(self.transport.connect(&endpoint, tls.as_ref())?);
            return Ok(());
        }

        if !self.config.socket_name.is_empty() {
            let endpoint = Endpoint::Local {
                socket_name: self.config.socket_name.clone(),
            };
            self.connection = Some(self.transport.connect(&endpoint, None)?);
            return Ok(());
        }

        if self.config.multicast_address.is_empty() {
            return Err(RelockError::DaemonNotReached(
                "no socket name, unicast address or multicast address configured".to_string(),
            ));
        }

        let endpoint = Endpoint::Multicast {
            address: self.config.multicast_address.clone(),
            port: self.config.multicast_port,
            ttl: self.config.discovery_ttl,
            interface: self.config.network_interface.clone(),
        };
        let pause = Duration::from_millis(u64::from(self.config.discovery_timeout_ms));
        let mut last_error = None;

        for attempt in 0..self.config.discovery_attempts {
            if attempt > 0 {
                std::thread::sleep(pause);
            }
            match self.transport.connect(&endpoint, None) {
                Ok(connection) => {
                    self.connection = Some(connection);
                    return Ok(());
                }
                Err(error) => last_error = Some(error),
            }
        }

        let reason = match last_error {
            Some(error) => error.to_string(),
            None => "no attempt was made".to_string(),
        };
        Err(RelockError::DaemonNotReached(format!(
            "multicast discovery failed after {} attempts: {}",
            self.config.discovery_attempts, reason
        )))
    }

    /// Block on an enqueued request according to the wait policy.
    fn wait_for_grant(&mut self, address: &ResourceAddress) -> Result<LockResponse> {
        let bound = match WaitPolicy::from_timeout_ms(self.config.resource_timeout_ms) {
            WaitPolicy::NoWait => {
                self.trace_line(&format!("lock '{}' enqueued, can not wait", address.name()));
                return Err(RelockError::LockCantWait);
            }
            WaitPolicy::WaitMs(ms) => Some(Duration::from_millis(ms)),
            WaitPolicy::WaitForever => None,
        };

        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| RelockError::Internal("waiting without a connection".to_string()))?;

        let outcome = connection.wait_granted(bound);
        if let Err(error) = &outcome {
            if connection_lost(error) {
                self.connection = None;
            }
        }
        match outcome {
            Ok(response) if response.status == LockStatus::Granted => Ok(response),
            // The bound expired or the daemon resolved the queue against us:
            // same report as an immediate refusal, no retry.
            Ok(_) | Err(RelockError::Timeout(_)) => {
                self.trace_line(&format!("lock '{}' wait expired", address.name()));
                Err(RelockError::LockBusy)
            }
            Err(error) => Err(error),
        }
    }

    pub(super) fn trace_line(&self, message: &str) {
        if !self.config.trace_filename.is_empty() {
            trace::append(&self.config.trace_filename, message);
        }
    }
}

/// The dialogue is dead once the peer closed it or socket I/O failed; the
/// connection can not answer another request and must be reopened.
fn connection_lost(error: &RelockError) -> bool {
    matches!(
        error,
        RelockError::ConnectionClosed | RelockError::Send(_) | RelockError::Recv(_)
    )
}
