//! Shared test helpers: a scripted in-memory transport.

use crate::config::TlsConfig;
use crate::error::{RelockError, Result};
use crate::transport::{Connection, Endpoint, LockResponse, ResourceRequest, Transport};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything a handle did to the transport, for assertions.
#[derive(Debug, Default)]
pub(crate) struct TransportLog {
    pub connects: Vec<Endpoint>,
    pub tls: Vec<Option<TlsConfig>>,
    pub requests: Vec<ResourceRequest>,
    pub waits: Vec<Option<Duration>>,
}

#[derive(Default)]
struct Script {
    /// Errors consumed by the next connect attempts, in order.
    connect_failures: Vec<RelockError>,
    /// Responses consumed by `request` and `wait_granted`, in order.
    responses: Vec<Result<LockResponse>>,
}

/// A transport whose answers are scripted up front.
///
/// Clone-cheap: the script and the log are shared, so a test keeps its own
/// copy while the handle owns the boxed one.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    log: Arc<Mutex<TransportLog>>,
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next request or wait.
    pub(crate) fn push_response(&self, response: Result<LockResponse>) {
        self.script.lock().unwrap().responses.push(response);
    }

    /// Make the next `count` connect attempts fail with clones of `error`.
    pub(crate) fn fail_connects(&self, count: usize, error: RelockError) {
        let mut script = self.script.lock().unwrap();
        for _ in 0..count {
            script.connect_failures.push(error.clone());
        }
    }

    pub(crate) fn connects(&self) -> Vec<Endpoint> {
        self.log.lock().unwrap().connects.clone()
    }

    pub(crate) fn tls_seen(&self) -> Vec<Option<TlsConfig>> {
        self.log.lock().unwrap().tls.clone()
    }

    pub(crate) fn requests(&self) -> Vec<ResourceRequest> {
        self.log.lock().unwrap().requests.clone()
    }

    pub(crate) fn waits(&self) -> Vec<Option<Duration>> {
        self.log.lock().unwrap().waits.clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.log.lock().unwrap().requests.len()
    }

    pub(crate) fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

impl Transport for ScriptedTransport {
    fn connect(&self, endpoint: &Endpoint, tls: Option<&TlsConfig>) -> Result<Box<dyn Connection>> {
        let mut log = self.log.lock().unwrap();
        log.connects.push(endpoint.clone());
        log.tls.push(tls.cloned());
        drop(log);

        let mut script = self.script.lock().unwrap();
        if !script.connect_failures.is_empty() {
            return Err(script.connect_failures.remove(0));
        }
        drop(script);

        Ok(Box::new(ScriptedConnection {
            log: Arc::clone(&self.log),
            script: Arc::clone(&self.script),
        }))
    }
}

struct ScriptedConnection {
    log: Arc<Mutex<TransportLog>>,
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnection {
    fn next_response(&self) -> Result<LockResponse> {
        let mut script = self.script.lock().unwrap();
        if script.responses.is_empty() {
            return Err(RelockError::Internal(
                "scripted transport ran out of responses".to_string(),
            ));
        }
        script.responses.remove(0)
    }
}

impl Connection for ScriptedConnection {
    fn request(&mut self, request: &ResourceRequest) -> Result<LockResponse> {
        self.log.lock().unwrap().requests.push(request.clone());
        self.next_response()
    }

    fn wait_granted(&mut self, bound: Option<Duration>) -> Result<LockResponse> {
        self.log.lock().unwrap().waits.push(bound);
        self.next_response()
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
