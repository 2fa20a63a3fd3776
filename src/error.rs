//! Error types for the relock client library.
//!
//! Uses thiserror for derive macros. Every variant maps to a stable numeric
//! reason code (see [`crate::reason_codes`]): advisory request-path outcomes
//! carry positive codes, API/validation errors carry small negative codes and
//! wrapped lower-layer failures carry codes in their reserved negative bands.
//! Callers branch on the typed variant, never on the message text.

use crate::reason_codes;
use thiserror::Error;

/// Main error type for relock operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelockError {
    // =========================================================================
    // Advisory outcomes (positive reason codes)
    // =========================================================================
    /// The lock can not be obtained now, but the request was enqueued.
    #[error("lock request enqueued, the resource is currently held")]
    LockEnqueued,

    /// The lock can not be obtained because the resource is busy.
    #[error("resource is busy, the lock can not be obtained")]
    LockBusy,

    /// The daemon refused the lock for a reason other than contention.
    #[error("the lock can not be obtained: {0}")]
    LockCantLock(String),

    /// The resource is busy and the wait policy forbids waiting.
    #[error("resource is busy and the caller can not wait")]
    LockCantWait,

    /// Peer closed the connection while data was expected.
    #[error("peer closed the connection while expecting data")]
    ConnectionClosed,

    // =========================================================================
    // API / validation errors
    // =========================================================================
    /// Internal error: unrecoverable status.
    #[error("internal error: {0}")]
    Internal(String),

    /// No configured endpoint led to a daemon connection.
    #[error("unable to reach the lock daemon: {0}")]
    DaemonNotReached(String),

    /// An unexpected network event happened.
    #[error("unexpected network event: {0}")]
    NetworkEvent(String),

    /// A required value is null/absent.
    #[error("null or absent value: {0}")]
    NullObject(String),

    /// A specified option is not valid for the method or object status.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The handle was freed and can no longer be used.
    #[error("corrupted object: the handle was freed and can no longer be used")]
    ObjCorrupted,

    /// A parameter is out of range.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The resource name does not match any resource grammar.
    #[error("invalid resource name: '{0}'")]
    InvalidResourceName(String),

    /// The daemon answered something the protocol does not allow here.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A method was invoked in an improper call sequence.
    #[error("invalid call sequence: {0}")]
    ApiInvalidSequence(String),

    /// Rollback was requested for a resource that is not transactional.
    #[error("resource '{0}' is not transactional")]
    ResourceNotTransactional(String),

    /// The locked element name is not available for this resource/state.
    #[error("locked element name is not available")]
    ElementNameNotAvailable,

    /// The unique id echoed by the daemon does not match the session.
    #[error("unique id echoed by the daemon does not match the session")]
    UniqueIdMismatch,

    // =========================================================================
    // Wrapped OS / socket failures (-100 band)
    // =========================================================================
    /// Connecting to an endpoint failed (refused or unreachable).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Sending data to the daemon failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Receiving data from the daemon failed.
    #[error("receive failed: {0}")]
    Recv(String),

    /// A network operation timed out.
    #[error("network operation timed out: {0}")]
    Timeout(String),

    /// Closing the connection failed.
    #[error("close failed: {0}")]
    Close(String),

    // =========================================================================
    // Marshalling failures (-200 band)
    // =========================================================================
    /// A request could not be serialized.
    #[error("failed to serialize request: {0}")]
    MsgSerialize(String),

    /// A response could not be deserialized.
    #[error("failed to deserialize response: {0}")]
    MsgDeserialize(String),

    // =========================================================================
    // TLS failures (-300 band)
    // =========================================================================
    /// The TLS configuration is incomplete or unusable.
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// The TLS handshake with the daemon failed.
    #[error("TLS handshake failed: {0}")]
    TlsHandshake(String),

    /// The daemon's peer id did not pass verification.
    #[error("TLS peer id verification failed: {0}")]
    TlsPeerId(String),
}

impl RelockError {
    /// Returns the stable reason code for this error.
    pub fn reason_code(&self) -> i32 {
        match self {
            RelockError::LockEnqueued => reason_codes::LOCK_ENQUEUED,
            RelockError::LockBusy => reason_codes::LOCK_BUSY,
            RelockError::LockCantLock(_) => reason_codes::LOCK_CANT_LOCK,
            RelockError::LockCantWait => reason_codes::LOCK_CANT_WAIT,
            RelockError::ConnectionClosed => reason_codes::CONNECTION_CLOSED,
            RelockError::Internal(_) => reason_codes::INTERNAL_ERROR,
            RelockError::DaemonNotReached(_) => reason_codes::DAEMON_NOT_REACHED,
            RelockError::NetworkEvent(_) => reason_codes::NETWORK_EVENT_ERROR,
            RelockError::NullObject(_) => reason_codes::NULL_OBJECT,
            RelockError::InvalidOption(_) => reason_codes::INVALID_OPTION,
            RelockError::ObjCorrupted => reason_codes::OBJ_CORRUPTED,
            RelockError::OutOfRange(_) => reason_codes::OUT_OF_RANGE,
            RelockError::InvalidResourceName(_) => reason_codes::INVALID_RESOURCE_NAME,
            RelockError::Protocol(_) => reason_codes::PROTOCOL_ERROR,
            RelockError::ApiInvalidSequence(_) => reason_codes::API_INVALID_SEQUENCE,
            RelockError::ResourceNotTransactional(_) => {
                reason_codes::RESOURCE_NOT_TRANSACTIONAL
            }
            RelockError::ElementNameNotAvailable => reason_codes::ELEMENT_NAME_NOT_AVAILABLE,
            RelockError::UniqueIdMismatch => reason_codes::UNIQUE_ID_MISMATCH,
            RelockError::Connect(_) => reason_codes::CONNECT_ERROR,
            RelockError::Send(_) => reason_codes::SEND_ERROR,
            RelockError::Recv(_) => reason_codes::RECV_ERROR,
            RelockError::Timeout(_) => reason_codes::TIMEOUT_ERROR,
            RelockError::Close(_) => reason_codes::CLOSE_ERROR,
            RelockError::MsgSerialize(_) => reason_codes::MSG_SERIALIZE_ERROR,
            RelockError::MsgDeserialize(_) => reason_codes::MSG_DESERIALIZE_ERROR,
            RelockError::TlsConfig(_) => reason_codes::TLS_CONFIG_ERROR,
            RelockError::TlsHandshake(_) => reason_codes::TLS_HANDSHAKE_ERROR,
            RelockError::TlsPeerId(_) => reason_codes::TLS_PEER_ID_ERROR,
        }
    }

    /// Returns true for non-fatal advisory outcomes of the request path.
    ///
    /// Busy/enqueued/can-not-wait are expected outcomes a caller branches on,
    /// not defects.
    pub fn is_advisory(&self) -> bool {
        self.reason_code() > 0
    }

    /// Returns the stable description associated to this error's reason code.
    pub fn describe(&self) -> &'static str {
        reason_codes::describe(self.reason_code())
    }
}

/// Result type alias for relock operations.
pub type Result<T> = std::result::Result<T, RelockError>;
