//! Reason code constants shared between client and daemon.
//!
//! Codes are partitioned into stable bands:
//! - Positive codes are non-fatal advisory outcomes from the request path.
//! - Zero is success.
//! - Small negative codes (-1..-19) are API/protocol/validation errors.
//! - -100..-199 are wrapped OS/socket failures.
//! - -200..-299 are message marshalling failures.
//! - -300..-399 are TLS failures.
//!
//! New lower-layer failure kinds must be added inside their reserved band so
//! they never collide with API-level codes.

// =============================================================================
// Advisory outcomes (positive band)
// =============================================================================

/// The lock can not be obtained now, but the request was enqueued.
pub const LOCK_ENQUEUED: i32 = 1;

/// The lock can not be obtained because the resource is busy.
pub const LOCK_BUSY: i32 = 2;

/// The lock can not be obtained, generic refusal from the daemon.
pub const LOCK_CANT_LOCK: i32 = 3;

/// The resource is busy and the configured wait policy forbids waiting.
pub const LOCK_CANT_WAIT: i32 = 4;

/// Peer has closed the connection while data was expected.
pub const CONNECTION_CLOSED: i32 = 10;

// =============================================================================
// Success
// =============================================================================

/// Successful completion.
pub const OK: i32 = 0;

// =============================================================================
// API / validation errors (small negative band)
// =============================================================================

/// Internal error: unrecoverable status.
pub const INTERNAL_ERROR: i32 = -1;

/// The lock daemon could not be reached through any configured endpoint.
pub const DAEMON_NOT_REACHED: i32 = -2;

/// An unexpected network event happened.
pub const NETWORK_EVENT_ERROR: i32 = -3;

/// A required value is null/absent and can not be inferred from a default.
pub const NULL_OBJECT: i32 = -4;

/// A specified option is not valid for the method and/or the object status.
pub const INVALID_OPTION: i32 = -5;

/// A corrupted (already freed) handle has been used.
pub const OBJ_CORRUPTED: i32 = -6;

/// A parameter passed to a method is out of range.
pub const OUT_OF_RANGE: i32 = -7;

/// The resource name does not match any resource grammar.
pub const INVALID_RESOURCE_NAME: i32 = -8;

/// The daemon answered something the protocol does not allow at this point.
pub const PROTOCOL_ERROR: i32 = -9;

/// A method has been invoked in an improper call sequence.
pub const API_INVALID_SEQUENCE: i32 = -10;

/// Rollback was requested for a resource that is not transactional.
pub const RESOURCE_NOT_TRANSACTIONAL: i32 = -11;

/// The locked element name is not available for this resource/state.
pub const ELEMENT_NAME_NOT_AVAILABLE: i32 = -12;

/// The unique id echoed by the daemon does not match the session.
pub const UNIQUE_ID_MISMATCH: i32 = -13;

// =============================================================================
// OS / socket errors (-100 band)
// =============================================================================

/// "connect" failed: the endpoint refused or was unreachable.
pub const CONNECT_ERROR: i32 = -100;

/// Sending data to the daemon failed.
pub const SEND_ERROR: i32 = -101;

/// Receiving data from the daemon failed.
pub const RECV_ERROR: i32 = -102;

/// A network operation timed out.
pub const TIMEOUT_ERROR: i32 = -103;

/// Closing the connection failed.
pub const CLOSE_ERROR: i32 = -104;

// =============================================================================
// Marshalling errors (-200 band)
// =============================================================================

/// A request could not be serialized.
pub const MSG_SERIALIZE_ERROR: i32 = -200;

/// A response could not be deserialized.
pub const MSG_DESERIALIZE_ERROR: i32 = -201;

// =============================================================================
// TLS errors (-300 band)
// =============================================================================

/// The TLS configuration is incomplete or unusable.
pub const TLS_CONFIG_ERROR: i32 = -300;

/// The TLS handshake with the daemon failed.
pub const TLS_HANDSHAKE_ERROR: i32 = -301;

/// The daemon's peer id did not pass verification.
pub const TLS_PEER_ID_ERROR: i32 = -302;

/// Retrieve the stable description associated to a reason code.
///
/// Unknown codes map to a generic text instead of panicking, so this is safe
/// to call on codes produced by a newer daemon.
pub fn describe(reason_code: i32) -> &'static str {
    match reason_code {
        LOCK_ENQUEUED => "the lock can not be obtained now, the request was enqueued",
        LOCK_BUSY => "the lock can not be obtained because the resource is busy",
        LOCK_CANT_LOCK => "the lock can not be obtained",
        LOCK_CANT_WAIT => "the resource is busy and the wait policy forbids waiting",
        CONNECTION_CLOSED => "peer closed the connection while expecting data",
        OK => "successful completion",
        INTERNAL_ERROR => "internal error, unrecoverable status",
        DAEMON_NOT_REACHED => "the lock daemon could not be reached",
        NETWORK_EVENT_ERROR => "unexpected network event",
        NULL_OBJECT => "a required value is null or absent",
        INVALID_OPTION => "the option is not valid for the method or object status",
        OBJ_CORRUPTED => "a corrupted (freed) handle has been used",
        OUT_OF_RANGE => "a parameter is out of range",
        INVALID_RESOURCE_NAME => "the resource name is not valid for any resource type",
        PROTOCOL_ERROR => "the daemon answer violates the protocol",
        API_INVALID_SEQUENCE => "the method was invoked in an improper call sequence",
        RESOURCE_NOT_TRANSACTIONAL => "the resource is not transactional",
        ELEMENT_NAME_NOT_AVAILABLE => "the locked element name is not available",
        UNIQUE_ID_MISMATCH => "the unique id echoed by the daemon does not match",
        CONNECT_ERROR => "connecting to the endpoint failed",
        SEND_ERROR => "sending data to the daemon failed",
        RECV_ERROR => "receiving data from the daemon failed",
        TIMEOUT_ERROR => "a network operation timed out",
        CLOSE_ERROR => "closing the connection failed",
        MSG_SERIALIZE_ERROR => "a request could not be serialized",
        MSG_DESERIALIZE_ERROR => "a response could not be deserialized",
        TLS_CONFIG_ERROR => "the TLS configuration is incomplete or unusable",
        TLS_HANDSHAKE_ERROR => "the TLS handshake failed",
        TLS_PEER_ID_ERROR => "the peer id did not pass TLS verification",
        _ => "unknown reason code",
    }
}
