//! Tests for the lock handle.

use crate::config::HandleConfig;
use crate::error::RelockError;
use crate::handle::{HandleState, LockHandle, SetStatus};
use crate::resource::LockMode;
use crate::test_support::ScriptedTransport;
use crate::transport::{Endpoint, LockResponse, LockStatus, RequestOp, WaitPolicy};
use std::time::Duration;

fn handle_with(transport: &ScriptedTransport) -> LockHandle {
    LockHandle::new(transport.boxed())
}

fn released(unique_id: Option<&str>) -> LockResponse {
    LockResponse {
        status: LockStatus::Released,
        element: None,
        unique_id: unique_id.map(str::to_string),
    }
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn hierarchical_lock_cycle_over_the_local_socket() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, Some("sess-1"))));
    transport.push_response(Ok(released(Some("sess-1"))));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red.blue.green").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    handle.lock().unwrap();
    assert_eq!(handle.state(), HandleState::Locked);

    // Hierarchical, not a set: there is no element to report.
    assert_eq!(
        handle.locked_element().unwrap_err(),
        RelockError::ElementNameNotAvailable
    );

    handle.unlock().unwrap();
    assert_eq!(handle.state(), HandleState::Unlocked);
    handle.free().unwrap();
    assert_eq!(handle.state(), HandleState::Freed);

    assert_eq!(
        transport.connects(),
        vec![Endpoint::Local {
            socket_name: "/tmp/relockd.sock".to_string()
        }]
    );
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].op, RequestOp::Lock);
    assert_eq!(requests[0].resource, "red.blue.green");
    assert_eq!(requests[1].op, RequestOp::Unlock);
    assert_eq!(requests[1].session_id.as_deref(), Some("sess-1"));
}

#[test]
fn rollback_succeeds_only_on_the_transactional_spelling() {
    // Non-transactional: rollback refused locally, plain unlock still works.
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));
    transport.push_response(Ok(released(None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("_s_nontransactional[1]").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();

    assert_eq!(
        handle.unlock_rollback().unwrap_err(),
        RelockError::ResourceNotTransactional("_s_nontransactional[1]".to_string())
    );
    // Still locked: only the lock and no release went out.
    assert_eq!(handle.state(), HandleState::Locked);
    assert_eq!(transport.request_count(), 1);

    handle.unlock().unwrap();

    // Transactional: rollback goes through.
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));
    transport.push_response(Ok(released(None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("_S_nontransactional[1]").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();
    handle.unlock_rollback().unwrap();
    assert_eq!(handle.state(), HandleState::Unlocked);
    assert_eq!(transport.requests()[1].op, RequestOp::UnlockRollback);
}

#[test]
fn set_resource_reports_the_granted_element() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(Some("green"), None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("_e_red.green.blue").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();

    assert_eq!(handle.locked_element().unwrap(), "green");
}

#[test]
fn set_grant_without_an_element_is_a_protocol_error() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("_e_red.green.blue").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    assert!(matches!(handle.lock().unwrap_err(), RelockError::Protocol(_)));
    assert_ne!(handle.state(), HandleState::Locked);
}

#[test]
fn handle_is_reusable_across_lock_unlock_cycles() {
    let transport = ScriptedTransport::new();
    for _ in 0..3 {
        transport.push_response(Ok(LockResponse::granted(None, None)));
        transport.push_response(Ok(released(None)));
    }

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    for _ in 0..3 {
        handle.lock().unwrap();
        handle.unlock().unwrap();
    }

    // One dialogue serves every cycle.
    assert_eq!(transport.connects().len(), 1);
    assert_eq!(transport.request_count(), 6);
}

// =============================================================================
// Call-order enforcement
// =============================================================================

#[test]
fn unlock_before_lock_fails_without_network_io() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();

    assert!(matches!(
        handle.unlock().unwrap_err(),
        RelockError::ApiInvalidSequence(_)
    ));
    assert!(matches!(
        handle.unlock_rollback().unwrap_err(),
        RelockError::ApiInvalidSequence(_)
    ));
    assert!(transport.connects().is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn free_is_idempotent_and_poisons_every_other_operation() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);

    handle.free().unwrap();
    handle.free().unwrap();

    assert_eq!(handle.lock().unwrap_err(), RelockError::ObjCorrupted);
    assert_eq!(handle.unlock().unwrap_err(), RelockError::ObjCorrupted);
    assert_eq!(
        handle.set_socket_name("/tmp/x.sock").unwrap_err(),
        RelockError::ObjCorrupted
    );
    assert_eq!(handle.resource_name().unwrap_err(), RelockError::ObjCorrupted);
    assert!(transport.connects().is_empty());
}

#[test]
fn double_lock_is_an_invalid_sequence() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();

    assert!(matches!(
        handle.lock().unwrap_err(),
        RelockError::ApiInvalidSequence(_)
    ));
    assert_eq!(transport.request_count(), 1);
}

// =============================================================================
// Setters and getters
// =============================================================================

#[test]
fn setters_round_trip_through_getters() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);

    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_unicast_address("10.0.0.7").unwrap();
    handle.set_unicast_port(7777).unwrap();
    handle.set_multicast_address("239.255.0.1").unwrap();
    handle.set_multicast_port(7778).unwrap();
    handle.set_network_interface("eth0").unwrap();
    handle.set_discovery_attempts(5).unwrap();
    handle.set_discovery_timeout(250).unwrap();
    handle.set_discovery_ttl(8).unwrap();
    handle.set_resource_name("printers[4]").unwrap();
    handle.set_resource_create(false).unwrap();
    handle.set_resource_timeout(3000).unwrap();
    handle.set_resource_quantity(2).unwrap();
    handle.set_resource_idle_lifespan(60000).unwrap();
    handle.set_lock_mode(LockMode::ProtectedWrite).unwrap();
    handle.set_tls_certificate("/etc/relock/client.pem").unwrap();
    handle.set_tls_private_key("/etc/relock/client.key").unwrap();
    handle.set_tls_ca_certificate("/etc/relock/ca.pem").unwrap();
    handle.set_tls_check_peer_id(true).unwrap();
    handle.set_trace_filename("/tmp/relock.trc").unwrap();

    assert_eq!(handle.socket_name().unwrap(), "/tmp/relockd.sock");
    assert_eq!(handle.unicast_address().unwrap(), "10.0.0.7");
    assert_eq!(handle.unicast_port().unwrap(), 7777);
    assert_eq!(handle.multicast_address().unwrap(), "239.255.0.1");
    assert_eq!(handle.multicast_port().unwrap(), 7778);
    assert_eq!(handle.network_interface().unwrap(), "eth0");
    assert_eq!(handle.discovery_attempts().unwrap(), 5);
    assert_eq!(handle.discovery_timeout().unwrap(), 250);
    assert_eq!(handle.discovery_ttl().unwrap(), 8);
    assert_eq!(handle.resource_name().unwrap(), "printers[4]");
    assert!(!handle.resource_create().unwrap());
    assert_eq!(handle.resource_timeout().unwrap(), 3000);
    assert_eq!(handle.resource_quantity().unwrap(), 2);
    assert_eq!(handle.resource_idle_lifespan().unwrap(), 60000);
    assert_eq!(handle.lock_mode().unwrap(), LockMode::ProtectedWrite);
    assert_eq!(handle.tls_certificate().unwrap(), "/etc/relock/client.pem");
    assert_eq!(handle.tls_private_key().unwrap(), "/etc/relock/client.key");
    assert_eq!(handle.tls_ca_certificate().unwrap(), "/etc/relock/ca.pem");
    assert!(handle.tls_check_peer_id().unwrap());
    assert_eq!(handle.trace_filename().unwrap(), "/tmp/relock.trc");
}

#[test]
fn string_getters_answer_empty_for_never_set_properties() {
    let transport = ScriptedTransport::new();
    let handle = handle_with(&transport);

    assert_eq!(handle.socket_name().unwrap(), "");
    assert_eq!(handle.unicast_address().unwrap(), "");
    assert_eq!(handle.multicast_address().unwrap(), "");
    assert_eq!(handle.network_interface().unwrap(), "");
    assert_eq!(handle.tls_certificate().unwrap(), "");
    assert_eq!(handle.trace_filename().unwrap(), "");
}

#[test]
fn absent_string_values_are_rejected_and_leave_the_property_unchanged() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    assert!(matches!(
        handle.set_socket_name("").unwrap_err(),
        RelockError::NullObject(_)
    ));
    assert_eq!(handle.socket_name().unwrap(), "/tmp/relockd.sock");

    assert!(matches!(
        handle.set_resource_name("").unwrap_err(),
        RelockError::NullObject(_)
    ));
    assert_eq!(handle.resource_name().unwrap(), "_RESOURCE");
}

#[test]
fn invalid_setter_arguments_are_rejected_with_typed_errors() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);

    assert!(matches!(
        handle.set_discovery_attempts(0).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_discovery_attempts(-3).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_discovery_timeout(-1).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_discovery_ttl(256).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_resource_quantity(0).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_unicast_port(0).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
    assert!(matches!(
        handle.set_network_interface("eth 0").unwrap_err(),
        RelockError::InvalidOption(_)
    ));
    assert!(matches!(
        handle.set_resource_name("not a name!").unwrap_err(),
        RelockError::InvalidResourceName(_)
    ));
}

#[test]
fn resource_name_freezes_once_a_request_was_issued() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    assert_eq!(
        handle.set_resource_name("blue").unwrap(),
        SetStatus::Applied
    );

    handle.lock().unwrap();

    // Soft rejection: reported as immutable, not an error, previous value kept.
    assert_eq!(
        handle.set_resource_name("green").unwrap(),
        SetStatus::ImmutableIgnored
    );
    assert_eq!(handle.resource_name().unwrap(), "blue");
}

#[test]
fn resource_name_stays_frozen_after_a_failed_request() {
    let transport = ScriptedTransport::new();
    transport.push_response(Err(RelockError::ConnectionClosed));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    assert_eq!(handle.lock().unwrap_err(), RelockError::ConnectionClosed);

    assert_eq!(
        handle.set_resource_name("blue").unwrap(),
        SetStatus::ImmutableIgnored
    );
    assert_eq!(handle.resource_name().unwrap(), "red");
}

// =============================================================================
// Local validation before dispatch
// =============================================================================

#[test]
fn quantity_beyond_declared_capacity_is_rejected_locally() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_resource_name("printers[2]").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_quantity(3).unwrap();

    assert!(matches!(handle.lock().unwrap_err(), RelockError::OutOfRange(_)));
    // Never clamped, never dispatched.
    assert!(transport.connects().is_empty());
}

#[test]
fn quantity_above_one_on_a_non_numeric_resource_is_rejected_locally() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_resource_name("red.blue.green").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_quantity(2).unwrap();

    assert!(matches!(
        handle.lock().unwrap_err(),
        RelockError::InvalidOption(_)
    ));
    assert!(transport.connects().is_empty());
}

#[test]
fn quantity_is_only_sent_for_numeric_resources() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("printers[4]").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_quantity(2).unwrap();
    handle.lock().unwrap();

    assert_eq!(transport.requests()[0].quantity, Some(2));
}

// =============================================================================
// Busy / enqueued / wait
// =============================================================================

#[test]
fn busy_with_no_wait_reports_busy() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::status(LockStatus::Busy)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_timeout(0).unwrap();

    assert_eq!(handle.lock().unwrap_err(), RelockError::LockBusy);
    assert_eq!(handle.state(), HandleState::Configured);
    assert!(transport.waits().is_empty());
}

#[test]
fn enqueued_with_no_wait_reports_cant_wait_without_blocking() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::status(LockStatus::Enqueued)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_timeout(0).unwrap();

    assert_eq!(handle.lock().unwrap_err(), RelockError::LockCantWait);
    assert!(transport.waits().is_empty());
}

#[test]
fn enqueued_with_bounded_wait_blocks_up_to_the_bound() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::status(LockStatus::Enqueued)));
    transport.push_response(Ok(LockResponse::granted(None, Some("sess-9"))));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_timeout(2500).unwrap();

    handle.lock().unwrap();
    assert_eq!(handle.state(), HandleState::Locked);
    assert_eq!(transport.waits(), vec![Some(Duration::from_millis(2500))]);
}

#[test]
fn enqueued_with_unbounded_wait_passes_no_bound() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::status(LockStatus::Enqueued)));
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_timeout(-1).unwrap();

    handle.lock().unwrap();
    assert_eq!(transport.waits(), vec![None]);
}

#[test]
fn expired_wait_reports_busy_with_no_implicit_retry() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::status(LockStatus::Enqueued)));
    transport.push_response(Err(RelockError::Timeout("wait bound expired".to_string())));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_resource_timeout(100).unwrap();

    assert_eq!(handle.lock().unwrap_err(), RelockError::LockBusy);
    assert_eq!(handle.state(), HandleState::Configured);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.waits().len(), 1);
}

// =============================================================================
// Endpoint resolution and discovery
// =============================================================================

#[test]
fn unicast_takes_precedence_over_socket_and_multicast() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.set_unicast_address("10.0.0.7").unwrap();
    handle.set_unicast_port(7777).unwrap();
    handle.set_multicast_address("239.255.0.1").unwrap();
    handle.lock().unwrap();

    assert_eq!(
        transport.connects(),
        vec![Endpoint::Tcp {
            address: "10.0.0.7".to_string(),
            port: 7777
        }]
    );
}

#[test]
fn tls_material_is_passed_through_for_unicast_connections() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_unicast_address("10.0.0.7").unwrap();
    handle.set_tls_certificate("/etc/relock/client.pem").unwrap();
    handle.set_tls_private_key("/etc/relock/client.key").unwrap();
    handle.set_tls_ca_certificate("/etc/relock/ca.pem").unwrap();
    handle.set_tls_check_peer_id(true).unwrap();
    handle.lock().unwrap();

    let tls = transport.tls_seen();
    assert_eq!(tls.len(), 1);
    let tls = tls[0].as_ref().unwrap();
    assert_eq!(tls.certificate, "/etc/relock/client.pem");
    assert!(tls.check_peer_id);
}

#[test]
fn partial_tls_material_fails_in_the_tls_band_before_connecting() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_unicast_address("10.0.0.7").unwrap();
    handle.set_tls_certificate("/etc/relock/client.pem").unwrap();

    assert!(matches!(handle.lock().unwrap_err(), RelockError::TlsConfig(_)));
    assert!(transport.connects().is_empty());
}

#[test]
fn multicast_discovery_retries_up_to_the_configured_attempts() {
    let transport = ScriptedTransport::new();
    transport.fail_connects(3, RelockError::Timeout("no daemon answered".to_string()));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_multicast_address("239.255.0.1").unwrap();
    handle.set_discovery_attempts(3).unwrap();
    handle.set_discovery_timeout(0).unwrap();
    handle.set_discovery_ttl(4).unwrap();

    assert!(matches!(
        handle.lock().unwrap_err(),
        RelockError::DaemonNotReached(_)
    ));
    let connects = transport.connects();
    assert_eq!(connects.len(), 3);
    assert!(connects.iter().all(|endpoint| matches!(
        endpoint,
        Endpoint::Multicast { address, ttl: 4, .. } if address == "239.255.0.1"
    )));
}

#[test]
fn discovery_stops_at_the_first_successful_probe() {
    let transport = ScriptedTransport::new();
    transport.fail_connects(1, RelockError::Timeout("no daemon answered".to_string()));
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_multicast_address("239.255.0.1").unwrap();
    handle.set_discovery_attempts(4).unwrap();
    handle.set_discovery_timeout(0).unwrap();

    handle.lock().unwrap();
    assert_eq!(transport.connects().len(), 2);
}

#[test]
fn no_endpoint_at_all_is_daemon_not_reached() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();

    assert!(matches!(
        handle.lock().unwrap_err(),
        RelockError::DaemonNotReached(_)
    ));
    assert!(transport.connects().is_empty());
}

#[test]
fn dead_connection_is_dropped_and_the_next_lock_reconnects() {
    let transport = ScriptedTransport::new();
    transport.push_response(Err(RelockError::ConnectionClosed));
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    assert_eq!(handle.lock().unwrap_err(), RelockError::ConnectionClosed);

    // The retry opens a fresh dialogue instead of reusing the dead one.
    handle.lock().unwrap();
    assert_eq!(handle.state(), HandleState::Locked);
    assert_eq!(transport.connects().len(), 2);
}

#[test]
fn connection_survives_a_non_fatal_request_error() {
    let transport = ScriptedTransport::new();
    transport.push_response(Err(RelockError::MsgDeserialize(
        "truncated answer".to_string(),
    )));
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();

    assert!(matches!(
        handle.lock().unwrap_err(),
        RelockError::MsgDeserialize(_)
    ));

    handle.lock().unwrap();
    assert_eq!(transport.connects().len(), 1);
}

// =============================================================================
// Release semantics
// =============================================================================

#[test]
fn mismatched_unique_id_echo_is_reported() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, Some("sess-1"))));
    transport.push_response(Ok(released(Some("sess-2"))));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();

    assert_eq!(handle.unlock().unwrap_err(), RelockError::UniqueIdMismatch);
}

#[test]
fn freeing_a_locked_handle_does_not_unlock() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut handle = handle_with(&transport);
    handle.set_resource_name("red").unwrap();
    handle.set_socket_name("/tmp/relockd.sock").unwrap();
    handle.lock().unwrap();
    handle.free().unwrap();

    // Only the lock request went out; no release was sent on teardown.
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn dropping_a_handle_is_silent_even_after_free() {
    let transport = ScriptedTransport::new();
    let mut handle = handle_with(&transport);
    handle.free().unwrap();
    drop(handle);
}

// =============================================================================
// Construction from config
// =============================================================================

#[test]
fn with_config_validates_before_construction() {
    let transport = ScriptedTransport::new();
    let mut config = HandleConfig::default();
    config.discovery_attempts = 0;

    assert!(matches!(
        LockHandle::with_config(transport.boxed(), config).unwrap_err(),
        RelockError::OutOfRange(_)
    ));
}

#[test]
fn with_config_seeds_the_handle() {
    let transport = ScriptedTransport::new();
    transport.push_response(Ok(LockResponse::granted(None, None)));

    let mut config = HandleConfig::default();
    config.socket_name = "/tmp/relockd.sock".to_string();
    config.resource_name = "red.blue.green".to_string();
    config.lock_mode = LockMode::ProtectedRead;
    config.resource_timeout_ms = 0;

    let mut handle = LockHandle::with_config(transport.boxed(), config).unwrap();
    assert_eq!(handle.resource_name().unwrap(), "red.blue.green");
    handle.lock().unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.mode, LockMode::ProtectedRead);
    assert_eq!(request.wait, WaitPolicy::NoWait);
}
