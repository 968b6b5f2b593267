//! Transaction validation and retry behavior against a scripted
//! transport: echo matching, bounded retries, and the session error
//! counter.

use serde_json::json;

use macnet_client::mock::{Reply, ScriptedTransport};
use macnet_client::{ClientConfig, MacNetClient, MacNetError, Operation};

fn make_client(transport: ScriptedTransport) -> MacNetClient<ScriptedTransport> {
    MacNetClient::with_transport(transport, ClientConfig::default())
}

fn voltage_echo(chan: u32, len: u32, volts: &[f64]) -> serde_json::Value {
    json!({
        "result": {
            "FClass": 4, "FNum": 2, "Chan": chan, "Len": len,
            "Voltage": volts
        }
    })
}

#[test]
fn test_wrong_echo_exhausts_exactly_three_attempts() {
    let mut transport = ScriptedTransport::new();
    // Every reply echoes a different channel than requested.
    transport.set_fallback_json(&voltage_echo(5, 1, &[3.7]));
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(1), None);
    let err = client
        .transact(&request, Operation::ReadVoltage.validated_fields(), 3)
        .unwrap_err();

    assert!(
        matches!(err, MacNetError::ValidationExhausted { attempts: 3 }),
        "expected ValidationExhausted after 3 attempts, got {:?}",
        err
    );
    assert_eq!(client.transport().attempts(), 3, "exactly 3 inner attempts");
    assert_eq!(client.comm_errors(), 3, "counter increments once per attempt");
}

#[test]
fn test_correct_echo_on_second_attempt_stops_retrying() {
    let mut transport = ScriptedTransport::new();
    transport.enqueue_json(&voltage_echo(5, 1, &[3.7])); // stale
    transport.enqueue_json(&voltage_echo(0, 1, &[4.1])); // matches
    transport.enqueue_json(&voltage_echo(0, 1, &[9.9])); // must never be read
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(1), None);
    let response = client
        .transact(&request, Operation::ReadVoltage.validated_fields(), 3)
        .unwrap();

    assert!(response.result.is_some());
    assert_eq!(client.transport().attempts(), 2, "no third attempt");
    assert_eq!(client.comm_errors(), 1);
}

#[test]
fn test_transport_failures_inside_retry_loop_are_retried() {
    let mut transport = ScriptedTransport::new();
    transport.enqueue_failure(Reply::Timeout);
    transport.enqueue_failure(Reply::PeerClosed);
    transport.enqueue_json(&voltage_echo(0, 1, &[4.1]));
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(1), None);
    let response = client
        .transact(&request, Operation::ReadVoltage.validated_fields(), 3)
        .unwrap();

    assert!(response.result.is_some());
    assert_eq!(client.transport().attempts(), 3);
    assert_eq!(client.comm_errors(), 2);
}

#[test]
fn test_garbage_reply_inside_retry_loop_is_retried() {
    let mut transport = ScriptedTransport::new();
    transport.enqueue_frame(b"}{ not json".to_vec());
    transport.enqueue_json(&voltage_echo(0, 1, &[4.1]));
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(1), None);
    let response = client
        .transact(&request, Operation::ReadVoltage.validated_fields(), 3)
        .unwrap();

    assert!(response.result.is_some());
    assert_eq!(client.comm_errors(), 1);
}

#[test]
fn test_counter_accumulates_across_calls() {
    let mut transport = ScriptedTransport::new();
    transport.enqueue_json(&voltage_echo(9, 1, &[0.0])); // stale for call 1
    transport.enqueue_json(&voltage_echo(0, 1, &[4.1])); // call 1 succeeds
    transport.enqueue_json(&voltage_echo(0, 1, &[4.1])); // call 2 clean
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(1), None);
    let fields = Operation::ReadVoltage.validated_fields();
    client.transact(&request, fields, 3).unwrap();
    client.transact(&request, fields, 3).unwrap();

    assert_eq!(client.comm_errors(), 1, "counter persists across calls");
}

#[test]
fn test_sent_frames_are_double_quoted_json() {
    let mut transport = ScriptedTransport::new();
    transport.enqueue_json(&voltage_echo(0, 2, &[4.1, 4.0]));
    let mut client = make_client(transport);

    let request = Operation::ReadVoltage.request(0, Some(2), None);
    client
        .transact(&request, Operation::ReadVoltage.validated_fields(), 3)
        .unwrap();

    let frame = &client.transport().sent_frames()[0];
    let text = std::str::from_utf8(frame).unwrap();
    assert!(!text.contains('\''), "firmware rejects single quotes");
    // Every attempt re-sends the identical envelope.
    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["jsonrpc"], "2.0");
    assert_eq!(parsed["method"], "MacNet");
    assert_eq!(parsed["id"], 1987);
    assert_eq!(parsed["params"]["FClass"], 4);
    assert_eq!(parsed["params"]["FNum"], 2);
}
