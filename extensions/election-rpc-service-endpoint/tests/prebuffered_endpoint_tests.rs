use election_rpc::rpc::{RpcDispatcher, RpcRequest, RpcResponse};
use election_rpc_service::{RpcResultStatus, rpc_method_id};
use election_rpc_service_endpoint::{
    RpcServiceEndpoint,
    error::{HandlerPayloadError, RpcServiceEndpointError},
};
use std::sync::{Arc, Mutex};

const REVERSE: u64 = rpc_method_id!("test.reverse");
const REFUSE: u64 = rpc_method_id!("test.refuse");
const CRASH: u64 = rpc_method_id!("test.crash");

async fn endpoint_with_handlers() -> RpcServiceEndpoint<()> {
    let endpoint = RpcServiceEndpoint::new();

    endpoint
        .register_prebuffered(REVERSE, |_, mut bytes: Vec<u8>| async move {
            bytes.reverse();
            Ok(bytes)
        })
        .await
        .unwrap();
    endpoint
        .register_prebuffered(REFUSE, |_, _bytes: Vec<u8>| async move {
            Err(HandlerPayloadError(b"refused".to_vec()).into())
        })
        .await
        .unwrap();
    endpoint
        .register_prebuffered(CRASH, |_, _bytes: Vec<u8>| async move {
            Err("handler exploded".into())
        })
        .await
        .unwrap();

    endpoint
}

/// Simulates a full client -> server -> client roundtrip through encoded bytes.
async fn perform_request_response_cycle(
    endpoint: &RpcServiceEndpoint<()>,
    method_id: u64,
    param_bytes: &[u8],
) -> RpcResponse {
    let mut client_dispatcher = RpcDispatcher::new();
    let received = Arc::new(Mutex::new(None::<RpcResponse>));

    let request_bytes = client_dispatcher
        .call(method_id, param_bytes.to_vec(), {
            let received = received.clone();
            move |response| {
                *received.lock().unwrap() = Some(response);
            }
        })
        .unwrap();

    let client_bound_buffer = Arc::new(Mutex::new(Vec::<Vec<u8>>::new()));
    let mut server_dispatcher = RpcDispatcher::new();
    endpoint
        .read_bytes(&mut server_dispatcher, (), &request_bytes, {
            let client_bound_buffer = client_bound_buffer.clone();
            move |bytes: Vec<u8>| client_bound_buffer.lock().unwrap().push(bytes)
        })
        .await
        .unwrap();

    let emitted = client_bound_buffer.lock().unwrap().clone();
    assert_eq!(emitted.len(), 1, "exactly one response per call");
    client_dispatcher.read_bytes(&emitted[0]).unwrap();

    let response = received.lock().unwrap().take();
    response.expect("response should have been routed to the caller")
}

#[tokio::test]
async fn test_success_roundtrip() {
    let endpoint = endpoint_with_handlers().await;

    let response = perform_request_response_cycle(&endpoint, REVERSE, b"abc").await;

    assert_eq!(response.result_status, RpcResultStatus::Success);
    assert_eq!(response.payload_bytes, b"cba");
}

#[tokio::test]
async fn test_handler_payload_error_maps_to_fail() {
    let endpoint = endpoint_with_handlers().await;

    let response = perform_request_response_cycle(&endpoint, REFUSE, b"").await;

    assert_eq!(response.result_status, RpcResultStatus::Fail);
    assert_eq!(response.payload_bytes, b"refused");
}

#[tokio::test]
async fn test_other_handler_error_maps_to_system_error() {
    let endpoint = endpoint_with_handlers().await;

    let response = perform_request_response_cycle(&endpoint, CRASH, b"").await;

    assert_eq!(response.result_status, RpcResultStatus::SystemError);
    assert_eq!(response.payload_bytes, b"handler exploded");
}

#[tokio::test]
async fn test_unknown_method_maps_to_method_not_found() {
    let endpoint = endpoint_with_handlers().await;

    let response =
        perform_request_response_cycle(&endpoint, rpc_method_id!("test.missing"), b"").await;

    assert_eq!(response.result_status, RpcResultStatus::MethodNotFound);
    assert!(response.payload_bytes.is_empty());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let endpoint = endpoint_with_handlers().await;

    let err = endpoint
        .register_prebuffered(REVERSE, |_, bytes: Vec<u8>| async move { Ok(bytes) })
        .await
        .unwrap_err();

    assert!(matches!(err, RpcServiceEndpointError::AlreadyRegistered(id) if id == REVERSE));
    assert!(endpoint.is_registered(REVERSE).await);
}

#[tokio::test]
async fn test_malformed_bytes_fail_without_emitting() {
    let endpoint = endpoint_with_handlers().await;
    let mut dispatcher = RpcDispatcher::new();
    let emitted = Arc::new(Mutex::new(0usize));

    let err = endpoint
        .read_bytes(&mut dispatcher, (), b"\x00\x01truncated", {
            let emitted = emitted.clone();
            move |_bytes: Vec<u8>| *emitted.lock().unwrap() += 1
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RpcServiceEndpointError::Decode(_)));
    assert_eq!(*emitted.lock().unwrap(), 0);

    // The endpoint keeps serving well-formed calls afterwards
    let response = perform_request_response_cycle(&endpoint, REVERSE, b"ok").await;
    assert_eq!(response.payload_bytes, b"ko");
}

#[tokio::test]
async fn test_handle_request_passes_context() {
    let endpoint: RpcServiceEndpoint<u32> = RpcServiceEndpoint::new();
    endpoint
        .register_prebuffered(REVERSE, |ctx: u32, _bytes: Vec<u8>| async move {
            Ok(ctx.to_le_bytes().to_vec())
        })
        .await
        .unwrap();

    let request = RpcRequest {
        request_id: 11,
        method_id: REVERSE,
        payload_bytes: vec![],
    };
    let response = endpoint.handle_request(77, request).await;

    assert_eq!(response.request_id, 11);
    assert_eq!(response.payload_bytes, 77u32.to_le_bytes());
}
