use election_tokio_rpc_server::RpcServer;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_serve_with_shutdown_returns_bound_address() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = Arc::new(RpcServer::new());
    let serve_task = tokio::spawn(server.serve_with_shutdown(listener, async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!serve_task.is_finished());

    stop_tx.send(()).unwrap();
    let served_on = tokio::time::timeout(Duration::from_secs(5), serve_task)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    assert_eq!(served_on, addr);
}

#[tokio::test]
async fn test_serve_fails_on_address_in_use() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap();

    let res = RpcServer::new().serve(addr).await;

    assert!(res.is_err());
}
