//! Drives a two-component Jacobi coordinator against a pair of in-process `fmitcp-server`
//! instances backed by `DummyAdapter`, exercising the full connect → instantiate → initialize →
//! step → transfer path end to end over real TCP sockets.

use std::sync::Arc;

use fmi_master::{Connection, Coordinator, PrimitiveType, StepOrder};
use fmi_tcp_client::Client;
use fmi_tcp_server::{DispatcherConfig, DummyAdapter, LifecycleState, NoopHooks, Server};

async fn spawn_dummy_server() -> std::net::SocketAddr {
    let server = Server::bind(
        "127.0.0.1",
        0,
        DummyAdapter,
        LifecycleState::Dummy,
        DispatcherConfig::default(),
        Arc::new(NoopHooks),
    )
    .await
    .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move { server.serve().await });
    addr
}

#[tokio::test]
async fn steps_two_components_and_transfers_a_connection() {
    let addr_a = spawn_dummy_server().await;
    let addr_b = spawn_dummy_server().await;

    let client_a = Client::connect(addr_a, 0).await.unwrap();
    let client_b = Client::connect(addr_b, 1).await.unwrap();

    for client in [&client_a, &client_b] {
        assert!(client
            .instantiate("inst", false)
            .await
            .unwrap()
            .is_ok_or_warning());
        assert!(client
            .initialize_slave(None, 0.0, Some(1.0))
            .await
            .unwrap()
            .is_ok_or_warning());
    }

    let connection = Connection::new(0, 1, PrimitiveType::Real, 1, 2, PrimitiveType::Real).unwrap();
    let mut coordinator = Coordinator::new(
        vec![client_a, client_b],
        vec![connection],
        StepOrder::sequential(2),
        0.0,
        0.1,
    );

    coordinator.step().await.unwrap();
    assert_eq!(coordinator.current_time(), 0.1);

    coordinator.run_to(1.0).await.unwrap();
    assert!(coordinator.current_time() >= 1.0);
}
