#![cfg(unix)]

use std::time::Duration;

use add_two_ints_client::{
    service::AddTwoIntsHandler,
    transport::{
        ipc::{self, OnConflict, SecurityAttributes},
        CodecTransport,
    },
    AddTwoIntsRequest, AddTwoIntsResponse, ClientConfig, Codec, IpcConnect, RequestLoopRunner,
    Runtime, SerdeCodec, Server, ServiceClient,
};
use background_service::BackgroundServiceManager;
use tokio_util::sync::CancellationToken;
use tower::service_fn;

fn unique_name(test: &str) -> String {
    format!("add_two_ints_{test}_{}", std::process::id())
}

async fn serve(
    service_name: &str,
    codec: Codec,
) -> (CancellationToken, BackgroundServiceManager) {
    let cancellation_token = CancellationToken::default();
    let manager = BackgroundServiceManager::new(cancellation_token.clone());
    let transport = ipc::create_endpoint(
        service_name,
        SecurityAttributes::empty(),
        OnConflict::Overwrite,
    )
    .unwrap();
    let server = Server::pipeline(
        CodecTransport::new(
            transport,
            SerdeCodec::<AddTwoIntsRequest, AddTwoIntsResponse>::new(codec),
        ),
        service_fn(AddTwoIntsHandler::make),
    );
    let mut context = manager.get_context();
    context.add_service(server).await.unwrap();
    (cancellation_token, manager)
}

fn client_config(service_name: &str, seed: &str) -> ClientConfig {
    ClientConfig::from_args(["minimal_client", service_name, seed])
        .with_poll_interval(Duration::from_millis(200))
}

fn client_for(config: &ClientConfig) -> ServiceClient<IpcConnect> {
    ServiceClient::new(
        config.service_name.clone(),
        IpcConnect::new(config.service_name.clone(), config.codec),
    )
}

#[tokio::test]
async fn exchanges_over_a_socket() {
    let service_name = unique_name("socket");
    let (cancellation_token, manager) = serve(&service_name, Codec::default()).await;

    let config = client_config(&service_name, "100");
    let exchanges = RequestLoopRunner::new(client_for(&config), Runtime::default(), config)
        .run()
        .await
        .unwrap();

    let sums: Vec<_> = exchanges.iter().map(|e| e.response.sum).collect();
    assert_eq!(sums, (101..=110).collect::<Vec<_>>());

    cancellation_token.cancel();
    manager.join_on_cancel().await.unwrap();
}

#[tokio::test]
async fn client_waits_for_a_late_service() {
    let service_name = unique_name("late");
    let _ = std::fs::remove_file(ipc::get_socket_address(&service_name).unwrap());

    let delayed_name = service_name.clone();
    let service = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        serve(&delayed_name, Codec::default()).await
    });

    let config = client_config(&service_name, "-3");
    let code = RequestLoopRunner::new(client_for(&config), Runtime::default(), config)
        .run_to_exit_code()
        .await;
    assert_eq!(code, 0);

    let (cancellation_token, manager) = service.await.unwrap();
    cancellation_token.cancel();
    manager.join_on_cancel().await.unwrap();
}

#[cfg(feature = "json")]
#[tokio::test]
async fn exchanges_with_the_json_codec() {
    let service_name = unique_name("json");
    let (cancellation_token, manager) = serve(&service_name, Codec::Json).await;

    let config = client_config(&service_name, "5").with_codec(Codec::Json);
    let exchanges = RequestLoopRunner::new(client_for(&config), Runtime::default(), config)
        .run()
        .await
        .unwrap();

    let sums: Vec<_> = exchanges.iter().map(|e| e.response.sum).collect();
    assert_eq!(sums, (6..=15).collect::<Vec<_>>());

    cancellation_token.cancel();
    manager.join_on_cancel().await.unwrap();
}
