use add_two_ints_client::{
    logging,
    service::AddTwoIntsHandler,
    transport::{
        ipc::{self, OnConflict, SecurityAttributes},
        CodecTransport,
    },
    AddTwoIntsRequest, AddTwoIntsResponse, Codec, SerdeCodec, Server, DEFAULT_SERVICE_NAME,
};
use background_service::BackgroundServiceManager;
use eyre::{eyre, WrapErr};
use tokio_util::sync::CancellationToken;
use tower::service_fn;
use tracing::info;

#[tokio::main]
pub async fn main() -> eyre::Result<()> {
    logging::init_tracing();
    let service_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned());

    let cancellation_token = CancellationToken::default();
    let manager = BackgroundServiceManager::new(cancellation_token.clone());
    let transport = ipc::create_endpoint(
        &service_name,
        SecurityAttributes::allow_everyone_create()
            .wrap_err("Failed to set security attributes")?,
        OnConflict::Overwrite,
    )
    .wrap_err_with(|| format!("Failed to bind service {service_name}"))?;

    let server = Server::pipeline(
        CodecTransport::new(
            transport,
            SerdeCodec::<AddTwoIntsRequest, AddTwoIntsResponse>::new(Codec::default()),
        ),
        service_fn(AddTwoIntsHandler::make),
    );
    let mut context = manager.get_context();
    context
        .add_service(server)
        .await
        .map_err(|e| eyre!("{e:?}"))?;
    info!(service = %service_name, "service ready");

    tokio::signal::ctrl_c()
        .await
        .wrap_err("Failed to listen for interrupts")?;
    info!("shutting down");
    cancellation_token.cancel();
    manager
        .join_on_cancel()
        .await
        .map_err(|e| eyre!("{e:?}"))?;
    Ok(())
}
