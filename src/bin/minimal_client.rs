use std::process::ExitCode;

use add_two_ints_client::{
    logging, naming, ClientConfig, IpcConnect, RequestLoopRunner, Runtime, ServiceClient,
};
use tracing::error;

#[tokio::main]
pub async fn main() -> ExitCode {
    logging::init_tracing();
    let runtime = Runtime::init();
    let config = ClientConfig::from_args(std::env::args());

    if let Err(e) = naming::to_absolute_name(&config.service_name) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let client = ServiceClient::new(
        config.service_name.clone(),
        IpcConnect::new(config.service_name.clone(), config.codec),
    );
    let code = RequestLoopRunner::new(client, runtime, config)
        .run_to_exit_code()
        .await;
    ExitCode::from(code)
}
