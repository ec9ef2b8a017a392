use tracing::{error, info, info_span, Instrument};

use crate::{
    AddTwoIntsRequest, ClientConfig, ClientError, Exchange, Resolution, RpcClient, Runtime,
};

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("client interrupted while waiting for service to appear")]
    Interrupted,
    #[error("service call failed for b = {b}: {source}")]
    ExchangeFailed {
        b: i64,
        #[source]
        source: ClientError,
    },
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Drives one client node through its whole run: wait for the service, then
/// send `exchange_count` sequential requests `(seed, 1)..=(seed, n)`.
pub struct RequestLoopRunner<C> {
    client: C,
    runtime: Runtime,
    config: ClientConfig,
}

impl<C> RequestLoopRunner<C>
where
    C: RpcClient,
{
    pub fn new(client: C, runtime: Runtime, config: ClientConfig) -> Self {
        Self {
            client,
            runtime,
            config,
        }
    }

    /// Polls until the service is reachable. Only an interrupted runtime ends
    /// the wait early.
    pub async fn await_service_ready(&mut self) -> Result<(), RunError> {
        loop {
            let ready = self
                .runtime
                .spin_until_complete(self.client.wait_for_service(self.config.poll_interval))
                .await;
            if ready == Resolution::Resolved(true) {
                return Ok(());
            }
            if !self.runtime.ok() {
                error!("client interrupted while waiting for service to appear.");
                return Err(RunError::Interrupted);
            }
            info!("waiting for service to appear...");
        }
    }

    /// Sends one request per `b` in `1..=exchange_count` and stops at the
    /// first one that does not resolve.
    pub async fn run_exchanges(&mut self) -> Result<Vec<Exchange>, RunError> {
        let a = self.config.seed;
        let mut exchanges = Vec::with_capacity(self.config.exchange_count as usize);
        for b in 1..=i64::from(self.config.exchange_count) {
            let request = AddTwoIntsRequest::new(a, b);
            let response = match self.exchange(request).await {
                Ok(response) => response,
                Err(source) => {
                    error!(b, error = %source, "service call failed :(");
                    return Err(RunError::ExchangeFailed { b, source });
                }
            };
            info!("result of {} + {} = {}", request.a, request.b, response.sum);
            exchanges.push(Exchange { request, response });
        }
        Ok(exchanges)
    }

    async fn exchange(
        &mut self,
        request: AddTwoIntsRequest,
    ) -> Result<crate::AddTwoIntsResponse, ClientError> {
        let pending = match self
            .runtime
            .spin_until_complete(self.client.async_send_request(request))
            .await
        {
            Resolution::Resolved(pending) => pending?,
            Resolution::Interrupted => return Err(ClientError::Interrupted),
        };
        match self.runtime.spin_until_complete(pending).await {
            Resolution::Resolved(response) => response,
            Resolution::Interrupted => Err(ClientError::Interrupted),
        }
    }

    /// Full run. Shuts the runtime down only when every exchange succeeded.
    pub async fn run(mut self) -> Result<Vec<Exchange>, RunError> {
        let span = info_span!("node", name = %self.config.node_name());
        async move {
            info!(service = %self.config.service_name, seed = self.config.seed, "starting client");
            self.await_service_ready().await?;
            let exchanges = self.run_exchanges().await?;
            self.runtime.shutdown();
            Ok(exchanges)
        }
        .instrument(span)
        .await
    }

    /// Runs to completion and maps the outcome to a process exit code.
    pub async fn run_to_exit_code(self) -> u8 {
        match self.run().await {
            Ok(_) => 0,
            Err(e) => e.exit_code(),
        }
    }
}
