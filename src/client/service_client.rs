use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant};
use tower::{util::BoxService, Service, ServiceExt};
use tracing::{debug, trace};

use super::{ClientError, PendingResponse, RpcClient};
#[cfg(any(feature = "ipc", feature = "local"))]
use crate::Client;
use crate::{AddTwoIntsRequest, AddTwoIntsResponse};
#[cfg(feature = "ipc")]
use crate::{serde_codec, transport::ipc, Codec};

pub const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

pub type AddTwoIntsService = BoxService<AddTwoIntsRequest, AddTwoIntsResponse, ClientError>;

/// Establishes a fresh connection to the service.
#[async_trait]
pub trait Connect: Send {
    async fn connect(&mut self) -> Result<AddTwoIntsService, ClientError>;
}

#[cfg(feature = "ipc")]
pub struct IpcConnect {
    service_name: String,
    codec: Codec,
}

#[cfg(feature = "ipc")]
impl IpcConnect {
    pub fn new(service_name: impl Into<String>, codec: Codec) -> Self {
        Self {
            service_name: service_name.into(),
            codec,
        }
    }
}

#[cfg(feature = "ipc")]
#[async_trait]
impl Connect for IpcConnect {
    async fn connect(&mut self) -> Result<AddTwoIntsService, ClientError> {
        let connection = ipc::connect(&self.service_name).await?;
        Ok(Client::new(serde_codec::<AddTwoIntsResponse, AddTwoIntsRequest>(
            connection, self.codec,
        ))
        .create_pipeline()
        .boxed())
    }
}

#[cfg(feature = "local")]
pub struct LocalConnect {
    connector: crate::transport::local::LocalConnector<AddTwoIntsRequest, AddTwoIntsResponse>,
}

#[cfg(feature = "local")]
impl LocalConnect {
    pub fn new(
        connector: crate::transport::local::LocalConnector<AddTwoIntsRequest, AddTwoIntsResponse>,
    ) -> Self {
        Self { connector }
    }
}

#[cfg(feature = "local")]
#[async_trait]
impl Connect for LocalConnect {
    async fn connect(&mut self) -> Result<AddTwoIntsService, ClientError> {
        let transport = self.connector.connect().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "local endpoint is closed",
            )
        })?;
        Ok(Client::new(transport).create_pipeline().boxed())
    }
}

/// Client bound to one named service. Connects on the first successful
/// readiness probe and keeps the connection for every later request.
pub struct ServiceClient<C> {
    service_name: String,
    connector: C,
    service: Option<AddTwoIntsService>,
    retry_interval: Duration,
}

impl<C> ServiceClient<C>
where
    C: Connect,
{
    pub fn new(service_name: impl Into<String>, connector: C) -> Self {
        Self {
            service_name: service_name.into(),
            connector,
            service: None,
            retry_interval: CONNECT_RETRY_INTERVAL,
        }
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }
}

#[async_trait]
impl<C> RpcClient for ServiceClient<C>
where
    C: Connect,
{
    async fn wait_for_service(&mut self, timeout: Duration) -> bool {
        if self.service.is_some() {
            return true;
        }
        let deadline = Instant::now() + timeout;
        loop {
            match time::timeout_at(deadline, self.connector.connect()).await {
                Ok(Ok(service)) => {
                    debug!(service = %self.service_name, "connected to service");
                    self.service = Some(service);
                    return true;
                }
                Ok(Err(e)) => {
                    trace!(service = %self.service_name, error = %e, "service not reachable");
                }
                Err(_) => return false,
            }
            let next_attempt = Instant::now() + self.retry_interval;
            if next_attempt >= deadline {
                time::sleep_until(deadline).await;
                return false;
            }
            time::sleep_until(next_attempt).await;
        }
    }

    async fn async_send_request(
        &mut self,
        request: AddTwoIntsRequest,
    ) -> Result<PendingResponse, ClientError> {
        let service = match self.service.as_mut() {
            Some(service) => service,
            None => return Err(ClientError::NotConnected(self.service_name.clone())),
        };
        trace!(service = %self.service_name, ?request, "sending request");
        let service = service.ready().await?;
        Ok(service.call(request))
    }
}
