use async_trait::async_trait;

mod client;
pub use client::*;
mod codec;
pub use codec::*;
mod config;
pub use config::*;
pub mod logging;
mod message;
pub use message::*;
pub mod naming;
mod runner;
pub use runner::*;
mod runtime;
pub use runtime::*;
mod server;
pub use server::*;
pub mod service;
pub mod transport;
use tower::{Service, ServiceExt};

#[async_trait]
pub trait ReadyServiceExt<Request>: Service<Request>
where
    Request: Send,
{
    async fn call_ready(&mut self, request: Request) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<S, Request> ReadyServiceExt<Request> for S
where
    Request: Send + 'static,
    S::Future: Send,
    S::Error: Send,
    S: Service<Request> + Send,
{
    async fn call_ready(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        self.ready().await?.call(request).await
    }
}
