//! Client side of the add-two-ints service.
//!
//! [`RpcClient`] is the narrow capability the request loop consumes: a
//! readiness probe with a timeout and a submit that hands back a pending
//! response. [`ServiceClient`] implements it on top of a tower pipeline
//! client, connecting lazily through a [`Connect`] implementation.

use std::{fmt::Debug, io, marker::PhantomData, time::Duration};

use async_trait::async_trait;
use futures::{future::BoxFuture, Sink, TryStream};
use tokio_tower::pipeline;

use crate::{AddTwoIntsRequest, AddTwoIntsResponse};

mod service_client;
pub use service_client::*;

/// Handle for a request that has been submitted but not answered yet.
pub type PendingResponse = BoxFuture<'static, Result<AddTwoIntsResponse, ClientError>>;

#[async_trait]
pub trait RpcClient: Send {
    /// Waits up to `timeout` for the service to become reachable.
    async fn wait_for_service(&mut self, timeout: Duration) -> bool;

    async fn async_send_request(
        &mut self,
        request: AddTwoIntsRequest,
    ) -> Result<PendingResponse, ClientError>;
}

pub struct Client<S, Req, Res> {
    stream: S,
    _phantom: PhantomData<(Req, Res)>,
}

impl<S, Req, Res> Client<S, Req, Res>
where
    S: TryStream<Ok = Res> + Sink<Req> + Send + 'static,
    <S as futures::TryStream>::Error: Debug,
    <S as futures::Sink<Req>>::Error: Debug,
    Req: Send + 'static,
    Res: Send + 'static,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            _phantom: Default::default(),
        }
    }

    pub fn create_pipeline(self) -> pipeline::Client<S, ClientError, Req> {
        pipeline::Client::new(self.stream)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unable to connect: {0}")]
    Connect(#[from] io::Error),
    #[error("not connected to service {0}")]
    NotConnected(String),
    #[error("runtime shut down before the response arrived")]
    Interrupted,
}

impl<T, I> From<tokio_tower::Error<T, I>> for ClientError
where
    T: Sink<I> + TryStream,
    <T as Sink<I>>::Error: Debug,
    <T as futures::TryStream>::Error: Debug,
{
    fn from(e: tokio_tower::Error<T, I>) -> Self {
        Self::Transport(format!("{e:?}"))
    }
}
