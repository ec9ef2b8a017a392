use async_trait::async_trait;
use background_service::{error::BoxedError, BackgroundService, ServiceContext};
use futures::{Sink, Stream, TryStream};
use futures_cancel::FutureExt;
use std::{fmt::Debug, marker::PhantomData};
use tokio_stream::StreamExt;
use tokio_tower::pipeline;
use tower::MakeService;
use tracing::{debug, warn};

/// Pipelined server: accepts connections from `incoming` and answers each
/// one, in order, with a handler built by `handler`.
pub struct Server<K, H, S, I, E, Req, Res>
where
    K: MakeService<(), Req, Service = H>,
    H: tower::Service<Req, Response = Res>,
    S: Stream<Item = Result<I, E>>,
{
    incoming: S,
    handler: K,
    _phantom: PhantomData<(H, Req, Res)>,
}

impl<K, H, S, I, E, Req, Res> Server<K, H, S, I, E, Req, Res>
where
    K: MakeService<(), Req, Service = H>,
    K::MakeError: Debug,
    H: tower::Service<Req, Response = Res> + Send + 'static,
    H::Future: Send + 'static,
    H::Error: Debug + Send,
    S: Stream<Item = Result<I, E>> + Send,
    I: TryStream<Ok = Req> + Sink<Res> + Send + 'static,
    <I as TryStream>::Error: Debug,
    <I as Sink<Res>>::Error: Debug,
    E: Debug + Send,
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    pub fn pipeline(incoming: S, handler: K) -> Self {
        Self {
            incoming,
            handler,
            _phantom: Default::default(),
        }
    }

    async fn run_pipeline(mut self, mut context: ServiceContext) -> Result<(), BoxedError> {
        let incoming = self.incoming;
        futures::pin_mut!(incoming);
        while let Ok(Some(next)) = incoming
            .next()
            .cancel_on_shutdown(&context.cancellation_token())
            .await
        {
            let stream = match next {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("failed to accept connection: {e:?}");
                    continue;
                }
            };
            debug!("client connected");
            let handler = self
                .handler
                .make_service(())
                .await
                .map_err(|e| format!("{e:?}"))?;
            context
                .add_service((
                    "add_two_ints_connection".to_owned(),
                    move |context: ServiceContext| async move {
                        if let Ok(res) = pipeline::Server::new(stream, handler)
                            .cancel_on_shutdown(&context.cancellation_token())
                            .await
                        {
                            debug!("client disconnected");
                            return Ok(res.map_err(|e| format!("{e:?}"))?);
                        }

                        Ok(())
                    },
                ))
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl<K, H, S, I, E, Req, Res> BackgroundService for Server<K, H, S, I, E, Req, Res>
where
    K: MakeService<(), Req, Service = H> + Send,
    K::MakeError: Debug,
    K::Future: Send,
    H: tower::Service<Req, Response = Res> + Send + 'static,
    H::Future: Send + 'static,
    H::Error: Debug + Send,
    S: Stream<Item = Result<I, E>> + Send,
    I: TryStream<Ok = Req> + Sink<Res> + Send + 'static,
    <I as TryStream>::Error: Debug,
    <I as Sink<Res>>::Error: Debug,
    E: Debug + Send,
    Req: Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "add_two_ints_server"
    }

    async fn run(mut self, context: ServiceContext) -> Result<(), BoxedError> {
        self.run_pipeline(context).await
    }
}
