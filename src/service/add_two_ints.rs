use std::{
    convert::Infallible,
    future,
    task::{Context, Poll},
};

use tower::BoxError;
use tracing::info;

use crate::{AddTwoIntsRequest, AddTwoIntsResponse};

/// Answers every request with `a + b`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddTwoIntsHandler;

impl AddTwoIntsHandler {
    /// Factory for [`tower::service_fn`], one handler per connection.
    pub fn make(_: ()) -> future::Ready<Result<Self, Infallible>> {
        future::ready(Ok(Self))
    }
}

impl tower::Service<AddTwoIntsRequest> for AddTwoIntsHandler {
    type Response = AddTwoIntsResponse;
    type Error = BoxError;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: AddTwoIntsRequest) -> Self::Future {
        info!("Incoming request a: {} b: {}", req.a, req.b);
        future::ready(Ok(req.sum()))
    }
}
