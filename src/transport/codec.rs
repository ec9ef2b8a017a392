use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use pin_project::pin_project;

use crate::{AsyncReadWrite, CodecBuilder, CodecStream};

/// Wraps a stream of raw connections so that every accepted connection comes
/// out framed by `C`.
#[pin_project]
pub struct CodecTransport<S, C> {
    #[pin]
    incoming: S,
    codec_builder: C,
}

impl<S, C> CodecTransport<S, C> {
    pub fn new(incoming: S, codec_builder: C) -> Self {
        Self {
            incoming,
            codec_builder,
        }
    }
}

impl<S, I, E, C> Stream for CodecTransport<S, C>
where
    S: Stream<Item = Result<I, E>>,
    I: AsyncReadWrite,
    C: CodecBuilder,
{
    type Item = Result<CodecStream<C::Req, C::Res, C::StreamErr, C::SinkErr>, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let codec_builder = this.codec_builder;
        this.incoming
            .poll_next(cx)
            .map(|next| next.map(|conn| conn.map(|conn| codec_builder.build_codec(conn))))
    }
}
