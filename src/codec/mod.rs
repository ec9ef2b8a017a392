use futures::{Sink, Stream};
use tokio::io::{AsyncRead, AsyncWrite};

mod serde;
pub use self::serde::*;

#[cfg(not(any(feature = "bincode", feature = "json")))]
compile_error!("at least one of the `bincode` or `json` features must be enabled");

/// Serialization format used inside each length-delimited frame.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Codec {
    #[cfg(feature = "bincode")]
    Bincode,
    #[cfg(feature = "json")]
    Json,
}

impl Default for Codec {
    #[cfg(feature = "bincode")]
    fn default() -> Self {
        Self::Bincode
    }

    #[cfg(not(feature = "bincode"))]
    fn default() -> Self {
        Self::Json
    }
}

pub trait StreamSink<SinkItem>: Stream + Sink<SinkItem> + Unpin + Send {}

impl<T, SinkItem> StreamSink<SinkItem> for T where T: Stream + Sink<SinkItem> + Unpin + Send {}

/// A framed connection that yields `Req` and accepts `Res`.
pub type CodecStream<Req, Res, StreamErr, SinkErr> =
    Box<dyn StreamSink<Res, Item = Result<Req, StreamErr>, Error = SinkErr>>;

pub trait AsyncReadWrite: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> AsyncReadWrite for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}
