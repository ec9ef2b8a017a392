use std::{error::Error, io, marker::PhantomData};

use serde::{de::DeserializeOwned, Serialize};
#[cfg(feature = "bincode")]
use tokio_serde::formats::Bincode;
#[cfg(feature = "json")]
use tokio_serde::formats::Json;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use super::{AsyncReadWrite, Codec, CodecStream};

pub fn serde_codec<Req, Res>(
    incoming: impl AsyncReadWrite,
    codec: Codec,
) -> CodecStream<Req, Res, io::Error, io::Error>
where
    Req: Serialize + DeserializeOwned + Unpin + Send + 'static,
    Res: Serialize + DeserializeOwned + Unpin + Send + 'static,
{
    let stream = Framed::new(incoming, LengthDelimitedCodec::new());

    match codec {
        #[cfg(feature = "bincode")]
        Codec::Bincode => Box::new(tokio_serde::Framed::<_, Req, Res, _>::new(
            stream,
            Bincode::<Req, Res>::default(),
        )),
        #[cfg(feature = "json")]
        Codec::Json => Box::new(tokio_serde::Framed::<_, Req, Res, _>::new(
            stream,
            Json::<Req, Res>::default(),
        )),
    }
}

/// Turns a raw connection into a typed, framed stream.
pub trait CodecBuilder: Send {
    type Req: Send;
    type Res: Send;
    type StreamErr: Error + Send + Sync + 'static;
    type SinkErr: Error + Send + Sync + 'static;

    fn build_codec(
        &self,
        incoming: impl AsyncReadWrite,
    ) -> CodecStream<Self::Req, Self::Res, Self::StreamErr, Self::SinkErr>;
}

pub struct SerdeCodec<Req, Res> {
    _phantom: PhantomData<(Req, Res)>,
    codec: Codec,
}

impl<Req, Res> SerdeCodec<Req, Res> {
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            _phantom: Default::default(),
        }
    }
}

impl<Req, Res> CodecBuilder for SerdeCodec<Req, Res>
where
    Req: Serialize + DeserializeOwned + Unpin + Send + 'static,
    Res: Serialize + DeserializeOwned + Unpin + Send + 'static,
{
    type Req = Req;
    type Res = Res;
    type SinkErr = io::Error;
    type StreamErr = io::Error;

    fn build_codec(
        &self,
        incoming: impl AsyncReadWrite,
    ) -> CodecStream<Self::Req, Self::Res, Self::StreamErr, Self::SinkErr> {
        serde_codec(incoming, self.codec)
    }
}
