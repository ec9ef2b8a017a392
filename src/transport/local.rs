use core::fmt::Debug;
use futures::{Sink, Stream};
use std::{
    error::Error,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::mpsc::{self, error::SendError};

pub type LocalError = Box<dyn Error + Send + Sync + 'static>;

/// One end of an in-memory connection. Writes `SinkItem`, reads `StreamItem`.
#[derive(Debug)]
pub struct LocalTransport<SinkItem, StreamItem> {
    tx: mpsc::UnboundedSender<SinkItem>,
    rx: mpsc::UnboundedReceiver<StreamItem>,
}

impl<SinkItem: Debug, StreamItem> Sink<SinkItem> for LocalTransport<SinkItem, StreamItem> {
    type Error = LocalError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: SinkItem) -> Result<(), Self::Error> {
        self.tx.send(item).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }
}

impl<SinkItem, StreamItem> Stream for LocalTransport<SinkItem, StreamItem> {
    type Item = Result<StreamItem, LocalError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|s| s.map(Ok))
    }
}

/// Server side of an in-memory endpoint; yields one transport per connect.
pub struct LocalListener<Req, Res> {
    rx: mpsc::UnboundedReceiver<LocalTransport<Res, Req>>,
}

impl<Req, Res> Stream for LocalListener<Req, Res> {
    type Item = Result<LocalTransport<Res, Req>, LocalError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|s| s.map(Ok))
    }
}

/// Client side of an in-memory endpoint. Connecting fails once the listener
/// has been dropped.
pub struct LocalConnector<Req, Res> {
    tx: mpsc::UnboundedSender<LocalTransport<Res, Req>>,
}

impl<Req, Res> Clone for LocalConnector<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<Req, Res> LocalConnector<Req, Res> {
    pub fn connect(&self) -> Result<LocalTransport<Req, Res>, SendError<LocalTransport<Res, Req>>> {
        let (client_tx, server_rx) = mpsc::unbounded_channel();
        let (server_tx, client_rx) = mpsc::unbounded_channel();
        self.tx.send(LocalTransport {
            tx: server_tx,
            rx: server_rx,
        })?;
        Ok(LocalTransport {
            tx: client_tx,
            rx: client_rx,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub fn unbounded<Req, Res>() -> (LocalListener<Req, Res>, LocalConnector<Req, Res>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LocalListener { rx }, LocalConnector { tx })
}

#[cfg(test)]
mod tests {
    use futures::{SinkExt, StreamExt};

    use super::*;

    #[tokio::test]
    async fn connect_pairs_both_ends() {
        let (mut listener, connector) = unbounded::<u32, String>();
        let mut client = connector.connect().unwrap();
        let mut server = listener.next().await.unwrap().unwrap();

        client.send(7).await.unwrap();
        assert_eq!(server.next().await.unwrap().unwrap(), 7);
        server.send("seven".to_owned()).await.unwrap();
        assert_eq!(client.next().await.unwrap().unwrap(), "seven");
    }

    #[test]
    fn connect_fails_after_listener_is_dropped() {
        let (listener, connector) = unbounded::<u32, u32>();
        drop(listener);
        assert!(connector.is_closed());
        assert!(connector.connect().is_err());
    }
}
