// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Live chat channel abstraction.
//!
//! Queued messages are replayed only through an already-connected channel.
//! The manager never opens or reopens the connection itself; that belongs to
//! whoever owns the chat session.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use rh_core::ChannelMessage;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::{ChannelError, ChannelResult};

/// Boxed future returned by [`LiveChannel::send`].
pub type ChannelFuture<'a> = Pin<Box<dyn Future<Output = ChannelResult<()>> + Send + 'a>>;

/// A bidirectional real-time channel that may or may not be connected.
pub trait LiveChannel: Send + Sync {
    /// Check if connected.
    fn is_connected(&self) -> bool;

    /// Send a message over the open connection.
    fn send(&self, msg: ChannelMessage) -> ChannelFuture<'_>;
}

/// A channel that is never connected. Message actions stay queued.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChannel;

impl LiveChannel for NoChannel {
    fn is_connected(&self) -> bool {
        false
    }

    fn send(&self, _msg: ChannelMessage) -> ChannelFuture<'_> {
        Box::pin(async { Err(ChannelError::NotConnected) })
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// [`LiveChannel`] over a WebSocket using tokio-tungstenite.
#[derive(Clone, Default)]
pub struct WebSocketChannel {
    inner: Arc<WsInner>,
}

#[derive(Default)]
struct WsInner {
    sink: Mutex<Option<WsSink>>,
    connected: AtomicBool,
}

impl WebSocketChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to `url`, replacing any existing connection.
    ///
    /// Inbound frames are drained by a background reader that marks the
    /// channel disconnected when the peer closes or the stream errors.
    pub async fn connect(&self, url: &str) -> ChannelResult<()> {
        let (ws, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| ChannelError::ConnectionFailed(e.to_string()))?;
        let (sink, stream) = ws.split();

        *self.inner.sink.lock().await = Some(sink);
        self.inner.connected.store(true, Ordering::SeqCst);
        tracing::info!(url, "chat channel connected");

        tokio::spawn(read_loop(Arc::downgrade(&self.inner), stream));
        Ok(())
    }

    /// Close the connection if open.
    pub async fn disconnect(&self) {
        self.inner.connected.store(false, Ordering::SeqCst);
        if let Some(mut sink) = self.inner.sink.lock().await.take() {
            let _ = sink.close().await;
        }
    }
}

async fn read_loop(inner: std::sync::Weak<WsInner>, mut stream: SplitStream<WsStream>) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(Message::Text(text)) => {
                tracing::trace!(len = text.len(), "chat frame received");
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(error = %e, "chat stream error");
                break;
            }
        }
    }
    if let Some(inner) = inner.upgrade() {
        inner.connected.store(false, Ordering::SeqCst);
        inner.sink.lock().await.take();
        tracing::info!("chat channel disconnected");
    }
}

impl LiveChannel for WebSocketChannel {
    fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    fn send(&self, msg: ChannelMessage) -> ChannelFuture<'_> {
        Box::pin(async move {
            let json = msg
                .to_json()
                .map_err(|e| ChannelError::Serialization(e.to_string()))?;

            let mut guard = self.inner.sink.lock().await;
            let sink = guard.as_mut().ok_or(ChannelError::NotConnected)?;

            let result = match sink.send(Message::Text(json.into())).await {
                Ok(()) => sink.flush().await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                // Connection is broken, clear it
                *guard = None;
                self.inner.connected.store(false, Ordering::SeqCst);
                return Err(ChannelError::SendFailed(e.to_string()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
