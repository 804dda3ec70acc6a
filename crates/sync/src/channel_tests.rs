// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn no_channel_is_never_connected() {
    let channel = NoChannel;
    assert!(!channel.is_connected());
    let err = channel
        .send(ChannelMessage::Message {
            recipient_id: 1,
            content: "hi".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ChannelError::NotConnected));
}

#[tokio::test]
async fn send_before_connect_is_not_connected() {
    let channel = WebSocketChannel::new();
    assert!(!channel.is_connected());
    let err = channel
        .send(ChannelMessage::Message {
            recipient_id: 1,
            content: "hi".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ChannelError::NotConnected));
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let channel = WebSocketChannel::new();
    let err = channel.connect(&format!("ws://{}", addr)).await.unwrap_err();
    assert!(matches!(err, ChannelError::ConnectionFailed(_)));
    assert!(!channel.is_connected());
}

#[tokio::test]
async fn sends_tagged_json_and_notices_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        let frame = loop {
            match ws.next().await.unwrap().unwrap() {
                Message::Text(text) => break text.to_string(),
                _ => continue,
            }
        };
        ws.close(None).await.ok();
        frame
    });

    let channel = WebSocketChannel::new();
    channel.connect(&format!("ws://{}", addr)).await.unwrap();
    assert!(channel.is_connected());

    channel
        .send(ChannelMessage::Message {
            recipient_id: 42,
            content: "on my way".into(),
        })
        .await
        .unwrap();

    let frame = server.await.unwrap();
    let msg = ChannelMessage::from_json(&frame).unwrap();
    assert_eq!(
        msg,
        ChannelMessage::Message {
            recipient_id: 42,
            content: "on my way".into()
        }
    );

    // Reader task observes the close frame.
    tokio::time::timeout(Duration::from_secs(5), async {
        while channel.is_connected() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("channel should notice close");
}

#[tokio::test]
async fn disconnect_clears_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        while let Some(Ok(_)) = ws.next().await {}
    });

    let channel = WebSocketChannel::new();
    channel.connect(&format!("ws://{}", addr)).await.unwrap();
    channel.disconnect().await;
    assert!(!channel.is_connected());
}
