// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use pretty_assertions::assert_eq;

use huddle_core_client::dtos::{Severity, SocketState, SubmitError};
use huddle_core_client::{ClientEvent, ConnectionEvent};
use huddle_wire::ConnectionError;

use super::helpers::TestClient;

#[tokio::test]
async fn test_abnormal_close_triggers_reconnect() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive_event(huddle_wire::ConnectionEvent::Disconnected {
            error: Some(ConnectionError::Generic {
                msg: "connection reset".to_string(),
            }),
            clean: false,
        })
        .await;

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::Notice {
                severity: Severity::Warning,
                message: "Connection lost. Reconnecting…".to_string(),
            },
            ClientEvent::ConnectionStatusChanged {
                channel: channel.clone(),
                event: ConnectionEvent::Disconnect {
                    error: Some(ConnectionError::Generic {
                        msg: "connection reset".to_string(),
                    }),
                    clean: false,
                },
            },
        ]
    );

    // The backoff in the test config tops out at 20ms.
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.settle().await;

    assert_eq!(client.wire.connect_count(), 2);
    assert_eq!(client.connection_state(&channel), SocketState::Open);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::ConnectionStatusChanged {
            channel: channel.clone(),
            event: ConnectionEvent::Connect,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_clean_close_stays_closed() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive_event(huddle_wire::ConnectionEvent::Disconnected {
            error: None,
            clean: true,
        })
        .await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    client.settle().await;

    assert_eq!(client.wire.connect_count(), 1);
    assert_eq!(client.connection_state(&channel), SocketState::Closed);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::ConnectionStatusChanged {
            channel: channel.clone(),
            event: ConnectionEvent::Disconnect {
                error: None,
                clean: true,
            },
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_send_on_closed_socket_fails_fast() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive_event(huddle_wire::ConnectionEvent::Disconnected {
            error: None,
            clean: true,
        })
        .await;
    client.take_events();

    let result = client.chat.send_message(&channel, "Hello").await;
    assert!(matches!(
        result,
        Err(SubmitError::Connection(ConnectionError::NotConnected))
    ));
    assert_eq!(client.sent_event_types(), Vec::<String>::new());

    // The placeholder is rendered and immediately marked failed.
    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].flags.is_failed);

    let events = client.take_events();
    assert!(events.contains(&ClientEvent::Notice {
        severity: Severity::Warning,
        message: "Not connected. Your message was not sent.".to_string(),
    }));
    Ok(())
}

#[tokio::test]
async fn test_teardown_closes_everything() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.teardown().await;

    assert_eq!(client.connection_state(&channel), SocketState::Closed);
    assert_eq!(client.wire.disconnect_count(), 1);
    Ok(())
}
