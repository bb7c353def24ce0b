// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;

use huddle_core_client::dtos::{ChannelId, Severity, SubmitError};
use huddle_core_client::ClientEvent;

use super::helpers::TestClient;

fn message_json(id: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": { "id": 7, "username": "ana" },
        "content": content,
        "timestamp": "2026-02-10T11:00:00Z",
    })
}

#[tokio::test]
async fn test_send_message_inserts_pending_placeholder() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    let message_id = client.chat.send_message(&channel, "Hello world").await?;
    assert_eq!(message_id, "id-1".into());

    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, "id-1".into());
    assert_eq!(messages[0].body, "Hello world");
    assert_eq!(messages[0].from.name, "me");
    assert!(messages[0].flags.is_pending);

    assert_eq!(client.sent_event_types(), vec!["chat_message"]);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesAppended {
            channel: channel.clone(),
            message_ids: vec!["id-1".into()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_ack_adopts_server_id_in_place() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("chat_message", message_json("100", "Earlier"))
        .await;
    client.chat.send_message(&channel, "Hello").await?;
    client.take_events();

    client
        .receive(
            "message_ack",
            json!({ "client_id": "id-1", "server_id": "101" }),
        )
        .await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages.len(), 2);
    // The placeholder kept its place in the timeline, only the id changed.
    assert_eq!(messages[0].id, "100".into());
    assert_eq!(messages[1].id, "101".into());
    assert_eq!(messages[1].body, "Hello");
    assert!(!messages[1].flags.is_pending);

    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesUpdated {
            channel: channel.clone(),
            message_ids: vec!["101".into()],
        }]
    );

    // A duplicate ack resolves nothing.
    client
        .receive(
            "message_ack",
            json!({ "client_id": "id-1", "server_id": "101" }),
        )
        .await;
    assert_eq!(client.take_events(), vec![]);
    Ok(())
}

#[tokio::test]
async fn test_echoed_broadcast_resolves_pending_send() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.send_message(&channel, "Hello").await?;
    client.take_events();

    let mut echo = message_json("42", "Hello");
    echo["client_id"] = json!("id-1");
    client.receive("chat_message", echo).await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, "42".into());
    assert_eq!(messages[0].from.name, "ana");
    assert!(!messages[0].flags.is_pending);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesUpdated {
            channel: channel.clone(),
            message_ids: vec!["42".into()],
        }]
    );

    // The ack that follows the echo finds nothing left to resolve.
    client
        .receive(
            "message_ack",
            json!({ "client_id": "id-1", "server_id": "42" }),
        )
        .await;
    assert_eq!(client.take_events(), vec![]);
    assert_eq!(client.chat.messages(&channel).await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_message_is_rejected_locally() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    let result = client.chat.send_message(&channel, "   ").await;
    assert!(matches!(result, Err(SubmitError::EmptyContent)));

    assert_eq!(client.sent_event_types(), Vec::<String>::new());
    assert_eq!(client.take_events(), vec![]);
    assert_eq!(client.chat.messages(&channel).await.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_identical_in_flight_send_is_rejected() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.send_message(&channel, "Hello").await?;
    let result = client.chat.send_message(&channel, "Hello").await;
    assert!(matches!(result, Err(SubmitError::DuplicateInFlight)));
    assert_eq!(client.sent_event_types(), vec!["chat_message"]);

    // Once the first send settled the same content may be sent again.
    client
        .receive(
            "message_ack",
            json!({ "client_id": "id-1", "server_id": "50" }),
        )
        .await;
    client.chat.send_message(&channel, "Hello").await?;
    assert_eq!(
        client.sent_event_types(),
        vec!["chat_message", "chat_message"]
    );
    Ok(())
}

#[tokio::test]
async fn test_server_error_fails_placeholder() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.send_message(&channel, "Hello").await?;
    client.take_events();

    client
        .receive(
            "error_message",
            json!({ "message": "Message too long", "client_id": "id-1" }),
        )
        .await;

    let messages = client.chat.messages(&channel).await;
    assert!(messages[0].flags.is_failed);
    assert!(!messages[0].flags.is_pending);

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec!["id-1".into()],
            },
            ClientEvent::Notice {
                severity: Severity::Error,
                message: "Message too long".to_string(),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_ack_times_out() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.send_message(&channel, "Hello").await?;
    client.take_events();

    // Nothing expires while the timeout hasn't elapsed.
    client.time_provider.advance(Duration::seconds(5));
    client.tick().await;
    assert_eq!(client.take_events(), vec![]);

    client.time_provider.advance(Duration::seconds(6));
    client.tick().await;

    let messages = client.chat.messages(&channel).await;
    assert!(messages[0].flags.is_failed);
    assert!(!messages[0].flags.is_pending);

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec!["id-1".into()],
            },
            ClientEvent::Notice {
                severity: Severity::Warning,
                message: "The server did not confirm your last change.".to_string(),
            },
        ]
    );

    // An ack arriving after the timeout resolves nothing.
    client
        .receive(
            "message_ack",
            json!({ "client_id": "id-1", "server_id": "60" }),
        )
        .await;
    assert_eq!(client.take_events(), vec![]);
    assert_eq!(client.chat.messages(&channel).await[0].id, "id-1".into());
    Ok(())
}

#[tokio::test]
async fn test_timeout_fails_placeholder_on_its_own_channel() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.send_message(&channel, "Hello").await?;

    // A second session takes over the scripted socket, so the timer now
    // fires with the task channel attached.
    let tasks_channel = ChannelId::from("room.tasks");
    client
        .connect(&tasks_channel, Url::parse("ws://localhost/ws/tasks/")?)
        .await?;
    client.settle().await;
    client.take_events();

    client.time_provider.advance(Duration::seconds(11));
    client.tick().await;

    let messages = client.chat.messages(&channel).await;
    assert!(messages[0].flags.is_failed);
    assert!(!messages[0].flags.is_pending);
    assert_eq!(client.chat.messages(&tasks_channel).await.len(), 0);

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec!["id-1".into()],
            },
            ClientEvent::Notice {
                severity: Severity::Warning,
                message: "The server did not confirm your last change.".to_string(),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_edit_and_delete_broadcasts_mutate_in_place() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("chat_message", message_json("100", "Helo"))
        .await;
    client.take_events();

    let mut edited = message_json("100", "Hello");
    edited["edited_at"] = json!("2026-02-10T11:05:00Z");
    client.receive("edit_message", edited).await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages[0].body, "Hello");
    assert!(messages[0].flags.is_edited);

    let mut deleted = message_json("100", "");
    deleted["is_deleted"] = json!(true);
    client.receive("delete_message", deleted).await;

    // Deletes keep the entry as a tombstone instead of removing it.
    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_deleted);
    assert_eq!(messages[0].body, "");
    Ok(())
}

#[tokio::test]
async fn test_reaction_update_replaces_reactions() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("chat_message", message_json("100", "Hello"))
        .await;
    client.take_events();

    client
        .chat
        .toggle_reaction(&channel, &"100".into(), "🎉".into())
        .await?;
    assert_eq!(client.sent_event_types(), vec!["add_reaction"]);

    // A second toggle of the same emoji is rejected while the first is in
    // flight.
    let result = client
        .chat
        .toggle_reaction(&channel, &"100".into(), "🎉".into())
        .await;
    assert!(matches!(result, Err(SubmitError::DuplicateInFlight)));

    client
        .receive(
            "reaction_update",
            json!({
                "message_id": "100",
                "reactions": { "🎉": { "count": 1, "users": ["me"] } }
            }),
        )
        .await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(messages[0].reactions.len(), 1);
    assert_eq!(messages[0].reactions[0].emoji, "🎉".into());
    assert_eq!(messages[0].reactions[0].from, vec!["me".to_string()]);

    // The broadcast settled the mutation, toggling again is allowed.
    client
        .chat
        .toggle_reaction(&channel, &"100".into(), "🎉".into())
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_read_status_marks_messages_read() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("chat_message", message_json("100", "One"))
        .await;
    client
        .receive("chat_message", message_json("101", "Two"))
        .await;
    client.take_events();

    client
        .receive(
            "read_status_update",
            json!({
                "user": { "id": 7, "username": "ana" },
                "last_visible_message_id": "100"
            }),
        )
        .await;

    let messages = client.chat.messages(&channel).await;
    assert!(messages[0].flags.is_read);
    assert!(!messages[1].flags.is_read);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesUpdated {
            channel: channel.clone(),
            message_ids: vec!["100".into()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_duplicate_broadcast_is_dropped() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("chat_message", message_json("100", "Hello"))
        .await;
    client
        .receive("chat_message", message_json("100", "Hello"))
        .await;

    assert_eq!(client.chat.messages(&channel).await.len(), 1);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesAppended {
            channel: channel.clone(),
            message_ids: vec!["100".into()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_envelope_is_ignored() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.receive("jazz_hands", json!({ "anything": 1 })).await;

    assert_eq!(client.take_events(), vec![]);
    assert_eq!(client.chat.messages(&channel).await.len(), 0);
    Ok(())
}
