// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use pretty_assertions::assert_eq;
use serde_json::json;

use huddle_core_client::ClientEvent;

use super::helpers::TestClient;

fn message_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": { "id": 7, "username": "ana" },
        "content": format!("Message {id}"),
        "timestamp": "2026-02-10T11:00:00Z",
    })
}

/// The server pages backwards, newest first.
fn page_json(ids: &[&str], has_more: bool) -> serde_json::Value {
    json!({
        "messages": ids.iter().map(|id| message_json(id)).collect::<Vec<_>>(),
        "has_more": has_more,
    })
}

#[tokio::test]
async fn test_loads_older_page_above_timeline() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.receive("chat_message", message_json("100")).await;
    client.take_events();

    assert!(client.chat.load_older_messages(&channel).await?);
    assert_eq!(client.sent_event_types(), vec!["load_older_messages"]);

    client
        .receive(
            "older_messages",
            page_json(&["99", "98", "97", "96", "95"], true),
        )
        .await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(
        messages.iter().map(|m| m.id.as_ref()).collect::<Vec<_>>(),
        vec!["95", "96", "97", "98", "99", "100"]
    );

    let cursor = client.chat.pagination(&channel);
    assert_eq!(cursor.oldest_loaded_id, Some("95".into()));
    assert!(cursor.has_more);
    assert!(!cursor.is_loading);

    assert_eq!(
        client.take_events(),
        vec![ClientEvent::MessagesPrepended {
            channel: channel.clone(),
            message_ids: vec![
                "95".into(),
                "96".into(),
                "97".into(),
                "98".into(),
                "99".into()
            ],
            // The view pins this message so the scroll position holds still.
            anchor: Some("100".into()),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_only_one_page_request_in_flight() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    assert!(client.chat.load_older_messages(&channel).await?);
    // Rapid repeated scrolling must not fire a second request.
    assert!(!client.chat.load_older_messages(&channel).await?);
    assert_eq!(client.sent_event_types(), vec!["load_older_messages"]);

    client
        .receive("older_messages", page_json(&["95"], true))
        .await;
    assert!(client.chat.load_older_messages(&channel).await?);
    assert_eq!(
        client.sent_event_types(),
        vec!["load_older_messages", "load_older_messages"]
    );
    Ok(())
}

#[tokio::test]
async fn test_pages_are_deduplicated() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.receive("chat_message", message_json("96")).await;
    client.take_events();

    client.chat.load_older_messages(&channel).await?;
    client
        .receive("older_messages", page_json(&["97", "96", "95"], true))
        .await;

    let messages = client.chat.messages(&channel).await;
    assert_eq!(
        messages.iter().map(|m| m.id.as_ref()).collect::<Vec<_>>(),
        vec!["95", "97", "96"]
    );

    let Some(ClientEvent::MessagesPrepended { message_ids, .. }) =
        client.take_events().into_iter().next()
    else {
        panic!("Expected MessagesPrepended event");
    };
    assert_eq!(message_ids, vec!["95".into(), "97".into()]);
    Ok(())
}

#[tokio::test]
async fn test_exhausted_history_stops_requests() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.load_older_messages(&channel).await?;
    client
        .receive("older_messages", page_json(&["95"], false))
        .await;

    assert!(!client.chat.load_older_messages(&channel).await?);
    assert_eq!(client.sent_event_types(), vec!["load_older_messages"]);
    Ok(())
}

#[tokio::test]
async fn test_empty_page_ends_pagination_quietly() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.chat.load_older_messages(&channel).await?;
    client.receive("older_messages", page_json(&[], false)).await;

    assert_eq!(client.take_events(), vec![]);
    assert!(!client.chat.load_older_messages(&channel).await?);
    Ok(())
}

#[tokio::test]
async fn test_first_page_request_uses_oldest_local_message() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.receive("chat_message", message_json("100")).await;
    client.chat.load_older_messages(&channel).await?;

    let envelopes = client.wire.sent_envelopes();
    assert_eq!(envelopes[0].event_type, "load_older_messages");
    assert_eq!(envelopes[0].payload["before_message_id"], json!("100"));
    Ok(())
}
