// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use pretty_assertions::assert_eq;
use serde_json::json;

use huddle_core_client::ClientEvent;

use super::helpers::TestClient;

fn roster_json(names: &[&str]) -> serde_json::Value {
    json!({
        "users": names
            .iter()
            .enumerate()
            .map(|(idx, name)| json!({ "id": idx + 1, "username": name }))
            .collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_roster_is_replaced_wholesale() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("online_users", roster_json(&["ana", "ben"]))
        .await;
    assert_eq!(client.presence.online_count(&channel), 2);

    // Ben left. The new snapshot wins outright.
    client.receive("online_users", roster_json(&["ana"])).await;
    assert_eq!(
        client
            .presence
            .online_users(&channel)
            .iter()
            .map(|user| user.name.as_str())
            .collect::<Vec<_>>(),
        vec!["ana"]
    );

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::PresenceChanged {
                channel: channel.clone()
            },
            ClientEvent::PresenceChanged {
                channel: channel.clone()
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_stale_rejoin_is_accepted() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive("online_users", roster_json(&["ana", "ben"]))
        .await;
    client.receive("online_users", roster_json(&["ana"])).await;
    // A snapshot listing Ben again means Ben is online again, even if it was
    // delayed on the wire. Snapshots carry no ordering information.
    client
        .receive("online_users", roster_json(&["ana", "ben"]))
        .await;

    assert_eq!(client.presence.online_count(&channel), 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_roster_is_a_valid_state() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client.receive("online_users", roster_json(&["ana"])).await;
    client.receive("online_users", roster_json(&[])).await;

    assert_eq!(client.presence.online_count(&channel), 0);
    assert!(client.presence_summary(&channel).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_summary_collapses_long_rosters() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive(
            "online_users",
            roster_json(&["ana", "ben", "cleo", "dan", "eve"]),
        )
        .await;

    let summary = client.presence_summary(&channel);
    assert_eq!(summary.names, vec!["ana", "ben", "cleo"]);
    assert_eq!(summary.overflow, 2);
    Ok(())
}
