// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;

use huddle_core_client::dtos::{
    ApiResponse, ServerTaskChange, Severity, StatusKey, SubmitError, TaskId,
};
use huddle_core_client::ClientEvent;

use super::helpers::{ScriptedRequestSender, ScriptedResponse, TestClient};

fn todo() -> StatusKey {
    StatusKey::from("todo")
}

fn doing() -> StatusKey {
    StatusKey::from("doing")
}

fn done() -> StatusKey {
    StatusKey::from("done")
}

fn load_board(client: &TestClient) {
    client.board.load_board(vec![
        (todo(), vec![TaskId(1), TaskId(2), TaskId(3)]),
        (doing(), vec![TaskId(4)]),
        (done(), vec![]),
    ]);
}

#[tokio::test]
async fn test_move_applies_optimistically_and_confirms() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &doing(), 0).await?;

    // Applied before the server answered.
    assert_eq!(client.board.column(&todo()), vec![TaskId(1), TaskId(3)]);
    assert_eq!(client.board.column(&doing()), vec![TaskId(2), TaskId(4)]);
    assert_eq!(client.sent_event_types(), vec!["update_status"]);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::BoardChanged {
            statuses: vec![todo(), doing()],
        }]
    );

    client
        .receive(
            "status_update_confirmation",
            json!({ "task_id": 2, "status": "doing", "success": true }),
        )
        .await;

    // Confirmation with the requested status changes nothing further.
    assert_eq!(client.board.column(&doing()), vec![TaskId(2), TaskId(4)]);
    assert_eq!(client.take_events(), vec![]);
    Ok(())
}

#[tokio::test]
async fn test_rejected_move_rolls_back_to_exact_position() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &done(), 0).await?;
    client.take_events();

    client
        .receive(
            "status_update_confirmation",
            json!({
                "task_id": 2,
                "status": "done",
                "success": false,
                "message": "Only the assignee may finish this task"
            }),
        )
        .await;

    // Back where it came from, at the same index.
    assert_eq!(
        client.board.column(&todo()),
        vec![TaskId(1), TaskId(2), TaskId(3)]
    );
    assert_eq!(client.board.column(&done()), vec![]);
    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::BoardChanged {
                statuses: vec![done(), todo()],
            },
            ClientEvent::Notice {
                severity: Severity::Error,
                message: "Only the assignee may finish this task".to_string(),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_unanswered_move_times_out_and_rolls_back() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &doing(), 0).await?;
    client.take_events();

    // Nothing expires while the ack can still arrive.
    client.time_provider.advance(Duration::seconds(5));
    client.tick().await;
    assert_eq!(client.board.column(&doing()), vec![TaskId(2), TaskId(4)]);
    assert_eq!(client.take_events(), vec![]);

    client.time_provider.advance(Duration::seconds(6));
    client.tick().await;

    // Back where it came from, at the same index.
    assert_eq!(
        client.board.column(&todo()),
        vec![TaskId(1), TaskId(2), TaskId(3)]
    );
    assert_eq!(client.board.column(&doing()), vec![TaskId(4)]);
    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::BoardChanged {
                statuses: vec![doing(), todo()],
            },
            ClientEvent::Notice {
                severity: Severity::Error,
                message: "The server did not confirm the move.".to_string(),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_remote_broadcast_applies_after_move_timed_out() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &doing(), 0).await?;
    client.time_provider.advance(Duration::seconds(11));
    client.tick().await;
    client.take_events();

    // The timed-out move no longer shields the task from other clients'
    // changes.
    client
        .receive("status_update", json!({ "task_id": 2, "status": "done" }))
        .await;

    assert_eq!(client.board.column(&todo()), vec![TaskId(1), TaskId(3)]);
    assert_eq!(client.board.column(&done()), vec![TaskId(2)]);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::BoardChanged {
            statuses: vec![todo(), done()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_confirmation_adopts_canonical_status() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &doing(), 0).await?;
    client.take_events();

    // A workflow rule redirected the transition.
    client
        .receive(
            "status_update_confirmation",
            json!({ "task_id": 2, "status": "done", "success": true }),
        )
        .await;

    assert_eq!(client.board.column(&doing()), vec![TaskId(4)]);
    assert_eq!(client.board.column(&done()), vec![TaskId(2)]);
    assert_eq!(
        client.take_events(),
        vec![ClientEvent::BoardChanged {
            statuses: vec![doing(), done()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_same_column_drop_sends_nothing() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();
    load_board(&client);

    client.board.move_task(&channel, TaskId(2), &todo(), 0).await?;

    assert_eq!(client.sent_event_types(), Vec::<String>::new());
    assert_eq!(client.take_events(), vec![]);
    assert_eq!(
        client.board.column(&todo()),
        vec![TaskId(1), TaskId(2), TaskId(3)]
    );
    Ok(())
}

#[tokio::test]
async fn test_remote_status_broadcast_moves_task() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    load_board(&client);

    client
        .receive("status_update", json!({ "task_id": 1, "status": "doing" }))
        .await;

    assert_eq!(client.board.column(&todo()), vec![TaskId(2), TaskId(3)]);
    assert_eq!(client.board.column(&doing()), vec![TaskId(4), TaskId(1)]);

    let counts = client.board.counts();
    assert_eq!(counts[&todo()], 2);
    assert_eq!(counts[&doing()], 2);

    assert_eq!(
        client.take_events(),
        vec![ClientEvent::BoardChanged {
            statuses: vec![todo(), doing()],
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_set_status_via_http_confirms() -> anyhow::Result<()> {
    let sender = Arc::new(ScriptedRequestSender::default());
    let client = TestClient::with_request_sender(sender.clone());
    client.connect_channel().await?;
    load_board(&client);

    sender.push_response(ScriptedResponse::Ok(ApiResponse {
        success: true,
        message: None,
        new_status_key: Some("done".to_string()),
        comment: None,
    }));

    client.board.set_status(TaskId(2), &doing()).await?;

    // The server settled on "done", the optimistic "doing" was corrected.
    assert_eq!(client.board.column(&done()), vec![TaskId(2)]);
    assert_eq!(client.board.column(&doing()), vec![TaskId(4)]);
    assert_eq!(sender.requests.lock().clone(), vec!["status:2:doing"]);
    Ok(())
}

#[tokio::test]
async fn test_set_status_rejection_rolls_back() -> anyhow::Result<()> {
    let sender = Arc::new(ScriptedRequestSender::default());
    let client = TestClient::with_request_sender(sender.clone());
    client.connect_channel().await?;
    load_board(&client);

    sender.push_response(ScriptedResponse::Ok(ApiResponse {
        success: false,
        message: Some("Nope".to_string()),
        new_status_key: None,
        comment: None,
    }));

    let result = client.board.set_status(TaskId(2), &doing()).await;
    assert!(matches!(result, Err(SubmitError::Rejected(_))));
    assert_eq!(
        client.board.column(&todo()),
        vec![TaskId(1), TaskId(2), TaskId(3)]
    );
    Ok(())
}

#[tokio::test]
async fn test_set_status_without_request_sender_fails() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    load_board(&client);

    let result = client.board.set_status(TaskId(2), &doing()).await;
    assert!(matches!(result, Err(SubmitError::MissingRequestSender)));
    Ok(())
}

#[tokio::test]
async fn test_task_lifecycle_broadcasts() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;

    client.receive("task_created", json!({ "task_id": 9 })).await;
    client
        .receive("task_deleted", json!({ "task_id": 9, "user_id": 3 }))
        .await;

    assert_eq!(
        client.take_events(),
        vec![
            ClientEvent::TaskListChanged {
                change: ServerTaskChange::Created,
                task_id: TaskId(9),
            },
            ClientEvent::TaskListChanged {
                change: ServerTaskChange::Deleted,
                task_id: TaskId(9),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_new_comment_broadcast() -> anyhow::Result<()> {
    let client = TestClient::new();
    client.connect_channel().await?;
    let channel = TestClient::channel();

    client
        .receive(
            "new_comment",
            json!({
                "id": 12,
                "author": { "name": "Ana", "avatar_url": null },
                "text": "Looks good",
                "created_at": "2026-02-10T11:30:00Z"
            }),
        )
        .await;

    let events = client.take_events();
    assert_eq!(events.len(), 1);
    let ClientEvent::CommentPosted { channel: event_channel, comment } = &events[0] else {
        panic!("Expected CommentPosted event");
    };
    assert_eq!(event_channel, &channel);
    assert_eq!(comment.id, 12);
    assert_eq!(comment.author.name, "Ana");
    Ok(())
}

#[tokio::test]
async fn test_post_comment_via_http() -> anyhow::Result<()> {
    let sender = Arc::new(ScriptedRequestSender::default());
    let client = TestClient::with_request_sender(sender.clone());
    client.connect_channel().await?;

    sender.push_response(ScriptedResponse::Ok(ApiResponse {
        success: true,
        message: None,
        new_status_key: None,
        comment: None,
    }));

    client.board.post_comment(TaskId(2), "Nice work").await?;
    assert_eq!(sender.requests.lock().clone(), vec!["comment:2:Nice work"]);

    let result = client.board.post_comment(TaskId(2), "   ").await;
    assert!(matches!(result, Err(SubmitError::EmptyContent)));
    Ok(())
}
