#![allow(clippy::unwrap_used)]
use reqwest::StatusCode;
use serde_json::{Value, json};

mod common;

#[tokio::test]
async fn test_delete_conversation_always_acknowledges() {
    let app = common::TestApp::spawn().await;

    for body in [json!({"userId": "u1"}), json!({}), json!({"userId": "someone-else", "extra": 1})] {
        let resp = app.delete_conversation("never-existed", &body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Conversation deleted successfully");
    }
}

#[tokio::test]
async fn test_delete_conversation_leaves_messages_in_place() {
    let app = common::TestApp::spawn().await;
    app.seed_message("m1", "u1", "u2").await;

    let resp = app.delete_conversation("c1", &json!({"userId": "u1"})).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(app.store.len().await, 1);
    assert_eq!(app.get_message("m1").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_conversation_malformed_body() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .delete(format!("{}/v1/conversations/c1", app.server_url))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_conversation_accepts_any_json_shape() {
    let app = common::TestApp::spawn().await;

    for body in [json!({"userId": 42}), json!("hello"), json!(7), json!([]), json!(null)] {
        let resp = app.delete_conversation("c1", &body).await;
        assert_eq!(resp.status(), StatusCode::OK, "body {body} should be acknowledged");

        let ack: Value = resp.json().await.unwrap();
        assert_eq!(ack["success"], true);
    }
}
