use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{recipient, TestApp};

fn users(emails: &[&str]) -> serde_json::Value {
    let users: Vec<serde_json::Value> = emails.iter().map(|email| json!({ "email": email })).collect();

    json!({ "users": users })
}

async fn message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.unwrap();

    body["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn unsubscribe_removes_the_subscriber() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;

    test_app.subscribe("a@x.com").await;

    let response = test_app.delete_unsubscribe(users(&["a@x.com"])).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(message(response).await, "Successfully unsubscribed user(s)");
    assert!(test_app.stored_emails().await.is_empty());
}

#[tokio::test]
async fn unsubscribing_again_reports_already_unsubscribed() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;

    test_app.subscribe("a@x.com").await;
    test_app.delete_unsubscribe(users(&["a@x.com"])).await;

    for _ in 0..2 {
        let response = test_app.delete_unsubscribe(users(&["a@x.com"])).await;

        assert_eq!(200, response.status().as_u16());
        assert_eq!(message(response).await, "Already unsubscribed");
    }

    assert!(test_app.stored_emails().await.is_empty());
}

#[tokio::test]
async fn unsubscribing_unknown_emails_changes_nothing_and_sends_nothing() {
    let test_app = TestApp::spawn_app().await;

    {
        let _guard = test_app.accept_emails().await;
        test_app.subscribe("keep@x.com").await;
    }

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .delete_unsubscribe(users(&["nobody@x.com", "ghost@x.com"]))
        .await;

    assert_eq!(message(response).await, "Already unsubscribed");
    assert_eq!(test_app.stored_emails().await, vec!["keep@x.com"]);
}

#[tokio::test]
async fn unsubscribe_notifies_every_requested_email() {
    let test_app = TestApp::spawn_app().await;

    {
        let _guard = test_app.accept_emails().await;
        test_app.subscribe("a@x.com").await;
        test_app.subscribe("keep@x.com").await;
    }

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(4)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .delete_unsubscribe(users(&["a@x.com", "never@x.com"]))
        .await;

    assert_eq!(message(response).await, "Successfully unsubscribed user(s)");
    assert_eq!(test_app.stored_emails().await, vec!["keep@x.com"]);

    // The four emails from the two subscriptions come first
    let emails = test_app.sent_emails().await;
    let unsubscribe_emails = &emails[4..];
    let confirmations: Vec<&str> = unsubscribe_emails
        .iter()
        .filter(|email| email["subject"] == "Unsubscribe Confirmation")
        .map(recipient)
        .collect();

    assert_eq!(unsubscribe_emails.len(), 4);
    assert!(confirmations.contains(&"a@x.com"));
    assert!(confirmations.contains(&"never@x.com"));
}

#[tokio::test]
async fn unsubscribe_succeeds_even_if_the_emails_cannot_be_sent() {
    let test_app = TestApp::spawn_app().await;

    {
        let _guard = test_app.accept_emails().await;
        test_app.subscribe("a@x.com").await;
        test_app.subscribe("b@x.com").await;
    }

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .delete_unsubscribe(users(&["a@x.com", "b@x.com"]))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(message(response).await, "Successfully unsubscribed user(s)");
    assert!(test_app.stored_emails().await.is_empty());

    // Each email failed on its first send, independently of the other
    assert_eq!(test_app.sent_emails().await.len(), 4 + 2);
}

#[tokio::test]
async fn unsubscribe_returns_400_when_users_is_not_an_array() {
    let test_app = TestApp::spawn_app().await;

    {
        let _guard = test_app.accept_emails().await;
        test_app.subscribe("a@x.com").await;
    }

    let test_cases = vec![
        (json!({}), "missing users"),
        (json!({ "users": "a@x.com" }), "users is a string"),
        (json!({ "users": { "email": "a@x.com" } }), "users is an object"),
    ];

    for (invalid_body, description) in test_cases {
        let response = test_app.delete_unsubscribe(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when {}",
            description
        );
        assert_eq!(
            message(response).await,
            "Invalid request format: users must be an array"
        );
    }

    assert_eq!(test_app.stored_emails().await, vec!["a@x.com"]);
}

#[tokio::test]
async fn unsubscribe_skips_malformed_emails_and_removes_the_valid_ones() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;
    test_app.subscribe("a@x.com").await;

    let response = test_app
        .delete_unsubscribe(users(&["a@x.com", "legacy-id"]))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(message(response).await, "Successfully unsubscribed user(s)");
    assert!(test_app.stored_emails().await.is_empty());
}

#[tokio::test]
async fn unsubscribing_only_malformed_emails_reports_already_unsubscribed() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;
    test_app.subscribe("a@x.com").await;

    let response = test_app.delete_unsubscribe(users(&["legacy-id"])).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(message(response).await, "Already unsubscribed");
    assert_eq!(test_app.stored_emails().await, vec!["a@x.com"]);
}

#[tokio::test]
async fn unsubscribe_returns_500_when_the_store_fails() {
    let test_app = TestApp::spawn_app().await;

    // Sabotage the database
    sqlx::query("DROP TABLE subscribers;")
        .execute(&test_app.db_pool)
        .await
        .unwrap();

    let response = test_app.delete_unsubscribe(users(&["a@x.com"])).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(message(response).await, "Failed to delete user(s)");
}

#[tokio::test]
async fn list_returns_every_subscriber() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;

    test_app.subscribe("a@x.com").await;
    test_app.subscribe("b@x.com").await;

    let response = test_app.get_subscribers(None).await;

    assert_eq!(200, response.status().as_u16());

    let subscribers: Vec<serde_json::Value> = response.json().await.unwrap();
    let emails: Vec<&str> = subscribers
        .iter()
        .map(|subscriber| subscriber["email"].as_str().unwrap())
        .collect();

    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn list_with_a_date_only_returns_exact_matches() {
    let test_app = TestApp::spawn_app().await;
    let _guard = test_app.accept_emails().await;

    test_app.subscribe("a@x.com").await;

    // Nothing written through the API carries a date
    let response = test_app.get_subscribers(Some("2024-05-01")).await;

    assert_eq!(200, response.status().as_u16());

    let subscribers: Vec<serde_json::Value> = response.json().await.unwrap();

    assert!(subscribers.is_empty());
}

#[tokio::test]
async fn list_returns_400_for_a_malformed_date() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_subscribers(Some("yesterday")).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn list_returns_500_when_the_store_fails() {
    let test_app = TestApp::spawn_app().await;

    sqlx::query("DROP TABLE subscribers;")
        .execute(&test_app.db_pool)
        .await
        .unwrap();

    let response = test_app.get_subscribers(None).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(message(response).await, "Failed to fetch users");
}
