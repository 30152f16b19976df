use crate::fakes::{FakePushService, FakeRegistrar, config, init_logging};
use chat_lifecycle_sdk::{
    AppPhase, Client, FieldValue, HttpProfileStore, IdentityContext, ProfileStore, StoreError,
};
use mock_server::MockProfileStore;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;

async fn start_mock_store() -> (MockProfileStore, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let mock = MockProfileStore::new();
    let server = mock.clone();
    tokio::spawn(async move { server.serve(listener).await });

    (mock, format!("http://{address}"))
}

async fn wait_for_document<F>(mock: &MockProfileStore, identity_id: &str, done: F) -> Map<String, Value>
where
    F: Fn(&Map<String, Value>) -> bool,
{
    for _ in 0..100 {
        if let Some(document) = mock.document(identity_id).await {
            if done(&document) {
                return document;
            }
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("Document of {identity_id} never reached the expected state");
}

#[tokio::test]
async fn merge_keeps_unrelated_fields() {
    init_logging();
    let (mock, base_url) = start_mock_store().await;
    let store = HttpProfileStore::new(&base_url, None);

    let mut fields = HashMap::new();
    fields.insert("displayName".to_string(), FieldValue::Text("Alice".to_string()));
    store.merge("alice".to_string(), fields).await.unwrap();

    let mut fields = HashMap::new();
    fields.insert("online".to_string(), FieldValue::Flag(true));
    fields.insert("updatedAt".to_string(), FieldValue::ServerTimestamp);
    store.merge("alice".to_string(), fields).await.unwrap();

    let document = mock.document("alice").await.unwrap();
    assert_eq!(document.get("displayName"), Some(&json!("Alice")));
    assert_eq!(document.get("online"), Some(&json!(true)));
    assert!(document.get("updatedAt").unwrap().is_u64());
}

#[tokio::test]
async fn rejected_write_is_an_error() {
    init_logging();
    let (_mock, base_url) = start_mock_store().await;
    let store = HttpProfileStore::new(&format!("{base_url}/missing"), None);

    let result = store.merge("alice".to_string(), HashMap::new()).await;
    assert_eq!(result, Err(StoreError::Rejected { status: 404 }));
}

#[tokio::test]
async fn client_keeps_profile_document_up_to_date() {
    init_logging();
    let (mock, base_url) = start_mock_store().await;

    let identity = IdentityContext::new();
    let client = Client::new(
        config(),
        identity.clone(),
        FakePushService::new("fcm-1"),
        Arc::new(HttpProfileStore::new(&base_url, Some("secret".to_string()))),
        FakeRegistrar::granting(),
    );

    identity.sign_in("alice".to_string());
    client.phase_changed(AppPhase::Foreground).unwrap();
    client.device_token_received(vec![0x12, 0x34]).unwrap();

    let document = wait_for_document(&mock, "alice", |document| {
        document.get("online") == Some(&json!(true))
            && document.get("messagingToken") == Some(&json!("fcm-1"))
    })
    .await;
    assert!(document.get("lastActiveAt").is_none());

    let before = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;
    client.phase_changed(AppPhase::Background).unwrap();

    let document = wait_for_document(&mock, "alice", |document| {
        document.get("online") == Some(&json!(false))
    })
    .await;

    assert_eq!(document.get("messagingToken"), Some(&json!("fcm-1")));
    let last_active_at = document.get("lastActiveAt").and_then(Value::as_u64).unwrap();
    assert!(last_active_at >= before);
}
