use crate::fakes::{
    FakePushService, FakeRegistrar, Harness, RecordingStore, config, init_logging, settle,
};
use chat_lifecycle_sdk::client::EVENT_QUEUE_CAPACITY;
use chat_lifecycle_sdk::{AppPhase, Client, Event, FieldValue, IdentityContext};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

fn harness() -> Harness {
    Harness::new(FakePushService::new("fcm-1"), FakeRegistrar::granting())
}

async fn signed_in(identity_id: &str) -> Harness {
    let harness = harness();
    harness.identity.sign_in(identity_id.to_string());
    settle().await;
    harness
}

async fn phase(harness: &Harness, phase: AppPhase) {
    harness.client.phase_changed(phase).unwrap();
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn background_foreground_background_writes_twice() {
    let harness = signed_in("alice").await;

    phase(&harness, AppPhase::Background).await;
    phase(&harness, AppPhase::Foreground).await;

    let before = SystemTime::now();
    phase(&harness, AppPhase::Background).await;
    let after = SystemTime::now();

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 2);

    let (identity_id, went_online) = &writes[0];
    assert_eq!(identity_id, "alice");
    assert_eq!(went_online.get("online"), Some(&FieldValue::Flag(true)));
    assert_eq!(went_online.get("updatedAt"), Some(&FieldValue::ServerTimestamp));
    assert!(!went_online.contains_key("lastActiveAt"));

    let (_, went_offline) = &writes[1];
    assert_eq!(went_offline.get("online"), Some(&FieldValue::Flag(false)));
    let last_active_at = went_offline
        .get("lastActiveAt")
        .and_then(FieldValue::as_timestamp)
        .unwrap();
    assert!(before <= last_active_at && last_active_at <= after);
}

#[tokio::test(start_paused = true)]
async fn hiding_while_foregrounded_writes_offline_without_last_active() {
    let harness = signed_in("alice").await;
    phase(&harness, AppPhase::Foreground).await;

    harness.client.set_status_hidden(true).unwrap();
    settle().await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[1].1.get("online"), Some(&FieldValue::Flag(false)));
    assert!(!writes[1].1.contains_key("lastActiveAt"));
}

#[tokio::test(start_paused = true)]
async fn hidden_user_never_goes_online() {
    let harness = signed_in("alice").await;
    harness.client.set_status_hidden(true).unwrap();
    settle().await;

    phase(&harness, AppPhase::Foreground).await;
    phase(&harness, AppPhase::Background).await;
    phase(&harness, AppPhase::Foreground).await;
    assert!(harness.store.writes_with("online").is_empty());

    harness.client.set_status_hidden(false).unwrap();
    settle().await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1.get("online"), Some(&FieldValue::Flag(true)));
    assert!(!writes[0].1.contains_key("lastActiveAt"));
}

#[tokio::test(start_paused = true)]
async fn inactive_counts_as_background() {
    let harness = signed_in("alice").await;

    phase(&harness, AppPhase::Inactive).await;
    assert!(harness.store.writes_with("online").is_empty());

    phase(&harness, AppPhase::Foreground).await;
    phase(&harness, AppPhase::Inactive).await;
    phase(&harness, AppPhase::Background).await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[1].1.get("online"), Some(&FieldValue::Flag(false)));
    assert!(writes[1].1.contains_key("lastActiveAt"));
}

#[tokio::test(start_paused = true)]
async fn nothing_is_written_without_an_identity() {
    let harness = harness();

    phase(&harness, AppPhase::Foreground).await;
    harness.client.set_status_hidden(true).unwrap();
    phase(&harness, AppPhase::Background).await;

    assert!(harness.store.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn identity_changes_recompute_for_the_new_identity() {
    let harness = harness();
    phase(&harness, AppPhase::Foreground).await;

    harness.identity.sign_in("alice".to_string());
    settle().await;
    harness.identity.sign_out();
    settle().await;
    harness.identity.sign_in("bob".to_string());
    settle().await;

    let writes = harness.store.writes_with("online");
    let identities: Vec<&str> = writes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(identities, vec!["alice", "bob"]);
    assert!(
        writes
            .iter()
            .all(|(_, fields)| fields.get("online") == Some(&FieldValue::Flag(true))
                && !fields.contains_key("lastActiveAt"))
    );
}

#[tokio::test(start_paused = true)]
async fn visibility_does_not_carry_over_to_other_identities() {
    let harness = signed_in("alice").await;
    harness.client.set_status_hidden(true).unwrap();
    settle().await;

    harness.identity.sign_in("bob".to_string());
    settle().await;
    phase(&harness, AppPhase::Foreground).await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "bob");
}

#[tokio::test(start_paused = true)]
async fn presence_write_failures_are_reported() {
    let harness = signed_in("alice").await;
    harness.store.set_failing(true);

    phase(&harness, AppPhase::Foreground).await;

    assert!(harness.events().iter().any(|event| matches!(
        event,
        Event::PresencePersistFailed { identity_id, .. } if identity_id == "alice"
    )));

    harness.store.set_failing(false);
    phase(&harness, AppPhase::Background).await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1.get("online"), Some(&FieldValue::Flag(false)));
    assert!(harness.events().contains(&Event::PresencePersisted {
        identity_id: "alice".to_string(),
        online: false
    }));
}

#[tokio::test(start_paused = true)]
async fn user_signed_out_right_after_sign_in_is_never_marked_online() {
    let harness = harness();
    phase(&harness, AppPhase::Foreground).await;

    harness.identity.sign_in("alice".to_string());
    harness.identity.sign_out();
    settle().await;

    assert!(harness.store.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn every_write_of_a_quick_flap_carries_the_whole_presence() {
    let harness = signed_in("alice").await;

    // Later writes land first
    harness.store.delay_writes(&[
        Duration::from_secs(3),
        Duration::from_secs(2),
        Duration::from_secs(1),
    ]);

    harness.client.phase_changed(AppPhase::Foreground).unwrap();
    harness.client.phase_changed(AppPhase::Background).unwrap();
    harness.client.phase_changed(AppPhase::Foreground).unwrap();
    settle().await;
    assert!(harness.store.writes_with("online").is_empty());

    tokio::time::sleep(Duration::from_secs(4)).await;

    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 3);
    assert!(writes.iter().all(|(identity_id, fields)| identity_id == "alice"
        && fields.contains_key("online")
        && fields.get("updatedAt") == Some(&FieldValue::ServerTimestamp)));

    let online: Vec<Option<&FieldValue>> =
        writes.iter().map(|(_, fields)| fields.get("online")).collect();
    assert_eq!(
        online,
        vec![
            Some(&FieldValue::Flag(true)),
            Some(&FieldValue::Flag(false)),
            Some(&FieldValue::Flag(true)),
        ]
    );
    assert!(!writes[0].1.contains_key("lastActiveAt"));
    assert!(writes[1].1.contains_key("lastActiveAt"));
    assert!(!writes[2].1.contains_key("lastActiveAt"));

    let document = harness.store.document("alice").unwrap();
    assert_eq!(document.get("online"), Some(&FieldValue::Flag(true)));

    // What was last issued counts, not what landed last
    phase(&harness, AppPhase::Background).await;
    let writes = harness.store.writes_with("online");
    assert_eq!(writes.len(), 4);
    assert_eq!(writes[3].1.get("online"), Some(&FieldValue::Flag(false)));
}

#[tokio::test(start_paused = true)]
async fn events_are_dropped_while_nobody_handles_them() {
    init_logging();

    let identity = IdentityContext::new();
    let store = RecordingStore::new();
    let client = Client::new(
        config(),
        identity.clone(),
        FakePushService::new("fcm-1"),
        store.clone(),
        FakeRegistrar::granting(),
    );

    identity.sign_in("alice".to_string());
    settle().await;

    for _ in 0..100 {
        client.phase_changed(AppPhase::Foreground).unwrap();
        client.phase_changed(AppPhase::Background).unwrap();
    }

    settle().await;
    assert_eq!(store.writes_with("online").len(), 200);
    assert_eq!(client.event_queue_size(), EVENT_QUEUE_CAPACITY);

    let events = Arc::new(Mutex::new(Vec::new()));
    let recorded = events.clone();
    client.add_event_handler_closure(move |event| recorded.lock().unwrap().push(event));
    settle().await;

    assert_eq!(events.lock().unwrap().len(), EVENT_QUEUE_CAPACITY);
    assert_eq!(client.event_queue_size(), 0);

    client.phase_changed(AppPhase::Foreground).unwrap();
    settle().await;
    assert!(events.lock().unwrap().contains(&Event::PresencePersisted {
        identity_id: "alice".to_string(),
        online: true
    }));
}
