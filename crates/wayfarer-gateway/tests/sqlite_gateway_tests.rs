//! Integration tests for the SQLite gateway
//!
//! These tests verify the full CRUD cycle per owner.

use wayfarer_domain::traits::PersistenceGateway;
use wayfarer_domain::{
    Activity, GatewayError, GeoPoint, ItineraryDraft, ItineraryId, ItineraryPatch,
    ItineraryRecord, RecordFactory, UserId,
};
use wayfarer_gateway::SqliteGateway;

fn draft(title: &str, destination: &str) -> ItineraryDraft {
    ItineraryDraft {
        title: title.to_string(),
        destination: destination.to_string(),
        start_date: "2024-07-01".to_string(),
        end_date: "2024-07-10".to_string(),
        categories: vec!["Adventure".to_string(), "Leisure".to_string()],
        description: "A long enough description".to_string(),
        photo_url: "https://example.com/photo.jpg".to_string(),
        activities: Some(vec![Activity {
            day: 1,
            name: "Harder Kulm".to_string(),
            location: GeoPoint { lat: 46.69, lng: 7.86 },
        }]),
    }
}

fn record(owner: &UserId, title: &str) -> ItineraryRecord {
    RecordFactory::build(&draft(title, "Interlaken, Switzerland"), owner)
}

#[test]
fn test_gateway_initialization() {
    let gateway = SqliteGateway::in_memory();
    assert!(gateway.is_ok(), "Gateway should initialize successfully");
}

#[tokio::test]
async fn test_add_and_get_roundtrip() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let original = record(&alice, "Summer in the Alps");

    let id = gateway.add(&alice, &original).await.unwrap();
    assert_eq!(id, original.id, "SQLite gateway confirms the given id");

    let stored = gateway.get(&alice, &id).unwrap().expect("record should exist");
    assert_eq!(stored, original);
}

#[tokio::test]
async fn test_duplicate_id_rejected() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let original = record(&alice, "Summer in the Alps");

    gateway.add(&alice, &original).await.unwrap();
    let result = gateway.add(&alice, &original).await;
    assert!(matches!(result, Err(GatewayError::Duplicate(_))));
}

#[tokio::test]
async fn test_list_is_newest_first_and_per_owner() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let bob = UserId::from("bob");

    for title in ["First", "Second", "Third"] {
        gateway.add(&alice, &record(&alice, title)).await.unwrap();
    }
    gateway.add(&bob, &record(&bob, "Bob's trip")).await.unwrap();

    let titles: Vec<String> = gateway
        .list_all(&alice)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    let bobs = gateway.list_all(&bob).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].owner, bob);
}

#[tokio::test]
async fn test_update_favorite() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let id = gateway.add(&alice, &record(&alice, "Trip")).await.unwrap();

    gateway
        .update(&alice, &id, &ItineraryPatch::favorite(true))
        .await
        .unwrap();
    assert!(gateway.get(&alice, &id).unwrap().unwrap().is_favorite);

    // An empty patch is a no-op, even for unknown ids
    gateway
        .update(&alice, &ItineraryId::from("missing"), &ItineraryPatch::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_other_owner_is_not_found() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let bob = UserId::from("bob");
    let id = gateway.add(&alice, &record(&alice, "Trip")).await.unwrap();

    let result = gateway.update(&bob, &id, &ItineraryPatch::favorite(true)).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
    assert!(!gateway.get(&alice, &id).unwrap().unwrap().is_favorite);
}

#[tokio::test]
async fn test_delete() {
    let gateway = SqliteGateway::in_memory().unwrap();
    let alice = UserId::from("alice");
    let id = gateway.add(&alice, &record(&alice, "Trip")).await.unwrap();

    gateway.delete(&alice, &id).await.unwrap();
    assert!(gateway.get(&alice, &id).unwrap().is_none());

    let again = gateway.delete(&alice, &id).await;
    assert!(matches!(again, Err(GatewayError::NotFound(_))));
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itineraries.db");
    let alice = UserId::from("alice");

    let id = {
        let gateway = SqliteGateway::new(&path).unwrap();
        gateway.add(&alice, &record(&alice, "Persistent trip")).await.unwrap()
    };

    let reopened = SqliteGateway::new(&path).unwrap();
    let listed = reopened.list_all(&alice).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].activities.len(), 1);
    assert_eq!(listed[0].categories, vec!["Adventure", "Leisure"]);
}
