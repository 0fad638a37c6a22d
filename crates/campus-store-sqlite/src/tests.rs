//! Integration tests for `SqliteStore` against an in-memory database.

use campus_core::store::{Document, DocumentStore, Filter, ID_FIELD};
use serde_json::{Value, json};

use crate::{Error, Location, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory("campus360")
    .await
    .expect("in-memory store")
}

fn doc(value: Value) -> Document {
  match value {
    Value::Object(map) => map,
    _ => panic!("document must be an object"),
  }
}

fn item(service: &str, name: &str) -> Document {
  doc(json!({ "service": service, "name": name, "price": 10, "tags": [] }))
}

// ─── Location ────────────────────────────────────────────────────────────────

#[test]
fn location_parsing() {
  assert_eq!(Location::parse(":memory:"), Location::Memory);
  assert_eq!(Location::parse("sqlite://:memory:"), Location::Memory);
  assert_eq!(
    Location::parse("sqlite:///var/lib/campus.db"),
    Location::File("/var/lib/campus.db".into())
  );
  assert_eq!(Location::parse("sqlite:campus.db"), Location::File("campus.db".into()));
  assert_eq!(Location::parse("data/campus.db"), Location::File("data/campus.db".into()));
}

#[tokio::test]
async fn connect_fails_for_unreachable_path() {
  let result = SqliteStore::connect("/nonexistent-dir/deeper/campus.db", "campus360").await;
  assert!(matches!(result, Err(Error::Database(_))));
}

// ─── Insert and query ────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_hex_identifier() {
  let s = store().await;
  let id = s.insert("catalogitem", item("medi360", "ORS")).await.unwrap();

  assert_eq!(id.len(), 32);
  assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn query_returns_identifier_and_timestamps() {
  let s = store().await;
  let id = s.insert("catalogitem", item("medi360", "ORS")).await.unwrap();

  let docs = s.query("catalogitem", &Filter::new(), 10).await.unwrap();
  assert_eq!(docs.len(), 1);
  let d = &docs[0];
  assert_eq!(d[ID_FIELD], json!(id));
  assert_eq!(d["name"], "ORS");
  assert_eq!(d["price"], 10);
  assert!(d["created_at"].is_string());
  assert_eq!(d["created_at"], d["updated_at"]);
}

#[tokio::test]
async fn client_supplied_identifier_is_discarded() {
  let s = store().await;
  let mut document = item("print360", "Flyer");
  document.insert(ID_FIELD.to_owned(), json!("forged"));

  let id = s.insert("catalogitem", document).await.unwrap();
  let docs = s.query("catalogitem", &Filter::new(), 10).await.unwrap();
  assert_ne!(id, "forged");
  assert_eq!(docs[0][ID_FIELD], json!(id));
}

#[tokio::test]
async fn collections_are_separate() {
  let s = store().await;
  s.insert("catalogitem", item("medi360", "ORS")).await.unwrap();
  s.insert("activity", doc(json!({ "service": "cab360" }))).await.unwrap();

  let items = s.query("catalogitem", &Filter::new(), 10).await.unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0]["name"], "ORS");
}

#[tokio::test]
async fn filter_matches_exact_value() {
  let s = store().await;
  s.insert("catalogitem", item("medi360", "ORS")).await.unwrap();
  s.insert("catalogitem", item("print360", "Flyer")).await.unwrap();
  s.insert("catalogitem", item("medi360", "Bandage")).await.unwrap();
  s.insert("catalogitem", item("medi3600", "Typo")).await.unwrap();

  let filter = doc(json!({ "service": "medi360" }));
  let docs = s.query("catalogitem", &filter, 10).await.unwrap();
  assert_eq!(docs.len(), 2);
  assert!(docs.iter().all(|d| d["service"] == "medi360"));
}

#[tokio::test]
async fn filter_on_numbers_and_missing_fields() {
  let s = store().await;
  s.insert("activity", doc(json!({ "service": "cab360", "status": "success" }))).await.unwrap();
  s.insert("activity", doc(json!({ "service": "cab360", "status": null }))).await.unwrap();
  s.insert("activity", doc(json!({ "service": "cab360" }))).await.unwrap();
  s.insert("catalogitem", doc(json!({ "name": "A", "price": 10 }))).await.unwrap();
  s.insert("catalogitem", doc(json!({ "name": "B", "price": "10" }))).await.unwrap();

  let null_status = s.query("activity", &doc(json!({ "status": null })), 10).await.unwrap();
  assert_eq!(null_status.len(), 2);

  let priced = s.query("catalogitem", &doc(json!({ "price": 10 })), 10).await.unwrap();
  assert_eq!(priced.len(), 1);
  assert_eq!(priced[0]["name"], "A");
}

#[tokio::test]
async fn limit_bounds_result_count() {
  let s = store().await;
  for i in 0..15 {
    s.insert("activity", doc(json!({ "service": "system", "summary": format!("event {i}") })))
      .await
      .unwrap();
  }

  assert_eq!(s.query("activity", &Filter::new(), 5).await.unwrap().len(), 5);
  assert_eq!(s.query("activity", &Filter::new(), 100).await.unwrap().len(), 15);
  assert!(s.query("activity", &Filter::new(), 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_filter_key_is_an_error() {
  let s = store().await;
  let result = s.query("activity", &doc(json!({ "bad\"key": 1 })), 10).await;
  assert!(matches!(result, Err(Error::InvalidFilterKey(_))));
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_collection_names_is_distinct_and_sorted() {
  let s = store().await;
  assert!(s.list_collection_names().await.unwrap().is_empty());

  s.insert("user", doc(json!({ "name": "Asha" }))).await.unwrap();
  s.insert("activity", doc(json!({ "service": "cab360" }))).await.unwrap();
  s.insert("activity", doc(json!({ "service": "medi360" }))).await.unwrap();

  assert_eq!(s.list_collection_names().await.unwrap(), ["activity", "user"]);
}

#[tokio::test]
async fn databases_sharing_a_connection_are_isolated() {
  let s = store().await;
  let other = s.with_database("staging");
  assert_eq!(other.database(), "staging");

  s.insert("activity", doc(json!({ "service": "cab360" }))).await.unwrap();
  other.insert("catalogitem", item("medi360", "ORS")).await.unwrap();

  assert_eq!(s.list_collection_names().await.unwrap(), ["activity"]);
  assert_eq!(other.list_collection_names().await.unwrap(), ["catalogitem"]);
  assert!(other.query("activity", &Filter::new(), 10).await.unwrap().is_empty());
}
