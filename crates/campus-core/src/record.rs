//! Record kinds — the four document shapes stored by the backend.
//!
//! Each kind lives in exactly one collection. The collection name is the
//! lowercase type name, spelled out in [`RecordKind::collection`] rather than
//! derived.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::Document;

// ─── Kinds ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
  User,
  Address,
  Activity,
  CatalogItem,
}

impl RecordKind {
  /// Every kind, in the order advertised by schema introspection.
  pub const ALL: [RecordKind; 4] = [
    RecordKind::User,
    RecordKind::Address,
    RecordKind::Activity,
    RecordKind::CatalogItem,
  ];

  /// The collection documents of this kind are stored in.
  pub fn collection(self) -> &'static str {
    match self {
      Self::User => "user",
      Self::Address => "address",
      Self::Activity => "activity",
      Self::CatalogItem => "catalogitem",
    }
  }
}

// ─── Shapes ──────────────────────────────────────────────────────────────────

/// A person using any of the campus services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub name:       String,
  pub email:      String,
  /// By convention one of `student`, `driver`, `vendor`, `admin`. Not
  /// enforced.
  pub role:       String,
  pub avatar_url: Option<String>,
  pub phone:      Option<String>,
  pub is_active:  bool,
}

/// A saved address used for quick bookings and orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
  /// Owning user. Not checked against the `user` collection.
  pub user_id:     String,
  /// Friendly label, e.g. "Home" or "Library".
  pub label:       String,
  pub line1:       String,
  pub line2:       Option<String>,
  pub city:        String,
  pub state:       Option<String>,
  pub postal_code: Option<String>,
  pub latitude:    Option<f64>,
  pub longitude:   Option<f64>,
}

/// An entry in the cross-service activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
  pub user_id:  Option<String>,
  /// By convention one of `cab360`, `medi360`, `print360`, `system`.
  pub service:  String,
  /// Short verb, e.g. `booked_ride`.
  pub action:   String,
  pub summary:  String,
  pub metadata: Map<String, Value>,
  pub status:   Option<String>,
}

/// A catalog listing (medicines, print bindings, ...) shown on the landing
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
  pub service:     String,
  pub name:        String,
  pub description: Option<String>,
  /// Never negative.
  pub price:       f64,
  pub tags:        Vec<String>,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A validated record of any kind, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
  User(User),
  Address(Address),
  Activity(Activity),
  CatalogItem(CatalogItem),
}

impl Record {
  pub fn kind(&self) -> RecordKind {
    match self {
      Self::User(_) => RecordKind::User,
      Self::Address(_) => RecordKind::Address,
      Self::Activity(_) => RecordKind::Activity,
      Self::CatalogItem(_) => RecordKind::CatalogItem,
    }
  }

  /// Serialise the record's fields into a document body. Omitted optional
  /// fields appear as `null`.
  pub fn to_document(&self) -> serde_json::Result<Document> {
    match self {
      Self::User(r) => to_object(r),
      Self::Address(r) => to_object(r),
      Self::Activity(r) => to_object(r),
      Self::CatalogItem(r) => to_object(r),
    }
  }
}

fn to_object<T: Serialize>(value: &T) -> serde_json::Result<Document> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    other => Err(serde::ser::Error::custom(format!(
      "record serialised to a non-object: {other}"
    ))),
  }
}

impl From<User> for Record {
  fn from(r: User) -> Self { Self::User(r) }
}

impl From<Address> for Record {
  fn from(r: Address) -> Self { Self::Address(r) }
}

impl From<Activity> for Record {
  fn from(r: Activity) -> Self { Self::Activity(r) }
}

impl From<CatalogItem> for Record {
  fn from(r: CatalogItem) -> Self { Self::CatalogItem(r) }
}
