//! Structural validation of inbound JSON against the record shapes.
//!
//! Each kind has an explicit validation function that walks the parsed JSON
//! object, applies defaults for omitted optional fields, and collects every
//! field-level failure before giving up. Nothing here touches the database.

use serde_json::{Map, Value};

use crate::{
  error::{FieldError, FieldErrorCode, ValidationError},
  record::{Activity, Address, CatalogItem, Record, RecordKind, User},
};

/// Validate `input` as a record of `kind`.
pub fn validate(kind: RecordKind, input: &Value) -> Result<Record, ValidationError> {
  match kind {
    RecordKind::User => user(input).map(Record::from),
    RecordKind::Address => address(input).map(Record::from),
    RecordKind::Activity => activity(input).map(Record::from),
    RecordKind::CatalogItem => catalog_item(input).map(Record::from),
  }
}

/// Parse raw bytes as JSON, then validate as a record of `kind`.
pub fn validate_json(kind: RecordKind, body: &[u8]) -> Result<Record, ValidationError> {
  let value: Value = serde_json::from_slice(body).map_err(|e| {
    ValidationError::single(FieldError::new(
      "body",
      FieldErrorCode::InvalidJson,
      format!("malformed JSON: {e}"),
    ))
  })?;
  validate(kind, &value)
}

// ─── Per-kind validators ─────────────────────────────────────────────────────

pub fn user(input: &Value) -> Result<User, ValidationError> {
  let mut f = Fields::new(input)?;
  let name = f.required_str("name");
  let email = f.required_str("email");
  let role = f.str_or("role", "student");
  let avatar_url = f.optional_str("avatar_url");
  let phone = f.optional_str("phone");
  let is_active = f.bool_or("is_active", true);

  if let Some(email) = &email
    && !is_valid_email(email)
  {
    f.reject("email", FieldErrorCode::InvalidFormat, "not a valid email address");
  }
  if let Some(avatar_url) = &avatar_url
    && !is_valid_http_url(avatar_url)
  {
    f.reject("avatar_url", FieldErrorCode::InvalidFormat, "not a valid http(s) URL");
  }

  f.finish()?;
  match (name, email, role, is_active) {
    (Some(name), Some(email), Some(role), Some(is_active)) => Ok(User {
      name,
      email,
      role,
      avatar_url,
      phone,
      is_active,
    }),
    _ => Err(f.into_error()),
  }
}

pub fn address(input: &Value) -> Result<Address, ValidationError> {
  let mut f = Fields::new(input)?;
  let user_id = f.required_str("user_id");
  let label = f.required_str("label");
  let line1 = f.required_str("line1");
  let line2 = f.optional_str("line2");
  let city = f.required_str("city");
  let state = f.optional_str("state");
  let postal_code = f.optional_str("postal_code");
  let latitude = f.optional_number("latitude");
  let longitude = f.optional_number("longitude");

  f.finish()?;
  match (user_id, label, line1, city) {
    (Some(user_id), Some(label), Some(line1), Some(city)) => Ok(Address {
      user_id,
      label,
      line1,
      line2,
      city,
      state,
      postal_code,
      latitude,
      longitude,
    }),
    _ => Err(f.into_error()),
  }
}

pub fn activity(input: &Value) -> Result<Activity, ValidationError> {
  let mut f = Fields::new(input)?;
  let user_id = f.optional_str("user_id");
  let service = f.required_str("service");
  let action = f.required_str("action");
  let summary = f.required_str("summary");
  let metadata = f.object_or_empty("metadata");
  let status = f.optional_str("status");

  f.finish()?;
  match (service, action, summary) {
    (Some(service), Some(action), Some(summary)) => Ok(Activity {
      user_id,
      service,
      action,
      summary,
      metadata,
      status,
    }),
    _ => Err(f.into_error()),
  }
}

pub fn catalog_item(input: &Value) -> Result<CatalogItem, ValidationError> {
  let mut f = Fields::new(input)?;
  let service = f.required_str("service");
  let name = f.required_str("name");
  let description = f.optional_str("description");
  let price = f.required_number("price");
  let tags = f.string_list("tags");

  if let Some(price) = price
    && price < 0.0
  {
    f.reject("price", FieldErrorCode::OutOfRange, "must be greater than or equal to 0");
  }

  f.finish()?;
  match (service, name, price) {
    (Some(service), Some(name), Some(price)) => Ok(CatalogItem {
      service,
      name,
      description,
      price,
      tags,
    }),
    _ => Err(f.into_error()),
  }
}

// ─── Field walker ────────────────────────────────────────────────────────────

/// Reads typed fields out of a JSON object, recording a [`FieldError`] for
/// each one that is missing or of the wrong type.
struct Fields<'a> {
  object: &'a Map<String, Value>,
  errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
  fn new(input: &'a Value) -> Result<Self, ValidationError> {
    match input {
      Value::Object(object) => Ok(Self {
        object,
        errors: Vec::new(),
      }),
      other => Err(ValidationError::single(FieldError::new(
        "body",
        FieldErrorCode::InvalidType,
        format!("expected a JSON object, got {}", type_name(other)),
      ))),
    }
  }

  fn get(&self, field: &str) -> Option<&'a Value> { self.object.get(field) }

  fn reject(&mut self, field: &str, code: FieldErrorCode, message: impl Into<String>) {
    self.errors.push(FieldError::new(field, code, message));
  }

  fn wrong_type(&mut self, field: &str, expected: &str, got: &Value) {
    self.reject(
      field,
      FieldErrorCode::InvalidType,
      format!("expected {expected}, got {}", type_name(got)),
    );
  }

  fn required_str(&mut self, field: &str) -> Option<String> {
    match self.get(field) {
      None => {
        self.reject(field, FieldErrorCode::MissingField, "field required");
        None
      }
      Some(Value::String(s)) => Some(s.clone()),
      Some(other) => {
        self.wrong_type(field, "a string", other);
        None
      }
    }
  }

  /// Absent or `null` yields `None`.
  fn optional_str(&mut self, field: &str) -> Option<String> {
    match self.get(field) {
      None | Some(Value::Null) => None,
      Some(Value::String(s)) => Some(s.clone()),
      Some(other) => {
        self.wrong_type(field, "a string", other);
        None
      }
    }
  }

  /// Absent yields the default; `null` is a type error.
  fn str_or(&mut self, field: &str, default: &str) -> Option<String> {
    match self.get(field) {
      None => Some(default.to_owned()),
      Some(Value::String(s)) => Some(s.clone()),
      Some(other) => {
        self.wrong_type(field, "a string", other);
        None
      }
    }
  }

  fn bool_or(&mut self, field: &str, default: bool) -> Option<bool> {
    match self.get(field) {
      None => Some(default),
      Some(Value::Bool(b)) => Some(*b),
      Some(other) => {
        self.wrong_type(field, "a boolean", other);
        None
      }
    }
  }

  fn required_number(&mut self, field: &str) -> Option<f64> {
    match self.get(field) {
      None => {
        self.reject(field, FieldErrorCode::MissingField, "field required");
        None
      }
      Some(Value::Number(n)) => n.as_f64(),
      Some(other) => {
        self.wrong_type(field, "a number", other);
        None
      }
    }
  }

  fn optional_number(&mut self, field: &str) -> Option<f64> {
    match self.get(field) {
      None | Some(Value::Null) => None,
      Some(Value::Number(n)) => n.as_f64(),
      Some(other) => {
        self.wrong_type(field, "a number", other);
        None
      }
    }
  }

  fn object_or_empty(&mut self, field: &str) -> Map<String, Value> {
    match self.get(field) {
      None => Map::new(),
      Some(Value::Object(m)) => m.clone(),
      Some(other) => {
        self.wrong_type(field, "an object", other);
        Map::new()
      }
    }
  }

  /// Each non-string element is reported as `field[index]`.
  fn string_list(&mut self, field: &str) -> Vec<String> {
    match self.get(field) {
      None => Vec::new(),
      Some(Value::Array(items)) => {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
          match item {
            Value::String(s) => out.push(s.clone()),
            other => self.wrong_type(&format!("{field}[{i}]"), "a string", other),
          }
        }
        out
      }
      Some(other) => {
        self.wrong_type(field, "an array of strings", other);
        Vec::new()
      }
    }
  }

  fn finish(&self) -> Result<(), ValidationError> {
    if self.errors.is_empty() {
      Ok(())
    } else {
      Err(ValidationError {
        errors: self.errors.clone(),
      })
    }
  }

  fn into_error(self) -> ValidationError {
    ValidationError {
      errors: self.errors,
    }
  }
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

// ─── Format checks ───────────────────────────────────────────────────────────

/// Syntactic email check: `local@domain.tld`, no whitespace, a dotted domain
/// made of alphanumeric/hyphen labels.
pub fn is_valid_email(email: &str) -> bool {
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  if local.is_empty()
    || local.len() > 64
    || local.starts_with('.')
    || local.ends_with('.')
    || local.contains("..")
    || local.chars().any(|c| c.is_whitespace() || c == '@' || c.is_control())
  {
    return false;
  }

  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 {
    return false;
  }
  let labels_ok = labels.iter().all(|l| {
    !l.is_empty()
      && !l.starts_with('-')
      && !l.ends_with('-')
      && l.chars().all(|c| c.is_alphanumeric() || c == '-')
  });
  let tld_ok = labels
    .last()
    .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));
  labels_ok && tld_ok
}

fn is_valid_http_url(raw: &str) -> bool {
  url::Url::parse(raw)
    .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn codes(err: &ValidationError) -> Vec<(&str, FieldErrorCode)> {
    err.errors.iter().map(|e| (e.field.as_str(), e.code)).collect()
  }

  // ─── Activity ──────────────────────────────────────────────────────────────

  #[test]
  fn activity_defaults_applied() {
    let input = json!({
      "service": "cab360",
      "action":  "booked_ride",
      "summary": "Ride to campus",
    });
    let a = activity(&input).unwrap();
    assert_eq!(a.service, "cab360");
    assert!(a.metadata.is_empty());
    assert_eq!(a.user_id, None);
    assert_eq!(a.status, None);
  }

  #[test]
  fn activity_reports_every_missing_field() {
    let err = activity(&json!({ "service": "cab360" })).unwrap_err();
    assert_eq!(
      codes(&err),
      [
        ("action", FieldErrorCode::MissingField),
        ("summary", FieldErrorCode::MissingField),
      ]
    );
  }

  #[test]
  fn activity_rejects_wrong_types() {
    let err = activity(&json!({
      "service":  42,
      "action":   "placed_order",
      "summary":  "Order",
      "metadata": ["not", "an", "object"],
      "status":   false,
    }))
    .unwrap_err();
    assert!(err.has_field("service"));
    assert!(err.has_field("metadata"));
    assert!(err.has_field("status"));
    assert!(err.errors.iter().all(|e| e.code == FieldErrorCode::InvalidType));
  }

  #[test]
  fn activity_accepts_free_text_service() {
    let a = activity(&json!({
      "service": "laundry360",
      "action":  "dropped_off",
      "summary": "Two bags",
      "metadata": { "bags": 2 },
    }))
    .unwrap();
    assert_eq!(a.service, "laundry360");
    assert_eq!(a.metadata["bags"], 2);
  }

  #[test]
  fn non_object_body_is_rejected() {
    let err = activity(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(codes(&err), [("body", FieldErrorCode::InvalidType)]);
  }

  #[test]
  fn malformed_json_is_rejected() {
    let err = validate_json(RecordKind::Activity, b"{\"service\":").unwrap_err();
    assert_eq!(codes(&err), [("body", FieldErrorCode::InvalidJson)]);
  }

  // ─── CatalogItem ───────────────────────────────────────────────────────────

  #[test]
  fn negative_price_is_out_of_range() {
    let err = catalog_item(&json!({
      "service": "medi360",
      "name":    "Paracetamol",
      "price":   -0.5,
    }))
    .unwrap_err();
    assert_eq!(codes(&err), [("price", FieldErrorCode::OutOfRange)]);
  }

  #[test]
  fn zero_price_and_integer_price_are_fine() {
    let free = catalog_item(&json!({ "service": "print360", "name": "Flyer", "price": 0 })).unwrap();
    assert_eq!(free.price, 0.0);
    assert!(free.tags.is_empty());

    let priced = catalog_item(&json!({
      "service": "print360",
      "name":    "Spiral binding",
      "price":   35,
      "tags":    ["binding", "a4"],
    }))
    .unwrap();
    assert_eq!(priced.price, 35.0);
    assert_eq!(priced.tags, ["binding", "a4"]);
  }

  #[test]
  fn non_string_tag_is_reported_by_index() {
    let err = catalog_item(&json!({
      "service": "print360",
      "name":    "Flyer",
      "price":   1,
      "tags":    ["ok", 7],
    }))
    .unwrap_err();
    assert_eq!(codes(&err), [("tags[1]", FieldErrorCode::InvalidType)]);
  }

  // ─── User ──────────────────────────────────────────────────────────────────

  #[test]
  fn user_defaults_applied() {
    let u = user(&json!({ "name": "Asha", "email": "asha@campus.edu" })).unwrap();
    assert_eq!(u.role, "student");
    assert!(u.is_active);
    assert_eq!(u.avatar_url, None);
  }

  #[test]
  fn user_role_is_not_enforced() {
    let u = user(&json!({ "name": "Bo", "email": "bo@campus.edu", "role": "janitor" })).unwrap();
    assert_eq!(u.role, "janitor");
  }

  #[test]
  fn user_bad_email_and_url_reported_together() {
    let err = user(&json!({
      "name":       "Cy",
      "email":      "not-an-email",
      "avatar_url": "ftp://files.example.com/me.png",
      "is_active":  "yes",
    }))
    .unwrap_err();
    assert_eq!(
      codes(&err),
      [
        ("is_active", FieldErrorCode::InvalidType),
        ("email", FieldErrorCode::InvalidFormat),
        ("avatar_url", FieldErrorCode::InvalidFormat),
      ]
    );
  }

  #[test]
  fn email_syntax() {
    assert!(is_valid_email("a.b+c@mail.campus.edu"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@campus.edu"));
    assert!(!is_valid_email("a b@campus.edu"));
    assert!(!is_valid_email("a@@campus.edu"));
    assert!(!is_valid_email("a@campus..edu"));
    assert!(!is_valid_email("a@-campus.edu"));
  }

  // ─── Address ───────────────────────────────────────────────────────────────

  #[test]
  fn address_with_coordinates() {
    let a = address(&json!({
      "user_id":   "u1",
      "label":     "Library",
      "line1":     "1 College Rd",
      "city":      "Pune",
      "latitude":  18.52,
      "longitude": 73,
      "line2":     null,
    }))
    .unwrap();
    assert_eq!(a.latitude, Some(18.52));
    assert_eq!(a.longitude, Some(73.0));
    assert_eq!(a.line2, None);
  }

  #[test]
  fn address_missing_city_and_bad_latitude() {
    let err = address(&json!({
      "user_id":  "u1",
      "label":    "Home",
      "line1":    "2 Hill St",
      "latitude": "north",
    }))
    .unwrap_err();
    assert_eq!(
      codes(&err),
      [
        ("city", FieldErrorCode::MissingField),
        ("latitude", FieldErrorCode::InvalidType),
      ]
    );
  }

  #[test]
  fn dispatch_by_kind() {
    let r = validate(
      RecordKind::CatalogItem,
      &json!({ "service": "medi360", "name": "ORS", "price": 20.0 }),
    )
    .unwrap();
    assert_eq!(r.kind(), RecordKind::CatalogItem);
  }
}
