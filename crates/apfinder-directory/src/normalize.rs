//! Row normalization at the directory boundary.
//!
//! Rows arrive loosely typed: ids may be numbers or strings, text columns may
//! be blank, numeric or null, and the plan join may come back as an object,
//! a one-element array or null. [`normalize_row`] turns that into a
//! [`LocationEntity`] with trimmed, non-blank optional fields.

use apfinder_core::{EntityId, LocationEntity, Plan};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// A directory row exactly as the data API returns it.
#[derive(Debug, Default, Deserialize)]
pub struct RawDirectoryRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub instagram: Option<Value>,
    #[serde(default)]
    pub logo_url: Option<Value>,
    #[serde(default)]
    pub plan_id: Option<Value>,
    #[serde(default)]
    pub cidade: Option<Value>,
    #[serde(default)]
    pub estado: Option<Value>,
    #[serde(default)]
    pub plans: Option<Value>,
}

/// Normalize a batch of rows, dropping rows without an id.
#[must_use]
pub fn normalize_rows(rows: Vec<RawDirectoryRow>, collection: &str) -> Vec<LocationEntity> {
    let total = rows.len();
    let entities: Vec<LocationEntity> = rows.into_iter().filter_map(normalize_row).collect();
    let skipped = total - entities.len();
    if skipped > 0 {
        tracing::warn!(collection, skipped, "skipping directory rows without an id");
    }
    entities
}

/// Normalize one row. Returns `None` when the row has no usable id.
#[must_use]
pub fn normalize_row(row: RawDirectoryRow) -> Option<LocationEntity> {
    let id = row.id.as_ref().and_then(text).map(EntityId)?;
    let plan = joined_plan(row.plans.as_ref())
        .or_else(|| row.plan_id.as_ref().and_then(plan_from_id));

    Some(LocationEntity {
        id,
        name: row.name.as_ref().and_then(text).unwrap_or_default(),
        email: row.email.as_ref().and_then(text),
        phone: row.phone.as_ref().and_then(text),
        instagram: row.instagram.as_ref().and_then(text),
        logo_url: row.logo_url.as_ref().and_then(text),
        address: row.address.as_ref().and_then(text),
        city: row.cidade.as_ref().and_then(text),
        state: row.estado.as_ref().and_then(text),
        plan,
    })
}

/// Trimmed, non-blank text from a string or number value.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn joined_plan(value: Option<&Value>) -> Option<Plan> {
    let object = match value? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let id = object.get("id").and_then(Value::as_str).and_then(parse_uuid)?;
    let name = object.get("name").and_then(text).unwrap_or_default();
    Some(Plan { id, name })
}

/// Bare foreign key without a joined row: the tier is known, its name isn't.
fn plan_from_id(value: &Value) -> Option<Plan> {
    let id = value.as_str().and_then(parse_uuid)?;
    Some(Plan {
        id,
        name: String::new(),
    })
}

fn parse_uuid(raw: &str) -> Option<Uuid> {
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(raw, error = %e, "ignoring plan reference that is not a UUID");
            None
        }
    }
}
