//! FarmerRecord schema, partial patches, and boundary coercion of loose JSON values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// Role tag stamped on every record at creation.
pub const FARMER_ROLE: &str = "farmer";

fn default_role() -> String {
    FARMER_ROLE.to_string()
}

/// Stored document body. Every field except `role` is optional; absent fields are omitted from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acres: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(default = "default_role")]
    pub role: String,
}

/// A stored record: store-assigned id plus the document fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: RecordFields,
}

/// Change to a single field: leave it, clear it (explicit `null`), or set it.
#[derive(Clone, Debug, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T: Clone> Patch<T> {
    fn apply_to(&self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(v) => *slot = Some(v.clone()),
        }
    }
}

/// Field changes carried by a create or update request, already mapped to record names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordPatch {
    pub district: Patch<String>,
    pub town: Patch<String>,
    pub location: Patch<String>,
    pub crop: Patch<String>,
    pub contact: Patch<String>,
    pub acres: Patch<Number>,
    pub price: Patch<Number>,
}

impl RecordPatch {
    /// Apply the named fields; `role` is never touched.
    pub fn apply(&self, fields: &mut RecordFields) {
        self.district.apply_to(&mut fields.district);
        self.town.apply_to(&mut fields.town);
        self.location.apply_to(&mut fields.location);
        self.crop.apply_to(&mut fields.crop);
        self.contact.apply_to(&mut fields.contact);
        self.acres.apply_to(&mut fields.acres);
        self.price.apply_to(&mut fields.price);
    }

    /// Fields for a new record: the patch applied to an empty document.
    pub fn into_new_fields(self) -> RecordFields {
        let mut fields = RecordFields::default();
        self.apply(&mut fields);
        fields
    }

    /// Split into a JSON object of values to merge and the keys to remove.
    pub fn to_document_ops(&self) -> (Map<String, Value>, Vec<String>) {
        let mut set = Map::new();
        let mut cleared = Vec::new();
        let mut visit = |key: &str, patch: Patch<Value>| match patch {
            Patch::Keep => {}
            Patch::Clear => cleared.push(key.to_string()),
            Patch::Set(v) => {
                set.insert(key.to_string(), v);
            }
        };
        visit("district", text_value(&self.district));
        visit("town", text_value(&self.town));
        visit("location", text_value(&self.location));
        visit("crop", text_value(&self.crop));
        visit("contact", text_value(&self.contact));
        visit("acres", number_value(&self.acres));
        visit("price", number_value(&self.price));
        (set, cleared)
    }
}

fn text_value(p: &Patch<String>) -> Patch<Value> {
    match p {
        Patch::Keep => Patch::Keep,
        Patch::Clear => Patch::Clear,
        Patch::Set(s) => Patch::Set(Value::String(s.clone())),
    }
}

fn number_value(p: &Patch<Number>) -> Patch<Value> {
    match p {
        Patch::Keep => Patch::Keep,
        Patch::Clear => Patch::Clear,
        Patch::Set(n) => Patch::Set(Value::Number(n.clone())),
    }
}

/// Coerce a scalar into text. Strings pass through; numbers and booleans are stringified.
pub fn coerce_text(value: Value) -> Result<Patch<String>, String> {
    match value {
        Value::Null => Ok(Patch::Clear),
        Value::String(s) => Ok(Patch::Set(s)),
        Value::Number(n) => Ok(Patch::Set(n.to_string())),
        Value::Bool(b) => Ok(Patch::Set(b.to_string())),
        other => Err(format!("expected a string, got {}", kind_of(&other))),
    }
}

/// Coerce a scalar into a number. Numeric strings are parsed; an empty string clears the field.
pub fn coerce_number(value: Value) -> Result<Patch<Number>, String> {
    match value {
        Value::Null => Ok(Patch::Clear),
        Value::Number(n) => Ok(Patch::Set(n)),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Ok(Patch::Clear);
            }
            if let Ok(i) = t.parse::<i64>() {
                return Ok(Patch::Set(Number::from(i)));
            }
            t.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Patch::Set)
                .ok_or_else(|| format!("expected a number, got '{}'", s))
        }
        other => Err(format!("expected a number, got {}", kind_of(&other))),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `deserialize_with` helper for text fields. Use together with `#[serde(default)]` so absence means keep.
pub fn text<'de, D>(deserializer: D) -> Result<Patch<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    coerce_text(v).map_err(serde::de::Error::custom)
}

/// `deserialize_with` helper for numeric fields.
pub fn number<'de, D>(deserializer: D) -> Result<Patch<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    coerce_number(v).map_err(serde::de::Error::custom)
}
