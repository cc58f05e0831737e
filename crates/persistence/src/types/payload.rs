//! Request payloads and validated field sets.
//!
//! A [`Payload`] is the raw JSON object a client sent. Validation turns it
//! into a [`FieldSet`]: for every declared field of the target kind, either
//! absent or present with a typed value. Whether absent fields keep their
//! current value or fall back to defaults is decided by the write mode, not
//! by the payload.

use serde_json::{Map, Value};

use super::entity::{EntityKind, FieldValue};
use crate::error::ValidationIssue;

/// A JSON object received as a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request body. Only a JSON object is accepted.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationIssue> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationIssue::MalformedBody {
                message: "request body is empty".to_string(),
            });
        }

        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ValidationIssue::MalformedBody {
                message: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
        }
    }

    /// Wraps an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ValidationIssue> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ValidationIssue::MalformedBody {
                message: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
        }
    }

    /// Returns a raw field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the `id` member as text, if present.
    ///
    /// Numeric ids are accepted and rendered in decimal.
    pub fn id(&self) -> Option<String> {
        self.fields.get("id").map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Whether the payload carries an `id` member.
    pub fn has_id(&self) -> bool {
        self.fields.contains_key("id")
    }

    /// Iterates over the members in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no members.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How a validated field set is applied to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// New record; absent fields take defaults, `id` is forbidden.
    Create,
    /// POST on an item; absent fields keep their current value.
    Amend,
    /// PUT on an item; absent fields are reset to defaults.
    Replace,
}

/// Validated, typed field values for one entity kind.
///
/// Holds one slot per declared field; `None` means the client did not send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    kind: EntityKind,
    slots: Vec<Option<FieldValue>>,
}

impl FieldSet {
    /// Creates a field set with every field absent.
    pub fn empty(kind: EntityKind) -> Self {
        Self {
            kind,
            slots: vec![None; kind.fields().len()],
        }
    }

    /// Sets a declared field. Returns `false` if the kind has no such field.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> bool {
        match self.kind.field(field) {
            Some((index, _)) => {
                self.slots[index] = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Builder form of [`FieldSet::set`] for declared fields.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// The kind these fields belong to.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns a supplied value.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.kind
            .field(field)
            .and_then(|(index, _)| self.slots[index].as_ref())
    }

    /// Produces full record values, filling absent fields with defaults.
    pub fn into_values(self) -> Vec<FieldValue> {
        self.kind
            .fields()
            .iter()
            .zip(self.slots)
            .map(|(spec, slot)| slot.unwrap_or_else(|| spec.field_type.default_value()))
            .collect()
    }

    /// Applies the supplied fields onto existing values according to `mode`.
    pub fn apply_to(self, current: &mut [FieldValue], mode: WriteMode) {
        debug_assert_eq!(current.len(), self.slots.len());
        for ((value, slot), spec) in current
            .iter_mut()
            .zip(self.slots)
            .zip(self.kind.fields())
        {
            match (slot, mode) {
                (Some(new), _) => *value = new,
                (None, WriteMode::Amend) => {}
                (None, WriteMode::Create | WriteMode::Replace) => {
                    *value = spec.field_type.default_value()
                }
            }
        }
    }
}
