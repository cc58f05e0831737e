//! Entity kinds, field declarations and identifiers.
//!
//! The todo manager knows three entity kinds. Each kind declares a fixed,
//! ordered list of fields; records store their values positionally in that
//! order so the wire representation is stable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of entity held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A single task.
    Todo,
    /// A group of tasks.
    Project,
    /// A label that can be attached to todos and projects.
    Category,
}

impl EntityKind {
    /// All entity kinds, in route order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Todo, EntityKind::Project, EntityKind::Category];

    /// Returns the plural name used in routes and collection payloads.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Todo => "todos",
            EntityKind::Project => "projects",
            EntityKind::Category => "categories",
        }
    }

    /// Returns the singular name used in error messages.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Todo => "todo",
            EntityKind::Project => "project",
            EntityKind::Category => "category",
        }
    }

    /// Resolves a route segment (e.g. `"todos"`) to an entity kind.
    pub fn from_plural(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == segment)
    }

    /// Returns the declared fields of this kind, in wire order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Todo => TODO_FIELDS,
            EntityKind::Project => PROJECT_FIELDS,
            EntityKind::Category => CATEGORY_FIELDS,
        }
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<(usize, &'static FieldSpec)> {
        self.fields()
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name == name)
    }

    /// Index into the per-kind tables of the in-memory backend.
    pub(crate) fn index(&self) -> usize {
        match self {
            EntityKind::Todo => 0,
            EntityKind::Project => 1,
            EntityKind::Category => 2,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

const TODO_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("title"),
    FieldSpec::boolean("doneStatus"),
    FieldSpec::string("description"),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("title"),
    FieldSpec::string("description"),
    FieldSpec::boolean("active"),
];

const CATEGORY_FIELDS: &[FieldSpec] = &[FieldSpec::string("title"), FieldSpec::string("description")];

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text.
    String,
    /// A flag; only JSON booleans are accepted on input.
    Boolean,
}

impl FieldType {
    /// The name reported in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Boolean => "BOOLEAN",
        }
    }

    /// The value a field of this type takes when not supplied.
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldType::String => FieldValue::Text(String::new()),
            FieldType::Boolean => FieldValue::Flag(false),
        }
    }
}

/// Declaration of a single entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears on the wire.
    pub name: &'static str,
    /// Declared type.
    pub field_type: FieldType,
}

impl FieldSpec {
    const fn string(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
        }
    }

    const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Boolean,
        }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value.
    Text(String),
    /// A boolean value.
    Flag(bool),
}

impl FieldValue {
    /// Returns the string content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    /// Returns the flag, if this is a boolean value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Store-assigned identifier of an entity.
///
/// Identifiers are allocated per entity kind, start at 1 and are never
/// reused. On the wire they are decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Parses an identifier taken from a path or payload.
    ///
    /// Anything that is not a plain decimal number names no entity. Leading
    /// zeros are rejected so every record has exactly one spelling.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if raw.len() > 1 && raw.starts_with('0') {
            return None;
        }
        raw.parse().ok().map(Self)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}
