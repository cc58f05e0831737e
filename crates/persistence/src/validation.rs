//! Payload validation.
//!
//! Turns a raw [`Payload`] into a typed [`FieldSet`] for a given entity kind,
//! collecting every problem rather than stopping at the first one.

use serde_json::Value;

use crate::error::{ValidationError, ValidationIssue};
use crate::types::{EntityId, EntityKind, FieldSet, FieldType, FieldValue, Payload, WriteMode};

/// Validates a create, amend or replace payload.
///
/// `path_id` is the id from the request path and is required for
/// [`WriteMode::Amend`] and [`WriteMode::Replace`]; an `id` member in the body
/// is accepted there only when it names the same record.
///
/// Issues are reported in key order, not in the order the body lists them.
pub fn validate_fields(
    kind: EntityKind,
    payload: &Payload,
    mode: WriteMode,
    path_id: Option<EntityId>,
) -> Result<FieldSet, ValidationError> {
    let mut fields = FieldSet::empty(kind);
    let mut issues = Vec::new();

    for (name, value) in payload.iter() {
        if name == "id" {
            if let Some(issue) = check_id(value, mode, path_id) {
                issues.push(issue);
            }
            continue;
        }

        let Some((_, spec)) = kind.field(name) else {
            issues.push(ValidationIssue::UnknownField {
                field: name.clone(),
            });
            continue;
        };

        match coerce(value, spec.field_type) {
            Some(typed) => {
                fields.set(name, typed);
            }
            None => issues.push(ValidationIssue::WrongType {
                field: name.clone(),
                expected: spec.field_type,
            }),
        }
    }

    if issues.is_empty() {
        Ok(fields)
    } else {
        Err(ValidationError::new(issues))
    }
}

fn check_id(value: &Value, mode: WriteMode, path_id: Option<EntityId>) -> Option<ValidationIssue> {
    match mode {
        WriteMode::Create => Some(ValidationIssue::IdOnCreate),
        WriteMode::Amend | WriteMode::Replace => {
            let found = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let expected = path_id.map(|id| id.to_string()).unwrap_or_default();
            (EntityId::parse(&found).map(|id| id.to_string()) != Some(expected.clone()))
                .then_some(ValidationIssue::IdMismatch { expected, found })
        }
    }
}

fn coerce(value: &Value, field_type: FieldType) -> Option<FieldValue> {
    match (field_type, value) {
        (FieldType::String, Value::String(s)) => Some(FieldValue::Text(s.clone())),
        (FieldType::Boolean, Value::Bool(b)) => Some(FieldValue::Flag(*b)),
        _ => None,
    }
}

/// What a sub-collection POST asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRequest {
    /// Link an existing record, named by the raw `id` member.
    Existing(String),
    /// Create a new target record from these fields and link it.
    Create(FieldSet),
}

impl LinkRequest {
    /// Interprets a link payload for the given target kind.
    ///
    /// A body carrying `id` links an existing record; any other members are
    /// ignored. Otherwise the body is validated as a create payload.
    pub fn from_payload(target: EntityKind, payload: &Payload) -> Result<Self, ValidationError> {
        match payload.id() {
            Some(id) => Ok(LinkRequest::Existing(id)),
            None => validate_fields(target, payload, WriteMode::Create, None).map(LinkRequest::Create),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        Payload::from_value(value).unwrap()
    }

    #[test]
    fn test_create_accepts_declared_fields() {
        let fields = validate_fields(
            EntityKind::Todo,
            &payload(json!({"title": "buy milk", "doneStatus": true})),
            WriteMode::Create,
            None,
        )
        .unwrap();

        assert_eq!(fields.get("title"), Some(&FieldValue::from("buy milk")));
        assert_eq!(fields.get("doneStatus"), Some(&FieldValue::Flag(true)));
        assert_eq!(fields.get("description"), None);
    }

    #[test]
    fn test_unknown_field_for_every_kind() {
        for kind in EntityKind::ALL {
            let err = validate_fields(
                kind,
                &payload(json!({"malformed": "x"})),
                WriteMode::Create,
                None,
            )
            .unwrap_err();
            assert_eq!(err.messages(), vec!["Could not find field: malformed"]);
        }
    }

    #[test]
    fn test_boolean_must_be_boolean() {
        let err = validate_fields(
            EntityKind::Project,
            &payload(json!({"active": "true"})),
            WriteMode::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(err.messages(), vec!["Failed Validation: active should be BOOLEAN"]);
    }

    #[test]
    fn test_string_must_be_string() {
        let err = validate_fields(
            EntityKind::Category,
            &payload(json!({"title": 42})),
            WriteMode::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(err.messages(), vec!["Failed Validation: title should be STRING"]);
    }

    #[test]
    fn test_id_rejected_on_create() {
        let err = validate_fields(
            EntityKind::Category,
            &payload(json!({"title": "x", "id": "100"})),
            WriteMode::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::IdOnCreate]);
    }

    #[test]
    fn test_id_on_amend_must_match_path() {
        let path = Some(EntityId::new(2));
        assert!(
            validate_fields(
                EntityKind::Todo,
                &payload(json!({"id": "2", "title": "x"})),
                WriteMode::Amend,
                path,
            )
            .is_ok()
        );

        let err = validate_fields(
            EntityKind::Todo,
            &payload(json!({"id": "3"})),
            WriteMode::Replace,
            path,
        )
        .unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Failed Validation: Can not amend id from 2 to 3"]
        );
    }

    #[test]
    fn test_collects_every_issue() {
        let err = validate_fields(
            EntityKind::Todo,
            &payload(json!({"id": "1", "doneStatus": "no", "colour": "red"})),
            WriteMode::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(err.issues().len(), 3);
    }

    #[test]
    fn test_issues_in_key_order() {
        let err = validate_fields(
            EntityKind::Category,
            &payload(json!({"zeta": 1, "alpha": 2})),
            WriteMode::Create,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Could not find field: alpha", "Could not find field: zeta"]
        );
    }

    #[test]
    fn test_link_request() {
        let request =
            LinkRequest::from_payload(EntityKind::Category, &payload(json!({"id": "1"}))).unwrap();
        assert_eq!(request, LinkRequest::Existing("1".to_string()));

        let request =
            LinkRequest::from_payload(EntityKind::Category, &payload(json!({"title": "Home"})))
                .unwrap();
        assert!(matches!(request, LinkRequest::Create(_)));

        assert!(
            LinkRequest::from_payload(EntityKind::Category, &payload(json!({"active": true})))
                .is_err()
        );
    }
}
