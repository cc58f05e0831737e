//! Request bodies used across the REST tests.

use serde_json::{Value, json};

/// Every entity collection with a valid create body.
pub fn creatable() -> Vec<(&'static str, Value)> {
    vec![
        ("todos", todo("write tests")),
        ("projects", project("ECSE 429 project")),
        ("categories", category("ECSE 429")),
    ]
}

/// A todo create body.
pub fn todo(title: &str) -> Value {
    json!({ "title": title })
}

/// A fully specified todo.
pub fn full_todo(title: &str, done: bool, description: &str) -> Value {
    json!({
        "title": title,
        "doneStatus": done,
        "description": description
    })
}

/// A project create body.
pub fn project(title: &str) -> Value {
    json!({ "title": title })
}

/// A category create body.
pub fn category(title: &str) -> Value {
    json!({ "title": title })
}

/// A link body naming an existing record.
pub fn link_to(id: &str) -> Value {
    json!({ "id": id })
}

/// An XML document, which the service does not accept.
pub const XML_TODO: &str = "<todo><title>scan paperwork</title></todo>";
