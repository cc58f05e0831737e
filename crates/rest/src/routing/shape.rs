//! Route shapes and the per-shape method table.
//!
//! Every entity route has one of four shapes. The shape alone decides which
//! methods are served, which are answered with 405 and which with 404:
//!
//! | Shape | GET / HEAD | POST | PUT | DELETE | other |
//! |-------|------------|------|-----|--------|-------|
//! | `/{entity}` | list | create | 405 | 405 | 405 |
//! | `/{entity}/{id}` | read | amend | replace | delete | 405 |
//! | `/{entity}/{id}/{relation}` | list related | link | 405 | 405 | 405 |
//! | `/{entity}/{id}/{relation}/{id}` | 404 | 404 | 405 | unlink | 405 |

use axum::http::Method;
use todo_persistence::types::{EntityKind, Relation};

/// A resolved entity route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteShape {
    /// `/todos`
    Collection {
        /// Entity kind named by the path.
        kind: EntityKind,
    },
    /// `/todos/{id}`
    Item {
        /// Entity kind named by the path.
        kind: EntityKind,
        /// Raw id segment.
        id: String,
    },
    /// `/todos/{id}/categories`
    SubCollection {
        /// Relation named by the path.
        relation: Relation,
        /// Raw id segment of the source record.
        id: String,
    },
    /// `/todos/{id}/categories/{target_id}`
    RelationshipItem {
        /// Relation named by the path.
        relation: Relation,
        /// Raw id segment of the source record.
        id: String,
        /// Raw id segment of the target record.
        target_id: String,
    },
}

/// A store operation selected by shape and method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// List every record of a kind.
    List,
    /// Create a record.
    Create,
    /// Read one record.
    Read,
    /// Merge fields onto a record.
    Amend,
    /// Overwrite a record, resetting omitted fields.
    Replace,
    /// Delete a record and its edges.
    Delete,
    /// List the records linked through a relation.
    ListRelated,
    /// Link an existing record, or create and link a new one.
    Link,
    /// Remove an edge.
    Unlink,
}

/// Outcome of looking a method up in the shape's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Serve the request with this interaction.
    Allowed(Interaction),
    /// The path addresses nothing for this method (404).
    NotFound,
    /// The shape does not support the method (405).
    MethodNotAllowed,
}

impl RouteShape {
    /// `/{entity}`
    pub fn collection(entity: &str) -> Option<Self> {
        let kind = EntityKind::from_plural(entity)?;
        Some(RouteShape::Collection { kind })
    }

    /// `/{entity}/{id}`
    pub fn item(entity: &str, id: &str) -> Option<Self> {
        let kind = EntityKind::from_plural(entity)?;
        Some(RouteShape::Item {
            kind,
            id: id.to_string(),
        })
    }

    /// `/{entity}/{id}/{relation}`
    pub fn sub_collection(entity: &str, id: &str, relation: &str) -> Option<Self> {
        let relation = Relation::resolve(EntityKind::from_plural(entity)?, relation)?;
        Some(RouteShape::SubCollection {
            relation,
            id: id.to_string(),
        })
    }

    /// `/{entity}/{id}/{relation}/{target_id}`
    pub fn relationship_item(
        entity: &str,
        id: &str,
        relation: &str,
        target_id: &str,
    ) -> Option<Self> {
        let relation = Relation::resolve(EntityKind::from_plural(entity)?, relation)?;
        Some(RouteShape::RelationshipItem {
            relation,
            id: id.to_string(),
            target_id: target_id.to_string(),
        })
    }

    /// Looks the method up in this shape's table.
    pub fn disposition(&self, method: &Method) -> Disposition {
        use Disposition::{Allowed, MethodNotAllowed, NotFound};

        match (self, Verb::of(method)) {
            (RouteShape::Collection { .. }, Verb::Get | Verb::Head) => Allowed(Interaction::List),
            (RouteShape::Collection { .. }, Verb::Post) => Allowed(Interaction::Create),

            (RouteShape::Item { .. }, Verb::Get | Verb::Head) => Allowed(Interaction::Read),
            (RouteShape::Item { .. }, Verb::Post) => Allowed(Interaction::Amend),
            (RouteShape::Item { .. }, Verb::Put) => Allowed(Interaction::Replace),
            (RouteShape::Item { .. }, Verb::Delete) => Allowed(Interaction::Delete),

            (RouteShape::SubCollection { .. }, Verb::Get | Verb::Head) => {
                Allowed(Interaction::ListRelated)
            }
            (RouteShape::SubCollection { .. }, Verb::Post) => Allowed(Interaction::Link),

            (RouteShape::RelationshipItem { .. }, Verb::Get | Verb::Head | Verb::Post) => NotFound,
            (RouteShape::RelationshipItem { .. }, Verb::Delete) => Allowed(Interaction::Unlink),

            _ => MethodNotAllowed,
        }
    }

    /// Methods this shape serves, for the `Allow` header.
    pub fn allowed_methods(&self) -> Vec<Method> {
        [
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ]
        .into_iter()
        .filter(|method| matches!(self.disposition(method), Disposition::Allowed(_)))
        .collect()
    }

    /// The request path this shape was resolved from.
    pub fn path(&self) -> String {
        match self {
            RouteShape::Collection { kind } => format!("/{}", kind),
            RouteShape::Item { kind, id } => format!("/{}/{}", kind, id),
            RouteShape::SubCollection { relation, id } => {
                format!("/{}/{}/{}", relation.source(), id, relation.name())
            }
            RouteShape::RelationshipItem {
                relation,
                id,
                target_id,
            } => format!(
                "/{}/{}/{}/{}",
                relation.source(),
                id,
                relation.name(),
                target_id
            ),
        }
    }
}

/// Methods the table distinguishes; everything else is `Other`.
#[derive(Clone, Copy)]
enum Verb {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Other,
}

impl Verb {
    fn of(method: &Method) -> Self {
        if *method == Method::GET {
            Verb::Get
        } else if *method == Method::HEAD {
            Verb::Head
        } else if *method == Method::POST {
            Verb::Post
        } else if *method == Method::PUT {
            Verb::Put
        } else if *method == Method::DELETE {
            Verb::Delete
        } else {
            Verb::Other
        }
    }
}
