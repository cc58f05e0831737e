//! Relationship declarations.
//!
//! There are three undirected edge sets. Each is reachable from both of its
//! endpoint kinds under a route name, which gives six [`Relation`]s:
//!
//! | Edge set | From the left | From the right |
//! |----------|---------------|----------------|
//! | Todo-Category | `todos/:id/categories` | `categories/:id/todos` |
//! | Todo-Project | `todos/:id/tasksof` | `projects/:id/tasks` |
//! | Project-Category | `projects/:id/categories` | `categories/:id/projects` |

use std::fmt;

use super::entity::{EntityId, EntityKind};

/// An undirected set of edges between two entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeSet {
    /// Todo-Category.
    TodoCategory,
    /// Todo-Project (a todo is a task of a project).
    TodoProject,
    /// Project-Category.
    ProjectCategory,
}

impl EdgeSet {
    /// All edge sets.
    pub const ALL: [EdgeSet; 3] = [
        EdgeSet::TodoCategory,
        EdgeSet::TodoProject,
        EdgeSet::ProjectCategory,
    ];

    /// The kinds joined by this edge set, as `(left, right)`.
    pub fn endpoints(&self) -> (EntityKind, EntityKind) {
        match self {
            EdgeSet::TodoCategory => (EntityKind::Todo, EntityKind::Category),
            EdgeSet::TodoProject => (EntityKind::Todo, EntityKind::Project),
            EdgeSet::ProjectCategory => (EntityKind::Project, EntityKind::Category),
        }
    }

    /// Whether this edge set touches the given kind.
    pub fn touches(&self, kind: EntityKind) -> bool {
        let (left, right) = self.endpoints();
        left == kind || right == kind
    }
}

/// A relationship as seen from one endpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `todos/:id/categories`
    TodoCategories,
    /// `todos/:id/tasksof`
    TodoTasksOf,
    /// `projects/:id/tasks`
    ProjectTasks,
    /// `projects/:id/categories`
    ProjectCategories,
    /// `categories/:id/todos`
    CategoryTodos,
    /// `categories/:id/projects`
    CategoryProjects,
}

impl Relation {
    /// All relations.
    pub const ALL: [Relation; 6] = [
        Relation::TodoCategories,
        Relation::TodoTasksOf,
        Relation::ProjectTasks,
        Relation::ProjectCategories,
        Relation::CategoryTodos,
        Relation::CategoryProjects,
    ];

    /// Resolves a relation from its source kind and route segment.
    pub fn resolve(source: EntityKind, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.source() == source && relation.name() == name)
    }

    /// Relations whose source is the given kind, in wire order.
    pub fn from_source(source: EntityKind) -> impl Iterator<Item = Relation> {
        Self::ALL
            .into_iter()
            .filter(move |relation| relation.source() == source)
    }

    /// The route segment naming this relation.
    pub fn name(&self) -> &'static str {
        match self {
            Relation::TodoCategories | Relation::ProjectCategories => "categories",
            Relation::TodoTasksOf => "tasksof",
            Relation::ProjectTasks => "tasks",
            Relation::CategoryTodos => "todos",
            Relation::CategoryProjects => "projects",
        }
    }

    /// The kind on the path side of the relation.
    pub fn source(&self) -> EntityKind {
        match self {
            Relation::TodoCategories | Relation::TodoTasksOf => EntityKind::Todo,
            Relation::ProjectTasks | Relation::ProjectCategories => EntityKind::Project,
            Relation::CategoryTodos | Relation::CategoryProjects => EntityKind::Category,
        }
    }

    /// The kind listed under the relation.
    pub fn target(&self) -> EntityKind {
        match self {
            Relation::TodoCategories | Relation::ProjectCategories => EntityKind::Category,
            Relation::TodoTasksOf | Relation::CategoryProjects => EntityKind::Project,
            Relation::ProjectTasks | Relation::CategoryTodos => EntityKind::Todo,
        }
    }

    /// The edge set this relation reads and writes.
    pub fn edge_set(&self) -> EdgeSet {
        match self {
            Relation::TodoCategories | Relation::CategoryTodos => EdgeSet::TodoCategory,
            Relation::TodoTasksOf | Relation::ProjectTasks => EdgeSet::TodoProject,
            Relation::ProjectCategories | Relation::CategoryProjects => EdgeSet::ProjectCategory,
        }
    }

    /// Orders a `(source, target)` pair as `(left, right)` for the edge set.
    pub fn orient(&self, source: EntityId, target: EntityId) -> (EntityId, EntityId) {
        let (left, _) = self.edge_set().endpoints();
        if self.source() == left {
            (source, target)
        } else {
            (target, source)
        }
    }

    /// The path of the sub-collection for a given source id.
    pub fn path(&self, source: EntityId) -> String {
        format!("{}/{}/{}", self.source().plural(), source, self.name())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source().plural(), self.name())
    }
}
