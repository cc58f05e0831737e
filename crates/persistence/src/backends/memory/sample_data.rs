//! Records the service starts with.

use crate::types::{EntityKind, FieldSet, Relation};

use super::StoreState;

const TODOS: [&str; 2] = ["scan paperwork", "file paperwork"];
const PROJECTS: [&str; 1] = ["Office Work"];
const CATEGORIES: [&str; 2] = ["Office", "Home"];

pub(crate) fn seed(state: &mut StoreState) {
    let todos: Vec<_> = TODOS
        .iter()
        .map(|title| state.insert(FieldSet::empty(EntityKind::Todo).with("title", *title)))
        .collect();
    let projects: Vec<_> = PROJECTS
        .iter()
        .map(|title| state.insert(FieldSet::empty(EntityKind::Project).with("title", *title)))
        .collect();
    let categories: Vec<_> = CATEGORIES
        .iter()
        .map(|title| state.insert(FieldSet::empty(EntityKind::Category).with("title", *title)))
        .collect();

    state.link(Relation::TodoCategories, todos[0], categories[0]);
    state.link(Relation::TodoTasksOf, todos[0], projects[0]);
    state.link(Relation::TodoTasksOf, todos[1], projects[0]);

    tracing::debug!(
        todos = todos.len(),
        projects = projects.len(),
        categories = categories.len(),
        edges = state.edges.len(),
        "Seeded sample data"
    );
}
