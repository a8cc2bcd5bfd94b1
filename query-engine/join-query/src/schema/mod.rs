//! The relational layer's schema graph as seen by the rewriter: entities and the
//! named associations between them. The rewriter only ever looks names up.

mod application;
mod datamodel;
mod services;

pub use application::*;
pub use datamodel::*;
pub use services::*;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an entity schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Alias the association is declared under on the source entity.
    pub name: String,

    /// Entity on the other side of the association.
    pub target: EntityId,
}

/// Associations of one entity, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Associations(IndexMap<String, Association>);

impl Associations {
    pub fn get(&self, name: &str) -> Option<&Association> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Association> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, association: Association) {
        self.0.insert(association.name.clone(), association);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub id: EntityId,
    pub associations: Associations,
}

impl EntitySchema {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            associations: Associations::default(),
        }
    }

    /// Declares an association named `name` pointing at `target`.
    pub fn with_association(mut self, name: impl Into<String>, target: impl Into<EntityId>) -> Self {
        self.associations.insert(Association {
            name: name.into(),
            target: target.into(),
        });

        self
    }
}

/// Read-only access to the schema graph.
pub trait SchemaGraph {
    fn entity(&self, id: &EntityId) -> Option<&EntitySchema>;

    /// The association `name` declared on `entity`, if both exist.
    fn association(&self, entity: &EntityId, name: &str) -> Option<&Association> {
        self.entity(entity).and_then(|schema| schema.associations.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn associations_are_looked_up_by_name() {
        let users = EntitySchema::new("users")
            .with_association("team", "teams")
            .with_association("todos", "todos");
        let datamodel = Datamodel::new(vec![users, EntitySchema::new("teams"), EntitySchema::new("todos")]);

        let team = datamodel.association(&EntityId::from("users"), "team").unwrap();
        assert_eq!(team.target, EntityId::from("teams"));

        assert!(datamodel.association(&EntityId::from("users"), "name").is_none());
        assert!(datamodel.association(&EntityId::from("missing"), "team").is_none());
    }

    #[test]
    fn associations_keep_declaration_order() {
        let users = EntitySchema::new("users")
            .with_association("team", "teams")
            .with_association("manager", "users")
            .with_association("todos", "todos");

        let names: Vec<_> = users.associations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["team", "manager", "todos"]);
    }
}
