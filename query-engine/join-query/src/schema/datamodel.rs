use super::{EntityId, EntitySchema, SchemaGraph};
use crate::JoinQueryError;
use indexmap::IndexMap;
use serde::Deserialize;

/// An in-memory schema graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datamodel {
    entities: IndexMap<EntityId, EntitySchema>,
}

impl Datamodel {
    pub fn new(entities: impl IntoIterator<Item = EntitySchema>) -> Self {
        let entities = entities.into_iter().map(|e| (e.id.clone(), e)).collect();

        Self { entities }
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntitySchema> {
        self.entities.values()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Every association must point at a declared entity.
    pub fn validate(&self) -> crate::Result<()> {
        for entity in self.entities.values() {
            for association in entity.associations.iter() {
                if !self.contains(&association.target) {
                    return Err(JoinQueryError::datamodel(format!(
                        "Association `{}.{}` points at the unknown entity `{}`.",
                        entity.id, association.name, association.target
                    )));
                }
            }
        }

        Ok(())
    }
}

impl SchemaGraph for Datamodel {
    fn entity(&self, id: &EntityId) -> Option<&EntitySchema> {
        self.entities.get(id)
    }
}

/// Serialized form of an entity: `{ "associations": { "team": { "target": "teams" } } }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EntityDocument {
    #[serde(default)]
    associations: IndexMap<String, AssociationDocument>,
}

#[derive(Debug, Deserialize)]
struct AssociationDocument {
    target: EntityId,
}

impl EntityDocument {
    pub(crate) fn into_schema(self, id: EntityId) -> EntitySchema {
        self.associations
            .into_iter()
            .fold(EntitySchema::new(id), |schema, (name, association)| {
                schema.with_association(name, association.target)
            })
    }
}
