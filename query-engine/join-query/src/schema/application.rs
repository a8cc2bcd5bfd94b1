use super::{Datamodel, EntityDocument, EntityId, EntitySchema, SchemaGraph, Service, ServiceDirectory, ServiceRegistry};
use crate::{
    JoinQueryError,
    hooks::{GroupBy, JoinQuery},
};
use indexmap::IndexMap;
use serde::Deserialize;

/// The schema graph together with the services registered on top of it.
#[derive(Debug, Clone, Default)]
pub struct Application {
    pub datamodel: Datamodel,
    pub services: ServiceRegistry,
}

impl Application {
    pub fn new(datamodel: Datamodel, services: ServiceRegistry) -> Self {
        Self { datamodel, services }
    }

    /// Parses and validates an application document:
    ///
    /// ```json
    /// {
    ///   "entities": { "users": { "associations": { "team": { "target": "teams" } } }, "teams": {} },
    ///   "services": { "users": "users", "teams": "teams" }
    /// }
    /// ```
    pub fn from_json(document: &str) -> crate::Result<Self> {
        let document: ApplicationDocument =
            serde_json::from_str(document).map_err(|err| JoinQueryError::datamodel(format!("Invalid document: {err}")))?;

        let app = document.into_application();
        app.validate()?;

        Ok(app)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.datamodel.validate()?;

        for (path, service) in self.services.iter() {
            if !self.datamodel.contains(service.schema()) {
                return Err(JoinQueryError::datamodel(format!(
                    "Service `{}` serves the unknown entity `{}`.",
                    path,
                    service.schema()
                )));
            }
        }

        Ok(())
    }

    pub fn join_query(&self) -> JoinQuery<'_, Datamodel, ServiceRegistry> {
        JoinQuery::new(&self.datamodel, &self.services)
    }

    pub fn group_by(&self) -> GroupBy {
        GroupBy
    }
}

impl SchemaGraph for Application {
    fn entity(&self, id: &EntityId) -> Option<&EntitySchema> {
        self.datamodel.entity(id)
    }
}

impl ServiceDirectory for Application {
    fn service(&self, path: &str) -> Option<&Service> {
        self.services.service(path)
    }

    fn service_for(&self, schema: &EntityId) -> Option<&Service> {
        self.services.service_for(schema)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicationDocument {
    #[serde(default)]
    entities: IndexMap<EntityId, Option<EntityDocument>>,
    #[serde(default)]
    services: IndexMap<String, EntityId>,
}

impl ApplicationDocument {
    fn into_application(self) -> Application {
        let datamodel = Datamodel::new(
            self.entities
                .into_iter()
                .map(|(id, entity)| entity.unwrap_or_default().into_schema(id)),
        );

        let services = self
            .services
            .into_iter()
            .fold(ServiceRegistry::new(), |registry, (path, schema)| {
                registry.with_service(&path, schema)
            });

        Application::new(datamodel, services)
    }
}
