use super::EntityId;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A registered service and the entity schema it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    path: String,
    schema: EntityId,
}

impl Service {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> &EntityId {
        &self.schema
    }
}

/// Lookup of registered services, by path and by the schema they own.
pub trait ServiceDirectory {
    fn service(&self, path: &str) -> Option<&Service>;

    /// The service owning `schema`. With several candidates, the first registered wins.
    fn service_for(&self, schema: &EntityId) -> Option<&Service>;
}

#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: IndexMap<String, Service>,
    by_schema: HashMap<EntityId, String>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service at `path`, replacing a previous registration at the same path.
    pub fn register(&mut self, path: &str, schema: impl Into<EntityId>) -> &Service {
        let path = normalize_path(path).to_owned();
        let schema = schema.into();

        let service = Service {
            path: path.clone(),
            schema: schema.clone(),
        };

        if self.services.insert(path.clone(), service).is_some() {
            self.reindex();
        } else {
            self.by_schema.entry(schema).or_insert_with(|| path.clone());
        }

        &self.services[&path]
    }

    fn reindex(&mut self) {
        self.by_schema.clear();

        for (path, service) in &self.services {
            self.by_schema
                .entry(service.schema.clone())
                .or_insert_with(|| path.clone());
        }
    }

    pub fn with_service(mut self, path: &str, schema: impl Into<EntityId>) -> Self {
        self.register(path, schema);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Service)> {
        self.services.iter().map(|(path, service)| (path.as_str(), service))
    }
}

impl ServiceDirectory for ServiceRegistry {
    fn service(&self, path: &str) -> Option<&Service> {
        self.services.get(normalize_path(path))
    }

    fn service_for(&self, schema: &EntityId) -> Option<&Service> {
        self.by_schema.get(schema).and_then(|path| self.services.get(path))
    }
}

/// Service paths are registered and looked up without surrounding slashes.
fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}
