use crate::UserFacingError;
use serde::Serialize;

/// A query argument the client sent cannot be interpreted.
#[derive(Debug, Serialize)]
pub struct InvalidQueryArgument {
    /// The offending query key, e.g. `$groupBy`.
    pub argument: String,

    /// Why the value was rejected.
    pub reason: String,
}

impl UserFacingError for InvalidQueryArgument {
    const ERROR_CODE: &'static str = "BadRequest";
    const STATUS_CODE: u16 = 400;

    fn message(&self) -> String {
        self.reason.clone()
    }
}

/// An association exists in the schema graph, but no registered service owns its target.
#[derive(Debug, Serialize)]
pub struct AssociatedServiceNotFound {
    /// Name of the association as declared on the source entity.
    pub association: String,

    /// Entity the association points to.
    pub target: String,
}

impl UserFacingError for AssociatedServiceNotFound {
    const ERROR_CODE: &'static str = "GeneralError";
    const STATUS_CODE: u16 = 500;

    fn message(&self) -> String {
        format!("Associated service not found for {}", self.association)
    }
}

/// The hook was invoked for a service path that is not registered.
#[derive(Debug, Serialize)]
pub struct ServiceNotRegistered {
    pub path: String,
}

impl UserFacingError for ServiceNotRegistered {
    const ERROR_CODE: &'static str = "GeneralError";
    const STATUS_CODE: u16 = 500;

    fn message(&self) -> String {
        format!("No service is registered at `{}`", self.path)
    }
}

/// The datamodel handed to the engine is inconsistent.
#[derive(Debug, Serialize)]
pub struct InvalidDatamodel {
    pub explanation: String,
}

impl UserFacingError for InvalidDatamodel {
    const ERROR_CODE: &'static str = "GeneralError";
    const STATUS_CODE: u16 = 500;

    fn message(&self) -> String {
        format!("Error in data model: {}", self.explanation)
    }
}
