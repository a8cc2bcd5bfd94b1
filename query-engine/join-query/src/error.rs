use crate::schema::EntityId;
use thiserror::Error;
use user_facing_errors::{KnownError, common};

#[derive(Debug, Error)]
pub enum JoinQueryError {
    /// The client sent a query argument that cannot be interpreted.
    #[error("{}", reason)]
    InvalidArgument { argument: String, reason: String },

    /// The schema graph knows the association, the service directory does not know its target.
    #[error("Associated service not found for {}", association)]
    AssociatedServiceNotFound { association: String, target: EntityId },

    #[error("No service is registered at `{}`", _0)]
    UnknownService(String),

    #[error("Error in data model: {}", _0)]
    Datamodel(String),
}

impl JoinQueryError {
    pub fn invalid_argument(argument: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn associated_service_not_found(association: impl ToString, target: &EntityId) -> Self {
        Self::AssociatedServiceNotFound {
            association: association.to_string(),
            target: target.clone(),
        }
    }

    pub fn unknown_service(path: impl ToString) -> Self {
        Self::UnknownService(path.to_string())
    }

    pub fn datamodel(explanation: impl ToString) -> Self {
        Self::Datamodel(explanation.to_string())
    }

    /// Errors caused by the request itself, as opposed to an inconsistent setup.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn into_user_facing_error(self) -> user_facing_errors::Error {
        let known = match self {
            Self::InvalidArgument { argument, reason } => {
                KnownError::new(common::InvalidQueryArgument { argument, reason })
            }
            Self::AssociatedServiceNotFound { association, target } => {
                KnownError::new(common::AssociatedServiceNotFound {
                    association,
                    target: target.into_string(),
                })
            }
            Self::UnknownService(path) => KnownError::new(common::ServiceNotRegistered { path }),
            Self::Datamodel(explanation) => KnownError::new(common::InvalidDatamodel { explanation }),
        };

        known.into()
    }
}

impl From<JoinQueryError> for user_facing_errors::Error {
    fn from(err: JoinQueryError) -> Self {
        err.into_user_facing_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn configuration_errors_are_not_client_errors() {
        let err = JoinQueryError::associated_service_not_found("team", &EntityId::from("teams"));

        assert!(!err.is_client_error());
        expect!["Associated service not found for team"].assert_eq(&err.to_string());
    }

    #[test]
    fn invalid_arguments_render_as_bad_request() {
        let err = JoinQueryError::invalid_argument("$groupBy", "$groupBy must be a string");
        assert!(err.is_client_error());

        let user_facing = err.into_user_facing_error();
        let known = user_facing.as_known().unwrap();

        assert_eq!(known.error_code, "BadRequest");
        assert_eq!(user_facing.status_code(), 400);
        expect!["$groupBy must be a string"].assert_eq(&known.message);
    }
}
