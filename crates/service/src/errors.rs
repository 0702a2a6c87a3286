use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Errors caused by the request rather than by the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_) | Self::UnknownColor(_))
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_backend_errors_are_distinct() {
        assert!(ServiceError::UnknownColor("green".into()).is_client_error());
        assert!(ServiceError::Validation("comma".into()).is_client_error());
        assert!(ServiceError::not_found("person").is_client_error());
        assert!(!ServiceError::Storage("disk full".into()).is_client_error());
        assert!(!ServiceError::Db("gone".into()).is_client_error());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(ServiceError::from(io), ServiceError::Storage(_)));
    }
}
