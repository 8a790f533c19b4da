use uuid::Uuid;

/// Domain error taxonomy shared by the persistence and HTTP layers.
///
/// Every HTTP-addressable entity has a UUID primary key, so [`CoreError::NotFound`]
/// carries the UUID that missed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
