use crate::types::DepositionId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound {
        entity: &'static str,
        id: DepositionId,
    },

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        /// Underlying cause (e.g. the I/O error for an unreadable path).
        detail: Option<String>,
    },
}

impl CoreError {
    pub fn deposition_not_found(id: DepositionId) -> Self {
        CoreError::NotFound {
            entity: "Deposition",
            id,
        }
    }
}
