use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Corrupt state in {location}: {reason}")]
    CorruptState { location: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl RolodexError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RolodexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = RolodexError::validation("phone", "must be exactly 12 digits");
        assert_eq!(err.to_string(), "Invalid phone: must be exactly 12 digits");
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = RolodexError::not_found("Task", 7);
        assert_eq!(err.to_string(), "Task not found: 7");
    }
}
