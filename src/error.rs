use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Store operation failed: {message}")]
    Store { message: String },

    #[error("Database connection failed: {message}")]
    Connection { message: String },

    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid date '{0}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Machine-readable code exposed under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Store { .. } => "STORE_FAILURE",
            ApiError::Connection { .. } => "CONNECTION_FAILURE",
            ApiError::InvalidPattern { .. } | ApiError::InvalidDate(_) => "BAD_USER_INPUT",
            ApiError::Config(_) | ApiError::Toml(_) => "INTERNAL",
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(e: mongodb::error::Error) -> Self {
        ApiError::Store {
            message: e.to_string(),
        }
    }
}

impl From<mongodb::bson::ser::Error> for ApiError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        ApiError::Store {
            message: format!("Failed to encode document: {e}"),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let ApiError::NotFound { id, .. } = self {
                e.set("id", id.as_str());
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = ApiError::not_found("Band", "abc");
        assert_eq!(err.to_string(), "Band not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn graphql_error_carries_code_extension() {
        let err = ApiError::Connection {
            message: "refused".to_string(),
        }
        .extend();
        assert_eq!(err.message, "Database connection failed: refused");
        assert!(err.extensions.is_some());
    }
}
