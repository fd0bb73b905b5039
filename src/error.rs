use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid settings value for `{key}`: expected {expected}, got {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    pub(crate) fn invalid(key: &str, expected: &'static str, found: impl ToString) -> Self {
        ProfileError::InvalidValue {
            key: key.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
