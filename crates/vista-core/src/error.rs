use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("no element matches `{selector}`")]
    MissingElement { selector: String },

    #[error("filter `{filter}` has no matching grid")]
    InvalidFilterTarget { filter: String },

    #[error("invalid stage config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid stage config: `{field}` {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

impl StageError {
    pub fn missing(selector: impl Into<String>) -> Self {
        StageError::MissingElement {
            selector: selector.into(),
        }
    }
}
