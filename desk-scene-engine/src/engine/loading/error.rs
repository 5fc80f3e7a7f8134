use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to load {path}: {reason}")]
    Asset { path: String, reason: String },

    #[error("failed to load a dependency of {path}: {reason}")]
    Dependency { path: String, reason: String },

    #[error("{path} contains no scene")]
    MissingScene { path: String },
}
