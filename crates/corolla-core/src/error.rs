pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Hierarchy JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hierarchy YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config ({path}): {message}")]
    InvalidConfig { path: String, message: String },
}
