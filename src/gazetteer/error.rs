use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("Failed to read gazetteer file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse gazetteer data")]
    Parse(#[from] serde_json::Error),
}
