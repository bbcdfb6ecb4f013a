use std::path::PathBuf;

use crate::artifacts::ArtifactKind;

/// Failures while locating, parsing or cross-checking the fitted artifacts.
///
/// Every variant is fatal at startup: the application never runs with a
/// partial set of model components.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("missing {kind} artifact: {}", path.display())]
    MissingArtifact { kind: ArtifactKind, path: PathBuf },

    #[error("failed to read {kind} artifact {}: {source}", path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed {kind} artifact {}: {source}", path.display())]
    MalformedArtifact {
        kind: ArtifactKind,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("inconsistent artifacts: {0}")]
    InconsistentArtifacts(String),
}

/// Failures on the request path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("unknown category {value:?}, expected one of {known:?}")]
    UnknownCategory { value: String, known: Vec<String> },

    #[error("invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error("class code {0} has no label in the species encoder")]
    UnknownClassCode(usize),
}
