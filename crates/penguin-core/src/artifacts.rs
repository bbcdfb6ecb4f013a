//! Locating and loading the four fitted artifacts.
//!
//! All four files must be present before any of them is parsed; a missing
//! file aborts loading with [`ArtifactError::MissingArtifact`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::classifier::ClassifierModel;
use crate::encoding::LabelEncoder;
use crate::error::ArtifactError;
use crate::scaling::StandardScaler;

/// The four artifacts produced by the offline training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Classifier,
    Scaler,
    SpeciesEncoder,
    SexEncoder,
}

impl ArtifactKind {
    pub const ALL: [Self; 4] = [
        Self::Classifier,
        Self::Scaler,
        Self::SpeciesEncoder,
        Self::SexEncoder,
    ];

    /// File name inside the artifact directory.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Classifier => "penguin_classifier_model.json",
            Self::Scaler => "penguin_scaler.json",
            Self::SpeciesEncoder => "penguin_le_species.json",
            Self::SexEncoder => "penguin_le_sex.json",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Scaler => "scaler",
            Self::SpeciesEncoder => "species encoder",
            Self::SexEncoder => "sex encoder",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Paths of the four artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub scaler: PathBuf,
    pub species_encoder: PathBuf,
    pub sex_encoder: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(ArtifactKind::Classifier.file_name()),
            scaler: dir.join(ArtifactKind::Scaler.file_name()),
            species_encoder: dir.join(ArtifactKind::SpeciesEncoder.file_name()),
            sex_encoder: dir.join(ArtifactKind::SexEncoder.file_name()),
        }
    }

    pub fn path(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Classifier => &self.classifier,
            ArtifactKind::Scaler => &self.scaler,
            ArtifactKind::SpeciesEncoder => &self.species_encoder,
            ArtifactKind::SexEncoder => &self.sex_encoder,
        }
    }

    /// Fail on the first artifact (in [`ArtifactKind::ALL`] order) that
    /// does not exist as a file.
    pub fn check_present(&self) -> Result<(), ArtifactError> {
        for kind in ArtifactKind::ALL {
            let path = self.path(kind);
            if !path.is_file() {
                return Err(ArtifactError::MissingArtifact {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// The parsed, not yet cross-checked artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub classifier: ClassifierModel,
    pub scaler: StandardScaler,
    pub species_encoder: LabelEncoder,
    pub sex_encoder: LabelEncoder,
}

impl Artifacts {
    /// Check presence of all four files, then parse each.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        paths.check_present()?;

        let artifacts = Self {
            classifier: read_json(ArtifactKind::Classifier, &paths.classifier)?,
            scaler: read_json(ArtifactKind::Scaler, &paths.scaler)?,
            species_encoder: read_json(ArtifactKind::SpeciesEncoder, &paths.species_encoder)?,
            sex_encoder: read_json(ArtifactKind::SexEncoder, &paths.sex_encoder)?,
        };
        tracing::debug!(
            species = artifacts.species_encoder.len(),
            sexes = artifacts.sex_encoder.len(),
            "artifacts parsed"
        );
        Ok(artifacts)
    }
}

fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::MissingArtifact {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                kind,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::MalformedArtifact {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
