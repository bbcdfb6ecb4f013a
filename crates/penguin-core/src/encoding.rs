//! Fitted label encoders (category label ⇄ integer code).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PredictError};

/// A fitted bidirectional mapping between category labels and integer codes.
///
/// The code of a class is its position in [`classes`](Self::classes). The
/// class order is fixed by the offline fit and is what the UI shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder from its fitted classes.
    ///
    /// Rejects an empty class list and duplicate labels, either of which
    /// would make the mapping non-bijective.
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::InconsistentArtifacts(
                "label encoder has no classes".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(ArtifactError::InconsistentArtifacts(format!(
                    "label encoder lists class {class:?} more than once"
                )));
            }
        }
        Ok(())
    }

    /// The fitted classes, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of fitted classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Forward lookup: label → code.
    pub fn transform(&self, label: &str) -> Result<usize, PredictError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| PredictError::UnknownCategory {
                value: label.to_string(),
                known: self.classes.clone(),
            })
    }

    /// Inverse lookup: code → label.
    pub fn inverse_transform(&self, code: usize) -> Result<&str, PredictError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(PredictError::UnknownClassCode(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sex_encoder() -> LabelEncoder {
        LabelEncoder::new(vec!["FEMALE".into(), "MALE".into()]).unwrap()
    }

    #[test]
    fn test_transform_uses_class_position() {
        let enc = sex_encoder();
        assert_eq!(enc.transform("FEMALE"), Ok(0));
        assert_eq!(enc.transform("MALE"), Ok(1));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let enc = sex_encoder();
        let err = enc.transform("female").unwrap_err();
        assert_eq!(
            err,
            PredictError::UnknownCategory {
                value: "female".into(),
                known: vec!["FEMALE".into(), "MALE".into()],
            }
        );
    }

    #[test]
    fn test_inverse_transform_out_of_range() {
        let enc = sex_encoder();
        assert_eq!(enc.inverse_transform(1), Ok("MALE"));
        assert_eq!(enc.inverse_transform(2), Err(PredictError::UnknownClassCode(2)));
    }

    #[test]
    fn test_duplicate_and_empty_classes_rejected() {
        assert!(LabelEncoder::new(Vec::new()).is_err());
        assert!(LabelEncoder::new(vec!["A".into(), "A".into()]).is_err());
    }

    #[test]
    fn test_deserializes_from_classes_object() {
        let enc: LabelEncoder =
            serde_json::from_str(r#"{"classes": ["Adelie", "Chinstrap", "Gentoo"]}"#).unwrap();
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.classes()[2], "Gentoo");
    }
}
