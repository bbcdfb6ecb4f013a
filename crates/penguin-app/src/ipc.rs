//! IPC message contracts between the backend and the browser form.
//!
//! These enums define the complete set of messages exchanged over the
//! WebSocket bridge, serialized as `{"type": ..., "data": ...}`.

use serde::{Deserialize, Serialize};

use penguin_core::{FormSchema, PenguinMeasurements, PredictionReport};

use crate::session::SessionState;

/// Messages from the backend to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BackendToUi {
    /// Form description, sent when the UI asks for state.
    Initialize {
        /// Controls to render.
        schema: FormSchema,
        /// Where the session currently stands.
        state: SessionState,
    },

    /// A submission was classified.
    PredictionReady {
        /// The result panel content.
        report: PredictionReport,
        /// Plain-text rendering of the report.
        text: String,
    },

    /// A submission was refused before reaching the model.
    Rejected {
        /// Why the input was refused.
        message: String,
    },

    /// The session went back to awaiting a submission.
    StateReset,

    /// A message could not be understood.
    Error {
        /// Error description.
        message: String,
    },
}

/// Messages from the UI to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToBackend {
    /// Request the form schema after the UI connects.
    RequestState,

    /// The trigger was pressed with these values.
    Predict {
        /// Current control values.
        input: PenguinMeasurements,
    },

    /// Clear the displayed result.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_message_shape() {
        let json = r#"{
            "type": "Predict",
            "data": {"input": {
                "culmen_length_mm": 45.0,
                "culmen_depth_mm": 17.0,
                "flipper_length_mm": 200.0,
                "body_mass_g": 4000.0,
                "sex": "FEMALE"
            }}
        }"#;
        let msg: UiToBackend = serde_json::from_str(json).unwrap();
        match msg {
            UiToBackend::Predict { input } => {
                assert_eq!(input.sex, "FEMALE");
                assert_eq!(input.body_mass_g, 4000.0);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_unit_variants_need_no_data() {
        let msg: UiToBackend = serde_json::from_str(r#"{"type": "RequestState"}"#).unwrap();
        assert!(matches!(msg, UiToBackend::RequestState));

        let json = serde_json::to_string(&BackendToUi::StateReset).unwrap();
        assert_eq!(json, r#"{"type":"StateReset"}"#);
    }
}
