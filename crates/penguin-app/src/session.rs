//! Per-connection form session.
//!
//! A session is either awaiting a submission or showing a result. Only a
//! `Predict` trigger moves it forward; each trigger recomputes from the
//! submitted values and nothing from earlier predictions is kept.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use penguin_core::{FormSchema, Predictor};

use crate::ipc::{BackendToUi, UiToBackend};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    AwaitingSubmission,
    ResultDisplayed,
}

/// One UI's view of the shared predictor.
pub struct Session {
    predictor: Arc<Predictor>,
    schema: Arc<FormSchema>,
    state: SessionState,
}

impl Session {
    pub fn new(predictor: Arc<Predictor>, schema: Arc<FormSchema>) -> Self {
        Self {
            predictor,
            schema,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Handle one message and produce the reply.
    ///
    /// A rejected submission leaves the state where it was.
    pub fn handle(&mut self, msg: UiToBackend) -> BackendToUi {
        match msg {
            UiToBackend::RequestState => BackendToUi::Initialize {
                schema: (*self.schema).clone(),
                state: self.state,
            },
            UiToBackend::Predict { input } => {
                let result = self
                    .schema
                    .validate(&input)
                    .and_then(|()| self.predictor.report(&input));
                match result {
                    Ok(report) => {
                        self.state = SessionState::ResultDisplayed;
                        tracing::info!(
                            species = %report.species,
                            confidence = %report.confidence_label(),
                            "prediction ready"
                        );
                        BackendToUi::PredictionReady {
                            text: report.to_string(),
                            report,
                        }
                    }
                    Err(e) => {
                        tracing::warn!("rejected submission: {e}");
                        BackendToUi::Rejected {
                            message: e.to_string(),
                        }
                    }
                }
            }
            UiToBackend::Reset => {
                self.state = SessionState::AwaitingSubmission;
                BackendToUi::StateReset
            }
        }
    }

    /// Parse a raw JSON message and handle it.
    pub fn handle_json(&mut self, json: &str) -> BackendToUi {
        match serde_json::from_str::<UiToBackend>(json) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                tracing::warn!("Failed to parse UI message: {e}");
                BackendToUi::Error {
                    message: format!("unrecognized message: {e}"),
                }
            }
        }
    }
}
