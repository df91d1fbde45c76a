use crate::management::utils::disease_details::DiseaseDetails;
use crate::management::utils::prediction::Prediction;
use crate::management::utils::processing_error::ProcessingError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Diagnosis {
    #[serde(rename = "predicted_disease")]
    pub predicted_label: String,
    pub confidence: f32,
    pub details: DiseaseDetails,
}

impl Diagnosis {
    pub fn new(prediction: Prediction, details: DiseaseDetails) -> Self {
        Self {
            predicted_label: prediction.label,
            confidence: prediction.confidence,
            details,
        }
    }
}

/// Current state of a task. `Processing` is the only non-terminal state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusRecord {
    Processing,
    Completed {
        result: Diagnosis,
    },
    #[serde(rename = "error")]
    Errored {
        message: String,
    },
}

impl StatusRecord {
    pub fn completed(diagnosis: Diagnosis) -> Self {
        StatusRecord::Completed { result: diagnosis }
    }

    pub fn errored<T: Into<String>>(message: T) -> Self {
        StatusRecord::Errored { message: message.into() }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, StatusRecord::Processing)
    }
}

impl From<ProcessingError> for StatusRecord {
    fn from(value: ProcessingError) -> Self {
        StatusRecord::errored(value.to_string())
    }
}
