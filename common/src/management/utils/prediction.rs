use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    #[serde(rename = "predicted_disease")]
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new<T: Into<String>>(label: T, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}
