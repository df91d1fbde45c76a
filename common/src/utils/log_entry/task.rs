use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TaskEntry {
    #[error("Added image with ID: {0}")]
    Submitted(Uuid),
    #[error("Processing image: {0}")]
    Processing(String),
    #[error("Predicted disease {0} with confidence {1:.2}")]
    Predicted(String, f32),
    #[error("Retrieved disease details for {0}")]
    DetailsFound(String),
    #[error("Disease details for {0} not found in the database")]
    DetailsNotFound(String),
    #[error("Task {0} completed")]
    Completed(Uuid),
    #[error("Error processing image {0}: {1}")]
    ProcessingError(String, String),
    #[error("Task {0} discarded because the image processor terminated")]
    Discarded(Uuid),
}

impl From<TaskEntry> for String {
    #[inline(always)]
    fn from(value: TaskEntry) -> Self {
        value.to_string()
    }
}
