use crate::management::utils::task_id::TaskId;

/// One uploaded image waiting for classification. The image itself stays on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub input_reference: String,
}

impl Task {
    pub fn new<T: Into<String>>(id: TaskId, input_reference: T) -> Self {
        Self {
            id,
            input_reference: input_reference.into(),
        }
    }
}
