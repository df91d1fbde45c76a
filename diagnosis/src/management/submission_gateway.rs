use crate::management::result_store::ResultStore;
use crate::management::task_queue::TaskQueue;
use crate::management::utils::status_record::StatusRecord;
use crate::management::utils::task::Task;
use crate::management::utils::task_id::TaskId;
use crate::utils::logging::*;
use std::sync::Arc;

pub const TERMINATED_MESSAGE: &str = "Service terminated";

#[derive(Clone)]
pub struct SubmissionGateway {
    store: Arc<ResultStore>,
    queue: TaskQueue,
}

impl SubmissionGateway {
    pub fn new(store: Arc<ResultStore>, queue: TaskQueue) -> Self {
        Self { store, queue }
    }

    /// The id is pollable as `Processing` before this returns. Inference happens later on the worker.
    pub async fn submit<T: Into<String>>(&self, input_reference: T) -> TaskId {
        let id = TaskId::new();
        self.store.put(id, StatusRecord::Processing).await;
        if let Err(task) = self.queue.enqueue(Task::new(id, input_reference)) {
            self.store.put(id, StatusRecord::errored(TERMINATED_MESSAGE)).await;
            logging_warning!(id.uuid(), TaskEntry::Discarded(id.uuid()), task.input_reference);
            return id;
        }
        logging_information!(id.uuid(), TaskEntry::Submitted(id.uuid()), "");
        id
    }
}
