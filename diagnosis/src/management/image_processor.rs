use crate::management::disease_lookup::DiseaseLookup;
use crate::management::predictor::Predictor;
use crate::management::result_store::ResultStore;
use crate::management::submission_gateway::SubmissionGateway;
use crate::management::task_queue::TaskQueue;
use crate::management::utils::status_record::StatusRecord;
use crate::management::utils::task_id::TaskId;
use crate::management::worker::Worker;
use crate::utils::logging::*;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

/// Owns the queue, the result store and the worker for one classification pipeline.
///
/// Uploads go through [`ImageProcessor::submit`], pollers through [`ImageProcessor::poll`].
/// Every instance is independent, so each test can run its own.
pub struct ImageProcessor {
    store: Arc<ResultStore>,
    queue: TaskQueue,
    gateway: SubmissionGateway,
    terminate: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ImageProcessor {
    /// Spawns the worker on the current tokio runtime.
    pub fn start(predictor: Arc<dyn Predictor>, lookup: Arc<dyn DiseaseLookup>) -> Self {
        let store = Arc::new(ResultStore::new());
        let (queue, receiver) = TaskQueue::channel();
        let (terminate, terminate_receiver) = watch::channel(false);
        let worker = Worker::new(store.clone(), predictor, lookup);
        let handle = tokio::spawn(worker.run(receiver, terminate_receiver));
        Self {
            gateway: SubmissionGateway::new(store.clone(), queue.clone()),
            store,
            queue,
            terminate,
            worker: Mutex::new(Some(handle)),
        }
    }

    pub async fn submit<T: Into<String>>(&self, input_reference: T) -> TaskId {
        self.gateway.submit(input_reference).await
    }

    /// `None` for an id this processor never issued.
    pub async fn poll(&self, id: &TaskId) -> Option<StatusRecord> {
        self.store.get(id).await
    }

    /// Waits until every task submitted so far has a terminal record.
    pub async fn join(&self) {
        self.queue.join().await
    }

    pub fn pending(&self) -> usize {
        self.queue.unfinished()
    }

    /// Lets the in-flight task finish, fails whatever is still queued, and waits for the
    /// worker to exit. Calling it again is a no-op.
    pub async fn terminate(&self) {
        let handle = match self.worker.lock().await.take() {
            Some(handle) => handle,
            None => return,
        };
        self.terminate.send_replace(true);
        if let Err(err) = handle.await {
            logging_critical!(SystemEntry::TaskPanickedError(err));
        }
    }
}
