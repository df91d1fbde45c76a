use crate::management::disease_lookup::DiseaseLookup;
use crate::management::predictor::Predictor;
use crate::management::result_store::ResultStore;
use crate::management::submission_gateway::TERMINATED_MESSAGE;
use crate::management::task_queue::{TaskGuard, TaskReceiver};
use crate::management::utils::processing_error::ProcessingError;
use crate::management::utils::status_record::{Diagnosis, StatusRecord};
use crate::management::utils::task::Task;
use crate::utils::logging::*;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// The single consumer of the task queue. Tasks run one at a time, in submission order.
pub struct Worker {
    store: Arc<ResultStore>,
    predictor: Arc<dyn Predictor>,
    lookup: Arc<dyn DiseaseLookup>,
}

impl Worker {
    pub fn new(store: Arc<ResultStore>, predictor: Arc<dyn Predictor>, lookup: Arc<dyn DiseaseLookup>) -> Self {
        Self {
            store,
            predictor,
            lookup,
        }
    }

    /// Runs until `terminate` flips or every sender is gone. A task already dequeued is
    /// always carried to its terminal record before returning.
    pub async fn run(self, mut receiver: TaskReceiver, mut terminate: watch::Receiver<bool>) {
        logging_information!(SystemEntry::ProcessorOnline);
        loop {
            if *terminate.borrow() {
                break;
            }
            let next = tokio::select! {
                biased;
                _ = terminate.changed() => break,
                next = receiver.dequeue() => next,
            };
            match next {
                Some((task, guard)) => self.handle(task, guard).await,
                None => break,
            }
        }
        receiver.close();
        // `dequeue` after `close` still waits out sends that raced the close.
        while let Some((task, guard)) = receiver.dequeue().await {
            self.discard(task, guard).await;
        }
        logging_information!(SystemEntry::ProcessorOffline);
    }

    async fn handle(&self, task: Task, guard: TaskGuard) {
        let uuid = task.id.uuid();
        logging_debug!(uuid, TaskEntry::Processing(task.input_reference.clone()), "");
        let predictor = self.predictor.clone();
        let lookup = self.lookup.clone();
        let input_reference = task.input_reference.clone();
        // A panicking collaborator only takes down its own spawned task.
        let outcome = tokio::spawn(async move { Self::diagnose(uuid, predictor, lookup, input_reference).await }).await;
        let record = match outcome {
            Ok(Ok(diagnosis)) => {
                logging_information!(uuid, TaskEntry::Completed(uuid), "");
                StatusRecord::completed(diagnosis)
            }
            Ok(Err(err)) => {
                match &err {
                    ProcessingError::LookupMiss => logging_warning!(uuid, TaskEntry::ProcessingError(task.input_reference.clone(), err.to_string()), ""),
                    _ => logging_error!(uuid, TaskEntry::ProcessingError(task.input_reference.clone(), err.to_string()), ""),
                }
                StatusRecord::from(err)
            }
            Err(join_error) => {
                let err = ProcessingError::Unclassified(join_error.to_string());
                logging_error!(uuid, TaskEntry::ProcessingError(task.input_reference.clone(), err.to_string()), SystemEntry::TaskPanickedError(join_error));
                StatusRecord::from(err)
            }
        };
        self.store.put(task.id, record).await;
        guard.finish();
    }

    async fn diagnose(uuid: Uuid, predictor: Arc<dyn Predictor>, lookup: Arc<dyn DiseaseLookup>, input_reference: String) -> Result<Diagnosis, ProcessingError> {
        let prediction = predictor.predict(&input_reference).await?
            .ok_or_else(|| ProcessingError::InvalidResult("Prediction returned None".to_string()))?;
        logging_information!(uuid, TaskEntry::Predicted(prediction.label.clone(), prediction.confidence), "");
        match lookup.find_by_code(&prediction.label).await? {
            Some(details) => {
                logging_information!(uuid, TaskEntry::DetailsFound(prediction.label.clone()), "");
                Ok(Diagnosis::new(prediction, details))
            }
            None => {
                logging_warning!(uuid, TaskEntry::DetailsNotFound(prediction.label.clone()), "");
                Err(ProcessingError::LookupMiss)
            }
        }
    }

    async fn discard(&self, task: Task, guard: TaskGuard) {
        let uuid = task.id.uuid();
        self.store.put(task.id, StatusRecord::errored(TERMINATED_MESSAGE)).await;
        logging_warning!(uuid, TaskEntry::Discarded(uuid), task.input_reference);
        guard.finish();
    }
}
