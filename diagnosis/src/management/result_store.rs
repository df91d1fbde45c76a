use crate::management::utils::status_record::StatusRecord;
use crate::management::utils::task_id::TaskId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Status of every task issued during the lifetime of the process. Entries are never removed.
pub struct ResultStore {
    records: RwLock<HashMap<TaskId, StatusRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Upserts `record`. A terminal record is final, so overwriting one is refused and
    /// reported as `false`.
    pub async fn put(&self, id: TaskId, record: StatusRecord) -> bool {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(current) if current.is_terminal() => false,
            _ => {
                records.insert(id, record);
                true
            }
        }
    }

    pub async fn get(&self, id: &TaskId) -> Option<StatusRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::utils::processing_error::ProcessingError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = ResultStore::new();
        store.put(TaskId::new(), StatusRecord::Processing).await;
        assert_eq!(store.get(&TaskId::new()).await, None);
    }

    #[tokio::test]
    async fn processing_moves_to_terminal() {
        let store = ResultStore::new();
        let id = TaskId::new();
        assert!(store.put(id, StatusRecord::Processing).await);
        assert_eq!(store.get(&id).await, Some(StatusRecord::Processing));
        assert!(store.put(id, ProcessingError::InputNotFound.into()).await);
        assert_eq!(store.get(&id).await, Some(StatusRecord::errored("File not found")));
    }

    #[tokio::test]
    async fn terminal_record_is_never_overwritten() {
        let store = ResultStore::new();
        let id = TaskId::new();
        store.put(id, StatusRecord::Processing).await;
        store.put(id, StatusRecord::errored("first")).await;
        assert!(!store.put(id, StatusRecord::Processing).await);
        assert!(!store.put(id, StatusRecord::errored("second")).await);
        assert_eq!(store.get(&id).await, Some(StatusRecord::errored("first")));
    }

    #[tokio::test]
    async fn concurrent_writers_and_readers() {
        let store = Arc::new(ResultStore::new());
        let ids: Vec<TaskId> = (0..64).map(|_| TaskId::new()).collect();
        let mut handles = Vec::new();
        for id in ids.clone() {
            let writer = store.clone();
            handles.push(tokio::spawn(async move {
                writer.put(id, StatusRecord::Processing).await;
                writer.put(id, StatusRecord::errored(id.to_string())).await;
            }));
            let reader = store.clone();
            handles.push(tokio::spawn(async move {
                let _ = reader.get(&id).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 64);
        for id in ids {
            assert_eq!(store.get(&id).await, Some(StatusRecord::errored(id.to_string())));
        }
    }
}
