use crate::management::utils::disease_details::DiseaseDetails;
use crate::management::utils::processing_error::ProcessingError;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[async_trait]
pub trait DiseaseLookup: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<DiseaseDetails>, ProcessingError>;
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS disease_on_leaf (
    id INTEGER PRIMARY KEY,
    disease_code VARCHAR(30),
    disease_en VARCHAR(30),
    disease_km VARCHAR(30),
    cure TEXT,
    symtom TEXT,
    reference TEXT,
    status INTEGER
)";

const FIND_BY_CODE: &str = "SELECT disease_km, cure, symtom, reference FROM disease_on_leaf
    WHERE disease_code = ?1 ORDER BY id LIMIT 1";

/// Read-only view of the `disease_on_leaf` table.
pub struct SqliteDiseaseLookup {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDiseaseLookup {
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Seeding hook for tests and first-time setup; the worker never writes.
    pub fn insert(&self, code: &str, disease_en: &str, details: &DiseaseDetails) -> Result<(), String> {
        let conn = self.conn.lock().map_err(|err| err.to_string())?;
        conn.execute(
            "INSERT INTO disease_on_leaf (disease_code, disease_en, disease_km, cure, symtom, reference, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
            params![code, disease_en, details.disease_km, details.cure, details.symptom, details.reference],
        )
        .map_err(|err| err.to_string())?;
        Ok(())
    }

    fn query(conn: &Mutex<Connection>, code: &str) -> Result<Option<DiseaseDetails>, String> {
        let conn = conn.lock().map_err(|err| err.to_string())?;
        conn.query_row(FIND_BY_CODE, params![code], |row| {
            Ok(DiseaseDetails {
                disease_km: row.get(0)?,
                cure: row.get(1)?,
                symptom: row.get(2)?,
                reference: row.get(3)?,
            })
        })
        .optional()
        .map_err(|err| err.to_string())
    }
}

#[async_trait]
impl DiseaseLookup for SqliteDiseaseLookup {
    async fn find_by_code(&self, code: &str) -> Result<Option<DiseaseDetails>, ProcessingError> {
        let conn = self.conn.clone();
        let code = code.to_string();
        tokio::task::spawn_blocking(move || Self::query(&conn, &code))
            .await
            .map_err(|err| ProcessingError::Unclassified(err.to_string()))?
            .map_err(ProcessingError::Unclassified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn finds_first_row_for_code() {
        let lookup = SqliteDiseaseLookup::open_in_memory().unwrap();
        let first = DiseaseDetails::new("ប្លាយ", "Fungicide", "Lesions", "IRRI");
        let second = DiseaseDetails::new("duplicate", "other", "other", "other");
        lookup.insert("LEAF_BLIGHT", "Leaf blight", &first).unwrap();
        lookup.insert("LEAF_BLIGHT", "Leaf blight", &second).unwrap();
        assert_eq!(lookup.find_by_code("LEAF_BLIGHT").await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        let lookup = SqliteDiseaseLookup::open_in_memory().unwrap();
        assert_eq!(lookup.find_by_code("UNKNOWN_CODE").await.unwrap(), None);
    }

    #[tokio::test]
    async fn null_columns_are_preserved() {
        let lookup = SqliteDiseaseLookup::open_in_memory().unwrap();
        lookup.insert("HEALTHY", "Healthy", &DiseaseDetails::default()).unwrap();
        assert_eq!(lookup.find_by_code("HEALTHY").await.unwrap(), Some(DiseaseDetails::default()));
    }

    #[tokio::test]
    async fn poisoned_connection_is_reported() {
        let lookup = SqliteDiseaseLookup::open_in_memory().unwrap();
        let conn = lookup.conn.clone();
        let _ = std::thread::spawn(move || {
            let _conn = conn.lock().unwrap();
            panic!("seeding crashed");
        })
        .join();
        let err = lookup.insert("RUST", "Rust", &DiseaseDetails::default()).unwrap_err();
        assert!(err.contains("poisoned"), "unexpected error: {err}");
        match lookup.find_by_code("RUST").await {
            Err(ProcessingError::Unclassified(message)) => assert!(message.contains("poisoned"), "unexpected error: {message}"),
            other => panic!("expected an unclassified error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reopening_keeps_rows() {
        let folder = tempfile::tempdir().unwrap();
        let path = folder.path().join("plant_diagnoses.db");
        let details = DiseaseDetails::new("km", "cure", "symptom", "reference");
        SqliteDiseaseLookup::open(&path).unwrap().insert("RUST", "Rust", &details).unwrap();
        let lookup = SqliteDiseaseLookup::open(&path).unwrap();
        assert_eq!(lookup.find_by_code("RUST").await.unwrap(), Some(details));
    }
}
