use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseEntry {
    #[error("Database {0} opened")]
    Opened(String),
    #[error("Failed to open database {0}: {1}")]
    OpenError(String, String),
}

impl From<DatabaseEntry> for String {
    #[inline(always)]
    fn from(value: DatabaseEntry) -> Self {
        value.to_string()
    }
}
