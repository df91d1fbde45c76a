use thiserror::Error;

/// Why a task ended in the error state. The `Display` text is what pollers see.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("File not found")]
    InputNotFound,
    #[error("{0}")]
    InvalidResult(String),
    #[error("Disease details not found")]
    LookupMiss,
    #[error("{0}")]
    Unclassified(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_what_pollers_expect() {
        assert_eq!(ProcessingError::InputNotFound.to_string(), "File not found");
        assert_eq!(ProcessingError::LookupMiss.to_string(), "Disease details not found");
        assert_eq!(ProcessingError::InvalidResult("Prediction returned None".to_string()).to_string(), "Prediction returned None");
        assert_eq!(ProcessingError::Unclassified("database is locked".to_string()).to_string(), "database is locked");
    }
}
