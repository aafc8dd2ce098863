use thiserror::Error;

/// Main error type for testrec
#[derive(Error, Debug)]
pub enum TestrecError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog load/parse errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Recommendation service call errors (network, status, decode)
    #[error("Service error: {0}")]
    Service(String),

    /// Evaluation run errors
    #[error("Evaluation error: {0}")]
    Eval(String),
}

/// Convenient Result type using TestrecError
pub type Result<T> = std::result::Result<T, TestrecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TestrecError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TestrecError = io_err.into();
        assert!(matches!(err, TestrecError::Io(_)));
    }

    #[test]
    fn test_catalog_error_display() {
        let err = TestrecError::Catalog("tests_db.json: expected an array".to_string());
        assert!(err.to_string().contains("Catalog error"));
        assert!(err.to_string().contains("tests_db.json"));
    }
}
