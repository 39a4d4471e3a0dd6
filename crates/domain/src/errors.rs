use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("{0}")]
    ProbeFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Domain already exists: {0}")]
    DomainAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
