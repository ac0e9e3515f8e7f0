//! Common error types for confhub

use thiserror::Error;

/// Common result type for confhub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across confhub crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uniqueness rule would be violated (domain scan or storage constraint)
    #[error("{0}")]
    Duplicate(String),

    /// Storage rejected a write on referential integrity
    #[error("{0}")]
    Constraint(String),
}

impl Error {
    /// Classify a storage failure raised by a write.
    ///
    /// Unique violations map to [`Error::Duplicate`] carrying `duplicate_msg`,
    /// foreign key violations to [`Error::Constraint`] carrying
    /// `constraint_msg`; anything else stays a database error.
    pub fn from_write(err: sqlx::Error, duplicate_msg: &str, constraint_msg: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return Error::Duplicate(duplicate_msg.to_string());
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return Error::Constraint(constraint_msg.to_string());
                }
                _ => {}
            }
        }
        Error::Database(err)
    }
}
