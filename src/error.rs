//! Error types for the contest board.

use thiserror::Error;

/// Common error type for the contest board.
///
/// Variants fall into two families: policy rejections the caller can fix
/// (`Validation`, `Blocked`, `Unauthorized`, `AlreadyAnswered`, `NotFound`)
/// and infrastructure failures worth retrying later (`BackendUnavailable`,
/// `Transient`). See [`BoardError::is_infrastructure`].
#[derive(Error, Debug)]
pub enum BoardError {
    /// A required field is missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// The author name is on the block list.
    #[error("author '{0}' is blocked; please contact the administrator")]
    Blocked(String),

    /// An admin-only operation was attempted without the admin role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The post already carries its canonical reply.
    #[error("post {0} has already been answered")]
    AlreadyAnswered(i64),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The backend is not configured or cannot be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A single backend operation failed.
    #[error("backend request failed: {0}")]
    Transient(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// Whether the failure comes from the persistence layer rather than the
    /// caller's input or permissions.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            BoardError::BackendUnavailable(_) | BoardError::Transient(_) | BoardError::Io(_)
        )
    }
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                BoardError::BackendUnavailable(e.to_string())
            }
            _ => BoardError::Transient(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for BoardError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            BoardError::BackendUnavailable(e.to_string())
        } else if e.is_decode() {
            BoardError::Transient(format!("malformed response: {e}"))
        } else {
            BoardError::Transient(e.to_string())
        }
    }
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = BoardError::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "validation error: name is required");
    }

    #[test]
    fn test_blocked_error_display() {
        let err = BoardError::Blocked("Kim".to_string());
        assert!(err.to_string().contains("'Kim'"));
        assert!(err.to_string().contains("contact the administrator"));
    }

    #[test]
    fn test_not_found_error_display() {
        let err = BoardError::NotFound("post 3".to_string());
        assert_eq!(err.to_string(), "post 3 not found");
    }

    #[test]
    fn test_already_answered_display() {
        let err = BoardError::AlreadyAnswered(7);
        assert_eq!(err.to_string(), "post 7 has already been answered");
    }

    #[test]
    fn test_infrastructure_classification() {
        assert!(BoardError::BackendUnavailable("x".into()).is_infrastructure());
        assert!(BoardError::Transient("x".into()).is_infrastructure());

        assert!(!BoardError::Validation("x".into()).is_infrastructure());
        assert!(!BoardError::Blocked("x".into()).is_infrastructure());
        assert!(!BoardError::Unauthorized("x".into()).is_infrastructure());
        assert!(!BoardError::AlreadyAnswered(1).is_infrastructure());
        assert!(!BoardError::NotFound("x".into()).is_infrastructure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BoardError = io_err.into();
        assert!(matches!(err, BoardError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: BoardError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, BoardError::Transient(_)));

        let err: BoardError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, BoardError::BackendUnavailable(_)));
    }
}
