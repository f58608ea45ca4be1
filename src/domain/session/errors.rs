//! Session-specific error surface returned by the application layer.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors the session operations surface to the transport layer.
///
/// Each variant maps 1:1 onto an [`ErrorCode`] so callers can translate
/// into not-found / forbidden / conflict responses without string
/// matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session with the given id.
    NotFound(String),
    /// No such user.
    UserNotFound(String),
    /// Caller is not a current leader.
    Forbidden,
    /// User is already marked active in the session.
    AlreadyActive,
    /// Demotion would leave the session leaderless.
    LastLeader,
    /// Input validation failed.
    ValidationFailed { field: String, message: String },
    /// The session root record could not be persisted.
    CreationFailed(String),
    /// Underlying store failure on a primary-path read or write.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        SessionError::NotFound(detail.into())
    }

    pub fn forbidden() -> Self {
        SessionError::Forbidden
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    /// The error code the transport layer should translate.
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::UserNotFound(_) => ErrorCode::UserNotFound,
            SessionError::Forbidden => ErrorCode::Forbidden,
            SessionError::AlreadyActive => ErrorCode::AlreadyActive,
            SessionError::LastLeader => ErrorCode::LastLeader,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::CreationFailed(_) => ErrorCode::CreationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Human-readable diagnostic message.
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(detail) => format!("Session not found: {}", detail),
            SessionError::UserNotFound(detail) => format!("User not found: {}", detail),
            SessionError::Forbidden => "Caller is not a session leader".to_string(),
            SessionError::AlreadyActive => "User is already active in this session".to_string(),
            SessionError::LastLeader => {
                "Demotion would leave the session without a leader".to_string()
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::CreationFailed(msg) => format!("Session creation failed: {}", msg),
            SessionError::Infrastructure(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => SessionError::NotFound(err.message),
            ErrorCode::UserNotFound => SessionError::UserNotFound(err.message),
            ErrorCode::Forbidden => SessionError::Forbidden,
            ErrorCode::AlreadyActive => SessionError::AlreadyActive,
            ErrorCode::LastLeader => SessionError::LastLeader,
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::CreationFailed => SessionError::CreationFailed(err.message),
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
