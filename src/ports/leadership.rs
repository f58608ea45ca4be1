//! Leadership port - leader set maintenance and authorization.

use crate::domain::foundation::{DomainError, SessionId, UserId};
use async_trait::async_trait;

/// Port for the leader set of a session.
///
/// `is_leader` is the single authorization primitive: every mutating
/// session operation checks it before touching anything. It fails closed;
/// a missing leader record reads as "not a leader", never as an error
/// bypass.
#[async_trait]
pub trait LeadershipManager: Send + Sync {
    /// Whether the user currently leads the session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the leader record cannot be read
    async fn is_leader(&self, session_id: &SessionId, user_id: &UserId)
        -> Result<bool, DomainError>;

    /// Add a user to the leader set. Promoting an existing leader is a
    /// no-op. Returns the freshly-read leader list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn promote(
        &self,
        session_id: &SessionId,
        candidate: &UserId,
    ) -> Result<Vec<UserId>, DomainError>;

    /// Remove a user from the leader set. The removal and the last-leader
    /// guard must execute as one atomic update; demoting a non-leader is a
    /// no-op. Returns the freshly-read leader list.
    ///
    /// # Errors
    ///
    /// - `LastLeader` if the removal would empty the leader set
    /// - `DatabaseError` on persistence failure
    async fn demote(
        &self,
        session_id: &SessionId,
        target: &UserId,
    ) -> Result<Vec<UserId>, DomainError>;

    /// Current leader list for the session.
    async fn list(&self, session_id: &SessionId) -> Result<Vec<UserId>, DomainError>;
}
