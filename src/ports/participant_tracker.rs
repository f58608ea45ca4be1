//! Participant tracker port - per-user presence within a session.

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{JoinCandidate, Participant};
use async_trait::async_trait;

/// Port for participant presence records.
///
/// All listings are ordered by display name ascending so the transport
/// layer renders deterministically.
#[async_trait]
pub trait ParticipantTracker: Send + Sync {
    /// Resolve a user's profile and confirm they are not already active
    /// in the session. Advisory pre-join check; `join` remains the atomic
    /// authority.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` for an unknown user
    /// - `AlreadyActive` if the user is currently active in the session
    async fn lookup_candidate(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<JoinCandidate, DomainError>;

    /// Mark the user present: a single conditional upsert to
    /// `active = true, abandoned = false`. Rejoining after abandonment
    /// clears the abandoned flag. Returns the refreshed participant list.
    ///
    /// # Errors
    ///
    /// - `AlreadyActive` if the user was already active (the upsert guard
    ///   rejected the write)
    /// - `DatabaseError` on persistence failure
    async fn join(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError>;

    /// Temporary departure: flips `active` off and stamps the user's
    /// global last-active timestamp. A failing timestamp write is logged,
    /// not surfaced. Returns the refreshed participant list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the presence flag cannot be written
    async fn retreat(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError>;

    /// Permanent opt-out: flips `active` off and sets `abandoned`.
    /// Returns the refreshed participant list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if either write fails; no partial state is
    ///   authoritative in that case
    async fn abandon(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError>;

    /// All participant records for the session.
    async fn list(&self, session_id: &SessionId) -> Result<Vec<Participant>, DomainError>;

    /// Only the participants currently marked active.
    async fn list_active(&self, session_id: &SessionId) -> Result<Vec<Participant>, DomainError>;
}
