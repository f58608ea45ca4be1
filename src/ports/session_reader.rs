//! Session reader port (query side).

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Read-only composition over session state.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Fetch one session with its leaders and work items. The participant
    /// list is left empty; the query service composes it from the
    /// participant tracker.
    ///
    /// Returns `None` if the session does not exist.
    async fn get_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Every session where the user holds a non-abandoned participant
    /// record, newest-created first. A temporarily retreated user still
    /// sees the session; an abandoned one does not. Entries carry leaders
    /// and work items but no participant fan-out.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError>;
}
