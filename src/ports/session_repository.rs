//! Session repository port (write side).
//!
//! Defines the contract for persisting the session root, its initial
//! work items, attribute revisions, and cascading deletion.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::{NewWorkItem, RoundingMode, Session, WorkItem};
use async_trait::async_trait;

/// The four attributes a leader may revise in place.
///
/// Leaders, participants, and voting state are never touched by a
/// revision.
#[derive(Debug, Clone)]
pub struct SessionRevision {
    pub name: String,
    pub point_values_allowed: Vec<String>,
    pub auto_finish_voting: bool,
    pub point_average_rounding: RoundingMode,
}

/// Repository port for session lifecycle writes.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session root together with its creator's leader
    /// record, then each supplied work item.
    ///
    /// Per-item persistence is best effort: a failing item is logged and
    /// skipped, and the returned list contains only the items that were
    /// actually written. A partially-created item list is an accepted
    /// degraded outcome, not a rollback trigger.
    ///
    /// # Errors
    ///
    /// - `CreationFailed` if the root record cannot be persisted
    async fn create(
        &self,
        session: &Session,
        work_items: &[NewWorkItem],
    ) -> Result<Vec<WorkItem>, DomainError>;

    /// Overwrite the revisable attributes of an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session row does not exist
    /// - `DatabaseError` on persistence failure
    async fn revise(&self, id: &SessionId, revision: &SessionRevision) -> Result<(), DomainError>;

    /// Delete a session and all its leaders, participants, and work items
    /// within one transaction.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session row does not exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
