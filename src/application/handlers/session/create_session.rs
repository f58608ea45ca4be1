//! CreateSessionHandler - creates a session with its first leader and
//! initial work items.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{NewWorkItem, RoundingMode, Session, SessionError};
use crate::ports::SessionRepository;

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub creator: UserId,
    pub name: String,
    pub point_values_allowed: Vec<String>,
    pub work_items: Vec<NewWorkItem>,
    pub auto_finish_voting: bool,
    pub point_average_rounding: RoundingMode,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Creates the session. The returned aggregate carries only the work
    /// items that were actually persisted; a shorter list than requested
    /// is the documented degraded outcome, not an error.
    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<Session, SessionError> {
        let session = Session::new(
            SessionId::new(),
            cmd.creator,
            cmd.name,
            cmd.point_values_allowed,
            cmd.auto_finish_voting,
            cmd.point_average_rounding,
        )?;

        let work_items = self.repository.create(&session, &cmd.work_items).await?;

        Ok(session.with_work_items(work_items))
    }
}
