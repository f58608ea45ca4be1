//! DeleteSessionHandler - leader-authorized cascading deletion.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::SessionError;
use crate::ports::{LeadershipManager, SessionRepository};

/// Command to delete a session.
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
    pub requester: UserId,
}

/// Handler for deleting sessions.
pub struct DeleteSessionHandler {
    leadership: Arc<dyn LeadershipManager>,
    repository: Arc<dyn SessionRepository>,
}

impl DeleteSessionHandler {
    pub fn new(
        leadership: Arc<dyn LeadershipManager>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            leadership,
            repository,
        }
    }

    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<(), SessionError> {
        if !self
            .leadership
            .is_leader(&cmd.session_id, &cmd.requester)
            .await?
        {
            return Err(SessionError::forbidden());
        }

        self.repository.delete(&cmd.session_id).await?;

        Ok(())
    }
}
