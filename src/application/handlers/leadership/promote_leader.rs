//! PromoteLeaderHandler - adds a leader, authorized by a current leader.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::SessionError;
use crate::ports::LeadershipManager;

/// Command to promote a user to leader.
#[derive(Debug, Clone)]
pub struct PromoteLeaderCommand {
    pub session_id: SessionId,
    pub requester: UserId,
    pub candidate: UserId,
}

/// Handler for promoting leaders.
pub struct PromoteLeaderHandler {
    leadership: Arc<dyn LeadershipManager>,
}

impl PromoteLeaderHandler {
    pub fn new(leadership: Arc<dyn LeadershipManager>) -> Self {
        Self { leadership }
    }

    /// Promotes the candidate. Promoting an existing leader is a no-op.
    /// Returns the complete, freshly-read leader list so callers never
    /// reconcile partial state.
    pub async fn handle(&self, cmd: PromoteLeaderCommand) -> Result<Vec<UserId>, SessionError> {
        if !self
            .leadership
            .is_leader(&cmd.session_id, &cmd.requester)
            .await?
        {
            return Err(SessionError::forbidden());
        }

        let leaders = self
            .leadership
            .promote(&cmd.session_id, &cmd.candidate)
            .await?;

        Ok(leaders)
    }
}
