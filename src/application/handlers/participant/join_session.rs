//! JoinSessionHandler - marks a user present in a session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Participant, SessionError};
use crate::ports::ParticipantTracker;

/// Command to join a session.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    tracker: Arc<dyn ParticipantTracker>,
}

impl JoinSessionHandler {
    pub fn new(tracker: Arc<dyn ParticipantTracker>) -> Self {
        Self { tracker }
    }

    /// Joins the session. The candidate lookup surfaces unknown users and
    /// rejects an already-active presence early; the join upsert itself
    /// re-checks atomically, so a concurrent duplicate still cannot slip
    /// through. Returns the refreshed participant list.
    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<Vec<Participant>, SessionError> {
        self.tracker
            .lookup_candidate(&cmd.session_id, &cmd.user_id)
            .await?;

        let participants = self.tracker.join(&cmd.session_id, &cmd.user_id).await?;

        Ok(participants)
    }
}
