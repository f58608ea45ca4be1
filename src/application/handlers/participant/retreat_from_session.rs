//! RetreatFromSessionHandler - temporary departure, e.g. a dropped
//! connection.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Participant, SessionError};
use crate::ports::ParticipantTracker;

/// Command to retreat from a session.
#[derive(Debug, Clone)]
pub struct RetreatFromSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for retreating from sessions.
///
/// Retreat clears the active flag but not the membership: the session
/// still appears in the user's listing and a later join restores
/// presence without any duplicate-join conflict.
pub struct RetreatFromSessionHandler {
    tracker: Arc<dyn ParticipantTracker>,
}

impl RetreatFromSessionHandler {
    pub fn new(tracker: Arc<dyn ParticipantTracker>) -> Self {
        Self { tracker }
    }

    pub async fn handle(
        &self,
        cmd: RetreatFromSessionCommand,
    ) -> Result<Vec<Participant>, SessionError> {
        let participants = self.tracker.retreat(&cmd.session_id, &cmd.user_id).await?;
        Ok(participants)
    }
}
