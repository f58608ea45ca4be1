//! AbandonSessionHandler - permanent opt-out from a session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Participant, SessionError};
use crate::ports::ParticipantTracker;

/// Command to abandon a session.
#[derive(Debug, Clone)]
pub struct AbandonSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for abandoning sessions.
///
/// Abandonment removes the session from the user's listing until they
/// explicitly rejoin; the participant row stays behind with the
/// abandoned flag set.
pub struct AbandonSessionHandler {
    tracker: Arc<dyn ParticipantTracker>,
}

impl AbandonSessionHandler {
    pub fn new(tracker: Arc<dyn ParticipantTracker>) -> Self {
        Self { tracker }
    }

    pub async fn handle(
        &self,
        cmd: AbandonSessionCommand,
    ) -> Result<Vec<Participant>, SessionError> {
        let participants = self.tracker.abandon(&cmd.session_id, &cmd.user_id).await?;
        Ok(participants)
    }
}
