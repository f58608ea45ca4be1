//! ListUserSessionsHandler - lists every session a user participates in.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionReader;

/// Query to list sessions for a user.
#[derive(Debug, Clone)]
pub struct ListUserSessionsQuery {
    pub user_id: UserId,
}

/// Handler for listing user sessions.
///
/// Returns sessions newest-created first, excluding abandoned
/// memberships; a retreated (inactive but not abandoned) membership still
/// counts. Entries carry leaders and work items but no participant
/// fan-out.
pub struct ListUserSessionsHandler {
    reader: Arc<dyn SessionReader>,
}

impl ListUserSessionsHandler {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListUserSessionsQuery) -> Result<Vec<Session>, SessionError> {
        let sessions = self.reader.list_by_user(&query.user_id).await?;
        Ok(sessions)
    }
}
