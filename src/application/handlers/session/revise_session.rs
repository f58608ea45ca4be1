//! ReviseSessionHandler - leader-authorized attribute revision.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{validate_name, RoundingMode, SessionError};
use crate::ports::{LeadershipManager, SessionRepository, SessionRevision};

/// Command to revise a session's attributes.
#[derive(Debug, Clone)]
pub struct ReviseSessionCommand {
    pub session_id: SessionId,
    pub requester: UserId,
    pub name: String,
    pub point_values_allowed: Vec<String>,
    pub auto_finish_voting: bool,
    pub point_average_rounding: RoundingMode,
}

/// Handler for revising sessions.
pub struct ReviseSessionHandler {
    leadership: Arc<dyn LeadershipManager>,
    repository: Arc<dyn SessionRepository>,
}

impl ReviseSessionHandler {
    pub fn new(
        leadership: Arc<dyn LeadershipManager>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            leadership,
            repository,
        }
    }

    /// Overwrites the four revisable attributes. Leaders, participants,
    /// and voting state are untouched.
    pub async fn handle(&self, cmd: ReviseSessionCommand) -> Result<(), SessionError> {
        if !self
            .leadership
            .is_leader(&cmd.session_id, &cmd.requester)
            .await?
        {
            return Err(SessionError::forbidden());
        }

        validate_name(&cmd.name)?;

        let revision = SessionRevision {
            name: cmd.name,
            point_values_allowed: cmd.point_values_allowed,
            auto_finish_voting: cmd.auto_finish_voting,
            point_average_rounding: cmd.point_average_rounding,
        };

        self.repository.revise(&cmd.session_id, &revision).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::session::{NewWorkItem, Session, WorkItem};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticLeadership {
        leaders: Vec<UserId>,
    }

    impl StaticLeadership {
        fn of(leaders: &[&str]) -> Self {
            Self {
                leaders: leaders.iter().map(|l| UserId::new(*l).unwrap()).collect(),
            }
        }
    }

    #[async_trait]
    impl LeadershipManager for StaticLeadership {
        async fn is_leader(
            &self,
            _session_id: &SessionId,
            user_id: &UserId,
        ) -> Result<bool, DomainError> {
            Ok(self.leaders.contains(user_id))
        }

        async fn promote(
            &self,
            _session_id: &SessionId,
            _candidate: &UserId,
        ) -> Result<Vec<UserId>, DomainError> {
            Ok(self.leaders.clone())
        }

        async fn demote(
            &self,
            _session_id: &SessionId,
            _target: &UserId,
        ) -> Result<Vec<UserId>, DomainError> {
            Ok(self.leaders.clone())
        }

        async fn list(&self, _session_id: &SessionId) -> Result<Vec<UserId>, DomainError> {
            Ok(self.leaders.clone())
        }
    }

    struct MockSessionRepository {
        revisions: Mutex<Vec<(SessionId, SessionRevision)>>,
        missing: bool,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                revisions: Mutex::new(Vec::new()),
                missing: false,
            }
        }

        fn missing() -> Self {
            Self {
                missing: true,
                ..Self::new()
            }
        }

        fn revisions(&self) -> Vec<(SessionId, SessionRevision)> {
            self.revisions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn create(
            &self,
            _session: &Session,
            _work_items: &[NewWorkItem],
        ) -> Result<Vec<WorkItem>, DomainError> {
            Ok(Vec::new())
        }

        async fn revise(
            &self,
            id: &SessionId,
            revision: &SessionRevision,
        ) -> Result<(), DomainError> {
            if self.missing {
                return Err(DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session not found: {}", id),
                ));
            }
            self.revisions
                .lock()
                .unwrap()
                .push((*id, revision.clone()));
            Ok(())
        }

        async fn delete(&self, _id: &SessionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn command(requester: &str) -> ReviseSessionCommand {
        ReviseSessionCommand {
            session_id: SessionId::new(),
            requester: UserId::new(requester).unwrap(),
            name: "Renamed session".to_string(),
            point_values_allowed: vec!["1".into(), "2".into()],
            auto_finish_voting: false,
            point_average_rounding: RoundingMode::Floor,
        }
    }

    #[tokio::test]
    async fn leader_can_revise() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler =
            ReviseSessionHandler::new(Arc::new(StaticLeadership::of(&["u1"])), repo.clone());

        handler.handle(command("u1")).await.unwrap();

        let revisions = repo.revisions();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].1.name, "Renamed session");
    }

    #[tokio::test]
    async fn non_leader_is_forbidden() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler =
            ReviseSessionHandler::new(Arc::new(StaticLeadership::of(&["u1"])), repo.clone());

        let result = handler.handle(command("intruder")).await;

        assert_eq!(result, Err(SessionError::Forbidden));
        assert!(repo.revisions().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler =
            ReviseSessionHandler::new(Arc::new(StaticLeadership::of(&["u1"])), repo.clone());

        let mut cmd = command("u1");
        cmd.name = "".to_string();

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
        assert!(repo.revisions().is_empty());
    }

    #[tokio::test]
    async fn missing_session_surfaces_not_found() {
        let repo = Arc::new(MockSessionRepository::missing());
        let handler = ReviseSessionHandler::new(Arc::new(StaticLeadership::of(&["u1"])), repo);

        let result = handler.handle(command("u1")).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }
}
