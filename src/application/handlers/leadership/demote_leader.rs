//! DemoteLeaderHandler - removes a leader without ever leaving the
//! session leaderless.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::SessionError;
use crate::ports::LeadershipManager;

/// Command to demote a leader.
#[derive(Debug, Clone)]
pub struct DemoteLeaderCommand {
    pub session_id: SessionId,
    pub requester: UserId,
    pub target: UserId,
}

/// Handler for demoting leaders.
pub struct DemoteLeaderHandler {
    leadership: Arc<dyn LeadershipManager>,
}

impl DemoteLeaderHandler {
    pub fn new(leadership: Arc<dyn LeadershipManager>) -> Self {
        Self { leadership }
    }

    /// Demotes the target. A demotion that would empty the leader set
    /// fails with `LastLeader` and changes nothing; demoting a non-leader
    /// is a no-op. Returns the complete, freshly-read leader list.
    pub async fn handle(&self, cmd: DemoteLeaderCommand) -> Result<Vec<UserId>, SessionError> {
        if !self
            .leadership
            .is_leader(&cmd.session_id, &cmd.requester)
            .await?
        {
            return Err(SessionError::forbidden());
        }

        let leaders = self.leadership.demote(&cmd.session_id, &cmd.target).await?;

        Ok(leaders)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stateful in-memory leader set mirroring the storage guard
    /// semantics, shared with the promote handler tests.
    pub(crate) struct InMemoryLeadership {
        leaders: Mutex<Vec<UserId>>,
    }

    impl InMemoryLeadership {
        pub(crate) fn of(leaders: &[&str]) -> Self {
            Self {
                leaders: Mutex::new(leaders.iter().map(|l| UserId::new(*l).unwrap()).collect()),
            }
        }

        pub(crate) fn snapshot(&self) -> Vec<UserId> {
            self.leaders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LeadershipManager for InMemoryLeadership {
        async fn is_leader(
            &self,
            _session_id: &SessionId,
            user_id: &UserId,
        ) -> Result<bool, DomainError> {
            Ok(self.leaders.lock().unwrap().contains(user_id))
        }

        async fn promote(
            &self,
            _session_id: &SessionId,
            candidate: &UserId,
        ) -> Result<Vec<UserId>, DomainError> {
            let mut leaders = self.leaders.lock().unwrap();
            if !leaders.contains(candidate) {
                leaders.push(candidate.clone());
            }
            Ok(leaders.clone())
        }

        async fn demote(
            &self,
            _session_id: &SessionId,
            target: &UserId,
        ) -> Result<Vec<UserId>, DomainError> {
            let mut leaders = self.leaders.lock().unwrap();
            if leaders.contains(target) {
                if leaders.len() == 1 {
                    return Err(DomainError::new(
                        ErrorCode::LastLeader,
                        "Cannot demote the only remaining leader",
                    ));
                }
                leaders.retain(|l| l != target);
            }
            Ok(leaders.clone())
        }

        async fn list(&self, _session_id: &SessionId) -> Result<Vec<UserId>, DomainError> {
            Ok(self.leaders.lock().unwrap().clone())
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn leader_can_demote_another_leader() {
        let leadership = Arc::new(InMemoryLeadership::of(&["u1", "u2"]));
        let handler = DemoteLeaderHandler::new(leadership);

        let leaders = handler
            .handle(DemoteLeaderCommand {
                session_id: SessionId::new(),
                requester: user("u2"),
                target: user("u1"),
            })
            .await
            .unwrap();

        assert_eq!(leaders, vec![user("u2")]);
    }

    #[tokio::test]
    async fn demoting_last_leader_is_rejected() {
        let leadership = Arc::new(InMemoryLeadership::of(&["u1"]));
        let handler = DemoteLeaderHandler::new(leadership.clone());

        let result = handler
            .handle(DemoteLeaderCommand {
                session_id: SessionId::new(),
                requester: user("u1"),
                target: user("u1"),
            })
            .await;

        assert_eq!(result, Err(SessionError::LastLeader));
        assert_eq!(leadership.snapshot(), vec![user("u1")]);
    }

    #[tokio::test]
    async fn demoting_non_leader_is_noop() {
        let leadership = Arc::new(InMemoryLeadership::of(&["u1", "u2"]));
        let handler = DemoteLeaderHandler::new(leadership);

        let leaders = handler
            .handle(DemoteLeaderCommand {
                session_id: SessionId::new(),
                requester: user("u1"),
                target: user("bystander"),
            })
            .await
            .unwrap();

        assert_eq!(leaders, vec![user("u1"), user("u2")]);
    }

    #[tokio::test]
    async fn non_leader_cannot_demote() {
        let leadership = Arc::new(InMemoryLeadership::of(&["u1"]));
        let handler = DemoteLeaderHandler::new(leadership);

        let result = handler
            .handle(DemoteLeaderCommand {
                session_id: SessionId::new(),
                requester: user("outsider"),
                target: user("u1"),
            })
            .await;

        assert_eq!(result, Err(SessionError::Forbidden));
    }
}
