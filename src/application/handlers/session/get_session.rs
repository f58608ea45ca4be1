//! GetSessionHandler - assembles the full session view.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::{ParticipantTracker, SessionReader};

/// Query for one session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler composing the reader view with the participant listing.
pub struct GetSessionHandler {
    reader: Arc<dyn SessionReader>,
    participants: Arc<dyn ParticipantTracker>,
}

impl GetSessionHandler {
    pub fn new(reader: Arc<dyn SessionReader>, participants: Arc<dyn ParticipantTracker>) -> Self {
        Self {
            reader,
            participants,
        }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        let session = self
            .reader
            .get_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id.to_string()))?;

        // The participant listing is best effort: the session view is
        // still served if the refresh fails.
        let participants = match self.participants.list(&query.session_id).await {
            Ok(participants) => participants,
            Err(e) => {
                tracing::warn!(
                    session_id = %query.session_id,
                    "failed to load participants: {}",
                    e
                );
                Vec::new()
            }
        };

        Ok(session.with_participants(participants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, UserId};
    use crate::domain::session::{JoinCandidate, Participant, RoundingMode};
    use async_trait::async_trait;

    struct MockSessionReader {
        session: Option<Session>,
    }

    #[async_trait]
    impl SessionReader for MockSessionReader {
        async fn get_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(self.session.clone())
        }

        async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<Session>, DomainError> {
            Ok(Vec::new())
        }
    }

    struct MockParticipantTracker {
        participants: Vec<Participant>,
        fail_list: bool,
    }

    #[async_trait]
    impl ParticipantTracker for MockParticipantTracker {
        async fn lookup_candidate(
            &self,
            _session_id: &SessionId,
            user_id: &UserId,
        ) -> Result<JoinCandidate, DomainError> {
            Ok(JoinCandidate {
                user_id: user_id.clone(),
                name: "Someone".to_string(),
                avatar: None,
            })
        }

        async fn join(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<Vec<Participant>, DomainError> {
            Ok(self.participants.clone())
        }

        async fn retreat(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<Vec<Participant>, DomainError> {
            Ok(self.participants.clone())
        }

        async fn abandon(
            &self,
            _session_id: &SessionId,
            _user_id: &UserId,
        ) -> Result<Vec<Participant>, DomainError> {
            Ok(self.participants.clone())
        }

        async fn list(&self, _session_id: &SessionId) -> Result<Vec<Participant>, DomainError> {
            if self.fail_list {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated listing failure",
                ));
            }
            Ok(self.participants.clone())
        }

        async fn list_active(
            &self,
            _session_id: &SessionId,
        ) -> Result<Vec<Participant>, DomainError> {
            Ok(self.participants.clone())
        }
    }

    fn stored_session() -> Session {
        Session::new(
            SessionId::new(),
            UserId::new("u1").unwrap(),
            "Backlog review".to_string(),
            vec!["1".into(), "2".into()],
            true,
            RoundingMode::Ceil,
        )
        .unwrap()
    }

    fn participant(id: &str, name: &str) -> Participant {
        Participant {
            user_id: UserId::new(id).unwrap(),
            name: name.to_string(),
            avatar: None,
            active: true,
            abandoned: false,
        }
    }

    #[tokio::test]
    async fn assembles_session_with_participants() {
        let session = stored_session();
        let session_id = *session.id();
        let handler = GetSessionHandler::new(
            Arc::new(MockSessionReader {
                session: Some(session),
            }),
            Arc::new(MockParticipantTracker {
                participants: vec![participant("u1", "Ada"), participant("u2", "Grace")],
                fail_list: false,
            }),
        );

        let view = handler.handle(GetSessionQuery { session_id }).await.unwrap();

        assert_eq!(view.participants().len(), 2);
        assert_eq!(view.participants()[0].name, "Ada");
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let handler = GetSessionHandler::new(
            Arc::new(MockSessionReader { session: None }),
            Arc::new(MockParticipantTracker {
                participants: Vec::new(),
                fail_list: false,
            }),
        );

        let result = handler
            .handle(GetSessionQuery {
                session_id: SessionId::new(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn participant_listing_failure_degrades_to_empty() {
        let session = stored_session();
        let session_id = *session.id();
        let handler = GetSessionHandler::new(
            Arc::new(MockSessionReader {
                session: Some(session),
            }),
            Arc::new(MockParticipantTracker {
                participants: vec![participant("u1", "Ada")],
                fail_list: true,
            }),
        );

        let view = handler.handle(GetSessionQuery { session_id }).await.unwrap();

        assert!(view.participants().is_empty());
    }
}
