//! PostgreSQL implementation of LeadershipManager.
//!
//! The reference system routed promotion and demotion through stored
//! procedures; here both are single guarded statements with the same
//! atomicity.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::ports::LeadershipManager;

/// PostgreSQL implementation of LeadershipManager.
#[derive(Clone)]
pub struct PostgresLeadershipManager {
    pool: PgPool,
}

impl PostgresLeadershipManager {
    /// Creates a new PostgresLeadershipManager.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn read_leaders(&self, session_id: &SessionId) -> Result<Vec<UserId>, DomainError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT user_id FROM session_leaders WHERE session_id = $1 ORDER BY user_id",
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list leaders: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|(id,)| {
                UserId::new(id).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid leader user_id: {}", e),
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl LeadershipManager for PostgresLeadershipManager {
    async fn is_leader(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        // Fails closed: no matching row reads as "not a leader".
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM session_leaders WHERE session_id = $1 AND user_id = $2)",
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check leadership: {}", e),
            )
        })?;

        Ok(exists)
    }

    async fn promote(
        &self,
        session_id: &SessionId,
        candidate: &UserId,
    ) -> Result<Vec<UserId>, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO session_leaders (session_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (session_id, user_id) DO NOTHING
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(candidate.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to promote leader: {}", e),
            )
        })?;

        self.read_leaders(session_id).await
    }

    async fn demote(
        &self,
        session_id: &SessionId,
        target: &UserId,
    ) -> Result<Vec<UserId>, DomainError> {
        // The guard subquery runs inside the DELETE itself, so the
        // leader-count check and the removal are one atomic statement.
        // Two concurrent demotions of the last two leaders cannot both
        // pass the guard.
        let result = sqlx::query(
            r#"
            DELETE FROM session_leaders
            WHERE session_id = $1 AND user_id = $2
              AND (SELECT COUNT(*) FROM session_leaders sl WHERE sl.session_id = $1) > 1
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(target.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to demote leader: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            // Either the guard tripped or the target was never a leader.
            if self.is_leader(session_id, target).await? {
                return Err(DomainError::new(
                    ErrorCode::LastLeader,
                    format!("Cannot demote the only remaining leader of {}", session_id),
                ));
            }
        }

        self.read_leaders(session_id).await
    }

    async fn list(&self, session_id: &SessionId) -> Result<Vec<UserId>, DomainError> {
        self.read_leaders(session_id).await
    }
}
