//! PostgreSQL implementation of ParticipantTracker.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::adapters::postgres::column_error;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::session::{JoinCandidate, Participant};
use crate::ports::ParticipantTracker;

/// PostgreSQL implementation of ParticipantTracker.
#[derive(Clone)]
pub struct PostgresParticipantTracker {
    pool: PgPool,
}

impl PostgresParticipantTracker {
    /// Creates a new PostgresParticipantTracker.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn read_participants(
        &self,
        session_id: &SessionId,
        active_only: bool,
    ) -> Result<Vec<Participant>, DomainError> {
        let mut sql = String::from(
            r#"
            SELECT u.id, u.name, u.avatar, su.active, su.abandoned
            FROM session_users su
            LEFT JOIN users u ON su.user_id = u.id
            WHERE su.session_id = $1
            "#,
        );
        if active_only {
            sql.push_str(" AND su.active = TRUE");
        }
        sql.push_str(" ORDER BY u.name");

        let rows = sqlx::query(&sql)
            .bind(session_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list participants: {}", e),
                )
            })?;

        rows.into_iter().map(row_to_participant).collect()
    }

    async fn stamp_last_active(&self, user_id: &UserId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ParticipantTracker for PostgresParticipantTracker {
    async fn lookup_candidate(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<JoinCandidate, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.name, u.avatar, COALESCE(su.active, FALSE) AS active
            FROM users u
            LEFT JOIN session_users su ON su.user_id = u.id AND su.session_id = $1
            WHERE u.id = $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to look up join candidate: {}", e),
            )
        })?;

        let row = row.ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
        })?;

        let active: bool = row.try_get("active").map_err(|e| column_error("active", e))?;
        if active {
            return Err(DomainError::new(
                ErrorCode::AlreadyActive,
                format!("User {} is already active in session {}", user_id, session_id),
            ));
        }

        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
        let avatar: Option<String> = row.try_get("avatar").map_err(|e| column_error("avatar", e))?;

        Ok(JoinCandidate {
            user_id: UserId::new(id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            name,
            avatar,
        })
    }

    async fn join(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError> {
        // Single conditional upsert: the duplicate check and the state
        // change are one atomic statement. Rejoining after abandonment
        // clears the abandoned flag; an already-active row rejects the
        // write and affects zero rows.
        let result = sqlx::query(
            r#"
            INSERT INTO session_users (session_id, user_id, active, abandoned)
            VALUES ($1, $2, TRUE, FALSE)
            ON CONFLICT (session_id, user_id)
            DO UPDATE SET active = TRUE, abandoned = FALSE
            WHERE session_users.active = FALSE
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to join session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AlreadyActive,
                format!("User {} is already active in session {}", user_id, session_id),
            ));
        }

        self.read_participants(session_id, false).await
    }

    async fn retreat(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError> {
        sqlx::query(
            "UPDATE session_users SET active = FALSE WHERE session_id = $1 AND user_id = $2",
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to retreat from session: {}", e),
            )
        })?;

        // Best effort: a retreat is usually a dropped connection, and the
        // presence flip above is the part that matters.
        if let Err(e) = self.stamp_last_active(user_id).await {
            tracing::warn!(user_id = %user_id, "failed to stamp last_active: {}", e);
        }

        self.read_participants(session_id, false).await
    }

    async fn abandon(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Participant>, DomainError> {
        sqlx::query(
            r#"
            UPDATE session_users SET active = FALSE, abandoned = TRUE
            WHERE session_id = $1 AND user_id = $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to abandon session: {}", e),
            )
        })?;

        self.stamp_last_active(user_id).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to stamp last_active: {}", e),
            )
        })?;

        self.read_participants(session_id, false).await
    }

    async fn list(&self, session_id: &SessionId) -> Result<Vec<Participant>, DomainError> {
        self.read_participants(session_id, false).await
    }

    async fn list_active(&self, session_id: &SessionId) -> Result<Vec<Participant>, DomainError> {
        self.read_participants(session_id, true).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_participant(row: sqlx::postgres::PgRow) -> Result<Participant, DomainError> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let avatar: Option<String> = row.try_get("avatar").map_err(|e| column_error("avatar", e))?;
    let active: bool = row.try_get("active").map_err(|e| column_error("active", e))?;
    let abandoned: bool = row
        .try_get("abandoned")
        .map_err(|e| column_error("abandoned", e))?;

    Ok(Participant {
        user_id: UserId::new(id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        name,
        avatar,
        active,
        abandoned,
    })
}
