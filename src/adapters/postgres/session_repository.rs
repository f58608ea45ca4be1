//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, WorkItemId};
use crate::domain::session::{NewWorkItem, Session, WorkItem};
use crate::ports::{SessionRepository, SessionRevision};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(
        &self,
        session: &Session,
        work_items: &[NewWorkItem],
    ) -> Result<Vec<WorkItem>, DomainError> {
        // Root row and the creator's leader record commit together; the
        // session must never exist without a leader.
        let mut tx = self.pool.begin().await.map_err(creation_error)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, name, point_values_allowed, voting_locked, active_item_id,
                auto_finish_voting, point_average_rounding, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.name())
        .bind(Json(session.point_values_allowed()))
        .bind(session.voting_locked())
        .bind(session.active_item_id().map(|id| *id.as_uuid()))
        .bind(session.auto_finish_voting())
        .bind(session.point_average_rounding().as_str())
        .bind(session.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(creation_error)?;

        for leader in session.leaders() {
            sqlx::query(
                "INSERT INTO session_leaders (session_id, user_id) VALUES ($1, $2)",
            )
            .bind(session.id().as_uuid())
            .bind(leader.as_str())
            .execute(&mut *tx)
            .await
            .map_err(creation_error)?;
        }

        tx.commit().await.map_err(creation_error)?;

        // Work items are best effort: a failing item is logged and
        // skipped, never failing the session that already exists.
        let mut persisted = Vec::with_capacity(work_items.len());
        for item in work_items {
            let id = WorkItemId::new();
            let result = sqlx::query(
                r#"
                INSERT INTO work_items (
                    id, session_id, name, reference_id, link, description, acceptance_criteria
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(id.as_uuid())
            .bind(session.id().as_uuid())
            .bind(&item.name)
            .bind(item.reference_id.as_deref())
            .bind(item.link.as_deref())
            .bind(item.description.as_deref())
            .bind(item.acceptance_criteria.as_deref())
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => persisted.push(item.clone().into_work_item(id)),
                Err(e) => {
                    tracing::warn!(
                        session_id = %session.id(),
                        item_name = %item.name,
                        "failed to persist work item: {}",
                        e
                    );
                }
            }
        }

        Ok(persisted)
    }

    async fn revise(&self, id: &SessionId, revision: &SessionRevision) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                name = $2,
                point_values_allowed = $3,
                auto_finish_voting = $4,
                point_average_rounding = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&revision.name)
        .bind(Json(&revision.point_values_allowed))
        .bind(revision.auto_finish_voting)
        .bind(revision.point_average_rounding.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to revise session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        // Dependent rows go first, then the root, all in one transaction.
        let mut tx = self.pool.begin().await.map_err(delete_error)?;

        sqlx::query("DELETE FROM work_items WHERE session_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(delete_error)?;

        sqlx::query("DELETE FROM session_users WHERE session_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(delete_error)?;

        sqlx::query("DELETE FROM session_leaders WHERE session_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(delete_error)?;

        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        tx.commit().await.map_err(delete_error)?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn creation_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::CreationFailed,
        format!("Failed to create session: {}", e),
    )
}

fn delete_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to delete session: {}", e),
    )
}
