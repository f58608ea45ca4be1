//! PostgreSQL implementation of SessionReader.
//!
//! Read-optimized queries assembling session views with their leaders
//! and work items. Participant fan-out stays with the tracker.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::adapters::postgres::column_error;
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, Timestamp, UserId, WorkItemId,
};
use crate::domain::session::{RoundingMode, Session, WorkItem};
use crate::ports::SessionReader;

/// PostgreSQL implementation of SessionReader.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    /// Creates a new PostgresSessionReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn read_work_items(&self, id: &SessionId) -> Result<Vec<WorkItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, reference_id, link, description, acceptance_criteria
            FROM work_items
            WHERE session_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch work items: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_work_item).collect()
    }
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn get_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT s.id, s.name, s.point_values_allowed, s.voting_locked, s.active_item_id,
                   s.auto_finish_voting, s.point_average_rounding, s.created_at,
                   COALESCE(array_agg(sl.user_id) FILTER (WHERE sl.user_id IS NOT NULL), '{}') AS leaders
            FROM sessions s
            LEFT JOIN session_leaders sl ON sl.session_id = s.id
            WHERE s.id = $1
            GROUP BY s.id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let session = row_to_session(row, Vec::new())?;
                let work_items = self.read_work_items(id).await?;
                Ok(Some(session.with_work_items(work_items)))
            }
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.point_values_allowed, s.voting_locked, s.active_item_id,
                   s.auto_finish_voting, s.point_average_rounding, s.created_at,
                   COALESCE((SELECT array_agg(sl.user_id)
                             FROM session_leaders sl
                             WHERE sl.session_id = s.id), '{}') AS leaders,
                   COALESCE((SELECT json_agg(json_build_object(
                                 'id', w.id,
                                 'name', w.name,
                                 'reference_id', w.reference_id,
                                 'link', w.link,
                                 'description', w.description,
                                 'acceptance_criteria', w.acceptance_criteria
                             ) ORDER BY w.created_at)
                             FROM work_items w
                             WHERE w.session_id = s.id), '[]'::json) AS work_items
            FROM sessions s
            JOIN session_users su ON su.session_id = s.id
            WHERE su.user_id = $1 AND su.abandoned = FALSE
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list sessions for user: {}", e),
            )
        })?;

        // A row that fails to map is logged and skipped rather than
        // failing the whole listing.
        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            let work_items: Json<Vec<WorkItem>> = match row
                .try_get("work_items")
                .map_err(|e| column_error("work_items", e))
            {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("skipping session row in user listing: {}", e);
                    continue;
                }
            };

            match row_to_session(row, work_items.0) {
                Ok(session) => sessions.push(session),
                Err(e) => tracing::warn!("skipping session row in user listing: {}", e),
            }
        }

        Ok(sessions)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_session(
    row: sqlx::postgres::PgRow,
    work_items: Vec<WorkItem>,
) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;

    let point_values: Json<Vec<String>> = row
        .try_get("point_values_allowed")
        .map_err(|e| column_error("point_values_allowed", e))?;

    let voting_locked: bool = row
        .try_get("voting_locked")
        .map_err(|e| column_error("voting_locked", e))?;

    let active_item_id: Option<uuid::Uuid> = row
        .try_get("active_item_id")
        .map_err(|e| column_error("active_item_id", e))?;

    let auto_finish_voting: bool = row
        .try_get("auto_finish_voting")
        .map_err(|e| column_error("auto_finish_voting", e))?;

    let rounding_str: String = row
        .try_get("point_average_rounding")
        .map_err(|e| column_error("point_average_rounding", e))?;
    let rounding = RoundingMode::parse(&rounding_str).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid rounding mode: {}", e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    let leader_ids: Vec<String> = row.try_get("leaders").map_err(|e| column_error("leaders", e))?;
    let leaders: Result<Vec<UserId>, DomainError> = leader_ids
        .into_iter()
        .map(|id| {
            UserId::new(id).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid leader user_id: {}", e),
                )
            })
        })
        .collect();

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        name,
        point_values.0,
        voting_locked,
        active_item_id.map(WorkItemId::from_uuid),
        auto_finish_voting,
        rounding,
        leaders?,
        Vec::new(),
        work_items,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_work_item(row: sqlx::postgres::PgRow) -> Result<WorkItem, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let reference_id: Option<String> = row
        .try_get("reference_id")
        .map_err(|e| column_error("reference_id", e))?;
    let link: Option<String> = row.try_get("link").map_err(|e| column_error("link", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| column_error("description", e))?;
    let acceptance_criteria: Option<String> = row
        .try_get("acceptance_criteria")
        .map_err(|e| column_error("acceptance_criteria", e))?;

    Ok(WorkItem {
        id: WorkItemId::from_uuid(id),
        name,
        reference_id,
        link,
        description,
        acceptance_criteria,
    })
}
