//! Repository for the `reports` table.
//!
//! Owner-scoped mutations are single `UPDATE ... WHERE report_id AND user_id`
//! statements, so an update against another user's report affects zero rows
//! and surfaces as "not found" without a separate existence probe, and
//! read-modify-write races cannot interleave.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::report::{
    CreateReport, MonthlyReportCount, MonthlyStateCount, Report, ReportFilter, ReportWithType,
    StateReportCount, UpdateReport,
};

/// Column list shared across single-table queries.
const COLUMNS: &str = "report_id, title, description, address, state, report_type_id, \
                       image_id, user_id, state_change_at, created_at, updated_at, deleted_at";

/// Column list for queries joined with `report_types` (aliased `r` / `t`).
const JOINED_COLUMNS: &str = "r.report_id, r.title, r.description, r.address, r.state, \
                              r.report_type_id, t.name AS type_name, r.image_id, r.user_id, \
                              r.state_change_at, r.created_at, r.updated_at";

/// Escape LIKE metacharacters so a filter value matches literally. Postgres
/// treats backslash as the default escape character.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Provides CRUD, lifecycle, and aggregate operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report owned by `user_id`. State is forced to `OPENED`
    /// and `state_change_at` is left NULL regardless of caller input.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        image_id: Option<Uuid>,
        input: &CreateReport,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (title, description, address, state, report_type_id, image_id, user_id)
             VALUES ($1, $2, $3, 'OPENED', $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.report_type_id)
            .bind(image_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        tracing::debug!(report_id = %report.report_id, user_id = %user_id, "Report row inserted");
        Ok(report)
    }

    /// Find a non-deleted report by ID, joined with its type name.
    pub async fn find_with_type(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<ReportWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM reports r
             JOIN report_types t ON t.report_type_id = r.report_type_id
             WHERE r.report_id = $1 AND r.deleted_at IS NULL"
        );
        sqlx::query_as::<_, ReportWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted reports matching the filter, newest first.
    ///
    /// The free-text query ORs a case-insensitive substring match over title
    /// and description; `%`, `_`, and `\` in the value match literally. All
    /// other filters AND together.
    pub async fn list(
        pool: &PgPool,
        filter: &ReportFilter,
    ) -> Result<Vec<ReportWithType>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {JOINED_COLUMNS}
             FROM reports r
             JOIN report_types t ON t.report_type_id = r.report_type_id
             WHERE r.deleted_at IS NULL"
        ));

        if let Some(ref q) = filter.query {
            let pattern = format!("%{}%", escape_like(q));
            builder.push(" AND (r.title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR r.description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(ref state) = filter.state {
            builder.push(" AND r.state = ");
            builder.push_bind(state.clone());
        }

        if let Some(type_id) = filter.type_id {
            builder.push(" AND r.report_type_id = ");
            builder.push_bind(type_id);
        }

        builder.push(" ORDER BY r.created_at DESC");

        builder
            .build_query_as::<ReportWithType>()
            .fetch_all(pool)
            .await
    }

    /// List the non-deleted reports owned by a user, newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ReportWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM reports r
             JOIN report_types t ON t.report_type_id = r.report_type_id
             WHERE r.user_id = $1 AND r.deleted_at IS NULL
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, ReportWithType>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set a report's state and stamp `state_change_at`. Returns the updated
    /// row, or `None` if the report is absent or soft-deleted.
    ///
    /// No adjacency constraint: any state may be set from any state. The
    /// lifecycle is advisory and the admin endpoints are the only callers.
    pub async fn set_state(
        pool: &PgPool,
        id: Uuid,
        state: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET
                state = $2,
                state_change_at = NOW(),
                updated_at = NOW()
             WHERE report_id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(state)
            .fetch_optional(pool)
            .await?;
        if row.is_some() {
            tracing::debug!(report_id = %id, state, "Report state updated");
        }
        Ok(row)
    }

    /// Owner-scoped partial update. Only non-`None` fields are applied; state
    /// and `state_change_at` are never touched. Returns `None` when no live
    /// row matches `(report_id, user_id)` -- including another user's report.
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        input: &UpdateReport,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                report_type_id = COALESCE($6, report_type_id),
                image_id = COALESCE($7, image_id),
                updated_at = NOW()
             WHERE report_id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.report_type_id)
            .bind(input.image_id)
            .fetch_optional(pool)
            .await
    }

    /// Owner-scoped soft delete. Returns `true` if a row was marked; `false`
    /// covers both "absent" and "owned by someone else".
    pub async fn soft_delete_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reports SET deleted_at = NOW(), updated_at = NOW()
             WHERE report_id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(report_id = %id, "Report row soft-deleted");
        }
        Ok(deleted)
    }

    /// Total number of non-deleted reports.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reports WHERE deleted_at IS NULL")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Live reports grouped by current state. States with no reports do not
    /// appear.
    pub async fn count_by_state(pool: &PgPool) -> Result<Vec<StateReportCount>, sqlx::Error> {
        sqlx::query_as::<_, StateReportCount>(
            "SELECT state, COUNT(report_id) AS reports
             FROM reports
             WHERE deleted_at IS NULL
             GROUP BY state
             ORDER BY state ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Reports created per calendar month, ascending chronological order.
    pub async fn count_by_month(pool: &PgPool) -> Result<Vec<MonthlyReportCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyReportCount>(
            "SELECT COUNT(report_id) AS reports,
                    EXTRACT(YEAR FROM DATE_TRUNC('month', created_at))::INT4 AS year,
                    EXTRACT(MONTH FROM DATE_TRUNC('month', created_at))::INT4 AS month
             FROM reports
             WHERE deleted_at IS NULL
             GROUP BY DATE_TRUNC('month', created_at)
             ORDER BY DATE_TRUNC('month', created_at) ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Reports per (month of last state change, state), ascending by month.
    /// Rows that never transitioned (`state_change_at` NULL) are excluded.
    pub async fn count_by_state_and_month(
        pool: &PgPool,
    ) -> Result<Vec<MonthlyStateCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyStateCount>(
            "SELECT COUNT(report_id) AS reports,
                    EXTRACT(YEAR FROM DATE_TRUNC('month', state_change_at))::INT4 AS year,
                    EXTRACT(MONTH FROM DATE_TRUNC('month', state_change_at))::INT4 AS month,
                    state
             FROM reports
             WHERE deleted_at IS NULL AND state_change_at IS NOT NULL
             GROUP BY DATE_TRUNC('month', state_change_at), state
             ORDER BY DATE_TRUNC('month', state_change_at) ASC",
        )
        .fetch_all(pool)
        .await
    }
}
