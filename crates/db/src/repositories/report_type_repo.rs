//! Repository for the `report_types` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::report_type::{CreateReportType, ReportType, TypeReportCount, UpdateReportType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "report_type_id, name, description, created_at, updated_at, deleted_at";

/// How many entries the "most reported types" aggregate returns.
const MOST_REPORTED_LIMIT: i64 = 5;

/// Provides CRUD and aggregate operations for the report taxonomy.
pub struct ReportTypeRepo;

impl ReportTypeRepo {
    /// Insert a new report type, returning the created row. A duplicate name
    /// violates `uq_report_types_name`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReportType,
    ) -> Result<ReportType, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_types (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let report_type = sqlx::query_as::<_, ReportType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await?;
        tracing::debug!(report_type_id = %report_type.report_type_id, "Report type row inserted");
        Ok(report_type)
    }

    /// Upsert by name for seeding: the same name twice yields exactly one row.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        description: &str,
    ) -> Result<ReportType, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_types (name, description)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_report_types_name
             DO UPDATE SET description = EXCLUDED.description, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportType>(&query)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted report type by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ReportType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM report_types WHERE report_type_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, ReportType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted report type by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<ReportType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM report_types WHERE name = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, ReportType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all non-deleted report types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ReportType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM report_types WHERE deleted_at IS NULL ORDER BY name ASC"
        );
        sqlx::query_as::<_, ReportType>(&query).fetch_all(pool).await
    }

    /// Partial update. Only non-`None` fields are applied; `updated_at` is
    /// stamped. Returns `None` if no live row matches.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &UpdateReportType,
    ) -> Result<Option<ReportType>, sqlx::Error> {
        let query = format!(
            "UPDATE report_types SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE report_type_id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a report type. Returns `true` if a row was marked.
    ///
    /// Callers must check [`Self::count_reports`] first: a type that is still
    /// referenced by any report may not be deleted.
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE report_types SET deleted_at = NOW(), updated_at = NOW()
             WHERE report_type_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(report_type_id = %id, "Report type row soft-deleted");
        }
        Ok(deleted)
    }

    /// Count the reports referencing a type, including soft-deleted reports.
    /// A soft-deleted report still pins its type.
    pub async fn count_reports(pool: &PgPool, id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reports WHERE report_type_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// The top 5 type names by descending associated-report count.
    pub async fn most_reported(pool: &PgPool) -> Result<Vec<TypeReportCount>, sqlx::Error> {
        sqlx::query_as::<_, TypeReportCount>(
            "SELECT t.name AS type_name, COUNT(r.report_id) AS reports
             FROM report_types t
             LEFT JOIN reports r ON r.report_type_id = t.report_type_id
             WHERE t.deleted_at IS NULL
             GROUP BY t.name
             ORDER BY reports DESC, t.name ASC
             LIMIT $1",
        )
        .bind(MOST_REPORTED_LIMIT)
        .fetch_all(pool)
        .await
    }
}
