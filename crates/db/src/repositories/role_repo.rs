//! Repository for the `roles` table and the `user_roles` join.

use civica_core::types::RoleId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides role lookups, idempotent seeding, and user-role assignment.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Upsert a role by name. Seeding the same name twice yields one row.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name, description)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_roles_name
             DO UPDATE SET description = COALESCE(EXCLUDED.description, roles.description)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Grant a role to a user. Idempotent: re-granting is a no-op.
    pub async fn assign_to_user(
        pool: &PgPool,
        user_id: Uuid,
        role_id: RoleId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Resolve the role names held by a user, ordered by role id.
    pub async fn names_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT r.name
             FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Whether any user currently holds the given role. Used by the seeder to
    /// decide if a default admin account is needed.
    pub async fn any_user_has_role(pool: &PgPool, role_id: RoleId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM user_roles WHERE role_id = $1)")
                .bind(role_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
