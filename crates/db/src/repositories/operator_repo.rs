//! Repository for the `operators` table.

use sqlx::{PgExecutor, PgPool};
use voskhod_core::roles::ROLE_ADMIN;
use voskhod_core::types::DbId;

use crate::models::operator::{CreateOperator, Operator, UpdateOperator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, full_name, inn, role, password_hash, is_active, \
                        last_login_at, last_logout_at, created_at, updated_at";

/// Provides CRUD operations for operator accounts.
pub struct OperatorRepo;

impl OperatorRepo {
    /// Insert a new active operator, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOperator) -> Result<Operator, sqlx::Error> {
        let query = format!(
            "INSERT INTO operators (username, full_name, inn, role, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.inn)
            .bind(&input.role)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find an operator by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators WHERE id = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an operator by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators WHERE username = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List operators, optionally restricted to one role, ordered by username.
    pub async fn list(pool: &PgPool, role: Option<&str>) -> Result<Vec<Operator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM operators
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY username"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Update an operator. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOperator,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!(
            "UPDATE operators SET
                full_name = COALESCE($2, full_name),
                inn = COALESCE($3, inn),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.inn)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an operator. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while the operator still has
    /// tickets on record.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM operators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE operators SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Set `last_logout_at` to now.
    pub async fn record_logout<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE operators SET last_logout_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Stamp `last_logout_at` on every active non-administration account.
    ///
    /// Returns the ids of the affected operators.
    pub async fn record_logout_all_staff<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE operators SET last_logout_at = NOW()
             WHERE is_active = true AND role <> $1
             RETURNING id",
        )
        .bind(ROLE_ADMIN)
        .fetch_all(executor)
        .await
    }

    /// Update an operator's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE operators SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
