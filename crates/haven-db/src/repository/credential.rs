//! # Credential Repository
//!
//! Database operations for login credentials.
//!
//! Passwords are compared as stored, in plaintext. Hardening the
//! credential store is an explicit non-goal for this system; the checker
//! is an exact (username, password) row match.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use haven_core::Credential;

/// Repository for credential database operations.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    /// Creates a new CredentialRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CredentialRepository { pool }
    }

    /// Finds the credential row exactly matching the login pair.
    ///
    /// Returns `None` for any non-matching input; the caller maps that to
    /// an invalid-login outcome without distinguishing unknown username
    /// from wrong password.
    pub async fn find_by_login(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, password, role
            FROM credentials
            WHERE username = ?1 AND password = ?2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    /// Looks a credential up by username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, password, role
            FROM credentials
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    /// Checks whether a username is already taken.
    ///
    /// Registration pre-checks with this so the user sees a friendly
    /// message; the UNIQUE constraint still backs it up against races.
    pub async fn username_exists(&self, username: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE username = ?1")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Inserts a credential row.
    pub async fn insert(&self, credential: &Credential) -> DbResult<()> {
        debug!(username = %credential.username, role = %credential.role, "Inserting credential");

        sqlx::query(
            r#"
            INSERT INTO credentials (id, username, password, role)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&credential.id)
        .bind(&credential.username)
        .bind(&credential.password)
        .bind(credential.role)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts all credential rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credentials")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
