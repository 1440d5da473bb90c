//! # Homeowner Repository
//!
//! Database operations for homeowner profiles.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use haven_core::{HomeOwner, VerificationStatus};

/// Repository for homeowner database operations.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    pool: SqlitePool,
}

impl OwnerRepository {
    /// Creates a new OwnerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OwnerRepository { pool }
    }

    /// Gets a homeowner profile by id.
    pub async fn get_by_id(&self, owner_id: &str) -> DbResult<Option<HomeOwner>> {
        let owner = sqlx::query_as::<_, HomeOwner>(
            r#"
            SELECT owner_id, username, first_name, last_name, email, phone, verification_status
            FROM home_owners
            WHERE owner_id = ?1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Gets a homeowner profile by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<HomeOwner>> {
        let owner = sqlx::query_as::<_, HomeOwner>(
            r#"
            SELECT owner_id, username, first_name, last_name, email, phone, verification_status
            FROM home_owners
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Lists all homeowners, newest username last.
    pub async fn list_all(&self) -> DbResult<Vec<HomeOwner>> {
        let owners = sqlx::query_as::<_, HomeOwner>(
            r#"
            SELECT owner_id, username, first_name, last_name, email, phone, verification_status
            FROM home_owners
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    /// Inserts a homeowner profile row.
    ///
    /// The matching credential row must already exist; registration runs
    /// both inserts inside one transaction at the workflow level.
    pub async fn insert(&self, owner: &HomeOwner) -> DbResult<()> {
        debug!(owner_id = %owner.owner_id, username = %owner.username, "Inserting homeowner");

        sqlx::query(
            r#"
            INSERT INTO home_owners
                (owner_id, username, first_name, last_name, email, phone, verification_status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&owner.owner_id)
        .bind(&owner.username)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.email)
        .bind(&owner.phone)
        .bind(owner.verification_status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets an owner's verification status (admin action).
    ///
    /// Errors with NotFound when no such owner exists, via the
    /// affected-rows check.
    pub async fn set_verification_status(
        &self,
        owner_id: &str,
        status: VerificationStatus,
    ) -> DbResult<()> {
        debug!(owner_id = %owner_id, status = %status, "Updating verification status");

        let result = sqlx::query(
            r#"
            UPDATE home_owners
            SET verification_status = ?1
            WHERE owner_id = ?2
            "#,
        )
        .bind(status)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("HomeOwner", owner_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::test_support::seed_owner;
    use haven_core::VerificationStatus;

    #[tokio::test]
    async fn test_insert_and_get_owner() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;

        let found = db.owners().get_by_id(&owner.owner_id).await.unwrap();
        assert!(found.is_some());
        let found = found.unwrap();
        assert_eq!(found.username, "owner.tom");
        assert_eq!(found.verification_status, VerificationStatus::Pending);
        assert_eq!(found.full_name(), "Tom Brown");
    }

    #[tokio::test]
    async fn test_set_verification_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;

        db.owners()
            .set_verification_status(&owner.owner_id, VerificationStatus::Verified)
            .await
            .unwrap();

        let found = db.owners().get_by_id(&owner.owner_id).await.unwrap().unwrap();
        assert_eq!(found.verification_status, VerificationStatus::Verified);
    }

    #[tokio::test]
    async fn test_set_verification_status_unknown_owner() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let result = db
            .owners()
            .set_verification_status("no-such-id", VerificationStatus::Verified)
            .await;
        assert!(result.is_err());
    }
}
