//! # Customer Repository
//!
//! Database operations for customer profiles, including the full account
//! removal used by administrators.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use haven_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer profile by id.
    pub async fn get_by_id(&self, customer_id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT customer_id, username, first_name, last_name, email, phone
            FROM customers
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer profile by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT customer_id, username, first_name, last_name, email, phone
            FROM customers
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists all customers ordered by username.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT customer_id, username, first_name, last_name, email, phone
            FROM customers
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Inserts a customer profile row.
    ///
    /// The matching credential row must already exist; registration runs
    /// both inserts inside one transaction at the workflow level.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(customer_id = %customer.customer_id, username = %customer.username, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (customer_id, username, first_name, last_name, email, phone)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.customer_id)
        .bind(&customer.username)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a customer account and everything hanging off it, in one
    /// transaction: sharing interests, property transactions, receipts,
    /// the profile row and the credential row.
    ///
    /// Deleting the credential cascades to the profile; the history
    /// tables are cleared explicitly so no orphan rows survive.
    pub async fn delete_cascade(&self, customer_id: &str) -> DbResult<()> {
        info!(customer_id = %customer_id, "Deleting customer account");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sharing_interests WHERE customer_id = ?1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM property_transactions WHERE customer_id = ?1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM receipts WHERE customer_id = ?1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM credentials WHERE id = ?1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer_id));
        }

        tx.commit().await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::test_support::seed_customer;

    #[tokio::test]
    async fn test_insert_and_get_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db, "john.doe", "pass123", "John", "Doe").await;

        let found = db
            .customers()
            .get_by_username("john.doe")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.customer_id, customer.customer_id);
        assert_eq!(found.full_name(), "John Doe");
    }

    #[tokio::test]
    async fn test_delete_cascade_removes_profile_and_credential() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db, "john.doe", "pass123", "John", "Doe").await;

        db.customers()
            .delete_cascade(&customer.customer_id)
            .await
            .unwrap();

        assert!(db
            .customers()
            .get_by_id(&customer.customer_id)
            .await
            .unwrap()
            .is_none());
        assert!(db
            .credentials()
            .find_by_username("john.doe")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_cascade_unknown_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = db.customers().delete_cascade("no-such-id").await;
        assert!(result.is_err());
    }
}
