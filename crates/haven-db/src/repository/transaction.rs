//! # Transaction Repository
//!
//! Database operations for completed rent/buy transactions and their
//! payment receipts. The writes themselves happen inside the purchase
//! workflow's transaction; this repository serves history views, seeding
//! and diagnostics.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use haven_core::{PropertyTransaction, Receipt};

/// A customer-facing history row: the receipt joined with the property
/// it paid for.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseRecord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub receipt: Receipt,

    /// Listing kind of the transaction, `sale` or `rent`.
    pub listing: haven_core::ListingKind,

    /// Street of the purchased property.
    pub street: String,

    /// City of the purchased property.
    pub city: String,
}

/// Repository for transaction and receipt database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts a transaction row.
    pub async fn insert_transaction(&self, transaction: &PropertyTransaction) -> DbResult<()> {
        debug!(
            transaction_id = %transaction.id,
            property_id = %transaction.property_id,
            "Inserting property transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO property_transactions (id, customer_id, property_id, listing, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.customer_id)
        .bind(&transaction.property_id)
        .bind(transaction.listing)
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a receipt row.
    pub async fn insert_receipt(&self, receipt: &Receipt) -> DbResult<()> {
        debug!(receipt_id = %receipt.id, amount_cents = receipt.amount_cents, "Inserting receipt");

        sqlx::query(
            r#"
            INSERT INTO receipts
                (id, property_id, customer_id, amount_cents, payment_status, payment_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.property_id)
        .bind(&receipt.customer_id)
        .bind(receipt.amount_cents)
        .bind(receipt.payment_status)
        .bind(receipt.payment_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists a customer's purchase history, newest payment first.
    pub async fn history(&self, customer_id: &str) -> DbResult<Vec<PurchaseRecord>> {
        let records = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT rc.id, rc.property_id, rc.customer_id, rc.amount_cents,
                   rc.payment_status, rc.payment_date,
                   pt.listing, p.street, p.city
            FROM receipts rc
            JOIN properties p ON p.id = rc.property_id
            JOIN property_transactions pt
                ON pt.property_id = rc.property_id AND pt.customer_id = rc.customer_id
            WHERE rc.customer_id = ?1
            ORDER BY rc.payment_date DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lists the transaction rows touching one property.
    pub async fn list_for_property(&self, property_id: &str) -> DbResult<Vec<PropertyTransaction>> {
        let transactions = sqlx::query_as::<_, PropertyTransaction>(
            r#"
            SELECT id, customer_id, property_id, listing, created_at
            FROM property_transactions
            WHERE property_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Lists the receipts issued to one customer.
    pub async fn receipts_for_customer(&self, customer_id: &str) -> DbResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, property_id, customer_id, amount_cents, payment_status, payment_date
            FROM receipts
            WHERE customer_id = ?1
            ORDER BY payment_date DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }
}
