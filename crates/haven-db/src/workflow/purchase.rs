//! # Purchase Workflow
//!
//! The customer's rent-now/buy-now action. Availability is flipped with
//! a conditional update inside the same transaction that records the
//! deal, so two customers confirming the same property race on a single
//! row: exactly one update matches, the loser's transaction writes
//! nothing and rolls back.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pool::Database;
use crate::workflow::{require_role, WorkflowError, WorkflowResult};
use haven_core::{PaymentStatus, PropertyTransaction, Receipt, Role, Session};

/// The records produced by a completed purchase.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub transaction: PropertyTransaction,
    pub receipt: Receipt,
}

/// Rents or buys a property for the acting customer.
///
/// The settled amount follows the listing kind: monthly rent for a
/// rental, asking price for a sale. The receipt is written as completed
/// immediately; there is no payment gateway in the loop.
pub async fn execute(
    db: &Database,
    session: &Session,
    property_id: &str,
) -> WorkflowResult<Purchase> {
    require_role(session, Role::Customer)?;

    let property = db
        .properties()
        .get_by_id(property_id)
        .await?
        .ok_or_else(|| WorkflowError::PropertyNotFound(property_id.to_string()))?;

    let now = Utc::now();
    let transaction = PropertyTransaction {
        id: Uuid::new_v4().to_string(),
        customer_id: session.user_id.clone(),
        property_id: property.id.clone(),
        listing: property.listing,
        created_at: now,
    };
    let receipt = Receipt {
        id: Uuid::new_v4().to_string(),
        property_id: property.id.clone(),
        customer_id: session.user_id.clone(),
        amount_cents: property.transaction_amount().cents(),
        payment_status: PaymentStatus::Completed,
        payment_date: now,
    };

    let mut tx = db.pool().begin().await?;

    // The flip only matches while the property is still on the market.
    let flipped = sqlx::query(
        r#"
        UPDATE properties
        SET is_available = 0, updated_at = ?1
        WHERE id = ?2 AND is_available = 1
        "#,
    )
    .bind(now)
    .bind(&property.id)
    .execute(&mut *tx)
    .await?;

    if flipped.rows_affected() == 0 {
        warn!(property_id = %property.id, "Purchase rejected, property already taken");
        return Err(WorkflowError::PropertyUnavailable(property.id));
    }

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
    .execute(&mut *tx)
    .await?;

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
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        property_id = %receipt.property_id,
        customer_id = %receipt.customer_id,
        amount = %receipt.amount(),
        listing = %transaction.listing.as_str(),
        "Purchase completed"
    );

    Ok(Purchase {
        transaction,
        receipt,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
