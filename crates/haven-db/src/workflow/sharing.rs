//! # Room Sharing Workflows
//!
//! The shared-room lifecycle: an owner opts a rental in (creating the
//! room), customers browse open rooms and apply for a bed, the bed
//! counter only ever moves down through a conditional update.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pool::Database;
use crate::repository::RoomListing;
use crate::workflow::{require_role, WorkflowError, WorkflowResult};
use haven_core::{
    CoreError, Money, PaymentStatus, Property, Receipt, Role, Session, SharedRoom,
    SharingInterest, SHARED_ROOM_BEDS,
};

/// The records produced by a granted bed application.
#[derive(Debug, Clone)]
pub struct SharingApplication {
    pub interest: SharingInterest,
    pub receipt: Receipt,
}

/// Builds the shared room backing a rental: fixed bed count, per-bed
/// rent split from the property's monthly rent.
pub(crate) fn room_for(property: &Property) -> SharedRoom {
    SharedRoom {
        id: Uuid::new_v4().to_string(),
        property_id: property.id.clone(),
        total_beds: SHARED_ROOM_BEDS,
        available_beds: SHARED_ROOM_BEDS,
        monthly_rent_cents: Money::from_cents(property.rent_cents)
            .split(SHARED_ROOM_BEDS)
            .cents(),
        created_at: Utc::now(),
    }
}

/// Opts one of the acting owner's rentals into sharing.
///
/// Rejected when the property is not a shareable rental or already has
/// a room; the UNIQUE constraint on `property_id` backstops the check.
pub async fn enable_sharing(
    db: &Database,
    session: &Session,
    property_id: &str,
) -> WorkflowResult<SharedRoom> {
    require_role(session, Role::Owner)?;

    let property = db
        .properties()
        .get_by_id(property_id)
        .await?
        .ok_or_else(|| WorkflowError::PropertyNotFound(property_id.to_string()))?;

    if property.owner_id != session.user_id {
        return Err(WorkflowError::NotListingOwner(property.id));
    }

    if !property.is_shareable() {
        return Err(CoreError::NotShareable {
            property_id: property.id,
        }
        .into());
    }

    if db
        .shared_rooms()
        .get_by_property(&property.id)
        .await?
        .is_some()
    {
        return Err(WorkflowError::AlreadyShared(property.id));
    }

    let room = room_for(&property);
    db.shared_rooms().insert(&room).await?;

    info!(room_id = %room.id, property_id = %room.property_id, "Sharing enabled");

    Ok(room)
}

/// Takes one of the acting owner's rooms off the sharing pool.
/// Recorded interests cascade away with the room.
pub async fn disable_sharing(
    db: &Database,
    session: &Session,
    room_id: &str,
) -> WorkflowResult<()> {
    require_role(session, Role::Owner)?;

    let room = db
        .shared_rooms()
        .get_by_id(room_id)
        .await?
        .ok_or_else(|| WorkflowError::RoomNotFound(room_id.to_string()))?;

    let property = db
        .properties()
        .get_by_id(&room.property_id)
        .await?
        .ok_or_else(|| WorkflowError::PropertyNotFound(room.property_id.clone()))?;

    if property.owner_id != session.user_id {
        return Err(WorkflowError::NotListingOwner(property.id));
    }

    db.shared_rooms().delete(room_id).await?;

    Ok(())
}

/// Lists rooms a customer can still apply for.
pub async fn open_rooms(db: &Database, session: &Session) -> WorkflowResult<Vec<RoomListing>> {
    require_role(session, Role::Customer)?;
    Ok(db.shared_rooms().list_open().await?)
}

/// Applies for a bed in a shared room on behalf of the acting customer.
///
/// One application per customer per room; the bed is taken with a
/// conditional decrement inside the same transaction that records the
/// interest and its receipt. When two customers race for the last bed,
/// exactly one decrement matches.
pub async fn apply(
    db: &Database,
    session: &Session,
    room_id: &str,
) -> WorkflowResult<SharingApplication> {
    require_role(session, Role::Customer)?;

    let room = db
        .shared_rooms()
        .get_by_id(room_id)
        .await?
        .ok_or_else(|| WorkflowError::RoomNotFound(room_id.to_string()))?;

    let already: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sharing_interests WHERE customer_id = ?1 AND room_id = ?2",
    )
    .bind(&session.user_id)
    .bind(&room.id)
    .fetch_one(db.pool())
    .await?;

    if already > 0 {
        return Err(WorkflowError::AlreadyApplied(room.id));
    }

    let now = Utc::now();
    let interest = SharingInterest {
        id: Uuid::new_v4().to_string(),
        customer_id: session.user_id.clone(),
        room_id: room.id.clone(),
        created_at: now,
    };
    let receipt = Receipt {
        id: Uuid::new_v4().to_string(),
        property_id: room.property_id.clone(),
        customer_id: session.user_id.clone(),
        amount_cents: room.monthly_rent_cents,
        payment_status: PaymentStatus::Completed,
        payment_date: now,
    };

    let mut tx = db.pool().begin().await?;

    let taken = sqlx::query(
        r#"
        UPDATE shared_rooms
        SET available_beds = available_beds - 1
        WHERE id = ?1 AND available_beds > 0
        "#,
    )
    .bind(&room.id)
    .execute(&mut *tx)
    .await?;

    if taken.rows_affected() == 0 {
        warn!(room_id = %room.id, "Application rejected, room is full");
        return Err(WorkflowError::RoomFull(room.id));
    }

    sqlx::query(
        r#"
        INSERT INTO sharing_interests (id, customer_id, room_id, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&interest.id)
    .bind(&interest.customer_id)
    .bind(&interest.room_id)
    .bind(interest.created_at)
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
        room_id = %interest.room_id,
        customer_id = %interest.customer_id,
        per_bed_rent = %receipt.amount(),
        "Bed application granted"
    );

    Ok(SharingApplication { interest, receipt })
}

// =============================================================================
// Unit Tests
// =============================================================================
