//! # Shared Room Repository
//!
//! Database operations for shared rooms and the customers interested in
//! them. Bed-count mutations are conditional updates checked through
//! affected-row counts, so concurrent applications can never push the
//! counter below zero.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use haven_core::{Customer, SharedRoom};

/// A shared-room row joined with the property it belongs to.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoomListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub room: SharedRoom,

    /// Street of the underlying property.
    pub street: String,

    /// City of the underlying property.
    pub city: String,
}

/// Repository for shared-room database operations.
#[derive(Debug, Clone)]
pub struct SharedRoomRepository {
    pool: SqlitePool,
}

impl SharedRoomRepository {
    /// Creates a new SharedRoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SharedRoomRepository { pool }
    }

    /// Gets a shared room by id.
    pub async fn get_by_id(&self, room_id: &str) -> DbResult<Option<SharedRoom>> {
        let room = sqlx::query_as::<_, SharedRoom>(
            r#"
            SELECT id, property_id, total_beds, available_beds, monthly_rent_cents, created_at
            FROM shared_rooms
            WHERE id = ?1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Gets the shared room attached to a property, if any.
    ///
    /// At most one exists per property; the schema enforces it.
    pub async fn get_by_property(&self, property_id: &str) -> DbResult<Option<SharedRoom>> {
        let room = sqlx::query_as::<_, SharedRoom>(
            r#"
            SELECT id, property_id, total_beds, available_beds, monthly_rent_cents, created_at
            FROM shared_rooms
            WHERE property_id = ?1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Lists rooms that still have at least one open bed, joined with
    /// their property's address.
    pub async fn list_open(&self) -> DbResult<Vec<RoomListing>> {
        let rooms = sqlx::query_as::<_, RoomListing>(
            r#"
            SELECT r.id, r.property_id, r.total_beds, r.available_beds,
                   r.monthly_rent_cents, r.created_at,
                   p.street, p.city
            FROM shared_rooms r
            JOIN properties p ON p.id = r.property_id
            WHERE r.available_beds > 0
            ORDER BY p.city, r.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Lists all rooms belonging to one owner's properties.
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<RoomListing>> {
        let rooms = sqlx::query_as::<_, RoomListing>(
            r#"
            SELECT r.id, r.property_id, r.total_beds, r.available_beds,
                   r.monthly_rent_cents, r.created_at,
                   p.street, p.city
            FROM shared_rooms r
            JOIN properties p ON p.id = r.property_id
            WHERE p.owner_id = ?1
            ORDER BY r.created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Lists the customers who have applied for a room.
    pub async fn interested_customers(&self, room_id: &str) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT c.customer_id, c.username, c.first_name, c.last_name, c.email, c.phone
            FROM sharing_interests si
            JOIN customers c ON c.customer_id = si.customer_id
            WHERE si.room_id = ?1
            ORDER BY si.created_at
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Inserts a shared-room row.
    ///
    /// Fails with a unique violation when the property already has one.
    pub async fn insert(&self, room: &SharedRoom) -> DbResult<()> {
        debug!(room_id = %room.id, property_id = %room.property_id, "Inserting shared room");

        sqlx::query(
            r#"
            INSERT INTO shared_rooms
                (id, property_id, total_beds, available_beds, monthly_rent_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&room.id)
        .bind(&room.property_id)
        .bind(room.total_beds)
        .bind(room.available_beds)
        .bind(room.monthly_rent_cents)
        .bind(room.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Decrements a room's open-bed counter by one.
    ///
    /// The update only matches while a bed is open; returns `false`
    /// (without touching the row) when the room is already full or
    /// unknown.
    pub async fn decrement_beds(&self, room_id: &str) -> DbResult<bool> {
        debug!(room_id = %room_id, "Decrementing available beds");

        let result = sqlx::query(
            r#"
            UPDATE shared_rooms
            SET available_beds = available_beds - 1
            WHERE id = ?1 AND available_beds > 0
            "#,
        )
        .bind(room_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Removes a room from the sharing pool. Interests cascade.
    pub async fn delete(&self, room_id: &str) -> DbResult<()> {
        info!(room_id = %room_id, "Deleting shared room");

        let result = sqlx::query("DELETE FROM shared_rooms WHERE id = ?1")
            .bind(room_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("SharedRoom", room_id));
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
    use crate::test_support::{seed_owner, seed_property, seed_room};
    use haven_core::{ListingKind, PropertyKind};

    #[tokio::test]
    async fn test_one_room_per_property() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        let property = seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Room,
            ListingKind::Rent,
            0,
            120_000,
            "Austin",
        )
        .await;

        let room = seed_room(&db, &property.id, 120_000).await;
        assert_eq!(room.available_beds, haven_core::SHARED_ROOM_BEDS);

        // A second room for the same property hits the UNIQUE constraint.
        let duplicate = haven_core::SharedRoom {
            id: uuid::Uuid::new_v4().to_string(),
            ..room.clone()
        };
        let result = db.shared_rooms().insert(&duplicate).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_decrement_beds_stops_at_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        let property = seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Room,
            ListingKind::Rent,
            0,
            120_000,
            "Austin",
        )
        .await;
        let room = seed_room(&db, &property.id, 120_000).await;

        assert!(db.shared_rooms().decrement_beds(&room.id).await.unwrap());
        assert!(db.shared_rooms().decrement_beds(&room.id).await.unwrap());

        // Full room: the conditional update matches nothing.
        assert!(!db.shared_rooms().decrement_beds(&room.id).await.unwrap());

        let room = db.shared_rooms().get_by_id(&room.id).await.unwrap().unwrap();
        assert_eq!(room.available_beds, 0);
    }

    #[tokio::test]
    async fn test_list_open_skips_full_rooms() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        let property = seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Room,
            ListingKind::Rent,
            0,
            120_000,
            "Austin",
        )
        .await;
        let room = seed_room(&db, &property.id, 120_000).await;

        assert_eq!(db.shared_rooms().list_open().await.unwrap().len(), 1);

        db.shared_rooms().decrement_beds(&room.id).await.unwrap();
        db.shared_rooms().decrement_beds(&room.id).await.unwrap();

        assert!(db.shared_rooms().list_open().await.unwrap().is_empty());
    }
}
