//! # Property Repository
//!
//! Database operations for property listings: owner inserts, the
//! customer-facing catalog search, and availability flips.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use haven_core::{Property, PropertyFilter};

/// A catalog row: the property plus its owner's display name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,

    /// Owner's first and last name joined with a space.
    pub owner_name: String,
}

/// Repository for property database operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Gets a property by id.
    pub async fn get_by_id(&self, property_id: &str) -> DbResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, owner_id, kind, listing, cost_cents, rent_cents,
                   building, street, city, pin, area_sqft, latitude, longitude,
                   description, amenities, is_available, sharing_allowed,
                   created_at, updated_at
            FROM properties
            WHERE id = ?1
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Lists an owner's properties, newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, owner_id, kind, listing, cost_cents, rent_cents,
                   building, street, city, pin, area_sqft, latitude, longitude,
                   description, amenities, is_available, sharing_allowed,
                   created_at, updated_at
            FROM properties
            WHERE owner_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    /// Searches the catalog of available properties.
    ///
    /// Always restricted to `is_available = 1` and the filter's listing
    /// kind; the property kind and price bounds apply only when the
    /// filter carries them (see [`PropertyFilter`] for how the bounds
    /// are interpreted).
    pub async fn search(&self, filter: &PropertyFilter) -> DbResult<Vec<PropertyListing>> {
        debug!(listing = %filter.listing, "Searching property catalog");

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT p.id, p.owner_id, p.kind, p.listing, p.cost_cents, p.rent_cents,
                   p.building, p.street, p.city, p.pin, p.area_sqft, p.latitude,
                   p.longitude, p.description, p.amenities, p.is_available,
                   p.sharing_allowed, p.created_at, p.updated_at,
                   h.first_name || ' ' || h.last_name AS owner_name
            FROM properties p
            JOIN home_owners h ON h.owner_id = p.owner_id
            WHERE p.is_available = 1 AND p.listing =
            "#,
        );
        query.push_bind(filter.listing);

        if let Some(kind) = filter.kind {
            query.push(" AND p.kind = ");
            query.push_bind(kind);
        }

        // The price column depends on the listing kind: rentals filter
        // on monthly rent, sales on the asking price.
        let price_column = match filter.listing {
            haven_core::ListingKind::Rent => "p.rent_cents",
            haven_core::ListingKind::Sale => "p.cost_cents",
        };

        if let Some(min) = filter.effective_min() {
            query.push(format!(" AND {} >= ", price_column));
            query.push_bind(min);
        }

        if let Some(max) = filter.effective_max() {
            query.push(format!(" AND {} <= ", price_column));
            query.push_bind(max);
        }

        query.push(" ORDER BY p.city, p.created_at DESC");

        let listings = query
            .build_query_as::<PropertyListing>()
            .fetch_all(&self.pool)
            .await?;

        Ok(listings)
    }

    /// Inserts a property row.
    pub async fn insert(&self, property: &Property) -> DbResult<()> {
        debug!(
            property_id = %property.id,
            owner_id = %property.owner_id,
            kind = %property.kind,
            "Inserting property"
        );

        sqlx::query(
            r#"
            INSERT INTO properties
                (id, owner_id, kind, listing, cost_cents, rent_cents,
                 building, street, city, pin, area_sqft, latitude, longitude,
                 description, amenities, is_available, sharing_allowed,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                    ?14, ?15, ?16, ?17, ?18, ?19)
            "#,
        )
        .bind(&property.id)
        .bind(&property.owner_id)
        .bind(property.kind)
        .bind(property.listing)
        .bind(property.cost_cents)
        .bind(property.rent_cents)
        .bind(&property.building)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.pin)
        .bind(property.area_sqft)
        .bind(property.latitude)
        .bind(property.longitude)
        .bind(&property.description)
        .bind(&property.amenities)
        .bind(property.is_available)
        .bind(property.sharing_allowed)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Forces a property's availability flag (admin action).
    pub async fn set_availability(&self, property_id: &str, available: bool) -> DbResult<()> {
        debug!(property_id = %property_id, available, "Setting property availability");

        let result = sqlx::query(
            r#"
            UPDATE properties
            SET is_available = ?1, updated_at = datetime('now')
            WHERE id = ?2
            "#,
        )
        .bind(available)
        .bind(property_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Property", property_id));
        }

        Ok(())
    }

    /// Removes a property and its dependent records in one transaction.
    ///
    /// The shared room (and its interests) cascade from the property
    /// delete; transaction history and receipts are cleared explicitly.
    pub async fn delete_cascade(&self, property_id: &str) -> DbResult<()> {
        info!(property_id = %property_id, "Deleting property");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM property_transactions WHERE property_id = ?1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM receipts WHERE property_id = ?1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM properties WHERE id = ?1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Property", property_id));
        }

        tx.commit().await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
