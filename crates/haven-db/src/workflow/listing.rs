//! # Owner Listing Workflows
//!
//! Property creation and the owner's own-portfolio views.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::pool::Database;
use crate::repository::RoomListing;
use crate::workflow::{require_role, sharing, WorkflowResult};
use haven_core::{validation, ListingKind, NewProperty, Property, Role, Session};

/// Creates a property listing for the acting owner.
///
/// A rental created with sharing enabled gets its shared room in the
/// same transaction, so the catalog never shows a shareable rental
/// without a room behind it.
pub async fn create_property(
    db: &Database,
    session: &Session,
    form: NewProperty,
) -> WorkflowResult<Property> {
    require_role(session, Role::Owner)?;
    validation::validate_new_property(&form)?;

    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4().to_string(),
        owner_id: session.user_id.clone(),
        kind: form.kind,
        listing: form.listing,
        cost_cents: form.cost_cents,
        rent_cents: form.rent_cents,
        building: form.building.trim().to_string(),
        street: form.street.trim().to_string(),
        city: form.city.trim().to_string(),
        pin: form.pin.trim().to_string(),
        area_sqft: form.area_sqft,
        latitude: form.latitude,
        longitude: form.longitude,
        description: form.description,
        amenities: form.amenities,
        is_available: true,
        // Sharing only applies to rentals; the flag is dropped on sale
        // listings rather than rejected.
        sharing_allowed: form.sharing_allowed && form.listing == ListingKind::Rent,
        created_at: now,
        updated_at: now,
    };

    let mut tx = db.pool().begin().await?;

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
    .execute(&mut *tx)
    .await?;

    if property.sharing_allowed {
        let room = sharing::room_for(&property);
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
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        property_id = %property.id,
        owner_id = %property.owner_id,
        shared = property.sharing_allowed,
        "Property listed"
    );

    Ok(property)
}

/// Lists the acting owner's properties.
pub async fn my_properties(db: &Database, session: &Session) -> WorkflowResult<Vec<Property>> {
    require_role(session, Role::Owner)?;
    Ok(db.properties().list_by_owner(&session.user_id).await?)
}

/// Lists the acting owner's shared rooms with their addresses.
pub async fn my_rooms(db: &Database, session: &Session) -> WorkflowResult<Vec<RoomListing>> {
    require_role(session, Role::Owner)?;
    Ok(db.shared_rooms().list_by_owner(&session.user_id).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::test_support::{owner_session, rental_form, sale_form};
    use haven_core::{CoreError, PropertyKind};

    #[tokio::test]
    async fn test_create_rental_with_auto_room() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = owner_session(&db, "owner.tom").await;

        let mut form = rental_form(PropertyKind::Apartment, 150_000, "Austin");
        form.sharing_allowed = true;
        let property = create_property(&db, &session, form).await.unwrap();

        let room = db
            .shared_rooms()
            .get_by_property(&property.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(room.total_beds, haven_core::SHARED_ROOM_BEDS);
        assert_eq!(room.available_beds, haven_core::SHARED_ROOM_BEDS);
        assert_eq!(room.monthly_rent_cents, 75_000);
    }

    #[tokio::test]
    async fn test_sale_listing_drops_sharing_flag() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = owner_session(&db, "owner.tom").await;

        let mut form = sale_form(PropertyKind::House, 25_000_000, "Dallas");
        form.sharing_allowed = true;
        let property = create_property(&db, &session, form).await.unwrap();

        assert!(!property.sharing_allowed);
        assert!(db
            .shared_rooms()
            .get_by_property(&property.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_customer_cannot_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = crate::test_support::customer_session(&db, "john.doe").await;

        let form = rental_form(PropertyKind::Apartment, 150_000, "Austin");
        let result = create_property(&db, &session, form).await;
        assert!(matches!(
            result,
            Err(crate::workflow::WorkflowError::Core(
                CoreError::RoleForbidden { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_my_properties_scoped_to_owner() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tom = owner_session(&db, "owner.tom").await;
        let ann = owner_session(&db, "owner.ann").await;

        create_property(&db, &tom, rental_form(PropertyKind::Apartment, 150_000, "Austin"))
            .await
            .unwrap();

        assert_eq!(my_properties(&db, &tom).await.unwrap().len(), 1);
        assert!(my_properties(&db, &ann).await.unwrap().is_empty());
    }
}
