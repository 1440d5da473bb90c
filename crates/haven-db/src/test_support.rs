//! Shared fixtures for the crate's tests: seeded accounts, sessions and
//! properties against an in-memory database.

use chrono::Utc;
use uuid::Uuid;

use crate::pool::Database;
use haven_core::{
    Credential, Customer, HomeOwner, ListingKind, NewProperty, Property, PropertyKind, Role,
    Session, SharedRoom, VerificationStatus, SHARED_ROOM_BEDS,
};

pub(crate) async fn seed_owner(
    db: &Database,
    username: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> HomeOwner {
    let id = Uuid::new_v4().to_string();
    db.credentials()
        .insert(&Credential {
            id: id.clone(),
            username: username.into(),
            password: password.into(),
            role: Role::Owner,
        })
        .await
        .unwrap();

    let owner = HomeOwner {
        owner_id: id,
        username: username.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        email: format!("{username}@example.com"),
        phone: "555-0100".into(),
        verification_status: VerificationStatus::Pending,
    };
    db.owners().insert(&owner).await.unwrap();
    owner
}

pub(crate) async fn seed_customer(
    db: &Database,
    username: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Customer {
    let id = Uuid::new_v4().to_string();
    db.credentials()
        .insert(&Credential {
            id: id.clone(),
            username: username.into(),
            password: password.into(),
            role: Role::Customer,
        })
        .await
        .unwrap();

    let customer = Customer {
        customer_id: id,
        username: username.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        email: format!("{username}@example.com"),
        phone: "555-0200".into(),
    };
    db.customers().insert(&customer).await.unwrap();
    customer
}

pub(crate) async fn seed_property(
    db: &Database,
    owner_id: &str,
    kind: PropertyKind,
    listing: ListingKind,
    cost_cents: i64,
    rent_cents: i64,
    city: &str,
) -> Property {
    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4().to_string(),
        owner_id: owner_id.into(),
        kind,
        listing,
        cost_cents,
        rent_cents,
        building: "Maple Court".into(),
        street: "12 Elm St".into(),
        city: city.into(),
        pin: "62701".into(),
        area_sqft: 900.0,
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        amenities: None,
        is_available: true,
        sharing_allowed: false,
        created_at: now,
        updated_at: now,
    };
    db.properties().insert(&property).await.unwrap();
    property
}

pub(crate) async fn seed_room(db: &Database, property_id: &str, rent_cents: i64) -> SharedRoom {
    let room = SharedRoom {
        id: Uuid::new_v4().to_string(),
        property_id: property_id.into(),
        total_beds: SHARED_ROOM_BEDS,
        available_beds: SHARED_ROOM_BEDS,
        monthly_rent_cents: rent_cents / SHARED_ROOM_BEDS,
        created_at: Utc::now(),
    };
    db.shared_rooms().insert(&room).await.unwrap();
    room
}

pub(crate) async fn admin_session(db: &Database, username: &str) -> Session {
    let id = Uuid::new_v4().to_string();
    db.credentials()
        .insert(&Credential {
            id: id.clone(),
            username: username.into(),
            password: "admin001".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    Session {
        user_id: id,
        username: username.into(),
        role: Role::Admin,
    }
}

pub(crate) async fn owner_session(db: &Database, username: &str) -> Session {
    let owner = seed_owner(db, username, "owner001", "Tom", "Brown").await;
    Session {
        user_id: owner.owner_id,
        username: owner.username,
        role: Role::Owner,
    }
}

pub(crate) async fn customer_session(db: &Database, username: &str) -> Session {
    let customer = seed_customer(db, username, "pass123", "John", "Doe").await;
    Session {
        user_id: customer.customer_id,
        username: customer.username,
        role: Role::Customer,
    }
}

pub(crate) fn rental_form(kind: PropertyKind, rent_cents: i64, city: &str) -> NewProperty {
    NewProperty {
        kind,
        listing: ListingKind::Rent,
        cost_cents: 0,
        rent_cents,
        building: "Maple Court".into(),
        street: "12 Elm St".into(),
        city: city.into(),
        pin: "62701".into(),
        area_sqft: 900.0,
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        amenities: None,
        sharing_allowed: false,
    }
}

pub(crate) fn sale_form(kind: PropertyKind, cost_cents: i64, city: &str) -> NewProperty {
    NewProperty {
        kind,
        listing: ListingKind::Sale,
        cost_cents,
        rent_cents: 0,
        building: "Oak House".into(),
        street: "40 Pine Rd".into(),
        city: city.into(),
        pin: "75201".into(),
        area_sqft: 1800.0,
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        amenities: None,
        sharing_allowed: false,
    }
}
