//! Full platform walkthrough: owner lists, customer rents and shares,
//! admin reports on the result.

use uuid::Uuid;

use haven_db::workflow::{admin, auth, listing, purchase, sharing};
use haven_db::{
    Credential, CustomerSignup, Database, DbConfig, ListingKind, NewProperty, OwnerSignup,
    PropertyFilter, PropertyKind, Role, Session, VerificationStatus,
};

async fn admin_session(db: &Database) -> Session {
    db.credentials()
        .insert(&Credential {
            id: Uuid::new_v4().to_string(),
            username: "admin.alex".into(),
            password: "admin001".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    auth::login(db, "admin.alex", "admin001").await.unwrap()
}

fn owner_form() -> OwnerSignup {
    OwnerSignup {
        username: "owner.tom".into(),
        password: "owner001".into(),
        confirm_password: "owner001".into(),
        first_name: "Tom".into(),
        last_name: "Brown".into(),
        email: "tom.brown@example.com".into(),
        phone: "555-0200".into(),
    }
}

fn customer_form(username: &str) -> CustomerSignup {
    CustomerSignup {
        username: username.into(),
        password: "pass123".into(),
        confirm_password: "pass123".into(),
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: format!("{username}@example.com"),
        phone: "555-0100".into(),
    }
}

fn rental(rent_cents: i64, city: &str, sharing_allowed: bool) -> NewProperty {
    NewProperty {
        kind: PropertyKind::Apartment,
        listing: ListingKind::Rent,
        cost_cents: 0,
        rent_cents,
        building: "Maple Court".into(),
        street: "12 Elm St".into(),
        city: city.into(),
        pin: "78701".into(),
        area_sqft: 900.0,
        latitude: 0.0,
        longitude: 0.0,
        description: None,
        amenities: None,
        sharing_allowed,
    }
}

#[tokio::test]
async fn full_platform_walkthrough() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let admin = admin_session(&db).await;

    // Owner signs up, gets verified, lists two rentals.
    auth::register_owner(&db, owner_form()).await.unwrap();
    let owner = auth::login(&db, "owner.tom", "owner001").await.unwrap();
    admin::set_owner_verification(&db, &admin, &owner.user_id, VerificationStatus::Verified)
        .await
        .unwrap();

    let plain = listing::create_property(&db, &owner, rental(150_000, "Austin", false))
        .await
        .unwrap();
    let shared = listing::create_property(&db, &owner, rental(120_000, "Austin", true))
        .await
        .unwrap();

    // Customer signs up, browses the catalog, rents the plain listing.
    auth::register_customer(&db, customer_form("john.doe")).await.unwrap();
    let customer = auth::login(&db, "john.doe", "pass123").await.unwrap();

    let catalog = db
        .properties()
        .search(&PropertyFilter::rentals().with_max_cents(200_000).with_min_cents(100_000))
        .await
        .unwrap();
    assert_eq!(catalog.len(), 2);

    let deal = purchase::execute(&db, &customer, &plain.id).await.unwrap();
    assert_eq!(deal.receipt.amount_cents, 150_000);

    // The rented property drops out of the catalog.
    let catalog = db.properties().search(&PropertyFilter::rentals()).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].property.id, shared.id);

    // The customer grabs a bed in the shared rental at half rent.
    let rooms = sharing::open_rooms(&db, &customer).await.unwrap();
    assert_eq!(rooms.len(), 1);
    let application = sharing::apply(&db, &customer, &rooms[0].room.id).await.unwrap();
    assert_eq!(application.receipt.amount_cents, 60_000);

    // Admin reports reflect all of it.
    let overview = db.reports().overview().await.unwrap();
    assert_eq!(overview.total_users, 3);
    assert_eq!(overview.total_properties, 2);
    assert_eq!(overview.available_properties, 1);

    assert_eq!(db.reports().total_revenue().await.unwrap().cents(), 210_000);
    assert_eq!(db.reports().verified_owners().await.unwrap().len(), 1);
    assert_eq!(db.reports().sharing_participants().await.unwrap().len(), 1);

    let financials = db.reports().owner_financials(&owner.user_id).await.unwrap();
    assert_eq!(financials.monthly_income_cents, 150_000);

    // Admin removes the customer; history goes with the account.
    admin::remove_customer(&db, &admin, &customer.user_id).await.unwrap();
    assert!(db
        .transactions()
        .receipts_for_customer(&customer.user_id)
        .await
        .unwrap()
        .is_empty());
    assert!(db.reports().sharing_participants().await.unwrap().is_empty());
}
