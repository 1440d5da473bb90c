//! Seeds a Haven database with demo accounts and listings.
//!
//! ## Usage
//! ```bash
//! cargo run --bin seed                 # seeds ./haven.db
//! cargo run --bin seed -- /tmp/dev.db  # explicit path
//! ```
//!
//! Safe to re-run: accounts that already exist are left alone.
//!
//! Demo logins: `admin.alex`/`admin001`, `owner.tom`/`owner001`,
//! `john.doe`/`pass123`.

use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use haven_db::workflow::{auth, listing, sharing};
use haven_db::{
    Credential, CustomerSignup, Database, DbConfig, ListingKind, NewProperty, OwnerSignup,
    PropertyKind, Role, Session,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./haven.db".to_string());

    info!(path = %path, "Seeding database");
    let db = Database::new(DbConfig::new(&path)).await?;

    seed_admin(&db).await?;
    let owner = seed_owner(&db).await?;
    seed_customer(&db).await?;
    seed_listings(&db, &owner).await?;

    info!("Seed complete");
    Ok(())
}

async fn seed_admin(db: &Database) -> Result<(), Box<dyn Error>> {
    if db.credentials().username_exists("admin.alex").await? {
        info!("Admin account already present, skipping");
        return Ok(());
    }

    // Admins have no signup flow; the credential row is the account.
    db.credentials()
        .insert(&Credential {
            id: Uuid::new_v4().to_string(),
            username: "admin.alex".into(),
            password: "admin001".into(),
            role: Role::Admin,
        })
        .await?;

    info!("Seeded admin.alex");
    Ok(())
}

async fn seed_owner(db: &Database) -> Result<Session, Box<dyn Error>> {
    if !db.credentials().username_exists("owner.tom").await? {
        auth::register_owner(
            db,
            OwnerSignup {
                username: "owner.tom".into(),
                password: "owner001".into(),
                confirm_password: "owner001".into(),
                first_name: "Tom".into(),
                last_name: "Brown".into(),
                email: "tom.brown@example.com".into(),
                phone: "555-0200".into(),
            },
        )
        .await?;
        info!("Seeded owner.tom");
    }

    Ok(auth::login(db, "owner.tom", "owner001").await?)
}

async fn seed_customer(db: &Database) -> Result<(), Box<dyn Error>> {
    if db.credentials().username_exists("john.doe").await? {
        return Ok(());
    }

    auth::register_customer(
        db,
        CustomerSignup {
            username: "john.doe".into(),
            password: "pass123".into(),
            confirm_password: "pass123".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            phone: "555-0100".into(),
        },
    )
    .await?;

    info!("Seeded john.doe");
    Ok(())
}

async fn seed_listings(db: &Database, owner: &Session) -> Result<(), Box<dyn Error>> {
    if !listing::my_properties(db, owner).await?.is_empty() {
        info!("Owner already has listings, skipping");
        return Ok(());
    }

    listing::create_property(
        db,
        owner,
        NewProperty {
            kind: PropertyKind::Apartment,
            listing: ListingKind::Rent,
            cost_cents: 0,
            rent_cents: 150_000,
            building: "Maple Court".into(),
            street: "12 Elm St".into(),
            city: "Austin".into(),
            pin: "78701".into(),
            area_sqft: 900.0,
            latitude: 30.2672,
            longitude: -97.7431,
            description: Some("Bright two-bed close to downtown.".into()),
            amenities: Some("parking, laundry".into()),
            sharing_allowed: false,
        },
    )
    .await?;

    listing::create_property(
        db,
        owner,
        NewProperty {
            kind: PropertyKind::House,
            listing: ListingKind::Sale,
            cost_cents: 42_500_000,
            rent_cents: 0,
            building: "".into(),
            street: "40 Pine Rd".into(),
            city: "Dallas".into(),
            pin: "75201".into(),
            area_sqft: 2200.0,
            latitude: 32.7767,
            longitude: -96.7970,
            description: Some("Family house with a garden.".into()),
            amenities: Some("garage, garden".into()),
            sharing_allowed: false,
        },
    )
    .await?;

    let shared = listing::create_property(
        db,
        owner,
        NewProperty {
            kind: PropertyKind::Room,
            listing: ListingKind::Rent,
            cost_cents: 0,
            rent_cents: 120_000,
            building: "Cedar Lofts".into(),
            street: "7 Lake View".into(),
            city: "Austin".into(),
            pin: "78702".into(),
            area_sqft: 450.0,
            latitude: 30.2700,
            longitude: -97.7300,
            description: Some("Room suited for two flatmates.".into()),
            amenities: Some("wifi, furnished".into()),
            sharing_allowed: false,
        },
    )
    .await?;
    sharing::enable_sharing(db, owner, &shared.id).await?;

    info!("Seeded demo listings");
    Ok(())
}
