//! # Report Repository
//!
//! The admin report battery: each method backs exactly one dashboard
//! button and runs one independent read-only query. Reports reuse the
//! joined row types from the other repositories where the shape matches
//! and define their own small aggregate rows otherwise.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::repository::property::PropertyListing;
use crate::repository::shared_room::RoomListing;
use haven_core::{HomeOwner, Money, Role};

/// City with a property count, for the distribution reports.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CityCount {
    pub city: String,
    pub total: i64,
}

/// Property-kind bucket with a count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct KindCount {
    pub kind: haven_core::PropertyKind,
    pub total: i64,
}

/// Per-role account count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoleCount {
    pub role: Role,
    pub total: i64,
}

/// One row of the all-accounts listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    pub username: String,
    pub role: Role,
}

/// A customer occupying (or applying for) a bed, with the room's address.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SharingParticipant {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub room_id: String,
    pub street: String,
    pub city: String,
}

/// Headline platform statistics.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_properties: i64,
    pub available_properties: i64,
}

/// An owner's portfolio totals.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OwnerFinancials {
    /// Combined asking price of the owner's sale listings, in cents.
    pub total_value_cents: i64,
    /// Combined monthly rent of rentals already rented out, in cents.
    pub monthly_income_cents: i64,
}

/// Rent income grouped by property kind, for one owner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct KindIncome {
    pub kind: haven_core::PropertyKind,
    pub total_rent_cents: i64,
}

/// Repository for the admin reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// All rentals currently on the market, with owner names.
    pub async fn available_rentals(&self) -> DbResult<Vec<PropertyListing>> {
        let rows = sqlx::query_as::<_, PropertyListing>(
            r#"
            SELECT p.id, p.owner_id, p.kind, p.listing, p.cost_cents, p.rent_cents,
                   p.building, p.street, p.city, p.pin, p.area_sqft, p.latitude,
                   p.longitude, p.description, p.amenities, p.is_available,
                   p.sharing_allowed, p.created_at, p.updated_at,
                   h.first_name || ' ' || h.last_name AS owner_name
            FROM properties p
            JOIN home_owners h ON h.owner_id = p.owner_id
            WHERE p.listing = 'rent' AND p.is_available = 1
            ORDER BY p.city, p.rent_cents
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every property on the platform, available or not.
    pub async fn all_properties(&self) -> DbResult<Vec<PropertyListing>> {
        let rows = sqlx::query_as::<_, PropertyListing>(
            r#"
            SELECT p.id, p.owner_id, p.kind, p.listing, p.cost_cents, p.rent_cents,
                   p.building, p.street, p.city, p.pin, p.area_sqft, p.latitude,
                   p.longitude, p.description, p.amenities, p.is_available,
                   p.sharing_allowed, p.created_at, p.updated_at,
                   h.first_name || ' ' || h.last_name AS owner_name
            FROM properties p
            JOIN home_owners h ON h.owner_id = p.owner_id
            ORDER BY p.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Homeowners whose accounts passed verification.
    pub async fn verified_owners(&self) -> DbResult<Vec<HomeOwner>> {
        let rows = sqlx::query_as::<_, HomeOwner>(
            r#"
            SELECT owner_id, username, first_name, last_name, email, phone, verification_status
            FROM home_owners
            WHERE verification_status = 'verified'
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Owners none of whose properties are currently available.
    ///
    /// Owners with no properties at all are excluded; an empty portfolio
    /// is not a sold-out one.
    pub async fn owners_fully_booked(&self) -> DbResult<Vec<HomeOwner>> {
        let rows = sqlx::query_as::<_, HomeOwner>(
            r#"
            SELECT h.owner_id, h.username, h.first_name, h.last_name, h.email, h.phone,
                   h.verification_status
            FROM home_owners h
            WHERE EXISTS (
                      SELECT 1 FROM properties p WHERE p.owner_id = h.owner_id
                  )
              AND NOT EXISTS (
                      SELECT 1 FROM properties p
                      WHERE p.owner_id = h.owner_id AND p.is_available = 1
                  )
            ORDER BY h.username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Shared rooms with at least one open bed.
    pub async fn open_rooms(&self) -> DbResult<Vec<RoomListing>> {
        let rows = sqlx::query_as::<_, RoomListing>(
            r#"
            SELECT r.id, r.property_id, r.total_beds, r.available_beds,
                   r.monthly_rent_cents, r.created_at,
                   p.street, p.city
            FROM shared_rooms r
            JOIN properties p ON p.id = r.property_id
            WHERE r.available_beds > 0
            ORDER BY p.city
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Shared rooms with every bed taken.
    pub async fn fully_occupied_rooms(&self) -> DbResult<Vec<RoomListing>> {
        let rows = sqlx::query_as::<_, RoomListing>(
            r#"
            SELECT r.id, r.property_id, r.total_beds, r.available_beds,
                   r.monthly_rent_cents, r.created_at,
                   p.street, p.city
            FROM shared_rooms r
            JOIN properties p ON p.id = r.property_id
            WHERE r.available_beds = 0
            ORDER BY p.city
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Everyone with a recorded sharing application, with room address.
    pub async fn sharing_participants(&self) -> DbResult<Vec<SharingParticipant>> {
        let rows = sqlx::query_as::<_, SharingParticipant>(
            r#"
            SELECT c.customer_id, c.first_name, c.last_name,
                   si.room_id, p.street, p.city
            FROM sharing_interests si
            JOIN customers c ON c.customer_id = si.customer_id
            JOIN shared_rooms r ON r.id = si.room_id
            JOIN properties p ON p.id = r.property_id
            ORDER BY si.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Property counts grouped by city.
    pub async fn properties_per_city(&self) -> DbResult<Vec<CityCount>> {
        let rows = sqlx::query_as::<_, CityCount>(
            r#"
            SELECT city, COUNT(*) AS total
            FROM properties
            GROUP BY city
            ORDER BY total DESC, city
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The five cities with the most rentals still on the market.
    pub async fn top_rental_cities(&self) -> DbResult<Vec<CityCount>> {
        let rows = sqlx::query_as::<_, CityCount>(
            r#"
            SELECT city, COUNT(*) AS total
            FROM properties
            WHERE listing = 'rent' AND is_available = 1
            GROUP BY city
            ORDER BY total DESC, city
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Property counts grouped by kind.
    pub async fn property_kind_distribution(&self) -> DbResult<Vec<KindCount>> {
        let rows = sqlx::query_as::<_, KindCount>(
            r#"
            SELECT kind, COUNT(*) AS total
            FROM properties
            GROUP BY kind
            ORDER BY total DESC, kind
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total completed payment volume across all receipts.
    pub async fn total_revenue(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM receipts
            WHERE payment_status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Average monthly rent across rentals still on the market.
    /// `None` when no rental is listed.
    pub async fn average_rent(&self) -> DbResult<Option<Money>> {
        let avg: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(rent_cents)
            FROM properties
            WHERE listing = 'rent' AND is_available = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(avg.map(|cents| Money::from_cents(cents.round() as i64)))
    }

    /// Account counts per role.
    pub async fn user_counts(&self) -> DbResult<Vec<RoleCount>> {
        let rows = sqlx::query_as::<_, RoleCount>(
            r#"
            SELECT role, COUNT(*) AS total
            FROM credentials
            GROUP BY role
            ORDER BY role
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every account's username and role.
    pub async fn all_users(&self) -> DbResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, role
            FROM credentials
            ORDER BY role, username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Headline counts for the dashboard.
    pub async fn overview(&self) -> DbResult<OverviewStats> {
        let stats = sqlx::query_as::<_, OverviewStats>(
            r#"
            SELECT (SELECT COUNT(*) FROM credentials) AS total_users,
                   (SELECT COUNT(*) FROM properties) AS total_properties,
                   (SELECT COUNT(*) FROM properties WHERE is_available = 1)
                       AS available_properties
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// One owner's portfolio value and realized monthly rent income.
    pub async fn owner_financials(&self, owner_id: &str) -> DbResult<OwnerFinancials> {
        let financials = sqlx::query_as::<_, OwnerFinancials>(
            r#"
            SELECT COALESCE(SUM(CASE WHEN listing = 'sale' THEN cost_cents ELSE 0 END), 0)
                       AS total_value_cents,
                   COALESCE(SUM(CASE WHEN listing = 'rent' AND is_available = 0
                                     THEN rent_cents ELSE 0 END), 0)
                       AS monthly_income_cents
            FROM properties
            WHERE owner_id = ?1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(financials)
    }

    /// One owner's rented-out monthly income, grouped by property kind.
    pub async fn owner_income_by_kind(&self, owner_id: &str) -> DbResult<Vec<KindIncome>> {
        let rows = sqlx::query_as::<_, KindIncome>(
            r#"
            SELECT kind, COALESCE(SUM(rent_cents), 0) AS total_rent_cents
            FROM properties
            WHERE owner_id = ?1 AND listing = 'rent' AND is_available = 0
            GROUP BY kind
            ORDER BY total_rent_cents DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::test_support::{seed_customer, seed_owner, seed_property};
    use haven_core::{ListingKind, PropertyKind, Role, VerificationStatus};

    #[tokio::test]
    async fn test_counts_and_overview() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        seed_customer(&db, "john.doe", "pass123", "John", "Doe").await;
        seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Apartment,
            ListingKind::Rent,
            0,
            150_000,
            "Austin",
        )
        .await;

        let overview = db.reports().overview().await.unwrap();
        assert_eq!(overview.total_users, 2);
        assert_eq!(overview.total_properties, 1);
        assert_eq!(overview.available_properties, 1);

        let counts = db.reports().user_counts().await.unwrap();
        let owners = counts.iter().find(|c| c.role == Role::Owner).unwrap();
        assert_eq!(owners.total, 1);
    }

    #[tokio::test]
    async fn test_verified_owners_filter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tom = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        seed_owner(&db, "owner.ann", "ann001", "Ann", "Lee").await;

        db.owners()
            .set_verification_status(&tom.owner_id, VerificationStatus::Verified)
            .await
            .unwrap();

        let verified = db.reports().verified_owners().await.unwrap();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].username, "owner.tom");
    }

    #[tokio::test]
    async fn test_city_distribution_and_average_rent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Apartment,
            ListingKind::Rent,
            0,
            100_000,
            "Austin",
        )
        .await;
        seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::House,
            ListingKind::Rent,
            0,
            200_000,
            "Austin",
        )
        .await;

        let cities = db.reports().properties_per_city().await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].total, 2);

        let avg = db.reports().average_rent().await.unwrap().unwrap();
        assert_eq!(avg.cents(), 150_000);
    }

    #[tokio::test]
    async fn test_average_rent_empty_market() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.reports().average_rent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_fully_booked_excludes_empty_portfolios() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tom = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        seed_owner(&db, "owner.ann", "ann001", "Ann", "Lee").await;
        let property = seed_property(
            &db,
            &tom.owner_id,
            PropertyKind::Apartment,
            ListingKind::Rent,
            0,
            150_000,
            "Austin",
        )
        .await;

        // Tom still has an available listing, Ann has none at all.
        assert!(db.reports().owners_fully_booked().await.unwrap().is_empty());

        db.properties()
            .set_availability(&property.id, false)
            .await
            .unwrap();

        let booked = db.reports().owners_fully_booked().await.unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].username, "owner.tom");
    }

    #[tokio::test]
    async fn test_owner_financials() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_owner(&db, "owner.tom", "owner001", "Tom", "Brown").await;
        seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::House,
            ListingKind::Sale,
            30_000_000,
            0,
            "Dallas",
        )
        .await;
        let rental = seed_property(
            &db,
            &owner.owner_id,
            PropertyKind::Apartment,
            ListingKind::Rent,
            0,
            150_000,
            "Austin",
        )
        .await;

        // Nothing rented out yet.
        let financials = db.reports().owner_financials(&owner.owner_id).await.unwrap();
        assert_eq!(financials.total_value_cents, 30_000_000);
        assert_eq!(financials.monthly_income_cents, 0);

        db.properties()
            .set_availability(&rental.id, false)
            .await
            .unwrap();

        let financials = db.reports().owner_financials(&owner.owner_id).await.unwrap();
        assert_eq!(financials.monthly_income_cents, 150_000);

        let by_kind = db
            .reports()
            .owner_income_by_kind(&owner.owner_id)
            .await
            .unwrap();
        assert_eq!(by_kind.len(), 1);
        assert_eq!(by_kind[0].kind, PropertyKind::Apartment);
    }
}
