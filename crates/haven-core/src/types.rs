//! # Domain Types
//!
//! Core domain types used throughout Haven.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │  Credential   │   │   Property    │   │  SharedRoom   │         │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │         │
//! │  │ id (UUID)     │   │ id (UUID)     │   │ id (UUID)     │         │
//! │  │ username      │   │ owner_id (FK) │   │ property_id   │         │
//! │  │ role          │   │ listing       │   │ available_beds│         │
//! │  └───────────────┘   │ is_available  │   └───────────────┘         │
//! │                      └───────────────┘                             │
//! │                                                                     │
//! │  ┌───────────────┐   ┌─────────────────────┐   ┌───────────────┐   │
//! │  │   HomeOwner   │   │ PropertyTransaction │   │    Receipt    │   │
//! │  │   Customer    │   │  SharingInterest    │   │ payment rows  │   │
//! │  └───────────────┘   └─────────────────────┘   └───────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity id is a UUID v4 string. A homeowner's or customer's profile
//! id equals the id of its credential row - they are created together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// The role attached to a credential row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator: reports and destructive actions.
    Admin,
    /// Homeowner: lists and manages properties.
    Owner,
    /// Customer: browses, rents, buys, applies to share rooms.
    Customer,
}

impl Role {
    /// Stable lowercase name, matching the stored representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Verification Status
// =============================================================================

/// Admin-controlled trust state on a homeowner account.
///
/// Mutated only through the admin workflow; owners start out `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl Default for VerificationStatus {
    fn default() -> Self {
        VerificationStatus::Pending
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        })
    }
}

// =============================================================================
// Listing Kind
// =============================================================================

/// Whether a property is listed for outright sale or monthly rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Sale,
    Rent,
}

impl ListingKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Sale => "sale",
            ListingKind::Rent => "rent",
        }
    }
}

impl std::fmt::Display for ListingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Property Kind
// =============================================================================

/// Category of a listed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Apartment,
    House,
    Condo,
    Villa,
    Room,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PropertyKind::Apartment => "apartment",
            PropertyKind::House => "house",
            PropertyKind::Condo => "condo",
            PropertyKind::Villa => "villa",
            PropertyKind::Room => "room",
        })
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Status recorded on a receipt row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

// =============================================================================
// Credential
// =============================================================================

/// A login credential row.
///
/// Passwords are stored and compared in plaintext - hardening the
/// credential store is an explicit non-goal for this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Credential {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Profiles
// =============================================================================

/// A homeowner profile. `owner_id` equals the credential row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HomeOwner {
    pub owner_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub verification_status: VerificationStatus,
}

impl HomeOwner {
    /// Display name used wherever the catalog shows the owner.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A customer profile. `customer_id` equals the credential row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub customer_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Property
// =============================================================================

/// A listed property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Property {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning homeowner (credential/profile id).
    pub owner_id: String,

    /// Property category.
    pub kind: PropertyKind,

    /// Sale or rent listing.
    pub listing: ListingKind,

    /// Asking price in cents (meaningful for sale listings).
    pub cost_cents: i64,

    /// Monthly rent in cents (meaningful for rent listings).
    pub rent_cents: i64,

    /// Building name.
    pub building: String,

    /// Street address.
    pub street: String,

    pub city: String,

    /// Postal/PIN code.
    pub pin: String,

    /// Floor area in square feet.
    pub area_sqft: f64,

    pub latitude: f64,
    pub longitude: f64,

    pub description: Option<String>,

    /// Comma-separated amenity list, free text.
    pub amenities: Option<String>,

    /// Whether the property can still be rented/purchased.
    pub is_available: bool,

    /// Whether the owner opted this rental into room sharing.
    pub sharing_allowed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// The amount a transaction against this property settles at:
    /// monthly rent for rent listings, asking price for sale listings.
    pub fn transaction_amount(&self) -> Money {
        match self.listing {
            ListingKind::Rent => Money::from_cents(self.rent_cents),
            ListingKind::Sale => Money::from_cents(self.cost_cents),
        }
    }

    /// Whether this property can back a shared room: an available rental
    /// with sharing allowed.
    pub fn is_shareable(&self) -> bool {
        self.listing == ListingKind::Rent && self.sharing_allowed && self.is_available
    }
}

// =============================================================================
// Shared Room
// =============================================================================

/// A bed-level sub-division of a rental property.
///
/// Created when a rental opts into sharing; at most one per property.
/// `available_beds` only decreases as customers apply - freed beds are an
/// admin concern, never automatic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SharedRoom {
    pub id: String,
    pub property_id: String,
    pub total_beds: i64,
    pub available_beds: i64,
    /// Per-bed monthly rent in cents (property rent split across beds).
    pub monthly_rent_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SharedRoom {
    pub fn has_open_beds(&self) -> bool {
        self.available_beds > 0
    }

    pub fn monthly_rent(&self) -> Money {
        Money::from_cents(self.monthly_rent_cents)
    }
}

// =============================================================================
// Sharing Interest
// =============================================================================

/// A customer's application for a bed in a shared room.
/// At most one per (customer, room) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SharingInterest {
    pub id: String,
    pub customer_id: String,
    pub room_id: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Property Transaction
// =============================================================================

/// A recorded purchase or rental of a whole property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyTransaction {
    pub id: String,
    pub customer_id: String,
    pub property_id: String,
    /// Snapshot of the listing kind at transaction time.
    pub listing: ListingKind,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Receipt
// =============================================================================

/// A payment record created alongside every transaction or sharing
/// application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receipt {
    pub id: String,
    pub property_id: String,
    pub customer_id: String,
    pub amount_cents: i64,
    pub payment_status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}

impl Receipt {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated session context.
///
/// Passed explicitly into every role workflow - there is no process-wide
/// login singleton. Lifecycle is one authenticated session: created by
/// login, dropped on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Customer signup form fields, as collected by the registration view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSignup {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Homeowner signup form fields. Identical shape to the customer form;
/// the created profile additionally starts with `Pending` verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSignup {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// New-property form fields, as collected by the owner's listing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub kind: PropertyKind,
    pub listing: ListingKind,
    pub cost_cents: i64,
    pub rent_cents: i64,
    pub building: String,
    pub street: String,
    pub city: String,
    pub pin: String,
    pub area_sqft: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub sharing_allowed: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Owner.to_string(), "owner");
    }

    #[test]
    fn test_verification_status_default() {
        assert_eq!(VerificationStatus::default(), VerificationStatus::Pending);
    }

    fn sample_property(listing: ListingKind) -> Property {
        let now = Utc::now();
        Property {
            id: "p1".into(),
            owner_id: "o1".into(),
            kind: PropertyKind::Apartment,
            listing,
            cost_cents: 25_000_000,
            rent_cents: 150_000,
            building: "Maple Court".into(),
            street: "12 Elm St".into(),
            city: "Springfield".into(),
            pin: "62701".into(),
            area_sqft: 900.0,
            latitude: 0.0,
            longitude: 0.0,
            description: None,
            amenities: None,
            is_available: true,
            sharing_allowed: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_transaction_amount_follows_listing() {
        let rent = sample_property(ListingKind::Rent);
        assert_eq!(rent.transaction_amount().cents(), 150_000);

        let sale = sample_property(ListingKind::Sale);
        assert_eq!(sale.transaction_amount().cents(), 25_000_000);
    }

    #[test]
    fn test_is_shareable() {
        let mut p = sample_property(ListingKind::Rent);
        assert!(p.is_shareable());

        p.is_available = false;
        assert!(!p.is_shareable());

        let mut sale = sample_property(ListingKind::Sale);
        sale.is_available = true;
        assert!(!sale.is_shareable());
    }

    #[test]
    fn test_shared_room_open_beds() {
        let room = SharedRoom {
            id: "r1".into(),
            property_id: "p1".into(),
            total_beds: 2,
            available_beds: 0,
            monthly_rent_cents: 75_000,
            created_at: Utc::now(),
        };
        assert!(!room.has_open_beds());
        assert_eq!(room.monthly_rent().cents(), 75_000);
    }
}
