//! # haven-db
//!
//! SQLite persistence and role workflows for Haven.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          haven-db                                   │
//! │                                                                     │
//! │  ┌────────────┐  ┌──────────────┐  ┌─────────────────────────────┐  │
//! │  │   pool     │  │  migrations  │  │         workflow            │  │
//! │  │ Database   │  │  embedded    │  │  login / signup / purchase  │  │
//! │  │ DbConfig   │  │  SQL files   │  │  sharing / admin actions    │  │
//! │  └─────┬──────┘  └──────────────┘  └──────────────┬──────────────┘  │
//! │        │                                          │                 │
//! │        ▼                                          ▼                 │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                       repository                              │  │
//! │  │  credential / owner / customer / property / shared_room /     │  │
//! │  │  transaction / report                                         │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories own single-statement queries; workflows own the
//! multi-statement invariants and run them in database transactions.
//!
//! ## Usage
//! ```rust,ignore
//! use haven_db::{Database, DbConfig};
//! use haven_db::workflow::auth;
//!
//! let db = Database::new(DbConfig::new("./haven.db")).await?;
//! let session = auth::login(&db, "john.doe", "pass123").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{
    CredentialRepository, CustomerRepository, OwnerRepository, PropertyListing,
    PropertyRepository, PurchaseRecord, ReportRepository, RoomListing, SharedRoomRepository,
    TransactionRepository,
};
pub use workflow::{Purchase, SharingApplication, WorkflowError, WorkflowResult};

// Re-export core types so binaries can depend on haven-db alone.
pub use haven_core::{
    Credential, Customer, CustomerSignup, HomeOwner, ListingKind, Money, NewProperty,
    OwnerSignup, Property, PropertyFilter, PropertyKind, Receipt, Role, Session, SharedRoom,
    VerificationStatus,
};
