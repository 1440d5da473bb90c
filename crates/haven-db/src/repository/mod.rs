//! # Repository Layer
//!
//! One repository per entity, each a thin struct over the shared
//! connection pool. Repositories own single-statement reads and writes;
//! multi-statement invariants (registration, purchase, sharing) live in
//! the `workflow` module, which composes its own transactions.

pub mod credential;
pub mod customer;
pub mod owner;
pub mod property;
pub mod report;
pub mod shared_room;
pub mod transaction;

pub use credential::CredentialRepository;
pub use customer::CustomerRepository;
pub use owner::OwnerRepository;
pub use property::{PropertyListing, PropertyRepository};
pub use report::{
    CityCount, KindCount, KindIncome, OverviewStats, OwnerFinancials, ReportRepository, RoleCount,
    SharingParticipant, UserRow,
};
pub use shared_room::{RoomListing, SharedRoomRepository};
pub use transaction::{PurchaseRecord, TransactionRepository};
