//! # haven-core: Pure Domain Logic for Haven
//!
//! This crate is the **heart** of Haven, a role-based property listing and
//! transaction platform. It contains all domain logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Haven Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Web front end (server-rendered)             │   │
//! │  │   Login ──► Catalog ──► Rent/Buy ──► Shared Rooms ──► Admin │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ haven-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ validation │ │   filter   │  │   │
//! │  │   │ Property │ │  Money   │ │   rules    │ │  catalog   │  │   │
//! │  │   │ Session  │ │  cents   │ │   checks   │ │  bounds    │  │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └────────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                haven-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, repositories,            │   │
//! │  │        and the role workflows that compose them             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Property, SharedRoom, Session, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`filter`] - Catalog filter composition rules
//! - [`error`] - Domain error types
//! - [`validation`] - Field and form validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use filter::PropertyFilter;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of beds a shared room is split into when a rental property
/// opts into sharing.
///
/// ## Business Reason
/// Sharing divides a rental into exactly two bed-level sub-units; the
/// per-bed rent is the property rent split evenly across the beds.
pub const SHARED_ROOM_BEDS: i64 = 2;

/// Maximum length for free-text profile fields (names, email, phone).
pub const MAX_FIELD_LEN: usize = 100;

/// Maximum length for property description and amenity lists.
pub const MAX_TEXT_LEN: usize = 2000;
