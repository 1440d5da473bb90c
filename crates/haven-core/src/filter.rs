//! # Catalog Filter
//!
//! Typed filter for the property catalog, separated from SQL assembly so
//! the composition rules are unit-testable in isolation from rendering.
//!
//! ## Bound Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Price/Rent Bound Composition                           │
//! │                                                                     │
//! │  lower bound:  applied only when min > 0                            │
//! │  upper bound:  applied only when max > min   ← note: strictly       │
//! │                                                                     │
//! │  min=0,   max=0    → no bounds                                      │
//! │  min=100, max=0    → rent >= 100                                    │
//! │  min=100, max=100  → rent >= 100 (upper bound silently dropped!)    │
//! │  min=100, max=500  → rent between 100 and 500 inclusive             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `max == min` case intentionally drops the upper bound. The filter
//! views feed `max` a widget whose floor is `min`, so an untouched widget
//! reads `max == min` and means "no upper limit". Changing this to an
//! equality filter would turn the untouched widget into an exact-price
//! match and empty most searches.

use serde::{Deserialize, Serialize};

use crate::types::{ListingKind, PropertyKind};

/// Catalog search filter over available properties.
///
/// ## Usage
/// ```rust
/// use haven_core::filter::PropertyFilter;
/// use haven_core::types::PropertyKind;
///
/// let filter = PropertyFilter::rentals()
///     .with_kind(PropertyKind::Apartment)
///     .with_min_cents(100_000)
///     .with_max_cents(250_000);
///
/// assert_eq!(filter.effective_min(), Some(100_000));
/// assert_eq!(filter.effective_max(), Some(250_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Fixed per catalog tab: rent listings or sale listings.
    pub listing: ListingKind,

    /// Exact property-kind match; `None` means "All".
    pub kind: Option<PropertyKind>,

    /// Inclusive lower bound in cents; 0 means unset.
    /// Applies to rent for rent listings, cost for sale listings.
    pub min_cents: i64,

    /// Inclusive upper bound in cents; only effective when > `min_cents`.
    pub max_cents: i64,
}

impl PropertyFilter {
    /// Filter over rent listings with no further constraints.
    pub fn rentals() -> Self {
        PropertyFilter {
            listing: ListingKind::Rent,
            kind: None,
            min_cents: 0,
            max_cents: 0,
        }
    }

    /// Filter over sale listings with no further constraints.
    pub fn sales() -> Self {
        PropertyFilter {
            listing: ListingKind::Sale,
            kind: None,
            min_cents: 0,
            max_cents: 0,
        }
    }

    /// Restricts to an exact property kind.
    pub fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the inclusive lower bound in cents.
    pub fn with_min_cents(mut self, cents: i64) -> Self {
        self.min_cents = cents;
        self
    }

    /// Sets the inclusive upper bound in cents.
    pub fn with_max_cents(mut self, cents: i64) -> Self {
        self.max_cents = cents;
        self
    }

    /// The lower bound actually applied, if any.
    pub fn effective_min(&self) -> Option<i64> {
        (self.min_cents > 0).then_some(self.min_cents)
    }

    /// The upper bound actually applied, if any.
    ///
    /// Strictly-greater comparison: `max == min` means no upper bound.
    /// See the module docs before "fixing" this.
    pub fn effective_max(&self) -> Option<i64> {
        (self.max_cents > self.min_cents).then_some(self.max_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
