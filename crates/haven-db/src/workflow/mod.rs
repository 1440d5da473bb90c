//! # Role Workflows
//!
//! The operations each role can trigger, with every multi-statement
//! invariant run inside one database transaction:
//!
//! - `auth`: login and the two registration flows
//! - `listing`: owner property management
//! - `purchase`: customer rent/buy
//! - `sharing`: the shared-room lifecycle
//! - `admin`: guarded destructive actions
//!
//! Workflows take an explicit [`Session`] where the acting user matters;
//! there is no process-wide login state.

use thiserror::Error;

use crate::error::DbError;
use haven_core::{CoreError, Role, Session, ValidationError};

pub mod admin;
pub mod auth;
pub mod listing;
pub mod purchase;
pub mod sharing;

pub use purchase::Purchase;
pub use sharing::SharingApplication;

/// Outcomes of a role workflow, rendered directly to the user.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Form input rejected before any write.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Business rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Login rejected. Deliberately does not distinguish an unknown
    /// username from a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Registration rejected: the username is taken.
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// The referenced property does not exist.
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// The referenced shared room does not exist.
    #[error("Shared room not found: {0}")]
    RoomNotFound(String),

    /// The acting owner does not own the listing.
    #[error("Property {0} belongs to a different owner")]
    NotListingOwner(String),

    /// The property was taken between viewing and confirming.
    #[error("Property is no longer available: {0}")]
    PropertyUnavailable(String),

    /// The property already carries a shared room.
    #[error("Property {0} is already set up for sharing")]
    AlreadyShared(String),

    /// The customer already applied for this room.
    #[error("Already applied for room {0}")]
    AlreadyApplied(String),

    /// Every bed in the room is taken.
    #[error("No open beds left in room {0}")]
    RoomFull(String),
}

impl From<sqlx::Error> for WorkflowError {
    fn from(err: sqlx::Error) -> Self {
        WorkflowError::Db(err.into())
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Rejects sessions whose role differs from `required`.
pub(crate) fn require_role(session: &Session, required: Role) -> WorkflowResult<()> {
    if session.role == required {
        Ok(())
    } else {
        Err(CoreError::RoleForbidden {
            role: session.role.to_string(),
        }
        .into())
    }
}
