//! # Admin Workflows
//!
//! Destructive platform actions, each gated on an admin session. The
//! heavy lifting (cascading deletes, conditional updates) lives in the
//! repositories; this module is the role guard in front of them.

use crate::pool::Database;
use crate::workflow::{require_role, WorkflowError, WorkflowResult};
use haven_core::{Role, Session, VerificationStatus};

/// Sets a homeowner's verification status.
pub async fn set_owner_verification(
    db: &Database,
    session: &Session,
    owner_id: &str,
    status: VerificationStatus,
) -> WorkflowResult<()> {
    require_role(session, Role::Admin)?;
    db.owners().set_verification_status(owner_id, status).await?;
    Ok(())
}

/// Forces a property's availability flag, e.g. to relist a property
/// whose rental ended. Purchases never set a property back to
/// available; only this action does.
pub async fn set_property_availability(
    db: &Database,
    session: &Session,
    property_id: &str,
    available: bool,
) -> WorkflowResult<()> {
    require_role(session, Role::Admin)?;
    db.properties().set_availability(property_id, available).await?;
    Ok(())
}

/// Removes a customer account with its full history.
pub async fn remove_customer(
    db: &Database,
    session: &Session,
    customer_id: &str,
) -> WorkflowResult<()> {
    require_role(session, Role::Admin)?;
    db.customers().delete_cascade(customer_id).await?;
    Ok(())
}

/// Removes a property listing with its room, interests and history.
pub async fn remove_property(
    db: &Database,
    session: &Session,
    property_id: &str,
) -> WorkflowResult<()> {
    require_role(session, Role::Admin)?;
    db.properties().delete_cascade(property_id).await?;
    Ok(())
}

/// Manually takes one bed out of a shared room, for occupants arranged
/// outside the platform. Fails on a full room rather than going
/// negative.
pub async fn take_bed(db: &Database, session: &Session, room_id: &str) -> WorkflowResult<()> {
    require_role(session, Role::Admin)?;

    if db.shared_rooms().decrement_beds(room_id).await? {
        Ok(())
    } else {
        Err(WorkflowError::RoomFull(room_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
