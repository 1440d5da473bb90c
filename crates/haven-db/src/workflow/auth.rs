//! # Authentication Workflows
//!
//! Login and the two registration flows. Registration writes the
//! credential row and the profile row in one transaction, sharing a
//! single freshly minted id - a half-registered account can never exist.

use tracing::{info, warn};
use uuid::Uuid;

use crate::pool::Database;
use crate::workflow::{WorkflowError, WorkflowResult};
use haven_core::{
    validation, Credential, Customer, CustomerSignup, HomeOwner, OwnerSignup, Role, Session,
    VerificationStatus,
};

/// Checks a login pair against the credential store.
///
/// Blank input short-circuits to the same rejection as a wrong password;
/// the caller re-renders the login form either way.
pub async fn login(db: &Database, username: &str, password: &str) -> WorkflowResult<Session> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(WorkflowError::InvalidCredentials);
    }

    let credential = match db
        .credentials()
        .find_by_login(username.trim(), password)
        .await?
    {
        Some(credential) => credential,
        None => {
            warn!(username = %username.trim(), "Login rejected");
            return Err(WorkflowError::InvalidCredentials);
        }
    };

    info!(username = %credential.username, role = %credential.role, "Login succeeded");

    Ok(Session {
        user_id: credential.id,
        username: credential.username,
        role: credential.role,
    })
}

/// Registers a customer account.
///
/// Validates the form, pre-checks the username, then inserts credential
/// and profile together. The UNIQUE constraint on usernames still
/// backstops the pre-check under concurrent signups.
pub async fn register_customer(db: &Database, form: CustomerSignup) -> WorkflowResult<Customer> {
    validation::validate_customer_signup(&form)?;

    let username = form.username.trim().to_string();
    if db.credentials().username_exists(&username).await? {
        return Err(WorkflowError::DuplicateUsername(username));
    }

    let id = Uuid::new_v4().to_string();
    let credential = Credential {
        id: id.clone(),
        username: username.clone(),
        password: form.password,
        role: Role::Customer,
    };
    let customer = Customer {
        customer_id: id,
        username,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
    };

    let mut tx = db.pool().begin().await?;

    sqlx::query("INSERT INTO credentials (id, username, password, role) VALUES (?1, ?2, ?3, ?4)")
        .bind(&credential.id)
        .bind(&credential.username)
        .bind(&credential.password)
        .bind(credential.role)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO customers (customer_id, username, first_name, last_name, email, phone)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&customer.customer_id)
    .bind(&customer.username)
    .bind(&customer.first_name)
    .bind(&customer.last_name)
    .bind(&customer.email)
    .bind(&customer.phone)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(username = %customer.username, "Customer registered");

    Ok(customer)
}

/// Registers a homeowner account. Same shape as customer registration;
/// the profile additionally starts with `Pending` verification.
pub async fn register_owner(db: &Database, form: OwnerSignup) -> WorkflowResult<HomeOwner> {
    validation::validate_owner_signup(&form)?;

    let username = form.username.trim().to_string();
    if db.credentials().username_exists(&username).await? {
        return Err(WorkflowError::DuplicateUsername(username));
    }

    let id = Uuid::new_v4().to_string();
    let credential = Credential {
        id: id.clone(),
        username: username.clone(),
        password: form.password,
        role: Role::Owner,
    };
    let owner = HomeOwner {
        owner_id: id,
        username,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        verification_status: VerificationStatus::Pending,
    };

    let mut tx = db.pool().begin().await?;

    sqlx::query("INSERT INTO credentials (id, username, password, role) VALUES (?1, ?2, ?3, ?4)")
        .bind(&credential.id)
        .bind(&credential.username)
        .bind(&credential.password)
        .bind(credential.role)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO home_owners
            (owner_id, username, first_name, last_name, email, phone, verification_status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&owner.owner_id)
    .bind(&owner.username)
    .bind(&owner.first_name)
    .bind(&owner.last_name)
    .bind(&owner.email)
    .bind(&owner.phone)
    .bind(owner.verification_status)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(username = %owner.username, "Homeowner registered");

    Ok(owner)
}

// =============================================================================
// Unit Tests
// =============================================================================
