//! # Validation Module
//!
//! Input validation for Haven forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Rendered form                                             │
//! │  ├── Basic format checks (empty, length)                            │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation, before any write  │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL constraints                                           │
//! │  ├── UNIQUE constraints (username, room per property)               │
//! │  └── Foreign key constraints                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejection happens before a single row is written; the caller
//! re-prompts the user with the error message.

use crate::error::ValidationError;
use crate::types::{CustomerSignup, NewProperty, OwnerSignup};
use crate::{MAX_FIELD_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a required field is present and within length limits.
///
/// ## Example
/// ```rust
/// use haven_core::validation::validate_required;
///
/// assert!(validate_required("username", "john.doe").is_ok());
/// assert!(validate_required("username", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}

/// Validates a password/confirmation pair.
///
/// Both must be non-blank and equal. Comparison is exact - plaintext
/// credential storage is retained by explicit non-goal.
pub fn validate_password_pair(password: &str, confirm: &str) -> ValidationResult<()> {
    validate_required("password", password)?;
    validate_required("confirm_password", confirm)?;

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// Validates an email address.
///
/// Deliberately shallow: requires a local part, exactly one `@`, and a dot
/// in the domain. Anything stricter rejects real addresses.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    let email = email.trim();
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number: digits with optional `+`, spaces and hyphens.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required("phone", phone)?;

    let phone = phone.trim();
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least one digit".to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount in cents. Zero is allowed (a rent listing
/// carries cost 0 and vice versa).
pub fn validate_money_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates optional free text (description, amenities).
pub fn validate_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    if let Some(value) = value {
        if value.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_TEXT_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a customer signup form. Rejection order matches the view:
/// blank fields first, then password mismatch.
pub fn validate_customer_signup(form: &CustomerSignup) -> ValidationResult<()> {
    validate_required("username", &form.username)?;
    validate_required("first_name", &form.first_name)?;
    validate_required("last_name", &form.last_name)?;
    validate_email(&form.email)?;
    validate_phone(&form.phone)?;
    validate_password_pair(&form.password, &form.confirm_password)?;

    Ok(())
}

/// Validates a homeowner signup form.
pub fn validate_owner_signup(form: &OwnerSignup) -> ValidationResult<()> {
    validate_required("username", &form.username)?;
    validate_required("first_name", &form.first_name)?;
    validate_required("last_name", &form.last_name)?;
    validate_email(&form.email)?;
    validate_phone(&form.phone)?;
    validate_password_pair(&form.password, &form.confirm_password)?;

    Ok(())
}

/// Validates a new-property form.
pub fn validate_new_property(form: &NewProperty) -> ValidationResult<()> {
    validate_required("street", &form.street)?;
    validate_required("city", &form.city)?;
    validate_required("pin", &form.pin)?;
    validate_money_cents("cost", form.cost_cents)?;
    validate_money_cents("rent", form.rent_cents)?;
    validate_text("description", form.description.as_deref())?;
    validate_text("amenities", form.amenities.as_deref())?;

    if form.area_sqft < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "area_sqft".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListingKind, PropertyKind};

    fn customer_form() -> CustomerSignup {
        CustomerSignup {
            username: "john.doe".into(),
            password: "pass123".into(),
            confirm_password: "pass123".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@example.com".into(),
            phone: "555-0100".into(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("username", "john.doe").is_ok());
        assert!(validate_required("username", "").is_err());
        assert!(validate_required("username", "   ").is_err());
        assert!(validate_required("username", &"a".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_password_pair() {
        assert!(validate_password_pair("pass123", "pass123").is_ok());
        assert_eq!(
            validate_password_pair("pass123", "pass124"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_password_pair("", "").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("john@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("john.example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("555-0100").is_ok());
        assert!(validate_phone("+1 555 0100").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("---").is_err());
    }

    #[test]
    fn test_validate_money_cents() {
        assert!(validate_money_cents("rent", 0).is_ok());
        assert!(validate_money_cents("rent", 150_000).is_ok());
        assert!(validate_money_cents("rent", -1).is_err());
    }

    #[test]
    fn test_customer_signup_valid() {
        assert!(validate_customer_signup(&customer_form()).is_ok());
    }

    #[test]
    fn test_customer_signup_blank_field_rejected() {
        let mut form = customer_form();
        form.first_name = " ".into();
        assert!(matches!(
            validate_customer_signup(&form),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_customer_signup_mismatch_rejected() {
        let mut form = customer_form();
        form.confirm_password = "other".into();
        assert_eq!(
            validate_customer_signup(&form),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_new_property_negative_rent_rejected() {
        let form = NewProperty {
            kind: PropertyKind::Apartment,
            listing: ListingKind::Rent,
            cost_cents: 0,
            rent_cents: -100,
            building: "".into(),
            street: "12 Elm St".into(),
            city: "Springfield".into(),
            pin: "62701".into(),
            area_sqft: 900.0,
            latitude: 0.0,
            longitude: 0.0,
            description: None,
            amenities: None,
            sharing_allowed: false,
        };
        assert!(validate_new_property(&form).is_err());
    }
}
