use super::{CheckoutDraft, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 120;
pub const MAX_DELIVERY_ADDRESS_LENGTH: usize = 400;

impl Validate for CheckoutDraft {
    fn validate(&self) -> ValidationResult<()> {
        validate_customer_name(&self.customer_name)?;
        validate_delivery_address(&self.delivery_address)?;
        Ok(())
    }
}

/// Validate the customer name on the checkout form
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_text(name, "customer_name", MAX_CUSTOMER_NAME_LENGTH)
}

/// Validate the delivery address on the checkout form
pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    validate_required_text(address, "delivery_address", MAX_DELIVERY_ADDRESS_LENGTH)
}

fn validate_required_text(value: &str, field: &str, max_length: usize) -> ValidationResult<()> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    if trimmed.len() > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
            actual_length: trimmed.len(),
        });
    }

    // Check for invalid characters (basic validation)
    if trimmed
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = CheckoutDraft::new("Ada Lovelace", "12 Via Roma, Napoli");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_delivery_address("").is_err());
        assert!(validate_delivery_address("\t\n").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(validate_customer_name("  Ada  ").is_ok());
        assert!(validate_delivery_address(" 12 Via Roma ").is_ok());
    }

    #[test]
    fn test_length_limits() {
        assert!(validate_customer_name(&"a".repeat(MAX_CUSTOMER_NAME_LENGTH)).is_ok());
        assert!(validate_customer_name(&"a".repeat(MAX_CUSTOMER_NAME_LENGTH + 1)).is_err());

        assert!(validate_delivery_address(&"a".repeat(MAX_DELIVERY_ADDRESS_LENGTH)).is_ok());
        assert!(validate_delivery_address(&"a".repeat(MAX_DELIVERY_ADDRESS_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(validate_customer_name("Ada\x00Lovelace").is_err());
        // Newlines are fine in a multi-line address field
        assert!(validate_delivery_address("12 Via Roma\nNapoli").is_ok());
    }

    #[test]
    fn test_draft_validation_reports_first_failure() {
        let draft = CheckoutDraft::new("", "12 Via Roma");
        match draft.validate().unwrap_err() {
            ValidationError::RequiredField { field } => assert_eq!(field, "customer_name"),
            other => panic!("Unexpected error: {other}"),
        }
    }
}
