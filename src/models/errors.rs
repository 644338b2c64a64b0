use thiserror::Error;

/// The catalog could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Menu service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Menu response was malformed: {message}")]
    Malformed { message: String },
}

/// The order could not be placed. The upstream reason is optional.
#[derive(Debug, Error)]
#[error("{}", self.message())]
pub struct SubmitError {
    pub reason: Option<String>,
}

/// Fallback text when a submission failure carries no reason.
pub const GENERIC_SUBMIT_ERROR: &str =
    "Something went wrong placing your order. Please try again.";

impl SubmitError {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    pub fn unexplained() -> Self {
        Self { reason: None }
    }

    /// User-facing message, never empty.
    pub fn message(&self) -> String {
        match &self.reason {
            Some(reason) if !reason.trim().is_empty() => reason.clone(),
            _ => GENERIC_SUBMIT_ERROR.to_string(),
        }
    }
}

/// Service-level errors surfaced by the ordering session.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Menu is still loading")]
    MenuNotReady,

    #[error("Menu is unavailable: {reason}")]
    MenuUnavailable { reason: String },

    #[error("Menu item not found: {item_id}")]
    ItemNotFound { item_id: String },

    #[error("Cannot submit an empty cart")]
    EmptyCart,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Order submission failed: {source}")]
    Submit {
        #[from]
        source: SubmitError,
    },
}

/// Validation errors for checkout input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServiceError::ItemNotFound {
            item_id: "P001".to_string(),
        };
        assert_eq!(error.to_string(), "Menu item not found: P001");

        let validation_error = ValidationError::RequiredField {
            field: "customer_name".to_string(),
        };
        assert_eq!(
            validation_error.to_string(),
            "Required field missing: customer_name"
        );
    }

    #[test]
    fn test_submit_error_message_fallback() {
        let with_reason = SubmitError::with_reason("Kitchen is closed.");
        assert_eq!(with_reason.message(), "Kitchen is closed.");

        let unexplained = SubmitError::unexplained();
        assert_eq!(unexplained.message(), GENERIC_SUBMIT_ERROR);

        let blank_reason = SubmitError::with_reason("   ");
        assert_eq!(blank_reason.message(), GENERIC_SUBMIT_ERROR);
    }

    #[test]
    fn test_error_conversion() {
        let validation_error = ValidationError::RequiredField {
            field: "delivery_address".to_string(),
        };

        let service_error: ServiceError = validation_error.into();
        match service_error {
            ServiceError::ValidationError { message } => {
                assert!(message.contains("delivery_address"));
            }
            _ => panic!("Expected ValidationError conversion"),
        }
    }

    #[test]
    fn test_submit_error_wrapping() {
        let submit_error =
            SubmitError::with_reason("Server rejected the order due to invalid data.");

        let service_error: ServiceError = submit_error.into();
        match service_error {
            ServiceError::Submit { source } => {
                assert_eq!(
                    source.message(),
                    "Server rejected the order due to invalid data."
                );
            }
            _ => panic!("Expected Submit error"),
        }
    }
}
