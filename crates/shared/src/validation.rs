//! Common validation utilities.

use validator::ValidationError;

/// Validates that a string contains at least one non-whitespace character.
///
/// `length(min = 1)` alone accepts strings made entirely of spaces, which
/// render as empty titles and labels in the builder.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an order index is non-negative.
pub fn validate_order_index(index: i32) -> Result<(), ValidationError> {
    if index >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("order_index_range");
        err.message = Some("Order index must be non-negative".into());
        Err(err)
    }
}
