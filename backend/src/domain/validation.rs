//! Input checks shared by the goal and transaction services.
//!
//! The form layer normally rejects bad input before it reaches the services;
//! every mutation re-runs these checks and fails the same way either way.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::errors::ValidationError;
use crate::domain::period_calculator::calendar_day;

/// Parse a user-entered amount. Accepts a decimal comma as well as a dot.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized)
        .map_err(|_| ValidationError::InvalidAmount(input.trim().to_string()))?;
    validate_amount(amount)
}

pub fn validate_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Returns the trimmed description
pub fn validate_description(description: &str, max_length: usize) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if trimmed.chars().count() > max_length {
        return Err(ValidationError::DescriptionTooLong { max: max_length });
    }
    Ok(trimmed.to_string())
}

/// Returns the trimmed title
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Period bounds are compared by calendar day in the start's offset, the
/// offset the period was entered in. Readouts count days in the offset of
/// `now` instead, so when the two offsets differ a bound can fall on a
/// neighbouring date there (an inverted result still reads as one day).
pub fn validate_period(
    start: &DateTime<FixedOffset>,
    end: &DateTime<FixedOffset>,
) -> Result<(), ValidationError> {
    let offset = start.offset();
    let start_day = calendar_day(start, offset);
    let end_day = calendar_day(end, offset);
    if start_day > end_day {
        return Err(ValidationError::PeriodStartAfterEnd {
            start: start_day,
            end: end_day,
        });
    }
    Ok(())
}
