//! Error types for the projection engine.

use thiserror::Error;

use super::types::InputField;

/// Why a field was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvalidReason {
    BelowMinimum,
    AboveMaximum,
    /// NaN or infinite. Reported against the field's lower bound.
    NotFinite,
    /// Fractional year count.
    NotWholeNumber,
}

/// Input rejected before any yearly result is produced.
///
/// The message is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{}", describe(.field, .reason, .bound))]
pub struct InvalidInputError {
    pub field: InputField,
    pub reason: InvalidReason,
    pub bound: f64,
}

impl InvalidInputError {
    pub fn below_minimum(field: InputField, bound: f64) -> Self {
        Self {
            field,
            reason: InvalidReason::BelowMinimum,
            bound,
        }
    }

    pub fn above_maximum(field: InputField, bound: f64) -> Self {
        Self {
            field,
            reason: InvalidReason::AboveMaximum,
            bound,
        }
    }

    pub fn not_finite(field: InputField, bound: f64) -> Self {
        Self {
            field,
            reason: InvalidReason::NotFinite,
            bound,
        }
    }

    pub fn not_whole_number(field: InputField, bound: f64) -> Self {
        Self {
            field,
            reason: InvalidReason::NotWholeNumber,
            bound,
        }
    }
}

fn describe(field: &InputField, reason: &InvalidReason, bound: &f64) -> String {
    match reason {
        InvalidReason::BelowMinimum => format!("{field} must be >= {bound}"),
        InvalidReason::AboveMaximum => format!("{field} must be <= {bound}"),
        InvalidReason::NotFinite => format!("{field} must be a finite number >= {bound}"),
        InvalidReason::NotWholeNumber => format!("{field} must be a whole number >= {bound}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_field_and_bound() {
        let err = InvalidInputError::below_minimum(InputField::InitialInvestment, 0.0);
        assert_eq!(err.to_string(), "initialInvestment must be >= 0");

        let err = InvalidInputError::above_maximum(InputField::AnnualContribution, 10_000_000.0);
        assert_eq!(err.to_string(), "annualContribution must be <= 10000000");
    }

    #[test]
    fn not_finite_message_mentions_lower_bound() {
        let err = InvalidInputError::not_finite(InputField::ExpectedReturnPercent, 0.0);
        assert_eq!(
            err.to_string(),
            "expectedReturnPercent must be a finite number >= 0"
        );
    }

    #[test]
    fn not_whole_number_message_mentions_lower_bound() {
        let err = InvalidInputError::not_whole_number(InputField::InvestmentPeriodYears, 1.0);
        assert_eq!(
            err.to_string(),
            "investmentPeriodYears must be a whole number >= 1"
        );
    }
}
