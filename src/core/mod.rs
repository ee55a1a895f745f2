mod error;
mod projection;
mod types;

pub use error::{InvalidInputError, InvalidReason};
pub use projection::{
    compound_interest, project, round2, summarize, total_return_percent, validate, whole_years,
};
pub use types::{
    InputField, InputParameters, MAX_ANNUAL_CONTRIBUTION, MAX_EXPECTED_RETURN_PERCENT,
    MAX_INITIAL_INVESTMENT, MAX_INVESTMENT_PERIOD_YEARS, MIN_INVESTMENT_PERIOD_YEARS,
    ProjectionSummary, YearlyResult,
};
