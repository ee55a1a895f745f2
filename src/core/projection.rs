use super::error::InvalidInputError;
use super::types::{
    InputField, InputParameters, MAX_ANNUAL_CONTRIBUTION, MAX_EXPECTED_RETURN_PERCENT,
    MAX_INITIAL_INVESTMENT, MAX_INVESTMENT_PERIOD_YEARS, MIN_INVESTMENT_PERIOD_YEARS,
    ProjectionSummary, YearlyResult,
};

/// Projects the plan year by year.
///
/// Each field is rounded to the cent as soon as it is computed and the rounded
/// figure feeds the next computation, so rounding drift carries across years.
pub fn project(input: &InputParameters) -> Result<Vec<YearlyResult>, InvalidInputError> {
    validate(input)?;

    let rate = input.expected_return_percent / 100.0;
    let years = input.investment_period_years;
    let mut results = Vec::with_capacity(years as usize);

    let interest = round2(rate * input.initial_investment);
    let capital_contributed = round2(input.initial_investment + input.annual_contribution);
    let mut previous = YearlyResult {
        year: 1,
        investment_value: round2(capital_contributed + interest),
        interest,
        cumulative_interest: interest,
        capital_contributed,
    };
    results.push(previous);

    for year in 2..=years {
        let interest = round2(rate * previous.investment_value);
        let cumulative_interest = round2(previous.cumulative_interest + interest);
        let capital_contributed =
            round2(previous.capital_contributed + input.annual_contribution);
        previous = YearlyResult {
            year,
            investment_value: round2(capital_contributed + cumulative_interest),
            interest,
            cumulative_interest,
            capital_contributed,
        };
        results.push(previous);
    }

    log::trace!(
        "projected {years} years at {}%: final value {}",
        input.expected_return_percent,
        previous.investment_value
    );
    Ok(results)
}

/// Checks every field against its range, reporting the first failure in
/// field order.
pub fn validate(input: &InputParameters) -> Result<(), InvalidInputError> {
    check_amount(
        InputField::InitialInvestment,
        input.initial_investment,
        0.0,
        MAX_INITIAL_INVESTMENT,
    )?;
    check_amount(
        InputField::AnnualContribution,
        input.annual_contribution,
        0.0,
        MAX_ANNUAL_CONTRIBUTION,
    )?;
    check_amount(
        InputField::ExpectedReturnPercent,
        input.expected_return_percent,
        0.0,
        MAX_EXPECTED_RETURN_PERCENT,
    )?;

    let period = input.investment_period_years;
    if period < MIN_INVESTMENT_PERIOD_YEARS {
        return Err(InvalidInputError::below_minimum(
            InputField::InvestmentPeriodYears,
            MIN_INVESTMENT_PERIOD_YEARS as f64,
        ));
    }
    if period > MAX_INVESTMENT_PERIOD_YEARS {
        return Err(InvalidInputError::above_maximum(
            InputField::InvestmentPeriodYears,
            MAX_INVESTMENT_PERIOD_YEARS as f64,
        ));
    }
    Ok(())
}

/// Converts a raw year count (as sent by a form or JSON client) into the
/// period field, rejecting fractions and out-of-range values.
pub fn whole_years(value: f64) -> Result<u32, InvalidInputError> {
    let field = InputField::InvestmentPeriodYears;
    let min = MIN_INVESTMENT_PERIOD_YEARS as f64;
    check_amount(field, value, min, MAX_INVESTMENT_PERIOD_YEARS as f64)?;
    if value.fract() != 0.0 {
        return Err(InvalidInputError::not_whole_number(field, min));
    }
    Ok(value as u32)
}

fn check_amount(
    field: InputField,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::not_finite(field, min));
    }
    if value < min {
        return Err(InvalidInputError::below_minimum(field, min));
    }
    if value > max {
        return Err(InvalidInputError::above_maximum(field, max));
    }
    Ok(())
}

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Interest as a percentage of the capital put in; zero when nothing was
/// invested.
pub fn total_return_percent(total_investment: f64, total_interest: f64) -> f64 {
    if total_investment == 0.0 {
        return 0.0;
    }
    round2(total_interest / total_investment * 100.0)
}

/// Interest earned on a lump sum compounded annually. `rate` is a decimal
/// fraction (0.05 for 5%).
pub fn compound_interest(principal: f64, rate: f64, years: f64) -> f64 {
    principal * (1.0 + rate).powf(years) - principal
}

pub fn summarize(results: &[YearlyResult]) -> ProjectionSummary {
    let Some(last) = results.last() else {
        return ProjectionSummary {
            total_invested: 0.0,
            total_interest: 0.0,
            final_value: 0.0,
            total_return_percent: 0.0,
        };
    };
    ProjectionSummary {
        total_invested: last.capital_contributed,
        total_interest: last.cumulative_interest,
        final_value: last.investment_value,
        total_return_percent: total_return_percent(
            last.capital_contributed,
            last.cumulative_interest,
        ),
    }
}
