use std::fmt;

use serde::Serialize;

pub const MAX_INITIAL_INVESTMENT: f64 = 100_000_000.0;
pub const MAX_ANNUAL_CONTRIBUTION: f64 = 10_000_000.0;
pub const MAX_EXPECTED_RETURN_PERCENT: f64 = 100.0;
pub const MIN_INVESTMENT_PERIOD_YEARS: u32 = 1;
pub const MAX_INVESTMENT_PERIOD_YEARS: u32 = 100;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputField {
    InitialInvestment,
    AnnualContribution,
    ExpectedReturnPercent,
    InvestmentPeriodYears,
}

impl InputField {
    pub fn as_str(self) -> &'static str {
        match self {
            InputField::InitialInvestment => "initialInvestment",
            InputField::AnnualContribution => "annualContribution",
            InputField::ExpectedReturnPercent => "expectedReturnPercent",
            InputField::InvestmentPeriodYears => "investmentPeriodYears",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputParameters {
    pub initial_investment: f64,
    pub annual_contribution: f64,
    /// Annual return in percent, e.g. 5 for 5%.
    pub expected_return_percent: f64,
    pub investment_period_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyResult {
    pub year: u32,
    pub investment_value: f64,
    pub interest: f64,
    pub cumulative_interest: f64,
    pub capital_contributed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_invested: f64,
    pub total_interest: f64,
    pub final_value: f64,
    pub total_return_percent: f64,
}
