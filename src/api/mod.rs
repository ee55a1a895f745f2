use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    InputField, InputParameters, InvalidInputError, MIN_INVESTMENT_PERIOD_YEARS,
    ProjectionSummary, YearlyResult, project, round2, summarize, validate, whole_years,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "compound",
    about = "Year-by-year compound growth projection for a recurring-contribution plan",
    after_help = "Run `compound serve [port]` to start the HTTP report instead."
)]
pub struct Cli {
    #[arg(long, default_value_t = 10_000.0, allow_negative_numbers = true)]
    initial_investment: f64,
    #[arg(
        long,
        default_value_t = 1_200.0,
        allow_negative_numbers = true,
        help = "Contribution added at the end of every year"
    )]
    annual_contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent, e.g. 5"
    )]
    expected_return: f64,
    #[arg(long, default_value_t = 10, help = "Investment period in years (1-100)")]
    years: u32,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// A numeric field as it arrives: a JSON number, or text from a query string
/// or a careless client. Text is parsed later so failures can name the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberField {
    Number(f64),
    Text(String),
}

impl From<f64> for NumberField {
    fn from(value: f64) -> Self {
        NumberField::Number(value)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_investment: Option<NumberField>,
    annual_contribution: Option<NumberField>,
    #[serde(alias = "expectedReturn")]
    expected_return_percent: Option<NumberField>,
    #[serde(alias = "investmentPeriod", alias = "years")]
    investment_period_years: Option<NumberField>,
}

#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("Invalid API payload: {0}")]
    Malformed(String),

    #[error("{0} is required")]
    Missing(InputField),

    #[error("{0} must be a number")]
    NotANumber(InputField),

    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
}

impl RequestError {
    fn field(&self) -> Option<InputField> {
        match self {
            RequestError::Malformed(_) => None,
            RequestError::Missing(field) | RequestError::NotANumber(field) => Some(*field),
            RequestError::Invalid(err) => Some(err.field),
        }
    }

    fn bound(&self) -> Option<f64> {
        match self {
            RequestError::Invalid(err) => Some(err.bound),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    years: Vec<YearlyResult>,
    summary: ProjectionSummary,
    chart: ChartData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartData {
    labels: Vec<String>,
    investment_value: Vec<f64>,
    cumulative_interest: Vec<f64>,
    capital_contributed: Vec<f64>,
    breakdown: FinalBreakdown,
}

/// Capital against interest in the final year.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalBreakdown {
    capital: f64,
    interest: f64,
    capital_share_percent: f64,
    interest_share_percent: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bound: Option<f64>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn build_inputs(cli: &Cli) -> InputParameters {
    InputParameters {
        initial_investment: cli.initial_investment,
        annual_contribution: cli.annual_contribution,
        expected_return_percent: cli.expected_return,
        investment_period_years: cli.years,
    }
}

/// Runs one projection from the command line and returns the rendered report.
pub fn run_cli(cli: Cli) -> Result<String, String> {
    let inputs = build_inputs(&cli);
    let years = project(&inputs).map_err(|e| format!("Invalid input: {e}"))?;

    match cli.format {
        OutputFormat::Table => render_table(&years, &summarize(&years))
            .map_err(|e| format!("Failed to render projection: {e}")),
        OutputFormat::Json => {
            let response = build_project_response(years);
            serde_json::to_string_pretty(&response)
                .map(|json| format!("{json}\n"))
                .map_err(|e| format!("Failed to serialize projection: {e}"))
        }
    }
}

fn render_table(
    years: &[YearlyResult],
    summary: &ProjectionSummary,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:>18}  {:>16}  {:>16}  {:>18}",
        "Year", "Investment Value", "Interest (Year)", "Total Interest", "Invested Capital"
    )?;
    for year in years {
        writeln!(
            out,
            "{:>4}  {:>18.2}  {:>16.2}  {:>16.2}  {:>18.2}",
            year.year,
            year.investment_value,
            year.interest,
            year.cumulative_interest,
            year.capital_contributed
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total invested:  {:.2}", summary.total_invested)?;
    writeln!(out, "Total interest:  {:.2}", summary.total_interest)?;
    writeln!(out, "Final value:     {:.2}", summary.final_value)?;
    writeln!(out, "Total return:    {:.2}%", summary.total_return_percent)?;
    Ok(out)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("projection HTTP API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload).await,
        Err(rejection) => {
            request_error_response(&RequestError::Malformed(rejection.body_text()))
        }
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload).await,
        Err(rejection) => {
            request_error_response(&RequestError::Malformed(rejection.body_text()))
        }
    }
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let result = inputs_from_payload(payload)
        .and_then(|inputs| project(&inputs).map_err(RequestError::from));

    match result {
        Ok(years) => json_response(StatusCode::OK, build_project_response(years)),
        Err(err) => request_error_response(&err),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field: None,
            bound: None,
        },
    )
}

fn request_error_response(err: &RequestError) -> Response {
    log::debug!("rejected projection request: {err}");
    json_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse {
            error: err.to_string(),
            field: err.field().map(InputField::as_str),
            bound: err.bound(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<InputParameters, RequestError> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| RequestError::Malformed(e.to_string()))?;
    inputs_from_payload(payload)
}

fn required_number(value: Option<NumberField>, field: InputField) -> Result<f64, RequestError> {
    match value {
        None => Err(RequestError::Missing(field)),
        Some(NumberField::Number(v)) => Ok(v),
        Some(NumberField::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| RequestError::NotANumber(field)),
    }
}

/// Every field is required; range checks are left to the engine except for
/// the year count, which has to become an integer first.
fn inputs_from_payload(payload: ProjectPayload) -> Result<InputParameters, RequestError> {
    let initial_investment =
        required_number(payload.initial_investment, InputField::InitialInvestment)?;
    let annual_contribution =
        required_number(payload.annual_contribution, InputField::AnnualContribution)?;
    let expected_return_percent = required_number(
        payload.expected_return_percent,
        InputField::ExpectedReturnPercent,
    )?;
    let raw_years = required_number(
        payload.investment_period_years,
        InputField::InvestmentPeriodYears,
    )?;

    let mut inputs = InputParameters {
        initial_investment,
        annual_contribution,
        expected_return_percent,
        investment_period_years: MIN_INVESTMENT_PERIOD_YEARS,
    };
    match whole_years(raw_years) {
        Ok(years) => inputs.investment_period_years = years,
        Err(err) => {
            // Earlier fields still win when several are invalid.
            validate(&inputs)?;
            return Err(err.into());
        }
    }
    Ok(inputs)
}

fn build_project_response(years: Vec<YearlyResult>) -> ProjectResponse {
    let summary = summarize(&years);
    let chart = build_chart_data(&years);
    ProjectResponse {
        years,
        summary,
        chart,
    }
}

fn build_chart_data(years: &[YearlyResult]) -> ChartData {
    let (capital, interest) = years
        .last()
        .map(|last| (last.capital_contributed, last.cumulative_interest))
        .unwrap_or((0.0, 0.0));

    ChartData {
        labels: years.iter().map(|y| format!("Year {}", y.year)).collect(),
        investment_value: years.iter().map(|y| y.investment_value).collect(),
        cumulative_interest: years.iter().map(|y| y.cumulative_interest).collect(),
        capital_contributed: years.iter().map(|y| y.capital_contributed).collect(),
        breakdown: FinalBreakdown {
            capital,
            interest,
            capital_share_percent: share_percent(capital, capital + interest),
            interest_share_percent: share_percent(interest, capital + interest),
        },
    }
}

fn share_percent(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round2(part / total * 100.0)
}
