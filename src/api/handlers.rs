//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_yearly_result_of_employer, calculate_yearly_result_of_employment,
    calculate_yearly_result_of_mandate, calculate_yearly_result_of_self_employment,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, YearlyReport};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the yearly result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // serde's message is in the body text
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let year = request.year();
    let kind = request.kind();
    let month_count = request.month_count();

    let start_time = Instant::now();
    match perform_calculation(request, state.config()) {
        Ok(report) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                calculation = kind,
                year,
                months = month_count,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                year,
                report,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                calculation = kind,
                year,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Runs the yearly calculation a request asks for.
///
/// The year's parameters are looked up before anything is calculated, so
/// an unknown year fails without falling back to another year's rates.
fn perform_calculation(
    request: CalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<YearlyReport> {
    let params = config.year(request.year())?;

    let report = match request {
        CalculationRequest::ContractOfMandate { months, .. } => {
            YearlyReport::ContractOfMandate(calculate_yearly_result_of_mandate(&months, params)?)
        }
        CalculationRequest::ContractOfEmployment { months, .. } => {
            YearlyReport::ContractOfEmployment(calculate_yearly_result_of_employment(
                &months, params,
            )?)
        }
        CalculationRequest::Employer { months, .. } => {
            YearlyReport::Employer(calculate_yearly_result_of_employer(&months, params)?)
        }
        CalculationRequest::SelfEmployment {
            tax_rules, months, ..
        } => YearlyReport::SelfEmployment(calculate_yearly_result_of_self_employment(
            &months, &tax_rules, params,
        )?),
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MandateMonthlyInput, Month};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/pl").expect("Failed to load config");
        AppState::new(config)
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest::ContractOfMandate {
            year: 2021,
            months: vec![MandateMonthlyInput {
                is_pension_contribution: false,
                is_rent_contribution: false,
                is_sick_contribution: false,
                is_health_contribution: false,
                ..MandateMonthlyInput::new(dec("5000"))
            }],
        }
    }

    async fn post_json(body: String) -> axum::response::Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = post_json(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.year, 2021);
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
        match result.report {
            YearlyReport::ContractOfMandate(year) => {
                assert_eq!(year.rows.len(), 2);
                assert_eq!(year.rows[0].net_amount, dec("4320.00"));
                assert_eq!(year.rows[1].month, Month::WholeYear);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_months_returns_400() {
        let body = r#"{ "calculation": "contract_of_mandate", "year": 2021 }"#;

        let response = post_json(body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("months"));
    }

    #[tokio::test]
    async fn test_unconfigured_year_returns_422() {
        let body = r#"{
            "calculation": "contract_of_mandate",
            "year": 2019,
            "months": [{ "gross_amount": "5000" }]
        }"#;

        let response = post_json(body.to_string()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "YEAR_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_negative_gross_returns_400() {
        let body = r#"{
            "calculation": "contract_of_employment",
            "year": 2023,
            "months": [{ "gross_amount": "5000" }, { "gross_amount": "-10" }]
        }"#;

        let response = post_json(body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_MONTHLY_INPUT");
        assert!(error.message.contains("month 1"));
    }

    #[test]
    fn test_perform_calculation_selects_year() {
        let config = ConfigLoader::load("./config/pl").unwrap();
        let request = CalculationRequest::ContractOfEmployment {
            year: 2023,
            months: vec![crate::models::EmploymentMonthlyInput::new(dec("5000"))],
        };

        let report = perform_calculation(request, &config).unwrap();

        match report {
            YearlyReport::ContractOfEmployment(year) => {
                assert_eq!(year.rows[0].tax_amount, dec("188"));
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }
}
