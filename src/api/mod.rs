//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoint that runs a yearly calculation
//! for one contract type.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, YearlyReport};
pub use state::AppState;
