//! Expense summary handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::statement::load;
use crate::{AppError, AppState};
use outflow_core::{aggregate, ExpenseBuckets, Granularity};

async fn summarize(state: &AppState, granularity: Granularity) -> Result<ExpenseBuckets, AppError> {
    let statement = load(state).await?;
    Ok(aggregate(&statement.records, granularity))
}

/// GET /daily_expenses - Expense totals keyed by `YYYY/MM/DD`
pub async fn daily_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpenseBuckets>, AppError> {
    Ok(Json(summarize(&state, Granularity::Day).await?))
}

/// GET /weekly_expenses - Expense totals keyed by ISO week (`YYYY-Www`)
pub async fn weekly_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpenseBuckets>, AppError> {
    Ok(Json(summarize(&state, Granularity::Week).await?))
}

/// GET /monthly_expenses - Expense totals keyed by `YYYY/MM`
pub async fn monthly_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpenseBuckets>, AppError> {
    Ok(Json(summarize(&state, Granularity::Month).await?))
}

/// GET /category_expenses - Expense totals keyed by category label
pub async fn category_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpenseBuckets>, AppError> {
    Ok(Json(summarize(&state, Granularity::Category).await?))
}

/// GET /expenses/:granularity - Expense totals for any granularity
pub async fn expenses_by(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
) -> Result<Json<ExpenseBuckets>, AppError> {
    let granularity: Granularity = granularity
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    Ok(Json(summarize(&state, granularity).await?))
}
