use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use hearth_core::utils::format_utils::format_currency;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct DaysBetweenParams {
    date1: String,
    date2: String,
}

#[derive(Deserialize)]
struct FormatCurrencyParams {
    amount: String,
}

async fn days_between(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DaysBetweenParams>,
) -> ApiResult<Json<Value>> {
    let days = state
        .metrics_service
        .days_between(&params.date1, &params.date2)?;
    Ok(Json(json!({ "days": days })))
}

async fn format_currency_handler(
    Query(params): Query<FormatCurrencyParams>,
) -> ApiResult<Json<Value>> {
    let formatted = format_currency(&params.amount)?;
    Ok(Json(json!({ "formatted": formatted })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/utilities/days-between", get(days_between))
        .route("/utilities/format-currency", get(format_currency_handler))
}
