use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use hearth_core::budgets::{Budget, BudgetUpsert, BudgetWindow};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

/// `null` when no budget overlaps the window.
async fn find_budget(
    State(state): State<Arc<AppState>>,
    Query(window): Query<BudgetWindow>,
) -> ApiResult<Json<Option<Budget>>> {
    let budget = state
        .budget_service
        .find_budget(&window.start_date, &window.end_date)?;
    Ok(Json(budget))
}

async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Json(budget): Json<BudgetUpsert>,
) -> ApiResult<Json<Value>> {
    let id = state.budget_service.upsert_budget(budget).await?;
    Ok(Json(json!({ "id": id })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/budgets", get(find_budget).put(upsert_budget))
}
