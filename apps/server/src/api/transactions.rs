use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use hearth_core::metrics::{AverageAmount, AverageQuery};
use hearth_core::query::GroupTotal;
use hearth_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionGroupQuery, TransactionQuery,
    TransactionUpdate,
};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.list_transactions(&query)?;
    Ok(Json(transactions))
}

async fn add_transaction(
    State(state): State<Arc<AppState>>,
    Json(transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.transaction_service.add_transaction(transaction).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<TransactionUpdate>,
) -> ApiResult<Json<Value>> {
    let updated = state
        .transaction_service
        .update_transaction(&id, update)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let deleted = state.transaction_service.delete_transaction(&id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}

async fn sum_transactions(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TransactionFilter>,
) -> ApiResult<Json<Value>> {
    let total = state.transaction_service.sum_transactions(&filter)?;
    Ok(Json(json!({ "total": total })))
}

async fn group_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionGroupQuery>,
) -> ApiResult<Json<Vec<GroupTotal>>> {
    let groups = state.transaction_service.group_transactions(&query)?;
    Ok(Json(groups))
}

async fn average_transaction_amount(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AverageQuery>,
) -> ApiResult<Json<AverageAmount>> {
    let average = state.metrics_service.average_transaction_amount(&query)?;
    Ok(Json(average))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(add_transaction),
        )
        .route("/transactions/total", get(sum_transactions))
        .route("/transactions/groups", get(group_transactions))
        .route("/transactions/average", get(average_transaction_amount))
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
}
