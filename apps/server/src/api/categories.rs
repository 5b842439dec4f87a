use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use hearth_core::categories::{
    suggestion::{Categorization, CategorySuggestion},
    Category, CategoryUpdate, NewCategory,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct DescriptionRequest {
    description: String,
}

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories()?;
    Ok(Json(categories))
}

async fn add_category(
    State(state): State<Arc<AppState>>,
    Json(category): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = state.category_service.add_category(category).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<Json<Value>> {
    let updated = state.category_service.update_category(&id, update).await?;
    Ok(Json(json!({ "updated": updated })))
}

/// Always answers 200; a failed cascade reads as `{"deleted": false}`.
async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<Value> {
    let deleted = state.category_service.delete_category(&id).await;
    Json(json!({ "deleted": deleted }))
}

async fn suggest_category(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DescriptionRequest>,
) -> ApiResult<Json<CategorySuggestion>> {
    let suggestion = state
        .category_service
        .suggest_category(&request.description)?;
    Ok(Json(suggestion))
}

async fn categorize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DescriptionRequest>,
) -> ApiResult<Json<Categorization>> {
    let categorization = state.category_service.categorize(&request.description)?;
    Ok(Json(categorization))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(add_category))
        .route("/categories/suggest", post(suggest_category))
        .route("/categories/categorize", post(categorize))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
