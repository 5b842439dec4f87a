use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use hearth_core::goals::{Goal, GoalQuery, GoalUpdate, NewGoal};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoalQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.list_goals(&query)?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state.goal_service.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.update_goal(&id, update).await?;
    Ok(Json(g))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/{id}", put(update_goal))
}
