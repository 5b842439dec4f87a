use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use hearth_core::household::{
    HouseholdMember, HouseholdMemberUpdate, MemberQuery, NewHouseholdMember,
};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MemberQuery>,
) -> ApiResult<Json<Vec<HouseholdMember>>> {
    let members = state.household_service.list_household_members(&query)?;
    Ok(Json(members))
}

async fn add_member(
    State(state): State<Arc<AppState>>,
    Json(member): Json<NewHouseholdMember>,
) -> ApiResult<(StatusCode, Json<HouseholdMember>)> {
    let member = state.household_service.add_household_member(member).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_member(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<HouseholdMemberUpdate>,
) -> ApiResult<Json<Value>> {
    let updated = state
        .household_service
        .update_household_member(&id, update)
        .await?;
    Ok(Json(json!({ "updated": updated })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/household/members", get(list_members).post(add_member))
        .route("/household/members/{id}", put(update_member))
}
