//! Menu routes
//!
//! Reads are public; writes require a bearer token.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MenuService;
use crate::state::AppState;
use super::extract::{ApiJson, ApiPath};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use hotel_shared::models::MenuItem;
use hotel_shared::types::{
    CreateMenuItemRequest, MenuQuery, MessageResponse, UpdateMenuItemRequest,
};
use uuid::Uuid;

/// Create menu routes
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

/// GET /menu?taste=<taste>
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let items = MenuService::list(state.menu.as_ref(), query.taste.as_deref()).await?;
    Ok(Json(items))
}

/// POST /menu
async fn create_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(req): ApiJson<CreateMenuItemRequest>,
) -> ApiResult<Json<MenuItem>> {
    let item = MenuService::create(state.menu.as_ref(), req).await?;
    Ok(Json(item))
}

/// GET /menu/:id
async fn get_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MenuItem>> {
    let item = MenuService::get(state.menu.as_ref(), id).await?;
    Ok(Json(item))
}

/// PUT /menu/:id
async fn update_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateMenuItemRequest>,
) -> ApiResult<Json<MenuItem>> {
    let item = MenuService::update(state.menu.as_ref(), id, req).await?;
    Ok(Json(item))
}

/// DELETE /menu/:id
async fn delete_item(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    MenuService::delete(state.menu.as_ref(), id).await?;
    Ok(Json(MessageResponse {
        message: "Menu item deleted".to_string(),
    }))
}
