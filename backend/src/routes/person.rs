//! Staff routes
//!
//! `signup` and `login` are public. Everything else sits behind the
//! bearer-token gate.

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::services::{AuthService, PersonService};
use crate::state::AppState;
use super::extract::{ApiJson, ApiPath};
use axum::{
    extract::{Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use hotel_shared::models::Person;
use hotel_shared::types::{
    LoginRequest, MessageResponse, PersonQuery, SignupRequest, SignupResponse, TokenResponse,
    UpdatePersonRequest,
};
use uuid::Uuid;

/// Create staff routes
pub fn person_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_people))
        .route("/profile", get(get_profile))
        .route(
            "/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(protected)
}

/// POST /person/signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let response =
        AuthService::signup(state.people.as_ref(), state.passwords(), state.jwt(), req).await?;
    Ok(Json(response))
}

/// POST /person/login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let response =
        AuthService::login(state.people.as_ref(), state.passwords(), state.jwt(), req).await?;
    Ok(Json(response))
}

/// GET /person/profile
async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Person>> {
    let person = PersonService::profile(state.people.as_ref(), &user).await?;
    Ok(Json(person))
}

/// GET /person?work=<type>
async fn list_people(
    State(state): State<AppState>,
    Query(query): Query<PersonQuery>,
) -> ApiResult<Json<Vec<Person>>> {
    let people = PersonService::list(state.people.as_ref(), query.work.as_deref()).await?;
    Ok(Json(people))
}

/// GET /person/:id
async fn get_person(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Person>> {
    let person = PersonService::get(state.people.as_ref(), id).await?;
    Ok(Json(person))
}

/// PUT /person/:id
async fn update_person(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdatePersonRequest>,
) -> ApiResult<Json<Person>> {
    let person =
        PersonService::update(state.people.as_ref(), state.passwords(), id, req).await?;
    Ok(Json(person))
}

/// DELETE /person/:id
async fn delete_person(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    PersonService::delete(state.people.as_ref(), id).await?;
    Ok(Json(MessageResponse {
        message: "Person deleted".to_string(),
    }))
}
