//! Itinerary service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use common::pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest};

use crate::{
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{
        Itinerary, LoginCredentials, NewActivity, NewItinerary, NewUser, UpdateActivity,
        UpdateProfile, UserResponse,
    },
    state::AppState,
    validation,
};

/// Query parameters shared by the paginated feed endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    fn request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Response for a successful login
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Response for a user profile view
#[derive(Serialize)]
pub struct UserProfileResponse {
    pub user: UserResponse,
    pub is_following: bool,
    pub itineraries: Page<Itinerary>,
}

/// Response for an itinerary detail view
#[derive(Serialize)]
pub struct ItineraryDetailResponse {
    pub itinerary: Itinerary,
    pub activities: Vec<crate::models::Activity>,
}

/// Create the router for the itinerary service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/feed", get(feed))
        .route("/explore", get(explore))
        .route("/profile", put(update_profile))
        .route("/users/:username", get(user_profile))
        .route("/users/:username/follow", post(follow_user))
        .route("/users/:username/follow", delete(unfollow_user))
        .route("/itineraries", post(create_itinerary))
        .route("/itineraries/:id", get(get_itinerary))
        .route("/itineraries/:id/activities", post(add_activity))
        .route("/activities/:id", get(get_activity))
        .route("/activities/:id", put(edit_activity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "ajorni-api"
    }))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let user = state.user_repository.create(&payload).await?;

    info!("Registered new user: {}", user.username);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log a user in and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .authenticate(&payload.username, &payload.password)
        .await?;

    let access_token = state.jwt_service.generate_token(user.id).map_err(|e| {
        error!("Failed to generate access token: {}", e);
        ApiError::Internal
    })?;

    let response = TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.token_expiry(),
        user: UserResponse::from(user),
    };

    Ok(Json(response))
}

/// Home feed: itineraries of the current user and everyone they follow
pub async fn feed(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .feed_repository
        .followed_itineraries(current_user.id, query.request())
        .await?;

    Ok(Json(page))
}

/// Explore feed: all itineraries, newest first
pub async fn explore(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.feed_repository.explore(query.request()).await?;

    Ok(Json(page))
}

/// View a user's profile and their itineraries
pub async fn user_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let is_following = state
        .follow_repository
        .is_following(current_user.id, user.id)
        .await?;

    let itineraries = state
        .feed_repository
        .user_itineraries(user.id, query.request())
        .await?;

    let response = UserProfileResponse {
        user: UserResponse::from(user),
        is_following,
        itineraries,
    };

    Ok(Json(response))
}

/// Update the current user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfile>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    if let Some(about_me) = &payload.about_me {
        validation::validate_about_me(about_me).map_err(ApiError::Validation)?;
    }

    let user = state
        .user_repository
        .update_profile(current_user.id, &payload)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Follow a user by username
pub async fn follow_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = state
        .user_repository
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    // Policy check lives here, not in the follow graph
    if target.id == current_user.id {
        return Err(ApiError::Validation(
            "You cannot follow yourself".to_string(),
        ));
    }

    state
        .follow_repository
        .follow(current_user.id, target.id)
        .await?;

    Ok(Json(json!({"message": format!("You are following {}", username)})))
}

/// Unfollow a user by username
pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = state
        .user_repository
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if target.id == current_user.id {
        return Err(ApiError::Validation(
            "You cannot unfollow yourself".to_string(),
        ));
    }

    state
        .follow_repository
        .unfollow(current_user.id, target.id)
        .await?;

    Ok(Json(json!({"message": format!("You are not following {}", username)})))
}

/// Create a new itinerary owned by the current user
pub async fn create_itinerary(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthUser>,
    Json(payload): Json<NewItinerary>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_city(&payload.city).map_err(ApiError::Validation)?;

    let itinerary = state
        .itinerary_repository
        .create(current_user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(itinerary)))
}

/// View an itinerary with its activities in display order
pub async fn get_itinerary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let itinerary = state
        .itinerary_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Itinerary"))?;

    let activities = state.itinerary_repository.activities_ordered(id).await?;

    Ok(Json(ItineraryDetailResponse {
        itinerary,
        activities,
    }))
}

/// Append an activity to an itinerary
pub async fn add_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewActivity>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_description(&payload.description).map_err(ApiError::Validation)?;

    let activity = state.itinerary_repository.add_activity(id, &payload).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

/// Get an activity by ID
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let activity = state
        .itinerary_repository
        .find_activity(id)
        .await?
        .ok_or(ApiError::NotFound("Activity"))?;

    Ok(Json(activity))
}

/// Edit an activity's name and description
pub async fn edit_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateActivity>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_description(&payload.description).map_err(ApiError::Validation)?;

    let activity = state
        .itinerary_repository
        .edit_activity(id, &payload)
        .await?;

    Ok(Json(activity))
}
