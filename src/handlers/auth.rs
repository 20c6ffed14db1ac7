use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::{
    jwt::create_access_token,
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::user::{User, UserProfile};
use crate::AppState;

fn issue_auth_response(user: User, state: &AppState) -> AppResult<AuthResponse> {
    let token = create_access_token(user.id, &user.username, &state.config)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let body = body.normalized();
    body.validate()?;

    if state
        .store
        .identity_taken(&body.username, &body.email)
        .await?
    {
        return Err(AppError::Conflict(
            "Username or email already registered".into(),
        ));
    }

    let pwd_hash = hash_password(&body.password)?;
    let user = state
        .store
        .insert_user(&User::new(body.username, body.email, pwd_hash))
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let response = issue_auth_response(user, &state)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    body.validate()?;

    let user = state
        .store
        .find_user_by_email(body.email.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(issue_auth_response(user, &state)?))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .find_user_by_id(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
