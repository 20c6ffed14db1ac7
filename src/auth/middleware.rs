use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::{AppError, AppResult};
use crate::models::mood::MoodEntry;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    let auth_user = AuthUser {
        id: token_data.claims.sub,
        username: token_data.claims.username,
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

/// Ownership guard run after an entry has been loaded by id.
pub fn ensure_owner(entry: &MoodEntry, auth_user: &AuthUser) -> AppResult<()> {
    if !entry.is_owned_by(auth_user.id) {
        tracing::warn!(
            user_id = %auth_user.id,
            entry_id = %entry.id,
            "Access to another user's mood entry denied"
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}
