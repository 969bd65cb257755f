//! Login API endpoints
//!
//! POST /login  - Check credentials and set the session cookie
//! POST /logout - Drop the session and expire the cookie

use axum::{
    extract::Extension,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::middleware::auth::{
    session_clear_cookie, session_cookie, session_set_cookie, AuthRejection,
};
use crate::middleware::session::AuthStore;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

async fn login(
    Extension(store): Extension<Arc<AuthStore>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthRejection> {
    let session_id = store.login(&request.username, &request.password)?;
    Ok((
        [(header::SET_COOKIE, session_set_cookie(session_id))],
        Json(LoginResponse {
            success: true,
            username: request.username,
        }),
    ))
}

async fn logout(
    Extension(store): Extension<Arc<AuthStore>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthRejection> {
    if let Some(session_id) = session_cookie(&headers) {
        store.logout(session_id)?;
    }
    Ok((
        [(header::SET_COOKIE, session_clear_cookie())],
        Json(LogoutResponse { success: true }),
    ))
}

/// Create login routes.
pub fn auth_routes() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
