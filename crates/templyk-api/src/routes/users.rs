//! User routes.
//!
//! Multi-user template ownership is out of scope; these handlers serve
//! the fixed shapes the web client expects while that surface is stubbed.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use templyk_service::Template;

use crate::server::AppState;

/// A user profile record.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Routes for the users collection.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/templates", get(get_user_templates))
}

async fn get_user(Path(user_id): Path<String>) -> Json<UserProfile> {
    Json(UserProfile {
        id: user_id,
        name: "Test User".to_string(),
        email: "test@test.com".to_string(),
    })
}

async fn get_user_templates(Path(_user_id): Path<String>) -> Json<Vec<Template>> {
    Json(Vec::new())
}
