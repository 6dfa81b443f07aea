// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{Ack, AuthResponse, CreateNoteRequest, LoginRequest, MeResponse, SignupRequest,
        UserProfile, VerifyOtpRequest},
    state::AppState,
    storage::StoredNote,
};

pub mod auth;
pub mod health;
pub mod notes;

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/auth/signup-request", post(auth::signup_request))
        .route("/auth/signup-verify", post(auth::signup_verify))
        .route("/auth/login-request", post(auth::login_request))
        .route("/auth/login-verify", post(auth::login_verify))
        .route("/auth/me", get(auth::me))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/notes/{note_id}", delete(notes::delete_note))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS policy: only the configured origins may call the API, with
/// credentials enabled.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_request,
        auth::signup_verify,
        auth::login_request,
        auth::login_verify,
        auth::me,
        notes::list_notes,
        notes::create_note,
        notes::delete_note,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            VerifyOtpRequest,
            UserProfile,
            AuthResponse,
            MeResponse,
            CreateNoteRequest,
            StoredNote,
            Ack
        )
    ),
    tags(
        (name = "Auth", description = "Passwordless signup and login"),
        (name = "Notes", description = "Personal note management"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use crate::mail::MockMailer;
    use crate::storage::{FileStorage, StoragePaths};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().unwrap();

        let state = AppState::new(
            storage,
            Arc::new(MockMailer::new()),
            TokenIssuer::new("test-secret-key-must-be-long-enough", 30),
        );

        let app = router(state, &["http://localhost:5173".to_string()]);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
