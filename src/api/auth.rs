// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Authentication endpoints.
//!
//! Signup and login are the same two-step OTP exchange: request a code, then
//! echo it back. They differ only in their entry predicate - signup may
//! create or supersede an unverified identity, login requires an already
//! verified one - so both verify handlers funnel into
//! [`UserRepository::consume_challenge`].

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};

use crate::{
    auth::{otp, Auth},
    config::OTP_TTL_MINUTES,
    error::ApiError,
    models::{Ack, AuthResponse, LoginRequest, MeResponse, SignupRequest, VerifyOtpRequest},
    state::AppState,
    storage::{OtpChallenge, StorageError, StoredUser, UserRepository},
};

fn new_challenge(code: &str) -> OtpChallenge {
    OtpChallenge {
        code: code.to_string(),
        expires_at: Utc::now() + Duration::minutes(OTP_TTL_MINUTES),
    }
}

/// Start a signup: create or supersede the unverified identity and mail a code.
#[utoipa::path(
    post,
    path = "/auth/signup-request",
    request_body = SignupRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "OTP dispatched", body = Ack),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 500, description = "Mail dispatch or storage failure"),
    )
)]
pub async fn signup_request(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<Ack>, ApiError> {
    let name = request.name.trim().to_string();
    let email = request.email.trim().to_string();

    if name.is_empty() || email.is_empty() {
        return Err(ApiError::bad_request("name and email are required"));
    }
    if !email.contains('@') {
        return Err(ApiError::bad_request("A valid email address is required"));
    }

    let code = otp::generate_code();

    {
        let storage = state.storage.write().await;
        let users = UserRepository::new(&storage);

        match users.find_by_email(&email)? {
            Some(user) if user.verified => {
                return Err(ApiError::bad_request(
                    "User with this email already exists.",
                ));
            }
            Some(mut user) => {
                // Supersede the pending registration: same identity, fresh
                // profile fields, fresh code. The old code stops validating.
                user.name = name;
                user.date_of_birth = request.date_of_birth;
                users.issue_challenge(&mut user, new_challenge(&code))?;
            }
            None => {
                let mut user = StoredUser::new(name, &email, request.date_of_birth);
                users.issue_challenge(&mut user, new_challenge(&code))?;
            }
        }
    }

    // The pending code is already persisted; if dispatch fails the request
    // fails and the client re-requests a code (which supersedes this one).
    state.mailer.send_otp(&email, None, &code).await?;

    tracing::info!(email = %email, "signup OTP dispatched");
    Ok(Json(Ack::new("OTP sent to your email.")))
}

/// Redeem a signup code: activate the account and mint a session token.
#[utoipa::path(
    post,
    path = "/auth/signup-verify",
    request_body = VerifyOtpRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account activated", body = AuthResponse),
        (status = 400, description = "Invalid or expired OTP"),
    )
)]
pub async fn signup_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let user = {
        let storage = state.storage.write().await;
        UserRepository::new(&storage).consume_challenge(
            request.email.trim(),
            request.code.trim(),
            false,
        )?
    }
    .ok_or_else(|| ApiError::bad_request("Invalid or expired OTP."))?;

    let token = state.tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "signup verified");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Start a login for a verified account: mail a fresh code.
#[utoipa::path(
    post,
    path = "/auth/login-request",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "OTP dispatched", body = Ack),
        (status = 404, description = "Unknown or unverified email"),
        (status = 500, description = "Mail dispatch or storage failure"),
    )
)]
pub async fn login_request(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Ack>, ApiError> {
    let email = request.email.trim().to_string();
    let code = otp::generate_code();

    {
        let storage = state.storage.write().await;
        let users = UserRepository::new(&storage);

        let Some(mut user) = users.find_by_email(&email)?.filter(|u| u.verified) else {
            return Err(ApiError::not_found("User not found or not verified."));
        };

        users.issue_challenge(&mut user, new_challenge(&code))?;
    }

    state.mailer.send_otp(&email, None, &code).await?;

    tracing::info!(email = %email, "login OTP dispatched");
    Ok(Json(Ack::new("OTP sent to your email.")))
}

/// Redeem a login code: mint a session token for the verified account.
#[utoipa::path(
    post,
    path = "/auth/login-verify",
    request_body = VerifyOtpRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Invalid or expired OTP"),
    )
)]
pub async fn login_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = {
        let storage = state.storage.write().await;
        UserRepository::new(&storage).consume_challenge(
            request.email.trim(),
            request.code.trim(),
            true,
        )?
    }
    .ok_or_else(|| ApiError::bad_request("Invalid or expired OTP."))?;

    let token = state.tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "login verified");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Get the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user profile", body = MeResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Identity record no longer exists"),
    )
)]
pub async fn me(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, ApiError> {
    let storage = state.storage.read().await;
    let stored = UserRepository::new(&storage)
        .get(&user.user_id)
        .map_err(|e| match e {
            StorageError::NotFound(_) => ApiError::not_found("User not found"),
            other => other.into(),
        })?;

    Ok(Json(stored.into()))
}
