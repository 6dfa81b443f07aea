// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! Note endpoints. All of them require a bearer token; every operation is
//! scoped to the authenticated owner.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Ack, CreateNoteRequest},
    state::AppState,
    storage::{NoteRepository, StorageError, StoredNote},
};

/// List the caller's notes.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All notes owned by the caller", body = [StoredNote]),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_notes(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredNote>>, ApiError> {
    let storage = state.storage.read().await;
    let notes = NoteRepository::new(&storage).list_by_owner(&user.user_id)?;
    Ok(Json(notes))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "The stored note", body = StoredNote),
        (status = 400, description = "Empty content"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn create_note(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<StoredNote>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Note content is required."));
    }

    // Content is stored exactly as submitted; only the emptiness check trims.
    let note = StoredNote::new(&user.user_id, request.content);

    {
        let storage = state.storage.write().await;
        NoteRepository::new(&storage).create(&note)?;
    }

    tracing::debug!(note_id = %note.id, owner = %note.owner_id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete a note owned by the caller.
#[utoipa::path(
    delete,
    path = "/notes/{note_id}",
    params(
        ("note_id" = String, Path, description = "Identifier of the note to delete")
    ),
    tag = "Notes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Note removed", body = Ack),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Note owned by another user"),
        (status = 404, description = "No such note"),
    )
)]
pub async fn delete_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Ack>, ApiError> {
    let storage = state.storage.write().await;
    let notes = NoteRepository::new(&storage);

    let note = notes.get(&note_id).map_err(|e| match e {
        StorageError::NotFound(_) => ApiError::not_found("Note not found"),
        other => other.into(),
    })?;

    if note.owner_id != user.user_id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    notes.delete(&note_id)?;

    tracing::debug!(note_id = %note_id, "note deleted");
    Ok(Json(Ack::new("Note removed.")))
}
