use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::router::VerdantState;
use crate::{VerdantError, views};

#[derive(Debug, Deserialize)]
pub struct RoomNameForm {
    pub room_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRoomForm {
    pub room_id: i64,
}

/// GET /rooms
pub async fn list_rooms(State(state): State<VerdantState>) -> Result<Html<String>, VerdantError> {
    let rooms = state.storage.find_all_rooms().await?;
    Ok(Html(views::rooms_page(&rooms)))
}

/// POST /rooms/new
pub async fn create_room(
    State(state): State<VerdantState>,
    Form(form): Form<RoomNameForm>,
) -> Result<Redirect, VerdantError> {
    state.storage.create_room(&form.room_name).await?;
    Ok(Redirect::to("/rooms"))
}

/// GET /rooms/{id}
pub async fn show_room(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, VerdantError> {
    let room = state
        .storage
        .find_one_room(id)
        .await?
        .ok_or(VerdantError::RoomNotFound(id))?;
    Ok(Html(views::room_page(&room)))
}

/// POST /rooms/{id} — rename.
pub async fn rename_room(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
    Form(form): Form<RoomNameForm>,
) -> Result<Redirect, VerdantError> {
    state.storage.update_room(&form.room_name, id).await?;
    Ok(Redirect::to(&format!("/rooms/{id}")))
}

/// POST /delete/room
pub async fn delete_room(
    State(state): State<VerdantState>,
    Form(form): Form<DeleteRoomForm>,
) -> Result<Redirect, VerdantError> {
    state.storage.delete_room(form.room_id).await?;
    Ok(Redirect::to("/rooms"))
}
