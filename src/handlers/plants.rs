use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::db::PlantInput;
use crate::router::VerdantState;
use crate::{VerdantError, views};

#[derive(Debug, Deserialize)]
pub struct PlantListQuery {
    pub room_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePlantForm {
    pub plant_id: i64,
}

/// GET /plants — the home page. An optional `room_name` query parameter
/// filters the listing (an empty value means unfiltered).
pub async fn list_plants(
    State(state): State<VerdantState>,
    Query(query): Query<PlantListQuery>,
) -> Result<Html<String>, VerdantError> {
    let rooms = state.storage.find_all_rooms().await?;
    let filter = query.room_name.as_deref().filter(|name| !name.is_empty());
    let plants = match filter {
        Some(room_name) => state.storage.find_all_plants_in_room(room_name).await?,
        None => state.storage.find_all_plants().await?,
    };
    Ok(Html(views::home_page(&plants, &rooms, filter)))
}

/// GET /plants/new
pub async fn new_plant_form(
    State(state): State<VerdantState>,
) -> Result<Html<String>, VerdantError> {
    let rooms = state.storage.find_all_rooms().await?;
    Ok(Html(views::new_plant_page(&rooms)))
}

/// POST /plants/new
pub async fn create_plant(
    State(state): State<VerdantState>,
    Form(input): Form<PlantInput>,
) -> Result<Redirect, VerdantError> {
    state.storage.new_plant(&input).await?;
    Ok(Redirect::to("/plants"))
}

/// GET /plants/{id}
pub async fn show_plant(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, VerdantError> {
    let plant = state
        .storage
        .find_one_plant(id)
        .await?
        .ok_or(VerdantError::PlantNotFound(id))?;
    Ok(Html(views::plant_page(&plant)))
}

/// GET /plants/{id}/edit
pub async fn edit_plant_form(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, VerdantError> {
    let plant = state
        .storage
        .find_one_plant(id)
        .await?
        .ok_or(VerdantError::PlantNotFound(id))?;
    let rooms = state.storage.find_all_rooms().await?;
    Ok(Html(views::edit_plant_page(&plant, &rooms)))
}

/// POST /plants/{id}/edit
pub async fn update_plant(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
    Form(input): Form<PlantInput>,
) -> Result<Redirect, VerdantError> {
    state.storage.update_plant(id, &input).await?;
    Ok(Redirect::to("/plants"))
}

/// POST /plants/{id}/watered
pub async fn water_plant(
    State(state): State<VerdantState>,
    Path(id): Path<i64>,
) -> Result<Redirect, VerdantError> {
    state.storage.water_plant(id).await?;
    Ok(Redirect::to(&format!("/plants/{id}")))
}

/// POST /delete/plant — keyed by plant_id alone; a room_name field may
/// accompany it (the listing form posts one) and is ignored.
pub async fn delete_plant(
    State(state): State<VerdantState>,
    Form(form): Form<DeletePlantForm>,
) -> Result<Redirect, VerdantError> {
    state.storage.delete_plant(form.plant_id).await?;
    Ok(Redirect::to("/plants"))
}
