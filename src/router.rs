use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;

use crate::db::PlantStorage;
use crate::handlers::{plants, rooms};

#[derive(Clone)]
pub struct VerdantState {
    pub storage: PlantStorage,
}

impl VerdantState {
    pub fn new(storage: PlantStorage) -> Self {
        Self { storage }
    }
}

pub fn verdant_router(state: VerdantState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/plants", get(plants::list_plants))
        .route("/plants/new", get(plants::new_plant_form).post(plants::create_plant))
        .route("/plants/{id}", get(plants::show_plant))
        .route("/plants/{id}/edit", get(plants::edit_plant_form).post(plants::update_plant))
        .route("/plants/{id}/watered", post(plants::water_plant))
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/new", post(rooms::create_room))
        .route("/rooms/{id}", get(rooms::show_room).post(rooms::rename_room))
        .route("/delete/plant", post(plants::delete_plant))
        .route("/delete/room", post(rooms::delete_room))
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::to("/plants")
}
