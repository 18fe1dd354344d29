use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::config::Preferences;
use crate::routes::AppState;

pub async fn get(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(state.preferences.clone())
}
