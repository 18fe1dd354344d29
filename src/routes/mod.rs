use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::{Config, Preferences};
use crate::game_factory::actor_client::GameFactoryClient;

mod game;
mod health;
mod metrics;
mod preferences;

pub struct AppState {
    pub game_factory: GameFactoryClient,
    pub preferences: Preferences,
    pub player_ping_timeout: Duration,
}

pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/preferences", get(preferences::get))
        .route("/game", post(game::create))
        .route("/game/:game_id/ws", get(game::connect_player_to_websocket))
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
