use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::game_factory::actor::GameFactoryActor;
use crate::metrics::register_metrics;
use crate::routes::{self, AppState};
use crate::text_generation;

pub async fn create_web_server(config: Config, listener: TcpListener) -> std::io::Result<()> {
    register_metrics();

    let text_generator = text_generation::from_settings(&config.text_generation);
    let state = Arc::new(AppState {
        game_factory: GameFactoryActor::spawn(
            config.game.clone(),
            config.text_generation.clone(),
            text_generator,
        ),
        preferences: config.preferences.clone(),
        player_ping_timeout: config.game.player_ping_timeout(),
    });
    let router = routes::create_router(&config).with_state(state);

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
