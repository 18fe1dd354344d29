use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::new("sofa_games_active_games", "Active game instances").expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("sofa_games_connected_players", "Amount of players connected")
            .expect("metric cannot be created");
    pub static ref ROUNDS_SCORED: IntCounter =
        IntCounter::new("sofa_games_rounds_scored", "Rounds that reached a final score")
            .expect("metric cannot be created");
    pub static ref OPPONENT_FALLBACKS: IntCounter = IntCounter::new(
        "sofa_games_opponent_fallbacks",
        "Opponent answers replaced by fallback entries after a text generation failure"
    )
    .expect("metric cannot be created");
}

pub fn register_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(ACTIVE_GAMES.clone()),
        Box::new(CONNECTED_PLAYERS.clone()),
        Box::new(ROUNDS_SCORED.clone()),
        Box::new(OPPONENT_FALLBACKS.clone()),
    ];
    for collector in collectors {
        if let Err(error) = REGISTRY.register(collector) {
            log::debug!("Collector not registered. Error: '{error}'.");
        }
    }
}
