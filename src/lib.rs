pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod game_factory;
pub mod metrics;
pub mod opponent;
pub mod player;
pub mod round;
pub mod routes;
pub mod startup;
pub mod text_generation;
pub mod websocket;
