pub mod test_app;
pub mod test_game;
pub mod test_player;
