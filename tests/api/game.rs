use std::time::Duration;

use tokio_tungstenite::tungstenite::Message;

use crate::helpers::test_app::{TestApp, WORDS_ROUND_TICKS};
use crate::helpers::test_game::Tally;

#[tokio::test]
async fn create_game_works_for_every_mode() {
    for mode in ["stop", "words", "chess", "coloring"] {
        let game = TestApp::create_game(mode).await;

        let (_player, state) = game.connect().await.unwrap();

        assert_eq!(state.id, game.id);
        assert_eq!(state.mode, mode);
        assert_eq!(state.state, "menu");
        assert!(state.round.is_none());
        assert_eq!(state.totals, Tally { player: 0, opponent: 0 });
    }
}

#[tokio::test]
async fn create_game_with_unknown_mode_fails() {
    let app = TestApp::spawn_app().await;

    let response = app.post_game(serde_json::json!({ "mode": "poker" })).await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn connecting_to_a_missing_game_fails() {
    let app = TestApp::spawn_app().await;

    let mut player = app.connect_player("nope1").await;

    assert_eq!(
        player.receive_game_state().await.unwrap_err(),
        "GAME_DOES_NOT_EXIST"
    );
}

#[tokio::test]
async fn only_one_player_can_connect_to_a_game() {
    let game = TestApp::create_game("stop").await;
    let (_player, _) = game.connect().await.unwrap();

    let result = game.connect().await;

    match result {
        Err(code) => assert_eq!(code, "PLAYER_ALREADY_CONNECTED"),
        Ok(_) => panic!("A second player connected to the game"),
    }
}

#[tokio::test]
async fn player_wins_a_stop_round_against_an_unavailable_opponent() {
    let game = TestApp::create_game("stop").await;
    let (mut player, _) = game.connect().await.unwrap();

    let state = player.start_round().await.unwrap();
    assert_eq!(state.state, "active");
    let round = state.round.unwrap();
    assert_eq!(round.status, "active");
    assert_eq!(round.categories.len(), 7);
    let letter = round.prompt.clone();

    player
        .submit_entry(Some("animal"), &format!("{letter}rdilla"))
        .await;
    player.stop().await;
    let state = player.wait_for_game_state(|state| state.is_scored()).await;

    assert_eq!(state.state, "ended");
    let round = state.round.unwrap();
    assert_eq!(round.tally, Some(Tally { player: 10, opponent: 0 }));
    assert!(round
        .entries
        .iter()
        .any(|entry| entry.source == "player" && entry.category.as_deref() == Some("animal")));
    assert_eq!(state.totals, Tally { player: 10, opponent: 0 });
    assert_eq!(state.history.len(), 1);
}

#[tokio::test]
async fn submission_after_the_round_ended_is_rejected() {
    let game = TestApp::create_game("stop").await;
    let (mut player, _) = game.connect().await.unwrap();
    player.start_round().await.unwrap();
    player.stop().await;
    let state = player.wait_for_game_state(|state| state.is_scored()).await;
    let entries = state.round.unwrap().entries.len();

    player.submit_entry(Some("color"), "Azul").await;

    assert_eq!(player.receive_error().await, "INVALID_STATE_FOR_SUBMISSION");
    let state = player.receive_game_state().await.unwrap();
    assert_eq!(state.round.unwrap().entries.len(), entries);
}

#[tokio::test]
async fn words_round_ends_when_the_time_is_up() {
    let game = TestApp::create_game("words").await;
    let (mut player, _) = game.connect().await.unwrap();

    let state = player.start_round().await.unwrap();
    assert_eq!(state.time_left, WORDS_ROUND_TICKS);

    let state = player.wait_for_game_state(|state| state.is_scored()).await;

    assert_eq!(state.state, "ended");
    assert_eq!(state.time_left, 0);
    assert_eq!(state.round.unwrap().tally, Some(Tally { player: 0, opponent: 0 }));
}

#[tokio::test]
async fn exit_to_menu_discards_the_active_round() {
    let game = TestApp::create_game("stop").await;
    let (mut player, _) = game.connect().await.unwrap();
    player.start_round().await.unwrap();
    player.submit_entry(Some("animal"), "Ardilla").await;

    player.exit_to_menu().await;
    let state = player
        .wait_for_game_state(|state| state.state == "menu")
        .await;

    assert!(state.round.is_none());
    assert!(state.history.is_empty());

    let state = player.start_round().await.unwrap();
    let round = state.round.unwrap();
    assert_eq!(round.id, 2);
    assert!(round.entries.is_empty());
}

#[tokio::test]
async fn start_round_twice_is_rejected() {
    let game = TestApp::create_game("stop").await;
    let (mut player, _) = game.connect().await.unwrap();
    player.start_round().await.unwrap();

    player.send_message(Message::Text("{\"type\":\"startRound\"}".to_string())).await;

    assert_eq!(
        player.receive_error().await,
        "INVALID_STATE_FOR_STARTING_ROUND"
    );
}

#[tokio::test]
async fn coloring_move_is_answered_by_the_local_opponent() {
    let game = TestApp::create_game("coloring").await;
    let (mut player, _) = game.connect().await.unwrap();
    player.start_round().await.unwrap();

    player.submit_entry(None, "1").await;
    let state = player
        .wait_for_game_state(|state| state.state == "ended")
        .await;

    assert_eq!(state.round.unwrap().tally, Some(Tally { player: 1, opponent: 1 }));
    let areas = state.board.unwrap()["areas"].as_array().unwrap().clone();
    assert_eq!(
        areas
            .iter()
            .filter(|area| !area["coloredBy"].is_null())
            .count(),
        2
    );
}

#[tokio::test]
async fn unprocessable_message_keeps_the_connection_open() {
    let game = TestApp::create_game("words").await;
    let (mut player, _) = game.connect().await.unwrap();

    player.send_message(Message::Text("{\"type\":\"jump\"}".to_string())).await;

    assert_eq!(
        player.receive_game_state().await.unwrap_err(),
        "UNPROCESSABLE_WEBSOCKET_MESSAGE"
    );
    assert_eq!(player.ping().await, "pong");
}

#[tokio::test]
async fn silent_player_is_disconnected_and_can_reconnect() {
    let game = TestApp::create_game("chess").await;
    let (mut player, _) = game.connect().await.unwrap();

    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(player.receive_error().await, "WEBSOCKET_CLOSED");
    let (_player, state) = game.connect().await.unwrap();
    assert_eq!(state.state, "menu");
}
