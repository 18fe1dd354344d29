use crate::helpers::test_app::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/health", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!("healthy".to_string(), response.text().await.unwrap());
}

#[tokio::test]
async fn preferences_are_served_from_config() {
    let app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/preferences", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let preferences: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        preferences,
        serde_json::json!({ "darkMode": true, "simpleMode": false })
    );
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = TestApp::spawn_app().await;
    let _ = app.post_game(serde_json::json!({ "mode": "chess" })).await;

    let response = reqwest::Client::new()
        .get(format!("http://{}/metrics", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("sofa_games_active_games"));
}
