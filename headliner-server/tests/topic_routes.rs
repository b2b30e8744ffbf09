mod common;

use axum::http::StatusCode;
use common::spawn_app;
use headliner_server::infra::startup::{ProdStartupHooks, StartupHooks};

#[tokio::test]
async fn startup_seeds_default_topics_once() {
    let app = spawn_app().await;
    let names: Vec<String> = app
        .state
        .topics()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|topic| topic.name)
        .collect();
    assert_eq!(names, ["Technology", "Sports", "Politics"]);

    ProdStartupHooks.run(&app.state).await.unwrap();
    assert_eq!(app.state.topics().list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn toggle_flips_visibility() {
    let app = spawn_app().await;
    let technology = app
        .state
        .topics()
        .find_by_name("Technology")
        .await
        .unwrap()
        .unwrap();
    assert!(technology.is_visible);

    let path = format!("/toggle_topic/{}", technology.id);
    let response = app.server.post(&path).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
    let stored = app.state.topics().get(technology.id).await.unwrap();
    assert!(!stored.unwrap().is_visible);

    app.server.post(&path).await;
    let stored = app.state.topics().get(technology.id).await.unwrap();
    assert!(stored.unwrap().is_visible);
}

#[tokio::test]
async fn toggle_of_unknown_topic_is_not_found() {
    let app = spawn_app().await;
    app.server
        .post("/toggle_topic/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_topic_stores_and_registers_feed() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/add_topic")
        .form(&[("name", "Science"), ("keyword", "Science_and_Environment")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let stored = app.state.topics().find_by_name("Science").await.unwrap();
    assert!(stored.is_some_and(|topic| topic.is_visible));
    assert_eq!(
        app.state.registry.lookup("Science").as_deref(),
        Some("https://feeds.test/science_and_environment.xml")
    );
}

#[tokio::test]
async fn incomplete_or_duplicate_topics_are_ignored() {
    let app = spawn_app().await;

    for form in [
        [("name", ""), ("keyword", "world")],
        [("name", "World"), ("keyword", "   ")],
        [("name", "Technology"), ("keyword", "business")],
    ] {
        app.server
            .post("/add_topic")
            .form(&form)
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    assert_eq!(app.state.topics().list().await.unwrap().len(), 3);
    assert!(!app.state.registry.contains("World"));
    assert_eq!(
        app.state.registry.lookup("Technology").as_deref(),
        Some(common::TECHNOLOGY_FEED)
    );
}

#[tokio::test]
async fn delete_topic_unregisters_feed() {
    let app = spawn_app().await;
    app.server
        .post("/add_topic")
        .form(&[("name", "Health"), ("keyword", "health")])
        .await;
    let health = app
        .state
        .topics()
        .find_by_name("Health")
        .await
        .unwrap()
        .unwrap();

    let response =
        app.server.get(&format!("/delete_topic/{}", health.id)).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");

    assert!(!app.state.registry.contains("Health"));
    assert!(app.state.topics().get(health.id).await.unwrap().is_none());

    app.server
        .get(&format!("/delete_topic/{}", health.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_topic_delete_keeps_feed_registered() {
    let app = spawn_app().await;
    app.server
        .post("/add_topic")
        .form(&[("name", "Health"), ("keyword", "health")])
        .await;
    let health = app
        .state
        .topics()
        .find_by_name("Health")
        .await
        .unwrap()
        .unwrap();

    sqlx::query(
        "CREATE TRIGGER keep_topics BEFORE DELETE ON topics \
         BEGIN SELECT RAISE(ABORT, 'topics are locked'); END",
    )
    .execute(app.state.database.pool())
    .await
    .unwrap();

    app.server
        .get(&format!("/delete_topic/{}", health.id))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert!(app.state.registry.contains("Health"));
    assert!(app.state.topics().get(health.id).await.unwrap().is_some());
}
