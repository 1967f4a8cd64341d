//! End-to-end flows through the reducer against a mock `/predict` endpoint.

use std::sync::Arc;

use milo::core::action::{Action, Effect, SERVER_ERROR_TEXT, SubmitOrigin, update};
use milo::core::geometry::Viewport;
use milo::core::state::App;
use milo::core::turn::{Author, FallbackOption, Turn};
use milo::oracle::{HttpOracle, Oracle};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn app_for(server: &MockServer) -> App {
    let oracle = HttpOracle::new(format!("{}/predict", server.uri()), None).unwrap();
    let mut app = App::new(Arc::new(oracle), Viewport::new(1280.0, 800.0));
    app.open = true;
    app
}

/// Submit through the reducer and settle the request it asks for.
async fn submit_and_settle(app: &mut App, action: Action) {
    let Effect::SendRequest(message) = update(app, action) else {
        panic!("Expected a request effect");
    };
    assert!(app.loading);

    let outcome = app.oracle.clone().predict(&message).await;
    update(app, Action::from_outcome(outcome));
}

#[tokio::test]
async fn test_typed_message_round_trip() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"message": "Ce servicii oferă CCOC?"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Consiliere și voluntariat."})),
        )
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    app.draft = "Ce servicii oferă CCOC?".to_string();
    let text = app.draft.clone();
    submit_and_settle(
        &mut app,
        Action::Submit {
            text,
            origin: SubmitOrigin::Draft,
        },
    )
    .await;

    assert!(!app.loading);
    assert!(app.draft.is_empty());
    assert_eq!(
        app.turns,
        vec![
            Turn::user("Ce servicii oferă CCOC?"),
            Turn::bot("Consiliere și voluntariat."),
        ]
    );
}

#[tokio::test]
async fn test_server_error_becomes_error_turn() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    submit_and_settle(
        &mut app,
        Action::Submit {
            text: "salut".to_string(),
            origin: SubmitOrigin::Draft,
        },
    )
    .await;

    assert!(!app.loading);
    assert_eq!(app.turns.len(), 2);
    assert_eq!(app.turns[1], Turn::bot(SERVER_ERROR_TEXT));
}

#[tokio::test]
async fn test_fallback_option_then_choice() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"message": "bani"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "fallback",
            "message": "Te referi la:",
            "options": [{"label": "Costuri", "query": "Cât costă consilierea?"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({"message": "Cât costă consilierea?"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Este gratuită."})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    submit_and_settle(
        &mut app,
        Action::Submit {
            text: "bani".to_string(),
            origin: SubmitOrigin::Draft,
        },
    )
    .await;

    let option = app.turns[1].options[0].clone();
    assert_eq!(
        option,
        FallbackOption {
            label: "Costuri".to_string(),
            query: "Cât costă consilierea?".to_string(),
        }
    );

    // A half-typed draft survives choosing a quick reply
    app.draft = "încă scriu".to_string();
    submit_and_settle(&mut app, Action::FallbackChosen(option)).await;

    assert_eq!(app.draft, "încă scriu");
    let authors: Vec<Author> = app.turns.iter().map(|t| t.author).collect();
    assert_eq!(
        authors,
        vec![Author::User, Author::Bot, Author::User, Author::Bot]
    );
    assert_eq!(app.turns[2].text, "Cât costă consilierea?");
    assert_eq!(app.turns[3].text, "Este gratuită.");
}

#[tokio::test]
async fn test_reply_after_close_is_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "gata"})))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    let Effect::SendRequest(message) = update(
        &mut app,
        Action::Submit {
            text: "salut".to_string(),
            origin: SubmitOrigin::Draft,
        },
    ) else {
        panic!("Expected a request effect");
    };
    update(&mut app, Action::Close);

    let outcome = app.oracle.clone().predict(&message).await;
    update(&mut app, Action::from_outcome(outcome));
    update(&mut app, Action::Open);

    assert_eq!(app.turns.last(), Some(&Turn::bot("gata")));
    assert!(!app.loading);
}
