//! Solver client and solver-backed player against a local fake solver.

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use connect_four::{Player, Reporter, SignalKind, SolverClient, SolverPlayer};
use connect_four_rules::State;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

const PARTIAL: &str = "244444666666777777333555555";

/// Serves `router` on an ephemeral port and returns the solve URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/solve", addr)
}

/// Scores the empty board in favour of the centre and anything else in
/// favour of column 2. Full columns get the solver's large sentinel.
async fn solve(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !headers.contains_key(header::REFERER) {
        return (StatusCode::FORBIDDEN, "missing referer").into_response();
    }
    let pos = params.get("pos").cloned().unwrap_or_default();
    let score = if pos.is_empty() {
        json!([-2, -1, 0, 1, 0, -1, -2])
    } else {
        json!([0, 3, 1, 2, 100, 100, 100])
    };
    Json(json!({ "pos": pos, "score": score })).into_response()
}

fn client(url: &str, timeout: Duration) -> SolverClient {
    SolverClient::new(url, timeout).unwrap()
}

async fn thoughts_of(
    player: &mut SolverPlayer,
    state: &State,
) -> (usize, Vec<String>) {
    let (reporter, mut rx) = Reporter::channel(1);
    let column = player.get_play(state, reporter).await.unwrap();
    let mut thoughts = Vec::new();
    while let Ok(signal) = rx.try_recv() {
        if let SignalKind::Thinking(text) = signal.kind {
            thoughts.push(text);
        }
    }
    (column, thoughts)
}

#[tokio::test]
async fn test_client_forwards_position() {
    let url = serve(Router::new().route("/solve", get(solve))).await;
    let client = client(&url, Duration::from_secs(2));

    assert_eq!(client.solve("").await.unwrap(), vec![-2, -1, 0, 1, 0, -1, -2]);
    assert_eq!(client.solve("44").await.unwrap(), vec![0, 3, 1, 2, 100, 100, 100]);
}

#[tokio::test]
async fn test_player_picks_best_valid_column() {
    let url = serve(Router::new().route("/solve", get(solve))).await;
    let mut player = SolverPlayer::seeded(client(&url, Duration::from_secs(2)), 1, Duration::ZERO);

    let (column, thoughts) = thoughts_of(&mut player, &State::initial()).await;
    assert_eq!(column, 4);
    assert_eq!(thoughts.first().map(String::as_str), Some("Phoning a friend..."));
    assert_eq!(thoughts.last().map(String::as_str), Some("Chose position 4."));

    // Columns 5-7 are full; their sentinel scores must be ignored.
    let (column, _) = thoughts_of(&mut player, &State::parse(PARTIAL).unwrap()).await;
    assert_eq!(column, 2);
}

#[tokio::test]
async fn test_error_status() {
    let url = serve(Router::new().route(
        "/solve",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
    ))
    .await;
    let err = client(&url, Duration::from_secs(2)).solve("4").await.unwrap_err();
    assert!(err.message.contains("500"), "{}", err.message);
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let url = serve(Router::new().route("/solve", get(|| async { "not json" }))).await;
    let solver = client(&url, Duration::from_secs(2));
    assert!(solver.solve("").await.is_err());

    let mut player = SolverPlayer::seeded(solver, 1, Duration::ZERO);
    let state = State::parse(PARTIAL).unwrap();
    let (column, thoughts) = thoughts_of(&mut player, &state).await;

    assert!(state.valid_plays().contains(&column));
    assert!(thoughts.iter().any(|t| t.starts_with("The solver didn't help")));
    assert!(thoughts.iter().any(|t| t == "Considering options..."));
}

#[tokio::test]
async fn test_wrong_score_count_falls_back() {
    let url = serve(Router::new().route(
        "/solve",
        get(|| async { Json(json!({ "pos": "", "score": [1, 2, 3] })) }),
    ))
    .await;
    let solver = client(&url, Duration::from_secs(2));
    let err = solver.solve("").await.unwrap_err();
    assert!(err.message.contains("Expected 7 scores"), "{}", err.message);

    let mut player = SolverPlayer::seeded(solver, 2, Duration::ZERO);
    let (column, _) = thoughts_of(&mut player, &State::initial()).await;
    assert!((1..=7).contains(&column));
}

#[tokio::test]
async fn test_slow_solver_times_out() {
    let url = serve(Router::new().route(
        "/solve",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "pos": "", "score": [0, 0, 0, 9, 0, 0, 0] }))
        }),
    ))
    .await;
    let mut player = SolverPlayer::seeded(client(&url, Duration::from_millis(100)), 3, Duration::ZERO);

    let started = std::time::Instant::now();
    let state = State::parse("12345672345677654327116543211234567672543").unwrap();
    let (column, thoughts) = thoughts_of(&mut player, &state).await;

    assert_eq!(column, 1);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(thoughts.iter().any(|t| t.starts_with("The solver didn't help")));
}
