//! Integration Tests for the API Client and REPL
//!
//! Runs the client against a local mock of the PokeAPI and checks that
//! responses are served through the cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use pokedex::{repl, Cache, PokeClient, PokedexError, Session};

// == Mock Server ==

#[derive(Clone)]
struct MockState {
    base: String,
    requests: Arc<AtomicUsize>,
}

async fn location_areas(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let page = if params.get("offset").map(String::as_str) == Some("2") {
        json!({
            "count": 3,
            "next": null,
            "previous": format!("{}/location-area/", state.base),
            "results": [{"name": "area-2", "url": "u2"}]
        })
    } else {
        json!({
            "count": 3,
            "next": format!("{}/location-area/?offset=2", state.base),
            "previous": null,
            "results": [
                {"name": "area-0", "url": "u0"},
                {"name": "area-1", "url": "u1"}
            ]
        })
    };
    Json(page)
}

async fn location_area(
    State(state): State<MockState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    match name.as_str() {
        "area-0" => Ok(Json(json!({
            "id": 1,
            "name": "area-0",
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "p1"}, "version_details": []},
                {"pokemon": {"name": "magikarp", "url": "p2"}, "version_details": []},
                {"pokemon": {"name": "tentacool", "url": "p1"}, "version_details": []}
            ]
        }))),
        "area-1" => Ok(Json(json!({"name": "area-1", "pokemon_encounters": []}))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn pokemon(
    State(state): State<MockState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    match name.as_str() {
        // Zero base experience makes every catch roll succeed
        "pikachu" => Ok(Json(json!({
            "name": "pikachu",
            "base_experience": 0,
            "height": 4,
            "weight": 60,
            "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "s"}}],
            "types": [{"slot": 1, "type": {"name": "electric", "url": "t"}}]
        }))),
        "broken" => Ok(Json(json!({"name": 42}))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

/// Starts the mock API and returns its base URL and request counter.
async fn spawn_mock_api() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/v2", listener.local_addr().unwrap());
    let requests = Arc::new(AtomicUsize::new(0));

    let state = MockState {
        base: base.clone(),
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/api/v2/location-area/", get(location_areas))
        .route("/api/v2/location-area/:name", get(location_area))
        .route("/api/v2/pokemon/:name", get(pokemon))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base, requests)
}

async fn client_for(base: &str, interval: Duration) -> PokeClient {
    let cache = Cache::new(interval).unwrap();
    PokeClient::new(base, Duration::from_secs(5), cache).unwrap()
}

// == Client Tests ==

#[tokio::test]
async fn test_page_is_fetched_once_then_cached() {
    let (base, requests) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_secs(60)).await;
    let url = client.location_areas_url();

    let first = client.location_areas(&url).await.unwrap();
    let second = client.location_areas(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.results.len(), 2);
    assert_eq!(requests.load(Ordering::SeqCst), 1);
    assert!(client.cache().get(&url).await.is_some());
}

#[tokio::test]
async fn test_error_status_is_not_cached() {
    let (base, requests) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_secs(60)).await;

    let result = client.explore_area("nowhere").await;
    assert!(matches!(result, Err(PokedexError::Status(404))));
    assert_eq!(
        result.unwrap_err().to_string(),
        "received status code 404"
    );

    let _ = client.explore_area("nowhere").await;
    assert_eq!(requests.load(Ordering::SeqCst), 2);
    assert!(client.cache().is_empty().await);
}

#[tokio::test]
async fn test_malformed_payload_is_decode_error() {
    let (base, _) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_secs(60)).await;

    let result = client.pokemon("broken").await;
    assert!(matches!(result, Err(PokedexError::Decode(_))));
}

#[tokio::test]
async fn test_explore_returns_unique_sorted_names() {
    let (base, _) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_secs(60)).await;

    let names = client.explore_area("area-0").await.unwrap();
    assert_eq!(names, vec!["magikarp", "tentacool"]);

    // The cached form is the processed name list, not the raw area
    let cached = client
        .cache()
        .get(&client.location_area_url("area-0"))
        .await
        .unwrap();
    let cached: Vec<String> = serde_json::from_slice(&cached).unwrap();
    assert_eq!(cached, names);
}

#[tokio::test]
async fn test_undecodable_cache_entry_is_refetched() {
    let (base, requests) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_secs(60)).await;
    let url = client.pokemon_url("pikachu");

    client.cache().put(url.clone(), b"not json".to_vec()).await;

    let pikachu = client.pokemon("pikachu").await.unwrap();
    assert_eq!(pikachu.height, 4);
    assert_eq!(requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let (base, requests) = spawn_mock_api().await;
    let client = client_for(&base, Duration::from_millis(100)).await;

    client.pokemon("pikachu").await.unwrap();
    client.pokemon("pikachu").await.unwrap();
    assert_eq!(requests.load(Ordering::SeqCst), 1);

    // Past two intervals the reaper has removed the response
    tokio::time::sleep(Duration::from_millis(350)).await;
    client.pokemon("pikachu").await.unwrap();
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

// == REPL Tests ==

async fn run_session(base: &str, input: &str) -> String {
    let client = client_for(base, Duration::from_secs(60)).await;
    let mut session = Session::new(client);
    let mut out = Vec::new();

    repl::run(&mut session, input.as_bytes(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_repl_pages_through_map() {
    let (base, requests) = spawn_mock_api().await;

    let output = run_session(&base, "map\nmap\nmap\nmapb\nmapb\nexit\n").await;

    assert!(output.contains("Name: area-0\nName: area-1\n"));
    assert!(output.contains("Name: area-2\n"));
    assert!(output.contains("You are on the last page"));
    assert!(output.contains("You are on the first page"));
    // Paging back to the first page is served from the cache
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_repl_explore_catch_inspect() {
    let (base, _) = spawn_mock_api().await;

    let output = run_session(
        &base,
        "explore area-0\nexplore area-1\ncatch PIKACHU\ninspect pikachu\npokedex\nexit\n",
    )
    .await;

    assert!(output.contains("Exploring area: area-0\nFound pokemon:\n- magikarp\n- tentacool\n"));
    assert!(output.contains("no Pokemon found in this area"));
    assert!(output.contains("Throwing a Pokeball at pikachu...\npikachu was caught!"));
    assert!(output.contains("Height: 4\nWeight: 60\nStats:\n - hp: 35\nTypes:\n - electric\n"));
    assert!(output.contains("Your Pokedex:\n - pikachu\n"));
}

#[tokio::test]
async fn test_repl_reports_errors_and_continues() {
    let (base, _) = spawn_mock_api().await;

    let output = run_session(&base, "fly\ncatch missingno\nexplore\n\nhelp\n").await;

    assert!(output.contains("unknown command 'fly'. Type 'help' for a list of commands."));
    assert!(output.contains("error executing command 'catch': received status code 404"));
    assert!(output.contains("error executing command 'explore': an area name must be provided"));
    assert!(output.contains("Available commands:"));
    // Ends cleanly at end of input without an explicit exit
    assert!(output.ends_with(&format!("{}\n", repl::PROMPT)));
}
