use axum::body::Body;
use axum::http::{Request, StatusCode};
use courtside::api::{self, AppState};
use courtside::config::{Config, ViewBox};
use courtside::db::init_db;
use courtside::{PeriodType, Repository};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

async fn setup_test_app() -> (axum::Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();

    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let config = Config {
        port: 0,
        database_path: db_path,
        default_period_type: PeriodType::Halves,
        shot_chart_view_box: ViewBox {
            width: 100.0,
            height: 200.0,
        },
        box_score_cache_capacity: 16,
    };

    (api::create_router(AppState::new(repo, config)), temp_dir)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Halves game (the configured default) with two shots by p1 in the first
/// half and one by p2 in the second.
async fn seeded_game(app: &axum::Router) -> String {
    let (status, created) = send(
        app,
        "POST",
        "/api/games",
        Some(json!({
            "team_name": "Hawks",
            "opponent_name": "Owls",
            "players": [
                {"player_id": "p1", "player_name": "Ann"},
                {"player_id": "p2", "player_name": "Bea"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["period_type"], "halves");
    let game_id = created["id"].as_str().unwrap().to_string();
    let stats_uri = format!("/api/games/{}/stats", game_id);

    let shots = [
        json!({"player_id": "p1", "action": "made_2", "location": {"x": 0.25, "y": 0.1}}),
        // Local coordinates unusable: page position minus the court offset is used.
        json!({
            "player_id": "p1",
            "action": "miss_3",
            "location": {
                "pointer": {"local_x": -1.0, "local_y": -1.0, "page_x": 130.0, "page_y": 440.0},
                "court": {"page_x": 100.0, "page_y": 200.0, "width": 300.0, "height": 400.0}
            }
        }),
    ];
    for body in shots {
        let (status, _) = send(app, "POST", &stats_uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = send(
        app,
        "PATCH",
        &format!("/api/games/{}", game_id),
        Some(json!({"current_period": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        "POST",
        &stats_uri,
        Some(json!({
            "player_id": "p2",
            "action": "made_3",
            "location": {"pointer": {"local_x": 450.0, "local_y": 100.0}, "court": {"page_x": 0.0, "page_y": 0.0, "width": 300.0, "height": 400.0}}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    game_id
}

#[tokio::test]
async fn test_markers_scaled_into_default_view_box() {
    let (app, _temp) = setup_test_app().await;
    let game_id = seeded_game(&app).await;

    let (status, chart) = send(&app, "GET", &format!("/api/games/{}/shot-chart", game_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chart["period"], "all");
    assert_eq!(chart["view_box_width"], 100.0);
    assert_eq!(chart["view_box_height"], 200.0);

    let markers = chart["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 3);

    assert_eq!(markers[0]["svg_x"], 25.0);
    assert_eq!(markers[0]["svg_y"], 20.0);
    assert_eq!(markers[0]["half"], "top");
    assert_eq!(markers[0]["made"], true);

    // (130 - 100) / 300 = 0.1, (440 - 200) / 400 = 0.6
    let x = markers[1]["x"].as_f64().unwrap();
    let y = markers[1]["y"].as_f64().unwrap();
    assert!((x - 0.1).abs() < 1e-9);
    assert!((y - 0.6).abs() < 1e-9);
    assert_eq!(markers[1]["half"], "bottom");
    assert_eq!(markers[1]["shot_type"], "3pt");

    // 450 past a 300-wide court clamps to the sideline.
    assert_eq!(markers[2]["x"], 1.0);
    assert_eq!(markers[2]["svg_x"], 100.0);
    assert_eq!(markers[2]["period"], 2);
}

#[tokio::test]
async fn test_filters_by_period_player_and_custom_view_box() {
    let (app, _temp) = setup_test_app().await;
    let game_id = seeded_game(&app).await;

    let (_, h2) = send(
        &app,
        "GET",
        &format!("/api/games/{}/shot-chart?period=h2", game_id),
        None,
    )
    .await;
    let markers = h2["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["player_id"], "p2");

    let (_, p1) = send(
        &app,
        "GET",
        &format!(
            "/api/games/{}/shot-chart?playerId=p1&viewBoxWidth=50&viewBoxHeight=94",
            game_id
        ),
        None,
    )
    .await;
    let markers = p1["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0]["svg_x"], 12.5);
    assert_eq!(p1["view_box_height"], 94.0);

    let (_, q1) = send(
        &app,
        "GET",
        &format!("/api/games/{}/shot-chart?period=q1", game_id),
        None,
    )
    .await;
    assert!(q1["markers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shot_chart_rejects_bad_input() {
    let (app, _temp) = setup_test_app().await;
    let game_id = seeded_game(&app).await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/games/{}/shot-chart?viewBoxWidth=-5", game_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/games/{}/shot-chart?playerId=ghost", game_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
