use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use verdant::db::{self, PlantStorage};
use verdant::router::{VerdantState, verdant_router};

async fn test_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "verdant-routes-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let pool = db::connect(&format!("sqlite:{}", path.display()))
        .await
        .expect("failed to open database");
    let storage = PlantStorage::new(pool);
    storage.init_schema().await.expect("schema bootstrap failed");

    (verdant_router(VerdantState::new(storage)), path)
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

fn location(resp: &axum::response::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("missing location header")
}

const MONSTERA_FORM: &str = "common_name=Monstera&scientific_name=Monstera+deliciosa\
                             &water_frequency=7&light=bright+indirect&room_name=Living+Room";

#[tokio::test]
async fn root_redirects_to_the_plant_listing() {
    let (app, path) = test_app("root").await;

    let resp = app.oneshot(get("/")).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/plants");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn created_plant_shows_up_in_the_listing() {
    let (app, path) = test_app("create").await;

    let resp = app
        .clone()
        .oneshot(form_post("/plants/new", MONSTERA_FORM))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/plants");

    let resp = app.clone().oneshot(get("/plants")).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Monstera"));
    assert!(body.contains("Living Room"));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn room_filter_narrows_the_listing() {
    let (app, path) = test_app("filter").await;

    let resp = app
        .clone()
        .oneshot(form_post("/rooms/new", "room_name=Kitchen"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .clone()
        .oneshot(form_post("/plants/new", MONSTERA_FORM))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .clone()
        .oneshot(get("/plants?room_name=Kitchen"))
        .await
        .expect("request failed");
    let body = body_string(resp).await;
    assert!(!body.contains("Monstera"));

    let resp = app
        .clone()
        .oneshot(get("/plants?room_name=Living+Room"))
        .await
        .expect("request failed");
    let body = body_string(resp).await;
    assert!(body.contains("Monstera"));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn unknown_plant_page_returns_404() {
    let (app, path) = test_app("missing-plant").await;

    let resp = app.oneshot(get("/plants/999")).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn watering_redirects_back_to_the_plant_page() {
    let (app, path) = test_app("water").await;

    let resp = app
        .clone()
        .oneshot(form_post("/plants/new", MONSTERA_FORM))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .clone()
        .oneshot(form_post("/plants/1/watered", ""))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/plants/1");

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn deleting_a_plant_removes_it_from_the_listing() {
    let (app, path) = test_app("delete-plant").await;

    let resp = app
        .clone()
        .oneshot(form_post("/plants/new", MONSTERA_FORM))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // The listing form also posts the room name; it is accepted and ignored.
    let resp = app
        .clone()
        .oneshot(form_post("/delete/plant", "plant_id=1&room_name=Living+Room"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/plants");

    let resp = app.clone().oneshot(get("/plants")).await.expect("request failed");
    let body = body_string(resp).await;
    assert!(!body.contains("Monstera"));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn deleting_the_only_room_returns_409() {
    let (app, path) = test_app("last-room").await;

    let resp = app
        .oneshot(form_post("/delete/room", "room_id=1"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn renaming_a_room_redirects_to_its_page() {
    let (app, path) = test_app("rename-room").await;

    let resp = app
        .clone()
        .oneshot(form_post("/rooms/1", "room_name=Sun+Room"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/rooms/1");

    let resp = app.clone().oneshot(get("/rooms/1")).await.expect("request failed");
    let body = body_string(resp).await;
    assert!(body.contains("Sun Room"));

    let _ = fs::remove_file(&path);
}
