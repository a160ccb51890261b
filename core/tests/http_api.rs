//! HttpConsoleApi against a stub backend served by axum

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use remote_console_core::api::{ConsoleApi, Environment, EnvironmentKind, HttpConsoleApi, RunStatus};
use remote_console_core::error::{ApiError, Error};
use remote_console_core::pages::{load_page, PageData, PageRequest};
use remote_console_core::ConsoleConfig;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Backend {
    environments: Arc<Mutex<Map<String, Value>>>,
    simulations: Arc<Mutex<Map<String, Value>>>,
}

fn store(backend: &Backend, kind: &str) -> Arc<Mutex<Map<String, Value>>> {
    if kind == "environment" {
        backend.environments.clone()
    } else {
        backend.simulations.clone()
    }
}

async fn list_environments(State(backend): State<Backend>) -> Json<Value> {
    Json(Value::Object(backend.environments.lock().unwrap().clone()))
}

async fn list_simulations(State(backend): State<Backend>) -> Json<Value> {
    Json(Value::Object(backend.simulations.lock().unwrap().clone()))
}

async fn get_one(
    State(backend): State<Backend>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    match store(&backend, &kind).lock().unwrap().get(&id) {
        Some(value) => Json(value.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn put_one(
    State(backend): State<Backend>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let store = store(&backend, &kind);
    let mut store = store.lock().unwrap();
    if store.contains_key(&id) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "ID exists already" })))
            .into_response();
    }
    if kind == "environment" {
        let valid = matches!(body.get("type").and_then(Value::as_str), Some("local" | "ssh" | "lsf"));
        if !valid {
            return (StatusCode::BAD_REQUEST, "Invalid type").into_response();
        }
        if let Some(message) = local_directory_error(&body) {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response();
        }
    }
    store.insert(id, body);
    StatusCode::OK.into_response()
}

fn local_directory_error(body: &Value) -> Option<String> {
    if body.get("type").and_then(Value::as_str) != Some("local") {
        return None;
    }
    let path = body.get("path").and_then(Value::as_str).unwrap_or_default();
    if !path.starts_with('/') {
        Some(format!("Runtime directory should be absolute: {}", path))
    } else if !std::path::Path::new(path).exists() {
        Some(format!("Local directory does not exist: {}", path))
    } else {
        None
    }
}

async fn delete_one(
    State(backend): State<Backend>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    match store(&backend, &kind).lock().unwrap().remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_stub_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/environments", get(list_environments))
        .route("/simulations", get(list_simulations))
        .route("/:kind/:id", get(get_one).put(put_one).delete(delete_one))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

async fn client(backend: Backend) -> HttpConsoleApi {
    let url = start_stub_backend(backend).await;
    HttpConsoleApi::new(&ConsoleConfig::default().with_api_url(url)).unwrap()
}

#[tokio::test]
async fn lists_keyed_environments_sorted_by_id() {
    let backend = Backend::default();
    {
        let mut environments = backend.environments.lock().unwrap();
        environments.insert(
            "local".to_string(),
            json!({ "id": "local", "name": "Local", "type": "local_linux", "status": "idle" }),
        );
        environments.insert(
            "euler".to_string(),
            json!({ "name": "Euler", "type": "lsf", "status": "idle" }),
        );
    }
    let api = client(backend).await;

    let environments = api.list_environments().await.unwrap();
    assert_eq!(environments.len(), 2);
    assert_eq!(environments[0].id, "euler");
    assert_eq!(environments[0].kind, EnvironmentKind::Lsf);
    assert_eq!(environments[1].kind, EnvironmentKind::LocalLinux);
}

#[tokio::test]
async fn create_show_and_delete_environment() {
    let api = client(Backend::default()).await;
    let environment = Environment::new("lab", "Lab", EnvironmentKind::Ssh);

    api.create_environment(&environment).await.unwrap();
    let fetched = api.get_environment("lab").await.unwrap();
    assert_eq!(fetched.name, "Lab");
    assert_eq!(fetched.kind, EnvironmentKind::Ssh);

    api.delete_environment("lab").await.unwrap();
    assert!(matches!(
        api.get_environment("lab").await,
        Err(Error::Api(ApiError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn rejected_requests_carry_the_backend_message() {
    let api = client(Backend::default()).await;
    let environment = Environment::new("lab", "Lab", EnvironmentKind::Lsf);
    api.create_environment(&environment).await.unwrap();

    let duplicate = api.create_environment(&environment).await.unwrap_err();
    assert!(matches!(
        duplicate,
        Error::Api(ApiError::Rejected { ref message }) if message == "ID exists already"
    ));

    let invalid = Environment::new("odd", "Odd", EnvironmentKind::LocalLinux);
    let error = api.create_environment(&invalid).await.unwrap_err();
    assert!(matches!(
        error,
        Error::Api(ApiError::Rejected { ref message }) if message == "Invalid type"
    ));
}

fn rejection(error: Error) -> String {
    match error {
        Error::Api(ApiError::Rejected { message }) => message,
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn local_environment_directory_is_checked() {
    let api = client(Backend::default()).await;

    let relative = Environment::new("rel", "Rel", EnvironmentKind::Local).with_path("relative/dir");
    let error = api.create_environment(&relative).await.unwrap_err();
    assert_eq!(rejection(error), "Runtime directory should be absolute: relative/dir");

    let pathless = Environment::new("none", "None", EnvironmentKind::Local);
    let error = api.create_environment(&pathless).await.unwrap_err();
    assert_eq!(rejection(error), "Runtime directory should be absolute: ");

    let error = api
        .create_environment(
            &Environment::new("gone", "Gone", EnvironmentKind::Local)
                .with_path("/remote-console/no/such/dir"),
        )
        .await
        .unwrap_err();
    assert_eq!(
        rejection(error),
        "Local directory does not exist: /remote-console/no/such/dir"
    );

    let existing = std::env::temp_dir().to_string_lossy().into_owned();
    let local = Environment::new("lab", "Lab", EnvironmentKind::Local).with_path(&existing);
    api.create_environment(&local).await.unwrap();
    assert_eq!(
        api.get_environment("lab").await.unwrap().path.as_deref(),
        Some(existing.as_str())
    );
}

#[tokio::test]
async fn server_error_pages_are_not_shown_verbatim() {
    let app = Router::new().route(
        "/environment/:id",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "<!DOCTYPE html><html><body><h1>Internal Server Error</h1></body></html>",
            )
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let config = ConsoleConfig::default().with_api_url(format!("http://{}", addr));
    let api = HttpConsoleApi::new(&config).unwrap();
    match api.get_environment("ghost").await {
        Err(Error::Api(ApiError::Status { status, message })) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn runs_page_reads_simulation_statuses() {
    let backend = Backend::default();
    {
        let mut simulations = backend.simulations.lock().unwrap();
        simulations.insert("s1".to_string(), json!({ "name": "One", "status": "started" }));
        simulations.insert("s2".to_string(), json!({ "name": "Two" }));
        simulations.insert("s3".to_string(), json!({ "name": "Three", "status": "finished" }));
    }
    let api = client(backend).await;

    match load_page(&api, &PageRequest::Runs).await.unwrap() {
        PageData::Runs(overview) => {
            assert_eq!(overview.runs.len(), 2);
            assert_eq!(overview.runs[0].simulation, "s1");
            assert_eq!(overview.runs[0].status, RunStatus::Started);
            assert_eq!(overview.alive, 1);
            assert_eq!(overview.finished, 1);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_backend_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ConsoleConfig::default().with_api_url(format!("http://{}", addr));
    let api = HttpConsoleApi::new(&config).unwrap();
    assert!(matches!(
        api.list_simulations().await,
        Err(Error::Http(_))
    ));
}
