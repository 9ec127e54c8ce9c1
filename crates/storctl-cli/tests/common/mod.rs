//! In-process fake control plane shared by the command tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path as UrlPath, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Parser;
use serde_json::{json, Value};
use storctl_cli::cli::Cli;
use storctl_cli::commands::{self, Terminal};
use storctl_cli::prompt::PasswordReader;
use storctl_cli::{EnvDefaults, Result};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// Shared request log; each handler appends `METHOD /path`.
#[derive(Clone, Default)]
pub struct Cluster {
    requests: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Cluster {
    fn record(&self, line: impl Into<String>) {
        self.requests.lock().unwrap().push(line.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Basic {}", STANDARD.encode(format!("{USERNAME}:{PASSWORD}")));
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == expected)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "invalid credentials", "kind": "UnauthorizedError" })),
    )
}

async fn volume_list(State(cluster): State<Cluster>) -> Json<Value> {
    cluster.record("GET /v1/volumes");
    Json(json!([
        { "id": "v-1", "namespace": "default", "name": "data", "size": 5, "status": "active" },
        { "id": "v-2", "namespace": "prod", "name": "logs", "size": 20, "status": "active" }
    ]))
}

async fn volume_get(
    State(cluster): State<Cluster>,
    UrlPath((namespace, name)): UrlPath<(String, String)>,
) -> (StatusCode, Json<Value>) {
    cluster.record(format!("GET /v1/namespaces/{namespace}/volumes/{name}"));
    if name == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "volume not found", "kind": "NotFoundError" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "id": format!("{namespace}-{name}"), "namespace": namespace, "name": name, "size": 5 })),
    )
}

async fn volume_create(
    State(cluster): State<Cluster>,
    UrlPath(namespace): UrlPath<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    cluster.record(format!("POST /v1/namespaces/{namespace}/volumes"));
    cluster.bodies.lock().unwrap().push(body.clone());
    Json(json!({
        "id": "v-new",
        "namespace": namespace,
        "name": body["name"],
        "size": body["size"],
    }))
}

async fn policy_list(State(cluster): State<Cluster>) -> Json<Value> {
    cluster.record("GET /v1/policies");
    Json(json!({
        "p2": { "spec": { "user": "bob", "namespace": "prod" } },
        "p1": { "spec": { "group": "ops", "readonly": true } }
    }))
}

async fn user_list(State(cluster): State<Cluster>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    cluster.record("GET /v1/users");
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": "u-1", "username": "admin", "role": "admin", "groups": [] },
            { "id": "u-2", "username": "alice", "role": "user", "groups": ["ops"] }
        ])),
    )
}

async fn user_create(State(cluster): State<Cluster>, Json(body): Json<Value>) -> Json<Value> {
    cluster.record("POST /v1/users");
    cluster.bodies.lock().unwrap().push(body.clone());
    Json(json!({
        "id": "u-42",
        "username": body["username"],
        "role": body["role"],
        "groups": body["groups"],
    }))
}

async fn login(State(cluster): State<Cluster>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    cluster.record("POST /v1/auth/login");
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "token": "t0k3n" })))
}

/// Starts the fake cluster and returns its `host:port` plus the request log.
pub async fn spawn_cluster() -> (String, Cluster) {
    let cluster = Cluster::default();
    let router = Router::new()
        .route("/v1/volumes", get(volume_list))
        .route("/v1/namespaces/:namespace/volumes/:name", get(volume_get))
        .route("/v1/namespaces/:namespace/volumes", post(volume_create))
        .route("/v1/policies", get(policy_list))
        .route("/v1/users", get(user_list).post(user_create))
        .route("/v1/auth/login", post(login))
        .with_state(cluster.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service()).await.unwrap();
    });
    (addr.to_string(), cluster)
}

/// Serves queued answers to password prompts.
pub struct ScriptedReader {
    answers: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl PasswordReader for ScriptedReader {
    fn read_password(&mut self, _prompt: &str) -> io::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}

pub struct Outcome {
    pub result: Result<()>,
    pub out: String,
    pub err: String,
}

/// Runs `storctl --config <dir> <args...>` with captured streams.
pub async fn run_cli(config_dir: &Path, args: &[&str], answers: &[&str]) -> Outcome {
    let dir = config_dir.to_string_lossy().to_string();
    let argv: Vec<&str> = ["storctl", "--config", dir.as_str()]
        .into_iter()
        .chain(args.iter().copied())
        .collect();
    let cli = Cli::parse_from(argv);

    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut input = ScriptedReader::new(answers);
    let mut term = Terminal {
        out: &mut out,
        err: &mut err,
        input: &mut input,
    };
    let result = commands::run(&cli, &EnvDefaults::default(), &mut term).await;

    Outcome {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}
