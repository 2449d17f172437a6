//! Browser view layer: serves the static page, the read-only state api,
//! and the command surface over http. The engine stays the single owner
//! of simulation state; every mutation is serialized through one mutex.

mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::info;

use crate::{
    commands::CommandOutcome,
    engine::Engine,
    facilities::Facility,
    world::WorldSnapshot,
};

pub struct WebServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
struct AppState {
    engine: Arc<Mutex<Engine>>,
    broadcaster: broadcast::Sender<String>,
}

impl AppState {
    fn broadcast(&self, snapshot: &WorldSnapshot) {
        if let Ok(json) = serde_json::to_string(snapshot) {
            let _ = self.broadcaster.send(json);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CommandRequest {
    Build { facility: Facility },
    Produce,
    Select { x: u32, y: u32 },
    Move { x: u32, y: u32 },
}

#[derive(Serialize)]
struct CommandResponse {
    outcome: CommandOutcome,
    state: WorldSnapshot,
}

pub async fn serve(engine: Engine, config: WebServerConfig) -> Result<()> {
    let (tx, _) = broadcast::channel::<String>(64);
    let state = AppState {
        engine: Arc::new(Mutex::new(engine)),
        broadcaster: tx,
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/styles.css", get(styles_css))
        .route("/api/state", get(current_state))
        .route("/api/turn", post(advance_turn))
        .route("/api/command", post(submit_command))
        .route("/api/events", get(event_stream))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "serving palisade ui");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn app_js() -> Response {
    static_asset(assets::APP_JS, "application/javascript")
}

async fn styles_css() -> Response {
    static_asset(assets::STYLES_CSS, "text/css")
}

fn static_asset(body: &'static str, content_type: &'static str) -> Response {
    (
        [(header::CONTENT_TYPE, content_type)],
        Bytes::from_static(body.as_bytes()),
    )
        .into_response()
}

async fn current_state(State(state): State<AppState>) -> Json<WorldSnapshot> {
    let engine = state.engine.lock().expect("engine lock");
    Json(engine.snapshot())
}

async fn advance_turn(State(state): State<AppState>) -> Response {
    let mut engine = state.engine.lock().expect("engine lock");
    match engine.advance_turn() {
        Ok(summary) => {
            state.broadcast(&engine.snapshot());
            Json(summary).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn submit_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<CommandResponse> {
    let mut engine = state.engine.lock().expect("engine lock");
    let outcome = match request {
        CommandRequest::Build { facility } => engine.submit_build(facility),
        CommandRequest::Produce => engine.submit_produce(),
        CommandRequest::Select { x, y } => engine.submit_select(x, y),
        CommandRequest::Move { x, y } => engine.submit_move(x, y),
    };
    let snapshot = engine.snapshot();
    state.broadcast(&snapshot);
    Json(CommandResponse {
        outcome,
        state: snapshot,
    })
}

async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|msg| msg.ok().map(|data| Ok(Event::default().data(data))));
    Sse::new(stream).keep_alive(KeepAlive::default())
}
