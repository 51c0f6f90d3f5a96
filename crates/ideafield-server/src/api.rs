//! HTTP and WebSocket API for the idea board.
//!
//! REST endpoints cover the idea store (list, create, get); the WebSocket
//! carries the live simulation: the server streams rendered frames and vote
//! intents, the client sends clicks and surface resizes.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::board::Board;
use crate::ideas::StoredIdea;
use crate::storage::Storage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub board: Arc<Board>,
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Single-page frontend
        .route("/", get(index_handler))
        .route("/health", get(health))
        // Idea store
        .route("/api/ideas", get(list_ideas))
        .route("/api/ideas", post(create_idea))
        .route("/api/ideas/{id}", get(get_idea))
        // Live bubble field
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the server on the given port.
pub async fn serve(state: AppState, port: u16) -> Result<(), std::io::Error> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Idea board running on http://localhost:{}", port);
    axum::serve(listener, build_router(state)).await
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health() -> &'static str {
    "OK"
}

// --- Idea endpoints ---

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

#[derive(Serialize)]
struct IdeasResponse {
    ideas: Vec<StoredIdea>,
}

async fn list_ideas(State(state): State<AppState>) -> Result<Json<IdeasResponse>, ApiError> {
    let ideas = state.storage.list_ideas().map_err(|e| {
        tracing::error!(error = %e, "failed to list ideas");
        internal_error("Failed to fetch ideas. Please try again.")
    })?;
    Ok(Json(IdeasResponse { ideas }))
}

#[derive(Debug, Deserialize)]
struct CreateIdeaRequest {
    text_content: String,
    submitter_name: Option<String>,
    submitter_ln_address: Option<String>,
    submitter_contact_info: Option<String>,
}

#[derive(Serialize)]
struct CreateIdeaResponse {
    message: &'static str,
    idea: CreatedIdea,
}

#[derive(Serialize)]
struct CreatedIdea {
    id: String,
    text_content: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn text_is_valid(text: &str) -> bool {
    !text.trim().is_empty()
}

async fn create_idea(
    State(state): State<AppState>,
    Json(req): Json<CreateIdeaRequest>,
) -> Result<(StatusCode, Json<CreateIdeaResponse>), ApiError> {
    if !text_is_valid(&req.text_content) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Idea text content is required.".to_string(),
            }),
        ));
    }

    let mut idea = StoredIdea::new(req.text_content);
    idea.submitter_name = req.submitter_name;
    idea.submitter_ln_address = req.submitter_ln_address;
    idea.submitter_contact_info = req.submitter_contact_info;

    state.storage.put_idea(&idea).map_err(|e| {
        tracing::error!(error = %e, "failed to store idea");
        internal_error("Failed to submit idea. Please try again.")
    })?;

    // Float the new idea onto the live field right away.
    state.board.add_idea(idea.to_record()).await;
    tracing::info!(idea_id = %idea.id, "idea submitted");

    Ok((
        StatusCode::CREATED,
        Json(CreateIdeaResponse {
            message: "Idea submitted successfully",
            idea: CreatedIdea {
                id: idea.id,
                text_content: idea.text_content,
                created_at: idea.created_at,
            },
        }),
    ))
}

async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredIdea>, StatusCode> {
    match state.storage.get_idea(&id) {
        Ok(Some(idea)) => Ok(Json(idea)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!(error = %e, "failed to load idea");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// --- WebSocket ---

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    /// Click on a bubble
    Click { id: String },
    /// Click on the background surface
    BackgroundClick,
    /// The surface changed size
    Resize { width: f64, height: f64 },
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: AppState) {
    let mut messages = state.board.subscribe();

    // Current state first so a client has something to draw before the
    // next tick lands.
    let frame = state.board.current_frame().await;
    if let Ok(json) = serde_json::to_string(&crate::board::BoardMessage::Frame(frame)) {
        if socket.send(Message::Text(json.into())).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<WsCommand>(&text) {
                            Ok(cmd) => handle_command(&state, cmd).await,
                            Err(e) => tracing::debug!(error = %e, "ignoring malformed command"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
            outgoing = messages.recv() => {
                match outgoing {
                    Ok(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    // Slow consumer: drop missed frames and keep going.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn handle_command(state: &AppState, cmd: WsCommand) {
    match cmd {
        WsCommand::Click { id } => state.board.click(&id).await,
        WsCommand::BackgroundClick => state.board.background_click().await,
        WsCommand::Resize { width, height } => state.board.resize(width, height).await,
    }
}
