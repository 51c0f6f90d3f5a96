//! Idea board server entry point.
//!
//! Usage: `ideafield [db_path] [port] [seed]`

use std::env;
use std::sync::Arc;

use ideafield_engine::FieldConfig;
use ideafield_server::{serve, AppState, Board, BoardRuntime, Storage};
use rand::Rng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let db_path = args.get(1).cloned().unwrap_or_else(|| "ideafield-db".to_string());
    let port: u16 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3000);
    let seed: u64 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen());

    let storage = Arc::new(Storage::open(&db_path)?);
    let ideas = storage.list_ideas()?;
    tracing::info!(count = ideas.len(), path = %db_path, "loaded ideas");

    let config = FieldConfig {
        seed,
        ..FieldConfig::default()
    };
    let records = ideas.iter().map(|idea| idea.to_record()).collect();
    let board = Board::new(config, records);
    let _runtime = BoardRuntime::spawn(board.clone());

    serve(AppState { storage, board }, port).await?;

    Ok(())
}
