//! Live board runtime: drives the bubble field and fans out frames.
//!
//! The field sits behind a single `RwLock`; the only writers are the tick
//! task and the serialized interaction handlers, so bubble state is never
//! mutated from two places at once. Rendered frames and vote intents go out
//! on a broadcast channel that each WebSocket client subscribes to.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ideafield_engine::{
    render_frame, Bounds, BubbleField, FieldConfig, FieldEvent, FieldFrame, IdeaRecord,
};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drive rate for the simulation; one engine tick per interval.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Messages streamed to connected clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardMessage {
    /// A rendered simulation frame
    Frame(FieldFrame),
    /// A user collapsed an expanded bubble; voting would start here
    VoteIntent { idea_id: String },
}

/// Shared board state: the field plus the outgoing message channel.
pub struct Board {
    field: RwLock<BubbleField>,
    messages: broadcast::Sender<BoardMessage>,
}

impl Board {
    /// Create a board over an initial record snapshot. The field stays
    /// dormant until a client reports its surface size via [`Board::resize`].
    pub fn new(config: FieldConfig, records: Vec<IdeaRecord>) -> Arc<Self> {
        let mut field = BubbleField::new(config);
        field.load_snapshot(records);
        let (messages, _) = broadcast::channel(64);
        Arc::new(Self {
            field: RwLock::new(field),
            messages,
        })
    }

    /// Subscribe to the outgoing frame/event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardMessage> {
        self.messages.subscribe()
    }

    /// Handle a bubble click.
    pub async fn click(&self, id: &str) {
        let events = self.field.write().await.click(id);
        self.publish(events);
    }

    /// Handle a click on the background surface.
    pub async fn background_click(&self) {
        let events = self.field.write().await.background_click();
        self.publish(events);
    }

    /// Update the surface size. The next tick collides against these bounds.
    pub async fn resize(&self, width: f64, height: f64) {
        self.field.write().await.set_bounds(Bounds::new(width, height));
    }

    /// Add a freshly submitted idea to the live field. Existing bubbles keep
    /// their kinematic state; only the new idea gets a fresh bubble.
    pub async fn add_idea(&self, record: IdeaRecord) {
        let mut field = self.field.write().await;
        let mut records = field.records().to_vec();
        records.push(record);
        field.load_snapshot(records);
    }

    /// Render the field as it stands, without advancing it.
    pub async fn current_frame(&self) -> FieldFrame {
        let field = self.field.read().await;
        render_frame(&field, Utc::now().timestamp_millis())
    }

    /// Advance one tick and broadcast the resulting frame. Suspended while
    /// the surface size is unknown.
    async fn tick(&self) {
        let mut field = self.field.write().await;
        if !field.is_ready() {
            return;
        }
        field.tick();
        let frame = render_frame(&field, Utc::now().timestamp_millis());
        drop(field);
        let _ = self.messages.send(BoardMessage::Frame(frame));
    }

    fn publish(&self, events: Vec<FieldEvent>) {
        for event in events {
            if let FieldEvent::VoteIntent { id } = event {
                tracing::info!(idea_id = %id, "vote intent (Lightning voting not implemented)");
                let _ = self.messages.send(BoardMessage::VoteIntent { idea_id: id });
            }
        }
    }
}

/// Owns the tick task; aborts it on drop so no callback outlives the board.
pub struct BoardRuntime {
    board: Arc<Board>,
    ticker: JoinHandle<()>,
}

impl BoardRuntime {
    /// Spawn the tick loop for a board.
    pub fn spawn(board: Arc<Board>) -> Self {
        let ticker = tokio::spawn({
            let board = board.clone();
            async move {
                let mut interval = tokio::time::interval(TICK_INTERVAL);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    interval.tick().await;
                    board.tick().await;
                }
            }
        });
        Self { board, ticker }
    }

    /// The board this runtime drives.
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }
}

impl Drop for BoardRuntime {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn one_idea() -> Vec<IdeaRecord> {
        vec![IdeaRecord::new("a", "An idea")]
    }

    #[tokio::test]
    async fn collapse_after_expand_broadcasts_vote_intent() {
        let board = Board::new(FieldConfig::default(), one_idea());
        board.resize(800.0, 600.0).await;
        let mut rx = board.subscribe();

        board.click("a").await; // expand: no vote intent
        board.click("a").await; // collapse: vote intent

        let msg = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no message within timeout")
            .unwrap();
        match msg {
            BoardMessage::VoteIntent { idea_id } => assert_eq!(idea_id, "a"),
            other => panic!("expected vote intent, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn background_click_broadcasts_nothing() {
        let board = Board::new(FieldConfig::default(), one_idea());
        board.resize(800.0, 600.0).await;
        let mut rx = board.subscribe();

        board.click("a").await;
        board.background_click().await;

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn runtime_streams_frames_once_sized() {
        let board = Board::new(FieldConfig::default(), one_idea());
        let runtime = BoardRuntime::spawn(board.clone());
        let mut rx = runtime.board().subscribe();

        // Dormant without bounds
        assert!(timeout(Duration::from_millis(80), rx.recv()).await.is_err());

        board.resize(800.0, 600.0).await;
        let msg = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no frame within timeout")
            .unwrap();
        match msg {
            BoardMessage::Frame(frame) => assert_eq!(frame.bubbles.len(), 1),
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_idea_spawns_only_the_new_bubble() {
        let board = Board::new(FieldConfig::default(), one_idea());
        board.resize(800.0, 600.0).await;

        let before = board.current_frame().await;
        board.add_idea(IdeaRecord::new("b", "Another idea")).await;
        let after = board.current_frame().await;

        assert_eq!(after.bubbles.len(), 2);
        let a_before = before.bubbles.iter().find(|b| b.id == "a").unwrap();
        let a_after = after.bubbles.iter().find(|b| b.id == "a").unwrap();
        assert_eq!(a_before.x, a_after.x);
        assert_eq!(a_before.y, a_after.y);
    }
}
