//! Ideafield Bubble Engine
//!
//! Simulation core for the floating idea-bubble board.
//!
//! # Architecture
//!
//! - **Field**: one kinematic state per idea record, advanced by an explicit
//!   `tick()` the host scheduler drives once per frame
//! - **Interaction**: clicks toggle expand/collapse under a single-expanded
//!   invariant and emit vote-intent events
//! - **Render**: pure mapping from field state to a serializable frame
//!   (positions, sizes, stacking, proximity connectors)
//!
//! The engine does no I/O and draws all randomness from a seeded source, so
//! every run is reproducible.
//!
//! # Usage
//!
//! ```
//! use ideafield_engine::{BubbleField, Bounds, FieldConfig, IdeaRecord, render_frame};
//!
//! let mut field = BubbleField::new(FieldConfig::default());
//! field.set_bounds(Bounds::new(800.0, 600.0));
//! field.load_snapshot(vec![IdeaRecord::new("idea-1", "Ship it")]);
//!
//! field.tick();
//! let frame = render_frame(&field, 0);
//! assert_eq!(frame.bubbles.len(), 1);
//! ```

mod bubble;
mod config;
mod field;
mod geometry;
mod model;
mod render;

pub use bubble::BubbleState;
pub use config::FieldConfig;
pub use field::{BubbleField, Connector, FieldEvent};
pub use geometry::{Bounds, Vec2};
pub use model::IdeaRecord;
pub use render::{relative_age, render_bubble, render_frame, BubbleContent, FieldFrame, RenderBubble};
