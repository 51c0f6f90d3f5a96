//! Presentation mapping: field state to a renderable, serializable frame.
//!
//! This layer owns no state of its own. It pairs each bubble with its idea
//! record and produces the shape the surface draws; records without a live
//! bubble (field not yet initialized) and bubbles without a record (stale
//! snapshot) are skipped rather than treated as faults.

use crate::bubble::BubbleState;
use crate::field::{BubbleField, Connector};
use crate::model::IdeaRecord;

/// What a bubble shows, depending on its expanded state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "view", rename_all = "snake_case"))]
pub enum BubbleContent {
    /// Headline plus running vote total
    Collapsed {
        headline: String,
        total_sats_voted: u64,
    },
    /// Full detail with the vote affordance
    Expanded {
        headline: String,
        body: Option<String>,
        submitter_name: Option<String>,
        total_sats_voted: u64,
        /// Humanized age, e.g. "5m ago"
        age: String,
    },
}

/// One bubble, ready to draw.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderBubble {
    pub id: String,
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub z_index: u64,
    pub expanded: bool,
    pub content: BubbleContent,
}

/// A full per-frame snapshot of the field.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldFrame {
    pub tick: u64,
    pub bubbles: Vec<RenderBubble>,
    pub connectors: Vec<Connector>,
}

/// Map one bubble and its matched record to a renderable description.
pub fn render_bubble(bubble: &BubbleState, record: &IdeaRecord, now_ms: i64) -> RenderBubble {
    let content = if bubble.is_expanded {
        BubbleContent::Expanded {
            headline: record.headline().to_string(),
            body: record.body().map(str::to_string),
            submitter_name: record.submitter_name.clone(),
            total_sats_voted: record.total_sats_voted,
            age: relative_age(record.created_at_ms, now_ms),
        }
    } else {
        BubbleContent::Collapsed {
            headline: record.headline().to_string(),
            total_sats_voted: record.total_sats_voted,
        }
    };

    RenderBubble {
        id: bubble.id.clone(),
        x: bubble.position.x,
        y: bubble.position.y,
        diameter: bubble.current_size,
        z_index: bubble.z_index,
        expanded: bubble.is_expanded,
        content,
    }
}

/// Render the whole field at the current tick.
pub fn render_frame(field: &BubbleField, now_ms: i64) -> FieldFrame {
    let bubbles = field
        .records()
        .iter()
        .filter_map(|record| {
            field
                .bubble(&record.id)
                .map(|bubble| render_bubble(bubble, record, now_ms))
        })
        .collect();

    FieldFrame {
        tick: field.tick_count(),
        bubbles,
        connectors: field.connectors(),
    }
}

/// Humanize a creation timestamp relative to `now_ms`.
pub fn relative_age(created_at_ms: i64, now_ms: i64) -> String {
    let seconds = (now_ms - created_at_ms).max(0) / 1000;
    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", seconds / 60),
        3600..=86_399 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::geometry::Bounds;

    fn ready_field(ids: &[&str]) -> BubbleField {
        let mut field = BubbleField::new(FieldConfig::default());
        field.set_bounds(Bounds::new(800.0, 600.0));
        field.load_snapshot(
            ids.iter()
                .map(|id| {
                    let mut record = IdeaRecord::new(*id, format!("{id} headline\n{id} body"));
                    record.submitter_name = Some("satoshi".to_string());
                    record.total_sats_voted = 21;
                    record
                })
                .collect(),
        );
        field
    }

    #[test]
    fn collapsed_bubbles_show_headline_and_votes() {
        let field = ready_field(&["a"]);
        let frame = render_frame(&field, 0);

        assert_eq!(frame.bubbles.len(), 1);
        let bubble = &frame.bubbles[0];
        assert!(!bubble.expanded);
        assert_eq!(
            bubble.content,
            BubbleContent::Collapsed {
                headline: "a headline".to_string(),
                total_sats_voted: 21,
            }
        );
    }

    #[test]
    fn expanded_bubble_shows_full_detail() {
        let mut field = ready_field(&["a"]);
        field.click("a");
        let frame = render_frame(&field, 90_000);

        let bubble = &frame.bubbles[0];
        assert!(bubble.expanded);
        match &bubble.content {
            BubbleContent::Expanded {
                headline,
                body,
                submitter_name,
                total_sats_voted,
                age,
            } => {
                assert_eq!(headline, "a headline");
                assert_eq!(body.as_deref(), Some("a body"));
                assert_eq!(submitter_name.as_deref(), Some("satoshi"));
                assert_eq!(*total_sats_voted, 21);
                assert_eq!(age, "1m ago");
            }
            other => panic!("expected expanded content, got {other:?}"),
        }
    }

    #[test]
    fn uninitialized_field_renders_empty() {
        let mut field = BubbleField::new(FieldConfig::default());
        field.load_snapshot(vec![IdeaRecord::new("a", "a")]);
        // No bounds yet: records are pending, nothing to draw.
        let frame = render_frame(&field, 0);
        assert!(frame.bubbles.is_empty());
        assert!(frame.connectors.is_empty());
    }

    #[test]
    fn frame_preserves_feed_order() {
        let field = ready_field(&["a", "b", "c"]);
        let frame = render_frame(&field, 0);
        let ids: Vec<&str> = frame.bubbles.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn relative_age_buckets() {
        assert_eq!(relative_age(0, 30_000), "just now");
        assert_eq!(relative_age(0, 5 * 60_000), "5m ago");
        assert_eq!(relative_age(0, 3 * 3_600_000), "3h ago");
        assert_eq!(relative_age(0, 2 * 86_400_000), "2d ago");
        // Clock skew: a future timestamp reads as "just now"
        assert_eq!(relative_age(10_000, 0), "just now");
    }
}
