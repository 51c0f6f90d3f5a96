//! The bubble field: owns all kinematic state and runs the simulation.
//!
//! The field is an explicit state machine driven by a host scheduler: one
//! `tick()` per animation frame. Only one logical thread of control may
//! touch it at a time; interaction events (`click`, `background_click`,
//! `set_bounds`) mutate intent flags that the next tick's easing honors.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bubble::BubbleState;
use crate::config::FieldConfig;
use crate::geometry::Bounds;
use crate::model::IdeaRecord;

/// An observable transition in the field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum FieldEvent {
    /// A bubble was expanded by a click
    Expanded { id: String },
    /// A bubble was collapsed, by its own click or a background click
    Collapsed { id: String },
    /// A user collapsed an expanded bubble via its own click; the signal
    /// that would start the (out-of-scope) Lightning voting flow
    VoteIntent { id: String },
}

/// A proximity connector between two bubbles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector {
    pub a_id: String,
    pub b_id: String,
}

/// The bubble field simulation.
pub struct BubbleField {
    config: FieldConfig,
    rng: StdRng,
    bounds: Option<Bounds>,
    /// Current record snapshot, deduplicated, in feed order
    records: Vec<IdeaRecord>,
    bubbles: HashMap<String, BubbleState>,
    expanded_id: Option<String>,
    next_z: u64,
    tick_count: u64,
}

impl BubbleField {
    /// Create an empty field. Bubbles appear once both a record snapshot
    /// and valid bounds have been supplied, in either order.
    pub fn new(config: FieldConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            bounds: None,
            records: Vec::new(),
            bubbles: HashMap::new(),
            expanded_id: None,
            next_z: 0,
            tick_count: 0,
        }
    }

    /// Replace the record snapshot.
    ///
    /// Bubbles whose ids survive into the new snapshot keep their kinematic
    /// state; new ids get freshly randomized state; ids absent from the new
    /// snapshot are dropped. Duplicate ids within the snapshot resolve
    /// last-wins, keeping the first occurrence's position in feed order.
    pub fn load_snapshot(&mut self, records: Vec<IdeaRecord>) {
        let mut deduped: Vec<IdeaRecord> = Vec::with_capacity(records.len());
        let mut index_of: HashMap<String, usize> = HashMap::new();
        for record in records {
            match index_of.get(&record.id) {
                Some(&i) => deduped[i] = record,
                None => {
                    index_of.insert(record.id.clone(), deduped.len());
                    deduped.push(record);
                }
            }
        }

        self.bubbles.retain(|id, _| index_of.contains_key(id));
        let expanded_dropped = self
            .expanded_id
            .as_ref()
            .is_some_and(|id| !self.bubbles.contains_key(id));
        if expanded_dropped {
            self.expanded_id = None;
        }
        self.records = deduped;
        self.spawn_missing();
    }

    /// Update the container bounds. Invalid (zero-area) bounds clear the
    /// cached bounds and suspend the simulation; the first valid bounds
    /// initialize any pending records. The tick after a resize collides
    /// against the new bounds.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if !bounds.is_valid() {
            self.bounds = None;
            return;
        }
        self.bounds = Some(bounds);
        self.spawn_missing();
    }

    fn spawn_missing(&mut self) {
        let Some(bounds) = self.bounds else { return };
        for record in &self.records {
            if !self.bubbles.contains_key(&record.id) {
                let bubble = BubbleState::spawn(
                    record.id.clone(),
                    self.next_z,
                    bounds,
                    &self.config,
                    &mut self.rng,
                );
                self.next_z += 1;
                self.bubbles.insert(record.id.clone(), bubble);
            }
        }
    }

    /// True once the field has valid bounds and is simulating.
    pub fn is_ready(&self) -> bool {
        self.bounds.is_some()
    }

    /// Advance the simulation by one frame. A no-op until bounds are known.
    pub fn tick(&mut self) {
        let Some(bounds) = self.bounds else { return };
        for record in &self.records {
            if let Some(bubble) = self.bubbles.get_mut(&record.id) {
                bubble.step(bounds, &self.config, &mut self.rng);
            }
        }
        self.tick_count += 1;
    }

    /// Handle a click on bubble `id`, toggling its expanded state.
    ///
    /// Expanding force-collapses any other expanded bubble in the same
    /// update. Collapsing a bubble via its own click emits a vote intent.
    /// Unknown ids are ignored. Every click raises the bubble above its
    /// siblings.
    pub fn click(&mut self, id: &str) -> Vec<FieldEvent> {
        if !self.bubbles.contains_key(id) {
            return Vec::new();
        }
        let mut events = Vec::new();

        self.next_z += 1;
        let top = self.next_z;

        if self.expanded_id.as_deref() == Some(id) {
            self.collapse(id, &mut events);
            events.push(FieldEvent::VoteIntent { id: id.to_string() });
        } else {
            if let Some(previous) = self.expanded_id.take() {
                self.collapse(&previous, &mut events);
            }
            if let Some(bubble) = self.bubbles.get_mut(id) {
                bubble.is_expanded = true;
                bubble.is_minimizing = false;
                self.expanded_id = Some(id.to_string());
                events.push(FieldEvent::Expanded { id: id.to_string() });
            }
        }

        if let Some(bubble) = self.bubbles.get_mut(id) {
            bubble.z_index = top;
        }
        events
    }

    /// Handle a click on the background: collapse the expanded bubble, if
    /// any, without emitting a vote intent.
    pub fn background_click(&mut self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        if let Some(id) = self.expanded_id.take() {
            self.collapse(&id, &mut events);
        }
        events
    }

    fn collapse(&mut self, id: &str, events: &mut Vec<FieldEvent>) {
        if let Some(bubble) = self.bubbles.get_mut(id) {
            if bubble.is_expanded {
                bubble.is_expanded = false;
                bubble.is_minimizing = true;
                events.push(FieldEvent::Collapsed { id: id.to_string() });
            }
        }
        if self.expanded_id.as_deref() == Some(id) {
            self.expanded_id = None;
        }
    }

    /// Connector segments between every pair of bubbles whose centers are
    /// within the configured distance. O(n²) over the bubble count, which
    /// stays small at the idea volumes this board is built for.
    pub fn connectors(&self) -> Vec<Connector> {
        let mut connectors = Vec::new();
        let ids: Vec<&str> = self
            .records
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| self.bubbles.contains_key(*id))
            .collect();

        for (i, a_id) in ids.iter().enumerate() {
            let a = &self.bubbles[*a_id];
            for b_id in &ids[i + 1..] {
                let b = &self.bubbles[*b_id];
                if a.center().distance(&b.center()) <= self.config.connector_distance {
                    connectors.push(Connector {
                        a_id: a_id.to_string(),
                        b_id: b_id.to_string(),
                    });
                }
            }
        }
        connectors
    }

    /// The configuration this field runs with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current record snapshot, deduplicated, in feed order.
    pub fn records(&self) -> &[IdeaRecord] {
        &self.records
    }

    /// Look up one bubble's state.
    pub fn bubble(&self, id: &str) -> Option<&BubbleState> {
        self.bubbles.get(id)
    }

    /// Id of the currently expanded bubble, if any.
    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded_id.as_deref()
    }

    /// Number of live bubbles.
    pub fn bubble_count(&self) -> usize {
        self.bubbles.len()
    }

    /// Ticks simulated so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
