//! Per-bubble kinematic state and its tick-step rules.

use rand::Rng;

use crate::config::FieldConfig;
use crate::geometry::{Bounds, Vec2};

/// Kinematic state for one idea bubble.
///
/// `position` is the top-left corner of the bubble's bounding square.
/// The field guarantees at most one bubble has `is_expanded` set.
#[derive(Debug, Clone)]
pub struct BubbleState {
    /// Lookup key into the idea record snapshot
    pub id: String,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Current diameter, eased toward the collapsed or expanded target
    pub current_size: f64,
    pub is_expanded: bool,
    /// True while easing back down after a collapse
    pub is_minimizing: bool,
    /// Stacking order; bumped on every click
    pub z_index: u64,
    /// Ticks until the next direction jitter
    pub(crate) jitter_countdown: u32,
}

impl BubbleState {
    /// Allocate a bubble at a random interior position with a random
    /// direction at the configured constant speed.
    pub(crate) fn spawn<R: Rng>(
        id: String,
        z_index: u64,
        bounds: Bounds,
        cfg: &FieldConfig,
        rng: &mut R,
    ) -> Self {
        let max_x = (bounds.width - cfg.collapsed_size - cfg.padding).max(cfg.padding);
        let max_y = (bounds.height - cfg.collapsed_size - cfg.padding).max(cfg.padding);
        let position = Vec2::new(
            rng.gen_range(cfg.padding..=max_x),
            rng.gen_range(cfg.padding..=max_y),
        );
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        Self {
            id,
            position,
            velocity: Vec2::from_angle(angle, cfg.speed),
            current_size: cfg.collapsed_size,
            is_expanded: false,
            is_minimizing: false,
            z_index,
            jitter_countdown: rng.gen_range(cfg.jitter_min_ticks..=cfg.jitter_max_ticks),
        }
    }

    /// Diameter this bubble is easing toward.
    pub fn target_size(&self, cfg: &FieldConfig) -> f64 {
        if self.is_expanded {
            cfg.expanded_size
        } else {
            cfg.collapsed_size
        }
    }

    /// Center of the bubble.
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.current_size / 2.0, self.current_size / 2.0)
    }

    /// Advance this bubble by one tick: integrate, collide, ease, jitter.
    pub(crate) fn step<R: Rng>(&mut self, bounds: Bounds, cfg: &FieldConfig, rng: &mut R) {
        self.position += self.velocity;

        if self.collide(bounds, cfg) {
            // Damping changes the feel of the bounce, not the long-run
            // speed: the vector is brought back to the design speed.
            self.velocity = (self.velocity * cfg.bounce_damping).with_length(cfg.speed);
        }

        self.ease_size(cfg);
        self.jitter(cfg, rng);
    }

    /// Clamp against the padded container walls, reflecting velocity
    /// components on contact. Returns whether any wall was hit.
    fn collide(&mut self, bounds: Bounds, cfg: &FieldConfig) -> bool {
        let min = cfg.padding;
        let max_x = (bounds.width - self.current_size - cfg.padding).max(min);
        let max_y = (bounds.height - self.current_size - cfg.padding).max(min);
        let mut bounced = false;

        if self.position.x < min {
            self.position.x = min;
            self.velocity.x = self.velocity.x.abs();
            bounced = true;
        } else if self.position.x > max_x {
            self.position.x = max_x;
            self.velocity.x = -self.velocity.x.abs();
            bounced = true;
        }

        if self.position.y < min {
            self.position.y = min;
            self.velocity.y = self.velocity.y.abs();
            bounced = true;
        } else if self.position.y > max_y {
            self.position.y = max_y;
            self.velocity.y = -self.velocity.y.abs();
            bounced = true;
        }

        bounced
    }

    /// Ease `current_size` toward its target, snapping within epsilon.
    fn ease_size(&mut self, cfg: &FieldConfig) {
        let target = self.target_size(cfg);
        self.current_size += (target - self.current_size) * cfg.easing_rate;
        self.current_size = self
            .current_size
            .clamp(cfg.collapsed_size, cfg.expanded_size);

        if (self.current_size - target).abs() < cfg.size_epsilon {
            self.current_size = target;
            if !self.is_expanded {
                self.is_minimizing = false;
            }
        }
    }

    /// Rotate the velocity by a small random angle on an independent,
    /// per-bubble interval so bouncing never becomes perfectly periodic.
    fn jitter<R: Rng>(&mut self, cfg: &FieldConfig, rng: &mut R) {
        if self.jitter_countdown > 0 {
            self.jitter_countdown -= 1;
            return;
        }
        let angle = rng.gen_range(-cfg.jitter_max_angle..=cfg.jitter_max_angle);
        self.velocity = self.velocity.rotated(angle);
        self.jitter_countdown = rng.gen_range(cfg.jitter_min_ticks..=cfg.jitter_max_ticks);
    }
}
