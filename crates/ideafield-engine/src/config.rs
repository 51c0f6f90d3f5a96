//! Tunables for the bubble field simulation.

use std::f64::consts::PI;

/// Configuration for a bubble field.
///
/// Distances are in surface pixels, speeds in pixels per tick. One tick
/// corresponds to one animation frame of the original surface, so the
/// defaults assume a ~60 Hz drive rate.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Seed for deterministic placement and jitter
    pub seed: u64,
    /// Diameter of a collapsed bubble
    pub collapsed_size: f64,
    /// Diameter of an expanded bubble
    pub expanded_size: f64,
    /// Constant travel speed, pixels per tick
    pub speed: f64,
    /// Fraction of the remaining size gap closed per tick
    pub easing_rate: f64,
    /// Velocity multiplier applied on boundary collision (< 1)
    pub bounce_damping: f64,
    /// Margin kept between bubbles and the container edge
    pub padding: f64,
    /// Maximum center-to-center distance for a connector line
    pub connector_distance: f64,
    /// Snap-to-target threshold for size easing
    pub size_epsilon: f64,
    /// Minimum ticks between direction jitters, per bubble
    pub jitter_min_ticks: u32,
    /// Maximum ticks between direction jitters, per bubble
    pub jitter_max_ticks: u32,
    /// Largest jitter rotation, radians either way
    pub jitter_max_angle: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            collapsed_size: 90.0,
            expanded_size: 240.0,
            speed: 0.6,
            easing_rate: 0.08,
            bounce_damping: 0.9,
            padding: 20.0,
            connector_distance: 450.0,
            size_epsilon: 0.1,
            jitter_min_ticks: 120,
            jitter_max_ticks: 180,
            jitter_max_angle: PI / 16.0,
        }
    }
}
