//! Tunables for the player integrator.

use blockyard_core::constants::{BLOCK_SIZE, WORLD_SIZE};
use blockyard_core::{Error, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Player body, gravity, and movement constants.
///
/// Distances are in world units, velocities in units per second, and
/// accelerations in units per second squared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Edge length of a block.
    pub block_size: f32,
    /// Side length of the playable square, in blocks.
    pub world_size: i32,
    /// Half the player's horizontal extent.
    pub player_half_width: f32,
    /// Player height; the reference point sits at the top of this band.
    pub player_height: f32,
    /// Gravity while moving up.
    pub gravity_ascending: f32,
    /// Gravity while falling or at rest.
    pub gravity_descending: f32,
    /// Extra gravity applied when the ground probe finds nothing.
    pub airborne_gravity: f32,
    /// Maximum fall speed.
    pub terminal_velocity: f32,
    /// Upward velocity set by a jump.
    pub jump_velocity: f32,
    /// Vertical velocity after hitting a ceiling.
    pub ceiling_bounce_velocity: f32,
    /// Horizontal speed.
    pub move_speed: f32,
    /// Largest time step a single tick integrates.
    pub max_delta: f32,
    /// Ground probe tolerance past half the player height.
    pub ground_probe_epsilon: f32,
    /// Points tested along a horizontal move.
    pub swept_samples: u32,
    /// Horizontal moves shorter than this skip the swept test.
    pub min_sweep_distance: f32,
    /// Falling below this height respawns the player.
    pub floor_y: f32,
    /// Respawn position.
    pub spawn: Vec3,
    /// Vertical velocity on spawn and respawn.
    pub spawn_velocity_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            world_size: WORLD_SIZE,
            player_half_width: 0.25,
            player_height: 1.0,
            gravity_ascending: 60.0,
            gravity_descending: 120.0,
            airborne_gravity: 40.0,
            terminal_velocity: 100.0,
            jump_velocity: 15.0,
            ceiling_bounce_velocity: -5.0,
            move_speed: 8.0,
            max_delta: 0.1,
            ground_probe_epsilon: 0.2,
            swept_samples: 3,
            min_sweep_distance: 0.01,
            floor_y: -10.0,
            spawn: Vec3::new(0.0, 10.0, -15.0),
            spawn_velocity_y: -55.0,
        }
    }
}

impl PhysicsConfig {
    /// Distance from the origin to the world edge on each horizontal axis.
    #[inline]
    #[must_use]
    pub fn world_boundary(&self) -> f32 {
        self.world_size as f32 / 2.0 * self.block_size
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.world_size <= 0 || self.world_size % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "world_size must be positive and even, got {}",
                self.world_size
            )));
        }
        for (name, value) in [
            ("block_size", self.block_size),
            ("player_half_width", self.player_half_width),
            ("player_height", self.player_height),
            ("max_delta", self.max_delta),
            ("terminal_velocity", self.terminal_velocity),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.swept_samples == 0 {
            return Err(Error::InvalidConfig(
                "swept_samples must be at least 1".into(),
            ));
        }
        if self.spawn.y < self.floor_y {
            return Err(Error::InvalidConfig(format!(
                "spawn height {} is below floor_y {}",
                self.spawn.y, self.floor_y
            )));
        }
        Ok(())
    }
}
