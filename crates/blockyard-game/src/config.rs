//! Top-level game configuration.

use blockyard_core::{Error, Result};
use blockyard_physics::PhysicsConfig;
use blockyard_world::{GenerationConfig, WorldSeed};
use serde::{Deserialize, Serialize};

/// Mining and placement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Farthest block the view ray can target. Unlimited by default.
    pub reach: f32,
    /// How far above the eye the no-placement zone extends.
    pub forbidden_zone_head_room: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reach: f32::INFINITY,
            forbidden_zone_head_room: 0.2,
        }
    }
}

impl InteractionConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.reach.is_nan() || self.reach <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "reach must be positive, got {}",
                self.reach
            )));
        }
        if !self.forbidden_zone_head_room.is_finite() || self.forbidden_zone_head_room < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "forbidden_zone_head_room must be non-negative, got {}",
                self.forbidden_zone_head_room
            )));
        }
        Ok(())
    }
}

/// Everything needed to build a [`WorldState`](crate::WorldState).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// World generation.
    pub generation: GenerationConfig,
    /// Player body and movement.
    pub physics: PhysicsConfig,
    /// Mining and placement.
    pub interaction: InteractionConfig,
}

impl GameConfig {
    /// Default configuration with the given world seed.
    #[must_use]
    pub fn with_seed(seed: WorldSeed) -> Self {
        let mut config = Self::default();
        config.generation.seed = seed;
        config
    }

    /// Set the world size for both generation and the movement bounds.
    #[must_use]
    pub fn world_size(mut self, world_size: i32) -> Self {
        self.generation.world_size = world_size;
        self.physics.world_size = world_size;
        self
    }

    /// Check every section and their agreement.
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        self.physics.validate()?;
        self.interaction.validate()?;

        if self.generation.world_size != self.physics.world_size {
            return Err(Error::InvalidConfig(format!(
                "generation world_size {} differs from physics world_size {}",
                self.generation.world_size, self.physics.world_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::with_seed(99).world_size(48).validate().is_ok());
    }

    #[test]
    fn world_sizes_must_agree() {
        let mut config = GameConfig::default();
        config.physics.world_size = 64;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_interaction() {
        let config = InteractionConfig {
            reach: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = InteractionConfig {
            forbidden_zone_head_room: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn section_errors_propagate() {
        let config = GameConfig::default().world_size(7);
        assert!(config.validate().is_err());
    }
}
