//! Player body and view state.

use blockyard_core::{Ray, Resource};
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Mutable player state advanced by [`PlayerController`](crate::PlayerController).
///
/// `position` is the camera/eye point; the body extends `player_height`
/// below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position.
    pub position: Vec3,
    /// Velocity; only `y` persists between ticks.
    pub velocity: Vec3,
    /// Standing on something solid; jumping is allowed.
    pub grounded: bool,
    /// Pointer is captured by the view.
    pub locked_to_view: bool,
    /// Kind that placement uses.
    pub selected_build_kind: Resource,
    /// Rotation around +Y in radians; 0 looks along -Z.
    pub yaw: f32,
    /// Rotation around the local X axis in radians; positive looks up.
    pub pitch: f32,
}

impl PlayerState {
    /// Player at the configured spawn point, falling.
    #[must_use]
    pub fn spawn(config: &PhysicsConfig) -> Self {
        Self {
            position: config.spawn,
            velocity: Vec3::new(0.0, config.spawn_velocity_y, 0.0),
            grounded: false,
            locked_to_view: false,
            selected_build_kind: Resource::default(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Move back to spawn, keeping view and selection.
    pub fn reset_to_spawn(&mut self, config: &PhysicsConfig) {
        self.position = config.spawn;
        self.velocity = Vec3::new(0.0, config.spawn_velocity_y, 0.0);
        self.grounded = false;
    }

    /// Rotation used for horizontal movement.
    #[inline]
    #[must_use]
    pub fn heading(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Full view rotation.
    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Ray from the eye through the screen center.
    #[must_use]
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.view_direction())
    }

    /// Switch between wood and stone, returning the new selection.
    pub fn toggle_build_kind(&mut self) -> Resource {
        self.selected_build_kind = self.selected_build_kind.toggled();
        self.selected_build_kind
    }
}
