//! Per-tick player integrator.
//!
//! A tick runs in a fixed order: jump, vertical integration, ground probe,
//! horizontal movement, bounds clamp, fall recovery. The first four only run
//! while the player is active (pointer locked and no UI screen open); the
//! clamp and recovery always run.

use blockyard_core::Ray;
use blockyard_input::MoveFlags;
use blockyard_world::WorldGrid;
use glam::Vec3;
use tracing::debug;

use crate::collision::Collider;
use crate::config::PhysicsConfig;
use crate::player::PlayerState;
use crate::raycast::{GridRaycaster, RayQuery};

/// Input for one integrator tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Held movement directions.
    pub moves: MoveFlags,
    /// A jump was requested this tick.
    pub jump: bool,
    /// Movement, gravity, and jumping are enabled.
    pub active: bool,
}

/// What happened during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A jump was started.
    pub jumped: bool,
    /// The vertical move was stopped by a block below.
    pub landed: bool,
    /// The vertical move was stopped by a block above.
    pub bonked: bool,
    /// Horizontal movement fell back to single-axis sliding.
    pub slid: bool,
    /// Position was pulled back inside the world bounds.
    pub clamped: bool,
    /// The player fell below the floor and was respawned.
    pub respawned: bool,
    /// Grounded state after the tick.
    pub grounded: bool,
}

/// Advances [`PlayerState`] against a [`WorldGrid`].
#[derive(Debug, Clone, Default)]
pub struct PlayerController {
    config: PhysicsConfig,
}

impl PlayerController {
    /// Create a controller with the given configuration.
    #[must_use]
    pub const fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance the player by `dt` seconds, clamped to `max_delta`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn step(
        &self,
        grid: &WorldGrid,
        player: &mut PlayerState,
        input: StepInput,
        dt: f32,
    ) -> StepReport {
        let dt = dt.clamp(0.0, self.config.max_delta);
        let collider = Collider::new(grid, &self.config);
        let mut report = StepReport::default();

        if input.active {
            if input.jump && player.grounded {
                player.velocity.y = self.config.jump_velocity;
                player.grounded = false;
                report.jumped = true;
            }

            self.integrate_vertical(&collider, player, dt, &mut report);
            let on_ground = self.probe_ground(grid, player, dt);
            player.grounded = report.landed || on_ground;

            report.slid = self.integrate_horizontal(&collider, player, input.moves, dt);
        }

        report.clamped = self.clamp_to_bounds(player);

        if player.position.y < self.config.floor_y {
            debug!(position = ?player.position, "Fell below floor, respawning");
            player.reset_to_spawn(&self.config);
            report.respawned = true;
        }

        report.grounded = player.grounded;
        report
    }

    /// Apply gravity and try the vertical move.
    fn integrate_vertical(
        &self,
        collider: &Collider<'_>,
        player: &mut PlayerState,
        dt: f32,
        report: &mut StepReport,
    ) {
        let gravity = if player.velocity.y > 0.0 {
            self.config.gravity_ascending
        } else {
            self.config.gravity_descending
        };
        player.velocity.y = (player.velocity.y - gravity * dt).max(-self.config.terminal_velocity);

        let mut candidate = player.position;
        candidate.y += player.velocity.y * dt;

        if !collider.check(candidate) {
            player.position.y = candidate.y;
        } else if player.velocity.y < 0.0 {
            player.velocity.y = 0.0;
            report.landed = true;
        } else {
            player.velocity.y = self.config.ceiling_bounce_velocity;
            report.bonked = true;
        }
    }

    /// Look for solid ground just below the body.
    ///
    /// On a hit, residual downward velocity is dropped. On a miss, the extra
    /// airborne gravity is applied.
    fn probe_ground(&self, grid: &WorldGrid, player: &mut PlayerState, dt: f32) -> bool {
        let half_height = self.config.player_height / 2.0;
        let reach = half_height + self.config.ground_probe_epsilon;
        let ray = Ray::down(player.position - Vec3::Y * half_height);

        let on_ground = GridRaycaster::new(grid, self.config.block_size)
            .solid_only()
            .cast_ray(&ray, reach)
            .is_some_and(|hit| hit.distance < reach);

        if on_ground {
            player.velocity.y = player.velocity.y.min(0.0);
        } else {
            player.velocity.y = (player.velocity.y - self.config.airborne_gravity * dt)
                .max(-self.config.terminal_velocity);
        }
        on_ground
    }

    /// Move horizontally, returning true if the move fell back to sliding.
    ///
    /// The full move is taken when the swept path is clear, or when every
    /// block at the target is non-solid. Otherwise X and then Z are tried
    /// on their own.
    fn integrate_horizontal(
        &self,
        collider: &Collider<'_>,
        player: &mut PlayerState,
        moves: MoveFlags,
        dt: f32,
    ) -> bool {
        let local = moves.local_direction();
        if local == Vec3::ZERO {
            return false;
        }

        let step = player.heading() * local.normalize() * (self.config.move_speed * dt);
        let from = player.position;
        let target = Vec3::new(from.x + step.x, from.y, from.z + step.z);

        if !collider.swept(from, target) || collider.passable(target) {
            player.position = target;
            return false;
        }

        let x_only = Vec3::new(player.position.x + step.x, from.y, player.position.z);
        if !collider.check(x_only) {
            player.position.x = x_only.x;
        }
        let z_only = Vec3::new(player.position.x, from.y, player.position.z + step.z);
        if !collider.check(z_only) {
            player.position.z = z_only.z;
        }
        true
    }

    /// Pull the player back inside `±world_boundary` on X and Z.
    fn clamp_to_bounds(&self, player: &mut PlayerState) -> bool {
        let boundary = self.config.world_boundary();
        let half_width = self.config.player_half_width;
        let mut clamped = false;

        for axis in [0, 2] {
            let value = player.position[axis];
            if value < -boundary {
                player.position[axis] = -boundary + half_width;
                clamped = true;
            } else if value > boundary {
                player.position[axis] = boundary - half_width;
                clamped = true;
            }
        }
        clamped
    }
}
