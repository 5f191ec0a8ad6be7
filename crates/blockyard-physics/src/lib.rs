//! Player physics for the Blockyard sandbox.
//!
//! Collision is a brute-force scan: every query visits every block in the
//! [`WorldGrid`](blockyard_world::WorldGrid). That is fine for the generated
//! 32x32 world, which holds a few thousand blocks.
//!
//! # Core Types
//!
//! - [`PlayerController`]: Advances the player one tick
//! - [`PlayerState`]: Position, velocity, view, and build selection
//! - [`Collider`]: Point-versus-block collision queries
//! - [`RayQuery`]: Nearest-block ray query, implemented by [`GridRaycaster`]

pub mod collision;
pub mod config;
pub mod controller;
pub mod player;
pub mod raycast;

pub use collision::Collider;
pub use config::PhysicsConfig;
pub use controller::{PlayerController, StepInput, StepReport};
pub use player::PlayerState;
pub use raycast::{GridRaycaster, RayQuery, RaycastHit};
