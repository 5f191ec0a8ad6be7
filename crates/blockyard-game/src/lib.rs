//! Game rules and the simulation aggregate for the Blockyard sandbox.
//!
//! [`WorldState`] ties the pieces together: it owns the generated
//! [`WorldGrid`](blockyard_world::WorldGrid), the [`Inventory`], and the
//! player, and advances them once per frame from a
//! [`FrameIntents`](blockyard_input::FrameIntents) snapshot.
//!
//! # Usage
//!
//! ```no_run
//! use blockyard_game::{GameConfig, NullObserver, WorldState};
//! use blockyard_input::{Intent, IntentState};
//!
//! let mut world = WorldState::new(GameConfig::with_seed(42))?;
//! let mut input = IntentState::new();
//! world.set_pointer_locked(true, &mut NullObserver);
//!
//! input.press(Intent::MoveForward);
//! input.press(Intent::Mine);
//! let report = world.tick(&input.take_frame(), 1.0 / 60.0, &mut NullObserver);
//! println!("{:?} {}", report.mined, world.inventory());
//! # Ok::<(), blockyard_core::Error>(())
//! ```

pub mod config;
pub mod interaction;
pub mod inventory;
pub mod observer;
pub mod state;

pub use config::{GameConfig, InteractionConfig};
pub use interaction::{mine, InteractionEngine, MineOutcome, PlaceOutcome};
pub use inventory::Inventory;
pub use observer::{GameObserver, NullObserver};
pub use state::{TickReport, WorldState};
