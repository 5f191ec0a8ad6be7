//! Input handling for the Blockyard sandbox.
//!
//! The host's input layer turns physical keys and buttons into logical
//! [`Intent`]s. This crate collects them between ticks and hands the
//! simulation a single [`FrameIntents`] snapshot per tick.
//!
//! # Core Types
//!
//! - [`Intent`]: A logical action (move, jump, mine, place, toggles)
//! - [`IntentEvent`]: Press/release of an intent, as delivered by the host
//! - [`MoveFlags`]: Held movement directions
//! - [`IntentState`]: Accumulates events into per-tick snapshots
//!
//! # Usage
//!
//! ```ignore
//! // In the host's event handler
//! fn on_key(input: &mut IntentState, intent: Intent, down: bool) {
//!     input.process(if down {
//!         IntentEvent::Pressed(intent)
//!     } else {
//!         IntentEvent::Released(intent)
//!     });
//! }
//!
//! // Once per animation frame
//! fn frame(input: &mut IntentState, world: &mut WorldState, dt: f32) {
//!     let intents = input.take_frame();
//!     world.tick(&intents, dt, &mut observer);
//! }
//! ```

mod intent;
mod moves;
mod state;

pub use intent::{Intent, IntentEvent};
pub use moves::MoveFlags;
pub use state::{FrameIntents, IntentState};
