//! Collects input events between ticks into a per-tick snapshot.

use tracing::trace;

use crate::intent::{Intent, IntentEvent};
use crate::moves::MoveFlags;

/// Everything the simulation needs from input for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameIntents {
    /// Movement flags held at the start of the tick.
    pub moves: MoveFlags,
    /// Triggers received since the previous tick, in arrival order.
    pub triggers: Vec<Intent>,
}

impl FrameIntents {
    /// No movement and no triggers.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            moves: MoveFlags::empty(),
            triggers: Vec::new(),
        }
    }

    /// Snapshot holding the given movement flags.
    #[must_use]
    pub const fn moving(moves: MoveFlags) -> Self {
        Self {
            moves,
            triggers: Vec::new(),
        }
    }

    /// Append a trigger.
    #[must_use]
    pub fn with(mut self, trigger: Intent) -> Self {
        debug_assert!(trigger.is_trigger(), "{trigger:?} is a held intent");
        self.triggers.push(trigger);
        self
    }

    /// Returns `true` if the trigger arrived this tick.
    #[must_use]
    pub fn has(&self, trigger: Intent) -> bool {
        self.triggers.contains(&trigger)
    }
}

/// Input state accumulated between ticks.
///
/// Event handlers only record flags and queue triggers here; the simulation
/// reads one [`FrameIntents`] per tick via [`IntentState::take_frame`], which
/// keeps the tick deterministic and independent of event timing.
///
/// # Usage
///
/// ```
/// use blockyard_input::{Intent, IntentEvent, IntentState, MoveFlags};
///
/// let mut input = IntentState::new();
/// input.process(IntentEvent::Pressed(Intent::MoveForward));
/// input.process(IntentEvent::Pressed(Intent::Mine));
///
/// let frame = input.take_frame();
/// assert_eq!(frame.moves, MoveFlags::FORWARD);
/// assert!(frame.has(Intent::Mine));
///
/// // Triggers are consumed, held flags persist.
/// let next = input.take_frame();
/// assert_eq!(next.moves, MoveFlags::FORWARD);
/// assert!(next.triggers.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct IntentState {
    held: MoveFlags,
    pending: Vec<Intent>,
}

impl IntentState {
    /// Create an empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event from the host.
    pub fn process(&mut self, event: IntentEvent) {
        match event {
            IntentEvent::Pressed(intent) => self.press(intent),
            IntentEvent::Released(intent) => self.release(intent),
        }
    }

    /// Key or button down.
    pub fn press(&mut self, intent: Intent) {
        match intent.move_flag() {
            Some(flag) => self.held.insert(flag),
            None => {
                trace!(?intent, "Trigger queued");
                self.pending.push(intent);
            }
        }
    }

    /// Key or button up. Releasing a trigger has no effect.
    pub fn release(&mut self, intent: Intent) {
        if let Some(flag) = intent.move_flag() {
            self.held.remove(flag);
        }
    }

    /// Movement flags currently held.
    #[must_use]
    pub const fn held(&self) -> MoveFlags {
        self.held
    }

    /// Triggers waiting for the next tick.
    #[must_use]
    pub fn pending(&self) -> &[Intent] {
        &self.pending
    }

    /// Build this tick's snapshot, draining queued triggers.
    pub fn take_frame(&mut self) -> FrameIntents {
        FrameIntents {
            moves: self.held,
            triggers: std::mem::take(&mut self.pending),
        }
    }

    /// Drop held movement, e.g. when focus moves to a UI screen.
    pub fn release_all(&mut self) {
        self.held = MoveFlags::empty();
    }

    /// Clear all input state.
    pub fn clear(&mut self) {
        self.held = MoveFlags::empty();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_flags_follow_press_and_release() {
        let mut input = IntentState::new();
        input.press(Intent::MoveLeft);
        input.press(Intent::MoveForward);
        assert_eq!(input.held(), MoveFlags::LEFT | MoveFlags::FORWARD);

        input.release(Intent::MoveLeft);
        assert_eq!(input.held(), MoveFlags::FORWARD);

        // Releasing an unheld flag is harmless.
        input.release(Intent::MoveRight);
        assert_eq!(input.held(), MoveFlags::FORWARD);
    }

    #[test]
    fn triggers_survive_release_within_a_frame() {
        let mut input = IntentState::new();
        input.process(IntentEvent::Pressed(Intent::Jump));
        input.process(IntentEvent::Released(Intent::Jump));

        let frame = input.take_frame();
        assert_eq!(frame.triggers, vec![Intent::Jump]);
    }

    #[test]
    fn triggers_keep_order_and_repeats() {
        let mut input = IntentState::new();
        input.press(Intent::Mine);
        input.press(Intent::Mine);
        input.press(Intent::Place);
        assert_eq!(input.pending().len(), 3);

        let frame = input.take_frame();
        assert_eq!(frame.triggers, vec![Intent::Mine, Intent::Mine, Intent::Place]);
        assert!(input.pending().is_empty());
    }

    #[test]
    fn release_all_keeps_triggers() {
        let mut input = IntentState::new();
        input.press(Intent::MoveBackward);
        input.press(Intent::ToggleInventory);
        input.release_all();

        let frame = input.take_frame();
        assert!(frame.moves.is_empty());
        assert!(frame.has(Intent::ToggleInventory));

        input.press(Intent::MoveRight);
        input.press(Intent::Mine);
        input.clear();
        assert_eq!(input.take_frame(), FrameIntents::idle());
    }

    #[test]
    fn frame_builder() {
        let frame = FrameIntents::moving(MoveFlags::RIGHT).with(Intent::Place);
        assert_eq!(frame.moves, MoveFlags::RIGHT);
        assert!(frame.has(Intent::Place));
        assert!(!frame.has(Intent::Mine));
    }
}
