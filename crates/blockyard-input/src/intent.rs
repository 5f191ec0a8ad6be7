//! Logical player intents delivered by the host's input layer.

use crate::moves::MoveFlags;

/// A debounced logical intent.
///
/// The host maps physical keys and buttons to these; this crate never sees
/// raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Held: walk forward.
    MoveForward,
    /// Held: walk backward.
    MoveBackward,
    /// Held: strafe left.
    MoveLeft,
    /// Held: strafe right.
    MoveRight,
    /// Trigger: jump if standing on ground.
    Jump,
    /// Trigger: hit the block under the crosshair (primary button).
    Mine,
    /// Trigger: place the selected kind against the targeted face
    /// (secondary button or build key).
    Place,
    /// Trigger: switch between wood and stone.
    ToggleBuildKind,
    /// Trigger: open or close the inventory screen.
    ToggleInventory,
}

impl Intent {
    /// Movement flag for held intents, `None` for triggers.
    #[must_use]
    pub const fn move_flag(self) -> Option<MoveFlags> {
        match self {
            Self::MoveForward => Some(MoveFlags::FORWARD),
            Self::MoveBackward => Some(MoveFlags::BACKWARD),
            Self::MoveLeft => Some(MoveFlags::LEFT),
            Self::MoveRight => Some(MoveFlags::RIGHT),
            Self::Jump
            | Self::Mine
            | Self::Place
            | Self::ToggleBuildKind
            | Self::ToggleInventory => None,
        }
    }

    /// Returns `true` for one-shot intents that are consumed by a tick.
    #[inline]
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        self.move_flag().is_none()
    }
}

/// An input event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentEvent {
    /// The intent's key or button went down.
    Pressed(Intent),
    /// The intent's key or button went up. Only meaningful for held intents.
    Released(Intent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_intents_are_held() {
        for intent in [
            Intent::MoveForward,
            Intent::MoveBackward,
            Intent::MoveLeft,
            Intent::MoveRight,
        ] {
            assert!(!intent.is_trigger());
        }
        assert_eq!(Intent::MoveLeft.move_flag(), Some(MoveFlags::LEFT));
    }

    #[test]
    fn actions_are_triggers() {
        for intent in [
            Intent::Jump,
            Intent::Mine,
            Intent::Place,
            Intent::ToggleBuildKind,
            Intent::ToggleInventory,
        ] {
            assert!(intent.is_trigger());
            assert_eq!(intent.move_flag(), None);
        }
    }
}
