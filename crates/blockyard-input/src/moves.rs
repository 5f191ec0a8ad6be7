//! Held movement flags.

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Directional movement keys currently held.
    ///
    /// Opposite directions may be held together; they cancel out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveFlags: u8 {
        /// Move toward the view direction.
        const FORWARD  = 0b0000_0001;
        /// Move away from the view direction.
        const BACKWARD = 0b0000_0010;
        /// Strafe left.
        const LEFT     = 0b0000_0100;
        /// Strafe right.
        const RIGHT    = 0b0000_1000;
    }
}

impl MoveFlags {
    /// Unnormalized movement direction in view space.
    ///
    /// Forward is `-Z` and right is `+X`; the result has no vertical part and
    /// is zero when no flags are held or opposite flags cancel.
    #[must_use]
    pub fn local_direction(self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.contains(Self::FORWARD) {
            direction.z -= 1.0;
        }
        if self.contains(Self::BACKWARD) {
            direction.z += 1.0;
        }
        if self.contains(Self::LEFT) {
            direction.x -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            direction.x += 1.0;
        }
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_direction() {
        assert_eq!(MoveFlags::FORWARD.local_direction(), Vec3::NEG_Z);
        assert_eq!(MoveFlags::RIGHT.local_direction(), Vec3::X);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let flags = MoveFlags::BACKWARD | MoveFlags::LEFT;
        assert_eq!(flags.local_direction(), Vec3::new(-1.0, 0.0, 1.0));
    }

    #[test]
    fn opposites_cancel() {
        let flags = MoveFlags::FORWARD | MoveFlags::BACKWARD;
        assert_eq!(flags.local_direction(), Vec3::ZERO);
        assert_eq!(MoveFlags::empty().local_direction(), Vec3::ZERO);
    }
}
