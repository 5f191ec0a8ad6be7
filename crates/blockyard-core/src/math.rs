//! Rays and block boxes.

use glam::Vec3;

/// Half-line used for picking and ground probes.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray pointing straight down from `origin`
    #[inline]
    pub const fn down(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::NEG_Y,
        }
    }

    /// Point at distance `t` from the origin
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray enters a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayEntry {
    /// Distance along the ray to the entry point
    pub distance: f32,
    /// Outward normal of the face the ray enters through
    pub normal: Vec3,
}

/// Axis-aligned box, used for block bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of edge `size` centered on `center`.
    #[inline]
    pub fn cube(center: Vec3, size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self::new(center - half, center + half)
    }

    /// Inclusive point test.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Find where a ray enters this box from the outside.
    ///
    /// Returns `None` when the ray misses or starts inside the box, so a box
    /// is only ever hit through one of its outward faces. An origin lying on
    /// a face counts as entering at distance zero.
    pub fn ray_entry(&self, ray: &Ray) -> Option<RayEntry> {
        let mut near = Vec3::splat(f32::NEG_INFINITY);
        let mut exit = f32::INFINITY;
        for axis in 0..3 {
            let (origin, dir) = (ray.origin[axis], ray.direction[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if dir == 0.0 {
                // Parallel to this slab: inside it for the whole ray, or never.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let a = (lo - origin) / dir;
            let b = (hi - origin) / dir;
            near[axis] = a.min(b);
            exit = exit.min(a.max(b));
        }

        // Entry is the last slab crossed; ties go to x, then y.
        let axis = if near.x >= near.y && near.x >= near.z {
            0
        } else if near.y >= near.z {
            1
        } else {
            2
        };
        let entry = near[axis];
        if entry < 0.0 || entry > exit {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[axis] = -ray.direction[axis].signum();
        Some(RayEntry {
            distance: entry,
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ray_walks_its_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(Ray::down(Vec3::ZERO).at(1.5), Vec3::new(0.0, -1.5, 0.0));
    }

    #[test]
    fn block_cube() {
        let aabb = Aabb::cube(Vec3::new(2.0, -1.5, 0.0), 1.0);
        assert_eq!(aabb.min, Vec3::new(1.5, -2.0, -0.5));
        assert_eq!(aabb.max, Vec3::new(2.5, -1.0, 0.5));
        assert!(aabb.contains(Vec3::new(2.0, -1.0, 0.5)));
        assert!(!aabb.contains(Vec3::new(2.0, -0.9, 0.0)));
    }

    #[test]
    fn ray_entry_reports_face_normal() {
        let aabb = Aabb::cube(Vec3::ZERO, 1.0);

        let from_above = aabb
            .ray_entry(&Ray::down(Vec3::new(0.1, 3.0, -0.2)))
            .expect("ray should hit the top face");
        assert_abs_diff_eq!(from_above.distance, 2.5);
        assert_eq!(from_above.normal, Vec3::Y);

        let from_side = aabb
            .ray_entry(&Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z))
            .expect("ray should hit the -Z face");
        assert_abs_diff_eq!(from_side.distance, 3.5);
        assert_eq!(from_side.normal, Vec3::NEG_Z);
    }

    #[test]
    fn ray_entry_skips_box_containing_origin() {
        let aabb = Aabb::cube(Vec3::ZERO, 1.0);
        assert!(aabb.ray_entry(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
    }

    #[test]
    fn ray_entry_on_surface_counts() {
        let aabb = Aabb::cube(Vec3::new(0.0, -1.5, 0.0), 1.0);
        let entry = aabb
            .ray_entry(&Ray::down(Vec3::new(0.0, -1.0, 0.0)))
            .expect("origin on the top face enters the box");
        assert_abs_diff_eq!(entry.distance, 0.0);
        assert_eq!(entry.normal, Vec3::Y);
    }

    #[test]
    fn ray_entry_along_a_face_plane() {
        // Origin on the shared face of two neighbours, travelling parallel to it.
        let ray = Ray::down(Vec3::new(2.5, -1.0, 0.0));
        for center_x in [2.0, 3.0] {
            let entry = Aabb::cube(Vec3::new(center_x, -1.5, 0.0), 1.0)
                .ray_entry(&ray)
                .expect("a ray on the face plane still enters the box");
            assert_abs_diff_eq!(entry.distance, 0.0);
            assert_eq!(entry.normal, Vec3::Y);
        }

        // Parallel and just outside the slab.
        let beside = Ray::down(Vec3::new(3.6, -1.0, 0.0));
        assert!(Aabb::cube(Vec3::new(3.0, -1.5, 0.0), 1.0)
            .ray_entry(&beside)
            .is_none());
    }

    #[test]
    fn ray_entry_misses() {
        let aabb = Aabb::cube(Vec3::ZERO, 1.0);
        // Behind the origin.
        assert!(aabb
            .ray_entry(&Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Z))
            .is_none());
        // Passing beside the box.
        assert!(aabb
            .ray_entry(&Ray::new(Vec3::new(0.0, 2.0, -4.0), Vec3::Z))
            .is_none());
    }
}
