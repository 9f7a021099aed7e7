use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D
/// volume. Every renderable mesh in skinray is box-shaped, so the AABB is
/// not just an acceleration structure here - it is the exact geometry the
/// intersection engine tests against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Result of a successful slab test, including which face the ray entered
/// and exited through. `t_enter` may be negative when the ray origin is
/// inside the box; callers that need the visible face then use the exit
/// side instead.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlabHit {
    pub t_enter: f32,
    pub t_exit: f32,
    /// Axis (0=X, 1=Y, 2=Z) whose slab produced t_enter.
    pub enter_axis: usize,
    /// True if the ray entered through the min side of that axis.
    pub enter_is_min: bool,
    /// Axis whose slab produced t_exit.
    pub exit_axis: usize,
    /// True if the ray exited through the min side of that axis.
    pub exit_is_min: bool,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Minimum corner of the box.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Size of the box along each axis.
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Slab-method ray/box test that also reports the entry and exit faces.
    ///
    /// For each axis the ray parameter range covering that axis's slab is
    /// intersected into a running [t_enter, t_exit]; the axis and side that
    /// produced each bound identify the faces crossed. A ray parallel to an
    /// axis and outside that axis's slab is an immediate miss; a parallel
    /// ray inside the slab constrains nothing on that axis.
    ///
    /// Returns None when the ray misses or the box is entirely behind it.
    pub fn slab(&self, ray: &Ray) -> Option<SlabHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;
        let mut enter_is_min = true;
        let mut exit_axis = 0;
        let mut exit_is_min = false;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];

            if dir.abs() < 1e-8 {
                if !slab.contains(origin) {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (slab.min - origin) * inv;
            let mut t1 = (slab.max - origin) * inv;
            let mut near_is_min = true;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                near_is_min = false;
            }

            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
                enter_is_min = near_is_min;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
                exit_is_min = !near_is_min;
            }

            if t_enter > t_exit || t_exit < 0.0 {
                return None;
            }
        }

        // Ray with a (near-)zero direction never crosses a face.
        if t_exit == f32::INFINITY {
            return None;
        }

        Some(SlabHit {
            t_enter,
            t_exit,
            enter_axis,
            enter_is_min,
            exit_axis,
            exit_is_min,
        })
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}
