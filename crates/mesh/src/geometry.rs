use cgmath::InnerSpace;

pub type Vector2 = cgmath::Vector2<f32>;
pub type Vector3 = cgmath::Vector3<f32>;
pub type Vector4 = cgmath::Vector4<f32>;

// We rely on the vector types being repr(c) so attribute buffers can be handed
// to the GPU upload verbatim.
static_assertions::assert_eq_size!(Vector2, [f32; 2]);
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_size!(Vector4, [f32; 4]);
static_assertions::assert_eq_align!(Vector3, f32);

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl std::default::Default for Triangle {
    fn default() -> Self {
        Self {
            p0: Vector3::new(0.0, 0.0, 0.0),
            p1: Vector3::new(0.0, 0.0, 0.0),
            p2: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Triangle {
    pub fn corners(&self) -> [Vector3; 3] {
        [self.p0, self.p1, self.p2]
    }
}

/// An axis-aligned bounding box.
///
/// A box built from no points is inverted (`min > max` on every axis) so that
/// folding points into it with [`Aabb::extend`] always produces the true bounds.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vector3 {
            x: f32::MAX,
            y: f32::MAX,
            z: f32::MAX,
        },
        max: Vector3 {
            x: -f32::MAX,
            y: -f32::MAX,
            z: -f32::MAX,
        },
    };

    pub fn from_points<'a, I: IntoIterator<Item = &'a Vector3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut aabb, p| {
            aabb.extend(p);
            aabb
        })
    }

    pub fn extend(&mut self, p: &Vector3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns a copy grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    pub fn side(&self) -> Vector3 {
        self.max - self.min
    }

    /// Length of the longest side, or zero for an empty box.
    pub fn longest_side(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let side = self.side();
        side.x.max(side.y).max(side.z)
    }
}

/// Scales `v` to unit length. Zero vectors stay zero.
pub(crate) fn unit_or_zero(v: Vector3) -> Vector3 {
    if v.magnitude2() > 0.0 {
        v.normalize()
    } else {
        v
    }
}

/// Absolute per-component comparison used when welding vertices.
pub(crate) fn within<const N: usize>(a: [f32; N], b: [f32; N], tolerance: f32) -> bool {
    a.iter().zip(b.iter()).all(|(a, b)| (a - b).abs() <= tolerance)
}
