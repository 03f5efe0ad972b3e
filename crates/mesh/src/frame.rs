//! Quaternion encoding of tangent frames.
//!
//! A frame `[tangent | cross(normal, tangent) | normal]` is a rotation, so it
//! fits in a unit quaternion. Each quaternion component is mapped from
//! `[-1, 1]` to `[0, 255]` and the four bytes are packed as
//! `x | y << 8 | z << 16 | w << 24`.
//!
//! `q` and `-q` are the same rotation, so the quaternion is stored with
//! `w >= 0`. The lowest bit of the `w` byte holds the handedness of the
//! tangent: it is set when the tangent's `w` is negative.

use cgmath::{InnerSpace, Matrix3, Quaternion, Vector3 as V3};

use crate::{geometry::unit_or_zero, Vector3, Vector4};

const HANDEDNESS_BIT: u32 = 1 << 24;

fn quantize(c: f32) -> u32 {
    ((c.clamp(-1.0, 1.0) + 1.0) * 0.5 * 255.0).round() as u32
}

fn dequantize(byte: u32) -> f32 {
    (byte & 0xff) as f32 / 255.0 * 2.0 - 1.0
}

/// Returns a unit vector orthogonal to `n`.
fn any_orthogonal(n: &Vector3) -> Vector3 {
    let axis = if n.x.abs() < 0.9 { V3::unit_x() } else { V3::unit_y() };
    n.cross(axis).normalize()
}

/// Builds the unit quaternion of the frame spanned by `tangent` and `normal`.
///
/// The result has a non-negative real part. Frames that cannot be made into a
/// rotation (a zero normal, for instance) give the identity.
pub fn tbn_quaternion(tangent: &Vector4, normal: &Vector3) -> Quaternion<f32> {
    let normal = unit_or_zero(*normal);
    let mut t = tangent.truncate();
    if t.magnitude2() == 0.0 {
        // The default tangent has no direction; pick any.
        t = any_orthogonal(&normal);
    }
    let b = normal.cross(t);
    let q = Quaternion::from(Matrix3::from_cols(t, b, normal));
    let q = if q.s < 0.0 { -q } else { q };

    let magnitude2 = q.magnitude2();
    if !magnitude2.is_finite() || magnitude2 <= f32::EPSILON {
        return Quaternion::new(1.0, 0.0, 0.0, 0.0);
    }
    q.normalize()
}

/// Packs the tangent frame of a vertex into 32 bits.
pub fn pack_tbn(tangent: &Vector4, normal: &Vector3) -> u32 {
    let q = tbn_quaternion(tangent, normal);
    let packed = quantize(q.v.x)
        | quantize(q.v.y) << 8
        | quantize(q.v.z) << 16
        | quantize(q.s) << 24;
    if tangent.w < 0.0 {
        packed | HANDEDNESS_BIT
    } else {
        packed & !HANDEDNESS_BIT
    }
}

/// Recovers the frame quaternion and the handedness from a packed frame.
///
/// The quaternion is renormalised. It matches the packed one to within the
/// 8 bit quantisation, with one extra step on `w` for the handedness bit.
/// The flag is true when the bitangent is `-cross(normal, tangent)`.
pub fn unpack_tbn(packed: u32) -> (Quaternion<f32>, bool) {
    let q = Quaternion::new(
        dequantize(packed >> 24),
        dequantize(packed),
        dequantize(packed >> 8),
        dequantize(packed >> 16),
    );
    (q.normalize(), packed & HANDEDNESS_BIT != 0)
}

#[cfg(test)]
mod tests {
    use cgmath::{Rad, Rotation3};
    use float_eq::assert_float_eq;

    use super::*;

    const STEP: f32 = 2.0 / 255.0;
    // Quantising all four components plus the handedness bit on `w` costs up
    // to about six steps of 1/255 on a decoded axis.
    const AXIS_TOLERANCE: f32 = 6.0 * STEP / 2.0;

    fn assert_axis(a: Vector3, b: Vector3) {
        assert_float_eq!(a.x, b.x, abs <= AXIS_TOLERANCE);
        assert_float_eq!(a.y, b.y, abs <= AXIS_TOLERANCE);
        assert_float_eq!(a.z, b.z, abs <= AXIS_TOLERANCE);
    }

    #[test]
    fn identity_frame() {
        let packed = pack_tbn(&Vector4::new(1.0, 0.0, 0.0, 1.0), &Vector3::new(0.0, 0.0, 1.0));
        // x, y and z sit at the middle of the range, w at the top.
        assert_eq!(packed & 0xff, 128);
        assert_eq!((packed >> 8) & 0xff, 128);
        assert_eq!((packed >> 16) & 0xff, 128);
        assert_eq!(packed >> 24, 254);

        let (q, flipped) = unpack_tbn(packed);
        assert!(!flipped);
        assert_float_eq!(q.s, 1.0, abs <= STEP);
    }

    #[test]
    fn handedness_is_kept() {
        let n = Vector3::new(0.0, 0.0, 1.0);
        let right = pack_tbn(&Vector4::new(1.0, 0.0, 0.0, 1.0), &n);
        let left = pack_tbn(&Vector4::new(1.0, 0.0, 0.0, -1.0), &n);
        assert_eq!(right & 0x00ff_ffff, left & 0x00ff_ffff);
        assert!(!unpack_tbn(right).1);
        assert!(unpack_tbn(left).1);
    }

    #[test]
    fn round_trip_recovers_the_frame() {
        let rotations = [
            Quaternion::from_axis_angle(V3::new(1.0, 2.0, 3.0).normalize(), Rad(0.7)),
            Quaternion::from_axis_angle(V3::new(-1.0, 0.5, 0.0).normalize(), Rad(2.9)),
            Quaternion::from_axis_angle(V3::new(0.0, 0.0, 1.0), Rad(3.1)),
            Quaternion::from_axis_angle(V3::new(0.3, -0.8, 0.1).normalize(), Rad(-1.3)),
        ];
        for rotation in rotations {
            let basis = Matrix3::from(rotation);
            let (tangent, normal) = (basis.x, basis.z);
            for w in [1.0, -1.0] {
                let packed = pack_tbn(&tangent.extend(w), &normal);
                let (q, flipped) = unpack_tbn(packed);
                assert_eq!(flipped, w < 0.0);

                let expected = tbn_quaternion(&tangent.extend(w), &normal);
                assert_float_eq!(q.v.x, expected.v.x, abs <= 2.5 * STEP);
                assert_float_eq!(q.v.y, expected.v.y, abs <= 2.5 * STEP);
                assert_float_eq!(q.v.z, expected.v.z, abs <= 2.5 * STEP);
                assert_float_eq!(q.s, expected.s, abs <= 2.5 * STEP);

                let decoded = Matrix3::from(q);
                assert_axis(decoded.z, normal);
                assert_axis(decoded.x, tangent);
            }
        }
    }

    #[test]
    fn default_tangent_still_encodes_the_normal() {
        let normal = V3::new(0.0, 1.0, 1.0).normalize();
        let packed = pack_tbn(&crate::DEFAULT_TANGENT, &normal);
        let (q, flipped) = unpack_tbn(packed);
        assert!(!flipped);
        assert_axis(Matrix3::from(q).z, normal);
    }

    #[test]
    fn normal_length_does_not_matter() {
        let tangent = Vector4::new(0.0, 1.0, 0.0, 1.0);
        let normal = V3::new(1.0, 0.0, 1.0);
        let long = tbn_quaternion(&tangent, &(normal * 7.5));
        let unit = tbn_quaternion(&tangent, &normal.normalize());
        assert_float_eq!(long.s, unit.s, abs <= 1e-5);
        assert_float_eq!(long.v.x, unit.v.x, abs <= 1e-5);
        assert_float_eq!(long.v.y, unit.v.y, abs <= 1e-5);
        assert_float_eq!(long.v.z, unit.v.z, abs <= 1e-5);
        let (q, _) = unpack_tbn(pack_tbn(&tangent, &(normal * 7.5)));
        assert_axis(Matrix3::from(q).z, normal.normalize());
    }

    #[test]
    fn zero_normal_packs_identity() {
        let q = tbn_quaternion(&crate::DEFAULT_TANGENT, &Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(q, Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }
}
