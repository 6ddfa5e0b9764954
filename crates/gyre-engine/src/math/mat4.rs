use core::ops::Mul;

/// 4×4 matrix of `f32`, column-major.
///
/// Value semantics throughout: every operation returns a new matrix and
/// never mutates its operands. `m[col * 4 + row]` is the element layout,
/// so the slice can be handed to `glUniformMatrix4fv` with no transpose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Composes `self` with `rhs`, operands read left to right in
    /// application order: `rotation.multiply(view).multiply(projection)`
    /// yields the matrix that rotates first and projects last.
    ///
    /// Under the column-major layout this computes the mathematical product
    /// `rhs · self` on column vectors. The order is a contract, not an
    /// implementation detail: swapping operands moves the rotation pivot.
    pub fn multiply(self, rhs: Mat4) -> Mat4 {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                out[i * 4 + j] = a[i * 4] * b[j]
                    + a[i * 4 + 1] * b[4 + j]
                    + a[i * 4 + 2] * b[8 + j]
                    + a[i * 4 + 3] * b[12 + j];
            }
        }
        Mat4 { m: out }
    }

    /// Right-handed perspective projection.
    ///
    /// `f = 1 / tan(fov / 2)`; the matrix maps view space into clip space
    /// with `m[11] = -1` providing the perspective divide.
    ///
    /// Degenerate parameters (`fov` outside (0°, 180°), zero `aspect`, or
    /// `z_near == z_far`, which would divide by zero) fall back to the
    /// identity matrix. That fallback is a defined policy, not an error.
    pub fn perspective(fov_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) || aspect == 0.0 || z_near == z_far {
            return Mat4::IDENTITY;
        }

        let f = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
        let mut out = Mat4::IDENTITY;
        out.m[0] = f / aspect;
        out.m[5] = f;
        out.m[10] = (z_far + z_near) / (z_near - z_far);
        out.m[11] = -1.0;
        out.m[14] = (2.0 * z_far * z_near) / (z_near - z_far);
        out.m[15] = 0.0;
        out
    }

    /// Identity with the translation column set to `(x, y, z)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        let mut out = Mat4::IDENTITY;
        out.m[12] = x;
        out.m[13] = y;
        out.m[14] = z;
        out
    }

    /// Axis-angle rotation (Rodrigues) about `(x, y, z)`, normalized here.
    ///
    /// A zero-length axis yields the identity matrix instead of dividing
    /// by zero.
    pub fn rotation(angle_radians: f32, x: f32, y: f32, z: f32) -> Mat4 {
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return Mat4::IDENTITY;
        }
        let (x, y, z) = (x / len, y / len, z / len);
        let c = angle_radians.cos();
        let s = angle_radians.sin();
        let t = 1.0 - c;

        let mut out = Mat4::IDENTITY;
        out.m[0] = x * x * t + c;
        out.m[4] = x * y * t - z * s;
        out.m[8] = x * z * t + y * s;
        out.m[1] = y * x * t + z * s;
        out.m[5] = y * y * t + c;
        out.m[9] = y * z * t - x * s;
        out.m[2] = x * z * t - y * s;
        out.m[6] = y * z * t + x * s;
        out.m[10] = z * z * t + c;
        out
    }

    /// Column-major element slice, suitable for direct uniform upload.
    #[inline]
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.m
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for i in 0..16 {
            assert!(
                (a.m[i] - b.m[i]).abs() < TOL,
                "element {i}: {} vs {}\n  a = {:?}\n  b = {:?}",
                a.m[i],
                b.m[i],
                a.m,
                b.m,
            );
        }
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn identity_diagonal() {
        let id = Mat4::identity();
        for i in 0..16 {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(id.m[i], expected, "element {i}");
        }
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let a = Mat4::rotation(0.7, 1.0, 2.0, 3.0) * Mat4::translation(4.0, -5.0, 6.0);
        assert_mat_eq(a * Mat4::identity(), a);
        assert_mat_eq(Mat4::identity() * a, a);
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn zero_angle_rotation_is_identity() {
        assert_mat_eq(Mat4::rotation(0.0, 0.3, -1.0, 2.5), Mat4::identity());
    }

    #[test]
    fn zero_axis_rotation_falls_back_to_identity() {
        assert_mat_eq(Mat4::rotation(1.23, 0.0, 0.0, 0.0), Mat4::identity());
    }

    #[test]
    fn half_turn_is_self_inverse() {
        let half = Mat4::rotation(core::f32::consts::PI, 1.0, 1.0, 0.5);
        assert_mat_eq(half * half, Mat4::identity());
    }

    #[test]
    fn opposite_angles_cancel() {
        let fwd = Mat4::rotation(0.9, 0.0, 1.0, 0.0);
        let back = Mat4::rotation(-0.9, 0.0, 1.0, 0.0);
        assert_mat_eq(fwd * back, Mat4::identity());
    }

    // ── perspective ───────────────────────────────────────────────────────

    #[test]
    fn perspective_fov90_square() {
        let p = Mat4::perspective(90.0, 1.0, 0.1, 100.0);
        // tan(45°) == 1, so both focal terms are 1.
        assert!((p.m[0] - 1.0).abs() < TOL);
        assert!((p.m[5] - 1.0).abs() < TOL);
        assert_eq!(p.m[11], -1.0);
        assert_eq!(p.m[15], 0.0);
    }

    #[test]
    fn perspective_matches_formula() {
        let (fov, aspect, near, far) = (45.0f32, 800.0 / 600.0, 0.1, 100.0);
        let p = Mat4::perspective(fov, aspect, near, far);

        let f = 1.0 / (fov.to_radians() / 2.0).tan();
        assert!((p.m[0] - f / aspect).abs() < TOL);
        assert!((p.m[5] - f).abs() < TOL);
        assert!((p.m[10] - (far + near) / (near - far)).abs() < TOL);
        assert!((p.m[14] - (2.0 * far * near) / (near - far)).abs() < TOL);
        assert_eq!(p.m[11], -1.0);
        assert_eq!(p.m[15], 0.0);
    }

    #[test]
    fn perspective_degenerate_inputs_yield_identity() {
        assert_mat_eq(Mat4::perspective(180.0, 1.0, 0.1, 100.0), Mat4::identity());
        assert_mat_eq(Mat4::perspective(45.0, 1.0, 5.0, 5.0), Mat4::identity());
        assert_mat_eq(Mat4::perspective(45.0, 0.0, 0.1, 100.0), Mat4::identity());
        assert_mat_eq(Mat4::perspective(-45.0, 1.0, 0.1, 100.0), Mat4::identity());
    }

    // ── translation ───────────────────────────────────────────────────────

    #[test]
    fn translation_column() {
        let t = Mat4::translation(0.0, 0.0, -6.0);
        assert_eq!(&t.m[12..16], &[0.0, 0.0, -6.0, 1.0]);
    }

    #[test]
    fn translation_survives_identity_compose() {
        let t = Mat4::translation(0.0, 0.0, -6.0);
        let composed = t * Mat4::identity();
        assert_eq!(&composed.m[12..16], &[0.0, 0.0, -6.0, 1.0]);
    }

    // ── multiply order ────────────────────────────────────────────────────

    #[test]
    fn multiply_is_not_commutative() {
        let r = Mat4::rotation(1.0, 0.0, 0.0, 1.0);
        let t = Mat4::translation(3.0, 0.0, 0.0);
        let rt = r * t;
        let tr = t * r;
        assert!(
            rt.m.iter().zip(tr.m.iter()).any(|(a, b)| (a - b).abs() > TOL),
            "expected r*t != t*r",
        );
    }

    #[test]
    fn rotate_then_translate_keeps_translation_column() {
        // Translation applied after the rotation leaves the translation
        // column untouched; the reverse order rotates it.
        let r = Mat4::rotation(core::f32::consts::FRAC_PI_2, 0.0, 0.0, 1.0);
        let t = Mat4::translation(0.0, 0.0, -6.0);
        let rt = r.multiply(t);
        assert!((rt.m[12] - 0.0).abs() < TOL);
        assert!((rt.m[13] - 0.0).abs() < TOL);
        assert!((rt.m[14] + 6.0).abs() < TOL);
    }
}
