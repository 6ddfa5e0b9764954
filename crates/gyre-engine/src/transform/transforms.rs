use crate::math::Mat4;

/// Fixed camera/projection parameters composed into a per-frame MVP.
///
/// The rotation angle is driven directly by elapsed seconds (one radian per
/// second). Nothing here is retained between frames; callers own the value
/// and may update `aspect` when the window is resized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    /// Rotation axis, normalized during composition.
    pub rotation_axis: [f32; 3],
    /// View translation along -Z.
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            rotation_axis: [1.0, 1.0, 0.5],
            camera_distance: 6.0,
            fov_degrees: 45.0,
            aspect: 800.0 / 600.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Transforms {
    /// Composes the upload-ready MVP matrix for `elapsed_seconds`.
    ///
    /// The order is a contract: rotation, then view, then projection, each
    /// right-multiplied. Reordering changes the visible rotation pivot.
    pub fn mvp(&self, elapsed_seconds: f32) -> Mat4 {
        let [ax, ay, az] = self.rotation_axis;
        let rotation = Mat4::rotation(elapsed_seconds, ax, ay, az);
        let view = Mat4::translation(0.0, 0.0, -self.camera_distance);
        let projection = Mat4::perspective(self.fov_degrees, self.aspect, self.z_near, self.z_far);

        rotation.multiply(view).multiply(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    const TOL: f32 = 1e-5;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for i in 0..16 {
            assert!((a.m[i] - b.m[i]).abs() < TOL, "element {i}: {} vs {}", a.m[i], b.m[i]);
        }
    }

    #[test]
    fn pure_function_of_inputs() {
        let t = Transforms::default();
        assert_mat_eq(t.mvp(1.25), t.mvp(1.25));
    }

    #[test]
    fn matches_explicit_composition() {
        let t = Transforms::default();
        let [ax, ay, az] = t.rotation_axis;
        let expected = Mat4::rotation(2.0, ax, ay, az)
            .multiply(Mat4::translation(0.0, 0.0, -t.camera_distance))
            .multiply(Mat4::perspective(t.fov_degrees, t.aspect, t.z_near, t.z_far));
        assert_mat_eq(t.mvp(2.0), expected);
    }

    #[test]
    fn half_turn_rotations_are_mutual_inverses() {
        // At unit rotation rate, elapsed 0 and π differ by a half turn,
        // which is its own inverse.
        let t = Transforms::default();
        let [ax, ay, az] = t.rotation_axis;
        let r0 = Mat4::rotation(0.0, ax, ay, az);
        let r_pi = Mat4::rotation(PI, ax, ay, az);
        assert_mat_eq(r0, Mat4::identity());
        assert_mat_eq(r_pi.multiply(r_pi), Mat4::identity());
    }

    #[test]
    fn zero_elapsed_leaves_view_translation() {
        // With no rotation the modelview is the bare camera translation.
        let mut t = Transforms::default();
        t.fov_degrees = 0.0; // degenerate projection → identity
        let m = t.mvp(0.0);
        assert!((m.m[14] + t.camera_distance).abs() < TOL);
    }
}
