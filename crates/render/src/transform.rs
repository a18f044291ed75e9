use nalgebra::{Matrix4, Vector3};
use simcore::{Pose, VehicleExtents, HEADING_TO_CCW};

/// Model matrix placing the unit cube at the vehicle's pose and extents:
/// translate, then rotate about Z, then scale (applied right-to-left to
/// column vectors, so the cube is scaled in object space first).
///
/// The z slot of the translation is forced to 0: the pose's third component
/// is the heading and must never leak into a translation. The heading is
/// clockwise-positive while the rotation primitive is counter-clockwise,
/// hence the [`HEADING_TO_CCW`] factor. Width scales X and length scales Y;
/// swapping them rotates the rendered rectangle by a quarter turn.
pub fn model_matrix(pose: &Pose, extents: &VehicleExtents) -> Matrix4<f32> {
    let translate = Matrix4::new_translation(&Vector3::new(pose.x as f32, pose.y as f32, 0.0));
    let rotate = Matrix4::new_rotation(Vector3::z() * (HEADING_TO_CCW * pose.heading) as f32);
    let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
        extents.width as f32,
        extents.length as f32,
        extents.height as f32,
    ));
    translate * rotate * scale
}

/// Owns the most recently composed model matrix; rebuilt whenever the pose
/// or extents change and handed read-only to the renderer.
#[derive(Debug, Clone)]
pub struct TransformComposer {
    model: Matrix4<f32>,
}

impl TransformComposer {
    pub fn new(pose: &Pose, extents: &VehicleExtents) -> Self {
        TransformComposer {
            model: model_matrix(pose, extents),
        }
    }

    pub fn rebuild(&mut self, pose: &Pose, extents: &VehicleExtents) {
        self.model = model_matrix(pose, extents);
    }

    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_column_carries_position_not_heading() {
        let pose = Pose {
            x: 2.0,
            y: 3.0,
            heading: 1.25,
        };
        let m = model_matrix(&pose, &VehicleExtents::planar(1.0, 0.5));
        assert_relative_eq!(m[(0, 3)], 2.0, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 3)], 3.0, epsilon = 1e-6);
        // Heading must not leak into the z translation slot.
        assert_relative_eq!(m[(2, 3)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[(3, 3)], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_heading_reduces_to_translate_scale() {
        let pose = Pose {
            x: 2.0,
            y: 3.0,
            heading: 0.0,
        };
        let m = model_matrix(&pose, &VehicleExtents::planar(1.0, 0.5));
        // Width on X, length on Y, zero height on Z; no rotation component.
        assert_relative_eq!(m[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(m[(2, 2)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[(0, 1)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 0)], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clockwise_heading_rotates_object_x_toward_negative_y() {
        // A quarter-turn clockwise heading maps through the negated rotation:
        // the object-space +X axis lands on world -Y.
        let pose = Pose {
            x: 0.0,
            y: 0.0,
            heading: FRAC_PI_2,
        };
        let m = model_matrix(&pose, &VehicleExtents::planar(1.0, 1.0));
        assert_relative_eq!(m[(0, 0)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 0)], -1.0, epsilon = 1e-6);
        // ...and object-space +Y (the vehicle's nose) lands on world +X.
        assert_relative_eq!(m[(0, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 1)], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_composer_rebuild_tracks_pose() {
        let extents = VehicleExtents::planar(1.0, 0.5);
        let mut composer = TransformComposer::new(&Pose::origin(), &extents);
        assert_relative_eq!(composer.model()[(0, 3)], 0.0, epsilon = 1e-6);

        let moved = Pose {
            x: -1.5,
            y: 4.0,
            heading: 0.0,
        };
        composer.rebuild(&moved, &extents);
        assert_relative_eq!(composer.model()[(0, 3)], -1.5, epsilon = 1e-6);
        assert_relative_eq!(composer.model()[(1, 3)], 4.0, epsilon = 1e-6);
    }
}
