use nalgebra::{Matrix4, Point3, Vector3};

/// Field-of-view limits for scroll zoom, in degrees.
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 89.0;

const DEFAULT_ZOOM: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Perspective camera with a locked orientation.
///
/// Yaw and pitch are fixed at construction (-90 deg / 0 deg, looking down
/// -Z with +Y up), which pins the view to the ground plane; only `position`
/// and `zoom` vary at runtime. Zoom is a field-of-view angle, so scrolling
/// narrows or widens the frustum rather than translating the camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
    pub world_up: Vector3<f32>,
    /// Fixed after construction.
    yaw: f32,
    /// Fixed after construction.
    pitch: f32,
    /// Field of view in degrees, clamped to [ZOOM_MIN, ZOOM_MAX].
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: Point3::origin(),
            front: -Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            world_up: Vector3::y(),
            yaw: -90.0,
            pitch: 0.0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Recompute the derived `front`/`right`/`up` vectors from yaw and pitch.
    ///
    /// Must be called after changing `position` before reading the view
    /// matrix. Orientation is constant here, so in practice callers invoke
    /// this once after placing the camera.
    pub fn update(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }

    /// Look-at matrix from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &(self.position + self.front), &self.up)
    }

    /// Perspective projection with `zoom` degrees of vertical field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, self.zoom.to_radians(), NEAR_PLANE, FAR_PLANE)
    }

    /// Scroll-to-zoom: positive offsets narrow the field of view.
    pub fn update_zoom(&mut self, yoffset: f32) {
        self.zoom = (self.zoom - yoffset).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}
