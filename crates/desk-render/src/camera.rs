//! First-person camera and projection state.
//!
//! The camera accumulates mouse deltas into yaw/pitch and held keys into
//! position; the renderer reads it once per frame to build the view
//! matrix. There are no failure modes here, only clamped state.

use glam::{Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_FOV: f32 = 45.0;

const PITCH_LIMIT: f32 = 89.0;
const FOV_MIN: f32 = 1.0;
const FOV_MAX: f32 = 45.0;

const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 100.0;
const ORTHO_HALF_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

pub struct Camera {
    pub position: Vec3,
    /// Yaw and pitch in degrees; pitch is clamped to ±89°.
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    fov: f32,
    speed: f32,
    sensitivity: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            front: -Vec3::Z,
            right: Vec3::X,
            up: WORLD_UP,
            fov: DEFAULT_FOV,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_basis();
        camera
    }

    /// Accumulates a mouse delta into the look direction. Positive `dy`
    /// pitches up; the caller flips the raw screen delta.
    pub fn on_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Scroll zoom: narrows or widens the field of view within [1°, 45°].
    pub fn on_scroll(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(FOV_MIN, FOV_MAX);
    }

    /// Moves along the camera basis for one held key over `dt` seconds.
    pub fn on_key_held(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
            MoveDirection::Up => self.position += self.up * velocity,
            MoveDirection::Down => self.position -= self.up * velocity,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov
    }

    fn update_basis(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Projection matrix state; toggled between perspective and a fixed
/// orthographic box by a key-press edge.
pub struct Projection {
    mode: ProjectionMode,
    aspect: f32,
}

impl Projection {
    pub fn new(aspect: f32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            aspect,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self, fov_deg: f32) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(fov_deg.to_radians(), self.aspect.max(0.01), ZNEAR, ZFAR)
            }
            ProjectionMode::Orthographic => Mat4::orthographic_rh(
                -ORTHO_HALF_EXTENT,
                ORTHO_HALF_EXTENT,
                -ORTHO_HALF_EXTENT,
                ORTHO_HALF_EXTENT,
                ZNEAR,
                ZFAR,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_front_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 5.0, 8.0));
        assert!(camera.front().abs_diff_eq(-Vec3::Z, 1.0e-5));
    }

    #[test]
    fn forward_moves_along_front_by_speed() {
        let mut camera = Camera::new(Vec3::new(0.0, 5.0, 8.0));
        let front = camera.front();
        camera.on_key_held(MoveDirection::Forward, 1.0);
        let expected = Vec3::new(0.0, 5.0, 8.0) + front * DEFAULT_SPEED;
        assert!(camera.position.abs_diff_eq(expected, 1.0e-5));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.on_mouse_delta(0.0, 1.0e7);
        assert!(camera.pitch_deg() <= PITCH_LIMIT);
        camera.on_mouse_delta(0.0, -1.0e9);
        assert!(camera.pitch_deg() >= -PITCH_LIMIT);
        // Basis stays finite and normalized at the limits.
        assert!((camera.front().length() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn scroll_zoom_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.on_scroll(1000.0);
        assert_eq!(camera.fov_deg(), FOV_MIN);
        camera.on_scroll(-1000.0);
        assert_eq!(camera.fov_deg(), FOV_MAX);
    }

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 8.0));
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        // The world origin sits 8 units ahead of the camera.
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -8.0), 1.0e-5));
    }

    #[test]
    fn double_toggle_restores_projection() {
        let mut projection = Projection::new(800.0 / 600.0);
        let before = projection.matrix(DEFAULT_FOV);
        projection.toggle();
        assert_eq!(projection.mode(), ProjectionMode::Orthographic);
        assert_ne!(projection.matrix(DEFAULT_FOV), before);
        projection.toggle();
        assert_eq!(projection.mode(), ProjectionMode::Perspective);
        assert_eq!(projection.matrix(DEFAULT_FOV), before);
    }
}
