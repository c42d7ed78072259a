//! Damped orbit camera.
//!
//! Input moves a pending delta; every frame [`Camera::update`] applies a
//! fraction of it, so the view keeps gliding briefly after the mouse stops.

use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Fraction of the pending motion applied per frame.
pub const DAMPING_FACTOR: f32 = 0.05;

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 60.0;
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    pending_yaw: f32,
    pending_pitch: f32,
    /// Multiplicative zoom still to apply (1.0 = none).
    pending_zoom: f32,
}

impl Camera {
    /// Camera at `position`, looking at the origin.
    pub fn looking_from(position: Vec3) -> Self {
        let distance = position.length().max(MIN_DISTANCE);
        Self {
            yaw: position.x.atan2(position.z),
            pitch: (position.y / distance).asin(),
            distance,
            target: Vec3::ZERO,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 1.0,
        }
    }

    /// Default view of the galaxy, from (3, 3, 3).
    pub fn new() -> Self {
        Self::looking_from(Vec3::new(3.0, 3.0, 3.0))
    }

    /// Queue an orbit by the given angles in radians.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.pending_yaw += d_yaw;
        self.pending_pitch += d_pitch;
    }

    /// Queue a zoom; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_zoom *= 0.95f32.powf(steps);
    }

    /// Apply the damped share of the pending motion. Call once per frame.
    pub fn update(&mut self) {
        let yaw_step = self.pending_yaw * DAMPING_FACTOR;
        let pitch_step = self.pending_pitch * DAMPING_FACTOR;
        self.yaw += yaw_step;
        self.pitch = (self.pitch + pitch_step).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.pending_yaw -= yaw_step;
        self.pending_pitch -= pitch_step;

        let zoom_step = self.pending_zoom.powf(DAMPING_FACTOR);
        self.distance = (self.distance * zoom_step).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.pending_zoom /= zoom_step;
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let camera = Camera::new();
        assert!((camera.position() - Vec3::splat(3.0)).length() < 1e-4);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = Camera::new();
        let start = camera.yaw;
        camera.rotate(1.0, 0.0);

        camera.update();
        let first = camera.yaw - start;
        assert!((first - DAMPING_FACTOR).abs() < 1e-6);

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.yaw - start - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new();
        camera.rotate(0.0, 100.0);
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.pitch <= PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_moves_closer() {
        let mut camera = Camera::new();
        let before = camera.distance;
        camera.zoom(3.0);
        for _ in 0..300 {
            camera.update();
        }
        let expected = before * 0.95f32.powf(3.0);
        assert!((camera.distance - expected).abs() < 1e-2);
    }
}
