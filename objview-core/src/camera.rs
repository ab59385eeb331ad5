/// Orbit camera model and projection mode state
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Orthographic => Self::Perspective,
            Self::Perspective => Self::Orthographic,
        }
    }
}

/// Pitch is kept inside this range to avoid gimbal flip at the poles.
pub const PITCH_LIMIT_DEG: f32 = 89.0;

/// Lower bound on the orbit radius; the eye can never reach the target.
pub const MIN_DISTANCE: f32 = 0.1;

/// Orbiting camera: eye position derived from yaw/pitch angles and a
/// distance around a movable target point.
///
/// The eye position is never stored. Every query recomputes
/// `target + distance * direction(yaw, pitch)`, so the state can never
/// go stale between mutations.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Point3<f32>,
    up: Vector3<f32>,
    yaw_deg: f32,
    pitch_deg: f32,
    distance: f32,
    mode: ProjectionMode,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            distance: 5.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// World-space eye point, recomputed from the orbit parameters.
    pub fn position(&self) -> Point3<f32> {
        debug_assert!(self.distance > 0.0, "orbit distance must stay positive");
        debug_assert!(
            self.pitch_deg.abs() <= PITCH_LIMIT_DEG,
            "pitch escaped its clamp range"
        );
        self.target + self.distance * self.direction()
    }

    /// Unit vector from target toward the eye.
    ///
    /// Yaw accumulates without bound, so it is reduced modulo 360 before
    /// the trig conversion to keep precision for large magnitudes.
    fn direction(&self) -> Vector3<f32> {
        let yaw = self.yaw_deg.rem_euclid(360.0).to_radians();
        let pitch = self.pitch_deg.to_radians();
        Vector3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Orbit around the target. Yaw wraps naturally (full 360° orbit);
    /// pitch is clamped so the camera never flips over the poles.
    pub fn rotate_orbit(&mut self, delta_yaw_deg: f32, delta_pitch_deg: f32) {
        self.yaw_deg += delta_yaw_deg;
        self.pitch_deg =
            (self.pitch_deg + delta_pitch_deg).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Translate the target within the camera's local right/up plane,
    /// so panning tracks the current view orientation.
    pub fn pan(&mut self, sensitivity: f32, delta_x: f32, delta_y: f32) {
        let forward = -self.direction();
        let right = forward.cross(&self.up).normalize();
        let local_up = right.cross(&forward);
        self.target += right * (sensitivity * delta_x) + local_up * (sensitivity * delta_y);
    }

    /// Move the eye along the view axis. Positive scroll moves closer;
    /// the distance is clamped so the eye can never cross the target.
    pub fn zoom(&mut self, sensitivity: f32, scroll_delta: f32) {
        self.distance = (self.distance - sensitivity * scroll_delta).max(MIN_DISTANCE);
    }

    /// Flip between orthographic and perspective, returning the new
    /// mode so the driver can rebuild its projection matrix.
    pub fn toggle_projection_mode(&mut self) -> ProjectionMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Right-handed look-at transform from the derived eye position
    /// toward the target. Pure function of current state; callers
    /// query once per frame.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position(), &self.target, &self.up)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_pitch_stays_clamped() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.rotate_orbit(13.0, 37.0);
            assert!(camera.pitch_deg() <= PITCH_LIMIT_DEG);
        }
        for _ in 0..100 {
            camera.rotate_orbit(-5.0, -400.0);
            assert!(camera.pitch_deg() >= -PITCH_LIMIT_DEG);
        }
    }

    #[test]
    fn test_zoom_never_crosses_target() {
        let mut camera = OrbitCamera::new();
        camera.zoom(0.05, 1e9);
        assert!(camera.distance() >= MIN_DISTANCE);
        assert!(camera.distance() > 0.0);

        camera.zoom(0.05, -100.0);
        assert!(camera.distance() > MIN_DISTANCE);
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin() {
        let mut camera = OrbitCamera::new();
        camera.rotate_orbit(123.0, -40.0);
        camera.pan(0.05, 3.0, -2.0);
        camera.zoom(0.05, -7.0);

        let view = camera.view_matrix();
        let eye_in_camera = view.transform_point(&camera.position());
        assert!(eye_in_camera.coords.norm() < EPS);

        // Target lies on the forward (-Z) axis at the orbit distance.
        let target_in_camera = view.transform_point(&camera.target());
        assert!(target_in_camera.x.abs() < EPS);
        assert!(target_in_camera.y.abs() < EPS);
        assert!((target_in_camera.z + camera.distance()).abs() < EPS);
    }

    #[test]
    fn test_view_matrix_defined_at_pitch_limit() {
        let mut camera = OrbitCamera::new();
        camera.rotate_orbit(0.0, 1000.0);
        assert_eq!(camera.pitch_deg(), PITCH_LIMIT_DEG);

        let view = camera.view_matrix();
        assert!(view.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_toggle_projection_round_trip() {
        let mut camera = OrbitCamera::new();
        let initial = camera.mode();
        let flipped = camera.toggle_projection_mode();
        assert_ne!(flipped, initial);
        assert_eq!(camera.toggle_projection_mode(), initial);
    }

    #[test]
    fn test_full_orbit_returns_to_start() {
        let mut camera = OrbitCamera::new();
        camera.rotate_orbit(30.0, 15.0);
        let before = camera.position();
        camera.rotate_orbit(360.0, 0.0);
        let after = camera.position();
        assert!((after - before).norm() < EPS);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut camera = OrbitCamera::new();
        camera.rotate_orbit(75.0, 30.0);
        let view_dir = (camera.target() - camera.position()).normalize();

        let before = camera.target();
        camera.pan(0.05, 4.0, -1.0);
        let shift = camera.target() - before;

        assert!(shift.norm() > 0.0);
        assert!(shift.dot(&view_dir).abs() < EPS);
        // Eye follows the target: the orbit pose is unchanged.
        let eye_shift = camera.position() - (before + camera.distance() * -view_dir);
        assert!((eye_shift - shift).norm() < EPS);
    }

    #[test]
    fn test_large_yaw_still_converts_correctly() {
        let mut a = OrbitCamera::new();
        let mut b = OrbitCamera::new();
        a.rotate_orbit(45.0, 10.0);
        b.rotate_orbit(45.0 + 360.0 * 10_000.0, 10.0);
        assert!((a.position() - b.position()).norm() < EPS);
    }
}
