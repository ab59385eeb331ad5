/// Projection matrix construction, owned by the driver
///
/// The core camera only toggles between modes; the driver rebuilds the
/// matrix here on every resize and after every mode toggle, using the
/// current viewport aspect ratio.
use nalgebra::Matrix4;
use objview_core::ProjectionMode;

/// Vertical extent of the orthographic volume, in world units.
const ORTHO_HEIGHT: f32 = 10.0;
const ORTHO_NEAR: f32 = -10.0;
const ORTHO_FAR: f32 = 10.0;

/// Vertical field of view for the perspective mode, in radians.
const PERSP_FOVY: f32 = std::f32::consts::FRAC_PI_4;
const PERSP_NEAR: f32 = 0.5;
const PERSP_FAR: f32 = 20.0;

/// Build the projection matrix for the given mode and viewport aspect
/// ratio (width / height).
pub fn projection_matrix(mode: ProjectionMode, aspect: f32) -> Matrix4<f32> {
    match mode {
        ProjectionMode::Orthographic => {
            let height = ORTHO_HEIGHT;
            let width = height * aspect;
            Matrix4::new_orthographic(
                -width / 2.0,
                width / 2.0,
                -height / 2.0,
                height / 2.0,
                ORTHO_NEAR,
                ORTHO_FAR,
            )
        }
        ProjectionMode::Perspective => {
            Matrix4::new_perspective(aspect, PERSP_FOVY, PERSP_NEAR, PERSP_FAR)
        }
    }
}
