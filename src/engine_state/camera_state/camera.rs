//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and transformations
//! - Projection matrix handling
//! - Held movement keys
//!
//! ## Key Components
//! - `Camera`: The camera's position and orientation in 3D space
//! - `Projection`: Perspective projection settings
//! - `Controls`: Which movement keys are held down

use cgmath::*;
use std::f32::consts::{FRAC_PI_2, PI};
use web_time::Duration;

/// Radians of rotation per pixel of mouse movement.
pub const MOUSE_SENSITIVITY: f32 = 0.002;
/// Movement speed in blocks per second.
pub const MOVE_SPEED: f32 = 10.0;

/// Held movement keys.
///
/// Set by the input collaborator, read by [`Camera::advance`] every frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    /// Strafe towards −right
    pub left: bool,
    /// Strafe towards +right
    pub right: bool,
    /// Move along the horizontal forward vector
    pub forward: bool,
    /// Move against the horizontal forward vector
    pub backward: bool,
    /// Move up along world Y
    pub up: bool,
    /// Move down along world Y
    pub down: bool,
}

/// Represents a first-person camera in 3D space.
///
/// Orientation is kept as two angles; the direction vectors are derived from
/// them whenever they change.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation around Y, wrapped to [−π, π]
/// - `pitch`: Vertical rotation, clamped to [−π/2, π/2]
/// - `forward`: Horizontal unit vector the camera walks along
/// - `right`: Horizontal unit vector pointing to the camera's right
/// - `lookat`: Unit vector the camera looks along
/// - `up`: The camera's up vector
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
    forward: Vector3<f32>,
    right: Vector3<f32>,
    lookat: Vector3<f32>,
    up: Vector3<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw; zero looks along +Z
    /// * `pitch` - Initial pitch; negative looks down
    ///
    /// # Example
    /// ```
    /// use blockworld::engine_state::camera_state::camera::Camera;
    /// use cgmath::{Point3, Rad};
    ///
    /// let camera = Camera::new(Point3::new(0.0, 33.0, 0.0), Rad(0.0), Rad(-0.5));
    /// assert!(camera.lookat().y < 0.0);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Camera {
            position: position.into(),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
            forward: Vector3::unit_z(),
            right: -Vector3::unit_x(),
            lookat: Vector3::unit_z(),
            up: Vector3::unit_y(),
        };
        camera.set_angles(yaw, pitch);
        camera
    }

    /// Replaces the orientation, wrapping yaw and clamping pitch.
    pub fn set_angles<Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(&mut self, yaw: Y, pitch: P) {
        let mut yaw = yaw.into().0;
        if yaw < -PI {
            yaw += 2.0 * PI;
        }
        if yaw > PI {
            yaw -= 2.0 * PI;
        }
        self.yaw = Rad(yaw);
        self.pitch = Rad(pitch.into().0.clamp(-FRAC_PI_2, FRAC_PI_2));
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();

        self.forward = Vector3::new(yaw_sin, 0.0, yaw_cos);
        self.right = Vector3::new(-yaw_cos, 0.0, yaw_sin);
        self.lookat = Vector3::new(yaw_sin * pitch_cos, pitch_sin, yaw_cos * pitch_cos);
        self.up = self.right.cross(self.lookat);
    }

    /// Horizontal rotation.
    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    /// Vertical rotation.
    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    /// Horizontal walking direction.
    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    /// Horizontal strafing direction.
    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    /// Viewing direction.
    pub fn lookat(&self) -> Vector3<f32> {
        self.lookat
    }

    /// The camera's up vector.
    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// Calculates the view matrix for this camera.
    ///
    /// # Returns
    /// A right-handed look-at matrix from `position` along `lookat`.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.lookat, self.up)
    }

    /// Applies a mouse movement in pixels.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.set_angles(
            Rad(self.yaw.0 - delta_x * MOUSE_SENSITIVITY),
            Rad(self.pitch.0 - delta_y * MOUSE_SENSITIVITY),
        );
    }

    /// Moves the camera according to the held keys.
    ///
    /// # Arguments
    /// * `controls` - The held movement keys
    /// * `dt` - Time elapsed since the last update
    pub fn advance(&mut self, controls: &Controls, dt: Duration) {
        let step = MOVE_SPEED * dt.as_secs_f32();

        if controls.left {
            self.position -= self.right * step;
        }
        if controls.right {
            self.position += self.right * step;
        }
        if controls.forward {
            self.position += self.forward * step;
        }
        if controls.backward {
            self.position -= self.forward * step;
        }
        if controls.up {
            self.position.y += step;
        }
        if controls.down {
            self.position.y -= step;
        }
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// The default projection: 45° vertical field of view, near 0.01, far 1000.
    pub fn standard(width: u32, height: u32) -> Self {
        Self::new(width, height, Deg(45.0), 0.01, 1000.0)
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the projection matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn vectors_follow_angles() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        assert!(close(camera.forward(), Vector3::unit_z()));
        assert!(close(camera.right(), -Vector3::unit_x()));
        assert!(close(camera.lookat(), Vector3::unit_z()));
        assert!(close(camera.up(), Vector3::unit_y()));
    }

    #[test]
    fn yaw_wraps_and_pitch_clamps() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(3.0), Rad(0.0));
        camera.rotate(-1000.0, -10_000.0);
        assert!(camera.yaw().0 >= -PI && camera.yaw().0 <= PI);
        assert_eq!(camera.pitch().0, FRAC_PI_2);
    }

    #[test]
    fn advance_moves_at_fixed_speed() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let controls = Controls {
            forward: true,
            up: true,
            ..Default::default()
        };
        camera.advance(&controls, Duration::from_millis(500));
        assert!((camera.position - Point3::new(0.0, 5.0, 5.0)).magnitude() < 1e-5);
    }

    #[test]
    fn view_matrix_puts_lookat_ahead() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Rad(0.7), Rad(-0.3));
        let ahead = camera.position + camera.lookat() * 10.0;
        let in_view = camera.calc_matrix().transform_point(ahead);
        assert!(in_view.z < 0.0);
        assert!(in_view.x.abs() < 1e-4 && in_view.y.abs() < 1e-4);
    }
}
