//! Chunk visibility against the camera.
//!
//! The test projects a chunk's centre point into clip space rather than testing
//! its bounding box against frustum planes. The off-screen margin is widened by
//! the chunk height over the clip `w`, which keeps chunks whose centre is just
//! outside the screen but whose blocks are not.

use cgmath::{InnerSpace, Matrix4, Vector4};

use crate::engine_state::voxels::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// Where a chunk lies relative to the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChunkVisibility {
    /// Behind the camera by more than half a chunk height.
    BehindCamera,
    /// In front of the camera but outside the widened screen rectangle.
    OffScreen,
    /// Potentially on screen.
    Visible {
        /// Length of the clip-space centre vector, before perspective division.
        distance: f32,
    },
}

impl ChunkVisibility {
    /// Returns `true` for [`ChunkVisibility::Visible`].
    pub fn is_visible(&self) -> bool {
        matches!(self, ChunkVisibility::Visible { .. })
    }
}

/// The combined view-projection transform of one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewFrustum {
    view_projection: Matrix4<f32>,
}

impl ViewFrustum {
    /// Builds the frustum from a view matrix and a projection matrix.
    pub fn new(view: &Matrix4<f32>, projection: &Matrix4<f32>) -> Self {
        ViewFrustum {
            view_projection: *projection * *view,
        }
    }

    /// The combined `projection × view` matrix.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.view_projection
    }

    /// Classifies the chunk placed by `model`.
    ///
    /// # Arguments
    /// * `model` - The chunk's world transform (translation by chunk coordinate × extents)
    pub fn classify(&self, model: &Matrix4<f32>) -> ChunkVisibility {
        let centre = Vector4::new(
            CHUNK_WIDTH as f32 / 2.0,
            CHUNK_HEIGHT as f32 / 2.0,
            CHUNK_DEPTH as f32 / 2.0,
            1.0,
        );
        let mut clip = self.view_projection * *model * centre;
        let distance = clip.magnitude();

        clip.x /= clip.w;
        clip.y /= clip.w;

        if clip.z < -(CHUNK_HEIGHT as f32) / 2.0 {
            return ChunkVisibility::BehindCamera;
        }

        let margin = 1.0 + (CHUNK_HEIGHT as f32 * 2.0 / clip.w).abs();
        if clip.x.abs() > margin || clip.y.abs() > margin || !distance.is_finite() {
            return ChunkVisibility::OffScreen;
        }

        ChunkVisibility::Visible { distance }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{perspective, Deg, Point3, Vector3};

    use super::*;

    fn looking_down_negative_z() -> ViewFrustum {
        let view = Matrix4::look_at_rh(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vector3::unit_y(),
        );
        ViewFrustum::new(&view, &perspective(Deg(45.0), 1.0, 0.01, 1000.0))
    }

    fn chunk_at(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(x, y, z))
    }

    #[test]
    fn ahead_is_visible_and_nearer_is_closer() {
        let frustum = looking_down_negative_z();
        let near = frustum.classify(&chunk_at(-8.0, -16.0, -40.0));
        let far = frustum.classify(&chunk_at(-8.0, -16.0, -200.0));
        match (near, far) {
            (ChunkVisibility::Visible { distance: a }, ChunkVisibility::Visible { distance: b }) => {
                assert!(a < b)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn far_behind_is_culled() {
        let frustum = looking_down_negative_z();
        assert_eq!(
            frustum.classify(&chunk_at(-8.0, -16.0, 100.0)),
            ChunkVisibility::BehindCamera
        );
    }

    #[test]
    fn far_to_the_side_is_off_screen() {
        let frustum = looking_down_negative_z();
        assert_eq!(
            frustum.classify(&chunk_at(600.0, -16.0, -100.0)),
            ChunkVisibility::OffScreen
        );
    }
}
