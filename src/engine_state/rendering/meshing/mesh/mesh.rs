//! Mesh data structures for chunk rendering.
//!
//! A chunk mesh is a flat triangle soup: every visible face contributes two
//! triangles (six vertices) with no index buffer, so the three attribute
//! streams always have the same length.

use super::face::Face;
use crate::engine_state::rendering::vertex::ByteVec3;

/// Number of vertices emitted per visible face.
pub const VERTICES_PER_FACE: usize = 6;

/// Triangle-soup geometry of one chunk.
///
/// The three streams are parallel: element `i` of each belongs to vertex `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mesh {
    vertices: Vec<ByteVec3>,
    normals: Vec<ByteVec3>,
    texcoords: Vec<ByteVec3>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `faces` faces.
    pub fn with_face_capacity(faces: usize) -> Self {
        let vertices = faces * VERTICES_PER_FACE;
        Mesh {
            vertices: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            texcoords: Vec::with_capacity(vertices),
        }
    }

    /// Appends the six vertices of a face.
    pub fn push_face(&mut self, face: &Face) {
        let normal = face.normal();
        for (position, texcoord) in face.vertices() {
            self.vertices.push(position);
            self.normals.push(normal);
            self.texcoords.push(texcoord);
        }
    }

    /// Number of vertices (the element count of the draw call).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` when the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of faces (quads).
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Chunk-local vertex positions.
    pub fn vertices(&self) -> &[ByteVec3] {
        &self.vertices
    }

    /// Per-vertex face normals.
    pub fn normals(&self) -> &[ByteVec3] {
        &self.normals
    }

    /// Per-vertex `(u, v, layer)` texture coordinates.
    pub fn texcoords(&self) -> &[ByteVec3] {
        &self.texcoords
    }

    /// Raw bytes of the position stream, ready for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the normal stream, ready for buffer upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the texture coordinate stream, ready for buffer upload.
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn push_face_keeps_streams_parallel() {
        let mut mesh = Mesh::with_face_capacity(2);
        assert!(mesh.is_empty());
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), BlockSide::LEFT, 1));
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), BlockSide::BACK, 1));
        assert_eq!(mesh.len(), 12);
        assert_eq!(mesh.normals().len(), 12);
        assert_eq!(mesh.texcoords().len(), 12);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_bytes().len(), 36);
        assert_eq!(mesh.normals()[0], ByteVec3::new(-1, 0, 0));
        assert_eq!(mesh.normals()[6], ByteVec3::new(0, 0, 1));
    }
}
