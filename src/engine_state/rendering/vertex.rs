//! Vertex attribute element types for chunk meshes.
//!
//! Chunk meshes are stored as three parallel attribute streams (position, normal,
//! texture coordinate) whose elements are all packed signed byte triples. The
//! rendering collaborator can upload them unchanged with `bytemuck::cast_slice`.

/// A packed triple of signed bytes.
///
/// Used for every per-vertex attribute of a chunk mesh:
/// - position: chunk-local corner coordinates (0..=32 fits in an `i8`)
/// - normal: the unit face normal
/// - texture coordinate: `(u, v, layer)` with `u, v ∈ {0, 1}`
///
/// # Memory Layout
/// 3x i8 (3 bytes), no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ByteVec3 {
    /// First component
    pub x: i8,
    /// Second component
    pub y: i8,
    /// Third component
    pub z: i8,
}

impl ByteVec3 {
    /// Creates a new byte vector.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        ByteVec3 { x, y, z }
    }
}

impl From<[i8; 3]> for ByteVec3 {
    fn from(value: [i8; 3]) -> Self {
        ByteVec3::new(value[0], value[1], value[2])
    }
}

impl From<ByteVec3> for [i8; 3] {
    fn from(value: ByteVec3) -> Self {
        [value.x, value.y, value.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_without_padding() {
        assert_eq!(std::mem::size_of::<ByteVec3>(), 3);
        let data = [ByteVec3::new(1, -2, 3), ByteVec3::new(4, 5, -6)];
        let bytes: &[u8] = bytemuck::cast_slice(&data);
        assert_eq!(bytes, &[1, 254, 3, 4, 5, 250]);
    }

    #[test]
    fn converts_from_and_to_arrays() {
        let packed = ByteVec3::from([7, -8, 9]);
        assert_eq!(packed, ByteVec3::new(7, -8, 9));
        let unpacked: [i8; 3] = packed.into();
        assert_eq!(unpacked, [7, -8, 9]);
    }
}
