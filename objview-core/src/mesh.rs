/// Flat, renderer-ready vertex streams
use nalgebra::{Point3, Vector2, Vector3};

/// De-indexed per-corner attribute streams for non-indexed draw
/// submission.
///
/// `positions` holds one entry per face corner (3 per triangle), in
/// face emission order with no sharing across corners. `uvs` and
/// `normals` are either empty (the source never referenced that
/// channel) or exactly as long as `positions`. An empty channel means
/// "attribute unavailable", not "attribute zero".
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub positions: Vec<Point3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    pub normals: Vec<Vector3<f32>>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(corners: usize) -> Self {
        Self {
            positions: Vec::with_capacity(corners),
            uvs: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of corner entries in the position stream.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Built-in demo mesh: an axis-aligned cube with per-face normals
    /// and no texture coordinates. Used when no file is supplied.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(36);

        // Each face as two triangles, counter-clockwise from outside.
        let faces: [([Point3<f32>; 4], Vector3<f32>); 6] = [
            // Front (+z)
            (
                [
                    Point3::new(-h, -h, h),
                    Point3::new(h, -h, h),
                    Point3::new(h, h, h),
                    Point3::new(-h, h, h),
                ],
                Vector3::new(0.0, 0.0, 1.0),
            ),
            // Back (-z)
            (
                [
                    Point3::new(h, -h, -h),
                    Point3::new(-h, -h, -h),
                    Point3::new(-h, h, -h),
                    Point3::new(h, h, -h),
                ],
                Vector3::new(0.0, 0.0, -1.0),
            ),
            // Top (+y)
            (
                [
                    Point3::new(-h, h, h),
                    Point3::new(h, h, h),
                    Point3::new(h, h, -h),
                    Point3::new(-h, h, -h),
                ],
                Vector3::new(0.0, 1.0, 0.0),
            ),
            // Bottom (-y)
            (
                [
                    Point3::new(-h, -h, -h),
                    Point3::new(h, -h, -h),
                    Point3::new(h, -h, h),
                    Point3::new(-h, -h, h),
                ],
                Vector3::new(0.0, -1.0, 0.0),
            ),
            // Right (+x)
            (
                [
                    Point3::new(h, -h, h),
                    Point3::new(h, -h, -h),
                    Point3::new(h, h, -h),
                    Point3::new(h, h, h),
                ],
                Vector3::new(1.0, 0.0, 0.0),
            ),
            // Left (-x)
            (
                [
                    Point3::new(-h, -h, -h),
                    Point3::new(-h, -h, h),
                    Point3::new(-h, h, h),
                    Point3::new(-h, h, -h),
                ],
                Vector3::new(-1.0, 0.0, 0.0),
            ),
        ];

        for (corners, normal) in faces {
            for idx in [0, 1, 2, 0, 2, 3] {
                mesh.positions.push(corners[idx]);
                mesh.normals.push(normal);
            }
        }

        mesh
    }
}
