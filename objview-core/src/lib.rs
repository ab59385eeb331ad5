/// objview Core Library - Camera model and mesh ingestion
///
/// This library provides the stateless core of the viewer: the orbit
/// camera state machine and the OBJ-subset loader that de-indexes a
/// face-indexed mesh into flat, renderer-ready vertex streams. It owns
/// no rendering resources; drivers combine its view matrix with their
/// own projection matrix and upload its buffers.

pub mod camera;
pub mod error;
pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use camera::{OrbitCamera, ProjectionMode};
pub use error::MeshError;
pub use mesh::MeshBuffers;
