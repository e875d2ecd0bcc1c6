//! # Halfmesh
//!
//! A compact array-based half-edge mesh for polygonal surface topology.
//!
//! Halfmesh stores mesh connectivity in a handful of integer tables, after
//! the array-based half-edge design of Alumbaugh & Jiao (2005). Half-edges
//! are addressed by position — "the i-th edge of face f" — so there is no
//! object graph to chase: every adjacency query is an array lookup, and
//! boundary edges are first-class border half-edges rather than nulls.
//!
//! ## Features
//!
//! - **Compact storage**: topology as integer tables, no per-half-edge
//!   records or back-references
//! - **O(1) adjacency**: twin, next, origin, and face lookups are direct
//!   indexing; face and vertex fans are O(degree)
//! - **Explicit boundaries**: border half-edges with their own id domain;
//!   open vertex fans terminate cleanly
//! - **Flexible indexing**: 16-bit, 32-bit, or 64-bit indices
//! - **Validated construction**: a mesh is either fully consistent or is
//!   never handed out
//!
//! ## Quick Start
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! // A tetrahedron: four triangles, no boundary.
//! let faces = vec![
//!     vec![0, 2, 1],
//!     vec![0, 1, 3],
//!     vec![1, 2, 3],
//!     vec![2, 0, 3],
//! ];
//! let mesh: CompactHalfEdgeMesh = build_from_polygons(4, &faces)?;
//!
//! assert_eq!(mesh.num_faces(), 4);
//! assert_eq!(mesh.num_borders(), 0);
//!
//! // Walk the fan of faces around vertex 0.
//! for face in mesh.vertex_faces(VertexId::new(0))? {
//!     println!("incident face {:?}", face?);
//! }
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Mesh Traversal
//!
//! The half-edge tables support the usual traversal moves:
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! # let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
//! # let mesh: CompactHalfEdgeMesh = build_from_polygons(4, &faces)?;
//! let h = mesh.half_edge(FaceId::new(0), 0)?;
//!
//! // Around the face, and across to the neighbor.
//! let around = mesh.next(h)?;
//! let across = mesh.twin(h)?;
//! assert_eq!(mesh.twin(across)?, h);
//!
//! // Origin/destination vertices.
//! assert_eq!(mesh.origin(around)?, mesh.dest(h)?);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Geometry
//!
//! Topology is deliberately position-free. To carry geometry, pair the
//! tables with positions through [`SurfaceMesh`](mesh::SurfaceMesh):
//!
//! ```
//! use halfmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let surface: SurfaceMesh = SurfaceMesh::from_polygons(positions, &[vec![0, 1, 2]])?;
//! assert!((surface.face_area(FaceId::new(0))? - 0.5).abs() < 1e-10);
//! # Ok::<(), MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use halfmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, to_face_loops, BorderId,
        CompactHalfEdgeMesh, FaceId, HalfEdgeId, MeshIndex, SurfaceMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
