//! Core mesh data structures.
//!
//! This module provides the compact array-based half-edge representation
//! and related types for representing and querying polygonal mesh topology.
//!
//! # Overview
//!
//! The primary type is [`CompactHalfEdgeMesh`], which stores all topology
//! in four integer tables and answers adjacency queries in O(1) without
//! any object graph. Half-edges are addressed by position — "the i-th edge
//! of face f" — rather than stored as records.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//! - [`BorderId`] - Identifies a border (boundary) half-edge
//! - [`HalfEdgeId`] - The composite `(face, slot)` half-edge address
//!
//! These indices are generic over the underlying integer type
//! ([`MeshIndex`] trait), allowing you to choose `u16`, `u32`, or `u64`
//! based on mesh size.
//!
//! # Construction
//!
//! Meshes are typically constructed from face-vertex lists:
//!
//! ```
//! use halfmesh::mesh::{build_from_polygons, CompactHalfEdgeMesh};
//!
//! let faces = vec![vec![0, 1, 2], vec![2, 1, 3]];
//! let mesh: CompactHalfEdgeMesh = build_from_polygons(4, &faces).unwrap();
//! assert_eq!(mesh.num_faces(), 2);
//! ```
//!
//! Consumers that already hold the four adjacency tables (for example a
//! file importer with precomputed connectivity) can construct directly
//! through [`CompactHalfEdgeMesh::from_tables`], which validates them.

mod builder;
mod compact;
mod index;
mod surface;

pub use builder::{build_from_polygons, build_from_triangles, to_face_loops};
pub use compact::{
    CompactHalfEdgeMesh, FaceHalfEdgeIter, VertexFaceIter, VertexHalfEdgeIter,
};
pub use index::{BorderId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use surface::SurfaceMesh;
