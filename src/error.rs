//! Error types for halfmesh.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh construction or topology queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face loop has fewer than three vertices.
    #[error("face {face} has degree {degree}, need at least 3")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// The number of vertices in the face loop.
        degree: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate polygon).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// Two faces traverse the same directed edge, so the mesh is either
    /// non-manifold or inconsistently wound.
    #[error("directed edge ({v0}, {v1}) appears in more than one face")]
    NonManifoldEdge {
        /// Origin vertex of the directed edge.
        v0: usize,
        /// Destination vertex of the directed edge.
        v1: usize,
    },

    /// More than one border half-edge originates at the same vertex, so the
    /// boundary pinches through it.
    #[error("vertex {vertex} is non-manifold (multiple boundary fans)")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// A vertex is not referenced by any face.
    #[error("vertex {vertex} is isolated (no incident face)")]
    IsolatedVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// The face-loop and twin tables disagree on the number of faces.
    #[error("face-loop table has {loops} rows but twin table has {twins}")]
    TableRowMismatch {
        /// Number of face-loop rows.
        loops: usize,
        /// Number of twin-table rows.
        twins: usize,
    },

    /// A face's loop and twin entries have different lengths.
    #[error("face {face} has {corners} corners but {twins} twin slots")]
    TableLengthMismatch {
        /// The face index.
        face: usize,
        /// Length of the face's vertex loop.
        corners: usize,
        /// Length of the face's twin row.
        twins: usize,
    },

    /// A twin entry does not point back at the slot that references it.
    #[error("twin of half-edge ({face}, {slot}) is not symmetric")]
    AsymmetricTwin {
        /// The face index.
        face: usize,
        /// The slot within the face.
        slot: usize,
    },

    /// A twin pair does not run over the same undirected edge in opposite
    /// directions.
    #[error("twin of half-edge ({face}, {slot}) traverses a different edge")]
    TwinEdgeMismatch {
        /// The face index.
        face: usize,
        /// The slot within the face.
        slot: usize,
    },

    /// A vertex anchor does not originate at its own vertex.
    #[error("anchor of vertex {vertex} does not originate there")]
    AnchorMismatch {
        /// The vertex index.
        vertex: usize,
    },

    /// A boundary vertex is anchored to an interior half-edge, which would
    /// truncate fan walks around it.
    #[error("boundary vertex {vertex} is anchored to an interior half-edge")]
    InteriorAnchorOnBoundary {
        /// The vertex index.
        vertex: usize,
    },

    /// A face id is outside this mesh's face domain.
    #[error("unknown face {face}")]
    UnknownFace {
        /// The face index.
        face: usize,
    },

    /// A vertex id is outside this mesh's vertex domain.
    #[error("unknown vertex {vertex}")]
    UnknownVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// A border id is outside this mesh's border domain.
    #[error("unknown border half-edge {border}")]
    UnknownBorder {
        /// The border index.
        border: usize,
    },

    /// A half-edge slot is outside its face's degree.
    #[error("slot {slot} out of range for face {face} of degree {degree}")]
    SlotOutOfRange {
        /// The face index.
        face: usize,
        /// The offending slot.
        slot: usize,
        /// The face's degree.
        degree: usize,
    },

    /// The operation requires an interior half-edge but was given a border
    /// half-edge.
    #[error("border half-edge {border} has no incident face")]
    BorderHalfEdge {
        /// The border index.
        border: usize,
    },

    /// A traversal failed to terminate within its iteration budget, so the
    /// adjacency tables are internally inconsistent.
    #[error("corrupt topology: {details}")]
    CorruptTopology {
        /// Description of the inconsistency.
        details: String,
    },

    /// The position table does not cover the topology's vertex domain.
    #[error("{positions} positions for {vertices} vertices")]
    PositionCountMismatch {
        /// Number of positions supplied.
        positions: usize,
        /// Number of vertices in the topology.
        vertices: usize,
    },
}
