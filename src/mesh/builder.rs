//! Mesh construction utilities.
//!
//! This module builds the four adjacency tables of a
//! [`CompactHalfEdgeMesh`] from flat face-vertex lists, the form polygon
//! data usually arrives in from file loaders and procedural generators.
//! Twins are found by matching each directed face-edge against its reverse
//! in another face; directed edges with no reverse lie on the mesh boundary
//! and receive border half-edges.

use std::collections::HashMap;

use super::compact::CompactHalfEdgeMesh;
use super::index::{BorderId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a compact half-edge mesh from polygonal face-vertex lists.
///
/// # Arguments
/// * `vertex_count` - Size of the vertex id domain; faces index into it
/// * `faces` - One vertex-index loop per face, in consistent winding order
///
/// # Returns
/// A validated mesh, or an error if the input is empty, references an
/// out-of-range vertex, contains a degenerate or too-small face, repeats a
/// directed edge (non-manifold or inconsistently wound), pinches the
/// boundary through a vertex, or leaves a vertex unused.
///
/// # Example
/// ```
/// use halfmesh::prelude::*;
///
/// // Two triangles sharing the edge (1, 2).
/// let faces = vec![vec![0, 1, 2], vec![2, 1, 3]];
/// let mesh: CompactHalfEdgeMesh = build_from_polygons(4, &faces)?;
///
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_borders(), 4);
/// # Ok::<(), MeshError>(())
/// ```
pub fn build_from_polygons<I: MeshIndex>(
    vertex_count: usize,
    faces: &[Vec<usize>],
) -> Result<CompactHalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate the face lists before any table is built.
    for (fi, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::FaceTooSmall {
                face: fi,
                degree: face.len(),
            });
        }
        for &vi in face {
            if vi >= vertex_count {
                return Err(MeshError::InvalidVertexIndex {
                    face: fi,
                    vertex: vi,
                });
            }
        }
        for i in 0..face.len() {
            for j in (i + 1)..face.len() {
                if face[i] == face[j] {
                    return Err(MeshError::DegenerateFace { face: fi });
                }
            }
        }
    }

    // Map from directed edge (v0, v1) to its half-edge. A directed edge
    // seen twice means two faces traverse it the same way.
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::new();
    for (fi, face) in faces.iter().enumerate() {
        let degree = face.len();
        for i in 0..degree {
            let v0 = face[i];
            let v1 = face[(i + 1) % degree];
            let half_edge = HalfEdgeId::interior(FaceId::new(fi), i);
            if edge_map.insert((v0, v1), half_edge).is_some() {
                return Err(MeshError::NonManifoldEdge { v0, v1 });
            }
        }
    }

    // Pair twins through the reverse directed edge; unmatched edges are
    // boundary and get border half-edges, numbered in discovery order.
    let mut twins: Vec<Vec<HalfEdgeId<I>>> = Vec::with_capacity(faces.len());
    let mut border_twins: Vec<HalfEdgeId<I>> = Vec::new();
    let mut border_origins: Vec<usize> = Vec::new();
    for (fi, face) in faces.iter().enumerate() {
        let degree = face.len();
        let mut row = Vec::with_capacity(degree);
        for i in 0..degree {
            let v0 = face[i];
            let v1 = face[(i + 1) % degree];
            if let Some(&twin) = edge_map.get(&(v1, v0)) {
                row.push(twin);
            } else {
                // The border half-edge runs v1 -> v0, opposite (fi, i).
                let border = BorderId::new(border_twins.len());
                border_twins.push(HalfEdgeId::interior(FaceId::new(fi), i));
                border_origins.push(v1);
                row.push(HalfEdgeId::border(border));
            }
        }
        twins.push(row);
    }

    // Anchor each vertex to an outgoing half-edge: any interior one to
    // start with, overridden by the outgoing border half-edge so fan walks
    // at the boundary cover the whole open fan.
    let mut anchors: Vec<Option<HalfEdgeId<I>>> = vec![None; vertex_count];
    for (fi, face) in faces.iter().enumerate() {
        for (i, &v) in face.iter().enumerate() {
            if anchors[v].is_none() {
                anchors[v] = Some(HalfEdgeId::interior(FaceId::new(fi), i));
            }
        }
    }
    let mut has_border_anchor = vec![false; vertex_count];
    for (b, &v) in border_origins.iter().enumerate() {
        if has_border_anchor[v] {
            return Err(MeshError::NonManifoldVertex { vertex: v });
        }
        has_border_anchor[v] = true;
        anchors[v] = Some(HalfEdgeId::border(BorderId::new(b)));
    }

    let mut vertex_anchors = Vec::with_capacity(vertex_count);
    for (v, anchor) in anchors.into_iter().enumerate() {
        match anchor {
            Some(a) => vertex_anchors.push(a),
            None => return Err(MeshError::IsolatedVertex { vertex: v }),
        }
    }

    let face_loops: Vec<Vec<VertexId<I>>> = faces
        .iter()
        .map(|face| face.iter().map(|&v| VertexId::new(v)).collect())
        .collect();

    CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins)
}

/// Build a compact half-edge mesh from triangle faces.
///
/// Convenience wrapper over [`build_from_polygons`] for the common
/// all-triangle case.
pub fn build_from_triangles<I: MeshIndex>(
    vertex_count: usize,
    faces: &[[usize; 3]],
) -> Result<CompactHalfEdgeMesh<I>> {
    let polygons: Vec<Vec<usize>> = faces.iter().map(|f| f.to_vec()).collect();
    build_from_polygons(vertex_count, &polygons)
}

/// Convert a mesh back to flat face-vertex lists.
pub fn to_face_loops<I: MeshIndex>(mesh: &CompactHalfEdgeMesh<I>) -> Result<Vec<Vec<usize>>> {
    let mut faces = Vec::with_capacity(mesh.num_faces());
    for f in mesh.face_ids() {
        faces.push(mesh.face_vertices(f)?.map(|v| v.index()).collect());
    }
    Ok(faces)
}
