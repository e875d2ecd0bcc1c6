//! Compact array-based half-edge mesh.
//!
//! This module provides the array-based half-edge representation described
//! by Alumbaugh & Jiao, "Compact array-based mesh data structures"
//! (Proc. 14th International Meshing Roundtable, 2005). Instead of storing
//! half-edges as linked objects, every half-edge is addressed by position:
//! interior half-edge `(f, i)` is the i-th edge of face `f`, and all
//! adjacency is answered from three parallel integer tables.
//!
//! # Structure
//!
//! - `face_loops` maps each face to its vertex loop in winding order; the
//!   half-edge at slot `i` originates at `face_loops[f][i]` and runs to the
//!   next loop entry
//! - `twins` maps each face-edge slot to the opposite half-edge in the
//!   adjacent face
//! - `vertex_anchors` maps each vertex to one canonical outgoing half-edge,
//!   the entry point for fan walks around the vertex
//!
//! # Boundary Handling
//!
//! Boundary edges have no adjacent face. Their unpaired sides are **border
//! half-edges**, numbered in their own [`BorderId`] domain and encoded in
//! [`HalfEdgeId`] with a reserved sentinel slot. `twins[f][i]` for a
//! boundary slot holds a border id, and `border_twins[b]` points back at
//! `(f, i)`, closing the pair without optionals in the traversal path.
//! Boundary vertices are anchored to their outgoing border half-edge so fan
//! walks cover the whole open fan.
//!
//! The structure is immutable after construction: [`from_tables`] validates
//! every invariant and either returns a fully consistent mesh or fails
//! without exposing a partial one.
//!
//! [`from_tables`]: CompactHalfEdgeMesh::from_tables

use super::index::{BorderId, FaceId, HalfEdgeId, MeshIndex, RawHalfEdge, VertexId};
use crate::error::{MeshError, Result};

/// A compact half-edge mesh for polygonal faces.
///
/// All topology lives in four integer tables; every adjacency query is O(1)
/// and per-element loops are O(degree). The mesh is read-only after
/// construction, so clones are independent and shared references need no
/// synchronization.
///
/// Ids are only meaningful for the mesh instance that produced them.
///
/// # Example
///
/// A single triangle with all three edges on the boundary:
///
/// ```
/// use halfmesh::prelude::*;
///
/// let f0 = FaceId::new(0);
/// let he = |slot| HalfEdgeId::interior(f0, slot);
/// let bd = |b| HalfEdgeId::border(BorderId::new(b));
///
/// let mesh: CompactHalfEdgeMesh = CompactHalfEdgeMesh::from_tables(
///     vec![vec![VertexId::new(0), VertexId::new(1), VertexId::new(2)]],
///     vec![bd(2), bd(0), bd(1)],
///     vec![vec![bd(0), bd(1), bd(2)]],
///     vec![he(0), he(1), he(2)],
/// )?;
///
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_borders(), 3);
/// assert_eq!(mesh.face_vertex(f0, 1)?, VertexId::new(1));
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CompactHalfEdgeMesh<I: MeshIndex = u32> {
    /// Vertex loop of each face, in winding order.
    face_loops: Vec<Vec<VertexId<I>>>,

    /// One canonical outgoing half-edge per vertex. For boundary vertices
    /// this is the outgoing border half-edge.
    vertex_anchors: Vec<HalfEdgeId<I>>,

    /// Opposite half-edge of every face-edge slot.
    twins: Vec<Vec<HalfEdgeId<I>>>,

    /// Interior half-edge opposite each border half-edge.
    border_twins: Vec<HalfEdgeId<I>>,

    /// Interior plus border half-edge count, fixed at construction.
    num_half_edges: usize,
}

impl<I: MeshIndex> CompactHalfEdgeMesh<I> {
    /// Build a mesh from the four adjacency tables.
    ///
    /// The tables are validated in full before the mesh becomes observable:
    /// face loops must have degree at least 3 with no repeated vertex, loop
    /// and twin rows must agree in length, all ids must be in range, twin
    /// links must be symmetric (interior pairs both ways, and border pairs
    /// through `border_twins`), interior twin pairs must traverse the same
    /// undirected edge in opposite directions, and every vertex anchor must
    /// originate at its own vertex — border-anchored if the vertex lies on
    /// the boundary. Any violation fails construction with the matching
    /// [`MeshError`] variant.
    pub fn from_tables(
        face_loops: Vec<Vec<VertexId<I>>>,
        vertex_anchors: Vec<HalfEdgeId<I>>,
        twins: Vec<Vec<HalfEdgeId<I>>>,
        border_twins: Vec<HalfEdgeId<I>>,
    ) -> Result<Self> {
        if face_loops.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        if face_loops.len() != twins.len() {
            return Err(MeshError::TableRowMismatch {
                loops: face_loops.len(),
                twins: twins.len(),
            });
        }

        let num_vertices = vertex_anchors.len();

        for (f, corners) in face_loops.iter().enumerate() {
            if corners.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: f,
                    degree: corners.len(),
                });
            }
            if twins[f].len() != corners.len() {
                return Err(MeshError::TableLengthMismatch {
                    face: f,
                    corners: corners.len(),
                    twins: twins[f].len(),
                });
            }
            for &v in corners {
                if !v.is_valid() || v.index() >= num_vertices {
                    return Err(MeshError::InvalidVertexIndex {
                        face: f,
                        vertex: v.index(),
                    });
                }
            }
            for i in 0..corners.len() {
                for j in (i + 1)..corners.len() {
                    if corners[i] == corners[j] {
                        return Err(MeshError::DegenerateFace { face: f });
                    }
                }
            }
        }

        // Twin symmetry, checked from the face side.
        for (f, row) in twins.iter().enumerate() {
            let degree = face_loops[f].len();
            for (i, &twin) in row.iter().enumerate() {
                match twin.classify() {
                    RawHalfEdge::Border { border } => {
                        if border >= border_twins.len() {
                            return Err(MeshError::UnknownBorder { border });
                        }
                        if border_twins[border] != HalfEdgeId::interior(FaceId::new(f), i) {
                            return Err(MeshError::AsymmetricTwin { face: f, slot: i });
                        }
                    }
                    RawHalfEdge::Interior {
                        face: tf,
                        slot: ts,
                    } => {
                        if tf >= face_loops.len() {
                            return Err(MeshError::UnknownFace { face: tf });
                        }
                        let tdeg = face_loops[tf].len();
                        if ts >= tdeg {
                            return Err(MeshError::SlotOutOfRange {
                                face: tf,
                                slot: ts,
                                degree: tdeg,
                            });
                        }
                        if twins[tf][ts] != HalfEdgeId::interior(FaceId::new(f), i) {
                            return Err(MeshError::AsymmetricTwin { face: f, slot: i });
                        }
                        // Opposite sides of one undirected edge.
                        let a0 = face_loops[f][i];
                        let a1 = face_loops[f][(i + 1) % degree];
                        let b0 = face_loops[tf][ts];
                        let b1 = face_loops[tf][(ts + 1) % tdeg];
                        if a0 != b1 || a1 != b0 {
                            return Err(MeshError::TwinEdgeMismatch { face: f, slot: i });
                        }
                    }
                }
            }
        }

        // Twin symmetry, checked from the border side, and border origins
        // (a border half-edge runs opposite its interior twin).
        let mut border_origins: Vec<VertexId<I>> = Vec::with_capacity(border_twins.len());
        for (b, &twin) in border_twins.iter().enumerate() {
            match twin.classify() {
                RawHalfEdge::Interior {
                    face: tf,
                    slot: ts,
                } => {
                    if tf >= face_loops.len() {
                        return Err(MeshError::UnknownFace { face: tf });
                    }
                    let tdeg = face_loops[tf].len();
                    if ts >= tdeg {
                        return Err(MeshError::SlotOutOfRange {
                            face: tf,
                            slot: ts,
                            degree: tdeg,
                        });
                    }
                    if twins[tf][ts] != HalfEdgeId::border(BorderId::new(b)) {
                        return Err(MeshError::AsymmetricTwin { face: tf, slot: ts });
                    }
                    border_origins.push(face_loops[tf][(ts + 1) % tdeg]);
                }
                RawHalfEdge::Border { border } => {
                    return Err(MeshError::BorderHalfEdge { border });
                }
            }
        }

        // Vertex anchors must originate at their own vertex, and a vertex
        // with an outgoing border half-edge must be anchored to it.
        let mut boundary_anchor: Vec<bool> = vec![false; num_vertices];
        for &origin in &border_origins {
            boundary_anchor[origin.index()] = true;
        }
        for (v, &anchor) in vertex_anchors.iter().enumerate() {
            let origin = match anchor.classify() {
                RawHalfEdge::Border { border } => {
                    if border >= border_twins.len() {
                        return Err(MeshError::UnknownBorder { border });
                    }
                    border_origins[border]
                }
                RawHalfEdge::Interior { face, slot } => {
                    if face >= face_loops.len() {
                        return Err(MeshError::UnknownFace { face });
                    }
                    let degree = face_loops[face].len();
                    if slot >= degree {
                        return Err(MeshError::SlotOutOfRange {
                            face,
                            slot,
                            degree,
                        });
                    }
                    face_loops[face][slot]
                }
            };
            if origin.index() != v {
                return Err(MeshError::AnchorMismatch { vertex: v });
            }
            if !anchor.is_border() && boundary_anchor[v] {
                return Err(MeshError::InteriorAnchorOnBoundary { vertex: v });
            }
        }

        let num_half_edges =
            face_loops.iter().map(Vec::len).sum::<usize>() + border_twins.len();

        Ok(Self {
            face_loops,
            vertex_anchors,
            twins,
            border_twins,
            num_half_edges,
        })
    }

    // ==================== Counts ====================

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_loops.len()
    }

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertex_anchors.len()
    }

    /// Get the number of border half-edges.
    #[inline]
    pub fn num_borders(&self) -> usize {
        self.border_twins.len()
    }

    /// Get the total number of half-edges, interior and border.
    #[inline]
    pub fn num_half_edges(&self) -> usize {
        self.num_half_edges
    }

    /// Get the degree (vertex count) of a face.
    pub fn face_degree(&self, face: FaceId<I>) -> Result<usize> {
        Ok(self.face_loops[self.check_face(face)?].len())
    }

    // ==================== Validation ====================

    fn check_face(&self, face: FaceId<I>) -> Result<usize> {
        let f = face.index();
        if face.is_valid() && f < self.face_loops.len() {
            Ok(f)
        } else {
            Err(MeshError::UnknownFace { face: f })
        }
    }

    fn check_vertex(&self, vertex: VertexId<I>) -> Result<usize> {
        let v = vertex.index();
        if vertex.is_valid() && v < self.vertex_anchors.len() {
            Ok(v)
        } else {
            Err(MeshError::UnknownVertex { vertex: v })
        }
    }

    fn check_half_edge(&self, half_edge: HalfEdgeId<I>) -> Result<RawHalfEdge> {
        let raw = half_edge.classify();
        match raw {
            RawHalfEdge::Border { border } => {
                if border >= self.border_twins.len() {
                    return Err(MeshError::UnknownBorder { border });
                }
            }
            RawHalfEdge::Interior { face, slot } => {
                if face >= self.face_loops.len() {
                    return Err(MeshError::UnknownFace { face });
                }
                let degree = self.face_loops[face].len();
                if slot >= degree {
                    return Err(MeshError::SlotOutOfRange { face, slot, degree });
                }
            }
        }
        Ok(raw)
    }

    // ==================== Downward incidence ====================

    /// Get the vertex at a slot of a face's loop.
    ///
    /// The slot is taken modulo the face's degree, so `face_vertex(f, degree)`
    /// wraps back to slot 0.
    pub fn face_vertex(&self, face: FaceId<I>, slot: usize) -> Result<VertexId<I>> {
        let f = self.check_face(face)?;
        let corners = &self.face_loops[f];
        Ok(corners[slot % corners.len()])
    }

    /// Get the half-edge at a slot of a face's loop.
    ///
    /// The slot is taken modulo the face's degree.
    pub fn half_edge(&self, face: FaceId<I>, slot: usize) -> Result<HalfEdgeId<I>> {
        let f = self.check_face(face)?;
        let degree = self.face_loops[f].len();
        Ok(HalfEdgeId::interior(FaceId::new(f), slot % degree))
    }

    // ==================== Upward incidence ====================

    /// Get the canonical outgoing half-edge of a vertex.
    ///
    /// For boundary vertices this is the outgoing border half-edge.
    pub fn vertex_half_edge(&self, vertex: VertexId<I>) -> Result<HalfEdgeId<I>> {
        Ok(self.vertex_anchors[self.check_vertex(vertex)?])
    }

    /// Get the face a half-edge belongs to.
    ///
    /// Border half-edges have no incident face and report
    /// [`MeshError::BorderHalfEdge`].
    pub fn face(&self, half_edge: HalfEdgeId<I>) -> Result<FaceId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, .. } => Ok(FaceId::new(face)),
            RawHalfEdge::Border { border } => Err(MeshError::BorderHalfEdge { border }),
        }
    }

    // ==================== Adjacency ====================

    /// Get the twin (opposite) half-edge.
    ///
    /// Defined for every half-edge: the twin of an interior half-edge on a
    /// boundary edge is the border half-edge, and vice versa.
    pub fn twin(&self, half_edge: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, slot } => Ok(self.twins[face][slot]),
            RawHalfEdge::Border { border } => Ok(self.border_twins[border]),
        }
    }

    /// Get the next half-edge around the owning face loop.
    ///
    /// The successor of the last slot wraps to slot 0. Border half-edges
    /// belong to no face loop and report [`MeshError::BorderHalfEdge`].
    pub fn next(&self, half_edge: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, slot } => {
                let degree = self.face_loops[face].len();
                Ok(HalfEdgeId::interior(FaceId::new(face), (slot + 1) % degree))
            }
            RawHalfEdge::Border { border } => Err(MeshError::BorderHalfEdge { border }),
        }
    }

    /// Get the previous half-edge around the owning face loop.
    ///
    /// Border half-edges report [`MeshError::BorderHalfEdge`].
    pub fn prev(&self, half_edge: HalfEdgeId<I>) -> Result<HalfEdgeId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, slot } => {
                let degree = self.face_loops[face].len();
                Ok(HalfEdgeId::interior(
                    FaceId::new(face),
                    (slot + degree - 1) % degree,
                ))
            }
            RawHalfEdge::Border { border } => Err(MeshError::BorderHalfEdge { border }),
        }
    }

    /// Get the origin vertex of a half-edge.
    ///
    /// Defined for every half-edge: a border half-edge originates where its
    /// interior twin ends.
    pub fn origin(&self, half_edge: HalfEdgeId<I>) -> Result<VertexId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, slot } => Ok(self.face_loops[face][slot]),
            RawHalfEdge::Border { border } => self.dest(self.border_twins[border]),
        }
    }

    /// Get the destination vertex of a half-edge.
    pub fn dest(&self, half_edge: HalfEdgeId<I>) -> Result<VertexId<I>> {
        match self.check_half_edge(half_edge)? {
            RawHalfEdge::Interior { face, slot } => {
                let degree = self.face_loops[face].len();
                Ok(self.face_loops[face][(slot + 1) % degree])
            }
            RawHalfEdge::Border { border } => self.origin(self.border_twins[border]),
        }
    }

    // ==================== Boundary classification ====================

    /// Check if an edge (given by either of its half-edges) lies on the
    /// mesh boundary.
    pub fn is_boundary_edge(&self, half_edge: HalfEdgeId<I>) -> Result<bool> {
        let twin = self.twin(half_edge)?;
        Ok(half_edge.is_border() || twin.is_border())
    }

    /// Check if a vertex lies on the mesh boundary.
    pub fn is_boundary_vertex(&self, vertex: VertexId<I>) -> Result<bool> {
        Ok(self.vertex_anchors[self.check_vertex(vertex)?].is_border())
    }

    // ==================== Iteration ====================

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.face_loops.len()).map(FaceId::new)
    }

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertex_anchors.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge ids, interior first, then borders.
    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        let interior = self.face_ids().flat_map(move |f| {
            let degree = self.face_loops[f.index()].len();
            (0..degree).map(move |slot| HalfEdgeId::interior(f, slot))
        });
        let borders =
            (0..self.border_twins.len()).map(|b| HalfEdgeId::border(BorderId::new(b)));
        interior.chain(borders)
    }

    /// Iterate over the half-edges of a face, in loop order.
    pub fn face_half_edges(&self, face: FaceId<I>) -> Result<FaceHalfEdgeIter<I>> {
        let f = self.check_face(face)?;
        Ok(FaceHalfEdgeIter {
            face: FaceId::new(f),
            degree: self.face_loops[f].len(),
            slot: 0,
        })
    }

    /// Iterate over the vertices of a face, in loop order.
    pub fn face_vertices(
        &self,
        face: FaceId<I>,
    ) -> Result<impl Iterator<Item = VertexId<I>> + '_> {
        let f = self.check_face(face)?;
        Ok(self.face_loops[f].iter().copied())
    }

    /// Iterate over the outgoing half-edges around a vertex.
    ///
    /// The fan starts at the vertex's anchor and rotates by stepping to the
    /// half-edge after the twin in the neighboring face. For boundary
    /// vertices the first item is the outgoing border half-edge and the fan
    /// is open: it ends when the rotation reaches the border on the other
    /// side. For interior vertices the fan is closed and ends when the
    /// anchor comes around again.
    ///
    /// Items are `Result`s: a mesh whose tables have been validated only
    /// ever yields `Ok`, and the error case reports [`MeshError::CorruptTopology`]
    /// if the walk fails to terminate within the total half-edge count.
    pub fn vertex_half_edges(&self, vertex: VertexId<I>) -> Result<VertexHalfEdgeIter<'_, I>> {
        let v = self.check_vertex(vertex)?;
        let start = self.vertex_anchors[v];
        Ok(VertexHalfEdgeIter {
            mesh: self,
            start,
            current: Some(start),
            budget: self.num_half_edges,
        })
    }

    /// Iterate over the faces around a vertex.
    ///
    /// This is the fan of [`vertex_half_edges`] restricted to incident
    /// faces; border half-edges contribute nothing. Each incident face
    /// appears exactly once, and the fan of a boundary vertex is finite and
    /// open.
    ///
    /// [`vertex_half_edges`]: CompactHalfEdgeMesh::vertex_half_edges
    pub fn vertex_faces(&self, vertex: VertexId<I>) -> Result<VertexFaceIter<'_, I>> {
        Ok(VertexFaceIter {
            inner: self.vertex_half_edges(vertex)?,
        })
    }

    /// Compute the valence (outgoing half-edge count) of a vertex.
    pub fn valence(&self, vertex: VertexId<I>) -> Result<usize> {
        let mut count = 0;
        for half_edge in self.vertex_half_edges(vertex)? {
            half_edge?;
            count += 1;
        }
        Ok(count)
    }
}

/// Iterator over the half-edges of a face, in loop order.
#[derive(Debug, Clone)]
pub struct FaceHalfEdgeIter<I: MeshIndex = u32> {
    face: FaceId<I>,
    degree: usize,
    slot: usize,
}

impl<I: MeshIndex> Iterator for FaceHalfEdgeIter<I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.slot >= self.degree {
            return None;
        }
        let result = HalfEdgeId::interior(self.face, self.slot);
        self.slot += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.degree - self.slot;
        (remaining, Some(remaining))
    }
}

impl<I: MeshIndex> ExactSizeIterator for FaceHalfEdgeIter<I> {}

/// Iterator over the outgoing half-edges around a vertex.
///
/// See [`CompactHalfEdgeMesh::vertex_half_edges`].
#[derive(Debug, Clone)]
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a CompactHalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: Option<HalfEdgeId<I>>,
    budget: usize,
}

impl<I: MeshIndex> Iterator for VertexHalfEdgeIter<'_, I> {
    type Item = Result<HalfEdgeId<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        if self.budget == 0 {
            return Some(Err(MeshError::CorruptTopology {
                details: format!(
                    "vertex fan starting at {:?} exceeded the half-edge count",
                    self.start
                ),
            }));
        }
        self.budget -= 1;

        // Rotate: the half-edge after our twin in the neighboring face
        // originates at the same vertex. A border twin ends an open fan.
        let step = self.mesh.twin(current).and_then(|twin| {
            if twin.is_border() {
                Ok(None)
            } else {
                self.mesh.next(twin).map(Some)
            }
        });
        match step {
            Ok(Some(next)) if next != self.start => self.current = Some(next),
            Ok(_) => {}
            Err(e) => return Some(Err(e)),
        }
        Some(Ok(current))
    }
}

/// Iterator over the faces around a vertex.
///
/// See [`CompactHalfEdgeMesh::vertex_faces`].
#[derive(Debug, Clone)]
pub struct VertexFaceIter<'a, I: MeshIndex = u32> {
    inner: VertexHalfEdgeIter<'a, I>,
}

impl<I: MeshIndex> Iterator for VertexFaceIter<'_, I> {
    type Item = Result<FaceId<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(half_edge) => {
                    if let Some(face) = half_edge.face() {
                        return Some(Ok(face));
                    }
                    // Border half-edges have no incident face.
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn he(f: usize, s: usize) -> HalfEdgeId<u32> {
        HalfEdgeId::interior(FaceId::new(f), s)
    }

    fn bd(b: usize) -> HalfEdgeId<u32> {
        HalfEdgeId::border(BorderId::new(b))
    }

    fn vid(v: usize) -> VertexId<u32> {
        VertexId::new(v)
    }

    fn loops(faces: &[&[usize]]) -> Vec<Vec<VertexId<u32>>> {
        faces
            .iter()
            .map(|f| f.iter().map(|&v| vid(v)).collect())
            .collect()
    }

    /// 3x3 vertex grid triangulated into eight faces around the center
    /// vertex 4; all perimeter edges are boundary.
    ///
    /// ```text
    /// 0───1───2
    /// │\ 1|2 /│
    /// │0\ | /3│
    /// 3───4───5
    /// │7/ | \4│
    /// │/ 6|5 \│
    /// 6───7───8
    /// ```
    fn grid_tables() -> (
        Vec<Vec<VertexId<u32>>>,
        Vec<HalfEdgeId<u32>>,
        Vec<Vec<HalfEdgeId<u32>>>,
        Vec<HalfEdgeId<u32>>,
    ) {
        let face_loops = loops(&[
            &[0, 3, 4],
            &[0, 4, 1],
            &[1, 4, 2],
            &[2, 4, 5],
            &[5, 4, 8],
            &[7, 8, 4],
            &[6, 7, 4],
            &[4, 3, 6],
        ]);
        let vertex_anchors = vec![
            bd(1),
            bd(2),
            bd(3),
            bd(0),
            he(0, 2),
            bd(4),
            bd(7),
            bd(6),
            bd(5),
        ];
        let twins = vec![
            vec![bd(0), he(7, 0), he(1, 0)],
            vec![he(0, 2), he(2, 0), bd(1)],
            vec![he(1, 1), he(3, 0), bd(2)],
            vec![he(2, 1), he(4, 0), bd(3)],
            vec![he(3, 1), he(5, 1), bd(4)],
            vec![bd(5), he(4, 1), he(6, 1)],
            vec![bd(6), he(5, 2), he(7, 2)],
            vec![he(0, 1), bd(7), he(6, 2)],
        ];
        let border_twins = vec![
            he(0, 0),
            he(1, 2),
            he(2, 2),
            he(3, 2),
            he(4, 2),
            he(5, 0),
            he(6, 0),
            he(7, 1),
        ];
        (face_loops, vertex_anchors, twins, border_twins)
    }

    fn grid_mesh() -> CompactHalfEdgeMesh<u32> {
        let (face_loops, vertex_anchors, twins, border_twins) = grid_tables();
        CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins)
            .unwrap()
    }

    #[test]
    fn test_grid_counts() {
        let mesh = grid_mesh();
        assert_eq!(mesh.num_faces(), 8);
        assert_eq!(mesh.num_vertices(), 9);
        assert_eq!(mesh.num_borders(), 8);
        assert_eq!(mesh.num_half_edges(), 32);
    }

    #[test]
    fn test_face_vertex_worked_example() {
        let mesh = grid_mesh();
        let f0 = FaceId::new(0);
        assert_eq!(mesh.face_vertex(f0, 0).unwrap(), vid(0));
        assert_eq!(mesh.face_vertex(f0, 1).unwrap(), vid(3));
        assert_eq!(mesh.face_vertex(f0, 2).unwrap(), vid(4));
        // Slots wrap modulo the degree.
        assert_eq!(mesh.face_vertex(f0, 3).unwrap(), vid(0));
    }

    #[test]
    fn test_anchor_round_trip() {
        let mesh = grid_mesh();
        for v in mesh.vertex_ids() {
            let anchor = mesh.vertex_half_edge(v).unwrap();
            assert_eq!(mesh.origin(anchor).unwrap(), v, "anchor of {:?}", v);
        }
    }

    #[test]
    fn test_twin_symmetry() {
        let mesh = grid_mesh();
        for h in mesh.half_edge_ids() {
            let twin = mesh.twin(h).unwrap();
            assert_eq!(mesh.twin(twin).unwrap(), h, "twin of twin of {:?}", h);
        }
    }

    #[test]
    fn test_twins_reverse_edges() {
        let mesh = grid_mesh();
        for h in mesh.half_edge_ids() {
            let twin = mesh.twin(h).unwrap();
            assert_eq!(mesh.origin(h).unwrap(), mesh.dest(twin).unwrap());
            assert_eq!(mesh.dest(h).unwrap(), mesh.origin(twin).unwrap());
        }
    }

    #[test]
    fn test_face_loop_closure() {
        let mesh = grid_mesh();
        for f in mesh.face_ids() {
            let degree = mesh.face_degree(f).unwrap();
            let start = mesh.half_edge(f, 0).unwrap();
            let mut h = start;
            for _ in 0..degree {
                h = mesh.next(h).unwrap();
            }
            assert_eq!(h, start);
        }
    }

    #[test]
    fn test_next_prev_inverse() {
        let mesh = grid_mesh();
        for f in mesh.face_ids() {
            for h in mesh.face_half_edges(f).unwrap() {
                assert_eq!(mesh.prev(mesh.next(h).unwrap()).unwrap(), h);
            }
        }
    }

    #[test]
    fn test_interior_fan_covers_all_faces() {
        let mesh = grid_mesh();
        let mut faces: Vec<usize> = mesh
            .vertex_faces(vid(4))
            .unwrap()
            .map(|f| f.unwrap().index())
            .collect();
        faces.sort_unstable();
        assert_eq!(faces, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(mesh.valence(vid(4)).unwrap(), 8);
    }

    #[test]
    fn test_boundary_fan_is_open() {
        let mesh = grid_mesh();

        // Corner vertex 0 touches faces 1 and 0, in rotation order.
        let faces: Vec<usize> = mesh
            .vertex_faces(vid(0))
            .unwrap()
            .map(|f| f.unwrap().index())
            .collect();
        assert_eq!(faces, vec![1, 0]);

        // The outgoing fan also includes the border half-edge.
        assert_eq!(mesh.valence(vid(0)).unwrap(), 3);

        // Edge midpoints have two incident faces each.
        for v in [1, 3, 5, 7] {
            let faces: Vec<usize> = mesh
                .vertex_faces(vid(v))
                .unwrap()
                .map(|f| f.unwrap().index())
                .collect();
            assert_eq!(faces.len(), 2, "vertex {}", v);
            let mut sorted = faces.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 2, "vertex {} fan repeats a face", v);
        }
    }

    #[test]
    fn test_boundary_classification() {
        let mesh = grid_mesh();
        for v in mesh.vertex_ids() {
            let expected = v != vid(4);
            assert_eq!(mesh.is_boundary_vertex(v).unwrap(), expected, "{:?}", v);
        }
        // (f0, 0) runs 0 -> 3 on the perimeter; (f0, 1) runs 3 -> 4 inside.
        assert!(mesh.is_boundary_edge(he(0, 0)).unwrap());
        assert!(!mesh.is_boundary_edge(he(0, 1)).unwrap());
        assert!(mesh.is_boundary_edge(bd(0)).unwrap());
    }

    #[test]
    fn test_face_vertices_iteration() {
        let mesh = grid_mesh();
        let corners: Vec<VertexId<u32>> =
            mesh.face_vertices(FaceId::new(7)).unwrap().collect();
        assert_eq!(corners, vec![vid(4), vid(3), vid(6)]);
    }

    #[test]
    fn test_border_half_edge_errors() {
        let mesh = grid_mesh();
        assert_eq!(
            mesh.face(bd(0)),
            Err(MeshError::BorderHalfEdge { border: 0 })
        );
        assert_eq!(
            mesh.next(bd(0)),
            Err(MeshError::BorderHalfEdge { border: 0 })
        );
        assert_eq!(
            mesh.prev(bd(0)),
            Err(MeshError::BorderHalfEdge { border: 0 })
        );
        // Origin and twin stay total on border half-edges.
        assert_eq!(mesh.origin(bd(0)).unwrap(), vid(3));
        assert_eq!(mesh.twin(bd(0)).unwrap(), he(0, 0));
    }

    #[test]
    fn test_unknown_ids() {
        let mesh = grid_mesh();
        assert_eq!(
            mesh.face_degree(FaceId::new(99)),
            Err(MeshError::UnknownFace { face: 99 })
        );
        assert_eq!(
            mesh.vertex_half_edge(vid(99)),
            Err(MeshError::UnknownVertex { vertex: 99 })
        );
        assert_eq!(
            mesh.twin(he(0, 7)),
            Err(MeshError::SlotOutOfRange {
                face: 0,
                slot: 7,
                degree: 3
            })
        );
        assert_eq!(
            mesh.twin(bd(99)),
            Err(MeshError::UnknownBorder { border: 99 })
        );
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let result = CompactHalfEdgeMesh::<u32>::from_tables(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(result.unwrap_err(), MeshError::EmptyMesh);
    }

    #[test]
    fn test_mismatched_row_lengths_rejected() {
        let (face_loops, vertex_anchors, mut twins, border_twins) = grid_tables();
        twins[0].pop();
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(
            result.unwrap_err(),
            MeshError::TableLengthMismatch {
                face: 0,
                corners: 3,
                twins: 2
            }
        );
    }

    #[test]
    fn test_asymmetric_twin_rejected() {
        let (face_loops, vertex_anchors, mut twins, border_twins) = grid_tables();
        // (0, 1) claims (7, 2) as its twin, but (7, 2) still points at (6, 2).
        twins[0][1] = he(7, 2);
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(
            result.unwrap_err(),
            MeshError::AsymmetricTwin { face: 0, slot: 1 }
        );
    }

    #[test]
    fn test_twin_edge_mismatch_rejected() {
        let (face_loops, vertex_anchors, mut twins, border_twins) = grid_tables();
        // Make (0, 1) and (1, 1) point at each other; they both claim edges
        // incident to vertex 4, but not the same undirected edge.
        twins[0][1] = he(1, 1);
        twins[1][1] = he(0, 1);
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(
            result.unwrap_err(),
            MeshError::TwinEdgeMismatch { face: 0, slot: 1 }
        );
    }

    #[test]
    fn test_bad_anchor_rejected() {
        let (face_loops, mut vertex_anchors, twins, border_twins) = grid_tables();
        // Vertex 4's anchor must originate at vertex 4; (0, 0) starts at 0.
        vertex_anchors[4] = he(0, 0);
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(result.unwrap_err(), MeshError::AnchorMismatch { vertex: 4 });
    }

    #[test]
    fn test_interior_anchor_on_boundary_rejected() {
        let (face_loops, mut vertex_anchors, twins, border_twins) = grid_tables();
        // (1, 0) originates at boundary vertex 0, but the anchor must be
        // the outgoing border half-edge for fan walks to cover the fan.
        vertex_anchors[0] = he(1, 0);
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(
            result.unwrap_err(),
            MeshError::InteriorAnchorOnBoundary { vertex: 0 }
        );
    }

    #[test]
    fn test_out_of_range_vertex_rejected() {
        let (mut face_loops, vertex_anchors, twins, border_twins) = grid_tables();
        face_loops[3][1] = vid(42);
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(
            result.unwrap_err(),
            MeshError::InvalidVertexIndex { face: 3, vertex: 42 }
        );
    }

    #[test]
    fn test_degenerate_loop_rejected() {
        let (mut face_loops, vertex_anchors, twins, border_twins) = grid_tables();
        face_loops[2][2] = face_loops[2][0];
        let result =
            CompactHalfEdgeMesh::from_tables(face_loops, vertex_anchors, twins, border_twins);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 2 });
    }
}
