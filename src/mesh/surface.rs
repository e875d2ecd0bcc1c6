//! Vertex positions layered over compact topology.
//!
//! The compact mesh is pure topology; consumers that also carry geometry
//! pair it with a position table through [`SurfaceMesh`]. The wrapper keeps
//! the two in sync (one position per vertex id) and answers the usual
//! geometric queries over faces, edges, and vertex stars.

use nalgebra::{Point3, Vector3};

use super::builder::build_from_polygons;
use super::compact::CompactHalfEdgeMesh;
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A polygonal surface: compact half-edge topology plus vertex positions.
///
/// # Example
///
/// ```
/// use halfmesh::prelude::*;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3]];
///
/// let surface: SurfaceMesh = SurfaceMesh::from_polygons(positions, &faces)?;
/// let area = surface.face_area(FaceId::new(0))?;
/// assert!((area - 1.0).abs() < 1e-10);
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SurfaceMesh<I: MeshIndex = u32> {
    topology: CompactHalfEdgeMesh<I>,
    positions: Vec<Point3<f64>>,
}

impl<I: MeshIndex> SurfaceMesh<I> {
    /// Build a surface from vertex positions and polygonal faces.
    ///
    /// The topology is constructed with
    /// [`build_from_polygons`](crate::mesh::build_from_polygons); the
    /// position count fixes the vertex id domain.
    pub fn from_polygons(
        positions: Vec<Point3<f64>>,
        faces: &[Vec<usize>],
    ) -> Result<Self> {
        let topology = build_from_polygons(positions.len(), faces)?;
        Ok(Self {
            topology,
            positions,
        })
    }

    /// Pair an existing topology with a position table.
    pub fn new(topology: CompactHalfEdgeMesh<I>, positions: Vec<Point3<f64>>) -> Result<Self> {
        if positions.len() != topology.num_vertices() {
            return Err(MeshError::PositionCountMismatch {
                positions: positions.len(),
                vertices: topology.num_vertices(),
            });
        }
        Ok(Self {
            topology,
            positions,
        })
    }

    /// Get the underlying topology.
    #[inline]
    pub fn topology(&self) -> &CompactHalfEdgeMesh<I> {
        &self.topology
    }

    /// Get all vertex positions, indexed by vertex id.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Get the position of a vertex.
    pub fn position(&self, vertex: VertexId<I>) -> Result<&Point3<f64>> {
        if vertex.is_valid() && vertex.index() < self.positions.len() {
            Ok(&self.positions[vertex.index()])
        } else {
            Err(MeshError::UnknownVertex {
                vertex: vertex.index(),
            })
        }
    }

    // ==================== Face geometry ====================

    /// Twice the vector area of a face, by fanning from its first corner.
    fn face_area_vector(&self, face: FaceId<I>) -> Result<Vector3<f64>> {
        let corners: Vec<VertexId<I>> = self.topology.face_vertices(face)?.collect();
        let p0 = self.positions[corners[0].index()];
        let mut sum = Vector3::zeros();
        for pair in corners[1..].windows(2) {
            let e1 = self.positions[pair[0].index()] - p0;
            let e2 = self.positions[pair[1].index()] - p0;
            sum += e1.cross(&e2);
        }
        Ok(sum)
    }

    /// Compute the unit normal of a face.
    pub fn face_normal(&self, face: FaceId<I>) -> Result<Vector3<f64>> {
        Ok(self.face_area_vector(face)?.normalize())
    }

    /// Compute the area of a face.
    pub fn face_area(&self, face: FaceId<I>) -> Result<f64> {
        Ok(0.5 * self.face_area_vector(face)?.norm())
    }

    /// Compute the centroid of a face.
    pub fn face_centroid(&self, face: FaceId<I>) -> Result<Point3<f64>> {
        let mut sum = Vector3::zeros();
        let mut count = 0;
        for v in self.topology.face_vertices(face)? {
            sum += self.positions[v.index()].coords;
            count += 1;
        }
        Ok(Point3::from(sum / count as f64))
    }

    // ==================== Edge geometry ====================

    /// Compute the edge vector (from origin to destination).
    pub fn edge_vector(&self, half_edge: HalfEdgeId<I>) -> Result<Vector3<f64>> {
        let p0 = self.positions[self.topology.origin(half_edge)?.index()];
        let p1 = self.positions[self.topology.dest(half_edge)?.index()];
        Ok(p1 - p0)
    }

    /// Compute the length of an edge.
    pub fn edge_length(&self, half_edge: HalfEdgeId<I>) -> Result<f64> {
        Ok(self.edge_vector(half_edge)?.norm())
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, half_edge: HalfEdgeId<I>) -> Result<Point3<f64>> {
        let p0 = self.positions[self.topology.origin(half_edge)?.index()];
        let p1 = self.positions[self.topology.dest(half_edge)?.index()];
        Ok(Point3::from((p0.coords + p1.coords) * 0.5))
    }

    // ==================== Vertex geometry ====================

    /// Compute the area-weighted normal at a vertex.
    ///
    /// Accumulates the area vectors of the faces around the vertex, walking
    /// the fan through the topology, then normalizes.
    pub fn vertex_normal(&self, vertex: VertexId<I>) -> Result<Vector3<f64>> {
        let mut normal = Vector3::zeros();
        for face in self.topology.vertex_faces(vertex)? {
            normal += self.face_area_vector(face?)?;
        }
        Ok(normal.normalize())
    }

    // ==================== Whole-mesh geometry ====================

    /// Compute the bounding box of the surface.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min = self.positions[0];
        let mut max = self.positions[0];

        for p in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    /// Compute the total surface area.
    pub fn surface_area(&self) -> Result<f64> {
        let mut total = 0.0;
        for f in self.topology.face_ids() {
            total += self.face_area(f)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> SurfaceMesh<u32> {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        SurfaceMesh::from_polygons(positions, &[vec![0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_quad_geometry() {
        let surface = unit_square();
        let f = FaceId::new(0);

        let area = surface.face_area(f).unwrap();
        assert!((area - 1.0).abs() < 1e-10);

        // CCW winding in the xy plane gives a +z normal.
        let normal = surface.face_normal(f).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-10);

        let centroid = surface.face_centroid(f).unwrap();
        assert!((centroid.x - 0.5).abs() < 1e-10);
        assert!((centroid.y - 0.5).abs() < 1e-10);
        assert!(centroid.z.abs() < 1e-10);
    }

    #[test]
    fn test_edge_geometry() {
        let surface = unit_square();
        let he = surface
            .topology()
            .half_edge(FaceId::new(0), 0)
            .unwrap();

        assert!((surface.edge_length(he).unwrap() - 1.0).abs() < 1e-10);

        let mid = surface.edge_midpoint(he).unwrap();
        assert!((mid.x - 0.5).abs() < 1e-10);
        assert!(mid.y.abs() < 1e-10);
    }

    #[test]
    fn test_vertex_normal_flat_fan() {
        // The eight-triangle grid fan is flat, so every vertex normal is +z.
        let positions = vec![
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let faces = vec![
            vec![0, 3, 4],
            vec![0, 4, 1],
            vec![1, 4, 2],
            vec![2, 4, 5],
            vec![5, 4, 8],
            vec![7, 8, 4],
            vec![6, 7, 4],
            vec![4, 3, 6],
        ];
        let surface: SurfaceMesh<u32> = SurfaceMesh::from_polygons(positions, &faces).unwrap();

        let normal = surface.vertex_normal(VertexId::new(4)).unwrap();
        assert!((normal.z.abs() - 1.0).abs() < 1e-10);

        assert!((surface.surface_area().unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounding_box() {
        let surface = unit_square();
        let (min, max) = surface.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_position_count_mismatch() {
        let topology = crate::mesh::build_from_polygons::<u32>(3, &[vec![0, 1, 2]]).unwrap();
        let result = SurfaceMesh::new(topology, vec![Point3::new(0.0, 0.0, 0.0)]);
        assert_eq!(
            result.unwrap_err(),
            MeshError::PositionCountMismatch {
                positions: 1,
                vertices: 3
            }
        );
    }
}
