//! Index types for mesh elements.
//!
//! This module provides type-safe index wrappers for vertices, faces, and
//! border half-edges, plus the composite [`HalfEdgeId`] used to address
//! half-edges by position. The indices are generic over the underlying
//! integer type to support meshes of different sizes (u16 for small meshes,
//! u32 for typical meshes, u64 for massive meshes).
//!
//! Indices are only meaningful relative to the mesh instance that produced
//! them; ids from different meshes must never be mixed.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for types that can be used as mesh indices.
///
/// This trait is implemented for `u16`, `u32`, and `u64`, allowing users to
/// choose the appropriate index size for their mesh.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum valid index value.
    const MAX: Self;

    /// A sentinel value representing an invalid/null index.
    const INVALID: Self;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics if the value is too large for this index type.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl MeshIndex for u16 {
    const MAX: Self = u16::MAX - 1;
    const INVALID: Self = u16::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v <= Self::MAX as usize, "index {} too large for u16", v);
        v as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u32 {
    const MAX: Self = u32::MAX - 1;
    const INVALID: Self = u32::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        debug_assert!(v <= Self::MAX as usize, "index {} too large for u32", v);
        v as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl MeshIndex for u64 {
    const MAX: Self = u64::MAX - 1;
    const INVALID: Self = u64::MAX;

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as u64
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

/// A type-safe index of one border (boundary) half-edge.
///
/// Border half-edges are the unpaired sides of boundary edges. They have no
/// incident face and are numbered in their own domain, separate from faces.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct BorderId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(FaceId, "F");
impl_index_type!(BorderId, "B");

/// A half-edge id, addressed by position rather than by a serial number.
///
/// An interior half-edge is "the `slot`-th edge of face `face`": it
/// originates at the `slot`-th vertex of the face's loop and runs to the
/// next one. Half-edges are therefore never stored as objects; the id is
/// the pair of indices itself.
///
/// Border half-edges (the unpaired sides of boundary edges) reuse the same
/// representation with the slot set to the reserved sentinel and the face
/// field holding a [`BorderId`]. This keeps the twin tables free of
/// optionals: every twin lookup yields another `HalfEdgeId`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HalfEdgeId<I: MeshIndex = u32> {
    face: I,
    slot: I,
}

impl<I: MeshIndex> HalfEdgeId<I> {
    /// Create the id of the `slot`-th half-edge of `face`.
    #[inline]
    pub fn interior(face: FaceId<I>, slot: usize) -> Self {
        Self {
            face: face.raw(),
            slot: I::from_usize(slot),
        }
    }

    /// Create the id of a border half-edge.
    #[inline]
    pub fn border(border: BorderId<I>) -> Self {
        Self {
            face: border.raw(),
            slot: I::INVALID,
        }
    }

    /// Check whether this id names a border half-edge.
    #[inline]
    pub fn is_border(self) -> bool {
        !self.slot.is_valid()
    }

    /// The owning face, if this is an interior half-edge.
    #[inline]
    pub fn face(self) -> Option<FaceId<I>> {
        if self.is_border() {
            None
        } else {
            Some(FaceId(self.face))
        }
    }

    /// The edge slot within the owning face, if this is an interior
    /// half-edge.
    #[inline]
    pub fn slot(self) -> Option<usize> {
        if self.is_border() {
            None
        } else {
            Some(self.slot.to_usize())
        }
    }

    /// The border index, if this is a border half-edge.
    #[inline]
    pub fn border_index(self) -> Option<BorderId<I>> {
        if self.is_border() {
            Some(BorderId(self.face))
        } else {
            None
        }
    }
}

/// Internal classification of a half-edge id with raw indices extracted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum RawHalfEdge {
    /// The `slot`-th half-edge of face `face`.
    Interior {
        /// Raw face index.
        face: usize,
        /// Raw slot index.
        slot: usize,
    },
    /// A border half-edge.
    Border {
        /// Raw border index.
        border: usize,
    },
}

impl<I: MeshIndex> HalfEdgeId<I> {
    #[inline]
    pub(crate) fn classify(self) -> RawHalfEdge {
        if self.is_border() {
            RawHalfEdge::Border {
                border: self.face.to_usize(),
            }
        } else {
            RawHalfEdge::Interior {
                face: self.face.to_usize(),
                slot: self.slot.to_usize(),
            }
        }
    }
}

impl<I: MeshIndex> Debug for HalfEdgeId<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_border() {
            write!(f, "HE(B{})", self.face.to_usize())
        } else {
            write!(f, "HE({}.{})", self.face.to_usize(), self.slot.to_usize())
        }
    }
}
