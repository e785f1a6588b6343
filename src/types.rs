//! Types specific to meshdof

/// Integer type used for global DOF indices.
pub type GlobalIndex = usize;

/// Index of a component within an ordered component list.
pub type ComponentId = usize;

/// Reserved index value meaning "no such entry".
///
/// Distinguishable from every valid index, since a map holding
/// `usize::MAX` entries cannot exist.
pub const NOP: GlobalIndex = GlobalIndex::MAX;

/// Kind of mesh item a DOF can be attached to.
///
/// The variant order matters: nodes sort before cells, so within one
/// mesh all node DOFs precede all cell DOFs in the by-location
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeshItemType {
    /// A mesh node
    Node,
    /// A mesh cell (element)
    Cell,
}

/// Identifies one mesh item within a specific mesh.
///
/// Ordering is lexicographic on `(mesh_id, item_type, item_id)`, which
/// the field order encodes via the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Identifier of the mesh the item belongs to
    pub mesh_id: usize,
    /// Whether the item is a node or a cell
    pub item_type: MeshItemType,
    /// Identifier of the item within its mesh
    pub item_id: usize,
}

impl Location {
    /// Create a new location
    pub fn new(mesh_id: usize, item_type: MeshItemType, item_id: usize) -> Self {
        Self {
            mesh_id,
            item_type,
            item_id,
        }
    }
}

/// Global numbering policy for a newly built DOF map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOrder {
    /// Component-major numbering: all DOFs of component 0 first, then
    /// component 1, and so on (the construction order).
    ByComponent,
    /// Location-major numbering: DOFs at the same mesh item receive
    /// adjacent indices, improving locality of the assembled matrix.
    ByLocation,
}
