//! Mesh subsets: the inbound data contract for building DOF maps.
//!
//! A subset is a plain list of node and element identifiers of one
//! mesh; it carries no geometry or connectivity. The DOF map copies
//! everything it needs out of a subset at insertion time and holds no
//! references into it afterwards.

/// A collection of mesh items (nodes and elements) of a single mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSubset {
    mesh_id: usize,
    node_ids: Vec<usize>,
    element_ids: Vec<usize>,
}

impl MeshSubset {
    /// Create a subset from ordered node and element id lists
    pub fn new(mesh_id: usize, node_ids: Vec<usize>, element_ids: Vec<usize>) -> Self {
        Self {
            mesh_id,
            node_ids,
            element_ids,
        }
    }

    /// Create a subset containing only nodes
    pub fn from_nodes(mesh_id: usize, node_ids: Vec<usize>) -> Self {
        Self::new(mesh_id, node_ids, vec![])
    }

    /// Identifier of the mesh the items belong to
    pub fn mesh_id(&self) -> usize {
        self.mesh_id
    }

    /// Node ids in subset-internal order
    pub fn node_ids(&self) -> &[usize] {
        &self.node_ids
    }

    /// Element ids in subset-internal order
    pub fn element_ids(&self) -> &[usize] {
        &self.element_ids
    }

    /// Total number of items in the subset
    pub fn n_items(&self) -> usize {
        self.node_ids.len() + self.element_ids.len()
    }
}

/// An ordered list of subsets forming the support of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshSubsets {
    subsets: Vec<MeshSubset>,
}

impl MeshSubsets {
    /// Create a component support from an ordered subset list
    pub fn new(subsets: Vec<MeshSubset>) -> Self {
        Self { subsets }
    }

    /// Number of subsets
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// Whether the component has no subsets at all
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Iterate over the subsets in order
    pub fn iter(&self) -> std::slice::Iter<'_, MeshSubset> {
        self.subsets.iter()
    }
}

impl From<MeshSubset> for MeshSubsets {
    fn from(subset: MeshSubset) -> Self {
        Self::new(vec![subset])
    }
}

impl<'a> IntoIterator for &'a MeshSubsets {
    type Item = &'a MeshSubset;
    type IntoIter = std::slice::Iter<'a, MeshSubset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_subset_accessors() {
        let subset = MeshSubset::new(3, vec![0, 1, 2], vec![7]);
        assert_eq!(subset.mesh_id(), 3);
        assert_eq!(subset.node_ids(), [0, 1, 2]);
        assert_eq!(subset.element_ids(), [7]);
        assert_eq!(subset.n_items(), 4);
    }

    #[test]
    fn test_nodes_only() {
        let subset = MeshSubset::from_nodes(0, vec![4, 5]);
        assert!(subset.element_ids().is_empty());
        assert_eq!(subset.n_items(), 2);
    }

    #[test]
    fn test_subsets_iteration() {
        let component = MeshSubsets::new(vec![
            MeshSubset::from_nodes(0, vec![0]),
            MeshSubset::from_nodes(1, vec![1, 2]),
        ]);
        assert_eq!(component.len(), 2);
        let mesh_ids = component.iter().map(|s| s.mesh_id()).collect::<Vec<_>>();
        assert_eq!(mesh_ids, [0, 1]);
    }
}
