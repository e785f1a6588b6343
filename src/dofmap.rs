//! The DOF index map: `(location, component)` pairs to global indices.

use crate::mesh_subset::MeshSubsets;
use crate::types::{ComponentId, ComponentOrder, GlobalIndex, Location, MeshItemType, NOP};
use itertools::Itertools;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// One record of a DOF map: a key and its assigned global index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// The mesh item the DOF is attached to
    pub location: Location,
    /// The component the DOF belongs to
    pub component: ComponentId,
    /// The DOF's position in the assembled global system
    pub global_index: GlobalIndex,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(mesh {}, {:?} {}) comp {} -> {}",
            self.location.mesh_id,
            self.location.item_type,
            self.location.item_id,
            self.component,
            self.global_index
        )
    }
}

/// Map from `(location, component)` pairs to global DOF indices.
///
/// A single ordered dictionary keyed by the unique pair provides both
/// required views of the record set: exact lookup on the full key, and
/// the by-location ordering via in-order traversal, where ties at one
/// location are broken by ascending component id (equal to component
/// insertion order). Both views therefore stay synchronized through
/// every insert and through renumbering.
///
/// Once built, a map is immutable apart from
/// [`renumber_by_location`](DofMap::renumber_by_location), which
/// rewrites every index in place but never adds or removes a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofMap {
    dict: BTreeMap<(Location, ComponentId), GlobalIndex>,
}

impl DofMap {
    /// Reserved index value returned by [`global_index`](DofMap::global_index)
    /// for keys that are not in the map.
    pub const NOP: GlobalIndex = NOP;

    /// Build a map from an ordered component list.
    ///
    /// Indices are assigned component-major: component by component,
    /// subset by subset, nodes before elements, each in the order the
    /// input supplies them. With [`ComponentOrder::ByLocation`] the map
    /// is renumbered afterwards so that DOFs sharing a mesh item get
    /// adjacent indices.
    pub fn from_components(components: &[MeshSubsets], order: ComponentOrder) -> Self {
        let mut dict = BTreeMap::new();
        let mut global_index: GlobalIndex = 0;
        for (comp_id, component) in components.iter().enumerate() {
            for subset in component {
                let mesh_id = subset.mesh_id();
                // mesh items are numbered nodes first, then cells
                for &node_id in subset.node_ids() {
                    let location = Location::new(mesh_id, MeshItemType::Node, node_id);
                    let previous = dict.insert((location, comp_id), global_index);
                    debug_assert!(previous.is_none(), "duplicate DOF {location:?} comp {comp_id}");
                    global_index += 1;
                }
                for &element_id in subset.element_ids() {
                    let location = Location::new(mesh_id, MeshItemType::Cell, element_id);
                    let previous = dict.insert((location, comp_id), global_index);
                    debug_assert!(previous.is_none(), "duplicate DOF {location:?} comp {comp_id}");
                    global_index += 1;
                }
            }
        }
        debug!(
            "built DOF map with {} entries over {} components",
            dict.len(),
            components.len()
        );

        let mut map = Self { dict };
        if order == ComponentOrder::ByLocation {
            map.renumber_by_location(0);
        }
        map
    }

    /// Derive the restricted map for a subset of this map's components.
    ///
    /// The input is aligned positionally with a component numbering:
    /// `None` marks a component absent from the subset and only
    /// advances the component counter. Every record of the result is
    /// copied from this map with its global index preserved, so a
    /// system assembled from the subset stays consistent with the full
    /// coupled system. The result owns its records independently.
    ///
    /// # Panics
    ///
    /// If a requested `(location, component)` pair is not present in
    /// this map; requesting unknown DOFs is a caller error.
    pub fn subset(&self, components: &[Option<&MeshSubsets>]) -> Self {
        let mut dict = BTreeMap::new();
        for (comp_id, component) in components.iter().enumerate() {
            let Some(component) = component else {
                continue;
            };
            for subset in *component {
                let mesh_id = subset.mesh_id();
                for &node_id in subset.node_ids() {
                    let line = self.line(Location::new(mesh_id, MeshItemType::Node, node_id), comp_id);
                    dict.insert((line.location, line.component), line.global_index);
                }
                for &element_id in subset.element_ids() {
                    let line =
                        self.line(Location::new(mesh_id, MeshItemType::Cell, element_id), comp_id);
                    dict.insert((line.location, line.component), line.global_index);
                }
            }
        }
        debug!("derived subset map with {} of {} entries", dict.len(), self.dict.len());
        Self { dict }
    }

    /// Reassign all global indices following the by-location ordering.
    ///
    /// Records are visited sorted by location, ties in ascending
    /// component order, and receive consecutive indices starting at
    /// `offset`. Keys are untouched. Renumbering twice with the same
    /// offset leaves the map unchanged.
    pub fn renumber_by_location(&mut self, offset: GlobalIndex) {
        let mut global_index = offset;
        for index in self.dict.values_mut() {
            *index = global_index;
            global_index += 1;
        }
        debug!("renumbered {} DOFs starting at offset {}", self.dict.len(), offset);
    }

    /// Ids of the components present at a location, in ascending order.
    pub fn component_ids(&self, location: Location) -> Vec<ComponentId> {
        self.lines_at(location).map(|line| line.component).collect()
    }

    /// The full record for an exact key.
    ///
    /// # Panics
    ///
    /// If the key is not in the map. A wrong index silently flowing
    /// into matrix assembly would corrupt the system undetectably, so
    /// a missing key fails fast instead of returning a sentinel. Use
    /// [`global_index`](DofMap::global_index) to probe for keys that
    /// may legitimately be absent.
    pub fn line(&self, location: Location, component: ComponentId) -> Line {
        match self.dict.get(&(location, component)) {
            Some(&global_index) => Line {
                location,
                component,
                global_index,
            },
            None => panic!("no DOF at {location:?} for component {component}"),
        }
    }

    /// Global index for an exact key, or [`DofMap::NOP`] if the key is
    /// absent.
    pub fn global_index(&self, location: Location, component: ComponentId) -> GlobalIndex {
        self.dict
            .get(&(location, component))
            .copied()
            .unwrap_or(Self::NOP)
    }

    /// Global indices of all components at a location, in ascending
    /// component order. Empty if the location carries no DOFs.
    pub fn global_indices(&self, location: Location) -> Vec<GlobalIndex> {
        self.lines_at(location).map(|line| line.global_index).collect()
    }

    /// Global indices for a list of locations, grouped by location.
    ///
    /// Per input location, in input order, the location's indices in
    /// ascending component order. Duplicate input locations yield
    /// duplicate runs.
    pub fn global_indices_by_location(&self, locations: &[Location]) -> Vec<GlobalIndex> {
        let mut global_indices = Vec::with_capacity(locations.len());
        for &location in locations {
            global_indices.extend(self.lines_at(location).map(|line| line.global_index));
        }
        global_indices
    }

    /// Global indices for a list of locations, grouped by component.
    ///
    /// Gathers the same records as
    /// [`global_indices_by_location`](DofMap::global_indices_by_location)
    /// and stably sorts them by component id, so all component-0
    /// indices come first, then component 1, and within one component
    /// the relative location order is preserved. Assemblers rely on
    /// that stability for deterministic block layouts.
    pub fn global_indices_by_component(&self, locations: &[Location]) -> Vec<GlobalIndex> {
        locations
            .iter()
            .flat_map(|&location| self.lines_at(location))
            .sorted_by_key(|line| line.component)
            .map(|line| line.global_index)
            .collect()
    }

    /// Number of DOFs in the map
    pub fn size(&self) -> usize {
        self.dict.len()
    }

    /// Whether the map holds no DOFs
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Iterate over all records in the by-location ordering.
    pub fn iter(&self) -> impl Iterator<Item = Line> + '_ {
        self.dict
            .iter()
            .map(|(&(location, component), &global_index)| Line {
                location,
                component,
                global_index,
            })
    }

    // All records at one location, ascending component order.
    fn lines_at(&self, location: Location) -> impl Iterator<Item = Line> + '_ {
        self.dict
            .range((location, 0)..=(location, ComponentId::MAX))
            .map(|(&(location, component), &global_index)| Line {
                location,
                component,
                global_index,
            })
    }
}

impl fmt::Display for DofMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.iter() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh_subset::MeshSubset;

    fn two_component_map(order: ComponentOrder) -> DofMap {
        // comp 0 on nodes {5, 7}, comp 1 on node {5} and element {2}
        let components = [
            MeshSubsets::from(MeshSubset::from_nodes(1, vec![5, 7])),
            MeshSubsets::from(MeshSubset::new(1, vec![5], vec![2])),
        ];
        DofMap::from_components(&components, order)
    }

    #[test]
    fn test_component_major_numbering() {
        let map = two_component_map(ComponentOrder::ByComponent);
        assert_eq!(map.size(), 4);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 5), 0), 0);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 7), 0), 1);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 5), 1), 2);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Cell, 2), 1), 3);
    }

    #[test]
    fn test_by_location_numbering() {
        let map = two_component_map(ComponentOrder::ByLocation);
        // location order: node 5 < node 7 < cell 2
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 5), 0), 0);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 5), 1), 1);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 7), 0), 2);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Cell, 2), 1), 3);
    }

    #[test]
    fn test_indices_are_a_bijection() {
        let map = two_component_map(ComponentOrder::ByComponent);
        let mut indices = map.iter().map(|line| line.global_index).collect::<Vec<_>>();
        indices.sort_unstable();
        assert_eq!(indices, (0..map.size()).collect::<Vec<_>>());
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let mut map = two_component_map(ComponentOrder::ByComponent);
        map.renumber_by_location(0);
        let once = map.clone();
        map.renumber_by_location(0);
        assert_eq!(map, once);
    }

    #[test]
    fn test_renumber_with_offset() {
        let mut map = two_component_map(ComponentOrder::ByComponent);
        map.renumber_by_location(10);
        let indices = map.iter().map(|line| line.global_index).collect::<Vec<_>>();
        assert_eq!(indices, [10, 11, 12, 13]);
    }

    #[test]
    fn test_component_ids() {
        let map = two_component_map(ComponentOrder::ByComponent);
        assert_eq!(map.component_ids(Location::new(1, MeshItemType::Node, 5)), [0, 1]);
        assert_eq!(map.component_ids(Location::new(1, MeshItemType::Node, 7)), [0]);
        assert_eq!(map.component_ids(Location::new(1, MeshItemType::Cell, 2)), [1]);
        assert!(map.component_ids(Location::new(1, MeshItemType::Node, 99)).is_empty());
    }

    #[test]
    fn test_missing_key_returns_nop() {
        let map = two_component_map(ComponentOrder::ByComponent);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 7), 1), DofMap::NOP);
        assert_eq!(map.global_index(Location::new(2, MeshItemType::Node, 5), 0), DofMap::NOP);
    }

    #[test]
    #[should_panic]
    fn test_line_panics_on_missing_key() {
        let map = two_component_map(ComponentOrder::ByComponent);
        map.line(Location::new(1, MeshItemType::Node, 7), 1);
    }

    #[test]
    fn test_empty_component_consumes_an_id() {
        let components = [
            MeshSubsets::from(MeshSubset::from_nodes(0, vec![0])),
            MeshSubsets::default(),
            MeshSubsets::from(MeshSubset::from_nodes(0, vec![0])),
        ];
        let map = DofMap::from_components(&components, ComponentOrder::ByComponent);
        assert_eq!(map.size(), 2);
        assert_eq!(map.component_ids(Location::new(0, MeshItemType::Node, 0)), [0, 2]);
    }

    #[test]
    fn test_multiple_subsets_share_one_component() {
        let components = [MeshSubsets::new(vec![
            MeshSubset::from_nodes(0, vec![0, 1]),
            MeshSubset::from_nodes(1, vec![0]),
        ])];
        let map = DofMap::from_components(&components, ComponentOrder::ByComponent);
        assert_eq!(map.size(), 3);
        assert_eq!(map.global_index(Location::new(1, MeshItemType::Node, 0), 0), 2);
    }

    #[test]
    fn test_display_lists_lines_in_location_order() {
        let map = two_component_map(ComponentOrder::ByComponent);
        let text = map.to_string();
        let rows = text.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "(mesh 1, Node 5) comp 0 -> 0");
        assert_eq!(rows[1], "(mesh 1, Node 5) comp 1 -> 2");
    }
}
