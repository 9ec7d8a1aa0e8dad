//! Clade queries on rooted trees.
//!
//! The classifiers never walk a tree themselves; they ask the questions
//! collected in [CladeTree]. [PhyloTree] implements the trait, but any rooted
//! tree type that can answer these queries can be classified.

use crate::model::tree::{PhyloTree, VertexIndex};
use std::collections::BTreeSet;
use thiserror::Error;

/// Set of taxon (leaf) names. Ordered, so that reports are reproducible.
pub type LeafSet = BTreeSet<String>;

/// Errors raised by clade queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CladeError {
    #[error("taxon '{0}' not found in tree")]
    TaxonNotFound(String),
    #[error("common ancestor of an empty taxon set is undefined")]
    EmptyTaxonSet,
}

// =#========================================================================#=
// CLADE TREE (trait)
// =#========================================================================T=
/// Read-only queries needed to classify a rooted tree.
pub trait CladeTree {
    /// Returns the set of all leaf names.
    fn leaf_names(&self) -> LeafSet;

    /// Returns the most recent common ancestor of the leaves named in `names`.
    ///
    /// Each name stands for the first leaf carrying it in pre-order; later
    /// leaves with the same name are ignored. For a single name, that leaf
    /// itself is returned.
    ///
    /// # Errors
    /// * [CladeError::TaxonNotFound] naming the smallest missing name
    /// * [CladeError::EmptyTaxonSet] if `names` is empty
    fn common_ancestor(&self, names: &LeafSet) -> Result<VertexIndex, CladeError>;

    /// Returns the leaf names in the subtree rooted at `vertex`.
    fn leaf_names_beneath(&self, vertex: VertexIndex) -> LeafSet;

    /// Visits the root and internal vertices in post-order (children before
    /// parents, siblings in input order) together with the leaf names beneath
    /// them, and returns the first vertex accepted by `accept`.
    ///
    /// Leaf sets are only built up to the accepted vertex.
    fn first_clade_where<F>(&self, accept: F) -> Option<VertexIndex>
    where
        F: FnMut(VertexIndex, &LeafSet) -> bool;
}

impl CladeTree for PhyloTree {
    fn leaf_names(&self) -> LeafSet {
        self.leaves()
            .filter_map(|v| v.name())
            .map(str::to_string)
            .collect()
    }

    fn common_ancestor(&self, names: &LeafSet) -> Result<VertexIndex, CladeError> {
        if names.is_empty() {
            return Err(CladeError::EmptyTaxonSet);
        }

        // Resolve every name to its first leaf in pre-order
        let mut unresolved: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let mut selected = vec![false; self.num_vertices()];
        for vertex in self.pre_order_iter() {
            if let Some(name) = vertex.name() {
                if unresolved.remove(name) {
                    selected[vertex.index()] = true;
                }
            }
        }
        if let Some(missing) = unresolved.first() {
            return Err(CladeError::TaxonNotFound(missing.to_string()));
        }

        // The first vertex in post-order that sees all selected leaves is
        // the deepest one to do so
        let total = names.len();
        let mut counts = vec![0usize; self.num_vertices()];
        for vertex in self.post_order_iter() {
            let index = vertex.index();
            counts[index] = if vertex.is_leaf() {
                usize::from(selected[index])
            } else {
                vertex.children().iter().map(|&c| counts[c]).sum()
            };
            if counts[index] == total {
                return Ok(index);
            }
        }

        Err(CladeError::TaxonNotFound(
            names.iter().next().cloned().unwrap_or_default(),
        ))
    }

    fn leaf_names_beneath(&self, vertex: VertexIndex) -> LeafSet {
        self.subtree_pre_order_iter(vertex)
            .filter_map(|v| v.name())
            .map(str::to_string)
            .collect()
    }

    fn first_clade_where<F>(&self, mut accept: F) -> Option<VertexIndex>
    where
        F: FnMut(VertexIndex, &LeafSet) -> bool,
    {
        let mut sets = vec![LeafSet::new(); self.num_vertices()];
        for vertex in self.post_order_iter() {
            let index = vertex.index();
            if let Some(name) = vertex.name() {
                sets[index].insert(name.to_string());
                continue;
            }

            // Children's sets are moved up, merging smaller into larger
            let mut clade = LeafSet::new();
            for &child in vertex.children() {
                let mut child_set = std::mem::take(&mut sets[child]);
                if child_set.len() > clade.len() {
                    std::mem::swap(&mut clade, &mut child_set);
                }
                clade.append(&mut child_set);
            }
            if accept(index, &clade) {
                return Some(index);
            }
            sets[index] = clade;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> LeafSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// `((A,B),(C,D,E));` built by hand
    fn sample_tree() -> PhyloTree {
        let mut tree = PhyloTree::new(5);
        let a = tree.add_leaf(None, "A".into());
        let b = tree.add_leaf(None, "B".into());
        let ab = tree.add_internal_vertex(vec![a, b], None, None);
        let c = tree.add_leaf(None, "C".into());
        let d = tree.add_leaf(None, "D".into());
        let e = tree.add_leaf(None, "E".into());
        let cde = tree.add_internal_vertex(vec![c, d, e], Some("95".into()), None);
        tree.add_root(vec![ab, cde], None, None);
        tree
    }

    #[test]
    fn test_common_ancestor_of_single_leaf_is_leaf() {
        let tree = sample_tree();
        let mrca = tree.common_ancestor(&set(&["D"])).unwrap();
        assert_eq!(tree.vertex(mrca).name(), Some("D"));
    }

    #[test]
    fn test_common_ancestor_across_polytomy() {
        let tree = sample_tree();
        let mrca = tree.common_ancestor(&set(&["C", "E"])).unwrap();
        assert_eq!(tree.leaf_names_beneath(mrca), set(&["C", "D", "E"]));

        let mrca = tree.common_ancestor(&set(&["B", "C"])).unwrap();
        assert_eq!(mrca, tree.root_index());
    }

    #[test]
    fn test_common_ancestor_reports_smallest_missing_taxon() {
        let tree = sample_tree();
        let err = tree.common_ancestor(&set(&["A", "Z", "Y"])).unwrap_err();
        assert_eq!(err, CladeError::TaxonNotFound("Y".to_string()));
        assert_eq!(
            tree.common_ancestor(&LeafSet::new()).unwrap_err(),
            CladeError::EmptyTaxonSet
        );
    }

    #[test]
    fn test_duplicate_leaf_name_resolves_to_first_in_pre_order() {
        // ((A,B),(A,C)): only the first A counts
        let mut tree = PhyloTree::new(4);
        let a1 = tree.add_leaf(None, "A".into());
        let b = tree.add_leaf(None, "B".into());
        let ab = tree.add_internal_vertex(vec![a1, b], None, None);
        let a2 = tree.add_leaf(None, "A".into());
        let c = tree.add_leaf(None, "C".into());
        let ac = tree.add_internal_vertex(vec![a2, c], None, None);
        tree.add_root(vec![ab, ac], None, None);

        assert_eq!(tree.common_ancestor(&set(&["A"])).unwrap(), a1);
        assert_eq!(tree.common_ancestor(&set(&["A", "B"])).unwrap(), ab);
        assert_eq!(tree.common_ancestor(&set(&["A", "C"])).unwrap(), tree.root_index());
        assert_eq!(tree.leaf_names(), set(&["A", "B", "C"]));
    }

    #[test]
    fn test_clades_visited_children_first() {
        let tree = sample_tree();
        let mut visited = Vec::new();
        let found = tree.first_clade_where(|vertex, clade| {
            assert_eq!(clade, &tree.leaf_names_beneath(vertex));
            visited.push(vertex);
            false
        });
        assert_eq!(found, None);
        assert_eq!(visited.len(), 3);
        assert_eq!(*visited.last().unwrap(), tree.root_index());
        assert_eq!(tree.vertex(visited[1]).label(), Some("95"));
    }

    #[test]
    fn test_first_clade_where_stops_at_accepted_vertex() {
        let tree = sample_tree();
        let found = tree.first_clade_where(|_, clade| clade.contains("C"));
        let found = found.unwrap();
        assert_eq!(tree.vertex(found).label(), Some("95"));
    }
}
