//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has one or more children, no parent, optional label and branch length
/// - **Internal**: Has one or more children and a parent, optional label and branch length
/// - **Leaf**: Has no children, has a name and might have a branch length
///
/// Internal vertices may have more than two children (polytomies).
/// Labels on root and internal vertices (e.g. support values) are kept
/// as parsed but carry no meaning for classification.
///
/// # Invariants
/// - `index` is index in arena
/// - `children` keep the order in which they appeared in the Newick string
/// - Internal vertices and leaves have `parent` set once their parent was added;
///   `NO_PARENT_SET = usize::MAX` only during construction
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Label written after the closing parenthesis, if any
        label: Option<String>,
        /// Root branch length (rare, but allowed in Newick)
        branch_length: Option<BranchLength>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Label written after the closing parenthesis, if any
        label: Option<String>,
        /// Distance to parent node (optional)
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (has parent and name, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Taxon name of this leaf
        name: String,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Distance to parent node (optional)
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in input order
    /// * `label` - Optional label of the root
    /// * `branch_length` - Optional root branch length
    pub fn new_root(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Root {
            index,
            children,
            label,
            branch_length,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Child indices in input order
    /// * `label` - Optional label, e.g. a support value
    /// * `branch_length` - Distance to parent node
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            label,
            branch_length,
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent node
    /// * `name` - Taxon name of this leaf
    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, name: String) -> Self {
        Vertex::Leaf {
            index,
            name,
            parent: NO_PARENT_SET,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the branch length, if one was given.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { branch_length, .. } => *branch_length,
            Vertex::Internal { branch_length, .. } => *branch_length,
            Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns the taxon name if this is a leaf, else `None`.
    pub fn name(&self) -> Option<&str> {
        match self {
            Vertex::Leaf { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the label of a root or internal vertex, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Root { label, .. } | Vertex::Internal { label, .. } => label.as_deref(),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal (non-root) vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the children of a root or internal vertex; empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Sets new parent for non-root vertex. Has no effect on a root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => {}
            Vertex::Internal { parent: p, .. } => *p = parent,
            Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be finite. Its sign is not checked, since some
/// tree inference methods emit small negative lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length, or `None` if `length` is not finite.
    pub fn new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_length_rejects_non_finite() {
        assert!(BranchLength::new(f64::INFINITY).is_none());
        assert!(BranchLength::new(f64::NAN).is_none());
        assert_eq!(BranchLength::new(-0.01).map(|b| *b), Some(-0.01));
    }

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = Vertex::new_leaf(0, None, "Dste".to_string());
        assert!(leaf.children().is_empty());
        assert_eq!(leaf.name(), Some("Dste"));
        assert_eq!(leaf.label(), None);
        assert_eq!(leaf.parent(), None);
    }
}
