//! Provides the [TreeBuilder] implementation for [PhyloTree].

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;

/// Builder that constructs [PhyloTree] instances.
///
/// # Example
/// ```
/// use cladesort::model::PhyloTreeBuilder;
/// use cladesort::newick::NewickParser;
/// use cladesort::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A,(B,C));");
/// let mut parser = NewickParser::new(PhyloTreeBuilder::new());
/// let tree = parser.parse_single(&mut byte_parser)?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct PhyloTreeBuilder {
    current_tree: PhyloTree,
}

impl PhyloTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreeBuilder for PhyloTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = PhyloTree;

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = PhyloTree::new(num_leaves);
    }

    fn add_leaf(&mut self, branch_len: Option<BranchLength>, name: String) -> VertexIndex {
        self.current_tree.add_leaf(branch_len, name)
    }

    fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> VertexIndex {
        self.current_tree
            .add_internal_vertex(children, label, branch_len)
    }

    fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> VertexIndex {
        self.current_tree.add_root(children, label, branch_len)
    }

    fn set_name(&mut self, tree_name: String) {
        self.current_tree.set_name(tree_name);
    }

    fn finish_tree(&mut self) -> Option<PhyloTree> {
        let tree = std::mem::take(&mut self.current_tree);
        tree.is_root_set().then_some(tree)
    }
}
