//! Second stage: which pair of groups merges first?
//!
//! Walks the internal vertices in post-order and compares each clade against
//! the signatures of the taxonomy, in enumeration order. The first clade
//! equal to some signature decides the label.

use crate::classify::label::Label;
use crate::model::{CladeTree, VertexIndex};
use crate::taxonomy::Taxonomy;

/// Result of the topology stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyOutcome {
    /// The clade below `vertex` equals the signature with index `signature`.
    Matched {
        signature: usize,
        vertex: VertexIndex,
    },
    /// No clade equals any signature.
    NoMatch,
}

impl TopologyOutcome {
    /// Stage label: `tree{k}` for a match, [Label::Other] otherwise.
    pub fn label(&self) -> Label {
        match self {
            TopologyOutcome::Matched { signature, .. } => Label::Signature(*signature),
            TopologyOutcome::NoMatch => Label::Other,
        }
    }
}

/// Finds the first clade in post-order that equals a signature.
///
/// Meant for trees that passed the monophyly stage, but well-defined for any tree.
pub fn match_signature<T: CladeTree>(tree: &T, taxonomy: &Taxonomy) -> TopologyOutcome {
    let signatures = taxonomy.signatures();
    let mut matched = None;
    let vertex = tree.first_clade_where(|_, clade| {
        matched = signatures
            .iter()
            .find(|s| s.taxa().len() == clade.len() && s.taxa() == clade);
        matched.is_some()
    });
    match (vertex, matched) {
        (Some(vertex), Some(signature)) => TopologyOutcome::Matched {
            signature: signature.index(),
            vertex,
        },
        _ => TopologyOutcome::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    fn xyz() -> Taxonomy {
        Taxonomy::from_pairs([("x1", "X"), ("x2", "X"), ("y1", "Y"), ("z1", "Z")]).unwrap()
    }

    #[test]
    fn test_each_sister_pair() {
        let taxonomy = xyz();
        let cases = [
            ("(((x1,x2),y1),z1);", 1),
            ("(((x1,x2),z1),y1);", 2),
            ("((x1,x2),(y1,z1));", 3),
        ];
        for (newick, expected) in cases {
            let tree = parse_str(newick).unwrap();
            assert_eq!(
                match_signature(&tree, &taxonomy).label(),
                Label::Signature(expected),
                "{}",
                newick
            );
        }
    }

    #[test]
    fn test_polytomy_never_matches() {
        let tree = parse_str("((x1,x2),y1,z1);").unwrap();
        assert_eq!(match_signature(&tree, &xyz()), TopologyOutcome::NoMatch);
    }

    #[test]
    fn test_extra_leaf_in_clade_prevents_match() {
        // y1 only joins X together with an unregistered taxon
        let tree = parse_str("(((x1,x2),(y1,w)),z1);").unwrap();
        assert_eq!(match_signature(&tree, &xyz()).label(), Label::Other);
    }

    #[test]
    fn test_matched_vertex_is_reported() {
        let tree = parse_str("((x1,x2),(y1,z1)90);").unwrap();
        match match_signature(&tree, &xyz()) {
            TopologyOutcome::Matched { signature, vertex } => {
                assert_eq!(signature, 3);
                assert_eq!(tree.vertex(vertex).label(), Some("90"));
            }
            TopologyOutcome::NoMatch => panic!("expected a match"),
        }
    }
}
