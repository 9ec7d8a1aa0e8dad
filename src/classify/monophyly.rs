//! First stage: are all groups monophyletic?
//!
//! For every group, in sorted group order, the clade below the most recent
//! common ancestor of its taxa must contain exactly these taxa. The first
//! group that fails decides the outcome; its evidence lists the taxa that
//! intrude into the clade.
//!
//! A group taxon absent from the tree is an error rather than a failure, so
//! a clade can only ever be too large, never too small.

use crate::classify::error::ClassifyError;
use crate::classify::label::Label;
use crate::model::{CladeError, CladeTree, LeafSet, VertexIndex};
use crate::taxonomy::Taxonomy;

/// Why a group is not monophyletic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonophylyFailure {
    /// The first group (in sorted order) that failed.
    pub group: String,
    /// Common ancestor of the group's taxa.
    pub ancestor: VertexIndex,
    /// Taxa beneath the ancestor that do not belong to the group.
    pub intruders: LeafSet,
}

/// Result of the monophyly stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonophylyOutcome {
    /// Every group forms a clade.
    AllMonophyletic,
    /// At least one group does not.
    NotMonophyletic(MonophylyFailure),
}

impl MonophylyOutcome {
    /// Stage label: [Label::Tree] when clean, [Label::Unclassified] otherwise.
    pub fn label(&self) -> Label {
        match self {
            MonophylyOutcome::AllMonophyletic => Label::Tree,
            MonophylyOutcome::NotMonophyletic(_) => Label::Unclassified,
        }
    }
}

/// Tests each group of `taxonomy` for monophyly in `tree`.
///
/// # Errors
/// Returns [ClassifyError::TaxonNotFound] if a taxon of a tested group is
/// not a leaf of `tree`. Groups after the first failing one are not tested.
pub fn check_monophyly<T: CladeTree>(
    tree: &T,
    taxonomy: &Taxonomy,
) -> Result<MonophylyOutcome, ClassifyError> {
    for (group, taxa) in taxonomy.iter() {
        let ancestor = tree.common_ancestor(taxa).map_err(|e| match e {
            CladeError::TaxonNotFound(taxon) => ClassifyError::TaxonNotFound {
                taxon,
                group: group.to_string(),
            },
            CladeError::EmptyTaxonSet => ClassifyError::EmptyGroup(group.to_string()),
        })?;

        let clade = tree.leaf_names_beneath(ancestor);
        if &clade != taxa {
            return Ok(MonophylyOutcome::NotMonophyletic(MonophylyFailure {
                group: group.to_string(),
                ancestor,
                intruders: clade.difference(taxa).cloned().collect(),
            }));
        }
    }

    Ok(MonophylyOutcome::AllMonophyletic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    fn xyz() -> Taxonomy {
        Taxonomy::from_pairs([
            ("x1", "X"),
            ("x2", "X"),
            ("y1", "Y"),
            ("y2", "Y"),
            ("z1", "Z"),
            ("z2", "Z"),
        ])
        .unwrap()
    }

    #[test]
    fn test_clean_tree_passes() {
        let tree = parse_str("((x1,x2),((y1,y2),(z1,z2)));").unwrap();
        let outcome = check_monophyly(&tree, &xyz()).unwrap();
        assert_eq!(outcome, MonophylyOutcome::AllMonophyletic);
        assert_eq!(outcome.label(), Label::Tree);
    }

    #[test]
    fn test_first_failing_group_in_sorted_order() {
        // X and Y are both broken; X is reported
        let tree = parse_str("((x1,y1),(x2,y2),(z1,z2));").unwrap();
        match check_monophyly(&tree, &xyz()).unwrap() {
            MonophylyOutcome::NotMonophyletic(failure) => {
                assert_eq!(failure.group, "X");
                let intruders: Vec<_> = failure.intruders.iter().map(String::as_str).collect();
                assert_eq!(intruders, vec!["y1", "y2", "z1", "z2"]);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_taxon_breaks_group() {
        // An unregistered leaf inside the Z clade
        let tree = parse_str("((x1,x2),((y1,y2),(z1,(z2,outgroup))));").unwrap();
        match check_monophyly(&tree, &xyz()).unwrap() {
            MonophylyOutcome::NotMonophyletic(failure) => {
                assert_eq!(failure.group, "Z");
                assert!(failure.intruders.contains("outgroup"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_taxon_uses_first_occurrence() {
        // The second x1 sits next to the Z clade and is ignored
        let tree = parse_str("(((x1,x2),(y1,y2)),((z1,z2),x1));").unwrap();
        assert_eq!(
            check_monophyly(&tree, &xyz()).unwrap(),
            MonophylyOutcome::AllMonophyletic
        );

        // Here the first x1 is the stray one
        let tree = parse_str("(((z1,z2),x1),((x1,x2),(y1,y2)));").unwrap();
        match check_monophyly(&tree, &xyz()).unwrap() {
            MonophylyOutcome::NotMonophyletic(failure) => {
                assert_eq!(failure.group, "X");
                assert!(failure.intruders.contains("z1"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_taxon_is_error() {
        let tree = parse_str("((x1,x2),((y1,y2),z1));").unwrap();
        let err = check_monophyly(&tree, &xyz()).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::TaxonNotFound {
                taxon: "z2".to_string(),
                group: "Z".to_string()
            }
        );
    }
}
