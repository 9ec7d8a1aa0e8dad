//! Classification labels.

use std::fmt;
use std::str::FromStr;

/// Label assigned to a tree by the two classification stages.
///
/// Renders as the bucket name used on disk and in the summary:
/// `unclassified`, `tree`, `tree1`, `tree2`, ..., `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Some group is not monophyletic.
    Unclassified,
    /// Every group is monophyletic; waiting for the topology stage.
    Tree,
    /// The signature with this (1-based) index matched first in post-order.
    Signature(usize),
    /// All groups are monophyletic, but no signature matched.
    Other,
}

impl Label {
    /// Returns `true` for labels that may appear in a final report.
    pub fn is_final(&self) -> bool {
        !matches!(self, Label::Tree)
    }

    /// All final labels for a taxonomy with `num_signatures` signatures,
    /// in the order buckets are reported.
    pub fn final_labels(num_signatures: usize) -> Vec<Label> {
        std::iter::once(Label::Unclassified)
            .chain((1..=num_signatures).map(Label::Signature))
            .chain(std::iter::once(Label::Other))
            .collect()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Unclassified => write!(f, "unclassified"),
            Label::Tree => write!(f, "tree"),
            Label::Signature(index) => write!(f, "tree{}", index),
            Label::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unclassified" => Ok(Label::Unclassified),
            "tree" => Ok(Label::Tree),
            "other" => Ok(Label::Other),
            _ => s
                .strip_prefix("tree")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .map(Label::Signature)
                .ok_or_else(|| format!("unknown classification label '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Label::Unclassified.to_string(), "unclassified");
        assert_eq!(Label::Tree.to_string(), "tree");
        assert_eq!(Label::Signature(3).to_string(), "tree3");
        assert_eq!(Label::Other.to_string(), "other");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("tree2".parse::<Label>(), Ok(Label::Signature(2)));
        assert_eq!("other".parse::<Label>(), Ok(Label::Other));
        assert!("tree0".parse::<Label>().is_err());
        assert!("Tree1".parse::<Label>().is_err());
    }

    #[test]
    fn test_final_labels() {
        let labels = Label::final_labels(3);
        assert_eq!(labels.len(), 5);
        assert!(labels.iter().all(Label::is_final));
        assert_eq!(labels[1], Label::Signature(1));
    }
}
