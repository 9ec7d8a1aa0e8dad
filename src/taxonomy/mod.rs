//! Taxon to group registry and the pairwise group signatures derived from it.
//!
//! A [Taxonomy] is built once from a table mapping each taxon (leaf name) to
//! its group (genus), and is read-only afterwards. It provides:
//! * the distinct groups in sorted order,
//! * the taxon set of each group,
//! * one [Signature] per unordered pair of groups, numbered from 1 in
//!   lexicographic order of the `(smaller, larger)` group name pairs.
//!
//! For the three genera of the default table this yields
//! `1 = Arthrobotrys ∪ Dactylellina`, `2 = Arthrobotrys ∪ Drechslerella`,
//! `3 = Dactylellina ∪ Drechslerella`.

mod config;
mod defaults;

use crate::model::LeafSet;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while building or loading a [Taxonomy].
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("taxonomy table is empty")]
    Empty,
    #[error("taxonomy table contains an empty taxon name")]
    EmptyTaxonName,
    #[error("taxon '{0}' is assigned an empty group name")]
    EmptyGroupName(String),
    #[error("taxonomy needs at least two groups, found {0}")]
    TooFewGroups(usize),
    #[error("failed to read taxonomy file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid taxonomy file: {0}")]
    Toml(#[from] toml::de::Error),
}

// =#========================================================================#=
// SIGNATURE
// =#========================================================================#=
/// Union of the taxa of two groups, tagged with its position in the
/// enumeration order (starting at 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    index: usize,
    groups: (String, String),
    taxa: LeafSet,
}

impl Signature {
    /// Position of this signature in the enumeration order, starting at 1.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The two merged groups, smaller name first.
    pub fn groups(&self) -> (&str, &str) {
        (&self.groups.0, &self.groups.1)
    }

    /// All taxa of both groups.
    pub fn taxa(&self) -> &LeafSet {
        &self.taxa
    }
}

// =#========================================================================#=
// TAXONOMY
// =#========================================================================#=
/// Immutable registry of taxa, their groups, and the derived signatures.
///
/// # Example
/// ```
/// use cladesort::taxonomy::Taxonomy;
///
/// let taxonomy = Taxonomy::from_pairs([
///     ("x1", "X"), ("x2", "X"),
///     ("y1", "Y"), ("y2", "Y"),
///     ("z1", "Z"), ("z2", "Z"),
/// ]).unwrap();
///
/// let pairs: Vec<_> = taxonomy.signatures().iter().map(|s| s.groups()).collect();
/// assert_eq!(pairs, vec![("X", "Y"), ("X", "Z"), ("Y", "Z")]);
/// ```
#[derive(Debug, Clone)]
pub struct Taxonomy {
    groups: BTreeMap<String, LeafSet>,
    signatures: Vec<Signature>,
}

impl Taxonomy {
    /// Builds a taxonomy from a taxon → group table.
    ///
    /// # Errors
    /// * [TaxonomyError::Empty] if the table has no entries
    /// * [TaxonomyError::EmptyTaxonName] or [TaxonomyError::EmptyGroupName]
    ///   for blank names
    /// * [TaxonomyError::TooFewGroups] if fewer than two groups result
    pub fn new(taxa: BTreeMap<String, String>) -> Result<Self, TaxonomyError> {
        if taxa.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut groups: BTreeMap<String, LeafSet> = BTreeMap::new();
        for (taxon, group) in taxa {
            if taxon.is_empty() {
                return Err(TaxonomyError::EmptyTaxonName);
            }
            if group.is_empty() {
                return Err(TaxonomyError::EmptyGroupName(taxon));
            }
            groups.entry(group).or_default().insert(taxon);
        }

        if groups.len() < 2 {
            return Err(TaxonomyError::TooFewGroups(groups.len()));
        }

        let signatures = Self::enumerate_signatures(&groups);
        Ok(Self { groups, signatures })
    }

    /// Builds a taxonomy from `(taxon, group)` pairs.
    ///
    /// A taxon listed twice keeps its last group.
    pub fn from_pairs<I, T, G>(pairs: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(t, g)| (t.into(), g.into()))
                .collect(),
        )
    }

    /// Pairs `(a, b)` with `a < b`, in lexicographic order.
    fn enumerate_signatures(groups: &BTreeMap<String, LeafSet>) -> Vec<Signature> {
        let entries: Vec<(&String, &LeafSet)> = groups.iter().collect();
        let mut signatures = Vec::with_capacity(entries.len() * (entries.len() - 1) / 2);
        for (i, (first, first_taxa)) in entries.iter().enumerate() {
            for (second, second_taxa) in &entries[i + 1..] {
                signatures.push(Signature {
                    index: signatures.len() + 1,
                    groups: ((*first).clone(), (*second).clone()),
                    taxa: first_taxa.union(second_taxa).cloned().collect(),
                });
            }
        }
        signatures
    }

    /// Group names in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Taxa of `group`, or `None` for an unknown group.
    pub fn members(&self, group: &str) -> Option<&LeafSet> {
        self.groups.get(group)
    }

    /// Groups with their taxa, in sorted group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafSet)> {
        self.groups.iter().map(|(g, t)| (g.as_str(), t))
    }

    /// Group of `taxon`, or `None` if the taxon is not registered.
    pub fn group_of(&self, taxon: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, taxa)| taxa.contains(taxon))
            .map(|(g, _)| g.as_str())
    }

    /// Pairwise union signatures in enumeration order.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Total number of registered taxa.
    pub fn num_taxa(&self) -> usize {
        self.groups.values().map(|t| t.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_tables() {
        assert!(matches!(
            Taxonomy::new(BTreeMap::new()),
            Err(TaxonomyError::Empty)
        ));
        assert!(matches!(
            Taxonomy::from_pairs([("a", "A"), ("b", "A")]),
            Err(TaxonomyError::TooFewGroups(1))
        ));
        assert!(matches!(
            Taxonomy::from_pairs([("a", "A"), ("", "B")]),
            Err(TaxonomyError::EmptyTaxonName)
        ));
        assert!(matches!(
            Taxonomy::from_pairs([("a", "A"), ("b", "")]),
            Err(TaxonomyError::EmptyGroupName(t)) if t == "b"
        ));
    }

    #[test]
    fn test_signature_count_for_four_groups() {
        let taxonomy =
            Taxonomy::from_pairs([("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")]).unwrap();
        let signatures = taxonomy.signatures();
        assert_eq!(signatures.len(), 6);
        assert_eq!(signatures[0].groups(), ("A", "B"));
        assert_eq!(signatures[5].groups(), ("C", "D"));
        assert_eq!(signatures[5].index(), 6);
    }

    #[test]
    fn test_signature_taxa_are_unions() {
        let taxonomy =
            Taxonomy::from_pairs([("x1", "X"), ("x2", "X"), ("y1", "Y"), ("z1", "Z")]).unwrap();
        let xz = &taxonomy.signatures()[1];
        let expected: LeafSet = ["x1", "x2", "z1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(xz.taxa(), &expected);
        assert_eq!(taxonomy.group_of("z1"), Some("Z"));
        assert_eq!(taxonomy.group_of("w"), None);
    }
}
