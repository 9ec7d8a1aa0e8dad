//! Built-in taxonomy of nematode-trapping fungi.

use crate::model::LeafSet;
use crate::taxonomy::Taxonomy;
use std::collections::BTreeMap;

/// Taxon abbreviation and genus of every species in the built-in table.
const NEMATODE_TRAPPING_FUNGI: &[(&str, &str)] = &[
    ("AFL", "Arthrobotrys"),
    ("Aoli", "Arthrobotrys"),
    ("Acon", "Arthrobotrys"),
    ("Airi", "Arthrobotrys"),
    ("Amus", "Arthrobotrys"),
    ("Apse", "Arthrobotrys"),
    ("Asin", "Arthrobotrys"),
    ("Asph", "Arthrobotrys"),
    ("Aver", "Arthrobotrys"),
    ("DEN", "Dactylellina"),
    ("Dcio", "Dactylellina"),
    ("Dcio1", "Dactylellina"),
    ("Dcio2", "Dactylellina"),
    ("Ddre", "Dactylellina"),
    ("Dhap", "Dactylellina"),
    ("Dlep", "Dactylellina"),
    ("Dpar", "Dactylellina"),
    ("Dque", "Dactylellina"),
    ("Dtib", "Dactylellina"),
    ("Dste", "Drechslerella"),
    ("Ddac", "Drechslerella"),
    ("Dcoe", "Drechslerella"),
    ("Dbro", "Drechslerella"),
];

impl Taxonomy {
    /// The 23 species of Arthrobotrys (9), Dactylellina (10) and Drechslerella (4).
    pub fn nematode_trapping_fungi() -> Self {
        let mut groups: BTreeMap<String, LeafSet> = BTreeMap::new();
        for (taxon, group) in NEMATODE_TRAPPING_FUNGI {
            groups
                .entry(group.to_string())
                .or_default()
                .insert(taxon.to_string());
        }
        let signatures = Self::enumerate_signatures(&groups);
        Self { groups, signatures }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::nematode_trapping_fungi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_sizes() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.num_taxa(), 23);
        assert_eq!(taxonomy.members("Arthrobotrys").map(|t| t.len()), Some(9));
        assert_eq!(taxonomy.members("Dactylellina").map(|t| t.len()), Some(10));
        assert_eq!(taxonomy.members("Drechslerella").map(|t| t.len()), Some(4));
    }

    #[test]
    fn test_default_signature_order() {
        let taxonomy = Taxonomy::default();
        let pairs: Vec<_> = taxonomy.signatures().iter().map(|s| s.groups()).collect();
        assert_eq!(
            pairs,
            vec![
                ("Arthrobotrys", "Dactylellina"),
                ("Arthrobotrys", "Drechslerella"),
                ("Dactylellina", "Drechslerella"),
            ]
        );
    }

    #[test]
    fn test_default_matches_validated_construction() {
        let validated = Taxonomy::from_pairs(NEMATODE_TRAPPING_FUNGI.iter().copied()).unwrap();
        assert_eq!(validated.signatures(), Taxonomy::default().signatures());
    }
}
