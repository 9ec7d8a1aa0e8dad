//! Loading a [Taxonomy] from a TOML file.
//!
//! ```toml
//! [taxa]
//! AFL = "Arthrobotrys"
//! DEN = "Dactylellina"
//! Dste = "Drechslerella"
//! ```

use crate::taxonomy::{Taxonomy, TaxonomyError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    taxa: BTreeMap<String, String>,
}

impl Taxonomy {
    /// Parses a taxonomy from TOML text with a `[taxa]` table.
    pub fn from_toml_str(content: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = toml::from_str(content)?;
        Self::new(file.taxa)
    }

    /// Reads and parses the TOML taxonomy file at `path`.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_taxa_table() {
        let taxonomy = Taxonomy::from_toml_str(
            r#"
            [taxa]
            x1 = "X"
            x2 = "X"
            y1 = "Y"
            "#,
        )
        .unwrap();
        assert_eq!(taxonomy.groups().collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_eq!(taxonomy.signatures().len(), 1);
    }

    #[test]
    fn test_missing_table_is_error() {
        assert!(matches!(
            Taxonomy::from_toml_str("x1 = \"X\""),
            Err(TaxonomyError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Taxonomy::from_toml_file("/nonexistent/taxonomy.toml").unwrap_err();
        assert!(matches!(err, TaxonomyError::Io { .. }));
    }
}
