//! Output side of a batch run: label buckets and the summary CSV.
//!
//! Layout under the output base:
//! ```text
//! <output_base>/
//!   unclassified/   tree1/ ... treeK/   other/
//!   tree_classification_summary.csv
//! ```

use crate::batch::error::BatchError;
use crate::classify::Label;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default file name of the summary CSV.
pub const DEFAULT_SUMMARY_NAME: &str = "tree_classification_summary.csv";

/// Header row of the summary CSV.
const SUMMARY_HEADER: [&str; 2] = ["Tree File", "Classification"];

/// Line terminator of the summary CSV (RFC 4180).
const CSV_LINE_END: &str = "\r\n";

// =#========================================================================#=
// OUTPUT SINK
// =#========================================================================$=
/// Writes classified files into per-label bucket directories and the
/// summary CSV.
#[derive(Debug, Clone)]
pub struct OutputSink {
    base: PathBuf,
    summary_name: String,
}

impl OutputSink {
    /// Creates the output base and one bucket directory for every label in
    /// `labels`, including buckets that will stay empty.
    ///
    /// # Errors
    /// [BatchError::CreateOutput] if a directory cannot be created.
    pub fn create(
        base: &Path,
        summary_name: &str,
        labels: &[Label],
        create_buckets: bool,
    ) -> Result<Self, BatchError> {
        let create = |path: PathBuf| {
            fs::create_dir_all(&path).map_err(|source| BatchError::CreateOutput { path, source })
        };

        create(base.to_path_buf())?;
        let sink = Self {
            base: base.to_path_buf(),
            summary_name: summary_name.to_string(),
        };
        if create_buckets {
            for label in labels {
                create(sink.bucket_dir(*label))?;
            }
        }
        Ok(sink)
    }

    /// Directory holding the files labeled `label`.
    pub fn bucket_dir(&self, label: Label) -> PathBuf {
        self.base.join(label.to_string())
    }

    /// Path of the summary CSV.
    pub fn summary_path(&self) -> PathBuf {
        self.base.join(&self.summary_name)
    }

    /// Copies `source` into the bucket of `label`, keeping its file name.
    ///
    /// # Returns
    /// The path of the copy.
    pub fn copy_into_bucket(&self, source: &Path, label: Label) -> io::Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name")
        })?;
        let target = self.bucket_dir(label).join(file_name);
        fs::copy(source, &target)?;
        Ok(target)
    }

    /// Writes one row per file, in the (sorted) order of `labels`.
    ///
    /// # Errors
    /// [BatchError::WriteSummary] if the file cannot be written.
    pub fn write_summary(&self, labels: &BTreeMap<String, Label>) -> Result<PathBuf, BatchError> {
        let path = self.summary_path();
        write_summary_to(&path, labels).map_err(|source| BatchError::WriteSummary {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn write_summary_to(path: &Path, labels: &BTreeMap<String, Label>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, &SUMMARY_HEADER)?;
    for (file, label) in labels {
        write_row(&mut writer, &[file.as_str(), label.to_string().as_str()])?;
    }
    writer.flush()
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let row: Vec<Cow<str>> = fields.iter().map(|f| csv_field(f)).collect();
    write!(writer, "{}{}", row.join(","), CSV_LINE_END)
}

/// Quotes a CSV field if it contains a comma, a double quote or a line break;
/// inner double quotes are doubled.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("OG0001.nwk"), "OG0001.nwk");
        assert_eq!(csv_field("a,b.nwk"), "\"a,b.nwk\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_buckets_created_even_if_empty() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("out");
        let labels = Label::final_labels(3);
        let sink = OutputSink::create(&base, DEFAULT_SUMMARY_NAME, &labels, true).unwrap();
        for label in labels {
            assert!(sink.bucket_dir(label).is_dir(), "{}", label);
        }
        assert!(!base.join("tree").exists());
    }

    #[test]
    fn test_summary_rows() {
        let dir = TempDir::new().unwrap();
        let sink = OutputSink::create(dir.path(), "summary.csv", &[], false).unwrap();
        let mut labels = BTreeMap::new();
        labels.insert("b.nwk".to_string(), Label::Other);
        labels.insert("a,1.nwk".to_string(), Label::Signature(2));

        let path = sink.write_summary(&labels).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Tree File,Classification\r\n\"a,1.nwk\",tree2\r\nb.nwk,other\r\n"
        );
    }
}
