//! Newick format parser for rooted phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into tree structures. The parser uses a [`TreeBuilder`](crate::model::TreeBuilder)
//! internally, so other tree representations can reuse it.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file holding exactly one tree, named after the file
//! * [`parse_str`] - parses a string holding exactly one tree
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Labels may be single-quoted, with `''` standing for a literal quote
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Comments are square brackets and can occur anywhere where whitespace is allowed;
//!   extended Newick annotations like `[&support=0.9]` are treated as comments
//! * Labels of internal vertices (e.g. support values) are kept, but not interpreted

mod defs;
mod parser;

pub use self::parser::NewickParser;

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file holding exactly one tree.
///
/// The returned tree is named after the file name of `path`.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [`PhyloTree`] - Tree parsed from the file
/// * [`ParsingError`] - If file reading fails, the file is empty,
///   holds more than one tree, or the Newick format is invalid
///
/// # Example
/// ```ignore
/// use cladesort::newick::parse_file;
///
/// let tree = parse_file("OG0001234.nwk")?;
/// println!("{} has {} leaves", tree.name().unwrap_or("?"), tree.num_leaves());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    let path = path.as_ref();
    let mut byte_parser = ByteParser::from_file(path)?;
    let mut newick_parser = NewickParser::default();
    match path.file_name() {
        Some(name) => newick_parser
            .parse_single_named(&mut byte_parser, name.to_string_lossy().into_owned()),
        None => newick_parser.parse_single(&mut byte_parser),
    }
}

/// Parses a string holding exactly one Newick tree.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [`PhyloTree`] - Tree parsed from the string
/// * [`ParsingError`] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use cladesort::newick::parse_str;
///
/// let tree = parse_str("((AFL,Aoli),(Dste,Ddac));").unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::default().parse_single(&mut byte_parser)
}
