//! Constants for the Newick parser.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, comment brackets
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Default guess for number of leaves, when unknown
pub(crate) const DEFAULT_NUM_LEAVES_GUESS: usize = 32;
