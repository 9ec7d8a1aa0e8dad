//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses single
//! rooted trees with arbitrary vertex degrees.

use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::PhyloTreeBuilder;
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format rooted phylogenetic trees.
///
/// Generic over [TreeBuilder] (construction).
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`default()`](Self::default) - uses [PhyloTreeBuilder]
///
/// # Parsing
/// * [`parse_tree`](Self::parse_tree) - Parse the next tree, leaving the
///   byte parser right after its `;`
/// * [`parse_single`](Self::parse_single) - Parse input holding exactly one tree
///
/// # Example
/// ```
/// use cladesort::newick::NewickParser;
/// use cladesort::parser::ByteParser;
///
/// let input = "((AFL:0.1,Aoli:0.2)98:0.05,(DEN:0.3,Dcio:0.1,Ddre:0.2)87:0.4);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::default().parse_single(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 5);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    know_num_leaves: bool,
    num_leaves: usize,
    tree_builder: T,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder.
    pub fn new(tree_builder: T) -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            tree_builder,
        }
    }

    /// Sets the expected number of leaves in each parsed tree.
    ///
    /// This allows pre-allocation of data structures for better performance.
    /// If not set, the parser counts leaves of the first tree and reuses
    /// that count as hint.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }
}

impl Default for NewickParser<PhyloTreeBuilder> {
    fn default() -> Self {
        Self::new(PhyloTreeBuilder::new())
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses input that holds exactly one Newick tree.
    ///
    /// Whitespace and `[...]` comments before and after the tree are fine.
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed tree
    /// * `Err(ParsingError)` - `EmptyInput` if there is no tree at all,
    ///   `TrailingContent` if anything follows the first tree,
    ///   or any error from [parse_tree](Self::parse_tree)
    pub fn parse_single<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        self.parse_single_and_name(parser, None)
    }

    /// Like [parse_single](Self::parse_single), but gives the tree the provided name.
    pub fn parse_single_named<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree_name: String,
    ) -> Result<T::Tree, ParsingError> {
        self.parse_single_and_name(parser, Some(tree_name))
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        self.parse_tree_and_name(parser, None)
    }

    fn parse_single_and_name<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree_name: Option<String>,
    ) -> Result<T::Tree, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::empty_input(parser));
        }

        let tree = self.parse_tree_and_name(parser, tree_name)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::trailing_content(parser));
        }

        Ok(tree)
    }

    fn parse_tree_and_name<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        tree_name: Option<String>,
    ) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_leaves);

        if let Some(name) = tree_name {
            self.tree_builder.set_name(name);
        }

        // If number of leaves not known yet, reset it to 0,
        // so actual count can now be tracked
        if !self.know_num_leaves {
            self.num_leaves = 0;
        }

        self.parse_root(parser)?;
        self.know_num_leaves = true;

        self.tree_builder.finish_tree().ok_or_else(|| {
            ParsingError::invalid_newick_string(parser, "Tree without root".to_string())
        })
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses root of tree and adds it to tree:
    /// - `(child, ..., child)[label][:branch_length];`
    /// - Skips leading comments and whitespace
    /// - A bare leaf is not accepted as root
    fn parse_root<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.peek_is(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' at start of tree but found {:?}", next_char),
            ));
        }

        let children = self.parse_children(parser)?;
        let label = self.parse_internal_label(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        self.tree_builder.add_root(children, label, branch_length);

        Ok(())
    }

    /// Parses a comma-separated children list `(v1, ..., vk)`, `k >= 1`,
    /// including all nested subtrees, and returns the indices of the
    /// outermost children in input order:
    /// - Expects parser at opening `(`
    ///   (caller should skip leading comments/whitespace)
    /// - Nested internal vertices `(...)[label][:branch_length]` are added to
    ///   the tree as soon as their `)` is read
    ///
    /// Works with an explicit stack of open children lists, so nesting depth
    /// is bounded by memory rather than by the call stack.
    fn parse_children<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<T::VertexIdx>, ParsingError> {
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' before children but found {:?}", next_char),
            ));
        }

        // Children lists of all enclosing, still open vertices
        let mut open: Vec<Vec<T::VertexIdx>> = Vec::new();
        let mut children: Vec<T::VertexIdx> = Vec::new();

        loop {
            // Start of a vertex: either a nested '(' or a leaf
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(std::mem::take(&mut children));
                continue;
            }
            children.push(self.parse_leaf(parser)?);

            // Close as many vertices as there are ')' before the next ','
            loop {
                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    break;
                } else if parser.consume_if(b')') {
                    let closed = std::mem::take(&mut children);
                    let Some(parent_children) = open.pop() else {
                        return Ok(closed);
                    };
                    children = parent_children;
                    let label = self.parse_internal_label(parser)?;
                    let branch_length = self.parse_branch_length(parser)?;
                    children.push(self.tree_builder.add_internal(closed, label, branch_length));
                } else if parser.is_eof() {
                    return Err(ParsingError::unexpected_eof(parser));
                } else {
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", next_char),
                    ));
                }
            }
        }
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    ///   (caller should skip leading comments/whitespace)
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if name.is_empty() {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected leaf label but found {:?}", next_char),
            ));
        }
        let branch_length = self.parse_branch_length(parser)?;
        if !self.know_num_leaves {
            self.num_leaves += 1;
        }

        Ok(self.tree_builder.add_leaf(branch_length, name))
    }

    /// Parses optional label after the `)` of a root or internal vertex,
    /// such as a support value `)95:0.1` or a clade name `)'Arthrobotrys'`.
    ///
    /// # Returns
    /// - `Ok(None)` if no label follows
    fn parse_internal_label<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<String>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        match parser.peek() {
            None => Ok(None),
            Some(b) if NEWICK_LABEL_DELIMITERS.contains(&b) => Ok(None),
            Some(_) => {
                let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                Ok(Some(label).filter(|l| !l.is_empty()))
            }
        }
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        branch_length_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::new)
            .map(Some)
            .ok_or_else(|| {
                ParsingError::invalid_newick_string(
                    parser,
                    format!("Invalid branch length: {:?}", branch_length_str),
                )
            })
    }
}
