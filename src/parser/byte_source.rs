//! Byte source abstraction for the parser.
//!
//! This module provides the [ByteSource] trait, which decouples
//! [ByteParser](crate::parser::ByteParser) from how bytes are held.

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface of byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// Tree files handled by this crate hold a single tree each and are read
/// fully into memory, see
/// [InMemoryByteSource](crate::parser::in_memory_byte_source::InMemoryByteSource).
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns up to `k` bytes from the current position for error context.
    fn get_context(&self, k: usize) -> Vec<u8>;

    /// Returns the current byte offset.
    fn position(&self) -> usize;

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}
