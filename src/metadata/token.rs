//! Metadata tokens and the table identifiers used by projection handles.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Table identifiers (high byte of a [`Token`]) for every table a projection handle can point into.
#[allow(non_snake_case)]
pub mod TableId {
    /// `TypeRef` table
    pub const TYPE_REF: u8 = 0x01;
    /// `TypeDef` table
    pub const TYPE_DEF: u8 = 0x02;
    /// `Field` table
    pub const FIELD: u8 = 0x04;
    /// `MethodDef` table
    pub const METHOD_DEF: u8 = 0x06;
    /// `Param` table
    pub const PARAM: u8 = 0x08;
    /// `CustomAttribute` table
    pub const CUSTOM_ATTRIBUTE: u8 = 0x0C;
    /// `Event` table
    pub const EVENT: u8 = 0x14;
    /// `Property` table
    pub const PROPERTY: u8 = 0x17;
    /// `TypeSpec` table
    pub const TYPE_SPEC: u8 = 0x1B;
}

/// A metadata token representing a reference to a metadata table entry.
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the table type
/// - The low 24 bits (bits 0-23) indicate the row index within that table
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table identifier and a 1-based row index
    ///
    /// ## Arguments
    /// * 'table' - One of the [`TableId`] constants
    /// * 'row'   - Row index, only the low 24 bits are kept
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_from_parts() {
        let token = Token::from_parts(TableId::METHOD_DEF, 12);
        assert_eq!(token.value(), 0x0600_000C);
        assert_eq!(token.table(), TableId::METHOD_DEF);
        assert_eq!(token.row(), 12);
    }

    #[test]
    fn test_token_from_parts_truncates_row() {
        let token = Token::from_parts(TableId::TYPE_SPEC, 0x0100_0002);
        assert_eq!(token.table(), TableId::TYPE_SPEC);
        assert_eq!(token.row(), 2);
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token(0).is_null());
        assert!(Token::default().is_null());
        assert!(!Token::from_parts(TableId::TYPE_DEF, 1).is_null());
    }

    #[test]
    fn test_token_display_and_debug() {
        let token = Token::from_parts(TableId::TYPE_REF, 5);
        assert_eq!(format!("{token}"), "0x01000005");

        let debug_str = format!("{token:?}");
        assert!(debug_str.contains("table: 0x01"));
        assert!(debug_str.contains("row: 5"));
    }

    #[test]
    fn test_token_identity_across_tables() {
        let mut seen = HashSet::new();
        for table in [
            TableId::TYPE_REF,
            TableId::TYPE_DEF,
            TableId::FIELD,
            TableId::METHOD_DEF,
            TableId::PARAM,
            TableId::CUSTOM_ATTRIBUTE,
            TableId::EVENT,
            TableId::PROPERTY,
            TableId::TYPE_SPEC,
        ] {
            assert!(seen.insert(Token::from_parts(table, 1)));
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_token_ordering_follows_table_then_row() {
        let a = Token::from_parts(TableId::TYPE_DEF, 2);
        let b = Token::from_parts(TableId::TYPE_DEF, 3);
        let c = Token::from_parts(TableId::FIELD, 1);
        assert!(a < b);
        assert!(b < c);
    }
}
