//! TypeSpec table support.
//!
//! The TypeSpec table (ID 0x1B) holds signatures for constructed types. In projection metadata
//! every TypeSpec is a generic instantiation (`GENERICINST`) of an interface or delegate.
//!
//! **Table ID**: `0x1B`

use std::sync::Arc;

use crate::metadata::{signatures::SignatureTypeSpec, tables::TypeSpec, token::Token};

/// A reference to a `TypeSpecRow`
pub type TypeSpecRc = Arc<TypeSpecRow>;

/// A constructed type signature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSpecRow {
    /// The token of this row
    pub token: Token,
    /// The decoded signature
    pub signature: SignatureTypeSpec,
}

impl TypeSpecRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> TypeSpec {
        TypeSpec::new(self.token.row())
    }
}
