//! Field table support.
//!
//! The Field table (ID 0x04) declares the fields of structs and the named constants of enums.
//!
//! **Table ID**: `0x04`

use std::sync::Arc;

use crate::metadata::{
    signatures::SignatureField,
    tables::{Field, TypeDef},
    token::Token,
};

/// A reference to a `FieldRow`
pub type FieldRc = Arc<FieldRow>;

#[allow(non_snake_case)]
/// Field attribute flags the projection rules look at
pub mod FieldAttributes {
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// CLI provides 'special' behavior, depending upon the name of the field
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRow {
    /// The token of this row
    pub token: Token,
    /// Type declaring this field
    pub parent: Option<TypeDef>,
    /// Name of the field
    pub name: String,
    /// A 2-byte bitmask of [`FieldAttributes`]
    pub flags: u32,
    /// The decoded field signature
    pub signature: SignatureField,
}

impl FieldRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> Field {
        Field::new(self.token.row())
    }

    /// Field is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Field is an enum's `value__` backing field
    #[must_use]
    pub fn is_rt_special_name(&self) -> bool {
        self.flags & FieldAttributes::RTSPECIAL_NAME != 0
    }
}
