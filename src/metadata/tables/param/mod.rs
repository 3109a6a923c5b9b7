//! Param table support.
//!
//! The Param table (ID 0x08) names method parameters and carries their direction flags. The row
//! with sequence 0, when present, describes the return value rather than a parameter.
//!
//! **Table ID**: `0x08`

use std::sync::Arc;

use crate::metadata::{tables::Param, token::Token};

/// A reference to a `ParamRow`
pub type ParamRc = Arc<ParamRow>;

#[allow(non_snake_case)]
/// All possible flags for `ParamAttributes`
pub mod ParamAttributes {
    /// Param is `In`
    pub const IN: u32 = 0x0001;
    /// Param is `Out`
    pub const OUT: u32 = 0x0002;
    /// Param is optional
    pub const OPTIONAL: u32 = 0x0010;
    /// Param has default value
    pub const HAS_DEFAULT: u32 = 0x1000;
    /// Param has `FieldMarshal`
    pub const HAS_FIELD_MARSHAL: u32 = 0x2000;
}

/// A parameter row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamRow {
    /// The token of this row
    pub token: Token,
    /// Name of the parameter
    pub name: String,
    /// A 2-byte bitmask of [`ParamAttributes`]
    pub flags: u32,
    /// Position in the signature; 0 is the return slot
    pub sequence: u32,
}

impl ParamRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> Param {
        Param::new(self.token.row())
    }

    /// The `In` flag is set
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// The `Out` flag is set
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }

    /// This row describes the return slot
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.sequence == 0
    }
}
