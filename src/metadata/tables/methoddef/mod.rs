//! MethodDef table support.
//!
//! The MethodDef table (ID 0x06) declares every method, including constructors and the accessor
//! methods that properties and events link to. A [`MethodDefRow`] carries the decoded signature
//! and the method's `Param` rows (whose first entry may be the return slot, sequence 0).
//!
//! **Table ID**: `0x06`

use std::sync::Arc;

use bitflags::bitflags;

use crate::metadata::{
    signatures::SignatureMethod,
    tables::{CustomAttribute, MethodDef, Param, TypeDef},
    token::Token,
};

/// A reference to a `MethodDefRow`
pub type MethodDefRc = Arc<MethodDefRow>;

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

/// Name of instance constructors
pub const CONSTRUCTOR_NAME: &str = ".ctor";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let modifiers = flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK;
        Self::from_bits_truncate(modifiers)
    }
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDefRow {
    /// The token of this row
    pub token: Token,
    /// Type declaring this method
    pub parent: Option<TypeDef>,
    /// Name of the method
    pub name: String,
    /// A 2-byte bitmask of `MethodAttributes` (II.23.1.10)
    pub flags: u32,
    /// The decoded method signature
    pub signature: SignatureMethod,
    /// `Param` rows, ordered by sequence; sequence 0 is the return slot when present
    pub params: Vec<Param>,
    /// Custom attributes attached to this method
    pub custom_attributes: Vec<CustomAttribute>,
}

impl MethodDefRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> MethodDef {
        MethodDef::new(self.token.row())
    }

    /// Decoded modifier flags
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Method is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Method name is special (accessors, constructors)
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.modifiers().contains(MethodModifiers::SPECIAL_NAME)
    }

    /// Method name is reserved by the runtime
    #[must_use]
    pub fn is_rt_special_name(&self) -> bool {
        self.modifiers().contains(MethodModifiers::RTSPECIAL_NAME)
    }

    /// Runtime-reserved `.ctor`
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.is_rt_special_name() && self.name == CONSTRUCTOR_NAME
    }
}
