//! MethodSemantics table support.
//!
//! The MethodSemantics table (ID 0x18) links properties and events to the methods that implement
//! them: getters and setters, adders and removers. Each link is carried on the owning
//! [`crate::metadata::tables::PropertyRow`] or [`crate::metadata::tables::EventRow`] as a
//! [`MethodSemanticsLink`].

use crate::metadata::tables::MethodDef;

#[allow(non_snake_case)]
/// All possible flags for `MethodSemanticsAttributes`
pub mod MethodSemanticsAttributes {
    /// Setter for property
    pub const SETTER: u32 = 0x0001;
    /// Getter for property
    pub const GETTER: u32 = 0x0002;
    /// Other method for property or event
    pub const OTHER: u32 = 0x0004;
    /// `AddOn` method for event
    pub const ADD_ON: u32 = 0x0008;
    /// `RemoveOn` method for event
    pub const REMOVE_ON: u32 = 0x0010;
    /// Fire method for event
    pub const FIRE: u32 = 0x0020;
}

/// One method-semantics link of a property or event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodSemanticsLink {
    /// A 2-byte bitmask of [`MethodSemanticsAttributes`]
    pub semantics: u32,
    /// The linked accessor
    pub method: MethodDef,
}

impl MethodSemanticsLink {
    /// Creates a link
    #[must_use]
    pub fn new(semantics: u32, method: MethodDef) -> Self {
        MethodSemanticsLink { semantics, method }
    }

    /// Link marks a property getter
    #[must_use]
    pub fn is_getter(&self) -> bool {
        self.semantics & MethodSemanticsAttributes::GETTER != 0
    }

    /// Link marks a property setter
    #[must_use]
    pub fn is_setter(&self) -> bool {
        self.semantics & MethodSemanticsAttributes::SETTER != 0
    }

    /// Link marks an event adder
    #[must_use]
    pub fn is_add_on(&self) -> bool {
        self.semantics & MethodSemanticsAttributes::ADD_ON != 0
    }

    /// Link marks an event remover
    #[must_use]
    pub fn is_remove_on(&self) -> bool {
        self.semantics & MethodSemanticsAttributes::REMOVE_ON != 0
    }
}
