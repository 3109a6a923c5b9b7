//! TypeDef table support.
//!
//! The TypeDef table (ID 0x02) defines every type declared in the metadata: classes, interfaces,
//! structs, enums and delegates. A [`TypeDefRow`] carries the declaration itself together with
//! the member, interface-implementation and custom-attribute lists that the raw table format
//! spreads over `FieldList`/`MethodList` ranges and the `PropertyMap`, `EventMap`,
//! `InterfaceImpl`, `GenericParam` and `CustomAttribute` tables.
//!
//! ## ECMA-335 Reference
//!
//! See ECMA-335, Partition II, Section 22.37 for the TypeDef table specification.
//!
//! **Table ID**: `0x02`

use std::sync::Arc;

use crate::metadata::{
    tables::{
        qualified_name, CustomAttribute, Event, Field, MethodDef, Property, TypeDef, TypeDefOrRef,
    },
    token::Token,
};

/// A reference to a `TypeDefRow`
pub type TypeDefRc = Arc<TypeDefRow>;

#[allow(non_snake_case)]
/// Type attribute flag constants for TypeDef entries (II.23.1.15).
///
/// Only the flags the projection rules look at are listed; the remaining bits are carried in
/// [`TypeDefRow::flags`] untouched.
pub mod TypeAttributes {
    /// Mask for extracting type visibility information.
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;

    /// Type has public scope (visible outside assembly).
    pub const PUBLIC: u32 = 0x0000_0001;

    /// Mask for extracting class semantics information.
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;

    /// Type is a class (reference or value type).
    pub const CLASS: u32 = 0x0000_0000;

    /// Type is an interface definition.
    pub const INTERFACE: u32 = 0x0000_0020;

    /// Class is abstract and cannot be instantiated directly.
    ///
    /// For runtime classes this marks a static class.
    pub const ABSTRACT: u32 = 0x0000_0080;

    /// Class is sealed and cannot be inherited from.
    pub const SEALED: u32 = 0x0000_0100;

    /// Class name is special.
    pub const SPECIAL_NAME: u32 = 0x0000_0400;

    /// Class is imported.
    pub const IMPORT: u32 = 0x0000_1000;

    /// Type is a Windows Runtime type.
    pub const WINDOWS_RUNTIME: u32 = 0x0000_4000;
}

/// A type declaration, with its members and attribute links
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDefRow {
    /// The token of this row
    pub token: Token,
    /// `TypeNamespace` (can be empty)
    pub namespace: String,
    /// `TypeName`, including the generic arity suffix (e.g. ``IVector`1``)
    pub name: String,
    /// A 4-byte bitmask of type [`TypeAttributes`]
    pub flags: u32,
    /// Base type, absent for interfaces and `System.Object`
    pub extends: Option<TypeDefOrRef>,
    /// Names of the generic parameters, in declaration order
    pub generic_params: Vec<String>,
    /// Directly implemented (or, for interfaces, required) interfaces, in declaration order
    pub interfaces: Vec<TypeDefOrRef>,
    /// Methods, in declaration order
    pub methods: Vec<MethodDef>,
    /// Fields, in declaration order
    pub fields: Vec<Field>,
    /// Properties, in declaration order
    pub properties: Vec<Property>,
    /// Events, in declaration order
    pub events: Vec<Event>,
    /// Custom attributes attached to this type
    pub custom_attributes: Vec<CustomAttribute>,
}

impl TypeDefRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> TypeDef {
        TypeDef::new(self.token.row())
    }

    /// Returns the full name (Namespace.Name) of the type
    #[must_use]
    pub fn fullname(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }

    /// True if the class-semantics bits mark an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags & TypeAttributes::CLASS_SEMANTICS_MASK == TypeAttributes::INTERFACE
    }

    /// True if the abstract flag is set
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags & TypeAttributes::ABSTRACT != 0
    }

    /// True if the type declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// True if namespace and name both match
    #[must_use]
    pub fn is_named(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::token::TableId;

    #[test]
    fn flags_and_names() {
        let row = TypeDefRow {
            token: Token::from_parts(TableId::TYPE_DEF, 3),
            namespace: "Windows.Foundation.Collections".to_string(),
            name: "IVector`1".to_string(),
            flags: TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
            generic_params: vec!["T".to_string()],
            ..Default::default()
        };

        assert_eq!(row.handle(), TypeDef::new(3));
        assert_eq!(row.fullname(), "Windows.Foundation.Collections.IVector`1");
        assert!(row.is_interface());
        assert!(row.is_abstract());
        assert!(row.is_generic());
        assert!(row.is_named("Windows.Foundation.Collections", "IVector`1"));
        assert!(!row.is_named("Windows.Foundation", "IVector`1"));
    }

    #[test]
    fn class_is_not_interface() {
        let row = TypeDefRow {
            flags: TypeAttributes::PUBLIC | TypeAttributes::SEALED,
            ..Default::default()
        };
        assert!(!row.is_interface());
        assert!(!row.is_abstract());
    }
}
