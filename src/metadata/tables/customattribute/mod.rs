//! CustomAttribute table support.
//!
//! The CustomAttribute table (ID 0x0C) attaches attribute instances to types, methods and other
//! owners. The store resolves each attribute's constructor to the attribute type's namespace and
//! name and decodes the value blob, so a [`CustomAttributeRow`] can be matched by name directly.
//!
//! **Table ID**: `0x0C`

use std::sync::Arc;

use crate::metadata::{
    customattributes::CustomAttributeValue,
    tables::{qualified_name, CustomAttribute},
    token::Token,
};

/// A reference to a `CustomAttributeRow`
pub type CustomAttributeRc = Arc<CustomAttributeRow>;

/// An attribute instance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomAttributeRow {
    /// The token of this row
    pub token: Token,
    /// Token of the entity the attribute is attached to
    pub parent: Token,
    /// Namespace of the attribute type
    pub type_namespace: String,
    /// Name of the attribute type
    pub type_name: String,
    /// The decoded value blob
    pub value: CustomAttributeValue,
}

impl CustomAttributeRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> CustomAttribute {
        CustomAttribute::new(self.token.row())
    }

    /// True if the attribute type has this namespace and name
    #[must_use]
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.type_namespace == namespace && self.type_name == name
    }

    /// Returns the full name (Namespace.Name) of the attribute type
    #[must_use]
    pub fn type_fullname(&self) -> String {
        qualified_name(&self.type_namespace, &self.type_name)
    }
}
