//! TypeRef table support.
//!
//! The TypeRef table (ID 0x01) names types defined outside the current metadata scope. The
//! projection core resolves them by namespace and name against the store.
//!
//! **Table ID**: `0x01`

use std::sync::Arc;

use crate::metadata::{
    tables::{qualified_name, TypeRef},
    token::Token,
};

/// A reference to a `TypeRefRow`
pub type TypeRefRc = Arc<TypeRefRow>;

/// A reference to a type by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRefRow {
    /// The token of this row
    pub token: Token,
    /// `TypeNamespace`
    pub namespace: String,
    /// `TypeName`
    pub name: String,
}

impl TypeRefRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> TypeRef {
        TypeRef::new(self.token.row())
    }

    /// Returns the full name (Namespace.Name) of the referenced type
    #[must_use]
    pub fn fullname(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }

    /// True if namespace and name both match
    #[must_use]
    pub fn is_named(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }
}
