//! Property table support.
//!
//! The Property table (ID 0x17) declares properties; their accessors are attached through
//! method-semantics links.
//!
//! **Table ID**: `0x17`

use std::sync::Arc;

use crate::metadata::{
    tables::{MethodSemanticsLink, Property},
    token::Token,
};

/// A reference to a `PropertyRow`
pub type PropertyRc = Arc<PropertyRow>;

/// A property declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyRow {
    /// The token of this row
    pub token: Token,
    /// Name of the property
    pub name: String,
    /// Accessor links, in table order
    pub semantics: Vec<MethodSemanticsLink>,
}

impl PropertyRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> Property {
        Property::new(self.token.row())
    }
}
