//! Metadata table rows and handles consumed by the projection core.
//!
//! Every table the core reads is exposed through two pieces:
//! - A `Copy` handle ([`TypeDef`], [`MethodDef`], ...) wrapping the row's [`Token`]. Handles are
//!   opaque identities; they are compared, hashed and passed around, never dereferenced directly.
//! - An owned row (`TypeDefRow`, `MethodDefRow`, ...) that the [`crate::metadata::store::MetadataStore`]
//!   hands out as a shared `Arc` (`TypeDefRc`, ...).
//!
//! [`TypeDefOrRef`] is the coded reference used by signatures, base types and interface
//! implementations.

use std::fmt;

use crate::{
    metadata::token::{TableId, Token},
    Result,
};

mod customattribute;
mod event;
mod field;
mod methoddef;
mod methodsemantics;
mod param;
mod property;
mod typedef;
mod typeref;
mod typespec;

pub use customattribute::*;
pub use event::*;
pub use field::*;
pub use methoddef::*;
pub use methodsemantics::*;
pub use param::*;
pub use property::*;
pub use typedef::*;
pub use typeref::*;
pub use typespec::*;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $table:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Token);

        impl $name {
            /// Table this handle points into
            pub const TABLE: u8 = $table;

            /// Creates a handle for the given 1-based row
            #[must_use]
            pub fn new(row: u32) -> Self {
                $name(Token::from_parts($table, row))
            }

            /// Wraps a token, checking that it points into the right table
            ///
            /// # Errors
            /// Returns [`crate::Error::InvalidMetadata`] if the token belongs to another table.
            pub fn from_token(token: Token) -> Result<Self> {
                if token.table() == $table && token.row() != 0 {
                    Ok($name(token))
                } else {
                    Err(malformed_error!(
                        "Token {} is not a valid {} handle",
                        token,
                        stringify!($name)
                    ))
                }
            }

            /// The token backing this handle
            #[must_use]
            pub fn token(&self) -> Token {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for Token {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }
    };
}

handle!(
    /// A type declared in the metadata (class, interface, struct, enum or delegate)
    TypeDef,
    TableId::TYPE_DEF
);
handle!(
    /// A reference to a type defined elsewhere, resolved by name
    TypeRef,
    TableId::TYPE_REF
);
handle!(
    /// A reference to a generic instantiation
    TypeSpec,
    TableId::TYPE_SPEC
);
handle!(
    /// A method declared on a `TypeDef`
    MethodDef,
    TableId::METHOD_DEF
);
handle!(
    /// A field declared on a `TypeDef`
    Field,
    TableId::FIELD
);
handle!(
    /// A property declared on a `TypeDef`
    Property,
    TableId::PROPERTY
);
handle!(
    /// An event declared on a `TypeDef`
    Event,
    TableId::EVENT
);
handle!(
    /// A parameter row of a `MethodDef`, including the optional return slot
    Param,
    TableId::PARAM
);
handle!(
    /// A custom attribute attached to some owner
    CustomAttribute,
    TableId::CUSTOM_ATTRIBUTE
);

/// Coded reference to a defined type, an external type reference, or a generic instantiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDefOrRef {
    /// Points at a type defined in this metadata
    TypeDef(TypeDef),
    /// Points at a type defined elsewhere
    TypeRef(TypeRef),
    /// Points at a generic instantiation
    TypeSpec(TypeSpec),
}

impl TypeDefOrRef {
    /// Decodes a token into a coded reference
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadata`] if the token points into any other table.
    pub fn from_token(token: Token) -> Result<Self> {
        match token.table() {
            TableId::TYPE_DEF => Ok(TypeDefOrRef::TypeDef(TypeDef::from_token(token)?)),
            TableId::TYPE_REF => Ok(TypeDefOrRef::TypeRef(TypeRef::from_token(token)?)),
            TableId::TYPE_SPEC => Ok(TypeDefOrRef::TypeSpec(TypeSpec::from_token(token)?)),
            _ => Err(malformed_error!(
                "Token {} is not a TypeDefOrRef coded index",
                token
            )),
        }
    }

    /// The token of the referenced row
    #[must_use]
    pub fn token(&self) -> Token {
        match self {
            TypeDefOrRef::TypeDef(handle) => handle.token(),
            TypeDefOrRef::TypeRef(handle) => handle.token(),
            TypeDefOrRef::TypeSpec(handle) => handle.token(),
        }
    }
}

impl From<TypeDef> for TypeDefOrRef {
    fn from(handle: TypeDef) -> Self {
        TypeDefOrRef::TypeDef(handle)
    }
}

impl From<TypeRef> for TypeDefOrRef {
    fn from(handle: TypeRef) -> Self {
        TypeDefOrRef::TypeRef(handle)
    }
}

impl From<TypeSpec> for TypeDefOrRef {
    fn from(handle: TypeSpec) -> Self {
        TypeDefOrRef::TypeSpec(handle)
    }
}

/// Joins a namespace and a name the way diagnostics and lookups spell them
#[must_use]
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
