//! The resolved representation of a type usage.
//!
//! [`TypeSemantics`] is what every signature, coded reference and field type resolves to. It is a
//! closed set: fundamental value types, `Object`, `Guid`, a concrete type definition, a generic
//! instantiation, or a still-open generic parameter position.

use std::fmt::Write;

use strum::{Display, EnumCount, EnumIter};

use crate::{
    metadata::{
        signatures::{TypeSignature, ELEMENT_TYPE},
        store::MetadataStore,
        tables::TypeDef,
    },
    Result,
};

/// The 13 fundamental value kinds a signature element can name directly
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, Display,
)]
pub enum FundamentalType {
    /// `bool`
    Boolean,
    /// UTF-16 code unit
    Char,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// Immutable string
    String,
}

impl FundamentalType {
    /// Maps an element type tag to its fundamental kind
    #[must_use]
    pub fn from_element_type(tag: u8) -> Option<Self> {
        let kind = match tag {
            ELEMENT_TYPE::BOOLEAN => FundamentalType::Boolean,
            ELEMENT_TYPE::CHAR => FundamentalType::Char,
            ELEMENT_TYPE::I1 => FundamentalType::Int8,
            ELEMENT_TYPE::U1 => FundamentalType::UInt8,
            ELEMENT_TYPE::I2 => FundamentalType::Int16,
            ELEMENT_TYPE::U2 => FundamentalType::UInt16,
            ELEMENT_TYPE::I4 => FundamentalType::Int32,
            ELEMENT_TYPE::U4 => FundamentalType::UInt32,
            ELEMENT_TYPE::I8 => FundamentalType::Int64,
            ELEMENT_TYPE::U8 => FundamentalType::UInt64,
            ELEMENT_TYPE::R4 => FundamentalType::Float,
            ELEMENT_TYPE::R8 => FundamentalType::Double,
            ELEMENT_TYPE::STRING => FundamentalType::String,
            _ => return None,
        };
        Some(kind)
    }

    /// The element type tag of this kind
    #[must_use]
    pub fn element_type(self) -> u8 {
        match self {
            FundamentalType::Boolean => ELEMENT_TYPE::BOOLEAN,
            FundamentalType::Char => ELEMENT_TYPE::CHAR,
            FundamentalType::Int8 => ELEMENT_TYPE::I1,
            FundamentalType::UInt8 => ELEMENT_TYPE::U1,
            FundamentalType::Int16 => ELEMENT_TYPE::I2,
            FundamentalType::UInt16 => ELEMENT_TYPE::U2,
            FundamentalType::Int32 => ELEMENT_TYPE::I4,
            FundamentalType::UInt32 => ELEMENT_TYPE::U4,
            FundamentalType::Int64 => ELEMENT_TYPE::I8,
            FundamentalType::UInt64 => ELEMENT_TYPE::U8,
            FundamentalType::Float => ELEMENT_TYPE::R4,
            FundamentalType::Double => ELEMENT_TYPE::R8,
            FundamentalType::String => ELEMENT_TYPE::STRING,
        }
    }

    /// The kind named by a signature, if it is one of the fundamental elements
    #[must_use]
    pub fn from_signature(signature: &TypeSignature) -> Option<Self> {
        signature
            .element_type()
            .and_then(FundamentalType::from_element_type)
    }

    /// The signature element spelling this kind
    #[must_use]
    pub fn signature(self) -> TypeSignature {
        match self {
            FundamentalType::Boolean => TypeSignature::Boolean,
            FundamentalType::Char => TypeSignature::Char,
            FundamentalType::Int8 => TypeSignature::I1,
            FundamentalType::UInt8 => TypeSignature::U1,
            FundamentalType::Int16 => TypeSignature::I2,
            FundamentalType::UInt16 => TypeSignature::U2,
            FundamentalType::Int32 => TypeSignature::I4,
            FundamentalType::UInt32 => TypeSignature::U4,
            FundamentalType::Int64 => TypeSignature::I8,
            FundamentalType::UInt64 => TypeSignature::U8,
            FundamentalType::Float => TypeSignature::R4,
            FundamentalType::Double => TypeSignature::R8,
            FundamentalType::String => TypeSignature::String,
        }
    }
}

/// The resolved, canonical form of a type usage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSemantics {
    /// A fundamental value kind
    Fundamental(FundamentalType),
    /// The universal opaque reference type
    Object,
    /// `System.Guid`, a value type spelled as a reference in metadata
    Guid,
    /// A concrete declared type
    TypeDefinition(TypeDef),
    /// A generic type applied to arguments, which may be instances or indices themselves
    GenericTypeInstance {
        /// The generic type definition
        generic_type: TypeDef,
        /// The arguments, in parameter order
        generic_args: Vec<TypeSemantics>,
    },
    /// An open generic parameter position of the enclosing definition
    GenericTypeIndex(u32),
}

impl TypeSemantics {
    /// The type definition behind a definition or an instance
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadata`] for fundamentals, `Object`, `Guid` and indices.
    pub fn typedef(&self) -> Result<TypeDef> {
        match self {
            TypeSemantics::TypeDefinition(type_def) => Ok(*type_def),
            TypeSemantics::GenericTypeInstance { generic_type, .. } => Ok(*generic_type),
            other => Err(malformed_error!("Type {:?} doesn't contain a typedef", other)),
        }
    }

    /// Arguments of a generic instance; empty for everything else
    #[must_use]
    pub fn generic_args(&self) -> &[TypeSemantics] {
        match self {
            TypeSemantics::GenericTypeInstance { generic_args, .. } => generic_args,
            _ => &[],
        }
    }

    /// True for an open generic parameter position
    #[must_use]
    pub fn is_generic_index(&self) -> bool {
        matches!(self, TypeSemantics::GenericTypeIndex(_))
    }

    /// True if an open generic parameter position occurs anywhere inside
    #[must_use]
    pub fn has_generic_index(&self) -> bool {
        match self {
            TypeSemantics::GenericTypeIndex(_) => true,
            TypeSemantics::GenericTypeInstance { generic_args, .. } => {
                generic_args.iter().any(TypeSemantics::has_generic_index)
            }
            _ => false,
        }
    }

    /// Replaces open generic positions with the matching entry of `args`
    ///
    /// Positions beyond `args` stay open.
    #[must_use]
    pub fn substitute(&self, args: &[TypeSemantics]) -> TypeSemantics {
        match self {
            TypeSemantics::GenericTypeIndex(index) => usize::try_from(*index)
                .ok()
                .and_then(|index| args.get(index))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeSemantics::GenericTypeInstance {
                generic_type,
                generic_args,
            } => TypeSemantics::GenericTypeInstance {
                generic_type: *generic_type,
                generic_args: generic_args
                    .iter()
                    .map(|arg| arg.substitute(args))
                    .collect(),
            },
            other => other.clone(),
        }
    }

    /// Renders a descriptor such as ``Windows.Foundation.IReference`1<Int32>``
    ///
    /// Open positions render as the matching name of `generic_params`, or `T{index}` if the
    /// enclosing definition is unknown.
    ///
    /// # Errors
    /// Returns [`crate::Error::RowNotFound`] if a referenced type has no row.
    pub fn render(&self, store: &dyn MetadataStore, generic_params: &[String]) -> Result<String> {
        let mut out = String::new();
        self.render_into(store, generic_params, &mut out)?;
        Ok(out)
    }

    fn render_into(
        &self,
        store: &dyn MetadataStore,
        generic_params: &[String],
        out: &mut String,
    ) -> Result<()> {
        match self {
            TypeSemantics::Fundamental(kind) => {
                let _ = write!(out, "{kind}");
            }
            TypeSemantics::Object => out.push_str("Object"),
            TypeSemantics::Guid => out.push_str("Guid"),
            TypeSemantics::TypeDefinition(type_def) => {
                out.push_str(&store.type_def(*type_def)?.fullname());
            }
            TypeSemantics::GenericTypeInstance {
                generic_type,
                generic_args,
            } => {
                out.push_str(&store.type_def(*generic_type)?.fullname());
                out.push('<');
                for (position, arg) in generic_args.iter().enumerate() {
                    if position > 0 {
                        out.push_str(", ");
                    }
                    arg.render_into(store, generic_params, out)?;
                }
                out.push('>');
            }
            TypeSemantics::GenericTypeIndex(index) => {
                match usize::try_from(*index)
                    .ok()
                    .and_then(|index| generic_params.get(index))
                {
                    Some(name) => out.push_str(name),
                    None => {
                        let _ = write!(out, "T{index}");
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<FundamentalType> for TypeSemantics {
    fn from(kind: FundamentalType) -> Self {
        TypeSemantics::Fundamental(kind)
    }
}

impl From<TypeDef> for TypeSemantics {
    fn from(type_def: TypeDef) -> Self {
        TypeSemantics::TypeDefinition(type_def)
    }
}
