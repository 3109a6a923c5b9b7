use crate::metadata::token::Token;

/// Element type tags of the signature encoding (ECMA-335 II.23.1.16)
#[allow(non_snake_case, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Followed by type
    pub const PTR: u8 = 0x0f;
    // Followed by type
    pub const BYREF: u8 = 0x10;
    // Followed by TypeDef or TypeRef token
    pub const VALUETYPE: u8 = 0x11;
    // Followed by TypeDef or TypeRef token
    pub const CLASS: u8 = 0x12;
    // Generic parameter in a generic type definition, represented as number
    pub const VAR: u8 = 0x13;
    // Generic type instantiation. Followed by type type-arg-count type-1 ... type-n
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Single-dim array with 0 lower bound
    pub const SZARRAY: u8 = 0x1d;
    // Generic parameter in a generic method definition, represented as number
    pub const MVAR: u8 = 0x1e;
}

/// Represents a decoded type in various signatures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeSignature {
    #[default]
    /// Not defined
    Unknown,
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// System.String
    String,
    /// A pointer to a type
    Ptr(Box<TypeSignature>),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// Value type
    // TypeDefOrRefOrSpecEncoded
    ValueType(Token),
    /// Class
    // TypeDefOrRefOrSpecEncoded
    Class(Token),
    /// Generic type parameter
    // Position in the declaring type's generic parameter list
    GenericParamType(u32),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Type is referenced during runtime
    TypedByRef,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.Object
    Object,
    /// Single dimension array
    SzArray(Box<TypeSignature>),
    /// Generic method parameter
    GenericParamMethod(u32),
}

impl TypeSignature {
    /// Returns the element type tag of this signature
    #[must_use]
    pub fn element_type(&self) -> Option<u8> {
        let tag = match self {
            TypeSignature::Unknown => return None,
            TypeSignature::Void => ELEMENT_TYPE::VOID,
            TypeSignature::Boolean => ELEMENT_TYPE::BOOLEAN,
            TypeSignature::Char => ELEMENT_TYPE::CHAR,
            TypeSignature::I1 => ELEMENT_TYPE::I1,
            TypeSignature::U1 => ELEMENT_TYPE::U1,
            TypeSignature::I2 => ELEMENT_TYPE::I2,
            TypeSignature::U2 => ELEMENT_TYPE::U2,
            TypeSignature::I4 => ELEMENT_TYPE::I4,
            TypeSignature::U4 => ELEMENT_TYPE::U4,
            TypeSignature::I8 => ELEMENT_TYPE::I8,
            TypeSignature::U8 => ELEMENT_TYPE::U8,
            TypeSignature::R4 => ELEMENT_TYPE::R4,
            TypeSignature::R8 => ELEMENT_TYPE::R8,
            TypeSignature::String => ELEMENT_TYPE::STRING,
            TypeSignature::Ptr(_) => ELEMENT_TYPE::PTR,
            TypeSignature::ByRef(_) => ELEMENT_TYPE::BYREF,
            TypeSignature::ValueType(_) => ELEMENT_TYPE::VALUETYPE,
            TypeSignature::Class(_) => ELEMENT_TYPE::CLASS,
            TypeSignature::GenericParamType(_) => ELEMENT_TYPE::VAR,
            TypeSignature::GenericInst(_, _) => ELEMENT_TYPE::GENERICINST,
            TypeSignature::TypedByRef => ELEMENT_TYPE::TYPEDBYREF,
            TypeSignature::I => ELEMENT_TYPE::I,
            TypeSignature::U => ELEMENT_TYPE::U,
            TypeSignature::Object => ELEMENT_TYPE::OBJECT,
            TypeSignature::SzArray(_) => ELEMENT_TYPE::SZARRAY,
            TypeSignature::GenericParamMethod(_) => ELEMENT_TYPE::MVAR,
        };
        Some(tag)
    }

    /// Builds the signature for a payload-free element type tag
    ///
    /// Tags that must be followed by further data (tokens, nested types, positions) return `None`.
    #[must_use]
    pub fn from_element_type(tag: u8) -> Option<Self> {
        let signature = match tag {
            ELEMENT_TYPE::VOID => TypeSignature::Void,
            ELEMENT_TYPE::BOOLEAN => TypeSignature::Boolean,
            ELEMENT_TYPE::CHAR => TypeSignature::Char,
            ELEMENT_TYPE::I1 => TypeSignature::I1,
            ELEMENT_TYPE::U1 => TypeSignature::U1,
            ELEMENT_TYPE::I2 => TypeSignature::I2,
            ELEMENT_TYPE::U2 => TypeSignature::U2,
            ELEMENT_TYPE::I4 => TypeSignature::I4,
            ELEMENT_TYPE::U4 => TypeSignature::U4,
            ELEMENT_TYPE::I8 => TypeSignature::I8,
            ELEMENT_TYPE::U8 => TypeSignature::U8,
            ELEMENT_TYPE::R4 => TypeSignature::R4,
            ELEMENT_TYPE::R8 => TypeSignature::R8,
            ELEMENT_TYPE::STRING => TypeSignature::String,
            ELEMENT_TYPE::TYPEDBYREF => TypeSignature::TypedByRef,
            ELEMENT_TYPE::I => TypeSignature::I,
            ELEMENT_TYPE::U => TypeSignature::U,
            ELEMENT_TYPE::OBJECT => TypeSignature::Object,
            _ => return None,
        };
        Some(signature)
    }

    /// True if this is a single dimension, zero lower bound array
    #[must_use]
    pub fn is_szarray(&self) -> bool {
        matches!(self, TypeSignature::SzArray(_))
    }

    /// True for `void`
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeSignature::Void)
    }

    /// Wraps `element` in a single dimension array
    #[must_use]
    pub fn szarray(element: TypeSignature) -> Self {
        TypeSignature::SzArray(Box::new(element))
    }

    /// Builds a generic instantiation of the class referenced by `generic_type`
    #[must_use]
    pub fn generic_class(generic_type: Token, args: Vec<TypeSignature>) -> Self {
        TypeSignature::GenericInst(Box::new(TypeSignature::Class(generic_type)), args)
    }
}

/// Parameter or return slot of a method signature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureParameter {
    /// Parameter is passed by reference
    pub by_ref: bool,
    /// The type of the parameter
    pub base: TypeSignature,
}

impl SignatureParameter {
    /// A by-value parameter of type `base`
    #[must_use]
    pub fn value(base: TypeSignature) -> Self {
        SignatureParameter {
            by_ref: false,
            base,
        }
    }

    /// A by-reference parameter of type `base`
    #[must_use]
    pub fn by_ref(base: TypeSignature) -> Self {
        SignatureParameter { by_ref: true, base }
    }
}

/// Represents a method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureMethod {
    /// Used to encode the keyword instance in the calling convention, see §II.15.3
    pub has_this: bool,
    /// Used to indicate that the method has one or more generic parameters.
    pub param_count_generic: u32,
    /// The return type of this `Method`
    pub return_type: SignatureParameter,
    /// The parameters of this `Method`
    pub params: Vec<SignatureParameter>,
}

/// Field signature (II.23.2.4)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureField {
    /// The signature of this type
    pub base: TypeSignature,
}

/// Type specification signature (II.23.2.14)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureTypeSpec {
    /// Signature of this type
    pub base: TypeSignature,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::token::{TableId, Token};

    #[test]
    fn payload_free_tags_round_trip() {
        for tag in 0x00..=0x40u8 {
            if let Some(signature) = TypeSignature::from_element_type(tag) {
                assert_eq!(signature.element_type(), Some(tag));
            }
        }
    }

    #[test]
    fn tags_with_payload_are_not_constructible_from_tag() {
        for tag in [
            ELEMENT_TYPE::PTR,
            ELEMENT_TYPE::BYREF,
            ELEMENT_TYPE::VALUETYPE,
            ELEMENT_TYPE::CLASS,
            ELEMENT_TYPE::VAR,
            ELEMENT_TYPE::GENERICINST,
            ELEMENT_TYPE::SZARRAY,
            ELEMENT_TYPE::MVAR,
        ] {
            assert!(TypeSignature::from_element_type(tag).is_none());
        }
    }

    #[test]
    fn szarray_helpers() {
        let array = TypeSignature::szarray(TypeSignature::I4);
        assert!(array.is_szarray());
        assert!(!TypeSignature::I4.is_szarray());
        assert_eq!(array.element_type(), Some(ELEMENT_TYPE::SZARRAY));
    }

    #[test]
    fn generic_class_builds_instantiation() {
        let token = Token::from_parts(TableId::TYPE_REF, 3);
        let signature = TypeSignature::generic_class(token, vec![TypeSignature::String]);
        match signature {
            TypeSignature::GenericInst(base, args) => {
                assert_eq!(*base, TypeSignature::Class(token));
                assert_eq!(args, vec![TypeSignature::String]);
            }
            other => panic!("unexpected signature {other:?}"),
        }
    }
}
