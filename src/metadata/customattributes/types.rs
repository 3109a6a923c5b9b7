//! CustomAttribute-specific types and data structures.
//!
//! This module contains the types used for representing decoded custom attribute data,
//! including argument values, named arguments, and the overall custom attribute value structure.
//! These types follow ECMA-335 II.23.3.

/// Represents a decoded custom attribute value with arguments and named arguments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomAttributeValue {
    /// Fixed arguments from the constructor signature
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttributeValue {
    /// A value with only fixed arguments
    #[must_use]
    pub fn fixed(fixed_args: Vec<CustomAttributeArgument>) -> Self {
        CustomAttributeValue {
            fixed_args,
            named_args: Vec::new(),
        }
    }
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// Type reference, as namespace-qualified name (`System.Type` argument)
    Type(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
    /// Enum value (enum type name + underlying value)
    Enum(String, Box<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// The string payload, if this is a string argument
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomAttributeArgument::String(value) => Some(value),
            _ => None,
        }
    }

    /// The type name payload, if this is a `System.Type` argument
    #[must_use]
    pub fn as_type_name(&self) -> Option<&str> {
        match self {
            CustomAttributeArgument::Type(name) => Some(name),
            _ => None,
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_only_their_variant() {
        let name = CustomAttributeArgument::String("CreateInstance".to_string());
        let ty = CustomAttributeArgument::Type("Windows.Foundation.IUriRuntimeClassFactory".into());

        assert_eq!(name.as_str(), Some("CreateInstance"));
        assert_eq!(name.as_type_name(), None);
        assert_eq!(
            ty.as_type_name(),
            Some("Windows.Foundation.IUriRuntimeClassFactory")
        );
        assert_eq!(ty.as_str(), None);
        assert_eq!(CustomAttributeArgument::U4(1).as_str(), None);
    }
}
