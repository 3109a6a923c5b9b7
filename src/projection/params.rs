//! Parameter and call-shape analysis of methods.
//!
//! [`MethodSignature`] pairs the `Param` rows of a method with the parameters of its decoded
//! signature, separating the optional return slot. Each parameter is classified into a
//! [`ParamCategory`] from three facts: whether its type is a single-dimension array, its in/out
//! flags, and whether it is passed by reference.

use strum::{Display, EnumCount, EnumIter};

use crate::{
    metadata::{
        signatures::SignatureParameter,
        store::MetadataStore,
        tables::{MethodDef, MethodDefRc, MethodDefRow, ParamRc},
    },
    projection::members::{is_adder, is_getter, is_remover, is_setter},
    Result,
};

/// Name used for the return value when the method has no named return slot
pub const DEFAULT_RETURN_NAME: &str = "_return_value";

/// How a parameter crosses the call boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ParamCategory {
    /// Value passed by the caller
    In,
    /// Value returned through the parameter
    Out,
    /// Array passed by the caller
    PassArray,
    /// Caller-allocated array filled by the callee; acts as both input and output
    FillArray,
    /// Callee-allocated array returned to the caller
    ReceiveArray,
}

/// Call shape of a method in the projected language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ArgumentConvention {
    /// Default constructors and property getters
    NoArgs,
    /// Property setters and event add/remove
    SingleArg,
    /// Everything else
    VariableArgs,
}

/// One parameter of a method: its `Param` row with the matching signature slot
#[derive(Debug, Clone)]
pub struct MethodParam {
    /// The `Param` row
    pub row: ParamRc,
    /// The signature slot at the same position
    pub signature: SignatureParameter,
}

impl MethodParam {
    /// Name of the parameter
    #[must_use]
    pub fn name(&self) -> &str {
        &self.row.name
    }

    /// Category of this parameter
    ///
    /// # Errors
    /// See [`classify`].
    pub fn category(&self) -> Result<ParamCategory> {
        classify(self)
    }
}

/// A method's parameters paired with their signature, return slot separated
#[derive(Debug, Clone)]
pub struct MethodSignature {
    method: MethodDefRc,
    params: Vec<MethodParam>,
    return_param: Option<ParamRc>,
}

impl MethodSignature {
    /// Build the signature view of a method
    ///
    /// # Errors
    /// Returns [`crate::Error::RowNotFound`] if the method or a parameter row is missing, and
    /// [`crate::Error::InvalidMetadata`] if there are fewer `Param` rows than signature
    /// parameters.
    pub fn new(store: &dyn MetadataStore, method: MethodDef) -> Result<Self> {
        Self::from_row(store, store.method_def(method)?)
    }

    /// Build the signature view of an already loaded method row
    ///
    /// # Errors
    /// See [`MethodSignature::new`].
    pub fn from_row(store: &dyn MetadataStore, method: MethodDefRc) -> Result<Self> {
        let mut rows = method.params.iter();
        let mut return_param = None;

        if !method.signature.return_type.base.is_void() {
            if let Some(&first) = method.params.first() {
                let first = store.param(first)?;
                // The return slot is only recognisable by position
                if first.is_return() {
                    rows.next();
                    return_param = Some(first);
                }
            }
        }

        let mut params = Vec::with_capacity(method.signature.params.len());
        for signature in &method.signature.params {
            let Some(&row) = rows.next() else {
                return Err(malformed_error!(
                    "Method {} has {} signature parameters but fewer Param rows",
                    method.name,
                    method.signature.params.len()
                ));
            };
            params.push(MethodParam {
                row: store.param(row)?,
                signature: signature.clone(),
            });
        }

        Ok(MethodSignature {
            method,
            params,
            return_param,
        })
    }

    /// The method row
    #[must_use]
    pub fn method(&self) -> &MethodDefRc {
        &self.method
    }

    /// Parameters, excluding the return slot
    #[must_use]
    pub fn params(&self) -> &[MethodParam] {
        &self.params
    }

    /// True if the method takes parameters
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// The return slot of the signature; `None` for `void` methods
    #[must_use]
    pub fn return_signature(&self) -> Option<&SignatureParameter> {
        let return_type = &self.method.signature.return_type;
        (!return_type.base.is_void()).then_some(return_type)
    }

    /// The named return `Param` row, if present
    #[must_use]
    pub fn return_param(&self) -> Option<&ParamRc> {
        self.return_param.as_ref()
    }

    /// Name of the return value
    #[must_use]
    pub fn return_param_name(&self) -> &str {
        self.return_param
            .as_ref()
            .map_or(DEFAULT_RETURN_NAME, |param| param.name.as_str())
    }
}

/// Classify a parameter
///
/// | array | in | by-ref | category |
/// |-------|----|--------|----------|
/// | no    | yes| -      | `In` |
/// | no    | no | -      | `Out` (out flag required) |
/// | yes   | yes| -      | `PassArray` |
/// | yes   | no | yes    | `ReceiveArray` (out flag required) |
/// | yes   | no | no     | `FillArray` (out flag required) |
///
/// # Errors
/// Returns [`crate::Error::InvalidMetadata`] if the flags contradict the table: a non-array
/// parameter flagged both in and out, or a parameter flagged neither.
pub fn classify(param: &MethodParam) -> Result<ParamCategory> {
    let row = &param.row;

    if param.signature.base.is_szarray() {
        if row.is_in() {
            Ok(ParamCategory::PassArray)
        } else if !row.is_out() {
            Err(malformed_error!(
                "Array parameter {} is neither in nor out",
                row.name
            ))
        } else if param.signature.by_ref {
            Ok(ParamCategory::ReceiveArray)
        } else {
            Ok(ParamCategory::FillArray)
        }
    } else if row.is_in() {
        if row.is_out() {
            return Err(malformed_error!(
                "Parameter {} is flagged both in and out",
                row.name
            ));
        }
        Ok(ParamCategory::In)
    } else if row.is_out() {
        Ok(ParamCategory::Out)
    } else {
        Err(malformed_error!(
            "Parameter {} is neither in nor out",
            row.name
        ))
    }
}

/// Category of a return value: arrays are received, everything else is an out value
#[must_use]
pub fn return_category(signature: &SignatureParameter) -> ParamCategory {
    if signature.base.is_szarray() {
        ParamCategory::ReceiveArray
    } else {
        ParamCategory::Out
    }
}

/// Parameter supplies a value from the caller (`In`, `PassArray`, `FillArray`)
///
/// # Errors
/// See [`classify`].
pub fn is_in_param(param: &MethodParam) -> Result<bool> {
    Ok(matches!(
        classify(param)?,
        ParamCategory::In | ParamCategory::PassArray | ParamCategory::FillArray
    ))
}

/// Parameter hands a value back to the caller (`Out`, `ReceiveArray`, `FillArray`)
///
/// # Errors
/// See [`classify`].
pub fn is_out_param(param: &MethodParam) -> Result<bool> {
    Ok(matches!(
        classify(param)?,
        ParamCategory::Out | ParamCategory::ReceiveArray | ParamCategory::FillArray
    ))
}

/// Number of parameters the caller supplies
///
/// # Errors
/// See [`classify`].
pub fn count_in_params(params: &[MethodParam]) -> Result<usize> {
    let mut count = 0;
    for param in params {
        if is_in_param(param)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Number of parameters handed back to the caller, excluding the return value
///
/// # Errors
/// See [`classify`].
pub fn count_out_params(params: &[MethodParam]) -> Result<usize> {
    let mut count = 0;
    for param in params {
        if is_out_param(param)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Call shape of a method
#[must_use]
pub fn argument_convention(method: &MethodDefRow) -> ArgumentConvention {
    if method.is_constructor() && method.params.is_empty() {
        ArgumentConvention::NoArgs
    } else if is_getter(method) {
        ArgumentConvention::NoArgs
    } else if is_setter(method) || is_adder(method) || is_remover(method) {
        ArgumentConvention::SingleArg
    } else {
        ArgumentConvention::VariableArgs
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        metadata::{
            signatures::TypeSignature,
            store::{InMemoryStore, TypeDefBuilder},
            tables::{ParamAttributes, ParamRow},
        },
        Error,
    };

    fn param(flags: u32, by_ref: bool, base: TypeSignature) -> MethodParam {
        MethodParam {
            row: Arc::new(ParamRow {
                name: "p".to_string(),
                flags,
                sequence: 1,
                ..Default::default()
            }),
            signature: SignatureParameter { by_ref, base },
        }
    }

    fn array() -> TypeSignature {
        TypeSignature::szarray(TypeSignature::I4)
    }

    #[test]
    fn classification_table() {
        use ParamAttributes::{IN, OUT};

        let cases = [
            (IN, false, TypeSignature::I4, ParamCategory::In),
            (OUT, true, TypeSignature::I4, ParamCategory::Out),
            (OUT, false, TypeSignature::I4, ParamCategory::Out),
            (IN, false, array(), ParamCategory::PassArray),
            (OUT, true, array(), ParamCategory::ReceiveArray),
            (OUT, false, array(), ParamCategory::FillArray),
        ];
        for (flags, by_ref, base, expected) in cases {
            assert_eq!(classify(&param(flags, by_ref, base)).unwrap(), expected);
        }
    }

    #[test]
    fn contradictory_flags_are_rejected() {
        use ParamAttributes::{IN, OUT};

        for (flags, base) in [
            (IN | OUT, TypeSignature::I4),
            (0, TypeSignature::I4),
            (0, array()),
        ] {
            assert!(matches!(
                classify(&param(flags, false, base)),
                Err(Error::InvalidMetadata { .. })
            ));
        }
    }

    #[test]
    fn in_and_out_counts() {
        use ParamAttributes::{IN, OUT};

        let params = vec![
            param(IN, false, TypeSignature::I4),
            param(IN, false, array()),
            param(OUT, false, array()),
            param(OUT, true, array()),
            param(OUT, true, TypeSignature::String),
        ];
        assert_eq!(count_in_params(&params).unwrap(), 3);
        assert_eq!(count_out_params(&params).unwrap(), 3);

        let fill = param(OUT, false, array());
        assert!(is_in_param(&fill).unwrap());
        assert!(is_out_param(&fill).unwrap());
    }

    #[test]
    fn return_categories() {
        assert_eq!(
            return_category(&SignatureParameter::value(array())),
            ParamCategory::ReceiveArray
        );
        assert_eq!(
            return_category(&SignatureParameter::value(TypeSignature::Boolean)),
            ParamCategory::Out
        );
    }

    #[test]
    fn signature_separates_return_slot() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IMath")
            .interface()
            .method("Named", |m| {
                m.param("a", TypeSignature::I4)
                    .returns(TypeSignature::I4)
                    .return_name("result")
            })
            .method("Unnamed", |m| {
                m.param("a", TypeSignature::I4).returns(TypeSignature::I4)
            })
            .method("NoParams", |m| m.returns(TypeSignature::I4))
            .method("Void", |m| m.param("a", TypeSignature::I4))
            .build(&store)
            .unwrap();
        let methods = store.type_def(type_def).unwrap().methods.clone();

        let named = MethodSignature::new(&store, methods[0]).unwrap();
        assert_eq!(named.params().len(), 1);
        assert_eq!(named.params()[0].name(), "a");
        assert_eq!(named.return_param_name(), "result");
        assert!(named.return_signature().is_some());

        let unnamed = MethodSignature::new(&store, methods[1]).unwrap();
        assert_eq!(unnamed.params().len(), 1);
        assert_eq!(unnamed.return_param_name(), DEFAULT_RETURN_NAME);

        let no_params = MethodSignature::new(&store, methods[2]).unwrap();
        assert!(!no_params.has_params());
        assert!(no_params.return_param().is_none());

        let void = MethodSignature::new(&store, methods[3]).unwrap();
        assert!(void.return_signature().is_none());
        assert_eq!(void.params()[0].category().unwrap(), ParamCategory::In);
    }

    #[test]
    fn missing_param_rows_are_malformed() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "IBroken")
            .interface()
            .method("Call", |m| m)
            .build(&store)
            .unwrap();
        let method = store.type_def(type_def).unwrap().methods[0];
        let mut row = (*store.method_def(method).unwrap()).clone();
        row.signature.params.push(SignatureParameter::value(TypeSignature::I4));

        assert!(matches!(
            MethodSignature::from_row(&store, Arc::new(row)),
            Err(Error::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn argument_conventions() {
        let store = InMemoryStore::new();
        let type_def = TypeDefBuilder::new("Demo", "Widget")
            .class()
            .constructor(|c| c)
            .constructor(|c| c.param("name", TypeSignature::String))
            .simple_property("Title", TypeSignature::String, true)
            .method("add_Clicked", |m| m.special_name().param("h", TypeSignature::Object))
            .method("remove_Clicked", |m| m.special_name().param("t", TypeSignature::I8))
            .method("get_Plain", |m| m.returns(TypeSignature::I4))
            .method("Draw", |m| m)
            .build(&store)
            .unwrap();

        let conventions: Vec<ArgumentConvention> = store
            .type_def(type_def)
            .unwrap()
            .methods
            .iter()
            .map(|&m| argument_convention(&store.method_def(m).unwrap()))
            .collect();

        assert_eq!(
            conventions,
            vec![
                ArgumentConvention::NoArgs,
                ArgumentConvention::VariableArgs,
                ArgumentConvention::NoArgs,
                ArgumentConvention::SingleArg,
                ArgumentConvention::SingleArg,
                ArgumentConvention::SingleArg,
                // not special-name, so not a getter
                ArgumentConvention::VariableArgs,
                ArgumentConvention::VariableArgs,
            ]
        );
    }
}
