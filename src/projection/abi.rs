//! ABI names of methods and activation factory lookup.
//!
//! A method's ABI name is the name its slot carries in the binary interface. Ordinary methods
//! use their name or the `OverloadAttribute` override. Constructors have no slot of their own:
//! a parameterless constructor maps to default activation, a parameterized one to a method of
//! the activation factory interface named by the class's `ActivatableAttribute`.

use crate::{
    config::FactoryMatching,
    metadata::{
        customattributes::{ACTIVATABLE_ATTRIBUTE, PLATFORM_METADATA_NAMESPACE},
        tables::{MethodDef, MethodDefRc, MethodDefRow},
    },
    projection::{members::member_name, resolver::TypeResolver},
    Error, Result,
};

/// ABI name of a parameterless constructor
pub const DEFAULT_CONSTRUCTOR_ABI_NAME: &str = "_default_ctor";

/// ABI name of `method`
///
/// # Errors
/// Returns [`Error::FactoryMethodNotFound`] if a parameterized constructor has no matching
/// factory method, [`Error::UnresolvedTypeReference`] if an activation factory is not in the
/// store, and [`Error::InvalidMetadata`] for a constructor without a declaring type.
pub fn abi_name(resolver: &TypeResolver<'_>, method: MethodDef) -> Result<String> {
    let row = resolver.store().method_def(method)?;
    abi_name_of(resolver, &row)
}

/// ABI name of an already loaded method row
///
/// # Errors
/// See [`abi_name`].
pub fn abi_name_of(resolver: &TypeResolver<'_>, method: &MethodDefRow) -> Result<String> {
    if !method.is_constructor() {
        return member_name(resolver.store(), method);
    }

    if method.signature.params.is_empty() {
        return Ok(DEFAULT_CONSTRUCTOR_ABI_NAME.to_string());
    }

    let factory_method = factory_method(resolver, method)?;
    abi_name_of(resolver, &factory_method)
}

/// The activation factory method backing a parameterized constructor
///
/// Every `ActivatableAttribute` of the declaring class whose first argument names a factory
/// interface is tried in order. Attributes for default activation carry no type and are
/// skipped.
///
/// # Errors
/// See [`abi_name`].
pub fn factory_method(resolver: &TypeResolver<'_>, constructor: &MethodDefRow) -> Result<MethodDefRc> {
    let store = resolver.store();
    let Some(parent) = constructor.parent else {
        return Err(malformed_error!(
            "Constructor {} has no declaring type",
            constructor.token
        ));
    };
    let owner = store.type_def(parent)?;
    let arity = constructor.signature.params.len();

    for &attribute in &owner.custom_attributes {
        let attribute = store.custom_attribute(attribute)?;
        if !attribute.is(PLATFORM_METADATA_NAMESPACE, ACTIVATABLE_ATTRIBUTE) {
            continue;
        }

        let Some(factory_name) = attribute
            .value
            .fixed_args
            .first()
            .and_then(|arg| arg.as_type_name())
        else {
            continue;
        };

        let factory = store.type_def(store.find_required_by_fullname(factory_name)?)?;
        log::trace!(
            "Matching {}.{} against factory {}",
            owner.fullname(),
            constructor.name,
            factory.fullname()
        );

        let mut candidates = Vec::new();
        for &method in &factory.methods {
            let method = store.method_def(method)?;
            if method.signature.params.len() == arity {
                candidates.push(method);
            }
        }

        let matched = match resolver.config().factory_matching {
            FactoryMatching::ParameterCount => {
                if candidates.len() > 1 {
                    log::warn!(
                        "Factory {} has {} methods taking {} parameters, using {}",
                        factory.fullname(),
                        candidates.len(),
                        arity,
                        candidates[0].name
                    );
                }
                candidates.into_iter().next()
            }
            FactoryMatching::ParameterTypes => {
                let mut matched = None;
                for candidate in candidates {
                    if same_parameter_types(resolver, constructor, &candidate)? {
                        matched = Some(candidate);
                        break;
                    }
                }
                matched
            }
        };

        if let Some(method) = matched {
            return Ok(method);
        }
    }

    Err(Error::FactoryMethodNotFound(owner.fullname()))
}

fn same_parameter_types(
    resolver: &TypeResolver<'_>,
    left: &MethodDefRow,
    right: &MethodDefRow,
) -> Result<bool> {
    for (left, right) in left.signature.params.iter().zip(&right.signature.params) {
        if left.by_ref != right.by_ref
            || resolver.resolve(&left.base)? != resolver.resolve(&right.base)?
        {
            return Ok(false);
        }
    }
    Ok(true)
}
