//! Interface closure of a type: the interfaces it is required to implement and the methods
//! merged across them.
//!
//! The closure is walked depth-first in pre-order with an explicit stack. Each type definition
//! is recorded the first time it is reached; a type reached again through another path is
//! skipped together with its subtree, so the first path's generic arguments win. Only
//! interfaces contribute their declared interfaces to the walk. Generic arguments of a node are
//! substituted into the interfaces it requires, so ``IIterable`1<T>`` reached through
//! ``IVector`1<String>`` is recorded as ``IIterable`1<String>``.

use std::collections::{BTreeMap, HashSet};

use crate::{
    metadata::tables::{MethodDefRc, TypeDef, TypeDefRow},
    projection::{
        category::{category_of, TypeCategory},
        members::{is_getter, is_setter},
        resolver::TypeResolver,
        semantics::TypeSemantics,
    },
    Error::InconsistentMemberKind,
    Result,
};

const COLLECTIONS_NAMESPACE: &str = "Windows.Foundation.Collections";

/// An interface of a closure, with its generic arguments rendered as descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    /// The interface definition
    pub type_def: TypeDef,
    /// Rendered generic arguments; for a generic definition, its parameter names
    pub type_arguments: Vec<String>,
}

/// A method reached through the closure, with the generic arguments in effect where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// The method
    pub method: MethodDefRc,
    /// Generic arguments of the declaring interface instance; empty for non-generic owners
    pub generic_args: Vec<TypeSemantics>,
}

/// Methods of a closure keyed by name, overloads in closure order
pub type MemberMap = BTreeMap<String, Vec<MethodInfo>>;

/// Appends `info` unless an entry for the same interface already exists
///
/// Returns `true` if the entry was added.
pub fn push_interface_info(interfaces: &mut Vec<InterfaceInfo>, info: InterfaceInfo) -> bool {
    if interfaces
        .iter()
        .any(|existing| existing.type_def == info.type_def)
    {
        return false;
    }
    interfaces.push(info);
    true
}

struct ClosureWalk<'r, 'a> {
    resolver: &'r TypeResolver<'a>,
    visited: HashSet<TypeDef>,
}

impl<'r, 'a> ClosureWalk<'r, 'a> {
    fn new(resolver: &'r TypeResolver<'a>) -> Self {
        ClosureWalk {
            resolver,
            visited: HashSet::new(),
        }
    }

    fn walk<F>(&mut self, root: TypeSemantics, mut visit: F) -> Result<()>
    where
        F: FnMut(&TypeSemantics, &TypeDefRow) -> Result<()>,
    {
        let store = self.resolver.store();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            let type_def = node.typedef()?;
            if !self.visited.insert(type_def) {
                continue;
            }

            let row = store.type_def(type_def)?;
            visit(&node, &row)?;

            if category_of(store, &row)? != TypeCategory::Interface {
                continue;
            }

            // Reversed so the first declared interface is walked first
            for &required in row.interfaces.iter().rev() {
                let child = self
                    .resolver
                    .resolve_reference(required)?
                    .substitute(node.generic_args());
                stack.push(child);
            }
        }

        Ok(())
    }
}

/// Visit every type of the closure rooted at `type_def`, in pre-order, once each
///
/// `visit` receives the semantics the type was reached with and its row.
///
/// # Errors
/// Returns the first error of `visit` or of resolving a required interface.
pub fn enumerate_required_types<F>(
    resolver: &TypeResolver<'_>,
    type_def: TypeDef,
    visit: F,
) -> Result<()>
where
    F: FnMut(&TypeSemantics, &TypeDefRow) -> Result<()>,
{
    ClosureWalk::new(resolver).walk(resolver.resolve_type_def(type_def), visit)
}

/// Non-constructor methods of the closure, keyed by name
///
/// # Errors
/// Returns [`crate::Error::InconsistentMemberKind`] if methods sharing a name disagree on
/// static-ness, plus every resolution error of the walk.
pub fn all_members(resolver: &TypeResolver<'_>, type_def: TypeDef) -> Result<MemberMap> {
    let store = resolver.store();
    let mut members = MemberMap::new();

    enumerate_required_types(resolver, type_def, |node, row| {
        for &method in &row.methods {
            let method = store.method_def(method)?;
            if method.is_constructor() {
                continue;
            }

            let overloads = members.entry(method.name.clone()).or_default();
            if overloads
                .iter()
                .any(|existing| existing.method.is_static() != method.is_static())
            {
                return Err(InconsistentMemberKind(method.name.clone()));
            }
            overloads.push(MethodInfo {
                method,
                generic_args: node.generic_args().to_vec(),
            });
        }
        Ok(())
    })?;

    Ok(members)
}

/// Interfaces a type is required to implement, deduplicated, first path wins
///
/// For an interface this is its own closure, itself included. For any other type it is the
/// union of the closures of its declared interfaces. Generic arguments are rendered against the
/// generic parameter names of `type_def`.
///
/// # Errors
/// Returns every resolution error of the walk.
pub fn required_interfaces(
    resolver: &TypeResolver<'_>,
    type_def: TypeDef,
) -> Result<Vec<InterfaceInfo>> {
    let store = resolver.store();
    let row = store.type_def(type_def)?;
    let generic_params = &row.generic_params;

    log::debug!("Collecting required interfaces of {}", row.fullname());

    let mut interfaces = Vec::new();
    let mut record = |node: &TypeSemantics, node_row: &TypeDefRow| -> Result<()> {
        let type_arguments = match node {
            TypeSemantics::TypeDefinition(_) => node_row.generic_params.clone(),
            _ => node
                .generic_args()
                .iter()
                .map(|arg| arg.render(store, generic_params))
                .collect::<Result<Vec<_>>>()?,
        };
        push_interface_info(
            &mut interfaces,
            InterfaceInfo {
                type_def: node_row.handle(),
                type_arguments,
            },
        );
        Ok(())
    };

    let mut walk = ClosureWalk::new(resolver);
    if category_of(store, &row)? == TypeCategory::Interface {
        walk.walk(resolver.resolve_type_def(type_def), &mut record)?;
    } else {
        for &declared in &row.interfaces {
            walk.walk(resolver.resolve_reference(declared)?, &mut record)?;
        }
    }

    Ok(interfaces)
}

/// The type is, or transitively requires, the named interface
///
/// # Errors
/// Returns every resolution error met on the way.
pub fn implements_interface(
    resolver: &TypeResolver<'_>,
    type_def: TypeDef,
    namespace: &str,
    name: &str,
) -> Result<bool> {
    let store = resolver.store();
    let mut visited = HashSet::new();
    let mut stack = vec![type_def];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        let row = store.type_def(current)?;
        if row.is_named(namespace, name) && category_of(store, &row)? == TypeCategory::Interface {
            return Ok(true);
        }

        for &declared in &row.interfaces {
            stack.push(resolver.typedef_of(declared)?);
        }
    }

    Ok(false)
}

/// Implements ``IVector`1`` or ``IVectorView`1``
///
/// # Errors
/// See [`implements_interface`].
pub fn implements_sequence_protocol(resolver: &TypeResolver<'_>, type_def: TypeDef) -> Result<bool> {
    Ok(implements_interface(resolver, type_def, COLLECTIONS_NAMESPACE, "IVector`1")?
        || implements_interface(resolver, type_def, COLLECTIONS_NAMESPACE, "IVectorView`1")?)
}

/// Implements ``IMap`2`` or ``IMapView`2``
///
/// # Errors
/// See [`implements_interface`].
pub fn implements_mapping_protocol(resolver: &TypeResolver<'_>, type_def: TypeDef) -> Result<bool> {
    Ok(implements_interface(resolver, type_def, COLLECTIONS_NAMESPACE, "IMap`2")?
        || implements_interface(resolver, type_def, COLLECTIONS_NAMESPACE, "IMapView`2")?)
}

/// Implements `Windows.Foundation.IStringable`
///
/// # Errors
/// See [`implements_interface`].
pub fn is_stringable(resolver: &TypeResolver<'_>, type_def: TypeDef) -> Result<bool> {
    implements_interface(resolver, type_def, "Windows.Foundation", "IStringable")
}

/// Has a length: a sequence or a mapping
///
/// # Errors
/// See [`implements_interface`].
pub fn has_length(resolver: &TypeResolver<'_>, type_def: TypeDef) -> Result<bool> {
    Ok(implements_mapping_protocol(resolver, type_def)?
        || implements_sequence_protocol(resolver, type_def)?)
}

/// All overloads in the group are static (the group is homogeneous)
#[must_use]
pub fn is_static_group(methods: &[MethodInfo]) -> bool {
    methods.first().is_some_and(|info| info.method.is_static())
}

/// The group is a single property getter
#[must_use]
pub fn is_getter_group(methods: &[MethodInfo]) -> bool {
    matches!(methods, [single] if is_getter(&single.method))
}

/// The group is a single property setter
#[must_use]
pub fn is_setter_group(methods: &[MethodInfo]) -> bool {
    matches!(methods, [single] if is_setter(&single.method))
}
