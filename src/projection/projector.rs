//! Whole-type projection.
//!
//! [`TypeProjector`] runs every per-type query of the core on one type definition and bundles
//! the results into a [`TypeProjection`]: what an emitter needs to write the type out. Running
//! it over a whole store happens in parallel, with one [`ProjectionDiagnostic`] per type that
//! failed instead of aborting the batch.
//!
//! # Examples
//!
//! ```rust
//! use projscope::prelude::*;
//!
//! let store = InMemoryStore::new();
//! TypeDefBuilder::new("Demo", "Widget")
//!     .class()
//!     .constructor(|c| c)
//!     .simple_property("Title", TypeSignature::String, true)
//!     .build(&store)?;
//!
//! let projector = TypeProjector::new(&store);
//! let (projections, diagnostics) = projector.project_all();
//! assert!(diagnostics.is_empty());
//!
//! let widget = projections.iter().find(|p| p.name == "Demo.Widget").unwrap();
//! assert_eq!(widget.category, TypeCategory::Class);
//! assert_eq!(widget.shapes[0].abi_name, "_default_ctor");
//! # Ok::<(), projscope::Error>(())
//! ```

use rayon::prelude::*;

use crate::{
    config::ProjectionConfig,
    metadata::{
        store::MetadataStore,
        tables::{MethodDefRc, TypeDef},
    },
    projection::{
        abi::abi_name_of,
        category::{category_of, TypeCategory},
        closure::{all_members, required_interfaces, InterfaceInfo, MemberMap},
        members::{classify_members, field_semantics, TypeMembers},
        params::{
            argument_convention, count_in_params, count_out_params, return_category,
            ArgumentConvention, MethodSignature, ParamCategory,
        },
        resolver::TypeResolver,
        semantics::TypeSemantics,
    },
    Error, Result,
};

/// How a single method is called from the projected language
#[derive(Debug, Clone)]
pub struct MethodShape {
    /// The method
    pub method: MethodDefRc,
    /// Name of the method in metadata
    pub name: String,
    /// Name of the method's ABI slot
    pub abi_name: String,
    /// Argument convention
    pub convention: ArgumentConvention,
    /// Number of values the caller supplies
    pub in_params: usize,
    /// Number of values handed back through parameters
    pub out_params: usize,
    /// Category of the return value; `None` for `void`
    pub returns: Option<ParamCategory>,
    /// Method is static
    pub is_static: bool,
}

/// A struct field with the semantics used for its ABI layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    /// Name of the field
    pub name: String,
    /// Semantics with enums lowered to their underlying type
    pub semantics: TypeSemantics,
}

/// Everything the core knows about one type
#[derive(Debug, Clone)]
pub struct TypeProjection {
    /// The projected type
    pub type_def: TypeDef,
    /// Namespace-qualified name
    pub name: String,
    /// Category
    pub category: TypeCategory,
    /// Declared members, classified
    pub members: TypeMembers,
    /// Interface closure
    pub required_interfaces: Vec<InterfaceInfo>,
    /// Methods merged over the interface closure
    pub methods: MemberMap,
    /// Call shapes of the declared methods
    pub shapes: Vec<MethodShape>,
    /// Fields of a struct
    pub fields: Vec<FieldShape>,
}

impl TypeProjection {
    /// Call shape of the first declared method with this name
    #[must_use]
    pub fn shape(&self, name: &str) -> Option<&MethodShape> {
        self.shapes.iter().find(|shape| shape.name == name)
    }
}

/// A type that could not be projected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDiagnostic {
    /// Namespace-qualified name of the type
    pub type_name: String,
    /// Why projection failed
    pub error: Error,
}

/// Projects type definitions of a store
pub struct TypeProjector<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> TypeProjector<'a> {
    /// Creates a projector with the default configuration
    #[must_use]
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self::with_config(store, ProjectionConfig::default())
    }

    /// Creates a projector with a custom configuration
    #[must_use]
    pub fn with_config(store: &'a dyn MetadataStore, config: ProjectionConfig) -> Self {
        TypeProjector {
            resolver: TypeResolver::with_config(store, config),
        }
    }

    /// The resolver shared by every projection
    #[must_use]
    pub fn resolver(&self) -> &TypeResolver<'a> {
        &self.resolver
    }

    /// Project one type
    ///
    /// # Errors
    /// Returns the first error of any query run on the type.
    pub fn project(&self, type_def: TypeDef) -> Result<TypeProjection> {
        let store = self.resolver.store();
        let row = store.type_def(type_def)?;
        let category = category_of(store, &row)?;

        log::debug!("Projecting {} {}", category, row.fullname());

        let members = classify_members(store, type_def)?;
        let required_interfaces = required_interfaces(&self.resolver, type_def)?;
        let methods = all_members(&self.resolver, type_def)?;

        let mut shapes = Vec::with_capacity(row.methods.len());
        for &method in &row.methods {
            let method = store.method_def(method)?;
            // Delegate constructors are runtime plumbing, not activation
            if method.is_constructor() && category != TypeCategory::Class {
                continue;
            }
            shapes.push(self.shape(method)?);
        }

        let mut fields = Vec::new();
        if category == TypeCategory::Struct {
            for field in &members.fields {
                fields.push(FieldShape {
                    name: field.name.clone(),
                    semantics: field_semantics(&self.resolver, field, true)?,
                });
            }
        }

        Ok(TypeProjection {
            type_def,
            name: row.fullname(),
            category,
            members,
            required_interfaces,
            methods,
            shapes,
            fields,
        })
    }

    /// Call shape of one method
    ///
    /// # Errors
    /// Returns the errors of [`abi_name_of`] and of parameter classification.
    pub fn shape(&self, method: MethodDefRc) -> Result<MethodShape> {
        let abi_name = abi_name_of(&self.resolver, &method)?;
        let signature = MethodSignature::from_row(self.resolver.store(), method.clone())?;

        Ok(MethodShape {
            name: method.name.clone(),
            abi_name,
            convention: argument_convention(&method),
            in_params: count_in_params(signature.params())?,
            out_params: count_out_params(signature.params())?,
            returns: signature.return_signature().map(return_category),
            is_static: method.is_static(),
            method,
        })
    }

    /// Project every type of the store in parallel
    ///
    /// Projections come back in token order. Each failing type yields a diagnostic instead.
    #[must_use]
    pub fn project_all(&self) -> (Vec<TypeProjection>, Vec<ProjectionDiagnostic>) {
        let store = self.resolver.store();
        let results: Vec<(TypeDef, Result<TypeProjection>)> = store
            .type_defs()
            .into_par_iter()
            .map(|type_def| (type_def, self.project(type_def)))
            .collect();

        let mut projections = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for (type_def, result) in results {
            match result {
                Ok(projection) => projections.push(projection),
                Err(error) => {
                    let type_name = store
                        .type_def(type_def)
                        .map_or_else(|_| type_def.token().to_string(), |row| row.fullname());
                    log::warn!("Skipping {}: {}", type_name, error);
                    diagnostics.push(ProjectionDiagnostic { type_name, error });
                }
            }
        }

        (projections, diagnostics)
    }
}
