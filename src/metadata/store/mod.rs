//! The read-only metadata store the projection core queries.
//!
//! Loading metadata (table readers, heaps, coded-index decoding) is not part of this crate. The
//! core only needs an oracle that turns handles into rows and names into type definitions,
//! expressed by the [`MetadataStore`] trait. Every resolution function receives the store
//! explicitly, so the core can be exercised against the in-memory [`InMemoryStore`] as easily as
//! against a store backed by real `.winmd` files.
//!
//! # Contract
//!
//! - Stores are immutable while queried, and safe to share across threads.
//! - Every handle passed to a store must originate from that store. A foreign handle either
//!   fails with [`crate::Error::RowNotFound`] or, if its row number happens to exist, silently
//!   names another row; the core cannot tell the difference.
//!
//! # Examples
//!
//! ```rust
//! use projscope::metadata::store::{InMemoryStore, MetadataStore, TypeDefBuilder};
//!
//! let store = InMemoryStore::new();
//! let uri = TypeDefBuilder::new("Windows.Foundation", "Uri").class().build(&store)?;
//!
//! assert_eq!(store.find_type("Windows.Foundation", "Uri"), Some(uri));
//! assert_eq!(store.type_def(uri)?.fullname(), "Windows.Foundation.Uri");
//! # Ok::<(), projscope::Error>(())
//! ```

mod builder;
mod memory;

pub use builder::{EventBuilder, MethodBuilder, PropertyBuilder, TypeDefBuilder};
pub use memory::InMemoryStore;

use crate::{
    metadata::tables::{
        qualified_name, CustomAttribute, CustomAttributeRc, Event, EventRc, Field, FieldRc,
        MethodDef, MethodDefRc, Param, ParamRc, Property, PropertyRc, TypeDef, TypeDefRc,
        TypeRef, TypeRefRc, TypeSpec, TypeSpecRc,
    },
    Error, Result,
};

/// Read-only access to decoded metadata rows.
///
/// Row accessors fail with [`Error::RowNotFound`] when the handle has no row.
pub trait MetadataStore: Send + Sync {
    /// Row of a type definition
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn type_def(&self, handle: TypeDef) -> Result<TypeDefRc>;

    /// Row of a type reference
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn type_ref(&self, handle: TypeRef) -> Result<TypeRefRc>;

    /// Row of a type specification
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn type_spec(&self, handle: TypeSpec) -> Result<TypeSpecRc>;

    /// Row of a method
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn method_def(&self, handle: MethodDef) -> Result<MethodDefRc>;

    /// Row of a field
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn field(&self, handle: Field) -> Result<FieldRc>;

    /// Row of a property
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn property(&self, handle: Property) -> Result<PropertyRc>;

    /// Row of an event
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn event(&self, handle: Event) -> Result<EventRc>;

    /// Row of a parameter
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn param(&self, handle: Param) -> Result<ParamRc>;

    /// Row of a custom attribute
    ///
    /// # Errors
    /// Returns [`Error::RowNotFound`] if the handle has no row.
    fn custom_attribute(&self, handle: CustomAttribute) -> Result<CustomAttributeRc>;

    /// Looks up a type definition by namespace and name
    fn find_type(&self, namespace: &str, name: &str) -> Option<TypeDef>;

    /// All type definitions, in token order
    fn type_defs(&self) -> Vec<TypeDef>;

    /// Looks up a type definition that must exist
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] if no type has this name.
    fn find_required(&self, namespace: &str, name: &str) -> Result<TypeDef> {
        self.find_type(namespace, name)
            .ok_or_else(|| Error::UnresolvedTypeReference(qualified_name(namespace, name)))
    }

    /// Looks up a type definition by its namespace-qualified name (`Namespace.Name`)
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTypeReference`] if no type has this name.
    fn find_required_by_fullname(&self, fullname: &str) -> Result<TypeDef> {
        let (namespace, name) = split_fullname(fullname);
        self.find_required(namespace, name)
    }
}

/// Splits `Namespace.Name` at the last dot; names without a dot live in the global namespace
#[must_use]
pub fn split_fullname(fullname: &str) -> (&str, &str) {
    match fullname.rfind('.') {
        Some(pos) => (&fullname[..pos], &fullname[pos + 1..]),
        None => ("", fullname),
    }
}
