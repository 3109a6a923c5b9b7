//! Lock-free in-memory [`MetadataStore`].
//!
//! Rows live in one `SkipMap` per table, keyed by token, and type definitions are indexed by
//! namespace-qualified name in a `DashMap`. Row numbers are handed out by per-table atomic
//! counters, so rows can be added through a shared reference while other threads read. Rows are
//! never modified once inserted.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    metadata::{
        customattributes::CustomAttributeValue,
        signatures::{SignatureTypeSpec, TypeSignature},
        store::MetadataStore,
        tables::{
            qualified_name, CustomAttribute, CustomAttributeRc, CustomAttributeRow, Event,
            EventRc, EventRow, Field, FieldRc, FieldRow, MethodDef, MethodDefRc, MethodDefRow,
            Param, ParamRc, ParamRow, Property, PropertyRc, PropertyRow, TypeDef, TypeDefRc,
            TypeDefRow, TypeRef, TypeRefRc, TypeRefRow, TypeSpec, TypeSpecRc, TypeSpecRow,
        },
        token::{TableId, Token},
    },
    Error, Result,
};

#[derive(Default)]
struct RowCounters {
    type_def: AtomicU32,
    type_ref: AtomicU32,
    type_spec: AtomicU32,
    method_def: AtomicU32,
    field: AtomicU32,
    property: AtomicU32,
    event: AtomicU32,
    param: AtomicU32,
    custom_attribute: AtomicU32,
}

impl RowCounters {
    fn next(&self, table: u8) -> Token {
        let counter = match table {
            TableId::TYPE_DEF => &self.type_def,
            TableId::TYPE_REF => &self.type_ref,
            TableId::TYPE_SPEC => &self.type_spec,
            TableId::METHOD_DEF => &self.method_def,
            TableId::FIELD => &self.field,
            TableId::PROPERTY => &self.property,
            TableId::EVENT => &self.event,
            TableId::PARAM => &self.param,
            _ => &self.custom_attribute,
        };
        Token::from_parts(table, counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Metadata store holding synthetic rows in memory.
///
/// Rows are added with [`crate::metadata::store::TypeDefBuilder`] (types with their members) and
/// with [`InMemoryStore::add_type_ref`] / [`InMemoryStore::add_type_spec`] (references).
///
/// # Examples
///
/// ```rust
/// use projscope::metadata::{
///     signatures::TypeSignature,
///     store::{InMemoryStore, MetadataStore, TypeDefBuilder},
///     tables::TypeDefOrRef,
/// };
///
/// let store = InMemoryStore::new();
/// let reference = TypeDefBuilder::new("Windows.Foundation", "IReference`1")
///     .interface()
///     .generic_param("T")
///     .build(&store)?;
/// let spec = store.add_type_spec(TypeSignature::generic_class(
///     reference.token(),
///     vec![TypeSignature::I4],
/// ));
///
/// assert!(matches!(
///     TypeDefOrRef::from(spec),
///     TypeDefOrRef::TypeSpec(_)
/// ));
/// assert_eq!(store.type_defs(), vec![reference]);
/// # Ok::<(), projscope::Error>(())
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    counters: RowCounters,
    type_defs: SkipMap<Token, TypeDefRc>,
    type_refs: SkipMap<Token, TypeRefRc>,
    type_specs: SkipMap<Token, TypeSpecRc>,
    methods: SkipMap<Token, MethodDefRc>,
    fields: SkipMap<Token, FieldRc>,
    properties: SkipMap<Token, PropertyRc>,
    events: SkipMap<Token, EventRc>,
    params: SkipMap<Token, ParamRc>,
    custom_attributes: SkipMap<Token, CustomAttributeRc>,
    types_by_fullname: DashMap<String, TypeDef>,
    type_refs_by_fullname: DashMap<String, TypeRef>,
}

impl InMemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type reference, reusing an existing row with the same name
    pub fn add_type_ref(&self, namespace: &str, name: &str) -> TypeRef {
        let fullname = qualified_name(namespace, name);
        *self
            .type_refs_by_fullname
            .entry(fullname)
            .or_insert_with(|| {
                let token = self.counters.next(TableId::TYPE_REF);
                self.type_refs.insert(
                    token,
                    Arc::new(TypeRefRow {
                        token,
                        namespace: namespace.to_string(),
                        name: name.to_string(),
                    }),
                );
                TypeRef::new(token.row())
            })
            .value()
    }

    /// Adds a type specification with the given signature
    pub fn add_type_spec(&self, signature: TypeSignature) -> TypeSpec {
        let token = self.counters.next(TableId::TYPE_SPEC);
        self.type_specs.insert(
            token,
            Arc::new(TypeSpecRow {
                token,
                signature: SignatureTypeSpec { base: signature },
            }),
        );
        TypeSpec::new(token.row())
    }

    /// Number of type definitions
    #[must_use]
    pub fn type_def_count(&self) -> usize {
        self.type_defs.len()
    }

    pub(crate) fn reserve(&self, table: u8) -> Token {
        self.counters.next(table)
    }

    pub(crate) fn insert_type_def(&self, row: TypeDefRow) -> Result<TypeDef> {
        let handle = TypeDef::from_token(row.token)?;
        match self.types_by_fullname.entry(row.fullname()) {
            Entry::Occupied(occupied) => Err(malformed_error!(
                "Type {} is defined twice",
                occupied.key()
            )),
            Entry::Vacant(vacant) => {
                self.type_defs.insert(row.token, Arc::new(row));
                vacant.insert(handle);
                Ok(handle)
            }
        }
    }

    pub(crate) fn insert_method(&self, row: MethodDefRow) -> Result<MethodDef> {
        let handle = MethodDef::from_token(row.token)?;
        self.methods.insert(row.token, Arc::new(row));
        Ok(handle)
    }

    pub(crate) fn insert_param(&self, name: &str, flags: u32, sequence: u32) -> Param {
        let token = self.counters.next(TableId::PARAM);
        self.params.insert(
            token,
            Arc::new(ParamRow {
                token,
                name: name.to_string(),
                flags,
                sequence,
            }),
        );
        Param::new(token.row())
    }

    pub(crate) fn insert_field(&self, row: FieldRow) -> Result<Field> {
        let handle = Field::from_token(row.token)?;
        self.fields.insert(row.token, Arc::new(row));
        Ok(handle)
    }

    pub(crate) fn insert_property(&self, row: PropertyRow) -> Result<Property> {
        let handle = Property::from_token(row.token)?;
        self.properties.insert(row.token, Arc::new(row));
        Ok(handle)
    }

    pub(crate) fn insert_event(&self, row: EventRow) -> Result<Event> {
        let handle = Event::from_token(row.token)?;
        self.events.insert(row.token, Arc::new(row));
        Ok(handle)
    }

    pub(crate) fn insert_custom_attribute(
        &self,
        parent: Token,
        namespace: &str,
        name: &str,
        value: CustomAttributeValue,
    ) -> CustomAttribute {
        let token = self.counters.next(TableId::CUSTOM_ATTRIBUTE);
        self.custom_attributes.insert(
            token,
            Arc::new(CustomAttributeRow {
                token,
                parent,
                type_namespace: namespace.to_string(),
                type_name: name.to_string(),
                value,
            }),
        );
        CustomAttribute::new(token.row())
    }
}

fn lookup<T>(map: &SkipMap<Token, Arc<T>>, token: Token) -> Result<Arc<T>> {
    map.get(&token)
        .map(|entry| entry.value().clone())
        .ok_or(Error::RowNotFound(token))
}

impl MetadataStore for InMemoryStore {
    fn type_def(&self, handle: TypeDef) -> Result<TypeDefRc> {
        lookup(&self.type_defs, handle.token())
    }

    fn type_ref(&self, handle: TypeRef) -> Result<TypeRefRc> {
        lookup(&self.type_refs, handle.token())
    }

    fn type_spec(&self, handle: TypeSpec) -> Result<TypeSpecRc> {
        lookup(&self.type_specs, handle.token())
    }

    fn method_def(&self, handle: MethodDef) -> Result<MethodDefRc> {
        lookup(&self.methods, handle.token())
    }

    fn field(&self, handle: Field) -> Result<FieldRc> {
        lookup(&self.fields, handle.token())
    }

    fn property(&self, handle: Property) -> Result<PropertyRc> {
        lookup(&self.properties, handle.token())
    }

    fn event(&self, handle: Event) -> Result<EventRc> {
        lookup(&self.events, handle.token())
    }

    fn param(&self, handle: Param) -> Result<ParamRc> {
        lookup(&self.params, handle.token())
    }

    fn custom_attribute(&self, handle: CustomAttribute) -> Result<CustomAttributeRc> {
        lookup(&self.custom_attributes, handle.token())
    }

    fn find_type(&self, namespace: &str, name: &str) -> Option<TypeDef> {
        self.types_by_fullname
            .get(&qualified_name(namespace, name))
            .map(|entry| *entry.value())
    }

    fn type_defs(&self) -> Vec<TypeDef> {
        self.type_defs
            .iter()
            .map(|entry| TypeDef::new(entry.key().row()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_refs_are_shared_by_name() {
        let store = InMemoryStore::new();
        let first = store.add_type_ref("System", "Guid");
        let second = store.add_type_ref("System", "Guid");
        let other = store.add_type_ref("System", "Enum");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(store.type_ref(first).unwrap().fullname(), "System.Guid");
    }

    #[test]
    fn type_specs_keep_signature() {
        let store = InMemoryStore::new();
        let signature = TypeSignature::generic_class(
            Token::from_parts(TableId::TYPE_REF, 1),
            vec![TypeSignature::String],
        );
        let spec = store.add_type_spec(signature.clone());
        assert_eq!(store.type_spec(spec).unwrap().signature.base, signature);
    }

    #[test]
    fn missing_rows_report_token() {
        let store = InMemoryStore::new();
        let handle = MethodDef::new(42);
        assert_eq!(
            store.method_def(handle),
            Err(Error::RowNotFound(handle.token()))
        );
    }

    #[test]
    fn duplicate_type_names_are_rejected() {
        let store = InMemoryStore::new();
        let row = |token| TypeDefRow {
            token,
            namespace: "Demo".to_string(),
            name: "Twice".to_string(),
            ..Default::default()
        };

        let first = store.reserve(TableId::TYPE_DEF);
        let second = store.reserve(TableId::TYPE_DEF);
        assert!(store.insert_type_def(row(first)).is_ok());
        assert!(matches!(
            store.insert_type_def(row(second)),
            Err(Error::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn concurrent_duplicate_definitions_keep_one() {
        use rayon::prelude::*;

        let store = InMemoryStore::new();
        let accepted = (0..16)
            .into_par_iter()
            .map(|_| {
                let token = store.reserve(TableId::TYPE_DEF);
                store.insert_type_def(TypeDefRow {
                    token,
                    namespace: "Demo".to_string(),
                    name: "Raced".to_string(),
                    ..Default::default()
                })
            })
            .filter(Result::is_ok)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(store.type_def_count(), 1);
        assert!(store.find_type("Demo", "Raced").is_some());
    }
}
