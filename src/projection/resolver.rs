//! Resolution of signatures and coded type references into [`TypeSemantics`].

use dashmap::DashMap;

use crate::{
    config::ProjectionConfig,
    metadata::{
        signatures::TypeSignature,
        store::MetadataStore,
        tables::{TypeDef, TypeDefOrRef, TypeRef, TypeSpec},
        token::Token,
    },
    projection::semantics::{FundamentalType, TypeSemantics},
    Error::{RecursionLimit, UnsupportedElementType},
    Result,
};

/// Resolves type signatures and coded references against a metadata store
///
/// Resolution of coded references is memoized per token. The cache only ever holds complete
/// results: a failing resolution leaves no entry behind, and two threads racing on the same
/// token keep whichever result was inserted first (both are equal). Each entry remembers how
/// deep its resolution nested, so a cache hit fails the recursion limit exactly where a fresh
/// resolution would.
///
/// Generic parameter positions are returned as [`TypeSemantics::GenericTypeIndex`] and never
/// substituted here.
///
/// # Examples
///
/// ```rust
/// use projscope::{
///     metadata::{signatures::TypeSignature, store::InMemoryStore},
///     projection::{FundamentalType, TypeResolver, TypeSemantics},
/// };
///
/// let store = InMemoryStore::new();
/// let resolver = TypeResolver::new(&store);
///
/// assert_eq!(
///     resolver.resolve(&TypeSignature::I4)?,
///     TypeSemantics::Fundamental(FundamentalType::Int32)
/// );
/// assert_eq!(resolver.resolve(&TypeSignature::Object)?, TypeSemantics::Object);
/// # Ok::<(), projscope::Error>(())
/// ```
pub struct TypeResolver<'a> {
    /// The store all handles belong to
    store: &'a dyn MetadataStore,
    /// Active configuration
    config: ProjectionConfig,
    /// Resolved coded references with the nesting depth below them, keyed by token
    cache: DashMap<Token, (TypeSemantics, usize)>,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver with the default configuration
    ///
    /// ## Arguments
    /// * 'store' - The store to resolve against
    pub fn new(store: &'a dyn MetadataStore) -> Self {
        Self::with_config(store, ProjectionConfig::default())
    }

    /// Create a resolver with an explicit configuration
    ///
    /// ## Arguments
    /// * 'store'  - The store to resolve against
    /// * 'config' - The configuration to apply
    pub fn with_config(store: &'a dyn MetadataStore, config: ProjectionConfig) -> Self {
        TypeResolver {
            store,
            config,
            cache: DashMap::new(),
        }
    }

    /// The store this resolver reads from
    #[must_use]
    pub fn store(&self) -> &'a dyn MetadataStore {
        self.store
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Number of memoized coded references
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops every memoized result
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve a type signature
    ///
    /// ## Arguments
    /// * 'signature' - The signature to resolve
    ///
    /// # Errors
    /// Returns an error if:
    /// - The signature names an element without semantic mapping (`void`, pointers, native ints)
    /// - A referenced type cannot be found or is malformed
    /// - Nesting exceeds the configured recursion depth
    pub fn resolve(&self, signature: &TypeSignature) -> Result<TypeSemantics> {
        self.resolve_with_depth(signature, 0)
            .map(|(semantics, _)| semantics)
    }

    /// Resolve a coded `TypeDefOrRef` reference
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvedTypeReference`] if a `TypeRef` names no known type and
    /// [`crate::Error::InvalidMetadata`] if a `TypeSpec` is not a generic instantiation.
    pub fn resolve_reference(&self, reference: TypeDefOrRef) -> Result<TypeSemantics> {
        self.resolve_reference_with_depth(reference, 0)
            .map(|(semantics, _)| semantics)
    }

    /// Resolve a metadata token that must be a `TypeDefOrRef` coded reference
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadata`] if the token points into another table, plus
    /// every error of [`TypeResolver::resolve_reference`].
    pub fn resolve_token(&self, token: Token) -> Result<TypeSemantics> {
        self.resolve_reference(TypeDefOrRef::from_token(token)?)
    }

    /// Resolve a type definition
    ///
    /// Equal to resolving any coded reference that points at the same definition.
    #[must_use]
    pub fn resolve_type_def(&self, type_def: TypeDef) -> TypeSemantics {
        TypeSemantics::TypeDefinition(type_def)
    }

    /// The type definition a coded reference resolves to
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidMetadata`] if the reference resolves to `Guid`, plus every
    /// error of [`TypeResolver::resolve_reference`].
    pub fn typedef_of(&self, reference: TypeDefOrRef) -> Result<TypeDef> {
        self.resolve_reference(reference)?.typedef()
    }

    /// Internal recursive resolver with depth tracking
    ///
    /// Returns the semantics together with the deepest level the resolution reached, so that
    /// memoized results keep counting against the recursion limit.
    ///
    /// ## Arguments
    /// * 'signature'   - The signature to resolve
    /// * 'depth'       - Indicator of recursion level
    fn resolve_with_depth(
        &self,
        signature: &TypeSignature,
        depth: usize,
    ) -> Result<(TypeSemantics, usize)> {
        if depth >= self.config.max_recursion_depth {
            return Err(RecursionLimit(self.config.max_recursion_depth));
        }

        if let Some(kind) = FundamentalType::from_signature(signature) {
            return Ok((TypeSemantics::Fundamental(kind), depth));
        }

        match signature {
            TypeSignature::Object => Ok((TypeSemantics::Object, depth)),
            TypeSignature::Class(token) | TypeSignature::ValueType(token) => {
                self.resolve_reference_with_depth(TypeDefOrRef::from_token(*token)?, depth + 1)
            }
            TypeSignature::GenericParamType(index) => {
                Ok((TypeSemantics::GenericTypeIndex(*index), depth))
            }
            TypeSignature::GenericInst(base, args) => {
                self.resolve_generic_instance(base, args, depth + 1)
            }
            // Array-ness is carried by the parameter category, not by the semantics
            TypeSignature::SzArray(element) => self.resolve_with_depth(element, depth + 1),
            other => Err(UnsupportedElementType(format!("{other:?}"))),
        }
    }

    fn resolve_reference_with_depth(
        &self,
        reference: TypeDefOrRef,
        depth: usize,
    ) -> Result<(TypeSemantics, usize)> {
        if depth >= self.config.max_recursion_depth {
            return Err(RecursionLimit(self.config.max_recursion_depth));
        }

        let token = reference.token();
        if self.config.enable_cache {
            if let Some(hit) = self.cache.get(&token) {
                let (semantics, height) = hit.value();
                let reached = depth + height;
                if reached >= self.config.max_recursion_depth {
                    return Err(RecursionLimit(self.config.max_recursion_depth));
                }
                return Ok((semantics.clone(), reached));
            }
        }

        let (semantics, reached) = match reference {
            TypeDefOrRef::TypeDef(type_def) => (self.resolve_type_def(type_def), depth),
            TypeDefOrRef::TypeRef(type_ref) => (self.resolve_type_ref(type_ref)?, depth),
            TypeDefOrRef::TypeSpec(type_spec) => self.resolve_type_spec(type_spec, depth)?,
        };

        if self.config.enable_cache {
            log::debug!("Resolved {} to {:?}", token, semantics);
            let entry = self
                .cache
                .entry(token)
                .or_insert((semantics, reached - depth));
            return Ok((entry.value().0.clone(), reached));
        }

        Ok((semantics, reached))
    }

    fn resolve_type_ref(&self, type_ref: TypeRef) -> Result<TypeSemantics> {
        let row = self.store.type_ref(type_ref)?;
        if row.is_named("System", "Guid") {
            return Ok(TypeSemantics::Guid);
        }

        let type_def = self.store.find_required(&row.namespace, &row.name)?;
        Ok(TypeSemantics::TypeDefinition(type_def))
    }

    fn resolve_type_spec(
        &self,
        type_spec: TypeSpec,
        depth: usize,
    ) -> Result<(TypeSemantics, usize)> {
        let row = self.store.type_spec(type_spec)?;
        match &row.signature.base {
            TypeSignature::GenericInst(base, args) => {
                self.resolve_generic_instance(base, args, depth + 1)
            }
            other => Err(malformed_error!(
                "TypeSpec {} is not a generic instantiation - {:?}",
                row.token,
                other
            )),
        }
    }

    fn resolve_generic_instance(
        &self,
        base: &TypeSignature,
        args: &[TypeSignature],
        depth: usize,
    ) -> Result<(TypeSemantics, usize)> {
        if depth >= self.config.max_recursion_depth {
            return Err(RecursionLimit(self.config.max_recursion_depth));
        }

        let generic_type = match base {
            TypeSignature::Class(token) | TypeSignature::ValueType(token) => {
                self.generic_base(*token)?
            }
            other => {
                return Err(malformed_error!(
                    "Generic instantiation over non-type element - {:?}",
                    other
                ))
            }
        };

        let mut reached = depth;
        let mut generic_args = Vec::with_capacity(args.len());
        for arg in args {
            let (semantics, arg_reached) = self.resolve_with_depth(arg, depth + 1)?;
            reached = reached.max(arg_reached);
            generic_args.push(semantics);
        }

        log::trace!(
            "Instantiated {:?} with {} argument(s)",
            generic_type,
            generic_args.len()
        );

        Ok((
            TypeSemantics::GenericTypeInstance {
                generic_type,
                generic_args,
            },
            reached,
        ))
    }

    fn generic_base(&self, token: Token) -> Result<TypeDef> {
        match TypeDefOrRef::from_token(token)? {
            TypeDefOrRef::TypeDef(type_def) => Ok(type_def),
            TypeDefOrRef::TypeRef(type_ref) => {
                let row = self.store.type_ref(type_ref)?;
                self.store.find_required(&row.namespace, &row.name)
            }
            TypeDefOrRef::TypeSpec(_) => Err(malformed_error!(
                "Generic instantiation base {} is itself an instantiation",
                token
            )),
        }
    }
}
