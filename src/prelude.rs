//! # projscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the projscope library. Import this module to get quick access to the essential
//! types for building metadata and projecting it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all projscope operations
pub use crate::Error;

/// The result type used throughout projscope
pub use crate::Result;

/// Configuration of the projection core
pub use crate::config::{FactoryMatching, ProjectionConfig};

// ================================================================================================
// Metadata Model
// ================================================================================================

/// Metadata token type for referencing table entries
pub use crate::metadata::token::{TableId, Token};

/// Row handles and the coded type reference
pub use crate::metadata::tables::{
    CustomAttribute, Event, Field, MethodDef, Param, Property, TypeDef, TypeDefOrRef, TypeRef,
    TypeSpec,
};

/// Shared rows
pub use crate::metadata::tables::{
    CustomAttributeRc, EventRc, FieldRc, MethodDefRc, ParamRc, PropertyRc, TypeDefRc, TypeRefRc,
    TypeSpecRc,
};

/// Signatures
pub use crate::metadata::signatures::{
    SignatureField, SignatureMethod, SignatureParameter, SignatureTypeSpec, TypeSignature,
};

/// Custom attribute values
pub use crate::metadata::customattributes::{CustomAttributeArgument, CustomAttributeValue};

/// Store boundary and the in-memory store with its builders
pub use crate::metadata::store::{
    EventBuilder, InMemoryStore, MetadataStore, MethodBuilder, PropertyBuilder, TypeDefBuilder,
};

// ================================================================================================
// Projection
// ================================================================================================

/// Type semantics and their resolver
pub use crate::projection::{FundamentalType, TypeResolver, TypeSemantics};

/// Categories and member groups
pub use crate::projection::{
    ArgumentConvention, EventAccessors, ParamCategory, PropertyAccessors, TypeCategory,
    TypeMembers,
};

/// Interface closure
pub use crate::projection::{InterfaceInfo, MemberMap, MethodInfo};

/// Whole-type projection
pub use crate::projection::{
    MethodShape, ProjectionDiagnostic, TypeProjection, TypeProjector,
};
