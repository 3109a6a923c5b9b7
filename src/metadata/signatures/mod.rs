//! Decoded signatures as exposed by the metadata store.
//!
//! Blob decoding belongs to the store; this module only defines the already-decoded shapes the
//! projection core consumes. Signatures reference other types through metadata tokens that point
//! into the `TypeDef`, `TypeRef` or `TypeSpec` tables.
//!
//! # Signature Types
//!
//! - [`TypeSignature`] - A single type usage (element type tag plus payload)
//! - [`SignatureMethod`] - Return slot and parameters of a method (II.23.2.1)
//! - [`SignatureField`] - Type of a field (II.23.2.4)
//! - [`SignatureTypeSpec`] - Generic instantiation referenced by a `TypeSpec` (II.23.2.14)
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.2 - Blobs and Signatures

mod types;

pub use types::*;
