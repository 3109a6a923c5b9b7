//! Metadata model consumed by the projection core.
//!
//! This module holds the decoded shape of ECMA-335 / Windows Runtime metadata that the
//! projection rules read. Nothing here parses binary `.winmd` files; rows are provided by a
//! [`store::MetadataStore`] implementation.
//!
//! # Key Components
//!
//! - [`token`] - Metadata table row references
//! - [`tables`] - Row handles and the decoded rows of every table the core looks at
//! - [`signatures`] - Decoded method, field and type-spec signatures
//! - [`customattributes`] - Decoded custom attribute values and well-known attribute names
//! - [`store`] - The read-only store trait and an in-memory implementation
//!
//! # Examples
//!
//! ```rust
//! use projscope::metadata::{
//!     signatures::TypeSignature,
//!     store::{InMemoryStore, MetadataStore, TypeDefBuilder},
//! };
//!
//! let store = InMemoryStore::new();
//! let point = TypeDefBuilder::new("Windows.Foundation", "Point")
//!     .structure()
//!     .field("X", TypeSignature::R4)
//!     .field("Y", TypeSignature::R4)
//!     .build(&store)?;
//!
//! assert_eq!(store.type_def(point)?.fields.len(), 2);
//! # Ok::<(), projscope::Error>(())
//! ```

/// Implementation of custom attribute values
pub mod customattributes;
/// Implementation of method, field and type signatures
pub mod signatures;
/// Implementation of the metadata store boundary
pub mod store;
/// Implementation of the metadata tables
pub mod tables;
/// Implementation of metadata tokens
pub mod token;
