// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # projscope
//!
//! The semantic resolution core of a metadata-driven language projection. Given Windows Runtime
//! style type metadata (ECMA-335 tables plus the platform attributes layered on top),
//! `projscope` answers the questions a bindings generator asks about every type it emits.
//!
//! ## Features
//!
//! - **Type semantics** - Resolve signatures and coded references into a closed set of meanings
//! - **Member classification** - Constructors, methods, properties and events with validated accessors
//! - **Parameter analysis** - In, out and the three array passing styles, plus argument conventions
//! - **Interface closure** - Required interfaces with generic arguments substituted, deduplicated
//! - **ABI names** - Overload names and activation factory lookup for constructors
//! - **Parallel projection** - Project every type of a store at once
//!
//! ## Quick Start
//!
//! ```rust
//! use projscope::prelude::*;
//!
//! let store = InMemoryStore::new();
//! let stringable = TypeDefBuilder::new("Windows.Foundation", "IStringable")
//!     .interface()
//!     .method("ToString", |m| m.returns(TypeSignature::String))
//!     .build(&store)?;
//! let widget = TypeDefBuilder::new("Demo", "Widget")
//!     .class()
//!     .implements(stringable)
//!     .constructor(|c| c)
//!     .build(&store)?;
//!
//! let projector = TypeProjector::new(&store);
//! let projection = projector.project(widget)?;
//!
//! assert_eq!(projection.category, TypeCategory::Class);
//! assert_eq!(projection.required_interfaces[0].type_def, stringable);
//! assert_eq!(projection.shapes[0].abi_name, "_default_ctor");
//! # Ok::<(), projscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Tokens, table rows, signatures, attribute values and the store boundary
//! - [`projection`] - The resolution and classification rules
//! - [`config`] - Knobs for factory matching, recursion depth and caching
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! Metadata is read through the [`metadata::store::MetadataStore`] trait. Loading `.winmd`
//! files is not part of this crate; [`metadata::store::InMemoryStore`] holds rows built in
//! code.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Failures abort the request
//! they happened in and never leave partial results in the resolution cache:
//!
//! ```rust
//! use projscope::{prelude::*, Error};
//!
//! let store = InMemoryStore::new();
//! let resolver = TypeResolver::new(&store);
//!
//! match resolver.resolve(&TypeSignature::Void) {
//!     Err(Error::UnsupportedElementType(what)) => println!("no meaning for {what}"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#[macro_use]
pub(crate) mod error;

#[cfg(test)]
pub(crate) mod test;

/// Projection configuration
pub mod config;
/// Metadata model consumed by the projection core
pub mod metadata;
/// Convenient re-exports of the most commonly used types
pub mod prelude;
/// Semantic resolution and classification rules
pub mod projection;

/// `projscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `projscope` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;
