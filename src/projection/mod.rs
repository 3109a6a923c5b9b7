//! Semantic core of a metadata-driven language projection.
//!
//! This module answers the questions an emitter asks while turning Windows Runtime style type
//! metadata into bindings for another language: what a type usage means, how a type's members
//! group into methods, properties and events, how each parameter crosses the call boundary,
//! which interfaces a type must implement, and under which ABI name each method is reached.
//!
//! # Key Components
//!
//! - [`TypeResolver`]: Signatures and coded references to [`TypeSemantics`], memoized per token
//! - [`members`]: Constructors, plain methods, properties and events of a type
//! - [`params`]: Parameter categories and argument conventions
//! - [`closure`]: Interface closure and merged members of a type
//! - [`abi`]: ABI names and activation factory lookup
//! - [`TypeProjector`]: All of the above for one type, or for a whole store in parallel
//!
//! # Examples
//!
//! ```rust
//! use projscope::prelude::*;
//!
//! let store = InMemoryStore::new();
//! let iterable = TypeDefBuilder::new("Windows.Foundation.Collections", "IIterable`1")
//!     .interface()
//!     .generic_param("T")
//!     .method("First", |m| m.returns(TypeSignature::Object))
//!     .build(&store)?;
//! let strings = store.add_type_spec(TypeSignature::generic_class(
//!     iterable.token(),
//!     vec![TypeSignature::String],
//! ));
//!
//! let resolver = TypeResolver::new(&store);
//! let semantics = resolver.resolve(&TypeSignature::Class(strings.token()))?;
//! assert_eq!(
//!     semantics,
//!     TypeSemantics::GenericTypeInstance {
//!         generic_type: iterable,
//!         generic_args: vec![FundamentalType::String.into()],
//!     }
//! );
//! # Ok::<(), projscope::Error>(())
//! ```

pub mod abi;
pub mod category;
pub mod closure;
pub mod members;
pub mod params;
mod projector;
mod resolver;
mod semantics;

pub use abi::{abi_name, DEFAULT_CONSTRUCTOR_ABI_NAME};
pub use category::TypeCategory;
pub use closure::{InterfaceInfo, MemberMap, MethodInfo};
pub use members::{EventAccessors, PropertyAccessors, TypeMembers};
pub use params::{ArgumentConvention, MethodParam, MethodSignature, ParamCategory};
pub use projector::{FieldShape, MethodShape, ProjectionDiagnostic, TypeProjection, TypeProjector};
pub use resolver::TypeResolver;
pub use semantics::{FundamentalType, TypeSemantics};
