//! Decoded custom attribute values.
//!
//! Projection rules hang off a handful of platform attributes
//! (`Windows.Foundation.Metadata.OverloadAttribute`, `ActivatableAttribute`,
//! `ExclusiveToAttribute`, `System.FlagsAttribute`). The store hands their blobs over already
//! decoded into a [`CustomAttributeValue`]; the names below identify them.

mod types;

pub use types::*;

/// Namespace of the platform metadata attributes
pub const PLATFORM_METADATA_NAMESPACE: &str = "Windows.Foundation.Metadata";

/// Attribute carrying the disambiguated ABI name of an overloaded method
pub const OVERLOAD_ATTRIBUTE: &str = "OverloadAttribute";

/// Attribute linking a runtime class to its activation factory
pub const ACTIVATABLE_ATTRIBUTE: &str = "ActivatableAttribute";

/// Attribute restricting an interface to a single runtime class
pub const EXCLUSIVE_TO_ATTRIBUTE: &str = "ExclusiveToAttribute";

/// Namespace of `FlagsAttribute`
pub const SYSTEM_NAMESPACE: &str = "System";

/// Attribute marking a bit-flags enum
pub const FLAGS_ATTRIBUTE: &str = "FlagsAttribute";
