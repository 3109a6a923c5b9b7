//! Projection configuration
//!
//! This module provides the knobs that change how the projection core resolves types and
//! picks activation factory methods. The defaults reproduce the established projection
//! behaviour; the presets trade compatibility for stricter matching or lower memory use.

/// How a parameterized constructor is matched against the methods of its activation factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FactoryMatching {
    /// Pick the first factory method with the same number of parameters
    ///
    /// Two factory methods of equal arity are indistinguishable under this rule; the first one
    /// in declaration order wins.
    #[default]
    ParameterCount,
    /// Pick the first factory method whose parameters resolve to the same type semantics
    ParameterTypes,
}

/// Configuration for the projection core
///
/// Passed to [`crate::projection::TypeResolver`] and [`crate::projection::TypeProjector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Rule for matching constructors to activation factory methods
    pub factory_matching: FactoryMatching,

    /// Maximum nesting depth of generic instantiations while resolving a signature (default: 100)
    pub max_recursion_depth: usize,

    /// Memoize the resolution of coded type references
    pub enable_cache: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            factory_matching: FactoryMatching::ParameterCount,
            max_recursion_depth: 100,
            enable_cache: true,
        }
    }
}

impl ProjectionConfig {
    /// Creates the configuration matching established projection output
    #[must_use]
    pub fn compatible() -> Self {
        Self::default()
    }

    /// Creates a configuration that matches factory methods by parameter types
    ///
    /// Constructors whose factory has several overloads of the same arity resolve to the
    /// overload with matching parameter types instead of the first declared one.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            factory_matching: FactoryMatching::ParameterTypes,
            ..Self::default()
        }
    }

    /// Creates a configuration without memoization
    ///
    /// Every query resolves from the store again. Useful for stores that are cheap to query
    /// and projections that touch each type once.
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            enable_cache: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectionConfig::default();
        assert_eq!(config.factory_matching, FactoryMatching::ParameterCount);
        assert_eq!(config.max_recursion_depth, 100);
        assert!(config.enable_cache);
        assert_eq!(config, ProjectionConfig::compatible());
    }

    #[test]
    fn test_strict_config() {
        let config = ProjectionConfig::strict();
        assert_eq!(config.factory_matching, FactoryMatching::ParameterTypes);
        assert!(config.enable_cache);
    }

    #[test]
    fn test_uncached_config() {
        let config = ProjectionConfig::uncached();
        assert!(!config.enable_cache);
        assert_eq!(config.factory_matching, FactoryMatching::ParameterCount);
    }
}
