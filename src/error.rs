use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidMetadata {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidMetadata {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is a resolution-time failure. None of them is retried internally, and a failure
/// only aborts the top-level request that triggered it (for example, projecting a single type).
/// Callers are expected to surface them as diagnostics tied to the namespace-qualified name of the
/// originating type.
///
/// # Error Categories
///
/// ## Metadata Errors
/// - [`Error::InvalidMetadata`] - A coded reference or signature is structurally malformed
/// - [`Error::RowNotFound`] - A handle has no row in the store
/// - [`Error::UnresolvedTypeReference`] - Name lookup of a `TypeRef` failed
/// - [`Error::UnsupportedElementType`] - A signature element has no semantic mapping
///
/// ## Member Shape Errors
/// - [`Error::MalformedProperty`] / [`Error::MalformedEvent`] - Accessor cardinality violated
/// - [`Error::InconsistentAccessorStaticness`] - Paired accessors disagree on static-ness
/// - [`Error::InconsistentMemberKind`] - Overloads disagree on static-ness
/// - [`Error::FactoryMethodNotFound`] - No activation factory method for a constructor
///
/// ## Resolution Limits
/// - [`Error::RecursionLimit`] - Signature nesting exceeded the configured depth
///
/// # Examples
///
/// ```rust
/// use projscope::Error;
///
/// fn report(err: &Error) -> String {
///     match err {
///         Error::FactoryMethodNotFound(type_name) => format!("no factory for {type_name}"),
///         Error::InvalidMetadata { message, .. } => format!("bad metadata: {message}"),
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A coded reference or signature is structurally malformed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid metadata - {file}:{line}: {message}")]
    InvalidMetadata {
        /// The message to be printed for the InvalidMetadata error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A handle was passed that has no row in the store.
    ///
    /// Handles must originate from the store they are used with.
    #[error("No metadata row for token - {0}")]
    RowNotFound(Token),

    /// Name lookup of an external type reference failed.
    ///
    /// The associated value is the namespace-qualified name that could not be found.
    #[error("Unresolved type reference - {0}")]
    UnresolvedTypeReference(String),

    /// A signature element has no semantic mapping, e.g. `void` or a pointer where only
    /// value-bearing types are valid.
    #[error("Unsupported element type - {0}")]
    UnsupportedElementType(String),

    /// A property violates the accessor cardinality rules.
    #[error("Malformed property {name}: {reason}")]
    MalformedProperty {
        /// Name of the offending property
        name: String,
        /// What rule was violated
        reason: String,
    },

    /// An event violates the accessor cardinality rules.
    #[error("Malformed event {name}: {reason}")]
    MalformedEvent {
        /// Name of the offending event
        name: String,
        /// What rule was violated
        reason: String,
    },

    /// The accessors of a property or event disagree on static-ness.
    ///
    /// The associated value is the name of the property or event.
    #[error("Accessors of {0} disagree on static-ness")]
    InconsistentAccessorStaticness(String),

    /// Overloads sharing one member name across an interface closure disagree on static-ness.
    ///
    /// The associated value is the member name.
    #[error("Overloads of {0} mix static and instance members")]
    InconsistentMemberKind(String),

    /// No activation factory method matches a parameterized constructor.
    ///
    /// The associated value is the namespace-qualified name of the owning type.
    #[error("Couldn't find factory method for {0}")]
    FactoryMethodNotFound(String),

    /// Recursion limit reached.
    ///
    /// To prevent stack overflow on pathological signatures, a maximum nesting depth is
    /// enforced. The associated value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
