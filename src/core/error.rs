//! Errors reported while configuring an acceleration structure.
//!
//! Building and querying a hierarchy cannot fail: an empty primitive
//! list gives an empty hierarchy, and a broken internal invariant is a
//! bug which panics instead of producing a wrong tree.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BvhError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BvhError {
    /// A parameter has a value outside of its valid range.
    #[error("invalid value {value} for parameter \"{name}\": {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Offending value, formatted.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Split method name that is neither naive nor SAH.
    #[error("unknown BVH split method \"{0}\"")]
    UnknownSplitMethod(String),

    /// A parameter was given with the wrong type.
    #[error("parameter \"{name}\" expected to be of type {expected}")]
    ParamType {
        /// Parameter name.
        name: String,
        /// The type the lookup asked for.
        expected: &'static str,
    },
}
