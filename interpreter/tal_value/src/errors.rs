//! Error types for the variant protocol.
//!
//! The value model produces exactly three error shapes: a capability was
//! invoked on a variant that does not support it, a morph found no
//! applicable coercion rule, or a type could not produce an instance for a
//! descriptor (including container range violations). Message text stays
//! terse here; source-position attribution belongs to the evaluator.

use std::fmt;

/// Result of a variant operation.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// An error produced by the value model.
///
/// Factory functions ([`unsupported_operation`], [`morph_error`],
/// [`get_error`], [`range_error`]) are the preferred construction path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// A capability method was called although its paired `can_*` predicate
    /// is false. Always a defect in the caller, never recovered here.
    UnsupportedOperation {
        capability: String,
        variant: String,
    },
    /// No coercion rule of the target type applied to the operand.
    Morph { type_name: String },
    /// A type could not produce an instance for the given descriptor.
    Get {
        type_name: String,
        descriptor: String,
    },
}

impl ScriptError {
    /// The data-type name this error concerns, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ScriptError::UnsupportedOperation { .. } => None,
            ScriptError::Morph { type_name } | ScriptError::Get { type_name, .. } => {
                Some(type_name)
            }
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnsupportedOperation {
                capability,
                variant,
            } => {
                write!(f, "can't {capability} {variant}")
            }
            ScriptError::Morph { type_name } => {
                write!(f, "expected {type_name} here")
            }
            ScriptError::Get {
                type_name,
                descriptor,
            } => {
                write!(f, "can't get {descriptor} of {type_name}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// A capability guard was false but the capability was invoked anyway.
pub fn unsupported_operation(capability: &str, variant: impl fmt::Display) -> ScriptError {
    ScriptError::UnsupportedOperation {
        capability: capability.to_string(),
        variant: variant.to_string(),
    }
}

/// No coercion path to `type_name` applied.
pub fn morph_error(type_name: &str) -> ScriptError {
    ScriptError::Morph {
        type_name: type_name.to_string(),
    }
}

/// `type_name` could not produce an instance for `descriptor`.
pub fn get_error(type_name: &str, descriptor: impl Into<String>) -> ScriptError {
    ScriptError::Get {
        type_name: type_name.to_string(),
        descriptor: descriptor.into(),
    }
}

/// A ranged container operation addressed indexes outside the current
/// content. Ranges fail, they are never clamped.
pub fn range_error(type_name: &str, start: usize, end: usize) -> ScriptError {
    ScriptError::Get {
        type_name: type_name.to_string(),
        descriptor: format!("{start} through {end}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_forms() {
        assert_eq!(
            unsupported_operation("sort", "\"abc\"").to_string(),
            "can't sort \"abc\""
        );
        assert_eq!(morph_error("boolean").to_string(), "expected boolean here");
        assert_eq!(
            range_error("list", 5, 7).to_string(),
            "can't get 5 through 7 of list"
        );
    }

    #[test]
    fn test_type_name_accessor() {
        assert_eq!(morph_error("URL").type_name(), Some("URL"));
        assert_eq!(unsupported_operation("delete", "x").type_name(), None);
    }
}
