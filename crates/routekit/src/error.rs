/// Error types for pattern compilation and path building
///
/// Two independent failure domains:
/// - [`SyntaxError`] is raised while turning a pattern string into a matcher or builder
/// - [`BuildError`] is raised while interpolating parameters back into a path
///
/// Failing to match a path is *not* an error; matchers return `Option`.

use thiserror::Error;

use crate::route::lexer::LexKind;

/// A malformed route pattern
///
/// Every variant carries the byte offset into the pattern string where the
/// problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("missing parameter name at {index}")]
    MissingParameterName { index: usize },

    #[error("pattern cannot start with \"?\" at {index}")]
    PatternStartsWithQuestion { index: usize },

    #[error("capturing groups are not allowed at {index}")]
    CapturingGroup { index: usize },

    #[error("unbalanced pattern at {index}")]
    UnbalancedPattern { index: usize },

    #[error("missing pattern at {index}")]
    MissingPattern { index: usize },

    #[error("dangling escape character at {index}")]
    DanglingEscape { index: usize },

    #[error("unexpected {found} at {index}, expected {expected}")]
    Unexpected {
        found: LexKind,
        index: usize,
        expected: LexKind,
    },

    /// The assembled expression was rejected by the regex engine,
    /// usually because of an invalid custom `(...)` pattern.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },
}

impl SyntaxError {
    pub(crate) fn invalid_regex(pattern: &str, err: impl std::fmt::Display) -> Self {
        SyntaxError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

/// A parameter value that cannot be interpolated into its pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("expected \"{name}\" to not repeat, but got an array")]
    UnexpectedRepeat { name: String },

    #[error("expected \"{name}\" to not be empty")]
    EmptyRepeat { name: String },

    #[error("expected \"{name}\" to match \"{pattern}\", but got \"{segment}\"")]
    InvalidSegment {
        name: String,
        pattern: String,
        segment: String,
    },

    #[error("expected \"{name}\" to be {expected}")]
    Missing { name: String, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_messages() {
        let err = SyntaxError::MissingParameterName { index: 3 };
        assert_eq!(err.to_string(), "missing parameter name at 3");

        let err = SyntaxError::Unexpected {
            found: LexKind::Modifier,
            index: 4,
            expected: LexKind::End,
        };
        assert_eq!(err.to_string(), "unexpected MODIFIER at 4, expected END");
    }

    #[test]
    fn test_build_error_messages() {
        let err = BuildError::Missing {
            name: "id".to_string(),
            expected: "a string",
        };
        assert_eq!(err.to_string(), "expected \"id\" to be a string");

        let err = BuildError::InvalidSegment {
            name: "id".to_string(),
            pattern: "\\d+".to_string(),
            segment: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "expected \"id\" to match \"\\d+\", but got \"abc\""
        );
    }
}
