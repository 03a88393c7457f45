//! # Parse Errors
//!
//! Every way a search expression can be rejected. A failure in any clause
//! rejects the whole expression, so callers only ever see one of these.

use thiserror::Error;

/// Reason a search expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The left side of a clause is neither a known tag nor a pseudo-filter.
    #[error("unknown tag `{0}`")]
    TagUnresolved(String),

    /// The operator token is unknown or not allowed for the tag.
    #[error("unknown operator `{operator}` for `{tag}`")]
    OperatorUnresolved { tag: String, operator: String },

    /// Missing value, bad quoting, dangling escape or non-digit priority.
    #[error("malformed value in clause `{0}`")]
    ValueMalformed(String),

    /// The value is well-formed but can not be interpreted (bad date or number).
    #[error("invalid {expected} `{value}`")]
    ValueOutOfDomain { expected: &'static str, value: String },

    /// The regular expression did not compile.
    #[error("invalid regular expression `{pattern}`: {message}")]
    RegexCompileFailed { pattern: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_text() {
        let err = ParseError::TagUnresolved("Bogus".to_string());
        assert_eq!(err.to_string(), "unknown tag `Bogus`");

        let err = ParseError::OperatorUnresolved {
            tag: "Artist".to_string(),
            operator: "blah".to_string(),
        };
        assert_eq!(err.to_string(), "unknown operator `blah` for `Artist`");

        let err = ParseError::ValueOutOfDomain { expected: "date", value: "asdf".to_string() };
        assert_eq!(err.to_string(), "invalid date `asdf`");
    }
}
