//! Regular expressions for the `=~` and `!~` operators.

use crate::error::ParseError;
use crate::normalize::normalize;
use log::{debug, error};
use regex::Regex;

/// A case-folded, compiled regular expression owned by one predicate.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Folds `source` like any clause value and compiles it.
    ///
    /// `source` is the already unquoted clause value, so inside an
    /// expression a regex escape needs a doubled backslash (`'\\d+'`).
    /// Folding applies to the whole pattern text: class escapes are
    /// lowercased too, which turns `\W` into `\w`, and literal letters lose
    /// their diacritics just as the tag values they are matched against.
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        let folded = normalize(source);
        debug!("Compiling regex: \"{folded}\"");
        match Regex::new(&folded) {
            Ok(regex) => Ok(Self { regex }),
            Err(e) => {
                error!("Regex compilation failed for \"{folded}\": {e}");
                Err(ParseError::RegexCompileFailed {
                    pattern: source.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Unanchored search in `candidate`, which the caller has already folded.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
