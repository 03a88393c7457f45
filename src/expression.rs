//! # Parsed Search Expressions
//!
//! An [`ExpressionList`] is the compiled form of a query such as
//! `((Artist contains 'tral') AND (prio >= 5))`: one [`Predicate`] per
//! clause, all of which must hold. Lists are immutable once built and can be
//! shared between threads that match different entities.

use crate::entity::EntityView;
use crate::matcher;
use crate::pattern::Pattern;
use crate::tags::{TagId, TagSet};
use std::fmt;

/// Selects which tag vocabulary and pseudo-filters a query may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    #[default]
    Song,
    /// Albums share the song vocabulary.
    Album,
    Webradio,
}

/// Comparison applied by a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    StartsWith,
    Contains,
    NotEqual,
    Regex,
    NotRegex,
    Greater,
    GreaterEqual,
    Fuzzy,
}

impl Operator {
    /// Maps an operator token written in a clause.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "contains" => Some(Operator::Contains),
            "starts_with" => Some(Operator::StartsWith),
            "==" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            "=~" => Some(Operator::Regex),
            "!~" => Some(Operator::NotRegex),
            "~~" => Some(Operator::Fuzzy),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::StartsWith => "starts_with",
            Operator::Contains => "contains",
            Operator::NotEqual => "!=",
            Operator::Regex => "=~",
            Operator::NotRegex => "!~",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Fuzzy => "~~",
        }
    }

    /// Negated operators fail on the first matching tag value instead of
    /// succeeding on it.
    pub fn is_negated(self) -> bool {
        matches!(self, Operator::NotEqual | Operator::NotRegex)
    }

    pub fn is_regex(self) -> bool {
        matches!(self, Operator::Regex | Operator::NotRegex)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Left side of a clause: a real tag or one of the pseudo-filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Tag(TagId),
    /// Any tag of the caller supplied [`TagSet`]
    AnyTag,
    ModifiedSince,
    AddedSince,
    File,
    Base,
    Prio,
    Bitrate,
    AudioFormat,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => tag.fmt(f),
            Selector::AnyTag => f.write_str("any"),
            Selector::ModifiedSince => f.write_str("modified-since"),
            Selector::AddedSince => f.write_str("added-since"),
            Selector::File => f.write_str("file"),
            Selector::Base => f.write_str("base"),
            Selector::Prio => f.write_str("prio"),
            Selector::Bitrate => f.write_str("bitrate"),
            Selector::AudioFormat => f.write_str("AudioFormat"),
        }
    }
}

/// Interpreted clause value. Which variant a predicate carries follows from
/// its selector and operator alone.
#[derive(Debug, Clone)]
pub enum Value {
    /// Compared verbatim against the uri, or not compared at all
    Raw,
    /// Case-folded text for the string operators
    Folded(String),
    /// Epoch for dates, plain integer for prio and bitrate
    Number(i64),
    Pattern(Pattern),
}

/// One parsed clause.
#[derive(Debug, Clone)]
pub struct Predicate {
    selector: Selector,
    operator: Operator,
    raw: String,
    value: Value,
}

impl Predicate {
    pub(crate) fn new(selector: Selector, operator: Operator, raw: String, value: Value) -> Self {
        Self {
            selector,
            operator,
            raw,
            value,
        }
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The unescaped value as written in the clause.
    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn folded(&self) -> Option<&str> {
        match &self.value {
            Value::Folded(text) => Some(text),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<i64> {
        match self.value {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        match &self.value {
            Value::Pattern(pattern) => Some(pattern),
            _ => None,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.selector, self.operator, self.raw)
    }
}

/// Conjunction of predicates. The empty list matches everything.
#[derive(Debug, Clone, Default)]
pub struct ExpressionList {
    predicates: Vec<Predicate>,
}

impl ExpressionList {
    pub(crate) fn from_predicates(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    /// Shorthand for [`matcher::matches`].
    pub fn matches<E: EntityView + ?Sized>(&self, entity: &E, any_tags: &TagSet) -> bool {
        matcher::matches(self, entity, any_tags)
    }
}

impl<'a> IntoIterator for &'a ExpressionList {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}
