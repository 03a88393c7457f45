//! # Search Expression Parser
//!
//! Grammar, informally:
//!
//! ```text
//! expr_list := clause ( ") AND (" clause )*
//! clause    := tag SP (op SP)? value
//! value     := "'" chars "'" | '"' chars '"' | digit+
//! ```
//!
//! There is no real tokenizer: the expression is split on the literal
//! `) AND (` separator and every clause is read left to right. A backslash
//! inside a quoted value escapes the next character. Any failing clause
//! rejects the whole expression.

use crate::error::ParseError;
use crate::expression::{EntityKind, ExpressionList, Operator, Predicate, Selector, Value};
use crate::normalize::{normalize, parse_date};
use crate::pattern::Pattern;
use crate::tags::{Tag, TagId, WebradioTag};
use log::{debug, error};

/// Separator between two clauses.
pub const CLAUSE_SEPARATOR: &str = ") AND (";

/// Parses `expression` with the tag vocabulary of `kind`.
///
/// The empty string yields an empty list, which matches everything.
///
/// ```
/// use mpdsift::{parse, EntityKind};
///
/// let list = parse("((Artist contains 'tral') AND (prio >= 5))", EntityKind::Song)?;
/// assert_eq!(list.len(), 2);
/// assert!(parse("((Bogus == 'x'))", EntityKind::Song).is_err());
/// # Ok::<(), mpdsift::ParseError>(())
/// ```
pub fn parse(expression: &str, kind: EntityKind) -> Result<ExpressionList, ParseError> {
    if expression.is_empty() {
        return Ok(ExpressionList::default());
    }
    let predicates = expression
        .split(CLAUSE_SEPARATOR)
        .map(|clause| parse_clause(clause, kind))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| error!("Can not parse search expression \"{expression}\": {e}"))?;
    Ok(ExpressionList::from_predicates(predicates))
}

fn parse_clause(clause: &str, kind: EntityKind) -> Result<Predicate, ParseError> {
    let clause = clause.trim_matches(|c| c == '(' || c == ')' || c == ' ');
    debug!("Parsing expression: {clause}");

    let (tag_token, rest) = next_token(clause);
    let selector = resolve_selector(tag_token, kind)
        .ok_or_else(|| ParseError::TagUnresolved(tag_token.to_string()))?;

    let (operator, rest) = resolve_operator(selector, tag_token, rest)?;
    if rest.is_empty() {
        return Err(ParseError::ValueMalformed(clause.to_string()));
    }

    let raw = match selector {
        Selector::Prio => digits(rest),
        _ => unquote(rest),
    }
    .ok_or_else(|| ParseError::ValueMalformed(clause.to_string()))?;

    let value = interpret(selector, operator, &raw)?;
    let predicate = Predicate::new(selector, operator, raw, value);
    debug!("Parsed expression: {predicate}");
    Ok(predicate)
}

/// Splits off everything up to the first space, skipping the spaces after it.
fn next_token(text: &str) -> (&str, &str) {
    match text.split_once(' ') {
        Some((token, rest)) => (token, rest.trim_start_matches(' ')),
        None => (text, ""),
    }
}

fn resolve_selector(token: &str, kind: EntityKind) -> Option<Selector> {
    match kind {
        EntityKind::Song | EntityKind::Album => Tag::parse_name(token)
            .map(|tag| Selector::Tag(TagId::Song(tag)))
            .or_else(|| song_filter(token)),
        EntityKind::Webradio => WebradioTag::parse_name(token)
            .map(|tag| Selector::Tag(TagId::Webradio(tag)))
            .or_else(|| webradio_filter(token)),
    }
}

/// Pseudo-filter names accepted besides the tag names of `kind`.
pub fn filter_names(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Song | EntityKind::Album => &[
            "any",
            "modified-since",
            "added-since",
            "file",
            "base",
            "prio",
            "AudioFormat",
        ],
        EntityKind::Webradio => &["any", "bitrate"],
    }
}

fn song_filter(token: &str) -> Option<Selector> {
    let filter = match token.to_ascii_lowercase().as_str() {
        "any" => Selector::AnyTag,
        "modified-since" => Selector::ModifiedSince,
        "added-since" => Selector::AddedSince,
        "file" => Selector::File,
        "base" => Selector::Base,
        "prio" => Selector::Prio,
        "audioformat" => Selector::AudioFormat,
        _ => return None,
    };
    Some(filter)
}

fn webradio_filter(token: &str) -> Option<Selector> {
    let filter = match token.to_ascii_lowercase().as_str() {
        "any" => Selector::AnyTag,
        "bitrate" => Selector::Bitrate,
        _ => return None,
    };
    Some(filter)
}

/// Returns the operator and the text following it.
fn resolve_operator<'a>(
    selector: Selector,
    tag_token: &str,
    rest: &'a str,
) -> Result<(Operator, &'a str), ParseError> {
    match selector {
        Selector::ModifiedSince | Selector::AddedSince | Selector::Bitrate => Ok((Operator::Greater, rest)),
        Selector::Base => Ok((Operator::StartsWith, rest)),
        Selector::File => Ok((Operator::Equal, rest)),
        Selector::Prio => match next_token(rest) {
            (">=", value) => Ok((Operator::GreaterEqual, value)),
            _ => Ok((Operator::Greater, rest)),
        },
        Selector::Tag(_) | Selector::AnyTag | Selector::AudioFormat => {
            let (token, value) = next_token(rest);
            let operator = Operator::from_token(token).ok_or_else(|| ParseError::OperatorUnresolved {
                tag: tag_token.to_string(),
                operator: token.to_string(),
            })?;
            Ok((operator, value))
        }
    }
}

/// Strips the surrounding quotes and resolves backslash escapes.
///
/// Both quote characters must be the same. A backslash right before the
/// closing quote has nothing left to escape and is an error.
fn unquote(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = text[quote.len_utf8()..].strip_suffix(quote)?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(chars.next()?);
        } else {
            value.push(c);
        }
    }
    Some(value)
}

/// Priority values are plain digits; a quoted digit string is accepted too.
fn digits(text: &str) -> Option<String> {
    let text = match text.chars().next() {
        Some(quote @ ('\'' | '"')) => text[1..].strip_suffix(quote)?,
        _ => text,
    };
    (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())).then(|| text.to_string())
}

fn interpret(selector: Selector, operator: Operator, raw: &str) -> Result<Value, ParseError> {
    match selector {
        Selector::ModifiedSince | Selector::AddedSince => parse_date(raw)
            .map(Value::Number)
            .ok_or_else(|| ParseError::ValueOutOfDomain {
                expected: "date",
                value: raw.to_string(),
            }),
        Selector::Prio | Selector::Bitrate => raw
            .parse::<i64>()
            .map(Value::Number)
            .map_err(|_| ParseError::ValueOutOfDomain {
                expected: "number",
                value: raw.to_string(),
            }),
        // Accepted for compatibility, never evaluated
        Selector::AudioFormat => Ok(Value::Raw),
        Selector::File | Selector::Base => Ok(Value::Raw),
        Selector::Tag(_) | Selector::AnyTag if operator.is_regex() => Pattern::compile(raw).map(Value::Pattern),
        Selector::Tag(_) | Selector::AnyTag => Ok(Value::Folded(normalize(raw))),
    }
}
