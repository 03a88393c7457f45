//! Building search expressions from plain values.
//!
//! The output round-trips through [`crate::parse`], so user input can be
//! embedded in a query without worrying about quotes. The clause separator
//! itself can not be escaped: a value containing `) AND (` still splits.

use crate::expression::Operator;
use crate::tags::Tag;
use std::fmt::Display;

/// Backslash-escapes quotes and backslashes.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders one clause, e.g. `(Artist == 'MG\'s')`.
pub fn clause(tag: impl Display, operator: Operator, value: &str) -> String {
    format!("({tag} {operator} '{}')", escape_value(value))
}

/// Joins rendered clauses into one expression.
pub fn join_clauses<I, S>(clauses: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = clauses
        .into_iter()
        .map(|clause| clause.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("({joined})")
}

/// Expression selecting all songs of one album.
///
/// Every album artist gets its own clause, so songs must carry all of them.
pub fn album_expression(albumartist_tag: Tag, artists: &[&str], album: &str) -> String {
    let clauses = artists
        .iter()
        .map(|artist| clause(albumartist_tag, Operator::Equal, artist))
        .chain(std::iter::once(clause(Tag::Album, Operator::Equal, album)));
    join_clauses(clauses)
}
