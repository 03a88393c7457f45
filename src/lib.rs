//! Search expressions for MPD libraries.
//!
//! mpdsift parses the search language of the myMPD web client, a flat AND of
//! `(tag operator 'value')` clauses, and evaluates it against songs, albums
//! and webradios held in memory.
//!
//! Core modules:
//! - [`parser`] - Expression text to [`ExpressionList`]
//! - [`matcher`] - Evaluation of a list against one entity
//! - [`fuzzy`] - Typo tolerant substring search
//! - [`pattern`] - Case-insensitive Unicode regular expressions
//! - [`entity`] - Songs, albums and webradios as seen by the matcher
//!
//! ### Supporting Modules
//!
//! - [`tags`] - Tag vocabularies and tag sets
//! - [`escape`] - Building expressions from untrusted values
//! - [`library`] - JSON libraries and parallel search over them
//! - [`config`] - Configuration file handling
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use mpdsift::{parse, EntityKind, Song, Tag, TagSet};
//!
//! let list = parse("((Artist contains 'tral') AND (Genre == 'rock'))", EntityKind::Song)?;
//!
//! let mut song = Song::new("music/central.flac");
//! song.add_tag(Tag::Artist, "Central").add_tag(Tag::Genre, "Rock");
//!
//! assert!(list.matches(&song, &TagSet::new()));
//! # Ok::<(), mpdsift::ParseError>(())
//! ```
//!
//! ## Expression Language
//!
//! Clauses are joined by the literal `) AND (`; the outermost parentheses
//! are optional. Values are single or double quoted with backslash escapes.
//!
//! | Operator | Meaning |
//! |----------|---------|
//! | `==`, `!=` | equality after case folding |
//! | `starts_with`, `contains` | prefix / substring |
//! | `=~`, `!~` | regular expression |
//! | `~~` | fuzzy substring |
//!
//! Pseudo-filters such as `modified-since`, `base` or `prio` take their
//! value without an operator. A list is parsed once and can be shared by
//! any number of threads.

pub mod cli;
pub mod completion;
pub mod config;
pub mod entity;
pub mod error;
pub mod escape;
pub mod expression;
pub mod fuzzy;
pub mod library;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod pattern;
pub mod tags;

pub use entity::{Album, EntityView, Scalar, Song, Stream, Webradio};
pub use error::ParseError;
pub use expression::{EntityKind, ExpressionList, Operator, Predicate, Selector, Value};
pub use fuzzy::fuzzy_match;
pub use library::Library;
pub use matcher::matches;
pub use parser::parse;
pub use tags::{Tag, TagId, TagSet, WebradioTag};
