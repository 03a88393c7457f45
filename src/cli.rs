//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for mpdsift using Clap derive
//! macros. Every command is a thin wrapper around the library: it parses the
//! arguments, calls into [`crate::parser`] or [`crate::library`] and prints
//! plain text, one item per line, so the output can be piped.
//!
//! ## Commands
//!
//! - `parse`: Check an expression and print its clauses
//! - `search`: Print the uris of all library entries matching an expression
//! - `escape`: Build a clause from an untrusted value
//! - `fuzzy`: Test a single fuzzy match
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! mpdsift parse "((Artist == 'Blixa Bargeld') AND (prio >= '5'))"
//! mpdsift search "(any contains 'velvet')" --library songs.json
//! mpdsift search "(Album starts_with 'tab')" --library songs.json --albums
//! mpdsift escape Title == "MG's"
//! ```

use crate::expression::{EntityKind, Operator};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Entity kinds selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum Kind {
    /// Songs from the MPD database
    #[default]
    Song,
    /// Albums, matched with the song vocabulary
    Album,
    /// Webradio directory entries
    Webradio,
}

impl From<Kind> for EntityKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Song => EntityKind::Song,
            Kind::Album => EntityKind::Album,
            Kind::Webradio => EntityKind::Webradio,
        }
    }
}

/// Main application arguments structure.
///
/// Global options are accepted before or after the subcommand.
#[derive(Parser)]
#[command(name = "mpdsift")]
#[command(about = "mpdsift: search expressions for MPD libraries")]
#[command(version)]
pub struct Args {
    /// Configuration file
    ///
    /// Defaults to `mpdsift/config.json` in the platform config directory.
    /// A given file must exist.
    #[arg(long, global = true, env = "MPDSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Parse an expression and print one line per clause
    ///
    /// Exits with an error if any clause is invalid; nothing is printed then.
    Parse {
        /// The search expression, e.g. "((Artist == 'x') AND (Genre contains 'rock'))"
        expression: String,

        /// Vocabulary to resolve tag names against
        #[arg(long, value_enum, default_value_t = Kind::Song)]
        kind: Kind,
    },

    /// Search a JSON library and print the uris of matching entries
    ///
    /// The library file holds a JSON array of songs, albums or webradios,
    /// depending on --kind. Output keeps the library order.
    Search {
        /// The search expression
        expression: String,

        /// Path to the library file
        #[arg(long, short)]
        library: PathBuf,

        /// Kind of entries stored in the library file
        #[arg(long, value_enum, default_value_t = Kind::Song)]
        kind: Kind,

        /// Group a song library into albums before searching
        #[arg(long, conflicts_with = "kind")]
        albums: bool,

        /// Tags searched by `any` clauses, overriding the configuration
        ///
        /// May be given multiple times.
        #[arg(long = "any-tag", value_name = "TAG")]
        any_tags: Vec<String>,

        /// Print the number of matches instead of the uris
        #[arg(long)]
        count: bool,
    },

    /// Render a single clause with the value escaped
    Escape {
        /// Tag or pseudo-filter name
        tag: String,

        /// Operator token, e.g. == or contains
        #[arg(value_parser = parse_operator)]
        operator: Operator,

        /// The value to embed
        value: String,
    },

    /// Check whether NEEDLE fuzzily occurs in HAYSTACK
    ///
    /// Prints "match" or "no match"; the exit status is always zero.
    Fuzzy {
        /// Text to look for
        needle: String,

        /// Text to search in
        haystack: String,
    },

    /// Generate shell completion scripts
    ///
    /// Outputs completion script for the specified shell to stdout.
    /// Redirect to the appropriate file for your shell.
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List tag and filter names (used by completion scripts)
    #[command(hide = true)]
    CompleteTags {
        /// Vocabulary to list
        #[arg(long, value_enum, default_value_t = Kind::Song)]
        kind: Kind,
    },
}

fn parse_operator(token: &str) -> Result<Operator, String> {
    Operator::from_token(token).ok_or_else(|| format!("unknown operator '{token}'"))
}
