//! # mpdsift - Search Expressions for MPD Libraries
//!
//! Command-line front end of the mpdsift library. It checks expressions,
//! runs them over JSON exports of an MPD library or webradio directory and
//! helps building expressions from untrusted values.
//!
//! ## Usage
//!
//! ```bash
//! # Check an expression
//! mpdsift parse "((Artist == 'Einstürzende Neubauten') AND (Date starts_with '19'))"
//!
//! # Search songs, albums or webradios
//! mpdsift search "(any ~~ 'velvet undergruond')" --library songs.json
//! mpdsift search "(Album == 'tabula rasa')" --library songs.json --albums
//! mpdsift search "(bitrate '128')" --library radios.json --kind webradio
//!
//! # Build a clause
//! mpdsift escape Artist == "Booker T. & the MG's"
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use mpdsift::cli::{self, Command};
use mpdsift::config::SearchConfig;
use mpdsift::expression::EntityKind;
use mpdsift::library::Library;
use mpdsift::tags::{TagId, TagSet};
use mpdsift::{completion, escape, fuzzy, parser, Tag, WebradioTag};

/// Main entry point for mpdsift.
///
/// # Error Handling
///
/// Uses `anyhow::Result` for rich error context. An expression that does not
/// parse ends the program with a non-zero exit status.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug mpdsift search ...` - Enable debug logging
/// - `RUST_LOG=mpdsift::matcher=trace mpdsift search ...` - Show failing clauses
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = SearchConfig::load(args.config.as_deref())?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set up search threads")?;
        debug!("Using {threads} search threads");
    }

    match args.command {
        Command::Parse { expression, kind } => {
            let list = parser::parse(&expression, kind.into())
                .with_context(|| format!("Invalid search expression: {expression}"))?;
            for predicate in &list {
                println!("{predicate}");
            }
        }
        Command::Search { expression, library, kind, albums, any_tags, count } => {
            let mut entries = Library::load(&library, kind.into())?;
            if albums {
                entries = entries.into_albums();
                info!("Grouped library into {} albums", entries.len());
            }

            let tags = if any_tags.is_empty() {
                config.any_tag_set(entries.kind())
            } else {
                resolve_any_tags(&any_tags, entries.kind())?
            };

            let found = entries.search(&expression, &tags)?;
            if count {
                println!("{}", found.len());
            } else {
                for uri in found {
                    println!("{uri}");
                }
            }
        }
        Command::Escape { tag, operator, value } => {
            println!("{}", escape::clause(&tag, operator, &value));
        }
        Command::Fuzzy { needle, haystack } => {
            let hit = fuzzy::fuzzy_match(&haystack, &needle);
            println!("{}", if hit { "match" } else { "no match" });
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        Command::CompleteTags { kind } => {
            completion::print_tag_completions(kind.into());
        }
    }

    Ok(())
}

/// Resolves `--any-tag` names in the vocabulary of `kind`.
fn resolve_any_tags(names: &[String], kind: EntityKind) -> Result<TagSet> {
    names
        .iter()
        .map(|name| {
            let tag = match kind {
                EntityKind::Song | EntityKind::Album => Tag::parse_name(name).map(TagId::Song),
                EntityKind::Webradio => WebradioTag::parse_name(name).map(TagId::Webradio),
            };
            tag.ok_or_else(|| anyhow::anyhow!("Unknown tag for --any-tag: {name}"))
        })
        .collect()
}
