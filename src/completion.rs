//! # Shell Completion Module
//!
//! This module provides shell completion functionality for mpdsift:
//! - Generation of completion scripts for various shells
//! - The list of tag and filter names an expression may start a clause with
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! mpdsift completion bash > ~/.local/share/bash-completion/completions/mpdsift
//!
//! # Generate zsh completions
//! mpdsift completion zsh > ~/.config/zsh/completions/_mpdsift
//! ```

use crate::expression::EntityKind;
use crate::parser::filter_names;
use crate::tags::{Tag, WebradioTag};
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Every name a clause of `kind` may start with: tags first, then filters.
pub fn tag_completions(kind: EntityKind) -> Vec<&'static str> {
    let tags: Vec<&'static str> = match kind {
        EntityKind::Song | EntityKind::Album => Tag::all().map(Tag::name).collect(),
        EntityKind::Webradio => WebradioTag::all().map(WebradioTag::name).collect(),
    };
    tags.into_iter().chain(filter_names(kind).iter().copied()).collect()
}

/// Print tag completions one per line
pub fn print_tag_completions(kind: EntityKind) {
    for name in tag_completions(kind) {
        println!("{name}");
    }
}
