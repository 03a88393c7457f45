//! # Configuration Module
//!
//! This module handles the search configuration for mpdsift. The only
//! settings the expression engine needs from outside are the tags an `any`
//! clause looks at; the CLI additionally reads the size of its worker pool.
//!
//! ## Location
//!
//! The configuration is a JSON file in the platform-standard config directory:
//! - Linux: `~/.config/mpdsift/config.json`
//! - macOS: `~/Library/Application Support/mpdsift/config.json`
//! - Windows: `%APPDATA%\mpdsift\config.json`
//!
//! A missing file is not an error; the defaults below apply.
//!
//! ## Example
//!
//! ```json
//! {
//!   "any_tags": ["Artist", "AlbumArtist", "Album", "Title"],
//!   "webradio_any_tags": ["Name", "Genre"],
//!   "threads": 4
//! }
//! ```

use crate::expression::EntityKind;
use crate::tags::{Tag, TagSet, WebradioTag};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate configuration file path.
///
/// The file itself may not exist.
///
/// # Errors
///
/// Returns an error if the system config directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use mpdsift::config::get_config_path;
///
/// let path = get_config_path()?;
/// println!("Config location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Please pass --config explicitly."
        )
    })?;

    Ok(config_dir.join("mpdsift").join("config.json"))
}

/// Search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Tags searched by `any` clauses for songs and albums
    pub any_tags: Vec<Tag>,
    /// Tags searched by `any` clauses for webradios
    pub webradio_any_tags: Vec<WebradioTag>,
    /// Worker threads for library searches, rayon's default if unset
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            any_tags: vec![
                Tag::Artist,
                Tag::AlbumArtist,
                Tag::Album,
                Tag::Title,
                Tag::Genre,
                Tag::Composer,
                Tag::Performer,
            ],
            webradio_any_tags: vec![
                WebradioTag::Name,
                WebradioTag::Genre,
                WebradioTag::Country,
                WebradioTag::Description,
            ],
            threads: None,
        }
    }
}

impl SearchConfig {
    /// Reads the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads an explicitly given file, or the default location if it exists.
    ///
    /// An explicit path must exist; a missing default file yields the
    /// default configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = get_config_path()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Tags for `any` clauses against entities of `kind`.
    pub fn any_tag_set(&self, kind: EntityKind) -> TagSet {
        match kind {
            EntityKind::Song | EntityKind::Album => self.any_tags.iter().copied().collect(),
            EntityKind::Webradio => self.webradio_any_tags.iter().copied().collect(),
        }
    }
}
