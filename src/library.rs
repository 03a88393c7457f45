//! # Library Module
//!
//! Loads songs, albums or webradios from JSON and runs a search expression
//! over all of them. Matching is read-only, so entities are tested in
//! parallel with one shared [`ExpressionList`].

use crate::entity::{Album, EntityView, Song, Webradio};
use crate::expression::{EntityKind, ExpressionList};
use crate::parser::parse;
use crate::tags::{Tag, TagSet};
use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A homogeneous collection of searchable entities.
#[derive(Debug, Clone)]
pub enum Library {
    Songs(Vec<Song>),
    Albums(Vec<Album>),
    Webradios(Vec<Webradio>),
}

impl Library {
    /// Parses a JSON array of entities of the given kind.
    pub fn from_json(json: &str, kind: EntityKind) -> Result<Self> {
        let library = match kind {
            EntityKind::Song => Library::Songs(serde_json::from_str(json).context("Invalid song list")?),
            EntityKind::Album => Library::Albums(serde_json::from_str(json).context("Invalid album list")?),
            EntityKind::Webradio => {
                Library::Webradios(serde_json::from_str(json).context("Invalid webradio list")?)
            }
        };
        Ok(library)
    }

    /// Reads a JSON library file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a
    /// JSON array of `kind` entities.
    pub fn load(path: &Path, kind: EntityKind) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read library {}", path.display()))?;
        let library = Self::from_json(&content, kind)
            .with_context(|| format!("Failed to load library {}", path.display()))?;
        info!("Loaded {} entries from {}", library.len(), path.display());
        Ok(library)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Library::Songs(_) => EntityKind::Song,
            Library::Albums(_) => EntityKind::Album,
            Library::Webradios(_) => EntityKind::Webradio,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Library::Songs(songs) => songs.len(),
            Library::Albums(albums) => albums.len(),
            Library::Webradios(radios) => radios.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Turns a song library into an album library.
    pub fn into_albums(self) -> Self {
        match self {
            Library::Songs(songs) => Library::Albums(group_albums(&songs)),
            other => other,
        }
    }

    /// Uris of all entities matching an already parsed expression.
    pub fn matching_uris(&self, list: &ExpressionList, any_tags: &TagSet) -> Vec<String> {
        match self {
            Library::Songs(songs) => uris(filter_entities(songs, list, any_tags)),
            Library::Albums(albums) => uris(filter_entities(albums, list, any_tags)),
            Library::Webradios(radios) => uris(filter_entities(radios, list, any_tags)),
        }
    }

    /// Parses `expression` for this library's kind and returns the uris of
    /// all matching entities, in library order.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression does not parse; nothing is
    /// matched in that case.
    pub fn search(&self, expression: &str, any_tags: &TagSet) -> Result<Vec<String>> {
        let list = parse(expression, self.kind())
            .with_context(|| format!("Invalid search expression: {expression}"))?;
        let found = self.matching_uris(&list, any_tags);
        debug!("{} of {} entries match \"{expression}\"", found.len(), self.len());
        Ok(found)
    }
}

/// Entities of `entities` satisfying `list`, in their original order.
pub fn filter_entities<'a, E>(entities: &'a [E], list: &ExpressionList, any_tags: &TagSet) -> Vec<&'a E>
where
    E: EntityView + Sync,
{
    entities
        .par_iter()
        .filter(|entity| list.matches(*entity, any_tags))
        .collect()
}

fn uris<E: EntityView>(entities: Vec<&E>) -> Vec<String> {
    entities.into_iter().map(|entity| entity.uri().to_string()).collect()
}

/// Groups songs by album artist (falling back to artist) and album name.
///
/// Songs without an album tag are skipped. Albums keep the order in which
/// their first song appears.
pub fn group_albums(songs: &[Song]) -> Vec<Album> {
    let mut albums: Vec<Album> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for song in songs {
        let Some(album_name) = first_value(song, Tag::Album) else {
            continue;
        };
        let artist = first_value(song, Tag::AlbumArtist)
            .or_else(|| first_value(song, Tag::Artist))
            .unwrap_or_default();
        let key = (artist.to_string(), album_name.to_string());

        let position = *index.entry(key).or_insert_with(|| {
            albums.push(Album::default());
            albums.len() - 1
        });
        albums[position].add_song(song);
    }
    albums
}

fn first_value(song: &Song, tag: Tag) -> Option<&str> {
    song.tags.get(&tag).and_then(|values| values.first()).map(String::as_str)
}
