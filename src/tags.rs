//! # Tag Vocabularies
//!
//! Song tags follow MPD's tag names and are looked up case-insensitively.
//! Webradio tags are the fields of a webradio entry and must be spelled
//! exactly. Both tables are static and built once on first use.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// MPD song tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tag {
    Artist,
    ArtistSort,
    Album,
    AlbumSort,
    AlbumArtist,
    AlbumArtistSort,
    Title,
    TitleSort,
    Track,
    Name,
    Genre,
    Mood,
    Date,
    OriginalDate,
    Composer,
    ComposerSort,
    Performer,
    Conductor,
    Work,
    Ensemble,
    Movement,
    MovementNumber,
    ShowMovement,
    Location,
    Grouping,
    Comment,
    Disc,
    Label,
    MusicBrainzArtistId,
    MusicBrainzAlbumId,
    MusicBrainzAlbumArtistId,
    MusicBrainzTrackId,
    MusicBrainzReleaseTrackId,
    MusicBrainzWorkId,
    MusicBrainzReleaseGroupId,
}

const SONG_TAG_NAMES: &[(Tag, &str)] = &[
    (Tag::Artist, "Artist"),
    (Tag::ArtistSort, "ArtistSort"),
    (Tag::Album, "Album"),
    (Tag::AlbumSort, "AlbumSort"),
    (Tag::AlbumArtist, "AlbumArtist"),
    (Tag::AlbumArtistSort, "AlbumArtistSort"),
    (Tag::Title, "Title"),
    (Tag::TitleSort, "TitleSort"),
    (Tag::Track, "Track"),
    (Tag::Name, "Name"),
    (Tag::Genre, "Genre"),
    (Tag::Mood, "Mood"),
    (Tag::Date, "Date"),
    (Tag::OriginalDate, "OriginalDate"),
    (Tag::Composer, "Composer"),
    (Tag::ComposerSort, "ComposerSort"),
    (Tag::Performer, "Performer"),
    (Tag::Conductor, "Conductor"),
    (Tag::Work, "Work"),
    (Tag::Ensemble, "Ensemble"),
    (Tag::Movement, "Movement"),
    (Tag::MovementNumber, "MovementNumber"),
    (Tag::ShowMovement, "ShowMovement"),
    (Tag::Location, "Location"),
    (Tag::Grouping, "Grouping"),
    (Tag::Comment, "Comment"),
    (Tag::Disc, "Disc"),
    (Tag::Label, "Label"),
    (Tag::MusicBrainzArtistId, "MUSICBRAINZ_ARTISTID"),
    (Tag::MusicBrainzAlbumId, "MUSICBRAINZ_ALBUMID"),
    (Tag::MusicBrainzAlbumArtistId, "MUSICBRAINZ_ALBUMARTISTID"),
    (Tag::MusicBrainzTrackId, "MUSICBRAINZ_TRACKID"),
    (Tag::MusicBrainzReleaseTrackId, "MUSICBRAINZ_RELEASETRACKID"),
    (Tag::MusicBrainzWorkId, "MUSICBRAINZ_WORKID"),
    (Tag::MusicBrainzReleaseGroupId, "MUSICBRAINZ_RELEASEGROUPID"),
];

/// Field of a webradio entry that can be searched like a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WebradioTag {
    Name,
    Genre,
    Language,
    Country,
    State,
    Description,
    Homepage,
    Codec,
}

const WEBRADIO_TAG_NAMES: &[(WebradioTag, &str)] = &[
    (WebradioTag::Name, "Name"),
    (WebradioTag::Genre, "Genre"),
    (WebradioTag::Language, "Language"),
    (WebradioTag::Country, "Country"),
    (WebradioTag::State, "State"),
    (WebradioTag::Description, "Description"),
    (WebradioTag::Homepage, "Homepage"),
    (WebradioTag::Codec, "Codec"),
];

lazy_static! {
    /// Lowercased song tag name to tag
    static ref SONG_TAGS: HashMap<String, Tag> = SONG_TAG_NAMES
        .iter()
        .map(|(tag, name)| (name.to_ascii_lowercase(), *tag))
        .collect();

    static ref WEBRADIO_TAGS: HashMap<&'static str, WebradioTag> = WEBRADIO_TAG_NAMES
        .iter()
        .map(|(tag, name)| (*name, *tag))
        .collect();
}

impl Tag {
    /// Looks up a song tag, ignoring ASCII case.
    pub fn parse_name(name: &str) -> Option<Self> {
        SONG_TAGS.get(&name.to_ascii_lowercase()).copied()
    }

    /// Canonical MPD spelling.
    pub fn name(self) -> &'static str {
        SONG_TAG_NAMES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map_or("", |(_, name)| name)
    }

    pub fn all() -> impl Iterator<Item = Tag> {
        SONG_TAG_NAMES.iter().map(|(tag, _)| *tag)
    }
}

impl WebradioTag {
    /// Looks up a webradio field; the spelling must match exactly.
    pub fn parse_name(name: &str) -> Option<Self> {
        WEBRADIO_TAGS.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        WEBRADIO_TAG_NAMES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map_or("", |(_, name)| name)
    }

    pub fn all() -> impl Iterator<Item = WebradioTag> {
        WEBRADIO_TAG_NAMES.iter().map(|(tag, _)| *tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for WebradioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::parse_name(s).ok_or_else(|| format!("unknown song tag: {s}"))
    }
}

impl FromStr for WebradioTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebradioTag::parse_name(s).ok_or_else(|| format!("unknown webradio tag: {s}"))
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for WebradioTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.name().to_string()
    }
}

impl From<WebradioTag> for String {
    fn from(tag: WebradioTag) -> Self {
        tag.name().to_string()
    }
}

/// A tag from either vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    Song(Tag),
    Webradio(WebradioTag),
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagId::Song(tag) => tag.fmt(f),
            TagId::Webradio(tag) => tag.fmt(f),
        }
    }
}

impl From<Tag> for TagId {
    fn from(tag: Tag) -> Self {
        TagId::Song(tag)
    }
}

impl From<WebradioTag> for TagId {
    fn from(tag: WebradioTag) -> Self {
        TagId::Webradio(tag)
    }
}

/// Tags searched by an `any` clause, in order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<TagId>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless it is already present.
    pub fn insert(&mut self, tag: impl Into<TagId>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = TagId> + '_ {
        self.tags.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<T: Into<TagId>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
