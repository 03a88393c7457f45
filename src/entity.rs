//! # Searchable Entities
//!
//! The matcher only sees entities through [`EntityView`]. Songs, albums and
//! webradio entries implement it here; anything else that can answer the
//! same questions can be searched too.

use crate::tags::{Tag, TagId, WebradioTag};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Integer attribute compared by the pseudo-filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    LastModified,
    Added,
    Prio,
}

/// Read-only view of something a search expression can be matched against.
pub trait EntityView {
    /// The `index`-th value of a multi-valued tag. Values are contiguous:
    /// the first `None` ends the list.
    fn tag_value(&self, tag: TagId, index: usize) -> Option<&str>;

    fn uri(&self) -> &str;

    /// Timestamps are epoch seconds; entities without the attribute return 0.
    fn scalar(&self, scalar: Scalar) -> i64;

    /// Bitrates of the alternative streams, for webradios.
    fn alt_bitrates(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(std::iter::empty())
    }
}

type TagValues = BTreeMap<Tag, Vec<String>>;

fn song_tag_value(tags: &TagValues, tag: TagId, index: usize) -> Option<&str> {
    match tag {
        TagId::Song(tag) => tags.get(&tag)?.get(index).map(String::as_str),
        TagId::Webradio(_) => None,
    }
}

/// A song from the MPD database or queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub uri: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: TagValues,
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub added: i64,
    #[serde(default)]
    pub prio: i64,
}

impl Song {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    /// Appends a value to `tag`, skipping exact duplicates.
    pub fn add_tag(&mut self, tag: Tag, value: impl Into<String>) -> &mut Self {
        push_dedup(&mut self.tags, tag, value.into());
        self
    }
}

impl EntityView for Song {
    fn tag_value(&self, tag: TagId, index: usize) -> Option<&str> {
        song_tag_value(&self.tags, tag, index)
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn scalar(&self, scalar: Scalar) -> i64 {
        match scalar {
            Scalar::LastModified => self.last_modified,
            Scalar::Added => self.added,
            Scalar::Prio => self.prio,
        }
    }
}

/// An album assembled from its songs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Album key, usually the directory of the first song
    pub uri: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: TagValues,
    /// Newest modification time of all songs
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub added: i64,
}

impl Album {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn add_tag(&mut self, tag: Tag, value: impl Into<String>) -> &mut Self {
        push_dedup(&mut self.tags, tag, value.into());
        self
    }

    /// Merges the tags and timestamps of one more song into the album.
    pub fn add_song(&mut self, song: &Song) {
        if self.uri.is_empty() {
            self.uri = song.uri.clone();
        }
        for (tag, values) in &song.tags {
            for value in values {
                push_dedup(&mut self.tags, *tag, value.clone());
            }
        }
        self.last_modified = self.last_modified.max(song.last_modified);
        self.added = self.added.max(song.added);
    }
}

impl EntityView for Album {
    fn tag_value(&self, tag: TagId, index: usize) -> Option<&str> {
        song_tag_value(&self.tags, tag, index)
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn scalar(&self, scalar: Scalar) -> i64 {
        match scalar {
            Scalar::LastModified => self.last_modified,
            Scalar::Added => self.added,
            Scalar::Prio => 0,
        }
    }
}

fn push_dedup(tags: &mut TagValues, tag: Tag, value: String) {
    let values = tags.entry(tag).or_default();
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Loaded tags get the same duplicate handling as [`Song::add_tag`].
fn deserialize_tags<'de, D>(deserializer: D) -> Result<TagValues, D::Error>
where
    D: Deserializer<'de>,
{
    let loaded = TagValues::deserialize(deserializer)?;
    let mut tags = TagValues::new();
    for (tag, values) in loaded {
        for value in values {
            push_dedup(&mut tags, tag, value);
        }
    }
    Ok(tags)
}

/// One stream of a webradio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub uri: String,
    #[serde(default)]
    pub codec: String,
    #[serde(default)]
    pub bitrate: i64,
}

/// A webradio entry with one or more streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webradio {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl Webradio {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_stream(&mut self, uri: impl Into<String>, codec: impl Into<String>, bitrate: i64) -> &mut Self {
        self.streams.push(Stream {
            uri: uri.into(),
            codec: codec.into(),
            bitrate,
        });
        self
    }
}

fn single(value: &str, index: usize) -> Option<&str> {
    (index == 0 && !value.is_empty()).then_some(value)
}

impl EntityView for Webradio {
    fn tag_value(&self, tag: TagId, index: usize) -> Option<&str> {
        let TagId::Webradio(tag) = tag else {
            return None;
        };
        match tag {
            WebradioTag::Name => single(&self.name, index),
            WebradioTag::Genre => self.genres.get(index).map(String::as_str),
            WebradioTag::Language => self.languages.get(index).map(String::as_str),
            WebradioTag::Country => single(&self.country, index),
            WebradioTag::State => single(&self.state, index),
            WebradioTag::Description => single(&self.description, index),
            WebradioTag::Homepage => single(&self.homepage, index),
            WebradioTag::Codec => self.streams.get(index).map(|stream| stream.codec.as_str()),
        }
    }

    fn uri(&self) -> &str {
        self.streams.first().map_or("", |stream| stream.uri.as_str())
    }

    fn scalar(&self, _scalar: Scalar) -> i64 {
        0
    }

    fn alt_bitrates(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.streams.iter().map(|stream| stream.bitrate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_multi_values_end_at_first_gap() {
        let mut song = Song::new("a/b.flac");
        song.add_tag(Tag::Artist, "Blixa Bargeld")
            .add_tag(Tag::Artist, "Nick Cave")
            .add_tag(Tag::Artist, "Blixa Bargeld");

        let artist = TagId::Song(Tag::Artist);
        assert_eq!(song.tag_value(artist, 0), Some("Blixa Bargeld"));
        assert_eq!(song.tag_value(artist, 1), Some("Nick Cave"));
        assert_eq!(song.tag_value(artist, 2), None);
        assert_eq!(song.tag_value(TagId::Song(Tag::Genre), 0), None);
        assert_eq!(song.tag_value(TagId::Webradio(WebradioTag::Name), 0), None);
    }

    #[test]
    fn test_album_collects_songs() {
        let mut first = Song::new("album/1.flac");
        first.add_tag(Tag::Album, "Tabula Rasa").add_tag(Tag::Artist, "A");
        first.last_modified = 10;
        let mut second = Song::new("album/2.flac");
        second.add_tag(Tag::Album, "Tabula Rasa").add_tag(Tag::Artist, "B");
        second.last_modified = 20;
        second.added = 5;

        let mut album = Album::default();
        album.add_song(&first);
        album.add_song(&second);

        assert_eq!(album.uri(), "album/1.flac");
        assert_eq!(album.tags[&Tag::Album], vec!["Tabula Rasa"]);
        assert_eq!(album.tags[&Tag::Artist], vec!["A", "B"]);
        assert_eq!(album.scalar(Scalar::LastModified), 20);
        assert_eq!(album.scalar(Scalar::Added), 5);
        assert_eq!(album.scalar(Scalar::Prio), 0);
    }

    #[test]
    fn test_webradio_fields() {
        let mut radio = Webradio::new("Radio X");
        radio.genres = vec!["Rock".to_string(), "Indie".to_string()];
        radio
            .add_stream("http://x/128", "MP3", 128)
            .add_stream("http://x/320", "AAC", 320);

        let codec = TagId::Webradio(WebradioTag::Codec);
        assert_eq!(radio.uri(), "http://x/128");
        assert_eq!(radio.tag_value(codec, 1), Some("AAC"));
        assert_eq!(radio.tag_value(TagId::Webradio(WebradioTag::Genre), 1), Some("Indie"));
        assert_eq!(radio.tag_value(TagId::Webradio(WebradioTag::Country), 0), None);
        assert_eq!(radio.tag_value(TagId::Webradio(WebradioTag::Name), 1), None);
        assert_eq!(radio.alt_bitrates().collect::<Vec<_>>(), vec![128, 320]);
    }

    #[test]
    fn test_webradio_from_json() {
        let radio: Webradio = serde_json::from_str(
            r#"{"name": "R", "streams": [{"uri": "http://r", "codec": "MP3", "bitrate": 96}]}"#,
        )
        .unwrap();
        assert_eq!(radio.uri(), "http://r");
        assert_eq!(radio.alt_bitrates().collect::<Vec<_>>(), vec![96]);
        assert!(Song::new("x").alt_bitrates().next().is_none());
    }

    #[test]
    fn test_song_from_json() {
        let song: Song = serde_json::from_str(
            r#"{"uri": "x.mp3", "tags": {"artist": ["A"], "Genre": ["Rock", "Pop"]}, "prio": 3}"#,
        )
        .unwrap();
        assert_eq!(song.tag_value(TagId::Song(Tag::Artist), 0), Some("A"));
        assert_eq!(song.tag_value(TagId::Song(Tag::Genre), 1), Some("Pop"));
        assert_eq!(song.scalar(Scalar::Prio), 3);
        assert_eq!(song.scalar(Scalar::Added), 0);
    }

    #[test]
    fn test_loaded_tags_skip_duplicates() {
        let song: Song = serde_json::from_str(
            r#"{"uri": "x.mp3", "tags": {"Artist": ["A", "B", "A"]}}"#,
        )
        .unwrap();
        let mut built = Song::new("x.mp3");
        built.add_tag(Tag::Artist, "A").add_tag(Tag::Artist, "B").add_tag(Tag::Artist, "A");

        assert_eq!(song, built);
        assert_eq!(song.tag_value(TagId::Song(Tag::Artist), 2), None);
    }
}
