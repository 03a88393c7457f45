//! # Expression Matching
//!
//! Evaluates an [`ExpressionList`] against one entity. Pseudo-filters compare
//! scalar attributes directly. Tag predicates walk every value of every
//! candidate tag:
//!
//! - positive operators are satisfied by the first matching value,
//! - negated operators fail on the first value that matches the plain
//!   operator and are satisfied when none does, including when the tag has
//!   no values at all.
//!
//! A predicate on `any` holds if it holds for at least one tag of the
//! caller supplied [`TagSet`].

use crate::entity::{EntityView, Scalar};
use crate::expression::{ExpressionList, Operator, Predicate, Selector};
use crate::fuzzy::fuzzy_match;
use crate::normalize::normalize;
use crate::tags::{TagId, TagSet};
use log::trace;

/// Returns true if `entity` satisfies every predicate of `list`.
pub fn matches<E: EntityView + ?Sized>(list: &ExpressionList, entity: &E, any_tags: &TagSet) -> bool {
    list.iter().all(|predicate| {
        let hit = predicate_matches(predicate, entity, any_tags);
        if !hit {
            trace!("\"{}\" failed on {predicate}", entity.uri());
        }
        hit
    })
}

fn predicate_matches<E: EntityView + ?Sized>(predicate: &Predicate, entity: &E, any_tags: &TagSet) -> bool {
    match predicate.selector() {
        Selector::ModifiedSince => at_least(predicate, entity.scalar(Scalar::LastModified)),
        Selector::AddedSince => at_least(predicate, entity.scalar(Scalar::Added)),
        Selector::File => entity.uri() == predicate.raw_value(),
        Selector::Base => entity.uri().starts_with(predicate.raw_value()),
        Selector::Prio => {
            let prio = entity.scalar(Scalar::Prio);
            match (predicate.operator(), predicate.number()) {
                (Operator::GreaterEqual, Some(wanted)) => prio >= wanted,
                (_, Some(wanted)) => prio > wanted,
                (_, None) => false,
            }
        }
        Selector::Bitrate => predicate
            .number()
            .is_some_and(|wanted| entity.alt_bitrates().any(|bitrate| bitrate >= wanted)),
        // Not implemented
        Selector::AudioFormat => true,
        Selector::Tag(tag) => tag_matches(predicate, entity, tag),
        Selector::AnyTag => any_tags.iter().any(|tag| tag_matches(predicate, entity, tag)),
    }
}

fn at_least(predicate: &Predicate, actual: i64) -> bool {
    predicate.number().is_some_and(|since| since <= actual)
}

fn tag_matches<E: EntityView + ?Sized>(predicate: &Predicate, entity: &E, tag: TagId) -> bool {
    let negated = predicate.operator().is_negated();
    let mut index = 0;
    while let Some(value) = entity.tag_value(tag, index) {
        index += 1;
        let hit = value_matches(&normalize(value), predicate);
        // first success for positive operators, first failure for negated ones
        if hit != negated {
            return hit;
        }
    }
    negated
}

/// Compares one folded tag value with a string predicate.
pub fn value_matches(candidate: &str, predicate: &Predicate) -> bool {
    match predicate.operator() {
        Operator::Contains => predicate.folded().is_some_and(|value| candidate.contains(value)),
        Operator::StartsWith => predicate.folded().is_some_and(|value| candidate.starts_with(value)),
        Operator::Equal => predicate.folded().is_some_and(|value| candidate == value),
        Operator::NotEqual => predicate.folded().is_some_and(|value| candidate != value),
        Operator::Regex => predicate.pattern().is_some_and(|pattern| pattern.is_match(candidate)),
        Operator::NotRegex => predicate.pattern().is_some_and(|pattern| !pattern.is_match(candidate)),
        Operator::Fuzzy => predicate.folded().is_some_and(|value| fuzzy_match(candidate, value)),
        Operator::Greater | Operator::GreaterEqual => {
            trace!("Operator {} does not apply to tag values", predicate.operator());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Album, Song, Webradio};
    use crate::expression::EntityKind;
    use crate::normalize::parse_date;
    use crate::parser::parse;
    use crate::tags::{Tag, WebradioTag};

    fn tabula_rasa() -> Song {
        let mut song = Song::new("Einstürzende Neubauten/Tabula Rasa/01 - Die Interimsliebenden.flac");
        song.add_tag(Tag::Album, "Tabula Rasa")
            .add_tag(Tag::Artist, "Blixa Bargeld")
            .add_tag(Tag::Artist, "Einstürzende Neubauten")
            .add_tag(Tag::Artist, "MG's")
            .add_tag(Tag::Title, "Die Interimsliebenden");
        song.last_modified = parse_date("2023-11-16").unwrap();
        song.added = parse_date("2023-11-16").unwrap();
        song.prio = 5;
        song
    }

    fn browse_tags() -> TagSet {
        [Tag::Album, Tag::Artist].into_iter().collect()
    }

    fn song_matches(expression: &str, song: &Song) -> bool {
        let list = parse(expression, EntityKind::Song).unwrap();
        matches(&list, song, &browse_tags())
    }

    fn artist(name: &str) -> Song {
        let mut song = Song::new(format!("{name}.flac"));
        song.add_tag(Tag::Artist, name);
        song
    }

    #[test]
    fn test_empty_list_matches_everything() {
        let list = ExpressionList::default();
        assert!(matches(&list, &tabula_rasa(), &TagSet::new()));
        assert!(matches(&list, &Song::default(), &TagSet::new()));
        assert!(matches(&list, &Webradio::default(), &TagSet::new()));
    }

    #[test]
    fn test_single_valued_tag() {
        let song = tabula_rasa();
        assert!(song_matches("((Album contains 'tabula'))", &song));
        assert!(song_matches("((Album starts_with 'TABULA'))", &song));
        assert!(song_matches("((Album == 'Tabula Rasa'))", &song));
        assert!(song_matches("((Album =~ 'Tab.*'))", &song));
        assert!(!song_matches("((Album != 'Tabula Rasa'))", &song));
        assert!(!song_matches("((Album !~ 'Tabula.*'))", &song));
    }

    #[test]
    fn test_multi_valued_tag() {
        let song = tabula_rasa();
        assert!(song_matches("((Artist contains 'XA'))", &song));
        assert!(song_matches("((Artist contains \"XA\"))", &song));
        assert!(song_matches("((Artist starts_with 'bl'))", &song));
        assert!(song_matches("((Artist == 'Blixa Bargeld'))", &song));
        assert!(song_matches("((Artist =~ 'Blixa.*'))", &song));
        assert!(song_matches("((Artist contains 'MG\\'s'))", &song));

        // one matching value is enough to fail a negated operator
        assert!(!song_matches("((Artist != 'Blixa Bargeld'))", &song));
        assert!(!song_matches("((Artist !~ 'Blixa.*'))", &song));
        assert!(song_matches("((Artist != 'Nick Cave'))", &song));
        assert!(song_matches("((Artist !~ '^nick'))", &song));
    }

    #[test]
    fn test_starts_with_compares_against_tag_value() {
        let song = tabula_rasa();
        assert!(song_matches("((Title starts_with 'die inter'))", &song));
        assert!(!song_matches("((Title starts_with 'interims'))", &song));
        assert!(!song_matches("((Title starts_with 'die interimsliebenden forever'))", &song));
    }

    #[test]
    fn test_contains() {
        let expression = "(Artist contains 'tral')";
        assert!(song_matches(expression, &artist("Central")));
        assert!(song_matches(expression, &artist("Neutral")));
        assert!(!song_matches(expression, &artist("Lateral")));
        assert!(!song_matches(expression, &artist("West")));
    }

    #[test]
    fn test_equal_folds_case() {
        let mut song = Song::new("rock.flac");
        song.add_tag(Tag::Genre, "rock");
        assert!(song_matches("(Genre == 'Rock')", &song));
        assert!(song_matches("(Genre == 'ROCK')", &song));
        assert!(!song_matches("(Genre == 'Rock ')", &song));
    }

    #[test]
    fn test_missing_tag() {
        let song = Song::new("untagged.flac");
        assert!(song_matches("(Genre != 'Rock')", &song));
        assert!(song_matches("(Genre !~ 'rock')", &song));
        assert!(!song_matches("(Genre == 'Rock')", &song));
        assert!(!song_matches("(Genre contains '')", &song));
    }

    #[test]
    fn test_conjunction() {
        let song = tabula_rasa();
        let first = "(Album == 'Tabula Rasa')";
        let second = "(Genre == 'Rock')";
        assert!(song_matches(first, &song));
        assert!(!song_matches(second, &song));
        assert!(!song_matches(&format!("({first} AND {second})"), &song));
        assert!(!song_matches(&format!("({second} AND {first})"), &song));
        assert!(song_matches(&format!("({first} AND (Artist contains 'blixa'))"), &song));
    }

    #[test]
    fn test_any_tag_uses_caller_set() {
        let song = tabula_rasa();
        assert!(song_matches("(any contains 'rasa')", &song));
        assert!(song_matches("(any == 'mg\\'s')", &song));
        // Title is not part of the set
        assert!(!song_matches("(any contains 'interims')", &song));

        let list = parse("(any contains 'interims')", EntityKind::Song).unwrap();
        let with_title: TagSet = [Tag::Title].into_iter().collect();
        assert!(matches(&list, &song, &with_title));
        assert!(!matches(&list, &song, &TagSet::new()));
    }

    #[test]
    fn test_any_tag_negated_needs_one_clean_tag() {
        let song = tabula_rasa();
        // Album does not equal the artist name
        assert!(song_matches("(any != 'Blixa Bargeld')", &song));
        let list = parse("(any != 'Blixa Bargeld')", EntityKind::Song).unwrap();
        let artists: TagSet = [Tag::Artist].into_iter().collect();
        assert!(!matches(&list, &song, &artists));
    }

    #[test]
    fn test_prio() {
        let mut song = Song::new("queued.flac");
        song.prio = 5;
        assert!(song_matches("(prio >= '5')", &song));
        assert!(!song_matches("(prio '5')", &song));
        song.prio = 4;
        assert!(!song_matches("(prio >= '5')", &song));
        song.prio = 6;
        assert!(song_matches("(prio '5')", &song));
        assert!(song_matches("(prio 5)", &song));
    }

    #[test]
    fn test_since_filters() {
        let mut song = Song::new("new.flac");
        song.last_modified = parse_date("2023-11-06").unwrap();
        song.added = parse_date("2023-11-04").unwrap();
        assert!(song_matches("(modified-since '2023-11-05')", &song));
        assert!(song_matches("(modified-since '2023-11-06')", &song));
        assert!(!song_matches("(added-since '2023-11-05')", &song));

        let song = tabula_rasa();
        assert!(song_matches("((modified-since '2023-10-10'))", &song));
        assert!(!song_matches("((modified-since '2023-11-17'))", &song));
        assert!(song_matches("((added-since '2023-10-10'))", &song));
        assert!(!song_matches("((added-since '2023-11-17'))", &song));
    }

    #[test]
    fn test_file_and_base() {
        let song = Song::new("music/album/track.flac");
        assert!(song_matches("(file 'music/album/track.flac')", &song));
        assert!(!song_matches("(file 'music/album')", &song));
        assert!(!song_matches("(file 'MUSIC/album/track.flac')", &song));
        assert!(song_matches("(base 'music/album')", &song));
        assert!(song_matches("(base '')", &song));
        assert!(!song_matches("(base 'music/other')", &song));
    }

    #[test]
    fn test_audio_format_always_matches() {
        let song = Song::new("a.flac");
        assert!(song_matches("(AudioFormat == '44100:24:2')", &song));
        assert!(song_matches("(AudioFormat != 'anything')", &song));
    }

    #[test]
    fn test_regex_case_folding() {
        let mut song = Song::new("x.flac");
        song.add_tag(Tag::Title, "FOO123BAR");
        assert!(song_matches("(Title =~ 'foo.*bar')", &song));
        assert!(song_matches("(Title =~ 'FOO\\\\d+')", &song));
        assert!(!song_matches("(Title !~ 'foo.*bar')", &song));
        assert!(!song_matches("(Title =~ '^bar')", &song));
    }

    #[test]
    fn test_regex_escapes_are_unquoted_first() {
        let mut song = Song::new("x.flac");
        song.add_tag(Tag::Title, "FOO123BAR");
        let mut food = Song::new("y.flac");
        food.add_tag(Tag::Title, "Food");

        // a single backslash only escapes the next character of the value
        assert!(!song_matches("(Title =~ 'FOO\\d+')", &song));
        assert!(song_matches("(Title =~ 'FOO\\d+')", &food));
        assert!(song_matches("(Title =~ '\\\\d{3}')", &song));
    }

    #[test]
    fn test_diacritics_are_folded() {
        let bjork = artist("Björk");
        assert!(song_matches("(Artist == 'Bjork')", &bjork));
        assert!(song_matches("(Artist contains 'bjor')", &bjork));
        assert!(song_matches("(Artist == 'BJÖRK')", &bjork));
        assert!(song_matches("(Artist =~ '^björ')", &bjork));
        assert!(!song_matches("(Artist != 'bjork')", &bjork));
    }

    #[test]
    fn test_fuzzy() {
        let mut song = Song::new("x.flac");
        song.add_tag(Tag::Title, "Smoky Mountain");
        assert!(song_matches("(Title ~~ 'smoke')", &song));
        assert!(song_matches("(Title ~~ 'MOUNTAN')", &song));
        assert!(!song_matches("(Title ~~ 'valley')", &song));
    }

    #[test]
    fn test_album() {
        let mut album = Album::new("Einstürzende Neubauten/Tabula Rasa");
        album.add_song(&tabula_rasa());
        let list = parse("((Album == 'tabula rasa') AND (base 'Einstürzende'))", EntityKind::Album).unwrap();
        assert!(matches(&list, &album, &browse_tags()));
        let list = parse("(prio >= 1)", EntityKind::Album).unwrap();
        assert!(!matches(&list, &album, &browse_tags()));
    }

    #[test]
    fn test_webradio() {
        let mut radio = Webradio::new("Radio Paradise");
        radio.genres = vec!["Rock".to_string(), "Eclectic".to_string()];
        radio.country = "USA".to_string();
        radio
            .add_stream("http://stream/aac-128", "AAC", 128)
            .add_stream("http://stream/flac", "FLAC", 1411);
        let tags: TagSet = [WebradioTag::Name, WebradioTag::Genre].into_iter().collect();

        let check = |expression: &str| {
            let list = parse(expression, EntityKind::Webradio).unwrap();
            matches(&list, &radio, &tags)
        };
        assert!(check("(Genre == 'eclectic')"));
        assert!(check("(Codec == 'flac')"));
        assert!(check("(any contains 'paradise')"));
        assert!(!check("(any == 'usa')"));
        assert!(check("(Country != 'Germany')"));
        assert!(check("(Language != 'English')"));
        assert!(check("(bitrate '1411')"));
        assert!(check("(bitrate '320')"));
        assert!(!check("(bitrate '2000')"));
        assert!(check("((Genre == 'Rock') AND (bitrate '128'))"));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let song = tabula_rasa();
        let list = parse("((Artist =~ 'blixa') AND (Album ~~ 'tabula rasa'))", EntityKind::Song).unwrap();
        let tags = browse_tags();
        let first = matches(&list, &song, &tags);
        for _ in 0..10 {
            assert_eq!(matches(&list, &song, &tags), first);
        }
        assert!(first);
    }
}
