//! Boundary types for the upstream search payload.
//!
//! The endpoint answers with an envelope of the form
//!
//! ```text
//! { meta: { status }, response: { sections: [ { type, hits: [ { type, result } ] } ] } }
//! ```
//!
//! Every level is decoded leniently: absent, `null` or mistyped arrays
//! become empty, and the same goes for scalars, which become `None` or empty.
//! Elements of a list that do not decode are dropped. A hit's `result` is
//! kept as raw JSON until the hit is classified, because its shape depends
//! on the hit's entity kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Section tag for the single best match.
pub const TOP_HIT_SECTION: &str = "top_hit";
/// Section tag for song matches.
pub const SONG_SECTION: &str = "song";
/// Section tag for lyric matches.
pub const LYRIC_SECTION: &str = "lyric";

/// Sections that contribute hits, in the order they are merged.
pub const SECTION_PRIORITY: [&str; 3] = [TOP_HIT_SECTION, SONG_SECTION, LYRIC_SECTION];

/// Entity kind of a hit that represents a song.
pub const SONG_ENTITY: &str = "song";

/// Top-level search envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default, deserialize_with = "or_default")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "or_default")]
    pub response: SearchResponse,
}

impl SearchPayload {
    /// Decode a payload from a JSON body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decode a payload from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The status code the upstream reported inside the envelope, if any.
    pub fn status(&self) -> Option<u16> {
        self.meta.status
    }

    pub fn sections(&self) -> &[RawSection] {
        &self.response.sections
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "or_default")]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "each_or_skip")]
    pub sections: Vec<RawSection>,
}

/// A named bucket of hits, e.g. `top_hit`, `song`, `lyric`, `artist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSection {
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "each_or_skip")]
    pub hits: Vec<RawHit>,
}

/// One candidate match inside a section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    /// Entity kind: `song`, `artist`, `album`, ...
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: String,
    #[serde(default)]
    pub result: Value,
}

/// Decode `T`, falling back to its default on `null` or a mistyped value.
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode a list element by element, dropping elements that do not decode.
/// Anything other than an array yields an empty list.
fn each_or_skip<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A hit after its `result` has been decoded according to its kind.
#[derive(Debug, Clone)]
pub enum Entity {
    Song(RawSong),
    /// Any non-song hit. Only the kind is retained.
    Other(String),
}

impl RawHit {
    pub fn is_song(&self) -> bool {
        self.kind == SONG_ENTITY
    }

    /// Decode the hit's record.
    ///
    /// Non-song hits are never decoded, so unexpected artist or album shapes
    /// cannot fail classification.
    pub fn entity(&self) -> Result<Entity> {
        if self.is_song() {
            Ok(Entity::Song(RawSong::deserialize(&self.result)?))
        } else {
            Ok(Entity::Other(self.kind.clone()))
        }
    }
}

/// The upstream song record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSong {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub full_title: Option<String>,
    /// Canonical page of the song's lyrics.
    #[serde(default)]
    pub url: Option<String>,
    /// Index page of the song.
    #[serde(default)]
    pub relationships_index_url: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub header_image_thumbnail_url: Option<String>,
    #[serde(default)]
    pub release_date_for_display: Option<String>,
    #[serde(default)]
    pub primary_artists: Option<Vec<RawArtist>>,
}

impl RawSong {
    /// Primary artists in credit order; empty when the field is absent or null.
    pub fn primary_artists(&self) -> &[RawArtist] {
        self.primary_artists.as_deref().unwrap_or_default()
    }
}

/// The upstream primary-artist record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
