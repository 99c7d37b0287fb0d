//! Normalization of a search payload into song results.
//!
//! The pipeline runs in four steps:
//!
//! 1. take the first `top_hit`, `song` and `lyric` section, in that order,
//!    and concatenate their hits;
//! 2. keep only hits whose entity kind is `song`;
//! 3. project each song into a [`SongResult`] with its primary artists
//!    summarized in credit order;
//! 4. apply the caller's limit, or the missing-limit policy when there is
//!    none.
//!
//! Missing sections and fields are never errors. A song hit whose record has
//! the wrong shape is reported to the sink and skipped.

use crate::diagnostics::DiagnosticSink;
use crate::model::{ArtistSummary, MissingLimitPolicy, SearchOptions, SongResult};
use crate::outcome::{EmptyReason, SearchOutcome};
use crate::payload::{
    Entity, RawArtist, RawHit, RawSection, RawSong, SearchPayload, SECTION_PRIORITY,
};

/// Normalize a decoded payload according to `options`.
pub fn normalize(
    payload: &SearchPayload,
    options: &SearchOptions,
    sink: &dyn DiagnosticSink,
) -> SearchOutcome {
    let songs: Vec<SongResult> = song_records(payload.sections(), sink)
        .iter()
        .map(assemble)
        .collect();

    sink.debug(&format!("normalized {} song results", songs.len()));

    if songs.is_empty() {
        return SearchOutcome::empty(EmptyReason::NoMatches);
    }

    match (options.limit, options.missing_limit) {
        (Some(limit), _) => SearchOutcome::found(truncate(songs, limit)),
        (None, MissingLimitPolicy::ReturnAll) => SearchOutcome::found(songs),
        (None, MissingLimitPolicy::Withhold) => {
            sink.debug(&format!(
                "withholding {} results: no limit supplied",
                songs.len()
            ));
            SearchOutcome::empty(EmptyReason::LimitNotSupplied {
                matched: songs.len(),
            })
        }
    }
}

/// Hits of the prioritized sections, concatenated in priority order.
///
/// Only the first section carrying each tag contributes.
pub fn merged_hits(sections: &[RawSection]) -> impl Iterator<Item = &RawHit> + '_ {
    SECTION_PRIORITY
        .into_iter()
        .filter_map(move |kind| sections.iter().find(|section| section.kind == kind))
        .flat_map(|section| section.hits.iter())
}

/// Decoded song records from the prioritized sections, in merge order.
pub fn song_records(sections: &[RawSection], sink: &dyn DiagnosticSink) -> Vec<RawSong> {
    merged_hits(sections)
        .filter_map(|hit| match hit.entity() {
            Ok(Entity::Song(song)) => Some(song),
            Ok(Entity::Other(_)) => None,
            Err(e) => {
                sink.warn(&format!("skipping malformed song hit: {}", e));
                None
            }
        })
        .collect()
}

/// Summarize primary artists, preserving credit order.
pub fn summarize_artists(artists: &[RawArtist]) -> Vec<ArtistSummary> {
    artists
        .iter()
        .map(|artist| ArtistSummary {
            name: artist.name.clone().unwrap_or_default(),
            is_verified: artist.is_verified.unwrap_or(false),
            header_image_url: artist.header_image_url.clone(),
            image_url: artist.image_url.clone(),
        })
        .collect()
}

/// Build the caller-facing record for one song.
pub fn assemble(song: &RawSong) -> SongResult {
    SongResult {
        title: song.title.clone().unwrap_or_default(),
        full_title: song.full_title.clone().unwrap_or_default(),
        song_page_url: song.relationships_index_url.clone(),
        lyrics_page_url: song.url.clone(),
        header_image_url: song.header_image_url.clone(),
        header_image_thumbnail_url: song.header_image_thumbnail_url.clone(),
        release_date: song.release_date_for_display.clone(),
        artists: summarize_artists(song.primary_artists()),
    }
}

/// Keep the first `limit` results; the whole sequence when it is shorter.
pub fn truncate(mut results: Vec<SongResult>, limit: usize) -> Vec<SongResult> {
    results.truncate(limit);
    results
}
