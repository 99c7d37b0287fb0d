use serde::{Deserialize, Serialize};

use crate::model::artist::ArtistSummary;

/// A normalized song search result.
///
/// Built once per matching song hit and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongResult {
    pub title: String,
    /// Title including the artist credit, e.g. "Hurt by Johnny Cash".
    pub full_title: String,
    /// The song's index page.
    pub song_page_url: Option<String>,
    /// The song's lyrics page.
    pub lyrics_page_url: Option<String>,
    pub header_image_url: Option<String>,
    pub header_image_thumbnail_url: Option<String>,
    /// Human-readable release date, e.g. "October 31, 1975".
    pub release_date: Option<String>,
    /// Primary artists in credit order.
    pub artists: Vec<ArtistSummary>,
}

impl SongResult {
    /// Names of the primary artists joined for display.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
