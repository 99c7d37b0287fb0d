use serde::{Deserialize, Serialize};

/// A primary artist as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub name: String,
    pub is_verified: bool,
    pub header_image_url: Option<String>,
    /// Profile image.
    pub image_url: Option<String>,
}

impl ArtistSummary {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_verified: false,
            header_image_url: None,
            image_url: None,
        }
    }

    #[must_use]
    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_summary_new() {
        let artist = ArtistSummary::new("Queen");
        assert_eq!(artist.name, "Queen");
        assert!(!artist.is_verified);
        assert!(artist.image_url.is_none());
    }

    #[test]
    fn test_artist_summary_verified() {
        let artist = ArtistSummary::new("Queen").verified();
        assert!(artist.is_verified);
    }

    #[test]
    fn test_artist_summary_serializes_flat() {
        let artist = ArtistSummary::new("Queen").verified();
        let json = serde_json::to_value(&artist).unwrap();
        assert_eq!(json["name"], "Queen");
        assert_eq!(json["is_verified"], true);
        assert!(json["header_image_url"].is_null());
    }
}
