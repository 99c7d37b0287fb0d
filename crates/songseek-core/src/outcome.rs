use std::fmt;

use crate::model::SongResult;

/// Why a search produced no songs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The payload contained no song hits.
    NoMatches,
    /// Songs matched, but no limit was supplied and the policy withholds them.
    LimitNotSupplied { matched: usize },
    /// The request or the payload decode failed.
    RequestFailed(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatches => write!(f, "no songs matched"),
            Self::LimitNotSupplied { matched } => {
                write!(f, "{} songs matched but no limit was supplied", matched)
            }
            Self::RequestFailed(message) => write!(f, "request failed: {}", message),
        }
    }
}

/// Result of one search call.
///
/// Always carries a (possibly empty) sequence of songs. When the sequence is
/// empty for a reason other than an explicit zero limit, `empty_reason` says
/// why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub songs: Vec<SongResult>,
    pub empty_reason: Option<EmptyReason>,
}

impl SearchOutcome {
    pub fn found(songs: Vec<SongResult>) -> Self {
        Self {
            songs,
            empty_reason: None,
        }
    }

    pub fn empty(reason: EmptyReason) -> Self {
        Self {
            songs: Vec::new(),
            empty_reason: Some(reason),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::empty(EmptyReason::RequestFailed(message.into()))
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.empty_reason, Some(EmptyReason::RequestFailed(_)))
    }

    /// Legacy projection of the outcome.
    ///
    /// Returns `None` for a failed request and for matches withheld because
    /// no limit was supplied; `Some` otherwise, including `Some(vec![])` when
    /// nothing matched.
    pub fn into_songs(self) -> Option<Vec<SongResult>> {
        match self.empty_reason {
            Some(EmptyReason::LimitNotSupplied { .. } | EmptyReason::RequestFailed(_)) => None,
            Some(EmptyReason::NoMatches) | None => Some(self.songs),
        }
    }
}
