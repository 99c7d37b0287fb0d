//! Core search model for songseek.
//!
//! This crate decodes the multi-section search payload returned by the
//! upstream song search endpoint, classifies its hits, and normalizes the
//! song hits into flat [`SongResult`] records. It performs no I/O: the
//! payload arrives from a fetcher in `songseek-client`, and diagnostics go
//! to an injected [`DiagnosticSink`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod normalize;
pub mod outcome;
pub mod payload;

pub use diagnostics::{DiagnosticSink, LogSink, MemorySink, NullSink};
pub use error::{Error, Result};
pub use model::{ArtistSummary, MissingLimitPolicy, SearchOptions, SongResult};
pub use normalize::normalize;
pub use outcome::{EmptyReason, SearchOutcome};
pub use payload::SearchPayload;
