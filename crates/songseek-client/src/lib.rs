//! Search client for songseek.
//!
//! Wraps the upstream song search endpoint behind the [`Fetcher`] trait,
//! loads layered configuration, and exposes [`SongSearch`], which composes
//! a fetcher with the normalization pipeline from `songseek-core` and
//! absorbs every failure into a [`SearchOutcome`].
//!
//! [`SearchOutcome`]: songseek_core::SearchOutcome

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod fetcher;
pub mod search;

pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use fetcher::{Fetcher, GeniusClient};
pub use search::{search, SongSearch};
