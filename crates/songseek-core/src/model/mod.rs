pub mod artist;
pub mod options;
pub mod song;

pub use artist::ArtistSummary;
pub use options::{MissingLimitPolicy, SearchOptions};
pub use song::SongResult;
