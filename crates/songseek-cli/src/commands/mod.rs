pub mod config;
pub mod search;

pub use search::run_search;
