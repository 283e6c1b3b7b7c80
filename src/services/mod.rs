pub mod matching;
pub mod providers;
pub mod scoring;

pub use matching::MatchingService;
