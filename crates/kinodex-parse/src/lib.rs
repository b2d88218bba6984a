mod noise;
pub mod normalize;
pub mod seasons;

pub use normalize::normalize;
pub use seasons::{extract_seasons, strip_seasons, Episodes, SeasonMap};
