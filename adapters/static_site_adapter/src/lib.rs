//! Adapters for the static site tree: the JSON artifact file and the HTML page
//! that displays the rank.

pub mod artifact;
pub mod page;

pub use artifact::JsonArtifactStore;
pub use page::HtmlRankDisplay;
