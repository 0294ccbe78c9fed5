use crate::domain::{RankRecord, SourceError, SubmissionCount};
use std::error::Error;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// The third-party profile site.
/// Both calls are best-effort; the resolver never propagates their errors.
pub trait RankSource {
    /// Raw HTML of the user's public profile page
    fn fetch_profile_html(&self, username: &str) -> std::result::Result<String, SourceError>;

    /// `acSubmissionNum` entries from the structured query endpoint
    fn fetch_submission_stats(
        &self,
        username: &str,
    ) -> std::result::Result<Vec<SubmissionCount>, SourceError>;
}

/// Persists the artifact, replacing any previous one
pub trait ArtifactWriter {
    fn write(&self, record: &RankRecord) -> Result<()>;
}

/// Reads the pre-built artifact; every failure is a cache miss to the caller
pub trait ArtifactReader {
    fn read(&self) -> std::result::Result<RankRecord, SourceError>;
}

/// The element that shows the rank to visitors
pub trait RankDisplay {
    /// Confirms the element exists; checked before any lookup is made
    fn locate(&self) -> Result<()> {
        Ok(())
    }

    fn show(&self, text: &str) -> Result<()>;
}
