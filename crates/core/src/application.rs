use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::{PresentationConfig, ResolverConfig};
use crate::domain::{PresentationOutcome, RankRecord};
use crate::extract::{extract_rank_from_html, solved_from_stats};
use crate::ports::{ArtifactReader, ArtifactWriter, RankDisplay, RankSource, Result};
use crate::utils::format_rank;

/// One step of the resolver chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    ProfileHtml,
    SubmissionStats,
}

impl Attempt {
    /// Evaluation order; the first attempt yielding a value wins
    pub const CHAIN: [Attempt; 2] = [Attempt::ProfileHtml, Attempt::SubmissionStats];
}

/// Resolves a displayable rank from an unreliable third-party source.
///
/// Every failure along the chain is logged and skipped; `resolve` never
/// returns an error, only `None` when no attempt produced a value.
pub struct RankResolver {
    config: ResolverConfig,
    source: Box<dyn RankSource>,
}

impl RankResolver {
    pub fn new(config: ResolverConfig, source: Box<dyn RankSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self) -> Option<String> {
        Attempt::CHAIN
            .iter()
            .find_map(|attempt| self.run(*attempt))
    }

    fn run(&self, attempt: Attempt) -> Option<String> {
        let username = self.config.username.as_str();
        let value = match attempt {
            Attempt::ProfileHtml => match self.source.fetch_profile_html(username) {
                Ok(html) => extract_rank_from_html(&html),
                Err(e) => {
                    warn!("Profile fetch failed for {}: {}", username, e);
                    None
                }
            },
            Attempt::SubmissionStats => match self.source.fetch_submission_stats(username) {
                Ok(stats) => solved_from_stats(&stats),
                Err(e) => {
                    warn!("Submission stats query failed for {}: {}", username, e);
                    None
                }
            },
        };

        match &value {
            Some(v) => debug!("{:?} resolved {:?}", attempt, v),
            None => debug!("{:?} produced no value", attempt),
        }
        value
    }
}

/// Build-time path: resolve once and overwrite the artifact
pub struct ArtifactService {
    resolver: RankResolver,
    writer: Box<dyn ArtifactWriter>,
}

impl ArtifactService {
    pub fn new(resolver: RankResolver, writer: Box<dyn ArtifactWriter>) -> Self {
        Self { resolver, writer }
    }

    /// Runs the resolver and writes a fresh record stamped with `now`.
    /// Only writer failures surface as errors.
    pub fn refresh(&self, now: DateTime<Utc>) -> Result<RankRecord> {
        let record = RankRecord::from_resolution(self.resolver.resolve(), now);
        if record.rank.is_none() {
            info!(
                "No rank resolved for {}; writing an empty record",
                self.resolver.config().username
            );
        }
        self.writer.write(&record)?;
        Ok(record)
    }
}

/// Page-load path: artifact first, resolver chain on a miss
pub struct PresentationUpdater {
    config: PresentationConfig,
    reader: Box<dyn ArtifactReader>,
    resolver: RankResolver,
    display: Box<dyn RankDisplay>,
}

impl PresentationUpdater {
    pub fn new(
        config: PresentationConfig,
        reader: Box<dyn ArtifactReader>,
        resolver: RankResolver,
        display: Box<dyn RankDisplay>,
    ) -> Self {
        Self {
            config,
            reader,
            resolver,
            display,
        }
    }

    /// Resolves the value to show and writes it to the display.
    /// Display failures are the only errors returned; a missing element is
    /// reported before the artifact or any source is touched.
    pub fn update(&self) -> Result<PresentationOutcome> {
        self.display.locate()?;
        let outcome = self.outcome();
        self.display.show(&self.config.render(outcome.value()))?;
        Ok(outcome)
    }

    fn outcome(&self) -> PresentationOutcome {
        match self.reader.read() {
            Ok(record) => match record.display_value() {
                Some(value) => return PresentationOutcome::Artifact(value.to_string()),
                None => debug!("Artifact has no rank value; falling back to live lookup"),
            },
            Err(e) => warn!("Failed to read rank artifact: {}", e),
        }

        match self.resolver.resolve() {
            Some(raw) => PresentationOutcome::Resolved(format_rank(&raw)),
            None => PresentationOutcome::Unavailable,
        }
    }
}
