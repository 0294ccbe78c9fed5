use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::utils::{format_rank, parse_timestamp};

/// One resolved (or unresolved) rank, as persisted in the JSON artifact.
///
/// Records are never mutated after construction; every refresh produces a
/// fresh one and the artifact is overwritten wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRecord {
    pub rank: Option<String>,
    pub formatted: Option<String>,
    #[serde(
        default,
        serialize_with = "serialize_updated",
        deserialize_with = "deserialize_updated"
    )]
    pub updated: DateTime<Utc>,
}

impl RankRecord {
    /// Builds a record from a resolved raw value, deriving `formatted` from it
    pub fn resolved(rank: String, updated: DateTime<Utc>) -> Self {
        let formatted = format_rank(&rank);
        Self {
            rank: Some(rank),
            formatted: Some(formatted),
            updated,
        }
    }

    pub fn unavailable(updated: DateTime<Utc>) -> Self {
        Self {
            rank: None,
            formatted: None,
            updated,
        }
    }

    pub fn from_resolution(rank: Option<String>, updated: DateTime<Utc>) -> Self {
        match rank {
            Some(rank) => Self::resolved(rank, updated),
            None => Self::unavailable(updated),
        }
    }

    /// The text a page should show: `formatted`, else `rank`, else nothing
    pub fn display_value(&self) -> Option<&str> {
        self.formatted
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.rank.as_deref().filter(|s| !s.is_empty()))
    }
}

fn serialize_updated<S: Serializer>(updated: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&updated.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A null, non-string or unparseable `updated` reads as the epoch; the
/// timestamp never decides whether a cached rank is usable.
fn deserialize_updated<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_timestamp).unwrap_or_default())
}

/// One `acSubmissionNum` entry of the submission statistics query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionCount {
    pub difficulty: String,
    pub count: u64,
}

/// Why a rank source produced nothing.
///
/// The resolver treats every variant the same way; the distinction only
/// shows up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Which path the presentation updater took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationOutcome {
    /// The pre-built artifact had a value; no source was contacted
    Artifact(String),
    /// The artifact missed and the resolver chain produced a value
    Resolved(String),
    Unavailable,
}

impl PresentationOutcome {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Artifact(v) | Self::Resolved(v) => Some(v),
            Self::Unavailable => None,
        }
    }
}
