//! Pattern-based extraction of a rank from the profile page and of a solved
//! count from the submission statistics.
//!
//! The HTML is never parsed as a document: the page embeds its state as JSON
//! fragments and a rendered "Rank" label, and we match against the raw text.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::SubmissionCount;

static RANKING_FIELD: OnceLock<Regex> = OnceLock::new();
static USER_RANKING_FIELD: OnceLock<Regex> = OnceLock::new();
static RANK_LABEL: OnceLock<Regex> = OnceLock::new();

fn ranking_field() -> &'static Regex {
    RANKING_FIELD.get_or_init(|| Regex::new(r#"(?i)"ranking"\s*:\s*(\d+)"#).unwrap())
}

fn user_ranking_field() -> &'static Regex {
    USER_RANKING_FIELD.get_or_init(|| Regex::new(r#"(?i)"user_ranking"\s*:\s*(\d+)"#).unwrap())
}

fn rank_label() -> &'static Regex {
    RANK_LABEL.get_or_init(|| Regex::new(r"(?i)Rank\s*[:#]?\s*([\d,]+)").unwrap())
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds a rank in raw profile HTML.
///
/// Tries, in order, a `"ranking": N` field, a `"user_ranking": N` field and a
/// visible `Rank: 12,345` label, returning the first hit. Thousands separators
/// from the label are stripped. Only the first occurrence of each pattern is
/// considered.
pub fn extract_rank_from_html(html: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    if let Some(rank) = first_capture(ranking_field(), html) {
        return Some(rank);
    }
    if let Some(rank) = first_capture(user_ranking_field(), html) {
        return Some(rank);
    }

    // "Rank: ," strips to nothing and is not a rank
    first_capture(rank_label(), html)
        .map(|raw| raw.replace(',', ""))
        .filter(|rank| !rank.is_empty())
}

/// Picks the `all` difficulty entry and renders it as `Solved: <count>`
pub fn solved_from_stats(stats: &[SubmissionCount]) -> Option<String> {
    stats
        .iter()
        .find(|entry| entry.difficulty.eq_ignore_ascii_case("all"))
        .map(|entry| format!("Solved: {}", entry.count))
}
