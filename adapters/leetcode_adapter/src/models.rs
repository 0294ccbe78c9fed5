use rank_core::domain::SubmissionCount;
use serde::Deserialize;
use serde_json::json;

pub const QUERY: &str = r#"
    query getUserProfile($username: String!) {
        matchedUser(username: $username) {
            username
            submitStats {
                acSubmissionNum {
                    difficulty
                    count
                }
            }
        }
    }
"#;

pub fn build_payload(username: &str) -> serde_json::Value {
    json!({
        "query": QUERY,
        "variables": { "username": username }
    })
}

#[derive(Deserialize)]
pub struct Response {
    pub data: Option<Data>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub matched_user: Option<MatchedUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    /// Kept raw so one bad entry does not sink the rest
    pub ac_submission_num: Option<Vec<serde_json::Value>>,
}

impl Response {
    /// Walks `data.matchedUser.submitStats`; `None` when any level is absent.
    /// A missing `acSubmissionNum` list counts as empty, and entries without a
    /// usable `difficulty` or `count` are skipped.
    pub fn into_submission_counts(self) -> Option<Vec<SubmissionCount>> {
        let stats = self.data?.matched_user?.submit_stats?;
        let counts = stats
            .ac_submission_num
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<SubmissionCount>(entry).ok())
            .collect();
        Some(counts)
    }
}
