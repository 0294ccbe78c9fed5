pub const DEFAULT_USERNAME: &str = "dj20101004";
pub const DEFAULT_PROFILE_URL_TEMPLATE: &str = "https://leetcode.com/u/{username}/";
pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

/// Site-relative path the page reads the pre-built artifact from
pub const DEFAULT_ARTIFACT_PATH: &str = "assets/data/leetcode.json";

pub const DEFAULT_LABEL: &str = "Rank : ";
pub const DEFAULT_PLACEHOLDER: &str = "N/A";

/// Where the resolver looks and for whom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub username: String,
    /// Profile page URL; `{username}` is substituted
    pub profile_url_template: String,
    pub graphql_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            profile_url_template: DEFAULT_PROFILE_URL_TEMPLATE.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn profile_url(&self) -> String {
        expand_profile_url(&self.profile_url_template, &self.username)
    }
}

/// Substitutes `{username}` in a profile URL template
pub fn expand_profile_url(template: &str, username: &str) -> String {
    template.replace("{username}", username)
}

/// How the presentation updater renders the element text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationConfig {
    pub label: String,
    pub placeholder: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl PresentationConfig {
    pub fn render(&self, value: Option<&str>) -> String {
        format!("{}{}", self.label, value.unwrap_or(&self.placeholder))
    }
}
