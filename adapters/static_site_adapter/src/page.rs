//! Writes the rank text into the contact card of a static HTML page.
//!
//! The card is located the same way the page script does it: the contact item
//! titled "LeetCode", or failing that any `contact-link` anchor pointing at
//! leetcode.com. Markup is matched textually; only the anchor's inner text is
//! replaced and the rest of the file is left byte-for-byte intact.

use std::fs;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::info;
use rank_core::ports::{RankDisplay, Result};
use regex::Regex;

const TARGET_TITLE: &str = "leetcode";
const TARGET_HOST: &str = "leetcode.com";

static CONTACT_TITLE: OnceLock<Regex> = OnceLock::new();
static CONTACT_LINK: OnceLock<Regex> = OnceLock::new();
static CONTACT_ITEM: OnceLock<Regex> = OnceLock::new();
static HREF: OnceLock<Regex> = OnceLock::new();

fn contact_title() -> &'static Regex {
    CONTACT_TITLE.get_or_init(|| {
        Regex::new(r#"(?is)<[a-z0-9]+\b[^>]*\bclass\s*=\s*["'][^"']*\bcontact-title\b[^"']*["'][^>]*>([^<]*)<"#)
            .unwrap()
    })
}

fn contact_link() -> &'static Regex {
    CONTACT_LINK.get_or_init(|| {
        Regex::new(r#"(?is)(<a\b[^>]*\bclass\s*=\s*["'][^"']*\bcontact-link\b[^"']*["'][^>]*>)([^<]*)</a>"#)
            .unwrap()
    })
}

fn contact_item() -> &'static Regex {
    CONTACT_ITEM.get_or_init(|| Regex::new(r#"(?i)\bcontact-item\b"#).unwrap())
}

fn href() -> &'static Regex {
    HREF.get_or_init(|| Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']*)["']"#).unwrap())
}

/// Byte range of the inner text of the LeetCode contact link, if any
pub fn locate_rank_element(html: &str) -> Option<Range<usize>> {
    by_title(html).or_else(|| by_href(html))
}

fn by_title(html: &str) -> Option<Range<usize>> {
    for title in contact_title().captures_iter(html) {
        let (Some(whole), Some(text)) = (title.get(0), title.get(1)) else {
            continue;
        };
        if !text.as_str().trim().eq_ignore_ascii_case(TARGET_TITLE) {
            continue;
        }

        let rest = &html[whole.end()..];
        let Some(link) = contact_link().captures(rest) else {
            continue;
        };
        let (Some(anchor), Some(inner)) = (link.get(0), link.get(2)) else {
            continue;
        };
        // The link must belong to the same contact item as the title
        if contact_item().is_match(&rest[..anchor.start()]) {
            continue;
        }
        let offset = whole.end();
        return Some(offset + inner.start()..offset + inner.end());
    }
    None
}

fn by_href(html: &str) -> Option<Range<usize>> {
    contact_link().captures_iter(html).find_map(|link| {
        let open = link.get(1)?;
        let target = href().captures(open.as_str())?.get(1)?;
        if !target.as_str().to_ascii_lowercase().contains(TARGET_HOST) {
            return None;
        }
        link.get(2).map(|inner| inner.range())
    })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Replaces the contact link text in `html`; `None` when there is no such element
pub fn render_rank(html: &str, text: &str) -> Option<String> {
    let range = locate_rank_element(html)?;
    let mut out = String::with_capacity(html.len() + text.len());
    out.push_str(&html[..range.start]);
    out.push_str(&escape_text(text));
    out.push_str(&html[range.end..]);
    Some(out)
}

/// A static page whose LeetCode contact link shows the rank
pub struct HtmlRankDisplay {
    page: PathBuf,
}

impl HtmlRankDisplay {
    pub fn new(page: impl Into<PathBuf>) -> Self {
        Self { page: page.into() }
    }

    fn not_found(&self) -> String {
        format!("no LeetCode contact link found in {}", self.page.display())
    }
}

impl RankDisplay for HtmlRankDisplay {
    fn locate(&self) -> Result<()> {
        let html = fs::read_to_string(&self.page)?;
        match locate_rank_element(&html) {
            Some(_) => Ok(()),
            None => Err(self.not_found().into()),
        }
    }

    fn show(&self, text: &str) -> Result<()> {
        let html = fs::read_to_string(&self.page)?;
        let rendered = render_rank(&html, text).ok_or_else(|| self.not_found())?;
        fs::write(&self.page, rendered)?;
        info!("Updated {} with \"{}\"", self.page.display(), text);
        Ok(())
    }
}
