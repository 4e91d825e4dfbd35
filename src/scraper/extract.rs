use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    config::{CategoryRule, ScraperConfig},
    domain::{NoticeCandidate, NoticeCategory},
};

/// A named block matcher. The extractor runs these in order and treats every
/// match as one candidate notice block, so adding support for a new page
/// layout means adding a pattern here, not touching the pipeline.
struct BlockPattern {
    name: &'static str,
    regex: &'static Lazy<Regex>,
}

static ARTICLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<article[^>]*class="[^"]*post[^"]*"[^>]*>.*?</article>"#).unwrap()
});
static NOTICE_DIV_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div[^>]*class="[^"]*notice[^"]*"[^>]*>.*?</div>"#).unwrap()
});
static NOTICE_LINK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a[^>]*href="[^"]*notice[^"]*"[^>]*>.*?</a>"#).unwrap()
});
static TABLE_ROW_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>.*?</tr>").unwrap());

static BLOCK_PATTERNS: &[BlockPattern] = &[
    BlockPattern { name: "article-post", regex: &ARTICLE_BLOCK },
    BlockPattern { name: "notice-div", regex: &NOTICE_DIV_BLOCK },
    BlockPattern { name: "notice-link", regex: &NOTICE_LINK_BLOCK },
    BlockPattern { name: "table-row", regex: &TABLE_ROW_BLOCK },
];

static HEADING_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").unwrap());
static ANCHOR_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<a[^>]*>(.*?)</a>").unwrap());
static CELL_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap());

static DATETIME_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<time[^>]*datetime="([^"]*)""#).unwrap());
static TEXT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+ \d{1,2}, \d{4})").unwrap());

static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^;\s]+;").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips tags and entities and collapses whitespace. Applied to every text
/// field pulled out of source markup.
pub fn clean_text(raw: &str) -> String {
    let without_tags = TAG.replace_all(raw, "");
    let without_entities = ENTITY.replace_all(&without_tags, " ");
    WHITESPACE.replace_all(&without_entities, " ").trim().to_string()
}

pub struct NoticeExtractor {
    min_title_chars: usize,
    max_excerpt_chars: usize,
    category_rules: Vec<CategoryRule>,
}

impl NoticeExtractor {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            min_title_chars: config.min_title_chars,
            max_excerpt_chars: config.max_excerpt_chars,
            category_rules: config.category_rules.clone(),
        }
    }

    /// Extracts candidate notices from one HTML document. Total: malformed
    /// or unrecognized markup yields an empty list, never an error. `now` is
    /// the fallback for blocks with no parseable date.
    pub fn extract(&self, html: &str, now: DateTime<Utc>) -> Vec<NoticeCandidate> {
        let mut candidates = Vec::new();

        for pattern in BLOCK_PATTERNS {
            let mut found = 0usize;
            for block in pattern.regex.find_iter(html) {
                if let Some(candidate) = self.extract_block(block.as_str(), now) {
                    candidates.push(candidate);
                    found += 1;
                }
            }
            tracing::debug!(pattern = pattern.name, found, "Scanned block pattern");
        }

        candidates
    }

    fn extract_block(&self, block: &str, now: DateTime<Utc>) -> Option<NoticeCandidate> {
        let title = self.extract_title(block)?;
        let published_at = self.extract_date(block).unwrap_or(now);
        let content = self
            .extract_excerpt(block)
            .unwrap_or_else(|| title.clone());
        let category = self.categorize(&title);

        Some(NoticeCandidate {
            title,
            content,
            category,
            published_at,
        })
    }

    /// First sub-pattern producing a cleaned title of usable length wins;
    /// blocks with nothing that long are skipped entirely.
    fn extract_title(&self, block: &str) -> Option<String> {
        for pattern in [&HEADING_TITLE, &ANCHOR_TITLE, &CELL_TITLE] {
            for capture in pattern.captures_iter(block) {
                let title = clean_text(&capture[1]);
                if title.chars().count() >= self.min_title_chars {
                    return Some(title);
                }
            }
        }
        None
    }

    fn extract_date(&self, block: &str) -> Option<DateTime<Utc>> {
        if let Some(capture) = DATETIME_ATTR.captures(block) {
            if let Some(parsed) = parse_date(&capture[1]) {
                return Some(parsed);
            }
        }
        if let Some(capture) = TEXT_DATE.captures(block) {
            if let Some(parsed) = parse_date(&capture[1]) {
                return Some(parsed);
            }
        }
        None
    }

    fn extract_excerpt(&self, block: &str) -> Option<String> {
        let capture = PARAGRAPH.captures(block)?;
        let text = clean_text(&capture[1]);
        if text.is_empty() {
            return None;
        }
        Some(text.chars().take(self.max_excerpt_chars).collect())
    }

    /// Case-insensitive keyword match against the configured rules, first
    /// match wins; anything unmatched is a general notice.
    fn categorize(&self, title: &str) -> NoticeCategory {
        let title_lower = title.to_lowercase();
        for rule in &self.category_rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| title_lower.contains(&keyword.to_lowercase()))
            {
                return rule.category;
            }
        }
        NoticeCategory::General
    }
}

/// Machine-readable timestamps first, then the loose `Month D, YYYY` form
/// the source site prints under each post.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%B %d, %Y") {
        return Some(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0)?,
            Utc,
        ));
    }
    None
}
