use std::collections::HashSet;

use async_trait::async_trait;
use outreach_core::Target;
use outreach_logging::{outreach_debug, outreach_info};
use thiserror::Error;
use url::Url;

use crate::genai::{GenAiClient, GenAiError, GenerateResponse};

const ARTICLE_EXTENSIONS: &[&str] = &[".html", ".htm", ".php", ".asp", ".aspx"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{0}")]
    Failed(#[from] GenAiError),
}

#[derive(Debug, Clone, Default)]
pub struct FinderSettings {
    /// Keep only urls that look like individual posts.
    pub article_only: bool,
}

/// Finds candidate blog posts for a keyword.
///
/// Results may be fewer than `count`; they are neither verified live nor
/// guaranteed well-formed.
#[async_trait]
pub trait BlogFinder: Send + Sync {
    async fn find_candidates(&self, keyword: &str, count: usize)
        -> Result<Vec<Target>, SearchError>;
}

pub struct GeminiBlogFinder {
    client: GenAiClient,
    settings: FinderSettings,
}

impl GeminiBlogFinder {
    pub fn new(client: GenAiClient, settings: FinderSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl BlogFinder for GeminiBlogFinder {
    async fn find_candidates(
        &self,
        keyword: &str,
        count: usize,
    ) -> Result<Vec<Target>, SearchError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let prompt = build_search_prompt(keyword, count);
        let response = self.client.generate(&prompt, true).await?;
        let candidates = collect_candidates(&response, count, self.settings.article_only);
        outreach_info!(
            "Blog search keyword={:?} requested={} found={}",
            keyword,
            count,
            candidates.len()
        );
        Ok(candidates)
    }
}

fn build_search_prompt(keyword: &str, count: usize) -> String {
    let topic = keyword.trim();
    let subject = if topic.is_empty() {
        "blog posts on any topic".to_string()
    } else {
        format!("blog posts about \"{topic}\"")
    };
    format!(
        "Search the web for {count} recent {subject} that accept reader comments. \
         Prefer individual article pages over home pages or category listings. \
         List one post per line in the form: Title | URL"
    )
}

/// Builds the candidate list: grounding citations first, then urls found in
/// the answer text. De-duplicated by url and capped at `count`.
pub fn collect_candidates(
    response: &GenerateResponse,
    count: usize,
    article_only: bool,
) -> Vec<Target> {
    let grounded = response.web_sources().filter_map(|source| {
        let uri = source.uri.as_deref()?.trim();
        if uri.is_empty() {
            return None;
        }
        Some(Target::new(
            source.title.clone().unwrap_or_default().trim(),
            uri,
        ))
    });
    let text = response.text();
    let from_text = targets_in_text(&text);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for target in grounded.chain(from_text) {
        if out.len() >= count {
            break;
        }
        if article_only && !looks_like_article(&target.url) {
            outreach_debug!("Skipping non-article url {}", target.url);
            continue;
        }
        if seen.insert(target.url.clone()) {
            out.push(target);
        }
    }
    out
}

/// Heuristic for a single-post url: a `/YYYY/MM/` path segment pair or a
/// page-like extension on the last segment.
pub fn looks_like_article(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let segments: Vec<&str> = match parsed.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => return false,
    };

    let has_date = segments
        .windows(2)
        .any(|pair| is_digits(pair[0], 4) && is_digits(pair[1], 2));
    let has_page_ext = segments.last().is_some_and(|last| {
        let last = last.to_ascii_lowercase();
        ARTICLE_EXTENSIONS.iter().any(|ext| last.ends_with(ext))
    });
    has_date || has_page_ext
}

fn is_digits(segment: &str, len: usize) -> bool {
    segment.len() == len && segment.bytes().all(|b| b.is_ascii_digit())
}

/// One candidate per line holding an http(s) url; the text before the url
/// becomes the title.
fn targets_in_text(text: &str) -> Vec<Target> {
    text.lines().filter_map(target_in_line).collect()
}

fn target_in_line(line: &str) -> Option<Target> {
    let start = line.find("https://").or_else(|| line.find("http://"))?;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, ')' | ']' | '>' | '"' | '\'' | '<'))
        .unwrap_or(rest.len());
    let raw_url = rest[..end].trim_end_matches(['.', ',', ';', ':']);
    let parsed = Url::parse(raw_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let title = strip_list_marker(&line[..start])
        .trim_start_matches(['-', '*', '[', ' '])
        .trim_end_matches(['|', '-', ':', '(', '[', ']', '*', ' '])
        .trim();
    Some(Target::new(title, raw_url))
}

/// Drops a leading `1.` or `1)` list number.
fn strip_list_marker(text: &str) -> &str {
    let text = text.trim_start();
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && matches!(text.as_bytes().get(digits), Some(b'.' | b')')) {
        &text[digits + 1..]
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{build_search_prompt, looks_like_article, target_in_line};
    use outreach_core::DEFAULT_TARGET_TITLE;

    #[test]
    fn date_paths_and_page_extensions_are_articles() {
        assert!(looks_like_article("https://a.blogspot.com/2024/05/my-post.html"));
        assert!(looks_like_article("https://example.com/2023/11/some-slug/"));
        assert!(looks_like_article("https://example.com/blog/post.PHP"));
        assert!(!looks_like_article("https://example.com/"));
        assert!(!looks_like_article("https://example.com/category/gardening"));
        assert!(!looks_like_article("not a url"));
    }

    #[test]
    fn title_and_url_are_split_from_list_lines() {
        let target = target_in_line("1. **Pruning Roses** | https://roses.example.com/2024/04/p.html")
            .unwrap();
        assert_eq!(target.title, "Pruning Roses");
        assert_eq!(target.url, "https://roses.example.com/2024/04/p.html");

        let target = target_in_line("- [Compost](https://soil.example.com/compost.php).").unwrap();
        assert_eq!(target.title, "Compost");
        assert_eq!(target.url, "https://soil.example.com/compost.php");
    }

    #[test]
    fn leading_numbers_in_titles_survive() {
        let target = target_in_line("2) 10 Tips for Roses | https://roses.example.com/tips.html")
            .unwrap();
        assert_eq!(target.title, "10 Tips for Roses");
    }

    #[test]
    fn bare_url_gets_placeholder_title() {
        let target = target_in_line("https://x.example.com/a.html").unwrap();
        assert_eq!(target.title, DEFAULT_TARGET_TITLE);
    }

    #[test]
    fn lines_without_urls_are_ignored() {
        assert!(target_in_line("Here are some posts:").is_none());
    }

    #[test]
    fn empty_keyword_is_unconstrained() {
        assert!(build_search_prompt("  ", 3).contains("any topic"));
        assert!(build_search_prompt("roses", 3).contains("\"roses\""));
    }
}
