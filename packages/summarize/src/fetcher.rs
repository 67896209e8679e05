//! URL content resolution: HTTP fetch plus HTML text extraction.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// Maximum number of characters of extracted text passed downstream.
///
/// Bounds the cost of the summarization call regardless of page size.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Request timeout for a single fetch attempt.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves a URL into normalized text ready for summarization.
///
/// One implementation per resolution strategy; new content types plug in as
/// new implementations behind this trait.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// HTTP fetcher that GETs a page and reduces it to readable text.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Use a custom HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "fetching URL content");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::Http {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        let text = html_to_text(&html);
        let truncated: String = text.chars().take(MAX_CONTENT_LENGTH).collect();
        debug!(
            url = %url,
            extracted_len = text.chars().count(),
            truncated_len = truncated.chars().count(),
            "extracted page text"
        );

        Ok(truncated)
    }
}

/// Reduce an HTML document to readable text.
///
/// Strips scripts, styles, and markup, decodes common entities, and collapses
/// runs of blank lines. Good enough for summarization input; not a renderer.
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();

    // Remove scripts and styles entirely
    let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    text = script_pattern.replace_all(&text, "").to_string();
    text = style_pattern.replace_all(&text, "").to_string();

    // Block-level elements become line breaks
    let br_pattern = regex::Regex::new(r"<br\s*/?>").unwrap();
    let block_end_pattern =
        regex::Regex::new(r"</(p|div|li|h1|h2|h3|h4|h5|h6|tr|section|article)>").unwrap();
    text = br_pattern.replace_all(&text, "\n").to_string();
    text = block_end_pattern.replace_all(&text, "\n").to_string();

    // Remove remaining tags
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, "").to_string();

    // Decode HTML entities
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse whitespace: trim lines, drop empties, single newlines between
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_to_text_strips_markup() {
        let html = r#"
            <html><head><title>Page</title><style>body { color: red; }</style></head>
            <body>
                <h1>Heading</h1>
                <p>First paragraph.</p>
                <p>Second<br>paragraph.</p>
                <script>console.log("ignored");</script>
            </body></html>
        "#;

        let text = html_to_text(html);

        assert!(text.contains("Heading"));
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Second\nparagraph."));
        assert!(!text.contains("console.log"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn html_to_text_decodes_entities() {
        let text = html_to_text("<p>Fish &amp; chips &lt;for&gt; &quot;two&quot;&nbsp;&#39;?&#39;</p>");
        assert_eq!(text, "Fish & chips <for> \"two\" '?'");
    }

    #[test]
    fn html_to_text_collapses_blank_lines() {
        let text = html_to_text("<p>one</p>\n\n\n<p>two</p>");
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("just words"), "just words");
    }
}
