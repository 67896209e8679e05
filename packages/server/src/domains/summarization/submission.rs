//! Submission validation and content normalization.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::common::hash::content_fingerprint;
use crate::kernel::jobs::ContentType;

/// Body of a summarization submission: exactly one of `text` or `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub text: Option<String>,
    pub url: Option<String>,
}

/// Rejections that never create a job.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Provide 'text' or 'url', not both")]
    BothProvided,

    #[error("Provide either 'text' or 'url'")]
    NeitherProvided,

    #[error("Invalid URL format")]
    InvalidUrl,
}

/// Submission content after validation, ready for job creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    pub content_type: ContentType,
    pub content: String,
    pub content_hash: String,
}

/// Validate a submission and compute its content fingerprint.
///
/// Pure function: no clock, no I/O. Empty strings count as absent. A URL must
/// carry both a scheme and a network authority to be accepted.
pub fn normalize(request: &SubmitRequest) -> Result<NormalizedContent, ValidationError> {
    let text = request.text.as_deref().filter(|t| !t.is_empty());
    let url = request.url.as_deref().filter(|u| !u.is_empty());

    let (content_type, content) = match (text, url) {
        (Some(_), Some(_)) => return Err(ValidationError::BothProvided),
        (None, None) => return Err(ValidationError::NeitherProvided),
        (Some(text), None) => (ContentType::Text, text.to_string()),
        (None, Some(url)) => {
            let parsed = Url::parse(url).map_err(|_| ValidationError::InvalidUrl)?;
            if parsed.host_str().is_none() {
                return Err(ValidationError::InvalidUrl);
            }
            (ContentType::Url, url.to_string())
        }
    };

    let content_hash = content_fingerprint(&content);

    Ok(NormalizedContent {
        content_type,
        content,
        content_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request(text: &str) -> SubmitRequest {
        SubmitRequest {
            text: Some(text.to_string()),
            url: None,
        }
    }

    fn url_request(url: &str) -> SubmitRequest {
        SubmitRequest {
            text: None,
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn text_submission_normalizes_verbatim() {
        let normalized = normalize(&text_request("hello world")).unwrap();
        assert_eq!(normalized.content_type, ContentType::Text);
        assert_eq!(normalized.content, "hello world");
        assert_eq!(normalized.content_hash, content_fingerprint("hello world"));
    }

    #[test]
    fn url_submission_keeps_the_original_url_string() {
        let normalized = normalize(&url_request("https://example.com/page?q=1")).unwrap();
        assert_eq!(normalized.content_type, ContentType::Url);
        assert_eq!(normalized.content, "https://example.com/page?q=1");
    }

    #[test]
    fn both_fields_are_rejected() {
        let request = SubmitRequest {
            text: Some("hello".to_string()),
            url: Some("https://example.com".to_string()),
        };
        assert_eq!(normalize(&request), Err(ValidationError::BothProvided));
    }

    #[test]
    fn neither_field_is_rejected() {
        let request = SubmitRequest {
            text: None,
            url: None,
        };
        assert_eq!(normalize(&request), Err(ValidationError::NeitherProvided));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let request = SubmitRequest {
            text: Some(String::new()),
            url: Some(String::new()),
        };
        assert_eq!(normalize(&request), Err(ValidationError::NeitherProvided));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        assert_eq!(
            normalize(&url_request("not-a-url")),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(
            normalize(&url_request("example.com/page")),
            Err(ValidationError::InvalidUrl)
        );
    }

    #[test]
    fn url_without_host_is_rejected() {
        assert_eq!(
            normalize(&url_request("mailto:someone@example.com")),
            Err(ValidationError::InvalidUrl)
        );
    }

    #[test]
    fn identical_submissions_share_a_fingerprint() {
        let first = normalize(&text_request("same content")).unwrap();
        let second = normalize(&text_request("same content")).unwrap();
        assert_eq!(first.content_hash, second.content_hash);

        let other = normalize(&text_request("different content")).unwrap();
        assert_ne!(first.content_hash, other.content_hash);
    }
}
