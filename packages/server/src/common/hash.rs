use sha2::{Digest, Sha256};

/// Fingerprint of submitted content, used as the cache key and dedup signal.
///
/// SHA-256 over the exact content bytes, encoded as lowercase hex. Two
/// submissions are the same logical work item only when their content is
/// byte-identical, so no normalization is applied before hashing.
pub fn content_fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
