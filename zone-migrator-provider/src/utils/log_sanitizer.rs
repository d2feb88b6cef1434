//! Log sanitization utilities
//!
//! Keeps zone files, record payloads and account tokens out of debug/error logs.

/// Maximum number of bytes of a response body included in log output.
const BODY_LOG_LIMIT: usize = 256;

/// Number of trailing token characters left visible by [`mask_token`].
const TOKEN_VISIBLE_SUFFIX: usize = 4;

/// Largest char boundary not after `index`.
fn char_boundary_at_or_before(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0)
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones are cut on a char boundary
/// and suffixed with the total byte length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= BODY_LOG_LIMIT {
        return s.to_string();
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &s[..char_boundary_at_or_before(s, BODY_LOG_LIMIT)],
        s.len()
    )
}

/// Mask an API token, keeping only its last few characters.
///
/// Short tokens are masked entirely.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= TOKEN_VISIBLE_SUFFIX * 2 {
        return "****".to_string();
    }
    let suffix: String = chars[chars.len() - TOKEN_VISIBLE_SUFFIX..].iter().collect();
    format!("****{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"domain_records":[]}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn body_at_limit_unchanged() {
        let s = "x".repeat(BODY_LOG_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn long_body_truncated_with_length() {
        let s = "x".repeat(BODY_LOG_LIMIT + 44);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("[truncated, total {} bytes]", BODY_LOG_LIMIT + 44)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let s = "é".repeat(BODY_LOG_LIMIT);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn token_mask_keeps_suffix() {
        assert_eq!(mask_token("dop_v1_abcdef0123456789"), "****6789");
    }

    #[test]
    fn short_token_fully_masked() {
        assert_eq!(mask_token("abc"), "****");
        assert_eq!(mask_token(""), "****");
    }
}
