//! 日志辅助

/// Truncation of response bodies and masking of tokens before they reach the log.
pub mod log_sanitizer;
