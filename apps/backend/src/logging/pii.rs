use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use xxhash_rust::xxh3::xxh3_64;

/// Centralized registry for PII redaction regex patterns.
///
/// All patterns are vetted literals; construction cannot fail at runtime.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email pattern: matches standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Hex or base64-like runs of 16+ characters
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &TOKEN_REGEX
    }

    /// PostgreSQL constraint detail: `Key (col, col)=(value, value)`
    pub fn key_detail() -> &'static Regex {
        static KEY_DETAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"Key \(([^)]*)\)=\([^)]*\)").unwrap()
        });
        &KEY_DETAIL_REGEX
    }

    /// PostgreSQL check/not-null detail: `Failing row contains (...)`
    pub fn failing_row() -> &'static Regex {
        static FAILING_ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"Failing row contains \(.*\)").unwrap()
        });
        &FAILING_ROW_REGEX
    }
}

/// Redacts row values and free text that may carry user content from a raw
/// store error message.
///
/// Column names and constraint names survive so the message stays useful.
pub fn redact(input: &str) -> String {
    let keys = PiiRegexRegistry::key_detail().replace_all(input, "Key ($1)=([REDACTED])");
    let rows = PiiRegexRegistry::failing_row()
        .replace_all(&keys, "Failing row contains ([REDACTED])");

    let emails = PiiRegexRegistry::email().replace_all(&rows, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                format!("{}***{}", &full_match[..1], &full_match[at_pos..])
            }
            _ => full_match.to_string(),
        }
    });

    PiiRegexRegistry::opaque_token()
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that automatically redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

/// Stable pseudonym for a user id in log fields.
///
/// The same id always renders the same way, so a user's actions can be
/// correlated across log lines without the raw id being written.
#[derive(Clone, Copy)]
pub struct UserRef(pub i64);

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digest = xxh3_64(&self.0.to_le_bytes());
        write!(f, "u#{:08x}", digest >> 32)
    }
}

impl fmt::Debug for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
