//! Unique test data built from ULIDs, so suites sharing a database never
//! collide on names.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("set");
/// assert_ne!(a, unique_str("set"));
/// assert!(a.starts_with("set-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A title carrying a unique marker, for title-substring searches that must
/// only match rows created by the calling test.
pub fn unique_title(prefix: &str) -> (String, String) {
    let marker = Ulid::new().to_string().to_lowercase();
    (format!("{prefix} {marker}"), marker)
}
