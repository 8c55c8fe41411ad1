//! Output normalisation for generated code.
//!
//! Models tend to wrap code in a markdown fence even when told not to. Only a
//! leading and a trailing fence are removed; fences inside the body are kept.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\s*```[A-Za-z0-9_+#.\-]*[ \t]*\r?\n").expect("valid regex"));
static TRAILING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n```[ \t]*\s*\z").expect("valid regex"));
// Once an opening fence was removed, the closing one may follow code directly
static CLOSING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n)?```[ \t]*\s*\z").expect("valid regex"));

/// Remove a leading ```` ```lang ```` line and a trailing ```` ``` ```` line.
///
/// ```
/// use apiforge_core::fence::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```swift\nlet x = 1\n```"), "let x = 1");
/// assert_eq!(strip_code_fence("plain"), "plain");
/// ```
pub fn strip_code_fence(text: &str) -> String {
    let without_leading = LEADING_FENCE.replace(text, "");
    let closing = if without_leading.len() < text.len() {
        &*CLOSING_FENCE
    } else {
        &*TRAILING_FENCE
    };
    closing.replace(&without_leading, "").into_owned()
}
