// Driver - Browser automation seam
//
// Page objects never talk to a browser directly. Everything they need is the
// narrow set of operations below, keyed by selector chains (see `locator`).
// Two backends implement it: the in-process storefront simulator and, behind
// the `browser` feature, a playwright-rs page.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;

/// Browser page operations used by the page-object layer.
///
/// Single-element operations (`click`, `clear`, `fill`, `text_content`,
/// `input_value`, `select_option`, `is_enabled`) are strict: they fail with
/// [`Error::ElementNotFound`] when the selector matches nothing and with
/// [`Error::StrictModeViolation`] when it matches more than one element.
/// `is_visible` is the exception: an empty match is simply not visible.
#[async_trait]
pub trait Driver: Send + Sync + fmt::Debug {
    /// Navigates the page to `url` and waits for the document to load.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Returns the URL of the current document.
    async fn url(&self) -> Result<String>;

    /// Waits until the page reaches the given load state.
    async fn wait_for_load_state(&self, state: LoadState) -> Result<()>;

    /// Number of elements the selector currently matches.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Whether the matched element is rendered; `false` when nothing matches.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Whether the matched element accepts input (not `disabled`).
    async fn is_enabled(&self, selector: &str) -> Result<bool>;

    /// Clicks the matched element.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clears the value of the matched input.
    async fn clear(&self, selector: &str) -> Result<()>;

    /// Replaces the value of the matched input with `text`.
    async fn fill(&self, selector: &str, text: &str) -> Result<()>;

    /// Text content of the matched element, `None` if it has no text node.
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;

    /// Current value of the matched input.
    async fn input_value(&self, selector: &str) -> Result<String>;

    /// Selects the `<option>` with the given value in the matched `<select>`.
    async fn select_option(&self, selector: &str, value: &str) -> Result<()>;
}

/// Load states a page can be waited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The `load` event fired
    #[default]
    Load,
    /// The `DOMContentLoaded` event fired
    DomContentLoaded,
    /// No network connections for at least 500ms
    NetworkIdle,
}

impl LoadState {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            LoadState::Load => "load",
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected-URL matcher for page identity checks.
///
/// Glob patterns follow the `glob` crate: `*` matches any run of characters
/// and `**` is accepted as well, `?` matches a single character.
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Exact string equality
    Exact(String),
    /// Glob pattern such as `**/inventory.html`
    Glob(glob::Pattern),
    /// Regular expression, unanchored
    Regex(regex::Regex),
}

impl UrlPattern {
    /// Exact match against `url`.
    pub fn exact(url: impl Into<String>) -> Self {
        UrlPattern::Exact(url.into())
    }

    /// Compiles a glob pattern.
    pub fn glob(pattern: &str) -> Result<Self> {
        glob::Pattern::new(pattern)
            .map(UrlPattern::Glob)
            .map_err(|e| Error::InvalidArgument(format!("Invalid URL glob '{}': {}", pattern, e)))
    }

    /// Compiles a regular expression.
    pub fn regex(pattern: &str) -> Result<Self> {
        regex::Regex::new(pattern)
            .map(UrlPattern::Regex)
            .map_err(|e| Error::InvalidArgument(format!("Invalid URL regex '{}': {}", pattern, e)))
    }

    /// Checks `url` against the pattern.
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlPattern::Exact(expected) => expected == url,
            UrlPattern::Glob(pattern) => pattern.matches(url),
            UrlPattern::Regex(re) => re.is_match(url),
        }
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlPattern::Exact(url) => f.write_str(url),
            UrlPattern::Glob(pattern) => write!(f, "glob:{}", pattern.as_str()),
            UrlPattern::Regex(re) => write!(f, "regex:{}", re.as_str()),
        }
    }
}

impl From<&str> for UrlPattern {
    fn from(url: &str) -> Self {
        UrlPattern::exact(url)
    }
}

impl From<String> for UrlPattern {
    fn from(url: String) -> Self {
        UrlPattern::Exact(url)
    }
}

impl From<url::Url> for UrlPattern {
    fn from(url: url::Url) -> Self {
        UrlPattern::Exact(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern() {
        let pattern = UrlPattern::from("https://www.saucedemo.com/inventory.html");
        assert!(pattern.matches("https://www.saucedemo.com/inventory.html"));
        assert!(!pattern.matches("https://www.saucedemo.com/inventory.html?x=1"));
    }

    #[test]
    fn test_glob_pattern() {
        let pattern = UrlPattern::glob("**/checkout-step-*.html").expect("valid glob");
        assert!(pattern.matches("https://www.saucedemo.com/checkout-step-one.html"));
        assert!(pattern.matches("http://127.0.0.1:4000/checkout-step-two.html"));
        assert!(!pattern.matches("https://www.saucedemo.com/cart.html"));
    }

    #[test]
    fn test_regex_pattern() {
        let pattern = UrlPattern::regex(r"/inventory\.html$").expect("valid regex");
        assert!(pattern.matches("https://www.saucedemo.com/inventory.html"));
        assert!(!pattern.matches("https://www.saucedemo.com/inventory-item.html?id=4"));
        assert!(UrlPattern::regex("(").is_err());
    }

    #[test]
    fn test_load_state_names() {
        assert_eq!(LoadState::NetworkIdle.to_string(), "networkidle");
        assert_eq!(LoadState::default(), LoadState::Load);
    }
}
