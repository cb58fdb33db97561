// Locator - Declarative, re-resolvable element reference
//
// A Locator never holds a DOM node. It is a selector chain that the driver
// evaluates against the live document on every use, so the same value can be
// reused across navigations and re-renders.
//
// Chain syntax (Playwright-style, steps joined by ` >> `):
// - `<css>`              descendants of the current set matching the CSS selector
// - `has-text="<text>"`  keep elements whose text contains <text>
// - `nth=<i>`            keep the i-th element (negative counts from the end)

use crate::error::{Error, Result};
use std::fmt;

/// Declarative reference to zero-or-more elements on the current page.
///
/// Locators are immutable: every refinement (`first`, `nth`,
/// `filter_has_text`, ...) returns a new value.
///
/// # Example
///
/// ```ignore
/// use shopflow::Locator;
///
/// let items = Locator::new(".inventory_item").named("inventory items");
/// let backpack = items.filter_has_text("Sauce Labs Backpack");
/// let add = backpack.locator("button").filter_has_text("Add to cart");
/// assert_eq!(
///     add.selector(),
///     r#".inventory_item >> has-text="Sauce Labs Backpack" >> button >> has-text="Add to cart""#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    selector: String,
    name: Option<String>,
}

impl Locator {
    /// Creates a locator from a CSS selector (or a full chain).
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            name: None,
        }
    }

    /// Attaches a human-readable name used in timeout and assertion messages.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the selector chain string
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the attached name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Description used in error messages: `name (selector)` or the bare selector.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.selector),
            None => format!("'{}'", self.selector),
        }
    }

    /// Locator for the first matching element.
    pub fn first(&self) -> Locator {
        self.derive("nth=0".to_string())
    }

    /// Locator for the last matching element.
    pub fn last(&self) -> Locator {
        self.derive("nth=-1".to_string())
    }

    /// Locator for the nth matching element (0-indexed, negative from the end).
    pub fn nth(&self, index: i32) -> Locator {
        self.derive(format!("nth={}", index))
    }

    /// Sub-locator matching descendants of this locator's elements.
    pub fn locator(&self, selector: &str) -> Locator {
        self.derive(selector.to_string())
    }

    /// Narrows the set to elements whose text contains `text`.
    ///
    /// Matching is a case-insensitive substring test on whitespace-normalized
    /// text, so a name that is contained in another name matches both.
    pub fn filter_has_text(&self, text: &str) -> Locator {
        self.derive(format!("has-text={}", quote(text)))
    }

    /// Parses the chain into steps for a driver to evaluate.
    pub fn steps(&self) -> Result<Vec<SelectorStep>> {
        parse_selector(&self.selector)
    }

    fn derive(&self, step: String) -> Locator {
        Locator {
            selector: format!("{} >> {}", self.selector, step),
            name: None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Locator::new(selector)
    }
}

/// One step of a parsed selector chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorStep {
    /// Descendants of the current set matching a CSS selector
    Css(String),
    /// Elements of the current set whose text contains the value
    HasText(String),
    /// Single element by index; negative indexes count from the end
    Nth(i32),
}

impl SelectorStep {
    /// Applies an `nth` index to a set of `len` elements.
    pub fn resolve_index(index: i32, len: usize) -> Option<usize> {
        if index >= 0 {
            let i = index as usize;
            (i < len).then_some(i)
        } else {
            let back = index.unsigned_abs() as usize;
            len.checked_sub(back)
        }
    }
}

/// Text predicate behind `has-text`: case-insensitive substring match after
/// collapsing runs of whitespace.
pub fn text_matches(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack).contains(&normalize_text(needle))
}

pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parses a selector chain into steps.
pub fn parse_selector(selector: &str) -> Result<Vec<SelectorStep>> {
    let invalid = |reason: &str| Error::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote_char: Option<char> = None;
    let mut chars = selector.chars().peekable();

    while let Some(c) = chars.next() {
        match quote_char {
            Some(q) => {
                current.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else if c == q {
                    quote_char = None;
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote_char = Some(c);
                    current.push(c);
                } else if c == '>' && chars.peek() == Some(&'>') {
                    chars.next();
                    parts.push(std::mem::take(&mut current));
                } else {
                    current.push(c);
                }
            }
        }
    }
    if quote_char.is_some() {
        return Err(invalid("unterminated quote"));
    }
    parts.push(current);

    let mut steps = Vec::with_capacity(parts.len());
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            return Err(invalid("empty step"));
        }
        steps.push(parse_step(part).map_err(|reason| invalid(&reason))?);
    }

    if !matches!(steps.first(), Some(SelectorStep::Css(_))) {
        return Err(invalid("chain must start with a CSS step"));
    }
    Ok(steps)
}

fn parse_step(part: &str) -> std::result::Result<SelectorStep, String> {
    if let Some(index) = part.strip_prefix("nth=") {
        return index
            .trim()
            .parse::<i32>()
            .map(SelectorStep::Nth)
            .map_err(|e| format!("bad nth index '{}': {}", index, e));
    }
    if let Some(quoted) = part.strip_prefix("has-text=") {
        return unquote(quoted.trim()).map(SelectorStep::HasText);
    }
    let css = part.strip_prefix("css=").unwrap_or(part);
    Ok(SelectorStep::Css(css.trim().to_string()))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn unquote(quoted: &str) -> std::result::Result<String, String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("has-text value must be double-quoted: {}", quoted))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err("dangling escape".to_string()),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chaining_builds_selector() {
        let items = Locator::new(".inventory_item");
        assert_eq!(items.first().selector(), ".inventory_item >> nth=0");
        assert_eq!(items.last().selector(), ".inventory_item >> nth=-1");
        assert_eq!(items.nth(2).selector(), ".inventory_item >> nth=2");
        assert_eq!(
            items.filter_has_text("Backpack").locator("button").selector(),
            r#".inventory_item >> has-text="Backpack" >> button"#
        );
    }

    #[test]
    fn test_parse_round_trips_chain() {
        let loc = Locator::new("[data-test=\"username\"]")
            .filter_has_text("a >> \"quoted\" \\ name")
            .nth(-1);
        let steps = loc.steps().expect("selector should parse");
        assert_eq!(
            steps,
            vec![
                SelectorStep::Css("[data-test=\"username\"]".into()),
                SelectorStep::HasText("a >> \"quoted\" \\ name".into()),
                SelectorStep::Nth(-1),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_chains() {
        assert!(parse_selector("nth=0").is_err());
        assert!(parse_selector(".a >> ").is_err());
        assert!(parse_selector(".a >> nth=x").is_err());
        assert!(parse_selector(".a >> has-text=unquoted").is_err());
        assert!(parse_selector("[data-test=\"oops]").is_err());
    }

    #[test]
    fn test_child_combinator_is_not_a_separator() {
        let steps = parse_selector(".cart_list > .cart_item").unwrap();
        assert_eq!(steps, vec![SelectorStep::Css(".cart_list > .cart_item".into())]);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(SelectorStep::resolve_index(0, 3), Some(0));
        assert_eq!(SelectorStep::resolve_index(-1, 3), Some(2));
        assert_eq!(SelectorStep::resolve_index(-3, 3), Some(0));
        assert_eq!(SelectorStep::resolve_index(-4, 3), None);
        assert_eq!(SelectorStep::resolve_index(3, 3), None);
        assert_eq!(SelectorStep::resolve_index(0, 0), None);
    }

    #[test]
    fn test_text_matching_is_substring_and_case_insensitive() {
        assert!(text_matches("Sauce Labs  Bolt\nT-Shirt $15.99", "sauce labs bolt t-shirt"));
        // Substring collisions are matched on purpose; callers must pick unique names
        assert!(text_matches("Test.allTheThings() T-Shirt (Red)", "T-Shirt"));
        assert!(!text_matches("Sauce Labs Onesie", "Backpack"));
    }

    #[test]
    fn test_describe_uses_name_when_present() {
        let named = Locator::new(".shopping_cart_badge").named("cart badge");
        assert_eq!(named.describe(), "cart badge (.shopping_cart_badge)");
        assert_eq!(Locator::new(".title").describe(), "'.title'");
        // Derived locators start unnamed
        assert_eq!(named.first().name(), None);
    }
}
