// Browser backend - Driver implementation over playwright-rs
//
// Selector chains are parsed on our side and re-emitted in Playwright's own
// selector syntax, so `has-text` keeps its case-insensitive substring meaning
// and `nth` its negative indexing. Single-element operations count first:
// an empty or ambiguous match fails immediately instead of waiting out the
// server's actionability timeout.

use crate::driver::{Driver, LoadState};
use crate::error::{Error, Result};
use crate::locator::{SelectorStep, parse_selector};
use async_trait::async_trait;
use playwright_rs::protocol::{ClickOptions, FillOptions, Locator, SelectOptions};
use playwright_rs::{Browser, LaunchOptions, Page, Playwright};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// Set to a non-empty value other than `0`/`false` to show the browser window
pub const HEADFUL_VAR: &str = "SHOPFLOW_HEADFUL";

/// Path of a Chrome/Chromium executable to use instead of the bundled one
pub const CHROME_VAR: &str = "CHROME";

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Quiet period treated as network idle once the document has loaded
const NETWORK_IDLE_QUIET: Duration = Duration::from_millis(500);

/// Upper bound for one `wait_for_load_state` call
const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Server-side budget for an action on an element that is already resolved
const ACTION_TIMEOUT_MS: f64 = 5_000.0;

/// Launch options for [`PlaywrightBrowser`].
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub sandbox: bool,
    pub executable: Option<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            executable: None,
        }
    }
}

impl BrowserOptions {
    /// Defaults overridden by [`HEADFUL_VAR`] and [`CHROME_VAR`].
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(value) = lookup(HEADFUL_VAR) {
            let value = value.trim();
            options.headless = value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false");
        }
        if let Some(path) = lookup(CHROME_VAR) {
            if !path.trim().is_empty() {
                options.executable = Some(path.trim().to_string());
            }
        }
        options
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Disables the Chromium sandbox (needed in most containers).
    pub fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new()
            .headless(self.headless)
            .chromium_sandbox(self.sandbox);
        if let Some(path) = &self.executable {
            options = options.executable_path(path.clone());
        }
        options
    }
}

/// A Playwright server plus one launched Chromium.
#[derive(Debug)]
pub struct PlaywrightBrowser {
    playwright: Playwright,
    browser: Browser,
}

impl PlaywrightBrowser {
    /// Starts the Playwright server and launches Chromium.
    pub async fn launch(options: BrowserOptions) -> Result<Self> {
        tracing::info!(headless = options.headless, "Launching Chromium through Playwright");
        let playwright = Playwright::launch().await.map_err(driver_error)?;
        let browser = playwright
            .chromium()
            .launch_with_options(options.launch_options())
            .await
            .map_err(driver_error)?;
        Ok(Self { playwright, browser })
    }

    /// Opens a blank page.
    pub async fn new_page(&self) -> Result<BrowserPage> {
        let page = self.browser.new_page().await.map_err(driver_error)?;
        Ok(BrowserPage {
            page,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        })
    }

    /// Closes the browser and stops the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await.map_err(driver_error)?;
        self.playwright.shutdown().await.map_err(driver_error)
    }
}

/// One browser page, driven through [`Driver`].
#[derive(Debug, Clone)]
pub struct BrowserPage {
    page: Page,
    load_timeout: Duration,
}

impl BrowserPage {
    /// Caps how long [`Driver::wait_for_load_state`] may poll.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    async fn locator(&self, selector: &str) -> Result<Locator> {
        Ok(self.page.locator(&playwright_selector(selector)?).await)
    }

    /// Resolves `selector` to exactly one element.
    async fn single(&self, selector: &str) -> Result<Locator> {
        let locator = self.locator(selector).await?;
        match locator.count().await.map_err(|e| map_error(selector, e))? {
            0 => Err(Error::ElementNotFound(selector.to_string())),
            1 => Ok(locator),
            count => Err(Error::StrictModeViolation {
                selector: selector.to_string(),
                count,
            }),
        }
    }

    async fn ready_state(&self) -> Result<String> {
        self.page
            .evaluate_value("document.readyState")
            .await
            .map_err(driver_error)
    }

    async fn poll_load_state(&self, state: LoadState) -> Result<()> {
        loop {
            let ready = self.ready_state().await?;
            let reached = match state {
                LoadState::DomContentLoaded => ready != "loading",
                LoadState::Load | LoadState::NetworkIdle => ready == "complete",
            };
            if reached {
                break;
            }
            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
        if state == LoadState::NetworkIdle {
            tokio::time::sleep(NETWORK_IDLE_QUIET).await;
        }
        Ok(())
    }
}

/// Re-emits a selector chain in Playwright's selector syntax.
pub(crate) fn playwright_selector(selector: &str) -> Result<String> {
    let parts = parse_selector(selector)?
        .into_iter()
        .map(|step| match step {
            SelectorStep::Css(css) => Ok(css),
            // `i` keeps the filter case-insensitive and substring-based
            SelectorStep::HasText(text) => Ok(format!("internal:has-text={}i", serde_json::to_string(&text)?)),
            SelectorStep::Nth(index) => Ok(format!("nth={}", index)),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(" >> "))
}

fn driver_error(e: playwright_rs::Error) -> Error {
    Error::Driver(e.to_string())
}

fn strict_count(message: &str) -> Option<usize> {
    static STRICT: OnceLock<Option<Regex>> = OnceLock::new();
    STRICT
        .get_or_init(|| Regex::new(r"strict mode violation.*resolved to (\d+) elements").ok())
        .as_ref()?
        .captures(message)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Maps a playwright-rs failure on `selector` to the page-layer error.
fn map_error(selector: &str, e: playwright_rs::Error) -> Error {
    match e {
        playwright_rs::Error::ElementNotFound(_) => Error::ElementNotFound(selector.to_string()),
        playwright_rs::Error::InvalidArgument(message) => Error::InvalidArgument(message),
        playwright_rs::Error::Timeout(message) => Error::NotInteractable {
            selector: selector.to_string(),
            reason: message,
        },
        other => {
            let message = other.to_string();
            match strict_count(&message) {
                Some(count) => Error::StrictModeViolation {
                    selector: selector.to_string(),
                    count,
                },
                None => Error::Driver(message),
            }
        }
    }
}

#[async_trait]
impl Driver for BrowserPage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url, None)
            .await
            .map(|_| ())
            .map_err(|e| Error::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn url(&self) -> Result<String> {
        Ok(self.page.url())
    }

    async fn wait_for_load_state(&self, state: LoadState) -> Result<()> {
        tracing::debug!("Waiting for load state {}", state);
        match tokio::time::timeout(self.load_timeout, self.poll_load_state(state)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Navigation {
                url: self.page.url(),
                message: format!("load state {} not reached within {:?}", state, self.load_timeout),
            }),
        }
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        let locator = self.locator(selector).await?;
        locator.count().await.map_err(|e| map_error(selector, e))
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let locator = self.locator(selector).await?;
        match locator.count().await.map_err(|e| map_error(selector, e))? {
            0 => Ok(false),
            1 => locator.is_visible().await.map_err(|e| map_error(selector, e)),
            count => Err(Error::StrictModeViolation {
                selector: selector.to_string(),
                count,
            }),
        }
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        let locator = self.single(selector).await?;
        locator.is_enabled().await.map_err(|e| map_error(selector, e))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let locator = self.single(selector).await?;
        let options = ClickOptions::builder().timeout(ACTION_TIMEOUT_MS).build();
        locator
            .click(Some(options))
            .await
            .map_err(|e| map_error(selector, e))
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        let locator = self.single(selector).await?;
        let options = FillOptions::builder().timeout(ACTION_TIMEOUT_MS).build();
        locator
            .clear(Some(options))
            .await
            .map_err(|e| map_error(selector, e))
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let locator = self.single(selector).await?;
        let options = FillOptions::builder().timeout(ACTION_TIMEOUT_MS).build();
        locator
            .fill(text, Some(options))
            .await
            .map_err(|e| map_error(selector, e))
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        let locator = self.single(selector).await?;
        locator.text_content().await.map_err(|e| map_error(selector, e))
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        let locator = self.single(selector).await?;
        locator
            .input_value(None)
            .await
            .map_err(|e| map_error(selector, e))
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        let locator = self.single(selector).await?;
        let options = SelectOptions::builder().timeout(ACTION_TIMEOUT_MS).build();
        let selected = locator
            .select_option(value, Some(options))
            .await
            .map_err(|e| map_error(selector, e))?;
        if selected.iter().any(|v| v == value) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "'{}' has no option with value '{}'",
                selector, value
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_translation() {
        assert_eq!(
            playwright_selector(".inventory_item >> has-text=\"Backpack\" >> button").unwrap(),
            ".inventory_item >> internal:has-text=\"Backpack\"i >> button"
        );
        assert_eq!(
            playwright_selector(".cart_item >> nth=-1").unwrap(),
            ".cart_item >> nth=-1"
        );
        assert_eq!(
            playwright_selector("[data-test=\"title\"]").unwrap(),
            "[data-test=\"title\"]"
        );
    }

    #[test]
    fn test_strict_violation_is_recognized() {
        let message = "Protocol error: Error: strict mode violation: locator('.inventory_item') resolved to 2 elements";
        assert_eq!(strict_count(message), Some(2));
        assert_eq!(strict_count("Protocol error: Target closed"), None);

        let err = map_error(
            ".inventory_item",
            playwright_rs::Error::ProtocolError(message.to_string()),
        );
        assert!(matches!(err, Error::StrictModeViolation { count: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_options_from_lookup() {
        let options = BrowserOptions::from_lookup(|name| match name {
            HEADFUL_VAR => Some("1".to_string()),
            CHROME_VAR => Some(" /usr/bin/chromium ".to_string()),
            _ => None,
        });
        assert!(!options.headless);
        assert_eq!(options.executable.as_deref(), Some("/usr/bin/chromium"));

        let defaults = BrowserOptions::from_lookup(|_| None);
        assert!(defaults.headless);
        assert!(defaults.sandbox);
        assert!(BrowserOptions::from_lookup(|_| Some("false".to_string())).headless);
    }
}
