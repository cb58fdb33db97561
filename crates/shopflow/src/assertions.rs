// Assertions - Auto-retry assertions over the driver seam
//
// Every assertion re-reads the live page until the condition holds or the
// budget runs out, then fails with the last value it observed.

use crate::driver::UrlPattern;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::session::Session;
use std::time::{Duration, Instant};

/// Creates an expectation for a locator on the session's page.
///
/// Timeout and poll interval default to the session's `assertion_timeout`
/// and `poll_interval`.
///
/// # Example
///
/// ```ignore
/// use shopflow::{expect, Locator};
///
/// let badge = Locator::new(".shopping_cart_badge").named("cart badge");
/// expect(&session, &badge).to_have_text("1").await?;
/// expect(&session, &badge).not().to_be_visible().await?;
/// ```
pub fn expect(session: &Session, locator: &Locator) -> Expectation {
    Expectation::new(session.clone(), locator.clone())
}

/// Creates an expectation about the page itself (its URL).
pub fn expect_page(session: &Session) -> PageExpectation {
    PageExpectation::new(session.clone())
}

#[derive(Debug, Clone)]
enum Condition {
    Visible,
    Enabled,
    Text(String),
    ContainsText(String),
    Value(String),
    Count(usize),
}

impl Condition {
    fn describe(&self) -> String {
        match self {
            Condition::Visible => "be visible".to_string(),
            Condition::Enabled => "be enabled".to_string(),
            Condition::Text(text) => format!("have text '{}'", text),
            Condition::ContainsText(text) => format!("contain text '{}'", text),
            Condition::Value(value) => format!("have value '{}'", value),
            Condition::Count(count) => format!("have count {}", count),
        }
    }
}

const ABSENT: &str = "<absent>";

/// Expectation wraps a locator and provides assertion methods with auto-retry.
#[derive(Debug)]
pub struct Expectation {
    session: Session,
    locator: Locator,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* methods consume self, matching the chained expect(..).to_*() style
#[allow(clippy::wrong_self_convention)]
impl Expectation {
    pub(crate) fn new(session: Session, locator: Locator) -> Self {
        let settings = session.settings();
        let timeout = settings.assertion_timeout;
        let poll_interval = settings.poll_interval;
        Self {
            session,
            locator,
            timeout,
            poll_interval,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the locator resolves to a rendered element.
    pub async fn to_be_visible(self) -> Result<()> {
        self.run(Condition::Visible).await
    }

    /// Asserts that nothing rendered matches the locator.
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().run(Condition::Visible).await
    }

    /// Asserts that the element is enabled.
    pub async fn to_be_enabled(self) -> Result<()> {
        self.run(Condition::Enabled).await
    }

    /// Asserts that the element text equals `expected` (both sides trimmed).
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        self.run(Condition::Text(expected.trim().to_string())).await
    }

    /// Asserts that the element text contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        self.run(Condition::ContainsText(expected.to_string())).await
    }

    /// Asserts that the input value equals `expected`.
    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        self.run(Condition::Value(expected.to_string())).await
    }

    /// Asserts that the locator matches exactly `expected` elements.
    pub async fn to_have_count(self, expected: usize) -> Result<()> {
        self.run(Condition::Count(expected)).await
    }

    async fn run(self, condition: Condition) -> Result<()> {
        let start = Instant::now();
        let selector = self.locator.selector();

        loop {
            let (holds, observed) = self.observe(&condition, selector).await?;
            if holds != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = format!(
                    "Expected {} {}to {}, but observed {} after {:?}",
                    self.locator.describe(),
                    if self.negate { "NOT " } else { "" },
                    condition.describe(),
                    observed,
                    self.timeout
                );
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn observe(&self, condition: &Condition, selector: &str) -> Result<(bool, String)> {
        let driver = self.session.driver();
        match condition {
            Condition::Visible => {
                let visible = driver.is_visible(selector).await?;
                let observed = if visible { "visible" } else { "not visible" };
                Ok((visible, observed.to_string()))
            }
            Condition::Enabled => match absent_as_none(driver.is_enabled(selector).await)? {
                Some(enabled) => {
                    let observed = if enabled { "enabled" } else { "disabled" };
                    Ok((enabled, observed.to_string()))
                }
                None => Ok((false, ABSENT.to_string())),
            },
            Condition::Text(expected) => {
                match absent_as_none(driver.text_content(selector).await)? {
                    Some(text) => {
                        let actual = text.unwrap_or_default();
                        let actual = actual.trim();
                        Ok((actual == expected, format!("'{}'", actual)))
                    }
                    None => Ok((false, ABSENT.to_string())),
                }
            }
            Condition::ContainsText(expected) => {
                match absent_as_none(driver.text_content(selector).await)? {
                    Some(text) => {
                        let actual = text.unwrap_or_default();
                        let actual = actual.trim();
                        Ok((actual.contains(expected.as_str()), format!("'{}'", actual)))
                    }
                    None => Ok((false, ABSENT.to_string())),
                }
            }
            Condition::Value(expected) => {
                match absent_as_none(driver.input_value(selector).await)? {
                    Some(actual) => Ok((&actual == expected, format!("'{}'", actual))),
                    None => Ok((false, ABSENT.to_string())),
                }
            }
            Condition::Count(expected) => {
                let actual = driver.count(selector).await?;
                Ok((actual == *expected, format!("count {}", actual)))
            }
        }
    }
}

/// An element that has not rendered yet is an observation, not a failure.
fn absent_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::ElementNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Expectation about the page URL.
#[derive(Debug)]
pub struct PageExpectation {
    session: Session,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl PageExpectation {
    pub(crate) fn new(session: Session) -> Self {
        let settings = session.settings();
        let timeout = settings.assertion_timeout;
        let poll_interval = settings.poll_interval;
        Self {
            session,
            timeout,
            poll_interval,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the current URL matches `pattern`.
    pub async fn to_have_url(self, pattern: impl Into<UrlPattern>) -> Result<()> {
        let pattern = pattern.into();
        let start = Instant::now();

        loop {
            let actual = self.session.current_url().await?;
            if pattern.matches(&actual) != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = format!(
                    "Expected page URL {}to match '{}', but was '{}' after {:?}",
                    if self.negate { "NOT " } else { "" },
                    pattern,
                    actual,
                    self.timeout
                );
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
