// BasePage - Wait/act/verify primitives shared by every page object
//
// Every page operation is built from these. Each action waits for its target
// first, so page objects never act on an element that has not rendered.

use crate::assertions::{expect, expect_page};
use crate::config::{Settings, Urls};
use crate::driver::{Driver, LoadState, UrlPattern};
use crate::error::{ElementState, Error, Result};
use crate::locator::Locator;
use crate::session::Session;
use std::time::{Duration, Instant};

/// Interaction primitives bound to one session.
#[derive(Debug, Clone)]
pub struct BasePage {
    session: Session,
}

impl BasePage {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The session this page drives
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Settings in effect for this session
    pub fn settings(&self) -> &Settings {
        self.session.settings()
    }

    /// Screen URLs for this session
    pub fn urls(&self) -> &Urls {
        self.session.urls()
    }

    fn driver(&self) -> &dyn Driver {
        self.session.driver()
    }

    /// Navigates to `url` within the navigation timeout.
    ///
    /// Any failure, including the timeout, surfaces as [`Error::Navigation`].
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let timeout = self.settings().navigation_timeout;
        tracing::info!("Navigating to {}", url);

        match tokio::time::timeout(timeout, self.driver().goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e @ Error::Navigation { .. })) => Err(e),
            Ok(Err(e)) => Err(Error::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(Error::Navigation {
                url: url.to_string(),
                message: format!("timed out after {:?}", timeout),
            }),
        }
    }

    /// Waits for the page to go network-idle.
    ///
    /// Best effort: a page that never settles within the navigation timeout
    /// is logged and tolerated. Driver failures still propagate.
    pub async fn wait_page_settled(&self) -> Result<()> {
        let timeout = self.settings().navigation_timeout;
        match tokio::time::timeout(timeout, self.driver().wait_for_load_state(LoadState::NetworkIdle))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Page did not reach networkidle within {:?}", timeout);
                Ok(())
            }
        }
    }

    /// Waits until `locator` resolves to a visible element.
    pub async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.wait_for(locator, ElementState::Visible, timeout).await
    }

    /// [`wait_visible`](Self::wait_visible) with the element timeout.
    pub async fn wait_visible_default(&self, locator: &Locator) -> Result<()> {
        self.wait_visible(locator, self.settings().element_timeout).await
    }

    /// Waits until `locator` resolves to a visible and enabled element.
    pub async fn wait_clickable(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.wait_for(locator, ElementState::Clickable, timeout).await
    }

    /// Waits until nothing rendered matches `locator`.
    pub async fn wait_hidden(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        self.wait_for(locator, ElementState::Hidden, timeout).await
    }

    async fn wait_for(&self, locator: &Locator, state: ElementState, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        let selector = locator.selector();
        let poll_interval = self.settings().poll_interval;
        tracing::debug!(selector, %state, "Waiting for element");

        loop {
            let reached = match state {
                ElementState::Visible => self.driver().is_visible(selector).await?,
                ElementState::Hidden => !self.driver().is_visible(selector).await?,
                ElementState::Clickable => {
                    self.driver().is_visible(selector).await? && self.driver().is_enabled(selector).await?
                }
            };
            if reached {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(Error::WaitTimeout {
                    locator: locator.describe(),
                    state,
                    timeout,
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Waits for `locator` to be clickable, then clicks it.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.wait_clickable(locator, self.settings().element_timeout).await?;
        tracing::debug!(selector = locator.selector(), "Click");
        self.driver().click(locator.selector()).await
    }

    /// Waits for `locator` to be visible, clears it, then types `text`.
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        self.wait_visible_default(locator).await?;
        tracing::debug!(selector = locator.selector(), "Fill");
        self.driver().clear(locator.selector()).await?;
        self.driver().fill(locator.selector(), text).await
    }

    /// Clears an input after waiting for it.
    pub async fn clear(&self, locator: &Locator) -> Result<()> {
        self.wait_visible_default(locator).await?;
        tracing::debug!(selector = locator.selector(), "Clear");
        self.driver().clear(locator.selector()).await
    }

    /// Picks an option of a `<select>` after waiting for it.
    pub async fn select_option(&self, locator: &Locator, value: &str) -> Result<()> {
        self.wait_visible_default(locator).await?;
        tracing::debug!(selector = locator.selector(), value, "Select option");
        self.driver().select_option(locator.selector(), value).await
    }

    /// Waits for `locator` to be visible and returns its trimmed text.
    ///
    /// An element without a text node reads as the empty string.
    pub async fn read_text(&self, locator: &Locator) -> Result<String> {
        self.wait_visible_default(locator).await?;
        let text = self.driver().text_content(locator.selector()).await?;
        Ok(text.map(|t| t.trim().to_string()).unwrap_or_default())
    }

    /// Reads an element that may legitimately be absent.
    ///
    /// Returns `Ok(None)` when the element does not become visible within the
    /// probe timeout. Other failures propagate.
    pub async fn try_read_text(&self, locator: &Locator) -> Result<Option<String>> {
        match self.wait_visible(locator, self.settings().probe_timeout).await {
            Ok(()) => {}
            Err(Error::WaitTimeout { .. }) => {
                tracing::debug!(selector = locator.selector(), "Optional element absent");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
        match self.driver().text_content(locator.selector()).await {
            Ok(text) => Ok(Some(text.map(|t| t.trim().to_string()).unwrap_or_default())),
            // Removed between the wait and the read
            Err(Error::ElementNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Trimmed text of every element `locator` matches right now, in order.
    ///
    /// Does not wait. Elements without text, or gone before they are read,
    /// are skipped.
    pub async fn all_texts(&self, locator: &Locator) -> Result<Vec<String>> {
        let count = self.count(locator).await?;
        let mut texts = Vec::with_capacity(count);
        for i in 0..count {
            let index = i32::try_from(i)
                .map_err(|_| Error::InvalidArgument(format!("element index {} out of range", i)))?;
            match self.driver().text_content(locator.nth(index).selector()).await {
                Ok(Some(text)) if !text.trim().is_empty() => texts.push(text.trim().to_string()),
                Ok(_) | Err(Error::ElementNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(texts)
    }

    /// Current value of an input, without waiting.
    pub async fn input_value(&self, locator: &Locator) -> Result<String> {
        self.driver().input_value(locator.selector()).await
    }

    /// Number of elements `locator` matches right now.
    pub async fn count(&self, locator: &Locator) -> Result<usize> {
        self.driver().count(locator.selector()).await
    }

    /// Visibility right now, without waiting.
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        self.driver().is_visible(locator.selector()).await
    }

    /// Asserts that `locator` becomes visible within the assertion timeout.
    pub async fn assert_visible(&self, locator: &Locator) -> Result<()> {
        expect(&self.session, locator).to_be_visible().await
    }

    /// Asserts that `locator` is not rendered within the assertion timeout.
    pub async fn assert_hidden(&self, locator: &Locator) -> Result<()> {
        expect(&self.session, locator).to_be_hidden().await
    }

    /// Asserts that `locator` is enabled within the assertion timeout.
    pub async fn assert_enabled(&self, locator: &Locator) -> Result<()> {
        expect(&self.session, locator).to_be_enabled().await
    }

    /// Asserts the exact (trimmed) text of `locator`.
    pub async fn assert_text(&self, locator: &Locator, expected: &str) -> Result<()> {
        expect(&self.session, locator).to_have_text(expected).await
    }

    /// Asserts that the current URL matches `pattern`.
    pub async fn assert_url(&self, pattern: impl Into<UrlPattern>) -> Result<()> {
        expect_page(&self.session).to_have_url(pattern).await
    }
}
