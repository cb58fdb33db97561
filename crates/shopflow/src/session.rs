// Session - One live browser tab shared by the page objects of a test

use crate::config::{Settings, Urls};
use crate::driver::Driver;
use crate::error::Result;
use std::sync::Arc;

/// Handle to one browser page plus the settings every page object uses.
///
/// Cloning is cheap and every clone drives the same page. A test creates one
/// session, hands clones to its page objects, and drops it at teardown; page
/// objects never close it.
#[derive(Debug, Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    settings: Settings,
    urls: Arc<Urls>,
}

impl Session {
    /// Wraps a driver with default settings.
    pub fn new(driver: Arc<dyn Driver>) -> Result<Self> {
        Self::with_settings(driver, Settings::default())
    }

    /// Wraps a driver with explicit settings.
    ///
    /// Fails when `settings.base_url` cannot be turned into screen URLs.
    pub fn with_settings(driver: Arc<dyn Driver>, settings: Settings) -> Result<Self> {
        let urls = Arc::new(settings.urls()?);
        Ok(Self {
            driver,
            settings,
            urls,
        })
    }

    /// The driver behind this session
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// Settings in effect
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Screen URLs resolved from the base URL
    pub fn urls(&self) -> &Urls {
        &self.urls
    }

    /// URL of the current document
    pub async fn current_url(&self) -> Result<String> {
        self.driver.url().await
    }
}
