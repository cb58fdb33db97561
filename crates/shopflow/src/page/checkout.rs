// CheckoutPage - Common contract of the three checkout screens

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Position of a screen inside the checkout sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    /// Customer information form
    Information,
    /// Order overview with price summary
    Overview,
    /// Order confirmation
    Complete,
}

impl CheckoutStep {
    /// The step that follows this one, if any
    pub fn next(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Information => Some(CheckoutStep::Overview),
            CheckoutStep::Overview => Some(CheckoutStep::Complete),
            CheckoutStep::Complete => None,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutStep::Information => "information",
            CheckoutStep::Overview => "overview",
            CheckoutStep::Complete => "complete",
        })
    }
}

/// A checkout screen that can verify it is the one currently shown.
///
/// Implementations check their own identity: page title, URL and the
/// elements the step cannot work without.
#[async_trait]
pub trait CheckoutPage: Send + Sync {
    /// Fails unless this screen is the one currently displayed.
    async fn verify_page_loaded(&self) -> Result<()>;

    /// Which step of the checkout this screen is.
    fn step(&self) -> CheckoutStep;
}

/// Verifies whichever checkout screen is passed in.
pub async fn verify_checkout_step(page: &dyn CheckoutPage) -> Result<()> {
    let step = page.step();
    tracing::info!(next = ?step.next(), "Verifying checkout step: {}", step);
    page.verify_page_loaded()
        .await
        .map_err(|e| e.context(format!("checkout step '{}' not loaded", step)))
}
