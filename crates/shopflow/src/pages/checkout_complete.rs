// CheckoutCompletePage - Order confirmation

use crate::config::constants;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::{BasePage, CheckoutPage, CheckoutStep};
use crate::session::Session;
use async_trait::async_trait;

/// Final checkout step. The cart is empty once this screen is shown.
#[derive(Debug, Clone)]
pub struct CheckoutCompletePage {
    base: BasePage,
    page_title: Locator,
    complete_header: Locator,
    complete_text: Locator,
    pony_express_image: Locator,
    back_home_button: Locator,
}

impl CheckoutCompletePage {
    pub fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session.clone()),
            page_title: Locator::new(".title").named("page title"),
            complete_header: Locator::new(".complete-header").named("complete header"),
            complete_text: Locator::new(".complete-text").named("complete text"),
            pony_express_image: Locator::new(".pony_express").named("pony express image"),
            back_home_button: Locator::new("[data-test=\"back-to-products\"]")
                .named("back home button"),
        }
    }

    pub async fn verify_order_complete_message(&self) -> Result<()> {
        self.base.assert_visible(&self.complete_header).await?;
        self.base
            .assert_text(&self.complete_header, constants::ORDER_COMPLETE_HEADER)
            .await
    }

    pub async fn verify_thank_you_message(&self) -> Result<()> {
        self.base.assert_visible(&self.complete_text).await?;
        self.base
            .assert_text(&self.complete_text, constants::ORDER_COMPLETE_TEXT)
            .await
    }

    pub async fn complete_header_text(&self) -> Result<String> {
        self.base.read_text(&self.complete_header).await
    }

    pub async fn complete_text(&self) -> Result<String> {
        self.base.read_text(&self.complete_text).await
    }

    pub async fn click_back_home(&self) -> Result<()> {
        self.base.assert_visible(&self.back_home_button).await?;
        self.base.click(&self.back_home_button).await
    }

    pub async fn verify_pony_express_image_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.pony_express_image).await
    }

    pub async fn verify_complete_order_success(&self) -> Result<()> {
        self.verify_page_loaded().await?;
        self.verify_order_complete_message().await?;
        self.verify_thank_you_message().await?;
        self.verify_pony_express_image_visible().await
    }

    /// The confirmation text contains `expected`.
    pub async fn verify_success_message(&self, expected: &str) -> Result<()> {
        let actual = self.complete_text().await?;
        if !actual.contains(expected) {
            return Err(Error::Invariant(format!(
                "Expected message to contain \"{}\" but got \"{}\"",
                expected, actual
            )));
        }
        Ok(())
    }

    pub async fn complete_order_and_return_home(&self) -> Result<()> {
        self.verify_complete_order_success().await?;
        self.click_back_home().await
    }
}

#[async_trait]
impl CheckoutPage for CheckoutCompletePage {
    async fn verify_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, constants::CHECKOUT_COMPLETE_TITLE)
            .await?;
        let url = self.base.urls().checkout_complete.clone();
        self.base.assert_url(url).await?;
        for element in [
            &self.complete_header,
            &self.complete_text,
            &self.pony_express_image,
            &self.back_home_button,
        ] {
            self.base.assert_visible(element).await?;
        }
        Ok(())
    }

    fn step(&self) -> CheckoutStep {
        CheckoutStep::Complete
    }
}
