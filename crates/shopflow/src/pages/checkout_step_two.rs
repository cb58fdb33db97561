// CheckoutStepTwoPage - Order overview with item list and price summary

use crate::config::constants;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::{BasePage, CheckoutPage, CheckoutStep};
use crate::session::Session;
use async_trait::async_trait;
use serde::Serialize;

/// Amounts shown in the overview's price summary, as displayed (`$32.39`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

/// Second checkout step: the order overview.
///
/// Payment and shipping details share one class and are told apart by
/// position only: the first `.summary_value_label` is payment, the last is
/// shipping.
#[derive(Debug, Clone)]
pub struct CheckoutStepTwoPage {
    base: BasePage,
    page_title: Locator,
    cart_items: Locator,
    summary_info: Locator,
    summary_subtotal: Locator,
    summary_tax: Locator,
    summary_total: Locator,
    finish_button: Locator,
    cancel_button: Locator,
    payment_information: Locator,
    shipping_information: Locator,
}

/// Drops the first occurrence of a label prefix such as `"Tax: "`.
fn strip_label(text: &str, label: &str) -> String {
    text.replacen(label, "", 1)
}

impl CheckoutStepTwoPage {
    pub fn new(session: &Session) -> Self {
        let value_labels = Locator::new(".summary_value_label");
        Self {
            base: BasePage::new(session.clone()),
            page_title: Locator::new(".title").named("page title"),
            cart_items: Locator::new(".cart_item"),
            summary_info: Locator::new(".summary_info").named("order summary"),
            summary_subtotal: Locator::new(".summary_subtotal_label").named("subtotal"),
            summary_tax: Locator::new(".summary_tax_label").named("tax"),
            summary_total: Locator::new(".summary_total_label").named("total"),
            finish_button: Locator::new("[data-test=\"finish\"]").named("finish button"),
            cancel_button: Locator::new("[data-test=\"cancel\"]").named("cancel button"),
            payment_information: value_labels.first().named("payment information"),
            shipping_information: value_labels.last().named("shipping information"),
        }
    }

    fn cart_item(&self, name: &str) -> Locator {
        self.cart_items
            .filter_has_text(name)
            .named(format!("order item '{}'", name))
    }

    pub async fn verify_product_in_order_summary(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.cart_item(name)).await
    }

    pub async fn verify_backpack_in_order_summary(&self) -> Result<()> {
        self.verify_product_in_order_summary(constants::BACKPACK).await
    }

    pub async fn subtotal_amount(&self) -> Result<String> {
        let text = self.base.read_text(&self.summary_subtotal).await?;
        Ok(strip_label(&text, constants::SUBTOTAL_PREFIX))
    }

    pub async fn tax_amount(&self) -> Result<String> {
        let text = self.base.read_text(&self.summary_tax).await?;
        Ok(strip_label(&text, constants::TAX_PREFIX))
    }

    pub async fn total_amount(&self) -> Result<String> {
        let text = self.base.read_text(&self.summary_total).await?;
        Ok(strip_label(&text, constants::TOTAL_PREFIX))
    }

    pub async fn order_summary(&self) -> Result<OrderSummary> {
        Ok(OrderSummary {
            subtotal: self.subtotal_amount().await?,
            tax: self.tax_amount().await?,
            total: self.total_amount().await?,
        })
    }

    pub async fn payment_information(&self) -> Result<String> {
        self.base.read_text(&self.payment_information).await
    }

    pub async fn shipping_information(&self) -> Result<String> {
        self.base.read_text(&self.shipping_information).await
    }

    pub async fn click_finish(&self) -> Result<()> {
        tracing::info!("Finishing order");
        self.base.assert_visible(&self.finish_button).await?;
        self.base.click(&self.finish_button).await
    }

    pub async fn click_cancel(&self) -> Result<()> {
        self.base.click(&self.cancel_button).await
    }

    pub async fn order_item_count(&self) -> Result<usize> {
        self.base.count(&self.cart_items).await
    }

    pub async fn verify_order_item_count(&self, expected: usize) -> Result<()> {
        let actual = self.order_item_count().await?;
        if actual != expected {
            return Err(Error::Invariant(format!(
                "Expected {} items in order summary, but found {}",
                expected, actual
            )));
        }
        Ok(())
    }

    pub async fn product_price_in_order_summary(&self, name: &str) -> Result<String> {
        let price = self.cart_item(name).locator(".inventory_item_price");
        self.base.read_text(&price).await
    }

    pub async fn product_quantity_in_order_summary(&self, name: &str) -> Result<String> {
        let quantity = self.cart_item(name).locator(".cart_quantity");
        self.base.read_text(&quantity).await
    }

    /// Every summary line is displayed.
    pub async fn verify_order_summary_complete(&self) -> Result<()> {
        for line in [
            &self.summary_subtotal,
            &self.summary_tax,
            &self.summary_total,
            &self.payment_information,
            &self.shipping_information,
        ] {
            self.base.assert_visible(line).await?;
        }
        Ok(())
    }

    pub async fn all_product_names_in_order_summary(&self) -> Result<Vec<String>> {
        self.base
            .all_texts(&self.cart_items.locator(".inventory_item_name"))
            .await
    }
}

#[async_trait]
impl CheckoutPage for CheckoutStepTwoPage {
    async fn verify_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, constants::CHECKOUT_STEP_TWO_TITLE)
            .await?;
        let url = self.base.urls().checkout_step_two.clone();
        self.base.assert_url(url).await?;
        self.base.assert_visible(&self.summary_info).await?;
        self.base.assert_visible(&self.finish_button).await?;
        self.base.assert_visible(&self.cancel_button).await
    }

    fn step(&self) -> CheckoutStep {
        CheckoutStep::Overview
    }
}
