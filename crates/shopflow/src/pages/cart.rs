// CartPage - Cart contents, per-item details and checkout entry

use crate::config::constants;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::BasePage;
use crate::session::Session;

/// The cart screen.
#[derive(Debug, Clone)]
pub struct CartPage {
    base: BasePage,
    page_title: Locator,
    cart_items: Locator,
    checkout_button: Locator,
    continue_shopping_button: Locator,
}

impl CartPage {
    pub fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session.clone()),
            page_title: Locator::new(".title").named("page title"),
            cart_items: Locator::new(".cart_item"),
            checkout_button: Locator::new("[data-test=\"checkout\"]").named("checkout button"),
            continue_shopping_button: Locator::new("[data-test=\"continue-shopping\"]")
                .named("continue shopping button"),
        }
    }

    pub async fn verify_cart_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, constants::CART_TITLE)
            .await?;
        let url = self.base.urls().cart.clone();
        self.base.assert_url(url).await
    }

    fn cart_item(&self, name: &str) -> Locator {
        self.cart_items
            .filter_has_text(name)
            .named(format!("cart item '{}'", name))
    }

    pub async fn verify_product_in_cart(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.cart_item(name)).await
    }

    pub async fn verify_backpack_in_cart(&self) -> Result<()> {
        self.verify_product_in_cart(constants::BACKPACK).await
    }

    pub async fn remove_product_from_cart(&self, name: &str) -> Result<()> {
        tracing::info!("Removing '{}' from cart", name);
        let button = self
            .cart_item(name)
            .locator("button")
            .filter_has_text("Remove")
            .named(format!("remove button of '{}'", name));
        self.base.click(&button).await?;
        self.base
            .wait_hidden(&self.cart_item(name), self.base.settings().element_timeout)
            .await
    }

    pub async fn click_checkout(&self) -> Result<()> {
        self.base.assert_visible(&self.checkout_button).await?;
        self.base.click(&self.checkout_button).await
    }

    pub async fn click_continue_shopping(&self) -> Result<()> {
        self.base.click(&self.continue_shopping_button).await
    }

    /// Rows currently in the cart, counted without waiting.
    pub async fn cart_item_count(&self) -> Result<usize> {
        self.base.count(&self.cart_items).await
    }

    pub async fn verify_cart_item_count(&self, expected: usize) -> Result<()> {
        let actual = self.cart_item_count().await?;
        if actual != expected {
            return Err(Error::Invariant(format!(
                "Expected {} items in cart, but found {}",
                expected, actual
            )));
        }
        Ok(())
    }

    pub async fn product_price_in_cart(&self, name: &str) -> Result<String> {
        let price = self.cart_item(name).locator(".inventory_item_price");
        self.base.read_text(&price).await
    }

    pub async fn product_quantity_in_cart(&self, name: &str) -> Result<String> {
        let quantity = self.cart_item(name).locator(".cart_quantity");
        self.base.read_text(&quantity).await
    }

    pub async fn verify_cart_is_empty(&self) -> Result<()> {
        let count = self.cart_item_count().await?;
        if count > 0 {
            return Err(Error::Invariant(format!(
                "Expected cart to be empty, but found {} items",
                count
            )));
        }
        Ok(())
    }

    /// Product names in cart order; rows without a name are skipped.
    pub async fn all_product_names_in_cart(&self) -> Result<Vec<String>> {
        self.base
            .all_texts(&self.cart_items.locator(".inventory_item_name"))
            .await
    }

    pub async fn verify_checkout_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.checkout_button).await
    }

    pub async fn verify_continue_shopping_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.continue_shopping_button).await
    }
}
