// ProductsPage - Inventory listing with add/remove buttons, sorting and cart badge

use crate::config::constants;
use crate::error::Result;
use crate::locator::Locator;
use crate::page::BasePage;
use crate::session::Session;
use std::fmt;

/// Orderings offered by the inventory sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Name (A to Z)
    NameAsc,
    /// Name (Z to A)
    NameDesc,
    /// Price (low to high)
    PriceAsc,
    /// Price (high to low)
    PriceDesc,
}

impl SortOrder {
    /// `<option>` value of the dropdown entry
    pub fn value(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "az",
            SortOrder::NameDesc => "za",
            SortOrder::PriceAsc => "lohi",
            SortOrder::PriceDesc => "hilo",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// The inventory screen.
///
/// Products are located by filtering `.inventory_item` on visible text. The
/// filter is a substring match, so a name contained in another product's
/// text ("T-Shirt") matches several items and single-element operations fail
/// with a strict-mode violation. Use full names, or the slug-based methods.
#[derive(Debug, Clone)]
pub struct ProductsPage {
    base: BasePage,
    page_title: Locator,
    shopping_cart_link: Locator,
    shopping_cart_badge: Locator,
    inventory_container: Locator,
    menu_button: Locator,
    logout_link: Locator,
    reset_link: Locator,
    sort_dropdown: Locator,
    inventory_items: Locator,
    product_names: Locator,
}

impl ProductsPage {
    pub fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session.clone()),
            page_title: Locator::new(".title").named("page title"),
            shopping_cart_link: Locator::new(".shopping_cart_link").named("shopping cart link"),
            shopping_cart_badge: Locator::new(".shopping_cart_badge").named("shopping cart badge"),
            inventory_container: Locator::new(".inventory_container").named("inventory container"),
            menu_button: Locator::new("#react-burger-menu-btn").named("menu button"),
            logout_link: Locator::new("#logout_sidebar_link").named("logout link"),
            reset_link: Locator::new("#reset_sidebar_link").named("reset app state link"),
            sort_dropdown: Locator::new(".product_sort_container").named("sort dropdown"),
            inventory_items: Locator::new(".inventory_item"),
            product_names: Locator::new(".inventory_item_name"),
        }
    }

    /// Opens the inventory directly (requires a logged-in session).
    pub async fn navigate(&self) -> Result<()> {
        let url = self.base.urls().inventory.clone();
        self.base.navigate(url.as_str()).await?;
        self.base.wait_page_settled().await
    }

    pub async fn verify_products_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, constants::PRODUCTS_TITLE)
            .await?;
        self.base.assert_visible(&self.inventory_container).await?;
        let url = self.base.urls().inventory.clone();
        self.base.assert_url(url).await
    }

    fn product(&self, name: &str) -> Locator {
        self.inventory_items
            .filter_has_text(name)
            .named(format!("product '{}'", name))
    }

    fn add_to_cart_button(&self, name: &str) -> Locator {
        self.product(name)
            .locator("button")
            .filter_has_text("Add to cart")
            .named(format!("add-to-cart button of '{}'", name))
    }

    fn remove_button(&self, name: &str) -> Locator {
        self.product(name)
            .locator("button")
            .filter_has_text("Remove")
            .named(format!("remove button of '{}'", name))
    }

    /// Clicks the product's "Add to cart" button.
    ///
    /// The button turns into "Remove" once the product is in the cart, so
    /// adding the same product twice fails with a wait timeout.
    pub async fn add_product_to_cart(&self, name: &str) -> Result<()> {
        tracing::info!("Adding '{}' to cart", name);
        let button = self.add_to_cart_button(name);
        self.base.wait_visible_default(&button).await?;
        self.base.click(&button).await
    }

    pub async fn add_backpack_to_cart(&self) -> Result<()> {
        self.add_product_to_cart(constants::BACKPACK).await
    }

    pub async fn remove_product_from_cart(&self, name: &str) -> Result<()> {
        tracing::info!("Removing '{}' from cart", name);
        let button = self.remove_button(name);
        self.base.wait_visible_default(&button).await?;
        self.base.click(&button).await?;
        self.base
            .wait_hidden(&button, self.base.settings().element_timeout)
            .await
    }

    /// Add-to-cart button keyed by the product slug (`sauce-labs-backpack`).
    pub fn product_by_slug(&self, slug: &str) -> Locator {
        Locator::new(format!("[data-test=\"add-to-cart-{}\"]", slug))
            .named(format!("add-to-cart button '{}'", slug))
    }

    /// Adds a product by slug; immune to name substring collisions.
    pub async fn add_product_to_cart_by_slug(&self, slug: &str) -> Result<()> {
        tracing::info!("Adding '{}' to cart", slug);
        self.base.click(&self.product_by_slug(slug)).await
    }

    /// Removes a product by slug.
    pub async fn remove_product_from_cart_by_slug(&self, slug: &str) -> Result<()> {
        let button = Locator::new(format!("[data-test=\"remove-{}\"]", slug))
            .named(format!("remove button '{}'", slug));
        self.base.click(&button).await
    }

    pub async fn click_shopping_cart(&self) -> Result<()> {
        self.base.click(&self.shopping_cart_link).await
    }

    /// Number shown on the cart badge.
    ///
    /// The badge is not rendered while the cart is empty; that absence, and
    /// an unparsable badge, both read as zero.
    pub async fn cart_item_count(&self) -> Result<usize> {
        match self.base.try_read_text(&self.shopping_cart_badge).await? {
            Some(text) => Ok(text.parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!("Unparsable cart badge '{}', treating as 0", text);
                0
            })),
            None => Ok(0),
        }
    }

    /// Badge shows `expected`; for zero, the badge is absent.
    pub async fn verify_cart_item_count(&self, expected: usize) -> Result<()> {
        if expected == 0 {
            return self.base.assert_hidden(&self.shopping_cart_badge).await;
        }
        self.base.assert_visible(&self.shopping_cart_badge).await?;
        self.base
            .assert_text(&self.shopping_cart_badge, &expected.to_string())
            .await
    }

    pub async fn verify_product_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.product(name)).await
    }

    pub async fn verify_add_to_cart_button_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.add_to_cart_button(name)).await
    }

    pub async fn verify_remove_button_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.remove_button(name)).await
    }

    /// Displayed price such as `$29.99`.
    pub async fn product_price(&self, name: &str) -> Result<String> {
        let price = self.product(name).locator(".inventory_item_price");
        self.base.read_text(&price).await
    }

    pub async fn product_description(&self, name: &str) -> Result<String> {
        let description = self.product(name).locator(".inventory_item_desc");
        self.base.read_text(&description).await
    }

    pub async fn sort_products(&self, order: SortOrder) -> Result<()> {
        tracing::info!("Sorting products by {}", order);
        self.base.click(&self.sort_dropdown).await?;
        self.base.select_option(&self.sort_dropdown, order.value()).await
    }

    /// Product names in display order, read without waiting.
    pub async fn all_product_names(&self) -> Result<Vec<String>> {
        self.base.all_texts(&self.product_names).await
    }

    /// Opens the side menu and logs out.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!("Logging out");
        self.base.click(&self.menu_button).await?;
        self.base.click(&self.logout_link).await
    }

    /// Opens the side menu and resets the app state (empties the cart).
    pub async fn reset_app_state(&self) -> Result<()> {
        self.base.click(&self.menu_button).await?;
        self.base.click(&self.reset_link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_values() {
        assert_eq!(SortOrder::NameAsc.value(), "az");
        assert_eq!(SortOrder::NameDesc.value(), "za");
        assert_eq!(SortOrder::PriceAsc.value(), "lohi");
        assert_eq!(SortOrder::PriceDesc.to_string(), "hilo");
    }
}
