//! shopflow: Typed page objects for the Swag Labs storefront checkout flow
//!
//! Each storefront screen is a page object that exposes the operations a
//! test performs on it: filling forms, clicking through the flow, reading
//! back what the screen shows and verifying it. Page objects sit on top of a
//! [`Driver`], so the same flow runs against the in-process [`Storefront`]
//! simulator or, with the `browser` feature, a real Chromium driven through
//! playwright-rs.
//!
//! # Examples
//!
//! ## Complete purchase
//!
//! ```ignore
//! use shopflow::{
//!     CartPage, CheckoutCompletePage, CheckoutPage, CheckoutStepOnePage, CheckoutStepTwoPage,
//!     LoginPage, ProductsPage, Session, Settings, Storefront,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> shopflow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let store = Storefront::for_settings(&settings)?;
//!     let session = Session::with_settings(Arc::new(store), settings)?;
//!
//!     let login = LoginPage::new(&session);
//!     login.navigate().await?;
//!     login.login_with_valid_credentials().await?;
//!
//!     let products = ProductsPage::new(&session);
//!     products.verify_products_page_loaded().await?;
//!     products.add_backpack_to_cart().await?;
//!     products.click_shopping_cart().await?;
//!
//!     let cart = CartPage::new(&session);
//!     cart.verify_backpack_in_cart().await?;
//!     cart.click_checkout().await?;
//!
//!     let step_one = CheckoutStepOnePage::new(&session);
//!     step_one.verify_page_loaded().await?;
//!     step_one.complete_step_one_with_random_data().await?;
//!
//!     let step_two = CheckoutStepTwoPage::new(&session);
//!     step_two.verify_page_loaded().await?;
//!     println!("total: {}", step_two.total_amount().await?);
//!     step_two.click_finish().await?;
//!
//!     CheckoutCompletePage::new(&session)
//!         .complete_order_and_return_home()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Direct assertions
//!
//! ```ignore
//! use shopflow::{expect, Locator};
//!
//! let badge = Locator::new(".shopping_cart_badge");
//! expect(&session, &badge).to_have_text("1").await?;
//! expect(&session, &badge).not().to_be_visible().await?;
//! ```

pub mod assertions;
pub mod config;
pub mod data;
pub mod driver;
mod error;
pub mod locator;
pub mod page;
pub mod pages;
mod session;
pub mod simulator;

#[cfg(feature = "browser")]
pub mod browser;

// Re-export error types
pub use error::{ElementState, Error, Result};

// Re-export the driver seam and selectors
pub use driver::{Driver, LoadState, UrlPattern};
pub use locator::{Locator, SelectorStep};

// Re-export session and configuration
pub use config::{Settings, Urls, constants};
pub use session::Session;

// Re-export assertions API
pub use assertions::{Expectation, PageExpectation, expect, expect_page};

// Re-export page objects
pub use page::{BasePage, CheckoutPage, CheckoutStep, verify_checkout_step};
pub use pages::{
    CartPage, CheckoutCompletePage, CheckoutStepOnePage, CheckoutStepTwoPage, LoginPage,
    OrderSummary, ProductsPage, SortOrder,
};

// Re-export test data
pub use data::{
    CustomerData, CustomerDataGenerator, generate_customer_data, generate_email,
    generate_phone_number,
};

// Re-export the storefront simulator
pub use simulator::{CATALOG, Product, Storefront};

#[cfg(feature = "browser")]
pub use browser::{BrowserOptions, BrowserPage, PlaywrightBrowser};
