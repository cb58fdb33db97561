// Page object contracts
//
// `BasePage` holds the interaction primitives; `CheckoutPage` is the extra
// contract shared by the checkout screens.

mod base;
mod checkout;

pub use base::BasePage;
pub use checkout::{CheckoutPage, CheckoutStep, verify_checkout_step};
