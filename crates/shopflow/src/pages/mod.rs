// Page objects - One type per storefront screen

mod cart;
mod checkout_complete;
mod checkout_step_one;
mod checkout_step_two;
mod login;
mod products;

pub use cart::CartPage;
pub use checkout_complete::CheckoutCompletePage;
pub use checkout_step_one::CheckoutStepOnePage;
pub use checkout_step_two::{CheckoutStepTwoPage, OrderSummary};
pub use login::LoginPage;
pub use products::{ProductsPage, SortOrder};
