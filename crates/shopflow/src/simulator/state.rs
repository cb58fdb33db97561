// Storefront state machine - Session, cart and form state plus click handling

use super::catalog::{self, Product, Sort};
use super::dom::Action;
use crate::config::{Urls, constants};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub(crate) const FIRST_NAME: &str = "firstName";
pub(crate) const LAST_NAME: &str = "lastName";
pub(crate) const POSTAL_CODE: &str = "postalCode";
pub(crate) const USERNAME: &str = "username";
pub(crate) const PASSWORD: &str = "password";
pub(crate) const SORT: &str = "sort";

/// Screens the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Blank,
    Login,
    Inventory,
    Cart,
    CheckoutStepOne,
    CheckoutStepTwo,
    CheckoutComplete,
}

impl Screen {
    pub(crate) fn url(self, urls: &Urls) -> String {
        match self {
            Screen::Blank => "about:blank".to_string(),
            Screen::Login => urls.login.to_string(),
            Screen::Inventory => urls.inventory.to_string(),
            Screen::Cart => urls.cart.to_string(),
            Screen::CheckoutStepOne => urls.checkout_step_one.to_string(),
            Screen::CheckoutStepTwo => urls.checkout_step_two.to_string(),
            Screen::CheckoutComplete => urls.checkout_complete.to_string(),
        }
    }

    fn requires_login(self) -> bool {
        !matches!(self, Screen::Blank | Screen::Login)
    }

    fn path(self) -> &'static str {
        match self {
            Screen::Blank => "",
            Screen::Login => constants::LOGIN_PATH,
            Screen::Inventory => constants::INVENTORY_PATH,
            Screen::Cart => constants::CART_PATH,
            Screen::CheckoutStepOne => constants::CHECKOUT_STEP_ONE_PATH,
            Screen::CheckoutStepTwo => constants::CHECKOUT_STEP_TWO_PATH,
            Screen::CheckoutComplete => constants::CHECKOUT_COMPLETE_PATH,
        }
    }
}

#[derive(Debug)]
pub(crate) struct State {
    pub(crate) screen: Screen,
    pub(crate) user: Option<String>,
    /// Products in the order they were added
    pub(crate) cart: Vec<&'static Product>,
    pub(crate) fields: HashMap<String, String>,
    pub(crate) error: Option<String>,
    pub(crate) sort: Sort,
    pub(crate) menu_open: bool,
    pub(crate) shown_at: Instant,
}

impl State {
    pub(crate) fn new() -> Self {
        Self {
            screen: Screen::Blank,
            user: None,
            cart: Vec::new(),
            fields: HashMap::new(),
            error: None,
            sort: Sort::default(),
            menu_open: false,
            shown_at: Instant::now(),
        }
    }

    /// Shows `screen` as a fresh page load: forms and banners reset.
    pub(crate) fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.fields.clear();
        self.error = None;
        self.menu_open = false;
        self.shown_at = Instant::now();
    }

    /// Direct navigation; screens behind the login bounce to the login form.
    pub(crate) fn open(&mut self, screen: Screen) {
        if screen.requires_login() && self.user.is_none() {
            self.show(Screen::Login);
            self.error = Some(format!(
                "Epic sadface: You can only access '/{}' when you are logged in.",
                screen.path()
            ));
            return;
        }
        self.show(screen);
    }

    pub(crate) fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn in_cart(&self, slug: &str) -> bool {
        self.cart.iter().any(|p| p.slug == slug)
    }

    pub(crate) fn subtotal_cents(&self) -> u64 {
        self.cart.iter().map(|p| p.price_cents).sum()
    }

    /// Time left before the current screen has rendered.
    pub(crate) fn render_remaining(&self, delay: Duration) -> Duration {
        delay.saturating_sub(self.shown_at.elapsed())
    }

    pub(crate) fn apply(&mut self, action: &Action) {
        match action {
            Action::Login => self.login(),
            Action::AddToCart(slug) => {
                if !self.in_cart(slug) {
                    if let Some(product) = catalog::find_by_slug(slug) {
                        self.cart.push(product);
                    }
                }
            }
            Action::RemoveFromCart(slug) => self.cart.retain(|p| p.slug != *slug),
            Action::OpenCart => self.show(Screen::Cart),
            Action::ContinueShopping
            | Action::CancelOverview
            | Action::BackHome
            | Action::AllItems => self.show(Screen::Inventory),
            Action::Checkout => self.show(Screen::CheckoutStepOne),
            Action::ContinueInformation => self.continue_information(),
            Action::CancelInformation => self.show(Screen::Cart),
            Action::Finish => {
                self.cart.clear();
                self.show(Screen::CheckoutComplete);
            }
            Action::DismissError => self.error = None,
            Action::OpenMenu => self.menu_open = true,
            Action::CloseMenu => self.menu_open = false,
            Action::Logout => {
                self.user = None;
                self.show(Screen::Login);
            }
            Action::ResetAppState => {
                self.cart.clear();
                self.sort = Sort::default();
            }
        }
    }

    fn login(&mut self) {
        let username = self.field(USERNAME).to_string();
        let password = self.field(PASSWORD).to_string();

        let error = if username.is_empty() {
            Some(constants::USERNAME_REQUIRED_ERROR)
        } else if password.is_empty() {
            Some(constants::PASSWORD_REQUIRED_ERROR)
        } else if password != constants::PASSWORD {
            Some(constants::INVALID_CREDENTIALS_ERROR)
        } else if username == constants::LOCKED_OUT_USER {
            Some(constants::LOCKED_OUT_ERROR)
        } else if username != constants::STANDARD_USER {
            Some(constants::INVALID_CREDENTIALS_ERROR)
        } else {
            None
        };

        match error {
            Some(message) => {
                tracing::debug!("Simulated login rejected: {}", message);
                self.error = Some(message.to_string());
            }
            None => {
                self.user = Some(username);
                self.show(Screen::Inventory);
            }
        }
    }

    fn continue_information(&mut self) {
        let error = if self.field(FIRST_NAME).is_empty() {
            Some(constants::FIRST_NAME_REQUIRED_ERROR)
        } else if self.field(LAST_NAME).is_empty() {
            Some(constants::LAST_NAME_REQUIRED_ERROR)
        } else if self.field(POSTAL_CODE).is_empty() {
            Some(constants::POSTAL_CODE_REQUIRED_ERROR)
        } else {
            None
        };

        match error {
            Some(message) => self.error = Some(message.to_string()),
            None => self.show(Screen::CheckoutStepTwo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> State {
        let mut state = State::new();
        state.open(Screen::Login);
        state.fields.insert(USERNAME.into(), constants::STANDARD_USER.into());
        state.fields.insert(PASSWORD.into(), constants::PASSWORD.into());
        state.apply(&Action::Login);
        state
    }

    #[test]
    fn test_login_validation_order() {
        let mut state = State::new();
        state.open(Screen::Login);
        state.apply(&Action::Login);
        assert_eq!(state.error.as_deref(), Some(constants::USERNAME_REQUIRED_ERROR));

        state.fields.insert(USERNAME.into(), "nobody".into());
        state.apply(&Action::Login);
        assert_eq!(state.error.as_deref(), Some(constants::PASSWORD_REQUIRED_ERROR));

        state.fields.insert(PASSWORD.into(), "wrong".into());
        state.apply(&Action::Login);
        assert_eq!(state.error.as_deref(), Some(constants::INVALID_CREDENTIALS_ERROR));

        state.fields.insert(USERNAME.into(), constants::LOCKED_OUT_USER.into());
        state.fields.insert(PASSWORD.into(), constants::PASSWORD.into());
        state.apply(&Action::Login);
        assert_eq!(state.error.as_deref(), Some(constants::LOCKED_OUT_ERROR));
        assert_eq!(state.screen, Screen::Login);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_guarded_screens_require_login() {
        let mut state = State::new();
        state.open(Screen::Cart);
        assert_eq!(state.screen, Screen::Login);
        assert!(state.error.as_deref().unwrap_or_default().contains("/cart.html"));

        let mut state = logged_in();
        state.open(Screen::Cart);
        assert_eq!(state.screen, Screen::Cart);
    }

    #[test]
    fn test_cart_add_is_not_duplicated_and_finish_clears() {
        let mut state = logged_in();
        state.apply(&Action::AddToCart("sauce-labs-backpack"));
        state.apply(&Action::AddToCart("sauce-labs-backpack"));
        state.apply(&Action::AddToCart("sauce-labs-onesie"));
        assert_eq!(state.cart.len(), 2);
        assert_eq!(state.subtotal_cents(), 2999 + 799);

        state.apply(&Action::RemoveFromCart("sauce-labs-onesie"));
        assert_eq!(state.cart.len(), 1);

        state.apply(&Action::Finish);
        assert!(state.cart.is_empty());
        assert_eq!(state.screen, Screen::CheckoutComplete);
    }

    #[test]
    fn test_menu_logout_and_reset() {
        let mut state = logged_in();
        state.apply(&Action::AddToCart("sauce-labs-onesie"));
        state.apply(&Action::OpenMenu);
        assert!(state.menu_open);
        state.apply(&Action::ResetAppState);
        assert!(state.cart.is_empty());

        state.apply(&Action::Logout);
        assert_eq!(state.screen, Screen::Login);
        assert!(state.user.is_none());
        assert!(!state.menu_open);
    }

    #[test]
    fn test_information_validation_order() {
        let mut state = logged_in();
        state.apply(&Action::Checkout);
        state.apply(&Action::ContinueInformation);
        assert_eq!(state.error.as_deref(), Some(constants::FIRST_NAME_REQUIRED_ERROR));
        state.fields.insert(FIRST_NAME.into(), "Jane".into());
        state.apply(&Action::ContinueInformation);
        assert_eq!(state.error.as_deref(), Some(constants::LAST_NAME_REQUIRED_ERROR));
        state.fields.insert(LAST_NAME.into(), "Doe".into());
        state.apply(&Action::ContinueInformation);
        assert_eq!(state.error.as_deref(), Some(constants::POSTAL_CODE_REQUIRED_ERROR));
        state.fields.insert(POSTAL_CODE.into(), "12345".into());
        state.apply(&Action::ContinueInformation);
        assert_eq!(state.screen, Screen::CheckoutStepTwo);
        assert!(state.fields.is_empty());
    }
}
