// LoginPage - Credentials form at the storefront root

use crate::config::constants;
use crate::error::Result;
use crate::locator::Locator;
use crate::page::BasePage;
use crate::session::Session;

/// The login screen.
///
/// The storefront validates in a fixed order: username presence, then
/// password presence, then the credential match. The first failing check is
/// the one shown in the error banner.
#[derive(Debug, Clone)]
pub struct LoginPage {
    base: BasePage,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_message: Locator,
    login_logo: Locator,
}

impl LoginPage {
    pub fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session.clone()),
            username_input: Locator::new("[data-test=\"username\"]").named("username input"),
            password_input: Locator::new("[data-test=\"password\"]").named("password input"),
            login_button: Locator::new("[data-test=\"login-button\"]").named("login button"),
            error_message: Locator::new("[data-test=\"error\"]").named("login error"),
            login_logo: Locator::new(".login_logo").named("login logo"),
        }
    }

    /// Opens the login screen and waits for the page to settle.
    pub async fn navigate(&self) -> Result<()> {
        let url = self.base.urls().login.clone();
        self.base.navigate(url.as_str()).await?;
        self.base.wait_page_settled().await
    }

    pub async fn verify_login_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.login_logo).await?;
        self.base.assert_visible(&self.username_input).await?;
        self.base.assert_visible(&self.password_input).await?;
        self.base.assert_visible(&self.login_button).await
    }

    pub async fn enter_username(&self, username: &str) -> Result<()> {
        self.base.fill(&self.username_input, username).await
    }

    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.base.fill(&self.password_input, password).await
    }

    pub async fn click_login_button(&self) -> Result<()> {
        self.base.click(&self.login_button).await
    }

    /// Fills both fields and submits the form.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        tracing::info!("Logging in as '{}'", username);
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login_button().await
    }

    pub async fn login_with_valid_credentials(&self) -> Result<()> {
        self.login(constants::STANDARD_USER, constants::PASSWORD).await
    }

    /// A successful login lands on the inventory.
    pub async fn verify_successful_login(&self) -> Result<()> {
        let url = self.base.urls().inventory.clone();
        self.base.assert_url(url).await
    }

    /// The error banner is shown with exactly `expected`.
    pub async fn verify_error_message(&self, expected: &str) -> Result<()> {
        self.base.assert_visible(&self.error_message).await?;
        self.base.assert_text(&self.error_message, expected).await
    }

    pub async fn clear_login_form(&self) -> Result<()> {
        self.base.clear(&self.username_input).await?;
        self.base.clear(&self.password_input).await
    }

    pub async fn username_value(&self) -> Result<String> {
        self.base.input_value(&self.username_input).await
    }

    pub async fn password_value(&self) -> Result<String> {
        self.base.input_value(&self.password_input).await
    }
}
