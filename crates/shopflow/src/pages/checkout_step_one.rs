// CheckoutStepOnePage - Customer information form

use crate::config::constants;
use crate::data::{self, CustomerData};
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::{BasePage, CheckoutPage, CheckoutStep};
use crate::session::Session;
use async_trait::async_trait;

/// First checkout step: first name, last name and postal code.
///
/// Continuing with a missing field keeps the form on screen and shows the
/// error for the first empty field, in that order.
#[derive(Debug, Clone)]
pub struct CheckoutStepOnePage {
    base: BasePage,
    page_title: Locator,
    first_name_input: Locator,
    last_name_input: Locator,
    zip_code_input: Locator,
    continue_button: Locator,
    cancel_button: Locator,
    error_message: Locator,
}

impl CheckoutStepOnePage {
    pub fn new(session: &Session) -> Self {
        Self {
            base: BasePage::new(session.clone()),
            page_title: Locator::new(".title").named("page title"),
            first_name_input: Locator::new("[data-test=\"firstName\"]").named("first name input"),
            last_name_input: Locator::new("[data-test=\"lastName\"]").named("last name input"),
            zip_code_input: Locator::new("[data-test=\"postalCode\"]").named("postal code input"),
            continue_button: Locator::new("[data-test=\"continue\"]").named("continue button"),
            cancel_button: Locator::new("[data-test=\"cancel\"]").named("cancel button"),
            error_message: Locator::new("[data-test=\"error\"]").named("form error"),
        }
    }

    pub async fn fill_first_name(&self, first_name: &str) -> Result<()> {
        self.base.fill(&self.first_name_input, first_name).await
    }

    pub async fn fill_last_name(&self, last_name: &str) -> Result<()> {
        self.base.fill(&self.last_name_input, last_name).await
    }

    pub async fn fill_zip_code(&self, zip_code: &str) -> Result<()> {
        self.base.fill(&self.zip_code_input, zip_code).await
    }

    pub async fn fill_customer_information(
        &self,
        first_name: &str,
        last_name: &str,
        zip_code: &str,
    ) -> Result<()> {
        tracing::info!("Entering customer information for {} {}", first_name, last_name);
        self.fill_first_name(first_name).await?;
        self.fill_last_name(last_name).await?;
        self.fill_zip_code(zip_code).await
    }

    /// Fills the form with generated data and returns what was entered.
    pub async fn fill_random_customer_information(&self) -> Result<CustomerData> {
        let customer = data::generate_customer_data();
        self.fill_customer_information(&customer.first_name, &customer.last_name, &customer.zip_code)
            .await?;
        Ok(customer)
    }

    pub async fn click_continue(&self) -> Result<()> {
        self.base.assert_visible(&self.continue_button).await?;
        self.base.click(&self.continue_button).await
    }

    pub async fn click_cancel(&self) -> Result<()> {
        self.base.click(&self.cancel_button).await
    }

    pub async fn complete_step_one_with_random_data(&self) -> Result<CustomerData> {
        let customer = self.fill_random_customer_information().await?;
        self.click_continue().await?;
        Ok(customer)
    }

    pub async fn verify_error_message(&self, expected: &str) -> Result<()> {
        self.base.assert_visible(&self.error_message).await?;
        self.base.assert_text(&self.error_message, expected).await
    }

    pub async fn first_name_value(&self) -> Result<String> {
        self.base.input_value(&self.first_name_input).await
    }

    pub async fn last_name_value(&self) -> Result<String> {
        self.base.input_value(&self.last_name_input).await
    }

    pub async fn zip_code_value(&self) -> Result<String> {
        self.base.input_value(&self.zip_code_input).await
    }

    pub async fn clear_all_fields(&self) -> Result<()> {
        self.base.clear(&self.first_name_input).await?;
        self.base.clear(&self.last_name_input).await?;
        self.base.clear(&self.zip_code_input).await
    }

    pub async fn verify_all_fields_filled(&self) -> Result<()> {
        let first_name = self.first_name_value().await?;
        let last_name = self.last_name_value().await?;
        let zip_code = self.zip_code_value().await?;
        if first_name.is_empty() || last_name.is_empty() || zip_code.is_empty() {
            return Err(Error::Invariant("Not all required fields are filled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckoutPage for CheckoutStepOnePage {
    async fn verify_page_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, constants::CHECKOUT_STEP_ONE_TITLE)
            .await?;
        let url = self.base.urls().checkout_step_one.clone();
        self.base.assert_url(url).await?;
        for control in [
            &self.first_name_input,
            &self.last_name_input,
            &self.zip_code_input,
            &self.continue_button,
            &self.cancel_button,
        ] {
            self.base.assert_visible(control).await?;
        }
        self.base.assert_enabled(&self.continue_button).await
    }

    fn step(&self) -> CheckoutStep {
        CheckoutStep::Information
    }
}
