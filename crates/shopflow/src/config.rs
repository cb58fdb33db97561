// Configuration - Timeouts, storefront location and literal test constants
//
// `Settings` carries the knobs a run may change (where the storefront lives and
// how long waits may take). Everything that is a fact about the storefront
// itself lives in `constants`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Literal facts about the storefront: credentials, product names, page
/// titles and the messages it renders.
pub mod constants {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

    pub const LOGIN_PATH: &str = "";
    pub const INVENTORY_PATH: &str = "inventory.html";
    pub const CART_PATH: &str = "cart.html";
    pub const CHECKOUT_STEP_ONE_PATH: &str = "checkout-step-one.html";
    pub const CHECKOUT_STEP_TWO_PATH: &str = "checkout-step-two.html";
    pub const CHECKOUT_COMPLETE_PATH: &str = "checkout-complete.html";

    pub const STANDARD_USER: &str = "standard_user";
    pub const LOCKED_OUT_USER: &str = "locked_out_user";
    pub const PASSWORD: &str = "secret_sauce";

    pub const BACKPACK: &str = "Sauce Labs Backpack";
    pub const BIKE_LIGHT: &str = "Sauce Labs Bike Light";
    pub const BOLT_T_SHIRT: &str = "Sauce Labs Bolt T-Shirt";
    pub const FLEECE_JACKET: &str = "Sauce Labs Fleece Jacket";
    pub const ONESIE: &str = "Sauce Labs Onesie";
    pub const RED_T_SHIRT: &str = "Test.allTheThings() T-Shirt (Red)";

    pub const PRODUCTS_TITLE: &str = "Products";
    pub const CART_TITLE: &str = "Your Cart";
    pub const CHECKOUT_STEP_ONE_TITLE: &str = "Checkout: Your Information";
    pub const CHECKOUT_STEP_TWO_TITLE: &str = "Checkout: Overview";
    pub const CHECKOUT_COMPLETE_TITLE: &str = "Checkout: Complete!";

    pub const ORDER_COMPLETE_HEADER: &str = "THANK YOU FOR YOUR ORDER";
    pub const ORDER_COMPLETE_TEXT: &str = "Thank you for your order!";

    pub const INVALID_CREDENTIALS_ERROR: &str =
        "Epic sadface: Username and password do not match any user in this service";
    pub const USERNAME_REQUIRED_ERROR: &str = "Epic sadface: Username is required";
    pub const PASSWORD_REQUIRED_ERROR: &str = "Epic sadface: Password is required";
    pub const LOCKED_OUT_ERROR: &str = "Epic sadface: Sorry, this user has been locked out.";

    pub const FIRST_NAME_REQUIRED_ERROR: &str = "Error: First Name is required";
    pub const LAST_NAME_REQUIRED_ERROR: &str = "Error: Last Name is required";
    pub const POSTAL_CODE_REQUIRED_ERROR: &str = "Error: Postal Code is required";

    pub const SUBTOTAL_PREFIX: &str = "Item total: ";
    pub const TAX_PREFIX: &str = "Tax: ";
    pub const TOTAL_PREFIX: &str = "Total: ";

    /// Default budget for element waits
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
    /// Default budget for assertions
    pub const ELEMENT_TIMEOUT: Duration = Duration::from_millis(5_000);
    /// Default budget for navigations
    pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_millis(30_000);
}

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_000);

/// Run-time settings shared by every page object of a session.
///
/// # Example
///
/// ```ignore
/// use shopflow::Settings;
/// use std::time::Duration;
///
/// let settings = Settings::from_env()?
///     .with_element_timeout(Duration::from_secs(2));
/// let urls = settings.urls()?;
/// assert!(urls.inventory.as_str().ends_with("/inventory.html"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the storefront
    pub base_url: String,
    /// Budget for element waits (`wait_visible`, `wait_clickable`)
    #[serde(with = "duration_ms", rename = "element_timeout_ms")]
    pub element_timeout: Duration,
    /// Budget for terminal assertions
    #[serde(with = "duration_ms", rename = "assertion_timeout_ms")]
    pub assertion_timeout: Duration,
    /// Budget for a single navigation
    #[serde(with = "duration_ms", rename = "navigation_timeout_ms")]
    pub navigation_timeout: Duration,
    /// Delay between probes while polling
    #[serde(with = "duration_ms", rename = "poll_interval_ms")]
    pub poll_interval: Duration,
    /// Budget for reads of elements that may legitimately be absent
    #[serde(with = "duration_ms", rename = "probe_timeout_ms")]
    pub probe_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            element_timeout: constants::DEFAULT_TIMEOUT,
            assertion_timeout: constants::ELEMENT_TIMEOUT,
            navigation_timeout: constants::PAGE_LOAD_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl Settings {
    /// Environment variable overriding `base_url`
    pub const BASE_URL_VAR: &'static str = "SHOPFLOW_BASE_URL";
    /// Environment variable overriding `element_timeout` (milliseconds)
    pub const ELEMENT_TIMEOUT_VAR: &'static str = "SHOPFLOW_ELEMENT_TIMEOUT_MS";
    /// Environment variable overriding `assertion_timeout` (milliseconds)
    pub const ASSERTION_TIMEOUT_VAR: &'static str = "SHOPFLOW_ASSERTION_TIMEOUT_MS";
    /// Environment variable overriding `navigation_timeout` (milliseconds)
    pub const NAVIGATION_TIMEOUT_VAR: &'static str = "SHOPFLOW_NAVIGATION_TIMEOUT_MS";

    /// Defaults overridden by `SHOPFLOW_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `SHOPFLOW_*`
    /// variable names. Unset or blank values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str| -> Result<Option<Duration>> {
            match get(key) {
                None => Ok(None),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(|ms| Some(Duration::from_millis(ms)))
                    .map_err(|e| {
                        Error::InvalidArgument(format!("{}='{}' is not a millisecond count: {}", key, raw, e))
                    }),
            }
        };

        let mut settings = Settings::default();
        if let Some(base_url) = get(Self::BASE_URL_VAR) {
            settings.base_url = base_url.trim().to_string();
        }
        if let Some(timeout) = millis(Self::ELEMENT_TIMEOUT_VAR)? {
            settings.element_timeout = timeout;
        }
        if let Some(timeout) = millis(Self::ASSERTION_TIMEOUT_VAR)? {
            settings.assertion_timeout = timeout;
        }
        if let Some(timeout) = millis(Self::NAVIGATION_TIMEOUT_VAR)? {
            settings.navigation_timeout = timeout;
        }

        // Fail early on a base URL the page objects could not navigate to
        settings.urls()?;
        Ok(settings)
    }

    /// Sets the storefront root URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the element wait budget
    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Sets the assertion budget
    pub fn with_assertion_timeout(mut self, timeout: Duration) -> Self {
        self.assertion_timeout = timeout;
        self
    }

    /// Sets the navigation budget
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Sets the polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the optional-element probe budget
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Per-screen URLs derived from `base_url`.
    pub fn urls(&self) -> Result<Urls> {
        Urls::from_base(&self.base_url)
    }
}

/// Absolute URLs of the six storefront screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    pub login: Url,
    pub inventory: Url,
    pub cart: Url,
    pub checkout_step_one: Url,
    pub checkout_step_two: Url,
    pub checkout_complete: Url,
}

impl Urls {
    /// Resolves every screen path against `base`.
    ///
    /// A missing trailing slash is added so that a base with a path prefix
    /// (`http://host/shop`) keeps that prefix.
    pub fn from_base(base: &str) -> Result<Self> {
        let mut normalized = base.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let root = Url::parse(&normalized)
            .map_err(|e| Error::InvalidArgument(format!("Invalid base URL '{}': {}", base, e)))?;
        if root.cannot_be_a_base() {
            return Err(Error::InvalidArgument(format!(
                "Base URL '{}' cannot have paths joined to it",
                base
            )));
        }
        let join = |path: &str| {
            root.join(path)
                .map_err(|e| Error::InvalidArgument(format!("Invalid path '{}': {}", path, e)))
        };
        Ok(Self {
            login: join(constants::LOGIN_PATH)?,
            inventory: join(constants::INVENTORY_PATH)?,
            cart: join(constants::CART_PATH)?,
            checkout_step_one: join(constants::CHECKOUT_STEP_ONE_PATH)?,
            checkout_step_two: join(constants::CHECKOUT_STEP_TWO_PATH)?,
            checkout_complete: join(constants::CHECKOUT_COMPLETE_PATH)?,
        })
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
