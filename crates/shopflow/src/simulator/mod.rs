// Storefront simulator - In-process Swag Labs storefront behind the Driver trait
//
// Renders the same markup the live site serves (titles, class names and
// `data-test` ids), keeps session, cart and form state in memory, and answers
// every driver call against a freshly rendered document. Page objects run
// against it unchanged, which makes the workflow testable without a browser.

mod catalog;
mod dom;
mod render;
mod state;

pub use catalog::{CATALOG, Product};

use crate::config::{Settings, Urls};
use crate::driver::{Driver, LoadState};
use crate::error::{Error, Result};
use crate::locator::parse_selector;
use async_trait::async_trait;
use catalog::Sort;
use dom::{Document, Element};
use parking_lot::Mutex;
use state::{Screen, State};
use std::sync::Arc;
use std::time::Duration;

/// In-memory storefront implementing [`Driver`].
///
/// Clones share the same state, so a test can keep a handle for inspection
/// after giving one to a [`Session`](crate::Session).
///
/// # Example
///
/// ```ignore
/// use shopflow::{Session, Storefront};
/// use std::sync::Arc;
///
/// let store = Storefront::new("https://www.saucedemo.com")?;
/// let session = Session::new(Arc::new(store.clone()))?;
/// ```
#[derive(Debug, Clone)]
pub struct Storefront {
    state: Arc<Mutex<State>>,
    urls: Arc<Urls>,
    render_delay: Duration,
}

impl Storefront {
    /// Storefront answering on the screen URLs under `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            state: Arc::new(Mutex::new(State::new())),
            urls: Arc::new(Urls::from_base(base_url)?),
            render_delay: Duration::ZERO,
        })
    }

    /// Storefront for the base URL in `settings`.
    pub fn for_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url)
    }

    /// Delays rendering of every newly shown screen by `delay`.
    ///
    /// The URL changes immediately; content appears once the delay passes,
    /// like a client-rendered page.
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }

    /// Products currently in the cart, in the order they were added.
    pub fn cart(&self) -> Vec<&'static Product> {
        self.state.lock().cart.clone()
    }

    /// Name of the logged-in user, if any.
    pub fn user(&self) -> Option<String> {
        self.state.lock().user.clone()
    }

    fn screen_for(&self, url: &str) -> Result<Screen> {
        if url == "about:blank" {
            return Ok(Screen::Blank);
        }
        let mut target = url::Url::parse(url).map_err(|e| Error::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        target.set_query(None);
        target.set_fragment(None);

        let urls = &self.urls;
        let screens = [
            (&urls.login, Screen::Login),
            (&urls.inventory, Screen::Inventory),
            (&urls.cart, Screen::Cart),
            (&urls.checkout_step_one, Screen::CheckoutStepOne),
            (&urls.checkout_step_two, Screen::CheckoutStepTwo),
            (&urls.checkout_complete, Screen::CheckoutComplete),
        ];
        screens
            .into_iter()
            .find(|(candidate, _)| **candidate == target)
            .map(|(_, screen)| screen)
            .ok_or_else(|| Error::Navigation {
                url: url.to_string(),
                message: "404 Not Found".to_string(),
            })
    }

    /// Renders the current screen, resolves `selector` and hands the matches to `f`.
    fn with_matches<T>(
        &self,
        selector: &str,
        f: impl FnOnce(&mut State, Vec<Element>) -> Result<T>,
    ) -> Result<T> {
        let steps = parse_selector(selector)?;
        let mut state = self.state.lock();
        let matches = Document::new(render::render(&state, self.render_delay)).resolve(selector, &steps)?;
        f(&mut state, matches)
    }

    /// Like `with_matches`, for operations that need exactly one element.
    fn with_single<T>(
        &self,
        selector: &str,
        f: impl FnOnce(&mut State, Element) -> Result<T>,
    ) -> Result<T> {
        self.with_matches(selector, |state, mut matches| match matches.len() {
            0 => Err(Error::ElementNotFound(selector.to_string())),
            1 => f(state, matches.remove(0)),
            count => Err(Error::StrictModeViolation {
                selector: selector.to_string(),
                count,
            }),
        })
    }
}

fn not_interactable(selector: &str, reason: &str) -> Error {
    Error::NotInteractable {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

/// Input element bound to a form field, ready to take text.
fn editable_field(element: Element, selector: &str) -> Result<String> {
    if element.tag != "input" {
        return Err(not_interactable(selector, "element is not an <input>"));
    }
    if !element.visible {
        return Err(not_interactable(selector, "element is not visible"));
    }
    if !element.enabled {
        return Err(not_interactable(selector, "element is disabled"));
    }
    element
        .field
        .ok_or_else(|| not_interactable(selector, "input is not editable"))
}

#[async_trait]
impl Driver for Storefront {
    async fn goto(&self, url: &str) -> Result<()> {
        let screen = self.screen_for(url)?;
        tracing::debug!("Simulated navigation to {:?}", screen);
        self.state.lock().open(screen);
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        Ok(self.state.lock().screen.url(&self.urls))
    }

    async fn wait_for_load_state(&self, state: LoadState) -> Result<()> {
        let remaining = match state {
            LoadState::DomContentLoaded => Duration::ZERO,
            LoadState::Load | LoadState::NetworkIdle => {
                self.state.lock().render_remaining(self.render_delay)
            }
        };
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        self.with_matches(selector, |_, matches| Ok(matches.len()))
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.with_matches(selector, |_, matches| match matches.as_slice() {
            [] => Ok(false),
            [element] => Ok(element.visible),
            _ => Err(Error::StrictModeViolation {
                selector: selector.to_string(),
                count: matches.len(),
            }),
        })
    }

    async fn is_enabled(&self, selector: &str) -> Result<bool> {
        self.with_single(selector, |_, element| Ok(element.enabled))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.with_single(selector, |state, element| {
            if !element.visible {
                return Err(not_interactable(selector, "element is not visible"));
            }
            if !element.enabled {
                return Err(not_interactable(selector, "element is disabled"));
            }
            if let Some(action) = &element.action {
                tracing::debug!("Simulated click on '{}': {:?}", selector, action);
                state.apply(action);
            }
            Ok(())
        })
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        self.with_single(selector, |state, element| {
            let field = editable_field(element, selector)?;
            state.fields.remove(&field);
            Ok(())
        })
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.with_single(selector, |state, element| {
            let field = editable_field(element, selector)?;
            state.fields.insert(field, text.to_string());
            Ok(())
        })
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        self.with_single(selector, |_, element| Ok(Some(element.text)))
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        self.with_single(selector, |_, element| match element.tag.as_str() {
            "input" | "select" => Ok(element.value),
            _ => Err(not_interactable(selector, "element is not an <input> or <select>")),
        })
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<()> {
        self.with_single(selector, |state, element| {
            if element.tag != "select" {
                return Err(not_interactable(selector, "element is not a <select>"));
            }
            if !element.options.iter().any(|option| option == value) {
                return Err(Error::InvalidArgument(format!(
                    "No option with value '{}' in '{}'",
                    value, selector
                )));
            }
            if element.field.as_deref() == Some(state::SORT) {
                if let Some(sort) = Sort::from_value(value) {
                    state.sort = sort;
                }
            }
            Ok(())
        })
    }
}
