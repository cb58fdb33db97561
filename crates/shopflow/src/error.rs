// Error types for shopflow page objects

use std::time::Duration;
use thiserror::Error;

/// Result type alias for page-object operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while driving the storefront through page objects.
///
/// Every failure propagates straight to the calling test; nothing at this
/// layer is retried beyond the polling inside a single wait.
#[derive(Debug, Error)]
pub enum Error {
    /// A wait did not observe the expected element state within its budget
    ///
    /// `locator` is the human-readable description of the element set
    /// (name and selector), `state` the state that was awaited.
    #[error("Timed out after {timeout:?} waiting for {locator} to be {state}")]
    WaitTimeout {
        locator: String,
        state: ElementState,
        timeout: Duration,
    },

    /// An assertion never held within the assertion timeout
    ///
    /// The message names the selector, the expected value and the last
    /// observed value.
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// A condition checked by the page layer itself did not hold
    ///
    /// Raised for item-count mismatches, incomplete forms and similar
    /// expected-vs-actual checks that the driver cannot express.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Navigation could not complete
    #[error("Navigation to '{url}' failed: {message}")]
    Navigation { url: String, message: String },

    /// An action targeted an element set that resolved to nothing
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// A single-element operation matched more than one element
    ///
    /// Text-filtered lookups hit this when one product name is a substring
    /// of another.
    #[error("Strict mode violation: selector '{selector}' resolved to {count} elements")]
    StrictModeViolation { selector: String, count: usize },

    /// The element exists but cannot take the requested action
    #[error("Element '{selector}' is not interactable: {reason}")]
    NotInteractable { selector: String, reason: String },

    /// Selector string could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Browser backend failure (launch, CDP transport, script evaluation)
    #[error("Driver error: {0}")]
    Driver(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true for the timeout family (waits and assertions), looking
    /// through any context wrappers.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::WaitTimeout { .. } | Error::AssertionTimeout(_) => true,
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }

    /// Returns the innermost error, skipping context wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context(_, inner) => inner.root(),
            other => other,
        }
    }
}

/// Element states a wait can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Attached and rendered with a non-empty box
    Visible,
    /// Visible and not disabled
    Clickable,
    /// Not present, or present but not rendered
    Hidden,
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ElementState::Visible => "visible",
            ElementState::Clickable => "clickable",
            ElementState::Hidden => "hidden",
        })
    }
}
