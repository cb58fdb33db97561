// Shared helpers for integration tests
//
// Each test binary compiles this module separately, so helpers unused by one
// binary still count as used by another.
#![allow(dead_code)]

use shopflow::{LoginPage, Session, Settings, Storefront};
use std::sync::{Arc, Once};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per binary; `RUST_LOG` filters it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Short budgets so negative cases fail fast against the simulator.
pub fn fast_settings() -> Settings {
    Settings::default()
        .with_element_timeout(Duration::from_millis(1_000))
        .with_assertion_timeout(Duration::from_millis(1_000))
        .with_navigation_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(10))
        .with_probe_timeout(Duration::from_millis(100))
}

/// A fresh simulated storefront and a session driving it.
pub fn storefront() -> (Storefront, Session) {
    storefront_with(Duration::ZERO)
}

/// Like [`storefront`], with every screen rendering after `delay`.
pub fn storefront_with(delay: Duration) -> (Storefront, Session) {
    init_tracing();
    let settings = fast_settings();
    let store = Storefront::for_settings(&settings)
        .expect("Failed to create storefront")
        .with_render_delay(delay);
    let session =
        Session::with_settings(Arc::new(store.clone()), settings).expect("Failed to create session");
    (store, session)
}

/// Storefront with `standard_user` logged in and the inventory shown.
pub async fn logged_in() -> (Storefront, Session) {
    let (store, session) = storefront();
    let login = LoginPage::new(&session);
    login.navigate().await.expect("Failed to open login page");
    login
        .login_with_valid_credentials()
        .await
        .expect("Failed to log in");
    (store, session)
}
