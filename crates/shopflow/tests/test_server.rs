// Test Server - Local HTTP server for browser-backed tests
//
// Serves a two-screen cut of the storefront (login form and inventory) with
// the same class names and `data-test` ids as the real site, so page objects
// can be driven through a real browser offline.

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode, header},
    routing::get,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Test server handle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the test server on a random available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(login_page))
            .route("/inventory.html", get(inventory_page));

        // Bind to port 0 to get any available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");

        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the test server
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

fn html(body: &'static str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(body))
        .expect("Failed to build response")
}

async fn login_page() -> Response<Body> {
    html(
        r##"<!DOCTYPE html>
<html>
<head><title>Swag Labs</title></head>
<body>
  <div class="login_container">
    <div class="login_logo">Swag Labs</div>
    <form>
      <input id="user-name" data-test="username" type="text" placeholder="Username">
      <input id="password" data-test="password" type="password" placeholder="Password">
      <div id="error" class="error-message-container"></div>
      <input id="login-button" data-test="login-button" type="submit" value="Login">
    </form>
  </div>
  <script>
    document.getElementById('login-button').addEventListener('click', (event) => {
      event.preventDefault();
      const user = document.getElementById('user-name').value;
      const password = document.getElementById('password').value;
      let message = null;
      if (!user) message = 'Epic sadface: Username is required';
      else if (!password) message = 'Epic sadface: Password is required';
      else if (user !== 'standard_user' || password !== 'secret_sauce')
        message = 'Epic sadface: Username and password do not match any user in this service';
      if (message) {
        document.getElementById('error').innerHTML = '<h3 data-test="error">' + message + '</h3>';
        return;
      }
      window.location.href = '/inventory.html';
    });
  </script>
</body>
</html>"##,
    )
}

async fn inventory_page() -> Response<Body> {
    html(
        r##"<!DOCTYPE html>
<html>
<head><title>Swag Labs</title></head>
<body>
  <div class="header_container">
    <div id="shopping_cart_container"><a class="shopping_cart_link" href="#">Cart</a></div>
    <span class="title" data-test="title">Products</span>
    <select class="product_sort_container" data-test="product-sort-container">
      <option value="az">Name (A to Z)</option>
      <option value="za">Name (Z to A)</option>
      <option value="lohi">Price (low to high)</option>
      <option value="hilo">Price (high to low)</option>
    </select>
  </div>
  <div id="inventory_container" class="inventory_container">
    <div class="inventory_list">
      <div class="inventory_item">
        <div class="inventory_item_name">Sauce Labs Backpack</div>
        <div class="inventory_item_desc">carry.allTheThings() with the sleek, streamlined Sly Pack.</div>
        <div class="inventory_item_price">$29.99</div>
        <button data-test="add-to-cart-sauce-labs-backpack">Add to cart</button>
      </div>
      <div class="inventory_item">
        <div class="inventory_item_name">Sauce Labs Bolt T-Shirt</div>
        <div class="inventory_item_desc">Get your testing superhero on with the Sauce Labs bolt T-shirt.</div>
        <div class="inventory_item_price">$15.99</div>
        <button data-test="add-to-cart-sauce-labs-bolt-t-shirt">Add to cart</button>
      </div>
      <div class="inventory_item">
        <div class="inventory_item_name">Test.allTheThings() T-Shirt (Red)</div>
        <div class="inventory_item_desc">This classic Sauce Labs t-shirt is perfect to wear.</div>
        <div class="inventory_item_price">$15.99</div>
        <button data-test="add-to-cart-test.allthethings()-t-shirt-(red)">Add to cart</button>
      </div>
    </div>
  </div>
  <script>
    let count = 0;
    document.querySelectorAll('.inventory_item button').forEach((button) => {
      button.addEventListener('click', () => {
        const adding = button.textContent === 'Add to cart';
        button.textContent = adding ? 'Remove' : 'Add to cart';
        count += adding ? 1 : -1;
        document.querySelector('.shopping_cart_link').innerHTML =
          count > 0 ? '<span class="shopping_cart_badge">' + count + '</span>' : '';
      });
    });
  </script>
</body>
</html>"##,
    )
}
