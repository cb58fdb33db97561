// Screen rendering - Builds the storefront markup for the current state
//
// Class names and `data-test` attributes follow the Swag Labs markup so the
// same locators work against the simulator and the live site.

use super::catalog::{self, Product, Sort};
use super::dom::{Action, Node};
use super::state::{self, Screen, State};
use crate::config::constants;
use std::time::Duration;

/// Markup for `state`, or an empty shell while the screen is still rendering.
pub(crate) fn render(state: &State, delay: Duration) -> Node {
    let root = Node::new("div").id("root");
    if !state.render_remaining(delay).is_zero() {
        return root;
    }
    match state.screen {
        Screen::Blank => root,
        Screen::Login => root.child(login(state)),
        Screen::Inventory => root.child(page(state, constants::PRODUCTS_TITLE, inventory(state))),
        Screen::Cart => root.child(page(state, constants::CART_TITLE, cart(state))),
        Screen::CheckoutStepOne => root.child(page(
            state,
            constants::CHECKOUT_STEP_ONE_TITLE,
            information(state),
        )),
        Screen::CheckoutStepTwo => root.child(page(
            state,
            constants::CHECKOUT_STEP_TWO_TITLE,
            overview(state),
        )),
        Screen::CheckoutComplete => root.child(page(
            state,
            constants::CHECKOUT_COMPLETE_TITLE,
            complete(),
        )),
    }
}

fn error_banner(state: &State) -> Node {
    let container = Node::new("div").class("error-message-container");
    match &state.error {
        Some(message) => container.class("error").child(
            Node::new("h3").data_test("error").text(message.clone()).child(
                Node::new("button")
                    .class("error-button")
                    .data_test("error-button")
                    .on_click(Action::DismissError),
            ),
        ),
        None => container,
    }
}

fn text_input(id: &str, field: &str, placeholder: &str, kind: &str, state: &State) -> Node {
    Node::new("input")
        .class("input_error form_input")
        .id(id)
        .data_test(field)
        .attr("type", kind)
        .attr("placeholder", placeholder)
        .field(field, state.field(field))
}

fn login(state: &State) -> Node {
    Node::new("div").class("login_container").children([
        Node::new("div").class("login_logo").text("Swag Labs"),
        Node::new("div").class("login_wrapper").child(
            Node::new("form").children([
                text_input("user-name", state::USERNAME, "Username", "text", state),
                text_input("password", state::PASSWORD, "Password", "password", state),
                error_banner(state),
                Node::new("input")
                    .class("submit-button btn_action")
                    .id("login-button")
                    .data_test("login-button")
                    .attr("type", "submit")
                    .attr("value", "Login")
                    .on_click(Action::Login),
            ]),
        ),
    ])
}

/// Shared chrome of every screen behind the login: header, title, content.
fn page(state: &State, title: &str, content: Node) -> Node {
    let cart_link = Node::new("a")
        .class("shopping_cart_link")
        .data_test("shopping-cart-link")
        .on_click(Action::OpenCart);
    let cart_link = if state.cart.is_empty() {
        cart_link
    } else {
        cart_link.child(
            Node::new("span")
                .class("shopping_cart_badge")
                .data_test("shopping-cart-badge")
                .text(state.cart.len().to_string()),
        )
    };

    let mut secondary = Node::new("div")
        .class("header_secondary_container")
        .child(Node::new("span").class("title").data_test("title").text(title));
    if state.screen == Screen::Inventory {
        secondary = secondary.child(sort_control(state.sort));
    }

    Node::new("div").id("page_wrapper").class("page_wrapper").children([
        Node::new("div").id("header_container").class("header_container").children([
            Node::new("div").class("primary_header").children([
                Node::new("div").id("menu_button_container").children([
                    Node::new("button")
                        .id("react-burger-menu-btn")
                        .text("Open Menu")
                        .on_click(Action::OpenMenu),
                    side_menu(state.menu_open),
                ]),
                Node::new("div").class("app_logo").text("Swag Labs"),
                Node::new("div")
                    .id("shopping_cart_container")
                    .class("shopping_cart_container")
                    .child(cart_link),
            ]),
            secondary,
        ]),
        content,
    ])
}

fn side_menu(open: bool) -> Node {
    let link = |id: &str, label: &str, action: Action| {
        Node::new("a")
            .id(id)
            .class("bm-item menu-item")
            .data_test(&id.replace('_', "-"))
            .text(label)
            .on_click(action)
    };
    let menu = Node::new("div").class("bm-menu-wrap").children([
        Node::new("nav").class("bm-item-list").children([
            link("inventory_sidebar_link", "All Items", Action::AllItems),
            link("logout_sidebar_link", "Logout", Action::Logout),
            link("reset_sidebar_link", "Reset App State", Action::ResetAppState),
        ]),
        Node::new("button")
            .id("react-burger-cross-btn")
            .text("Close Menu")
            .on_click(Action::CloseMenu),
    ]);
    if open { menu } else { menu.hidden() }
}

fn sort_control(sort: Sort) -> Node {
    let options = Sort::OPTIONS
        .iter()
        .map(|(value, label)| Node::new("option").attr("value", value).text(*label));
    Node::new("div").class("right_component").child(
        Node::new("span").class("select_container").children([
            Node::new("span").class("active_option").data_test("active-option").text(sort.label()),
            Node::new("select")
                .class("product_sort_container")
                .data_test("product-sort-container")
                .field(state::SORT, sort.value())
                .children(options),
        ]),
    )
}

fn item_label(product: &Product) -> Node {
    Node::new("div").class("inventory_item_label").children([
        Node::new("a").id(&format!("item_{}_title_link", product.id)).child(
            Node::new("div")
                .class("inventory_item_name")
                .data_test("inventory-item-name")
                .text(product.name),
        ),
        Node::new("div")
            .class("inventory_item_desc")
            .data_test("inventory-item-desc")
            .text(product.description),
    ])
}

fn price(product: &Product) -> Node {
    Node::new("div")
        .class("inventory_item_price")
        .data_test("inventory-item-price")
        .text(product.price())
}

fn add_or_remove(product: &'static Product, in_cart: bool) -> Node {
    if in_cart {
        let id = format!("remove-{}", product.slug);
        Node::new("button")
            .class("btn btn_secondary btn_small btn_inventory")
            .id(&id)
            .data_test(&id)
            .text("Remove")
            .on_click(Action::RemoveFromCart(product.slug))
    } else {
        let id = format!("add-to-cart-{}", product.slug);
        Node::new("button")
            .class("btn btn_primary btn_small btn_inventory")
            .id(&id)
            .data_test(&id)
            .text("Add to cart")
            .on_click(Action::AddToCart(product.slug))
    }
}

fn inventory(state: &State) -> Node {
    let items = state.sort.apply().into_iter().map(|product| {
        Node::new("div").class("inventory_item").data_test("inventory-item").children([
            Node::new("div").class("inventory_item_img").child(
                Node::new("img")
                    .class("inventory_item_img")
                    .attr("alt", product.name),
            ),
            Node::new("div").class("inventory_item_description").children([
                item_label(product),
                Node::new("div")
                    .class("pricebar")
                    .children([price(product), add_or_remove(product, state.in_cart(product.slug))]),
            ]),
        ])
    });
    Node::new("div").id("inventory_container").class("inventory_container").child(
        Node::new("div").class("inventory_list").data_test("inventory-list").children(items),
    )
}

/// Cart rows; the cart screen carries remove buttons, the overview does not.
fn cart_items(state: &State, removable: bool) -> Vec<Node> {
    let mut rows = vec![
        Node::new("div").class("cart_quantity_label").text("QTY"),
        Node::new("div").class("cart_desc_label").text("Description"),
    ];
    rows.extend(state.cart.iter().map(|&product| {
        let mut pricebar = Node::new("div").class("item_pricebar").child(price(product));
        if removable {
            pricebar = pricebar.child(add_or_remove(product, true));
        }
        Node::new("div").class("cart_item").data_test("inventory-item").children([
            Node::new("div").class("cart_quantity").data_test("item-quantity").text("1"),
            item_label(product).class("cart_item_label").child(pricebar),
        ])
    }));
    rows
}

fn cart(state: &State) -> Node {
    Node::new("div").id("cart_contents_container").class("cart_contents_container").child(
        Node::new("div").children([
            Node::new("div").class("cart_list").data_test("cart-list").children(cart_items(state, true)),
            Node::new("div").class("cart_footer").children([
                Node::new("button")
                    .class("btn btn_secondary back btn_medium")
                    .id("continue-shopping")
                    .data_test("continue-shopping")
                    .text("Continue Shopping")
                    .on_click(Action::ContinueShopping),
                Node::new("button")
                    .class("btn btn_action btn_medium checkout_button")
                    .id("checkout")
                    .data_test("checkout")
                    .text("Checkout")
                    .on_click(Action::Checkout),
            ]),
        ]),
    )
}

fn information(state: &State) -> Node {
    Node::new("div").id("checkout_info_container").class("checkout_info_container").child(
        Node::new("form").children([
            Node::new("div").class("checkout_info").children([
                text_input("first-name", state::FIRST_NAME, "First Name", "text", state),
                text_input("last-name", state::LAST_NAME, "Last Name", "text", state),
                text_input("postal-code", state::POSTAL_CODE, "Zip/Postal Code", "text", state),
                error_banner(state),
            ]),
            Node::new("div").class("checkout_buttons").children([
                Node::new("button")
                    .class("btn btn_secondary back btn_medium cart_cancel_link")
                    .id("cancel")
                    .data_test("cancel")
                    .text("Cancel")
                    .on_click(Action::CancelInformation),
                Node::new("input")
                    .class("submit-button btn btn_primary cart_button btn_action")
                    .id("continue")
                    .data_test("continue")
                    .attr("type", "submit")
                    .attr("value", "Continue")
                    .on_click(Action::ContinueInformation),
            ]),
        ]),
    )
}

fn overview(state: &State) -> Node {
    let subtotal = state.subtotal_cents();
    let tax = catalog::tax_cents(subtotal);
    Node::new("div").id("checkout_summary_container").class("checkout_summary_container").child(
        Node::new("div").children([
            Node::new("div").class("cart_list").data_test("cart-list").children(cart_items(state, false)),
            Node::new("div").class("summary_info").children([
                Node::new("div")
                    .class("summary_info_label")
                    .data_test("payment-info-label")
                    .text("Payment Information:"),
                Node::new("div")
                    .class("summary_value_label")
                    .data_test("payment-info-value")
                    .text("SauceCard #31337"),
                Node::new("div")
                    .class("summary_info_label")
                    .data_test("shipping-info-label")
                    .text("Shipping Information:"),
                Node::new("div")
                    .class("summary_value_label")
                    .data_test("shipping-info-value")
                    .text("Free Pony Express Delivery!"),
                Node::new("div")
                    .class("summary_info_label")
                    .data_test("total-info-label")
                    .text("Price Total"),
                Node::new("div")
                    .class("summary_subtotal_label")
                    .data_test("subtotal-label")
                    .text(format!("{}{}", constants::SUBTOTAL_PREFIX, catalog::format_cents(subtotal))),
                Node::new("div")
                    .class("summary_tax_label")
                    .data_test("tax-label")
                    .text(format!("{}{}", constants::TAX_PREFIX, catalog::format_cents(tax))),
                Node::new("div")
                    .class("summary_info_label summary_total_label")
                    .data_test("total-label")
                    .text(format!("{}{}", constants::TOTAL_PREFIX, catalog::format_cents(subtotal + tax))),
                Node::new("div").class("cart_footer").children([
                    Node::new("button")
                        .class("btn btn_secondary back btn_medium cart_cancel_link")
                        .id("cancel")
                        .data_test("cancel")
                        .text("Cancel")
                        .on_click(Action::CancelOverview),
                    Node::new("button")
                        .class("btn btn_action btn_medium cart_button")
                        .id("finish")
                        .data_test("finish")
                        .text("Finish")
                        .on_click(Action::Finish),
                ]),
            ]),
        ]),
    )
}

fn complete() -> Node {
    Node::new("div").id("checkout_complete_container").class("checkout_complete_container").children([
        Node::new("img")
            .class("pony_express")
            .data_test("pony-express")
            .attr("alt", "Pony Express"),
        Node::new("h2")
            .class("complete-header")
            .data_test("complete-header")
            .text(constants::ORDER_COMPLETE_HEADER),
        Node::new("div")
            .class("complete-text")
            .data_test("complete-text")
            .text(constants::ORDER_COMPLETE_TEXT),
        Node::new("button")
            .class("btn btn_primary btn_small")
            .id("back-to-products")
            .data_test("back-to-products")
            .text("Back Home")
            .on_click(Action::BackHome),
    ])
}
