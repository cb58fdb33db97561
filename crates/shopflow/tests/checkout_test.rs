// Integration tests for the checkout screens
//
// Tests cover:
// - Information form validation order, value read-back and clearing
// - Random customer data
// - Overview summary amounts and positional payment/shipping labels
// - Completion messages and the empty cart afterwards
// - Polymorphic step verification through `CheckoutPage`
// - Step ordering across the whole checkout

mod common;

use shopflow::{
    CartPage, CheckoutCompletePage, CheckoutPage, CheckoutStep, CheckoutStepOnePage,
    CheckoutStepTwoPage, Error, OrderSummary, ProductsPage, Session, constants,
    verify_checkout_step,
};

async fn at_information_step(session: &Session, names: &[&str]) -> CheckoutStepOnePage {
    let products = ProductsPage::new(session);
    for name in names {
        products.add_product_to_cart(name).await.expect("Add should succeed");
    }
    products.click_shopping_cart().await.expect("Cart should open");
    CartPage::new(session)
        .click_checkout()
        .await
        .expect("Checkout should start");
    let step_one = CheckoutStepOnePage::new(session);
    step_one
        .verify_page_loaded()
        .await
        .expect("Information step should be loaded");
    step_one
}

async fn at_overview_step(session: &Session, names: &[&str]) -> CheckoutStepTwoPage {
    let step_one = at_information_step(session, names).await;
    step_one
        .fill_customer_information("Jane", "Doe", "12345")
        .await
        .expect("Fill should succeed");
    step_one.click_continue().await.expect("Continue should succeed");
    let step_two = CheckoutStepTwoPage::new(session);
    step_two
        .verify_page_loaded()
        .await
        .expect("Overview step should be loaded");
    step_two
}

#[tokio::test]
async fn test_information_validation_order() {
    let (_store, session) = common::logged_in().await;
    let step_one = at_information_step(&session, &[constants::BACKPACK]).await;

    step_one.click_continue().await.expect("Click should succeed");
    step_one
        .verify_error_message(constants::FIRST_NAME_REQUIRED_ERROR)
        .await
        .expect("First name is checked first");

    step_one.fill_first_name("Jane").await.expect("Fill should succeed");
    step_one.click_continue().await.expect("Click should succeed");
    step_one
        .verify_error_message(constants::LAST_NAME_REQUIRED_ERROR)
        .await
        .expect("Last name is checked second");

    step_one.fill_last_name("Doe").await.expect("Fill should succeed");
    step_one.click_continue().await.expect("Click should succeed");
    step_one
        .verify_error_message(constants::POSTAL_CODE_REQUIRED_ERROR)
        .await
        .expect("Postal code is checked last");

    // Still on the form, values kept
    step_one
        .verify_page_loaded()
        .await
        .expect("Form should still be shown");
    assert_eq!(step_one.first_name_value().await.unwrap(), "Jane");
}

#[tokio::test]
async fn test_information_values_and_clear() {
    let (_store, session) = common::logged_in().await;
    let step_one = at_information_step(&session, &[constants::ONESIE]).await;

    step_one
        .fill_customer_information("John", "Smith", "90210")
        .await
        .expect("Fill should succeed");
    assert_eq!(step_one.first_name_value().await.unwrap(), "John");
    assert_eq!(step_one.last_name_value().await.unwrap(), "Smith");
    assert_eq!(step_one.zip_code_value().await.unwrap(), "90210");
    step_one
        .verify_all_fields_filled()
        .await
        .expect("All fields are filled");

    step_one.clear_all_fields().await.expect("Clear should succeed");
    assert_eq!(step_one.zip_code_value().await.unwrap(), "");
    let err = step_one
        .verify_all_fields_filled()
        .await
        .expect_err("Empty form must fail");
    assert!(matches!(err, Error::Invariant(_)), "got {err:?}");
}

#[tokio::test]
async fn test_random_customer_data_reaches_overview() {
    let (_store, session) = common::logged_in().await;
    let step_one = at_information_step(&session, &[constants::BACKPACK]).await;

    let customer = step_one
        .fill_random_customer_information()
        .await
        .expect("Random fill should succeed");
    assert_eq!(step_one.first_name_value().await.unwrap(), customer.first_name);
    assert_eq!(step_one.last_name_value().await.unwrap(), customer.last_name);
    assert_eq!(step_one.zip_code_value().await.unwrap(), customer.zip_code);

    step_one.click_continue().await.expect("Continue should succeed");
    verify_checkout_step(&CheckoutStepTwoPage::new(&session))
        .await
        .expect("Should be on the overview");
}

#[tokio::test]
async fn test_cancel_information_returns_to_cart() {
    let (_store, session) = common::logged_in().await;
    let step_one = at_information_step(&session, &[constants::BACKPACK]).await;

    step_one.click_cancel().await.expect("Cancel should succeed");
    let cart = CartPage::new(&session);
    cart.verify_cart_page_loaded()
        .await
        .expect("Should be back in the cart");
    cart.verify_backpack_in_cart()
        .await
        .expect("Cart is unchanged");
}

#[tokio::test]
async fn test_overview_summary() {
    let (_store, session) = common::logged_in().await;
    let step_two = at_overview_step(&session, &[constants::BACKPACK, constants::BIKE_LIGHT]).await;

    step_two
        .verify_backpack_in_order_summary()
        .await
        .expect("Backpack should be listed");
    step_two
        .verify_product_in_order_summary(constants::BIKE_LIGHT)
        .await
        .expect("Bike light should be listed");
    step_two
        .verify_order_item_count(2)
        .await
        .expect("Two items in the order");
    assert_eq!(
        step_two.all_product_names_in_order_summary().await.unwrap(),
        vec![constants::BACKPACK.to_string(), constants::BIKE_LIGHT.to_string()]
    );
    assert_eq!(
        step_two.product_price_in_order_summary(constants::BIKE_LIGHT).await.unwrap(),
        "$9.99"
    );
    assert_eq!(
        step_two.product_quantity_in_order_summary(constants::BACKPACK).await.unwrap(),
        "1"
    );

    step_two
        .verify_order_summary_complete()
        .await
        .expect("All summary lines should be shown");
    assert_eq!(
        step_two.order_summary().await.unwrap(),
        OrderSummary {
            subtotal: "$39.98".into(),
            tax: "$3.20".into(),
            total: "$43.18".into(),
        }
    );
    assert_eq!(step_two.payment_information().await.unwrap(), "SauceCard #31337");
    assert_eq!(
        step_two.shipping_information().await.unwrap(),
        "Free Pony Express Delivery!"
    );

    let err = step_two
        .verify_order_item_count(1)
        .await
        .expect_err("Count mismatch must fail");
    assert_eq!(
        err.to_string(),
        "Invariant violated: Expected 1 items in order summary, but found 2"
    );
}

#[tokio::test]
async fn test_cancel_overview_returns_to_inventory() {
    let (store, session) = common::logged_in().await;
    let step_two = at_overview_step(&session, &[constants::ONESIE]).await;

    step_two.click_cancel().await.expect("Cancel should succeed");
    ProductsPage::new(&session)
        .verify_products_page_loaded()
        .await
        .expect("Should be back on the inventory");
    assert_eq!(store.cart().len(), 1);
}

#[tokio::test]
async fn test_finish_order() {
    let (store, session) = common::logged_in().await;
    let step_two = at_overview_step(&session, &[constants::BACKPACK]).await;
    assert_eq!(step_two.total_amount().await.unwrap(), "$32.39");

    step_two.click_finish().await.expect("Finish should succeed");
    let complete = CheckoutCompletePage::new(&session);
    complete
        .verify_complete_order_success()
        .await
        .expect("Order should be complete");
    assert_eq!(
        complete.complete_header_text().await.unwrap(),
        constants::ORDER_COMPLETE_HEADER
    );
    assert_eq!(complete.complete_text().await.unwrap(), constants::ORDER_COMPLETE_TEXT);
    complete
        .verify_success_message("Thank you")
        .await
        .expect("Text contains the expected phrase");
    let err = complete
        .verify_success_message("order was cancelled")
        .await
        .expect_err("Unrelated phrase must fail");
    assert!(matches!(err, Error::Invariant(_)));
    assert!(store.cart().is_empty());

    complete
        .complete_order_and_return_home()
        .await
        .expect("Back home should succeed");
    let products = ProductsPage::new(&session);
    products
        .verify_products_page_loaded()
        .await
        .expect("Should be back on the inventory");
    products
        .verify_cart_item_count(0)
        .await
        .expect("Cart is empty after the order");
}

#[tokio::test]
async fn test_verify_checkout_step_on_wrong_screen() {
    let (_store, session) = common::logged_in().await;
    at_information_step(&session, &[constants::BACKPACK]).await;

    let pages: Vec<Box<dyn CheckoutPage>> = vec![
        Box::new(CheckoutStepOnePage::new(&session)),
        Box::new(CheckoutStepTwoPage::new(&session)),
        Box::new(CheckoutCompletePage::new(&session)),
    ];
    assert_eq!(
        pages.iter().map(|p| p.step()).collect::<Vec<_>>(),
        vec![CheckoutStep::Information, CheckoutStep::Overview, CheckoutStep::Complete]
    );

    verify_checkout_step(pages[0].as_ref())
        .await
        .expect("Information step is shown");
    let err = verify_checkout_step(pages[1].as_ref())
        .await
        .expect_err("Overview is not shown");
    assert!(err.is_timeout());
    assert!(matches!(err.root(), Error::AssertionTimeout(_)));
    assert!(err.to_string().contains("overview"), "got {err}");
}

#[tokio::test]
async fn test_checkout_steps_follow_in_order() {
    let (_store, session) = common::logged_in().await;
    let step_one = at_information_step(&session, &[constants::BACKPACK]).await;
    let step_two = CheckoutStepTwoPage::new(&session);
    let complete = CheckoutCompletePage::new(&session);

    let mut step = Some(CheckoutStep::Information);
    for page in [&step_one as &dyn CheckoutPage, &step_two, &complete] {
        assert_eq!(Some(page.step()), step, "pages are visited in step order");
        verify_checkout_step(page)
            .await
            .unwrap_or_else(|e| panic!("{} should be shown: {e}", page.step()));
        match page.step() {
            CheckoutStep::Information => {
                step_one
                    .complete_step_one_with_random_data()
                    .await
                    .expect("Information should be accepted");
            }
            CheckoutStep::Overview => step_two.click_finish().await.expect("Finish should succeed"),
            CheckoutStep::Complete => {}
        }
        step = page.step().next();
    }
    assert_eq!(step, None, "complete is the last step");
}
