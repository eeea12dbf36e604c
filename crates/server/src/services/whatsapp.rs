//! WhatsApp message composition.
//!
//! Pure functions only: these render the shop's message templates and build
//! `wa.me` deep links. Nothing here performs a network call - the client
//! opens the returned link in the external messaging app, and that is the
//! entire delivery contract (no confirmation, no retry).

use smile_tailor_core::PhoneNumber;

use crate::models::Order;

/// Build a `wa.me` deep link carrying a prefilled message.
///
/// Format: `https://wa.me/<digits-no-plus>?text=<url-encoded-message>`.
#[must_use]
pub fn wa_link(recipient: &PhoneNumber, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        recipient.wa_number(),
        urlencoding::encode(message)
    )
}

/// Render the new-order summary sent to the shop's own WhatsApp.
///
/// Embeds the generated order id, the customer fields, and any uploaded
/// image URLs.
#[must_use]
pub fn order_summary(order: &Order, service_name: &str, shop_name: &str) -> String {
    let mut message = format!(
        "*NEW {} ORDER #{}*\n\n",
        order.order_type.label().to_uppercase(),
        order.id
    );
    message.push_str(&format!("\u{1F464} Name: {}\n", order.customer_name));
    message.push_str(&format!("\u{1F4F1} Phone: {}\n", order.customer_phone));
    message.push_str(&format!("\u{2702}\u{FE0F} Service: {service_name}\n\n"));
    message.push_str(&format!("\u{1F4DD} Details:\n{}\n", order.customer_notes));

    if !order.image_urls.is_empty() {
        message.push_str(&format!(
            "\n\u{1F4F7} Images:\n{}\n",
            order.image_urls.join("\n")
        ));
    }

    message.push_str(&format!("\n_Sent from {shop_name}_"));
    message
}

/// Render the status-update notification sent to the customer.
///
/// Includes the price line only when a price has been set, and a
/// status-specific call to action for `ready` and `in_progress`.
#[must_use]
pub fn customer_notification(order: &Order, service_name: &str, shop_name: &str) -> String {
    use smile_tailor_core::OrderStatus;

    let mut message = format!("Hello {}! \u{1F44B}\n\n", order.customer_name);
    message.push_str(&format!("*Order Update - Order #{}*\n\n", order.id));
    message.push_str(&format!(
        "{} - {service_name}\n",
        order.order_type.label()
    ));
    message.push_str(&format!(
        "Status: *{}*\n\n",
        order.status.label().to_uppercase()
    ));

    if let Some(price) = order.final_price {
        message.push_str(&format!("\u{1F4B0} Price: *{}*\n\n", price.display()));
    }

    match order.status {
        OrderStatus::Ready => {
            message.push_str("\u{2705} Your order is ready for pickup!\n");
            message.push_str("Please visit us at your convenience.\n\n");
        }
        OrderStatus::InProgress => {
            message.push_str("\u{1F454} We're working on your order.\n");
            message.push_str("We'll notify you when it's ready!\n\n");
        }
        _ => {}
    }

    message.push_str(&format!("_{shop_name}_"));
    message
}
