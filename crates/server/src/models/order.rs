//! Order entity and its write shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use smile_tailor_core::{
    OrderId, OrderStatus, OrderType, PhoneNumber, Price, ServiceId, UserId,
};

/// An order as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// Owning principal; `None` for guest submissions.
    pub user_id: Option<UserId>,
    /// Reference to a catalog service, if one was selected.
    pub service_id: Option<ServiceId>,
    /// Free-text service label, used when no catalog service applies.
    pub service_label: Option<String>,
    pub order_type: OrderType,
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    pub customer_notes: String,
    /// Customer-supplied image URLs, in submission order.
    pub image_urls: Vec<String>,
    /// Operator-supplied follow-up image URLs.
    pub admin_images: Vec<String>,
    pub status: OrderStatus,
    /// Final quoted price; absence is distinct from zero.
    pub final_price: Option<Price>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Display name of the service: the free-text label when present,
    /// otherwise the given catalog name, otherwise a dash.
    #[must_use]
    pub fn service_display<'a>(&'a self, catalog_name: Option<&'a str>) -> &'a str {
        self.service_label
            .as_deref()
            .or(catalog_name)
            .unwrap_or("-")
    }
}

/// Raw database row for an order.
///
/// `status` and `order_type` are decoded as text and converted leniently so
/// an unrecognized stored value renders as the default instead of failing
/// the whole read.
#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub service_id: Option<i64>,
    pub service_label: Option<String>,
    pub order_type: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_notes: String,
    pub image_urls: Vec<String>,
    pub admin_images: Vec<String>,
    pub status: String,
    pub final_price: Option<Decimal>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            service_id: row.service_id.map(ServiceId::new),
            service_label: row.service_label,
            order_type: OrderType::from_db(&row.order_type),
            customer_name: row.customer_name,
            customer_phone: PhoneNumber::from_normalized(row.customer_phone),
            customer_notes: row.customer_notes,
            image_urls: row.image_urls,
            admin_images: row.admin_images,
            status: OrderStatus::from_db(&row.status),
            final_price: row.final_price.map(Price::new),
            admin_notes: row.admin_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields needed to create an order. Status always starts at `pending`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<UserId>,
    pub service_id: Option<ServiceId>,
    pub service_label: Option<String>,
    pub order_type: OrderType,
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    pub customer_notes: String,
    pub image_urls: Vec<String>,
}

/// Partial update applied by an operator.
///
/// Absent fields keep their stored value; `admin_images` is appended, never
/// replaced. Every update bumps `updated_at`. Last write wins under
/// concurrent edits.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub final_price: Option<Price>,
    pub admin_notes: Option<String>,
    pub admin_images: Vec<String>,
}

impl OrderChanges {
    /// Whether this update would change anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.final_price.is_none()
            && self.admin_notes.is_none()
            && self.admin_images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> OrderRow {
        OrderRow {
            id: 5,
            user_id: None,
            service_id: Some(2),
            service_label: None,
            order_type: "alteration".to_string(),
            customer_name: "Ali".to_string(),
            customer_phone: "+60123456789".to_string(),
            customer_notes: "shorten 2 inches".to_string(),
            image_urls: vec![],
            admin_images: vec![],
            status: "ready".to_string(),
            final_price: None,
            admin_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let order = Order::from(sample_row());
        assert_eq!(order.id, OrderId::new(5));
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.customer_phone.as_str(), "+60123456789");
        assert!(order.final_price.is_none());
    }

    #[test]
    fn test_unknown_status_degrades_to_pending() {
        let mut row = sample_row();
        row.status = "shipped_to_mars".to_string();
        let order = Order::from(row);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_service_display_prefers_label() {
        let mut order = Order::from(sample_row());
        assert_eq!(order.service_display(Some("Hem Pants/Skirt")), "Hem Pants/Skirt");

        order.service_label = Some("Other Repairs".to_string());
        assert_eq!(order.service_display(Some("Hem Pants/Skirt")), "Other Repairs");

        order.service_label = None;
        assert_eq!(order.service_display(None), "-");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(OrderChanges::default().is_empty());
        let changes = OrderChanges {
            status: Some(OrderStatus::Ready),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
