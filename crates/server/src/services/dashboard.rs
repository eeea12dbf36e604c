//! Dashboard filtering and per-status counts.
//!
//! The dashboard fetches the whole order collection in one query (newest
//! first) and derives everything else in process: the filtered subset keeps
//! the fetched order, and the counts are always computed over the full
//! collection so the stat cards don't change as the filter does. Fine at
//! this shop's volumes; revisit before this ever needs pagination.

use serde::Serialize;

use smile_tailor_core::{OrderStatus, StatusFilter};

use crate::models::Order;

/// Per-status order counts over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub ready: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Keep only the orders matching the filter, preserving relative order.
#[must_use]
pub fn filter_orders(orders: Vec<Order>, filter: StatusFilter) -> Vec<Order> {
    match filter {
        StatusFilter::All => orders,
        StatusFilter::Status(_) => orders
            .into_iter()
            .filter(|o| filter.matches(o.status))
            .collect(),
    }
}

/// Count orders per status.
#[must_use]
pub fn status_counts(orders: &[Order]) -> StatusCounts {
    let mut counts = StatusCounts {
        total: orders.len(),
        ..Default::default()
    };

    for order in orders {
        match order.status {
            OrderStatus::Pending => counts.pending += 1,
            OrderStatus::InProgress => counts.in_progress += 1,
            OrderStatus::Ready => counts.ready += 1,
            OrderStatus::Completed => counts.completed += 1,
            OrderStatus::Cancelled => counts.cancelled += 1,
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use smile_tailor_core::{OrderId, OrderType, PhoneNumber};

    use super::*;

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: None,
            service_id: None,
            service_label: Some("Hem Pants/Skirt".to_string()),
            order_type: OrderType::Alteration,
            customer_name: "Ali".to_string(),
            customer_phone: PhoneNumber::normalize("0123456789").expect("valid"),
            customer_notes: "notes".to_string(),
            image_urls: vec![],
            admin_images: vec![],
            status,
            final_price: None,
            admin_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_keeps_matching_rows_in_order() {
        // Creation-descending input: ids 4,3,2,1
        let orders = vec![
            order(4, OrderStatus::Pending),
            order(3, OrderStatus::Ready),
            order(2, OrderStatus::Ready),
            order(1, OrderStatus::Completed),
        ];

        let ready = filter_orders(orders, StatusFilter::Status(OrderStatus::Ready));
        let ids: Vec<i64> = ready.iter().map(|o| o.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let orders = vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Ready)];
        let filtered = filter_orders(orders, StatusFilter::All);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_counts_cover_full_collection() {
        let orders = vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Ready),
            order(3, OrderStatus::Ready),
            order(4, OrderStatus::Completed),
        ];

        let counts = status_counts(&orders);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.ready, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.in_progress, 0);
        assert_eq!(counts.cancelled, 0);
    }

    #[test]
    fn test_counts_empty() {
        assert_eq!(status_counts(&[]), StatusCounts::default());
    }
}
