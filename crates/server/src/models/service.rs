//! Service catalog entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use smile_tailor_core::{Price, ServiceId};

/// An offerable tailoring service.
///
/// Inactive services are hidden from customers but remain valid references
/// for historic orders.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Option<Price>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw database row for a service.
#[derive(Debug, FromRow)]
pub struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.id),
            name: row.name,
            description: row.description,
            base_price: row.base_price.map(Price::new),
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}
