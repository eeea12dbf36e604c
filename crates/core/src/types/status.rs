//! Order status and related enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The transition graph is deliberately complete: an operator may move an
/// order from any status to any other. The only enforced rule is membership
/// in this enumeration, which keeps the dashboard flexible for a small shop
/// (a mis-clicked "completed" can simply be set back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All recognized statuses, in pipeline display order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// The stored snake_case form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for messages and the dashboard.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Lenient parse for values read back from storage.
    ///
    /// An unrecognized stored value degrades to [`Self::Pending`] so a bad
    /// row renders with the default display mapping instead of failing the
    /// whole listing.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Kind of work an order asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Alteration,
    Custom,
}

impl OrderType {
    /// The stored snake_case form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alteration => "alteration",
            Self::Custom => "custom",
        }
    }

    /// Human-readable label used in customer messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Alteration => "Alteration",
            Self::Custom => "Custom Clothes",
        }
    }

    /// Lenient parse for stored values; unknown values read as alteration.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alteration" => Ok(Self::Alteration),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("invalid order type: {s}")),
        }
    }
}

/// Dashboard filter over the order collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every order regardless of status.
    #[default]
    All,
    /// Orders whose status equals the given value.
    Status(OrderStatus),
}

impl StatusFilter {
    /// Whether an order with the given status matches this filter.
    #[must_use]
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Status(wanted) => *wanted == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Status)
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_strict_parse_rejects_unknown() {
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
        assert!("PENDING".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_from_db_degrades_to_pending() {
        assert_eq!(OrderStatus::from_db("garbage"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_db(""), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_db("ready"), OrderStatus::Ready);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(OrderStatus::InProgress.label(), "In Progress");
        assert_eq!(OrderStatus::Ready.label(), "Ready");
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in_progress\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_type_labels() {
        assert_eq!(OrderType::Custom.label(), "Custom Clothes");
        assert_eq!(OrderType::from_db("nonsense"), OrderType::Alteration);
    }

    #[test]
    fn test_filter_matches() {
        assert!(StatusFilter::All.matches(OrderStatus::Completed));
        assert!(StatusFilter::Status(OrderStatus::Ready).matches(OrderStatus::Ready));
        assert!(!StatusFilter::Status(OrderStatus::Ready).matches(OrderStatus::Pending));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().expect("parse"), StatusFilter::All);
        assert_eq!(
            "in_progress".parse::<StatusFilter>().expect("parse"),
            StatusFilter::Status(OrderStatus::InProgress)
        );
        assert!("everything".parse::<StatusFilter>().is_err());
    }
}
