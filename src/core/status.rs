//! Order lifecycle status and the transition policy applied to it

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order
///
/// Serialized as the upper-case names (`"IN_PROGRESS"`, ...), which is also
/// how they are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Requesting,
    Accepted,
    InProgress,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Requesting,
        OrderStatus::Accepted,
        OrderStatus::InProgress,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Requesting => "REQUESTING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// DELIVERED and CANCELLED are terminal by convention
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The forward step of the happy path, if any
    fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Requesting => Some(OrderStatus::Accepted),
            OrderStatus::Accepted => Some(OrderStatus::InProgress),
            OrderStatus::InProgress => Some(OrderStatus::Dispatched),
            OrderStatus::Dispatched => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which status changes the tracker accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any status may follow any other
    #[default]
    Lenient,
    /// Only the happy-path step, or cancellation of a non-terminal order
    Strict,
}

impl StatusPolicy {
    /// Whether `from -> to` is allowed. Re-writing the current status is
    /// always allowed.
    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            StatusPolicy::Lenient => true,
            StatusPolicy::Strict => {
                from == to
                    || from.next() == Some(to)
                    || (to == OrderStatus::Cancelled && !from.is_terminal())
            }
        }
    }
}

impl std::str::FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(StatusPolicy::Lenient),
            "strict" => Ok(StatusPolicy::Strict),
            other => Err(format!(
                "unknown status policy '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}
