use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ID Type
// ============================================================================

/// Order identifier as issued by the order store (`_id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Purchase record owned by the order store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,

    #[serde(default)]
    pub product: String,

    #[serde(default)]
    pub quantity: i64,

    /// false = pending, true = shipped
    #[serde(default)]
    pub status: bool,

    // Customer
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Order {
    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Shipped"
        } else {
            "Pending"
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Body of `PUT /orders/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusDto {
    pub status: bool,
}

/// Response of `PUT /orders/{id}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    #[serde(rename = "modifiedCount", default)]
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn is_modified(&self) -> bool {
        self.modified_count > 0
    }
}

/// Response of `DELETE /orders/{id}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(rename = "deletedCount", default)]
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn is_deleted(&self) -> bool {
        self.deleted_count > 0
    }
}
