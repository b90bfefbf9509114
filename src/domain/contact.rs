//! A person associated with a customer.

use serde::{Deserialize, Serialize};

/// A contact record. `customer_id` always references an existing customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}
