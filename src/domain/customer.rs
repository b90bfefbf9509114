//! Top-level business entity owning contacts, opportunities, and interactions.

use serde::{Deserialize, Serialize};

/// A customer record as persisted and served over the API.
///
/// `email` is globally unique across all customers; the database enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
