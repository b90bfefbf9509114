//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Each method performs exactly one statement against the pool; a pooled
//! connection is checked out for the duration of the call and released
//! unconditionally when it completes.

use crate::domain::{Contact, Customer, Interaction, Opportunity, OpportunityStage};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::warn;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    // =========================================================================
    // Customer operations
    // =========================================================================

    /// Insert a customer and return the persisted record with its new id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including the unique-constraint
    /// violation when `email` is already taken.
    pub async fn insert_customer(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, email, phone, address)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            address: address.map(str::to_string),
        })
    }

    /// List customers in primary-key order with offset pagination.
    pub async fn list_customers(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, address
            FROM customers
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(customer_from_row).collect())
    }

    /// Get a single customer by id. Returns None if no such row exists.
    pub async fn get_customer(&self, id: i64) -> Result<Option<Customer>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, address
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(customer_from_row))
    }

    /// Overwrite every field of a customer unconditionally (no partial merge).
    ///
    /// Returns None if the id does not exist.
    ///
    /// # Errors
    /// Returns an error if the update fails, including the unique-constraint
    /// violation when `email` collides with another customer.
    pub async fn update_customer(
        &self,
        id: i64,
        name: &str,
        email: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, email = ?, phone = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            address: address.map(str::to_string),
        }))
    }

    /// Delete a customer by id. Child contacts, opportunities, and
    /// interactions cascade at the database level.
    ///
    /// Returns false if the id does not exist.
    pub async fn delete_customer(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Contact operations
    // =========================================================================

    /// Insert a contact and return the persisted record with its new id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including the foreign-key
    /// violation when `customer_id` references no existing customer.
    pub async fn insert_contact(
        &self,
        customer_id: i64,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Contact, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (customer_id, name, email, phone)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .execute(&self.pool)
        .await?;

        Ok(Contact {
            id: result.last_insert_rowid(),
            customer_id,
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
        })
    }

    /// List contacts in primary-key order with offset pagination.
    pub async fn list_contacts(&self, skip: i64, limit: i64) -> Result<Vec<Contact>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, name, email, phone
            FROM contacts
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        let contacts = rows
            .iter()
            .map(|row| Contact {
                id: row.get("id"),
                customer_id: row.get("customer_id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
            })
            .collect();

        Ok(contacts)
    }

    /// List a customer's contacts in primary-key order.
    pub async fn list_contacts_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, name, email, phone
            FROM contacts
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let contacts = rows
            .iter()
            .map(|row| Contact {
                id: row.get("id"),
                customer_id: row.get("customer_id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
            })
            .collect();

        Ok(contacts)
    }

    // =========================================================================
    // Opportunity operations
    // =========================================================================

    /// Insert an opportunity and return the persisted record with its new id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including the foreign-key
    /// violation when `customer_id` references no existing customer.
    pub async fn insert_opportunity(
        &self,
        customer_id: i64,
        title: &str,
        description: Option<&str>,
        stage: OpportunityStage,
    ) -> Result<Opportunity, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO opportunities (customer_id, title, description, stage)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(title)
        .bind(description)
        .bind(stage.as_str())
        .execute(&self.pool)
        .await?;

        Ok(Opportunity {
            id: result.last_insert_rowid(),
            customer_id,
            title: title.to_string(),
            description: description.map(str::to_string),
            stage,
        })
    }

    /// List a customer's opportunities in primary-key order.
    pub async fn list_opportunities_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Opportunity>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, title, description, stage
            FROM opportunities
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let opportunities = rows
            .iter()
            .map(|row| {
                let stage_str: String = row.get("stage");
                let stage = stage_str.parse::<OpportunityStage>().unwrap_or_else(|e| {
                    warn!(
                        opportunity_id = row.get::<i64, _>("id"),
                        error = %e,
                        "Failed to parse opportunity stage, using default"
                    );
                    OpportunityStage::default()
                });

                Opportunity {
                    id: row.get("id"),
                    customer_id: row.get("customer_id"),
                    title: row.get("title"),
                    description: row.get("description"),
                    stage,
                }
            })
            .collect();

        Ok(opportunities)
    }

    // =========================================================================
    // Interaction operations
    // =========================================================================

    /// Insert an interaction and return the persisted record with its new id.
    ///
    /// When `occurred_at` is None, the record-creation time is used.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including the foreign-key
    /// violation when `customer_id` references no existing customer.
    pub async fn insert_interaction(
        &self,
        customer_id: i64,
        kind: &str,
        occurred_at: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> Result<Interaction, sqlx::Error> {
        let occurred_at = occurred_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            r#"
            INSERT INTO interactions (customer_id, kind, occurred_at, notes)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(kind)
        .bind(occurred_at)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(Interaction {
            id: result.last_insert_rowid(),
            customer_id,
            kind: kind.to_string(),
            occurred_at,
            notes: notes.map(str::to_string),
        })
    }

    /// List a customer's interactions in primary-key order.
    pub async fn list_interactions_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Interaction>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, kind, occurred_at, notes
            FROM interactions
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let interactions = rows
            .iter()
            .map(|row| Interaction {
                id: row.get("id"),
                customer_id: row.get("customer_id"),
                kind: row.get("kind"),
                occurred_at: row.get("occurred_at"),
                notes: row.get("notes"),
            })
            .collect();

        Ok(interactions)
    }
}

fn customer_from_row(row: &sqlx::sqlite::SqliteRow) -> Customer {
    Customer {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        address: row.get("address"),
    }
}
