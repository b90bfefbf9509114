//! Domain types for the CRM entities.
//!
//! This module provides:
//! - The four record types: Customer, Contact, Opportunity, Interaction
//! - The closed OpportunityStage enumeration with its wire/storage encoding

pub mod contact;
pub mod customer;
pub mod interaction;
pub mod opportunity;

pub use contact::Contact;
pub use customer::Customer;
pub use interaction::Interaction;
pub use opportunity::{Opportunity, OpportunityStage, StageParseError};
