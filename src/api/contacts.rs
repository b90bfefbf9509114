use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{AppState, ListQuery};
use crate::domain::Contact;
use crate::error::AppError;

/// Field set for creating a contact.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub customer_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

pub async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .repo
        .insert_contact(
            payload.customer_id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok(Json(contact))
}

pub async fn list_contacts(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = state.repo.list_contacts(params.skip, params.limit).await?;
    Ok(Json(contacts))
}
